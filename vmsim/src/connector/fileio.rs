/*!
Basic backing store which works on file i/o operations (`Seek`, `Read`).
*/

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::BackingStore;
use crate::types::{umem, PageId};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Reads pages from any seekable reader.
///
/// # Examples
/// ```
/// use vmsim::connector::FileBackingStore;
/// use vmsim::mem::BackingStore;
/// use vmsim::types::PageId;
///
/// use std::io::Cursor;
///
/// let data = (0..=255u8).cycle().take(1024).collect::<Vec<_>>();
/// let mut store = FileBackingStore::try_with_reader(Cursor::new(data), 256).unwrap();
///
/// let mut page = [0u8; 256];
/// store.read_page(PageId::new(2), &mut page).unwrap();
/// assert_eq!(page[3], 3);
/// ```
pub struct FileBackingStore<T> {
    reader: T,
    page_size: umem,
    size: umem,
}

impl FileBackingStore<File> {
    /// Opens the store file at `path`.
    pub fn open<P: AsRef<Path>>(path: P, page_size: umem) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToOpenFile)
                .log_error(format!("{}: {}", path.display(), err))
        })?;
        Self::try_with_reader(file, page_size)
    }
}

impl<T: Read + Seek> FileBackingStore<T> {
    pub fn try_with_reader(mut reader: T, page_size: umem) -> Result<Self> {
        let size = reader.seek(SeekFrom::End(0)).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToSeekFile).log_error(err)
        })?;
        Ok(Self {
            reader,
            page_size,
            size,
        })
    }
}

impl<T: Read + Seek> BackingStore for FileBackingStore<T> {
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()> {
        let offset = page.store_offset(self.page_size);
        self.reader
            .seek(SeekFrom::Start(offset))
            .map_err(|err| {
                Error(ErrorOrigin::BackingStore, ErrorKind::UnableToSeekFile)
                    .log_error(format!("page {} at offset {}: {}", page, offset, err))
            })?;
        self.reader.read_exact(out).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile)
                .log_error(format!("page {} at offset {}: {}", page, offset, err))
        })
    }

    fn size(&self) -> umem {
        self.size
    }
}
