use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::BackingStore;
use crate::types::{umem, PageId};
use memmap::{Mmap, MmapOptions};

use std::fs::File;
use std::path::Path;

/// Backing store on top of a read-only memory mapping of the store file.
pub struct MappedBackingStore {
    buf: Mmap,
    page_size: umem,
}

impl MappedBackingStore {
    pub fn open<P: AsRef<Path>>(path: P, page_size: umem) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| {
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToOpenFile)
                .log_error(format!("{}: {}", path.display(), err))
        })?;
        Self::try_with_file(&file, page_size)
    }

    pub fn try_with_file(file: &File, page_size: umem) -> Result<Self> {
        // the store is never written, neither by us nor by the simulation
        let buf = unsafe {
            MmapOptions::new().map(file).map_err(|err| {
                Error(ErrorOrigin::BackingStore, ErrorKind::UnableToMapFile).log_error(err)
            })?
        };
        Ok(Self { buf, page_size })
    }
}

impl BackingStore for MappedBackingStore {
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()> {
        let start = page.store_offset(self.page_size) as usize;
        let data = start
            .checked_add(out.len())
            .and_then(|end| self.buf.get(start..end))
            .ok_or_else(|| {
                Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile).log_error(format!(
                    "page {} at offset {} is outside of the mapping ({} bytes)",
                    page,
                    start,
                    self.buf.len()
                ))
            })?;
        out.copy_from_slice(data);
        Ok(())
    }

    fn size(&self) -> umem {
        self.buf.len() as umem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    fn store_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let data = (0..len).map(|i| (i / 16) as u8).collect::<Vec<_>>();
        file.write_all(&data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn read_pages() {
        let file = store_file(64);
        let mut store = MappedBackingStore::open(file.path(), 16).unwrap();
        assert_eq!(store.size(), 64);

        let mut buf = [0u8; 16];
        for page in 0..4u32 {
            store.read_page(PageId::new(page), &mut buf).unwrap();
            assert!(buf.iter().all(|b| *b as u32 == page));
        }
    }

    #[test]
    fn short_read() {
        let file = store_file(40);
        let mut store = MappedBackingStore::open(file.path(), 16).unwrap();

        let mut buf = [0u8; 16];
        store.read_page(PageId::new(1), &mut buf).unwrap();
        assert_eq!(
            store.read_page(PageId::new(2), &mut buf).unwrap_err(),
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile)
        );
        assert_eq!(
            store.read_page(PageId::new(u32::MAX), &mut buf).unwrap_err(),
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile)
        );
    }

    #[test]
    fn empty_file_can_not_be_mapped() {
        let file = store_file(0);
        assert_eq!(
            MappedBackingStore::open(file.path(), 16).err().unwrap(),
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToMapFile)
        );
    }

    #[test]
    fn missing_file() {
        assert_eq!(
            MappedBackingStore::open("/nonexistent/BACKING_STORE.bin", 256)
                .err()
                .unwrap(),
            Error(ErrorOrigin::BackingStore, ErrorKind::UnableToOpenFile)
        );
    }
}
