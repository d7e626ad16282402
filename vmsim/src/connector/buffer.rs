/*!
Backing store over an in-memory buffer.
*/

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::mem::BackingStore;
use crate::types::{umem, PageId};

/// Serves pages from an owned buffer.
///
/// Mostly useful for tests and benchmarks where no store file is available.
#[derive(Clone)]
pub struct BufferBackingStore {
    buf: Box<[u8]>,
    page_size: umem,
}

impl BufferBackingStore {
    pub fn new(buf: impl Into<Box<[u8]>>, page_size: umem) -> Self {
        Self {
            buf: buf.into(),
            page_size,
        }
    }

    /// Creates a store of `page_count` pages in which every byte is derived from its offset.
    ///
    /// The byte at offset `o` equals `o % 251`, a prime that does not divide any page size,
    /// so the contents of consecutive pages differ.
    pub fn with_pattern(page_count: umem, page_size: umem) -> Self {
        let buf = (0..page_count * page_size)
            .map(|offset| (offset % 251) as u8)
            .collect::<Vec<_>>();
        Self::new(buf, page_size)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

impl BackingStore for BufferBackingStore {
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()> {
        let start = page.store_offset(self.page_size) as usize;
        let data = start
            .checked_add(out.len())
            .and_then(|end| self.buf.get(start..end))
            .ok_or_else(|| {
                Error(ErrorOrigin::BackingStore, ErrorKind::UnableToReadFile).log_error(format!(
                    "page {} at offset {} is outside of the buffer ({} bytes)",
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
