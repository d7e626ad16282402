use crate::error::Result;
use crate::types::{umem, PageId};

/// The read-only medium that holds the contents of every page.
///
/// The store is partitioned into pages of the frame size, the contents of page `p`
/// start at byte offset `p * page_size`. Implementations for files, memory mapped
/// files and in-memory buffers can be found in the [`connector`](crate::connector) module.
pub trait BackingStore {
    /// Fills `out` with the contents of `page`.
    ///
    /// The length of `out` is the page size. Implementations fail with
    /// `UnableToReadFile` if the page can not be read completely.
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()>;

    /// Returns the size of the medium in bytes.
    fn size(&self) -> umem;
}

impl<T: BackingStore + ?Sized> BackingStore for &mut T {
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()> {
        (**self).read_page(page, out)
    }

    fn size(&self) -> umem {
        (**self).size()
    }
}

impl<T: BackingStore + ?Sized> BackingStore for Box<T> {
    fn read_page(&mut self, page: PageId, out: &mut [u8]) -> Result<()> {
        (**self).read_page(page, out)
    }

    fn size(&self) -> umem {
        (**self).size()
    }
}
