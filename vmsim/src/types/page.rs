/*!
This module contains the identifiers of pages and physical frames.
*/

use std::fmt;

use super::umem;

/// Identifies a page of the virtual address space and of the backing store.
///
/// A page id is the virtual address divided by the page size.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct PageId(u32);

impl PageId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Returns the byte offset of this page in a store partitioned into `page_size` pages.
    ///
    /// # Examples
    ///
    /// ```
    /// use vmsim::types::PageId;
    ///
    /// assert_eq!(PageId::new(3).store_offset(256), 768);
    /// ```
    #[inline]
    pub const fn store_offset(self, page_size: umem) -> umem {
        self.0 as umem * page_size
    }

    /// Returns the frame that holds this page.
    ///
    /// Frames are never shared between pages, every page is loaded into the frame
    /// with the same index.
    #[inline]
    pub const fn identity_frame(self) -> FrameId {
        FrameId(self.0)
    }
}

impl From<u32> for PageId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for PageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PageId({})", self.0)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a physical frame of the [`FrameStore`](crate::mem::FrameStore).
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct FrameId(u32);

impl FrameId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for FrameId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Debug for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
