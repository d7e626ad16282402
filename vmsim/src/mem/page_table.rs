use hashbrown::HashMap;

use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{FrameId, PageId};

/// Result of a page table lookup.
///
/// `Fault` is returned exactly for the lookups that are recorded as page faults.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageLookup {
    Resident(FrameId),
    Fault,
}

impl PageLookup {
    pub fn is_resident(&self) -> bool {
        matches!(self, PageLookup::Resident(_))
    }
}

/// Authoritative mapping of resolved pages to their frames.
///
/// Entries are added on the first reference of a page and are never removed or rebound.
/// The table counts a page fault for every lookup that misses, callers therefore
/// have to insert the page after a fault before looking it up again.
#[derive(Clone, Default)]
pub struct PageTable {
    entries: HashMap<PageId, FrameId>,
    faults: usize,
}

impl PageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up `page` and records a page fault if it is not resident.
    pub fn lookup(&mut self, page: PageId) -> PageLookup {
        match self.entries.get(&page) {
            Some(frame) => PageLookup::Resident(*frame),
            None => {
                self.faults += 1;
                PageLookup::Fault
            }
        }
    }

    /// Checks whether `page` is resident.
    ///
    /// Like [`lookup`](Self::lookup) a negative result is counted as a page fault.
    pub fn contains(&mut self, page: PageId) -> bool {
        self.lookup(page).is_resident()
    }

    /// Maps `page` to `frame`.
    ///
    /// Inserting the same binding again is a no-op. Rebinding a resident page to another
    /// frame fails with `AlreadyExists`.
    pub fn insert(&mut self, page: PageId, frame: FrameId) -> Result<()> {
        match self.entries.get(&page) {
            Some(existing) if *existing == frame => Ok(()),
            Some(existing) => {
                debug_assert_eq!(*existing, frame, "page {} can not be remapped", page);
                Err(
                    Error(ErrorOrigin::PageTable, ErrorKind::AlreadyExists).log_error(format!(
                        "page {} is already mapped to frame {}, refusing to remap it to frame {}",
                        page, existing, frame
                    )),
                )
            }
            None => {
                self.entries.insert(page, frame);
                Ok(())
            }
        }
    }

    /// Returns the frame of a resident page without counting a fault.
    pub fn frame(&self, page: PageId) -> Result<FrameId> {
        self.entries.get(&page).copied().ok_or_else(|| {
            Error(ErrorOrigin::PageTable, ErrorKind::NotResident)
                .log_error(format!("page {} was queried before it was inserted", page))
        })
    }

    /// Number of page faults recorded so far.
    pub fn faults(&self) -> usize {
        self.faults
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the resident entries ordered by page id.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, FrameId)> {
        let mut entries = self
            .entries
            .iter()
            .map(|(page, frame)| (*page, *frame))
            .collect::<Vec<_>>();
        entries.sort_unstable();
        entries.into_iter()
    }
}
