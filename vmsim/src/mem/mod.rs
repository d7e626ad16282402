/*!
This module covers the memory hierarchy of the simulation.

The [`FrameStore`] holds the physical frames, the [`PageTable`] maps every
resolved page to its frame and the [`TlbCache`] caches a small subset of
these bindings. Pages are read from a [`BackingStore`] when they are
referenced for the first time.
*/

pub mod backing_store;
pub mod frame_store;
pub mod page_table;
pub mod tlb_cache;

#[doc(hidden)]
pub use backing_store::BackingStore;
#[doc(hidden)]
pub use frame_store::FrameStore;
#[doc(hidden)]
pub use page_table::{PageLookup, PageTable};
#[doc(hidden)]
pub use tlb_cache::{TlbCache, TlbEntry, TlbIter};
