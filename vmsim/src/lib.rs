//!
//! # vmsim
//!
//! Demand paging and TLB simulation
//!
//! ## Introduction
//!
//! vmsim replays a trace of virtual addresses against a simulated memory management
//! unit. Every address is split into a page and an offset, resolved through a small
//! translation lookaside buffer and an unbounded page table and finally read from
//! physical frames which are filled on demand from a read-only backing store.
//!
//! ```text
//!   virtual address
//!         |
//!   +-----v----------+     +-----------+     +--------------+
//!   | AddressDecoder |---->| TlbCache  |---->|  PageTable   |
//!   +----------------+     +-----+-----+     +------+-------+
//!                                |  hit             |  fault
//!                                |           +------v-------+
//!                                |           | BackingStore |
//!                                |           +------+-------+
//!                          +-----v-----+            |
//!                          | FrameStore|<-----------+
//!                          +-----------+
//! ```
//!
//! ## Getting started
//!
//! ```
//! use vmsim::prelude::v1::*;
//!
//! # fn main() -> Result<()> {
//! let store = BufferBackingStore::with_pattern(256, 256);
//! let mut translator = Translator::new(MmuSpec::DEFAULT, store)?;
//!
//! let trace = TraceReader::new("0\n0\n256\n".as_bytes(), 65536);
//! let stats = translator.replay(trace, |t| {
//!     println!("{}", t);
//!     Ok(())
//! })?;
//!
//! assert_eq!(stats.page_faults, 2);
//! assert_eq!(stats.tlb_hits, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Structure
//!
//! [mmu](crate::mmu) defines the simulated memory management unit and the address split,
//! [mem](crate::mem) contains the frame store, the page table and the TLB,
//! [connector](crate::connector) provides backing store implementations and
//! [translate](crate::translate) ties everything together.

pub mod error;

pub mod types;

pub mod mmu;

pub mod mem;

pub mod connector;

pub mod translate;

pub mod trace;

pub mod config;

#[doc(hidden)]
pub mod prelude {
    pub mod v1 {
        pub use crate::config::*;
        pub use crate::connector::*;
        pub use crate::error::*;
        pub use crate::mem::*;
        pub use crate::mmu::*;
        pub use crate::trace::*;
        pub use crate::translate::*;
        pub use crate::types::*;
    }
    pub use v1::*;
}
