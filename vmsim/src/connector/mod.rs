/*!
Module containing the backing store implementations.

A backing store provides the contents of the simulated pages. This module
contains a file i/o and a memory mapped file interface as well as an
interface over in-memory buffers.
*/

pub mod buffer;
#[doc(hidden)]
pub use buffer::BufferBackingStore;

pub mod fileio;
#[doc(hidden)]
pub use fileio::FileBackingStore;

#[cfg(feature = "filemap")]
pub mod filemap;
#[cfg(feature = "filemap")]
#[doc(hidden)]
pub use filemap::MappedBackingStore;
