/*!
Module with basic types used in vmsim.

This module contains the virtual address type, the page and frame
identifiers and it exposes different size helpers.
*/

pub mod address;
#[doc(hidden)]
pub use address::{umem, Address};

pub mod page;
#[doc(hidden)]
pub use page::{FrameId, PageId};

pub mod size;
