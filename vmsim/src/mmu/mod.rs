/*!
Definition of the simulated memory management unit.

The [`MmuSpec`] describes the page size, the size of the virtual
address space and the TLB capacity of a run. The [`AddressDecoder`] is
built from it and performs the address split of every translation.
*/

pub mod decoder;
pub mod spec;

#[doc(hidden)]
pub use decoder::AddressDecoder;
#[doc(hidden)]
pub use spec::{MmuSpec, MAX_PAGE_COUNT, MAX_PAGE_SIZE};
