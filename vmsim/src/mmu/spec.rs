use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{size, umem};

/// Upper bound for the number of pages of a simulated address space.
///
/// Every page owns a frame slot in the frame store, so this bounds the
/// size of the slot table that is allocated upfront.
pub const MAX_PAGE_COUNT: umem = 1 << 20;

/// Upper bound for the size of a page.
///
/// A translator allocates one page sized buffer upfront and every loaded frame
/// owns a page sized allocation.
pub const MAX_PAGE_SIZE: umem = size::mb(1);

/// Describes the simulated memory management unit.
///
/// An `MmuSpec` is a plain value that can be declared as a constant, the default
/// configuration mirrors a 16 bit address space with 256 byte pages
/// and a 16 entry TLB.
///
/// # Examples
///
/// ```
/// use vmsim::mmu::MmuSpec;
///
/// let spec = MmuSpec::DEFAULT.tlb_entries(32);
/// spec.validate().unwrap();
/// assert_eq!(spec.page_count(), 256);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MmuSpec {
    /// Size of a page and of a frame in bytes. Must be a power of two.
    pub page_size: umem,
    /// Size of the virtual address space in bytes.
    pub address_space_size: umem,
    /// Number of entries the TLB can hold.
    pub tlb_entries: usize,
}

impl MmuSpec {
    pub const DEFAULT: MmuSpec = MmuSpec {
        page_size: size::b(256),
        address_space_size: size::kb(64),
        tlb_entries: 16,
    };

    pub const fn page_size(mut self, page_size: umem) -> Self {
        self.page_size = page_size;
        self
    }

    pub const fn address_space_size(mut self, address_space_size: umem) -> Self {
        self.address_space_size = address_space_size;
        self
    }

    pub const fn tlb_entries(mut self, tlb_entries: usize) -> Self {
        self.tlb_entries = tlb_entries;
        self
    }

    /// Returns the number of pages in the address space.
    ///
    /// This is also the number of physical frames since every page is backed by its own frame.
    #[inline]
    pub const fn page_count(&self) -> umem {
        self.address_space_size / self.page_size
    }

    /// Returns the number of bits an address has to be shifted to get its page id.
    #[inline]
    pub const fn page_shift(&self) -> u32 {
        self.page_size.trailing_zeros()
    }

    /// Returns the mask that extracts the in-page offset from an address.
    #[inline]
    pub const fn offset_mask(&self) -> umem {
        self.page_size - 1
    }

    /// Checks the page size, address space size and tlb capacity for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || !self.page_size.is_power_of_two() {
            return Err(Error(ErrorOrigin::Mmu, ErrorKind::InvalidPageSize).log_error(format!(
                "page size {} is not a power of two",
                self.page_size
            )));
        }

        if self.page_size > MAX_PAGE_SIZE {
            return Err(Error(ErrorOrigin::Mmu, ErrorKind::InvalidPageSize).log_error(format!(
                "page size {} exceeds the maximum of {}",
                self.page_size, MAX_PAGE_SIZE
            )));
        }

        if self.address_space_size == 0 || self.address_space_size % self.page_size != 0 {
            return Err(
                Error(ErrorOrigin::Mmu, ErrorKind::InvalidMemorySize).log_error(format!(
                    "address space size {} is not a multiple of the page size {}",
                    self.address_space_size, self.page_size
                )),
            );
        }

        if self.page_count() > MAX_PAGE_COUNT {
            return Err(
                Error(ErrorOrigin::Mmu, ErrorKind::InvalidMemorySize).log_error(format!(
                    "address space has {} pages, at most {} are supported",
                    self.page_count(),
                    MAX_PAGE_COUNT
                )),
            );
        }

        if self.tlb_entries == 0 {
            return Err(Error(ErrorOrigin::Mmu, ErrorKind::Configuration)
                .log_error("the tlb needs at least one entry"));
        }

        Ok(())
    }
}

impl Default for MmuSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}
