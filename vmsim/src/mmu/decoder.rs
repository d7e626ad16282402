use super::MmuSpec;
use crate::error::{Error, ErrorKind, ErrorOrigin, Result};
use crate::types::{umem, Address, PageId};

/// Splits virtual addresses into a page id and an in-page offset.
///
/// The split is done with a shift and a mask derived from the page size,
/// which is bit-exact with `address / page_size` and `address % page_size`
/// for the power of two page sizes accepted by [`MmuSpec::validate`].
///
/// # Examples
///
/// ```
/// use vmsim::mmu::{AddressDecoder, MmuSpec};
/// use vmsim::types::{Address, PageId};
///
/// let decoder = AddressDecoder::new(MmuSpec::DEFAULT).unwrap();
/// let (page, offset) = decoder.decode(Address::from(16916u64)).unwrap();
/// assert_eq!(page, PageId::new(66));
/// assert_eq!(offset, 20);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct AddressDecoder {
    page_shift: u32,
    offset_mask: umem,
    address_space_size: umem,
}

impl AddressDecoder {
    pub fn new(spec: MmuSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            page_shift: spec.page_shift(),
            offset_mask: spec.offset_mask(),
            address_space_size: spec.address_space_size,
        })
    }

    /// Decodes `address` into its page id and offset.
    ///
    /// Fails with `OutOfRange` if the address lies outside of the address space.
    #[inline]
    pub fn decode(&self, address: Address) -> Result<(PageId, umem)> {
        let raw = address.to_umem();
        if raw >= self.address_space_size {
            return Err(Error(ErrorOrigin::Mmu, ErrorKind::OutOfRange).log_error(format!(
                "address {} is outside of the address space [0, {})",
                raw, self.address_space_size
            )));
        }

        let page = PageId::new((raw >> self.page_shift) as u32);
        Ok((page, raw & self.offset_mask))
    }

    /// Reassembles an address from a page id and an offset.
    #[inline]
    pub fn encode(&self, page: PageId, offset: umem) -> Address {
        Address::from(((page.as_u32() as umem) << self.page_shift) | (offset & self.offset_mask))
    }

    #[inline]
    pub fn page_size(&self) -> umem {
        self.offset_mask + 1
    }

    #[inline]
    pub fn page_count(&self) -> umem {
        self.address_space_size >> self.page_shift
    }

    #[inline]
    pub fn address_space_size(&self) -> umem {
        self.address_space_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::size;

    fn decoder() -> AddressDecoder {
        AddressDecoder::new(MmuSpec::DEFAULT).unwrap()
    }

    #[test]
    fn decode_bounds() {
        let decoder = decoder();
        assert_eq!(
            decoder.decode(Address::NULL).unwrap(),
            (PageId::new(0), 0)
        );
        assert_eq!(
            decoder.decode(Address::from(65535u64)).unwrap(),
            (PageId::new(255), 255)
        );
        assert_eq!(
            decoder.decode(Address::from(256u64)).unwrap(),
            (PageId::new(1), 0)
        );
    }

    #[test]
    fn decode_out_of_range() {
        let decoder = decoder();
        for addr in [65536u64, 70000, u64::MAX] {
            assert_eq!(
                decoder.decode(Address::from(addr)).unwrap_err(),
                Error(ErrorOrigin::Mmu, ErrorKind::OutOfRange)
            );
        }
    }

    #[test]
    fn decode_matches_division() {
        let spec = MmuSpec::DEFAULT
            .page_size(size::kb(1))
            .address_space_size(size::mb(1));
        let decoder = AddressDecoder::new(spec).unwrap();
        for raw in (0..size::mb(1)).step_by(997) {
            let (page, offset) = decoder.decode(Address::from(raw)).unwrap();
            assert_eq!(page.as_u32() as umem, raw / size::kb(1));
            assert_eq!(offset, raw % size::kb(1));
            assert_eq!(decoder.encode(page, offset), Address::from(raw));
        }
    }

    #[test]
    fn accessors() {
        let decoder = decoder();
        assert_eq!(decoder.page_size(), 256);
        assert_eq!(decoder.page_count(), 256);
        assert_eq!(decoder.address_space_size(), 65536);
    }

    #[test]
    fn invalid_spec() {
        assert!(AddressDecoder::new(MmuSpec::DEFAULT.page_size(3)).is_err());
    }
}
