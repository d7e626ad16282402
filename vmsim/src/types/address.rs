/*!
Abstraction over a virtual address of the simulated process.
*/

use std::fmt;

/// The memory size type used for addresses and store offsets.
#[allow(non_camel_case_types)]
pub type umem = u64;

/// This type represents a virtual address of the simulated address space.
///
/// The address is not bounds checked on construction, the bounds of a run are
/// enforced by the [`AddressDecoder`](crate::mmu::AddressDecoder).
///
/// # Examples
///
/// ```
/// use vmsim::types::Address;
///
/// let addr = Address::from(0x1234u64);
/// assert_eq!(addr.to_umem(), 0x1234);
/// assert_eq!(format!("{:x}", addr), "1234");
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
pub struct Address(umem);

impl Address {
    /// A address with the value of zero.
    pub const NULL: Address = Address(0);

    /// Converts the address into a `umem` value.
    #[inline]
    pub const fn to_umem(self) -> umem {
        self.0
    }
}

macro_rules! impl_address_from {
    ($type_name:ident) => {
        impl From<$type_name> for Address {
            fn from(item: $type_name) -> Self {
                Self(item as umem)
            }
        }
    };
}

impl_address_from!(u8);
impl_address_from!(u16);
impl_address_from!(u32);
impl_address_from!(u64);
impl_address_from!(usize);

impl From<Address> for umem {
    fn from(address: Address) -> umem {
        address.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from() {
        assert_eq!(Address::from(1u8).to_umem(), 1);
        assert_eq!(Address::from(0x1234u16), Address::from(0x1234usize));
        assert_eq!(umem::from(Address::from(0xffff_ffffu32)), 0xffff_ffff);
        assert_eq!(Address::NULL.to_umem(), 0);
    }

    #[test]
    fn test_fmt() {
        let addr = Address::from(0xabcu64);
        assert_eq!(format!("{}", addr), "2748");
        assert_eq!(format!("{:x}", addr), "abc");
        assert_eq!(format!("{:X}", addr), "ABC");
        assert_eq!(format!("{:?}", addr), "abc");
    }
}
