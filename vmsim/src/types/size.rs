//! This module contains helper functions for creating various byte sizes.
//! All function are const and will be optimized by rustc.
use super::umem;

/// Returns a umem representing the length in bytes from the given number of bytes.
pub const fn b(b: umem) -> umem {
    b
}

/// Returns a umem representing the length in bytes from the given number of kilobytes.
pub const fn kb(kb: umem) -> umem {
    kb * 1024
}

/// Returns a umem representing the length in bytes from the given number of megabytes.
pub const fn mb(mb: umem) -> umem {
    kb(mb) * 1024
}
