#[cfg(all(feature = "mem-protect", any(target_os = "linux", target_os = "macos")))]
mod access_check;
#[cfg(all(feature = "mem-protect", any(target_os = "linux", target_os = "macos")))]
pub use access_check::*;

/// [start, end)
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AddressRange {
    pub start: u64,
    pub end: u64,
}

impl AddressRange {
    /// Determine whether the target address is in the current range.
    #[inline]
    pub fn contains(&self, target: u64) -> bool {
        self.start <= target && target < self.end
    }

    /// Determine whether `len` bytes starting at `target` are all in the current range.
    #[inline]
    pub fn contains_span(&self, target: u64, len: usize) -> bool {
        match target.checked_add(len as u64) {
            Some(end) => self.start <= target && end <= self.end,
            None => false,
        }
    }

    #[inline]
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Copy `buf.len()` bytes at the `address` into `buf`.
///
/// # Safety
///
/// `address .. address + buf.len()` must be mapped and readable.
#[inline]
pub unsafe fn load_bytes(address: u64, buf: &mut [u8]) {
    std::ptr::copy_nonoverlapping(address as *const u8, buf.as_mut_ptr(), buf.len())
}

/// Copy `buf` to the `address`.
///
/// # Safety
///
/// `address .. address + buf.len()` must be mapped and writable, and must not
/// overlap memory Rust code currently borrows.
#[inline]
pub unsafe fn store_bytes(address: u64, buf: &[u8]) {
    std::ptr::copy_nonoverlapping(buf.as_ptr(), address as *mut u8, buf.len())
}
