use crate::space::{AccessError, AddressSpace};
use crate::utils::{load_bytes, store_bytes};

/// The memory of the current process.
///
/// With the `mem-protect` feature on Linux and macOS, every access first
/// checks that the memory is mapped and readable, and an unmapped address is
/// reported as [AccessError::InvalidAddress]. Nothing checks that memory is
/// writable: writing to a mapped read-only page still crashes the process.
/// Without the feature only the null address and wrapping spans are rejected.
///
/// There is no live register file behind a local address space, registers
/// have to be saved to memory by the stepping engine.
#[derive(Debug, Copy, Clone)]
pub struct LocalAddressSpace {
    _priv: (),
}

impl LocalAddressSpace {
    /// # Safety
    ///
    /// Every location the space is asked to write must be mapped, writable
    /// memory not borrowed by Rust code, such as the saved slots of a live
    /// stack. Without the `mem-protect` check the same holds for every
    /// location read.
    #[inline]
    pub unsafe fn new() -> Self {
        Self { _priv: () }
    }
}

#[cfg(all(feature = "mem-protect", any(target_os = "linux", target_os = "macos")))]
#[inline]
fn check(address: u64, len: usize) -> Result<(), AccessError> {
    if crate::utils::can_access_span(address, len) {
        Ok(())
    } else {
        Err(AccessError::InvalidAddress(address))
    }
}

#[cfg(not(all(feature = "mem-protect", any(target_os = "linux", target_os = "macos"))))]
#[inline]
fn check(address: u64, len: usize) -> Result<(), AccessError> {
    if address == 0 || address.checked_add(len as u64).is_none() {
        Err(AccessError::InvalidAddress(address))
    } else {
        Ok(())
    }
}

impl AddressSpace for LocalAddressSpace {
    fn read_memory(&mut self, address: u64, buf: &mut [u8]) -> Result<(), AccessError> {
        check(address, buf.len())?;
        // Safety: readability was just checked, or promised by the caller of `new`.
        unsafe { load_bytes(address, buf) };
        Ok(())
    }

    fn write_memory(&mut self, address: u64, buf: &[u8]) -> Result<(), AccessError> {
        check(address, buf.len())?;
        // Safety: writability is promised by the caller of `new`.
        unsafe { store_bytes(address, buf) };
        Ok(())
    }

    fn read_register(&mut self, _register: u16) -> Result<u64, AccessError> {
        Err(AccessError::NoRegisterFile)
    }

    fn write_register(&mut self, _register: u16, _value: u64) -> Result<(), AccessError> {
        Err(AccessError::NoRegisterFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_memory() {
        let mut slot = [0u8; 8];
        let address = slot.as_mut_ptr() as u64;
        let mut space = unsafe { LocalAddressSpace::new() };
        space.write_memory(address, &[1, 2, 3, 4]).unwrap();
        let mut buf = [0u8; 4];
        space.read_memory(address, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(slot[..4], [1, 2, 3, 4]);
    }

    #[test]
    fn test_local_bad_address() {
        let mut space = unsafe { LocalAddressSpace::new() };
        let mut buf = [0u8; 4];
        assert_eq!(space.read_memory(0, &mut buf), Err(AccessError::InvalidAddress(0)));
        assert_eq!(space.write_memory(0, &buf), Err(AccessError::InvalidAddress(0)));
    }

    #[cfg(all(feature = "mem-protect", target_os = "linux"))]
    #[test]
    fn test_local_unmapped_page() {
        let address = unsafe {
            let page = libc::mmap(
                std::ptr::null_mut(),
                4096,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            );
            assert_ne!(page, libc::MAP_FAILED);
            assert_eq!(libc::munmap(page, 4096), 0);
            page as u64
        };
        let mut space = unsafe { LocalAddressSpace::new() };
        let mut buf = [0u8; 8];
        assert_eq!(space.read_memory(address, &mut buf), Err(AccessError::InvalidAddress(address)));
        assert_eq!(space.write_memory(address, &buf), Err(AccessError::InvalidAddress(address)));
    }

    #[test]
    fn test_local_registers() {
        let mut space = unsafe { LocalAddressSpace::new() };
        assert_eq!(space.read_register(0), Err(AccessError::NoRegisterFile));
        assert_eq!(space.write_register(0, 1), Err(AccessError::NoRegisterFile));
    }
}
