mod local;
mod snapshot;

pub use local::LocalAddressSpace;
pub use snapshot::SnapshotAddressSpace;

/// Failure of the raw memory/register primitive behind an [AddressSpace].
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum AccessError {
    #[error("invalid address: {0:#x}")]
    InvalidAddress(u64),

    #[error("invalid register number: {0}")]
    InvalidRegister(u16),

    #[error("no register file available")]
    NoRegisterFile,
}

/// The memory and registers of the program being unwound.
///
/// Memory is moved as raw bytes in target byte order; converting to host
/// values is left to the caller. Registers are moved as host-order words
/// holding the raw bits of the register, floating point registers included.
pub trait AddressSpace {
    fn read_memory(&mut self, address: u64, buf: &mut [u8]) -> Result<(), AccessError>;

    fn write_memory(&mut self, address: u64, buf: &[u8]) -> Result<(), AccessError>;

    fn read_register(&mut self, register: u16) -> Result<u64, AccessError>;

    fn write_register(&mut self, register: u16, value: u64) -> Result<(), AccessError>;
}

impl<T: AddressSpace + ?Sized> AddressSpace for &mut T {
    #[inline]
    fn read_memory(&mut self, address: u64, buf: &mut [u8]) -> Result<(), AccessError> {
        (**self).read_memory(address, buf)
    }

    #[inline]
    fn write_memory(&mut self, address: u64, buf: &[u8]) -> Result<(), AccessError> {
        (**self).write_memory(address, buf)
    }

    #[inline]
    fn read_register(&mut self, register: u16) -> Result<u64, AccessError> {
        (**self).read_register(register)
    }

    #[inline]
    fn write_register(&mut self, register: u16, value: u64) -> Result<(), AccessError> {
        (**self).write_register(register, value)
    }
}
