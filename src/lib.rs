//! This crate provides the register location layer of a stack unwinder: given
//! a register number and a frame, it finds where the register's value lives
//! (a saved slot, a cached field of the frame, or a synthetic value) and reads
//! or writes it with the byte order of the target architecture.
//!
//! The frame-stepping engine fills a [FrameContext] with the locations it
//! recovered from CFI, and everything else goes through [access_register] and
//! [access_fp_register]:
//! ```
//! use unwind_regs::registers::arm::*;
//! use unwind_regs::{Architecture, FrameContext, SavedLocation, SnapshotAddressSpace};
//!
//! let mut space = SnapshotAddressSpace::new();
//! space.add_region(0x8000, vec![0; 16]);
//!
//! let mut frame = FrameContext::new(Architecture::Arm.profile(), space);
//! frame.set_cfa(0x8010);
//! frame.set_location(15, SavedLocation::Memory(0x8000)).unwrap();
//!
//! frame.set_register(UNW_ARM_R15, 0x1000).unwrap();
//! assert_eq!(frame.register(UNW_ARM_R15).unwrap(), 0x1000);
//! assert_eq!(frame.ip(), 0x1000);
//! assert!(frame.set_register(UNW_ARM_R13, 0).is_err());
//! assert!(frame.register(99).is_err());
//! ```
//!
//! Two architecture profiles are built in, ARM and LoongArch64. They live in
//! process-wide tables and can be mixed freely within one process.

mod access;
mod frame;
mod location;
mod profile;
pub mod registers;
mod space;
mod utils;

pub use access::{access_fp_register, access_register};
pub use frame::FrameContext;
pub use location::{LocationDescriptor, SavedLocation};
pub use profile::{
    ArchitectureProfile, ByteOrder, CachedField, FpAlias, RegisterClass, Synthetic, UnknownRegisterPolicy,
};
pub use registers::{Architecture, RegisterId, UnknownArchitecture};
pub use space::{AccessError, AddressSpace, LocalAddressSpace, SnapshotAddressSpace};
pub use utils::AddressRange;

/// A result type that wraps [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// Error definition.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    #[error("bad register number: {0}")]
    BadRegister(RegisterId),

    #[error("attempt to write a read-only register")]
    ReadOnlyRegister,

    #[error("register location is unresolved")]
    UnresolvedLocation,

    #[error("location table slot out of range: {0}")]
    BadSlot(usize),

    #[error("{0}")]
    Access(#[from] AccessError),
}
