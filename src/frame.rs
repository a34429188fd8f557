use crate::access::{access_fp_register, access_register};
use crate::location::SavedLocation;
use crate::profile::ArchitectureProfile;
use crate::registers::RegisterId;
use crate::space::AddressSpace;
use crate::{Error, Result};
use smallvec::SmallVec;

/// Location tables up to this length are stored inline.
pub const MAX_INLINE_SLOTS: usize = 128;

/// `FrameContext` holds what is known about the registers of one stack frame.
///
/// The stepping engine creates a context when it materializes a frame, records
/// where each saved register lives with [set_location], and fills in the
/// instruction pointer and the CFA. Registers are then read and written through
/// [access_register] or the helpers on this type, which resolve every access
/// against the frame's [ArchitectureProfile].
///
/// A context belongs to exactly one unwind, it is never shared between threads
/// while in use.
///
/// [set_location]: FrameContext::set_location
/// [access_register]: crate::access_register
pub struct FrameContext<'p, A: AddressSpace> {
    pub(crate) profile: &'p ArchitectureProfile,
    pub(crate) space: A,
    pub(crate) locations: SmallVec<[SavedLocation; MAX_INLINE_SLOTS]>,
    pub(crate) ip: u64,
    pub(crate) cfa: u64,
}

impl<'p, A: AddressSpace> FrameContext<'p, A> {
    /// Creates a new `FrameContext` with every location undefined.
    pub fn new(profile: &'p ArchitectureProfile, space: A) -> Self {
        let mut locations = SmallVec::new();
        locations.resize(profile.slot_count(), SavedLocation::Undefined);
        Self {
            profile,
            space,
            locations,
            ip: 0,
            cfa: 0,
        }
    }

    #[inline]
    pub fn profile(&self) -> &'p ArchitectureProfile {
        self.profile
    }

    #[inline]
    pub fn space(&self) -> &A {
        &self.space
    }

    #[inline]
    pub fn space_mut(&mut self) -> &mut A {
        &mut self.space
    }

    #[inline]
    pub fn into_space(self) -> A {
        self.space
    }

    /// Get the cached value of the instruction pointer.
    #[inline]
    pub fn ip(&self) -> u64 {
        self.ip
    }

    #[inline]
    pub fn set_ip(&mut self, ip: u64) {
        self.ip = ip & self.profile.word_mask();
    }

    /// Get the canonical frame address.
    #[inline]
    pub fn cfa(&self) -> u64 {
        self.cfa
    }

    #[inline]
    pub fn set_cfa(&mut self, cfa: u64) {
        self.cfa = cfa & self.profile.word_mask();
    }

    #[inline]
    pub fn location(&self, slot: usize) -> Option<SavedLocation> {
        self.locations.get(slot).copied()
    }

    /// Record where the value of location table entry `slot` is saved.
    pub fn set_location(&mut self, slot: usize, location: SavedLocation) -> Result<()> {
        match self.locations.get_mut(slot) {
            Some(l) => {
                *l = location;
                Ok(())
            }
            None => Err(Error::BadSlot(slot)),
        }
    }

    /// Forget every recorded location, e.g. before reusing the context for the
    /// next frame.
    pub fn clear_locations(&mut self) {
        self.locations.iter_mut().for_each(|l| *l = SavedLocation::Undefined);
    }

    #[inline]
    pub fn register(&mut self, id: RegisterId) -> Result<u64> {
        let mut value = 0;
        access_register(self, id, &mut value, false)?;
        Ok(value)
    }

    #[inline]
    pub fn set_register(&mut self, id: RegisterId, value: u64) -> Result<()> {
        let mut value = value;
        access_register(self, id, &mut value, true)
    }

    #[inline]
    pub fn fp_register(&mut self, id: RegisterId) -> Result<f64> {
        let mut value = 0.0;
        access_fp_register(self, id, &mut value, false)?;
        Ok(value)
    }

    #[inline]
    pub fn set_fp_register(&mut self, id: RegisterId, value: f64) -> Result<()> {
        let mut value = value;
        access_fp_register(self, id, &mut value, true)
    }
}

impl<'p, A: AddressSpace + std::fmt::Debug> std::fmt::Debug for FrameContext<'p, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameContext")
            .field("profile", &self.profile.name())
            .field("space", &self.space)
            .field("ip", &format_args!("{:#x}", self.ip))
            .field("cfa", &format_args!("{:#x}", self.cfa))
            .finish()
    }
}
