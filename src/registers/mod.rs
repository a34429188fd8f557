use crate::profile::ArchitectureProfile;
use lazy_static::lazy_static;
use std::fmt;
use std::str::FromStr;

pub mod arm;
pub mod loongarch64;

/// Identifies a register within one architecture profile.
///
/// Register numbers are not portable: the same number names different
/// registers on different architectures.
pub type RegisterId = usize;

lazy_static! {
    static ref ARM: ArchitectureProfile = checked(arm::profile());
    static ref LOONGARCH64: ArchitectureProfile = checked(loongarch64::profile());
}

#[inline]
fn checked(profile: ArchitectureProfile) -> ArchitectureProfile {
    debug_assert_eq!(profile.validate(), Ok(()));
    profile
}

/// The architectures a [FrameContext] can be created for.
///
/// [FrameContext]: crate::FrameContext
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Architecture {
    Arm,
    LoongArch64,
}

impl Architecture {
    /// Get the register profile of this architecture.
    ///
    /// Profiles are built on first use and shared by the whole process.
    #[inline]
    pub fn profile(self) -> &'static ArchitectureProfile {
        match self {
            Architecture::Arm => &*ARM,
            Architecture::LoongArch64 => &*LOONGARCH64,
        }
    }

    /// The architecture this crate was compiled for, if it is supported.
    pub fn host() -> Option<Self> {
        if cfg!(target_arch = "arm") {
            Some(Architecture::Arm)
        } else if cfg!(target_arch = "loongarch64") {
            Some(Architecture::LoongArch64)
        } else {
            None
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().name())
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("unsupported architecture: {0}")]
pub struct UnknownArchitecture(String);

impl FromStr for Architecture {
    type Err = UnknownArchitecture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "arm" | "armv7" | "armel" => Ok(Architecture::Arm),
            "loongarch64" | "la64" => Ok(Architecture::LoongArch64),
            _ => Err(UnknownArchitecture(s.to_string())),
        }
    }
}
