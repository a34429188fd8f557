use crate::registers::RegisterId;

/// Byte order of words stored in the target's memory.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// A field cached directly inside a [FrameContext].
///
/// [FrameContext]: crate::FrameContext
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CachedField {
    Ip,
    Cfa,
}

/// The value behind a read-only pseudo register.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Synthetic {
    /// The canonical frame address of the current frame.
    Cfa,
    /// A hardwired zero register.
    Zero,
}

/// Where an integer register of a profile is stored.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RegisterClass {
    /// An entry of the frame's location table.
    Slot(usize),
    /// A field cached in the frame, optionally mirrored by a location table entry.
    Cached { field: CachedField, slot: Option<usize> },
    /// A value derived from the frame that can never be written.
    ReadOnly(Synthetic),
    Invalid,
}

/// Double-width floating point registers aliased onto word slots.
///
/// Register `base_id + n` occupies the slots
/// `base_slot + n * stride .. base_slot + (n + 1) * stride`, lowest slot first.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FpAlias {
    pub base_id: RegisterId,
    pub count: usize,
    pub base_slot: usize,
    pub stride: usize,
}

/// How raw DWARF register numbers unknown to a profile are treated.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum UnknownRegisterPolicy {
    /// Unknown numbers have no register.
    #[default]
    Reject,
    /// Unknown numbers are remapped to register 0. Some producers rely on this,
    /// but it hides malformed unwind info, so it has to be asked for.
    ///
    /// Profiles that carry a legacy DWARF mapping apply that mapping to every
    /// raw number instead of their regular one.
    MapToZero,
}

/// The register layout of one instruction set.
///
/// Profiles are built once per architecture and never change afterwards, see
/// [Architecture::profile].
///
/// [Architecture::profile]: crate::Architecture::profile
#[derive(Debug)]
pub struct ArchitectureProfile {
    pub(crate) name: &'static str,
    pub(crate) word_size: usize,
    pub(crate) byte_order: ByteOrder,
    pub(crate) slot_count: usize,
    pub(crate) classes: Vec<RegisterClass>,
    pub(crate) names: Vec<Option<&'static str>>,
    pub(crate) fp_alias: FpAlias,
    pub(crate) dwarf_map: fn(u64) -> Option<RegisterId>,
    pub(crate) legacy_dwarf_map: Option<fn(u64) -> RegisterId>,
}

impl ArchitectureProfile {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Size in bytes of an integer register and of a location table entry.
    #[inline]
    pub fn word_size(&self) -> usize {
        self.word_size
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Number of register ids, valid ids are `0..register_count()`.
    #[inline]
    pub fn register_count(&self) -> usize {
        self.classes.len()
    }

    /// Length of the per-frame location table.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn fp_alias(&self) -> FpAlias {
        self.fp_alias
    }

    /// Mask selecting the bits of a value that fit into one word.
    #[inline]
    pub fn word_mask(&self) -> u64 {
        if self.word_size >= 8 {
            u64::MAX
        } else {
            (1u64 << (self.word_size * 8)) - 1
        }
    }

    /// Classify an integer register.
    #[inline]
    pub fn classify(&self, id: RegisterId) -> RegisterClass {
        self.classes.get(id).copied().unwrap_or(RegisterClass::Invalid)
    }

    /// Resolve a floating point register to the first of its slots.
    pub fn classify_fp(&self, id: RegisterId) -> Option<usize> {
        let alias = &self.fp_alias;
        let n = id.checked_sub(alias.base_id)?;
        if n >= alias.count {
            return None;
        }
        let slot = alias.base_slot + n * alias.stride;
        if slot + alias.stride > self.slot_count {
            return None;
        }
        Some(slot)
    }

    #[inline]
    pub fn is_fp_register(&self, id: RegisterId) -> bool {
        self.classify_fp(id).is_some()
    }

    pub fn register_name(&self, id: RegisterId) -> Option<&'static str> {
        self.names.get(id).copied().flatten()
    }

    /// Map a raw DWARF register number onto a register id of this profile.
    pub fn dwarf_to_register(&self, raw: u64, policy: UnknownRegisterPolicy) -> Option<RegisterId> {
        match (policy, self.legacy_dwarf_map) {
            (UnknownRegisterPolicy::Reject, _) => (self.dwarf_map)(raw),
            (UnknownRegisterPolicy::MapToZero, Some(legacy)) => {
                let id = legacy(raw);
                if id as u64 != raw {
                    log::warn!("{}: dwarf register {} mapped to register {}", self.name, raw, id);
                }
                Some(id)
            }
            (UnknownRegisterPolicy::MapToZero, None) => (self.dwarf_map)(raw).or_else(|| {
                log::warn!("{}: unknown dwarf register {} mapped to register 0", self.name, raw);
                Some(0)
            }),
        }
    }

    /// Check that every slot this profile can resolve to lies in the location table.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.names.len() != self.classes.len() {
            return Err(format!("{}: {} names for {} registers", self.name, self.names.len(), self.classes.len()));
        }
        if self.word_size == 0 || self.word_size > 8 {
            return Err(format!("{}: unsupported word size {}", self.name, self.word_size));
        }
        for (id, class) in self.classes.iter().enumerate() {
            let slot = match *class {
                RegisterClass::Slot(slot) => Some(slot),
                RegisterClass::Cached { slot, .. } => slot,
                RegisterClass::ReadOnly(_) | RegisterClass::Invalid => None,
            };
            if let Some(slot) = slot {
                if slot >= self.slot_count {
                    return Err(format!("{}: register {} uses slot {} out of range", self.name, id, slot));
                }
            }
        }
        let alias = &self.fp_alias;
        if alias.stride * self.word_size != 8 {
            return Err(format!("{}: fp stride {} does not cover a double", self.name, alias.stride));
        }
        if alias.base_slot + alias.count * alias.stride > self.slot_count {
            return Err(format!("{}: fp registers overrun the location table", self.name));
        }
        if alias.base_id + alias.count > self.classes.len() {
            return Err(format!("{}: fp register ids overrun the register count", self.name));
        }
        Ok(())
    }
}
