#![allow(unused)]

use crate::profile::{ArchitectureProfile, ByteOrder, CachedField, FpAlias, RegisterClass, Synthetic};
use crate::registers::RegisterId;

// LoongArch64 register numbers. R0..R31 and F0..F31 match the DWARF numbering.
pub const UNW_LOONGARCH64_R0: usize = 0;
pub const UNW_LOONGARCH64_R1: usize = 1;
pub const UNW_LOONGARCH64_R2: usize = 2;
pub const UNW_LOONGARCH64_R3: usize = 3;
pub const UNW_LOONGARCH64_R4: usize = 4;
pub const UNW_LOONGARCH64_R5: usize = 5;
pub const UNW_LOONGARCH64_R6: usize = 6;
pub const UNW_LOONGARCH64_R7: usize = 7;
pub const UNW_LOONGARCH64_R8: usize = 8;
pub const UNW_LOONGARCH64_R9: usize = 9;
pub const UNW_LOONGARCH64_R10: usize = 10;
pub const UNW_LOONGARCH64_R11: usize = 11;
pub const UNW_LOONGARCH64_R12: usize = 12;
pub const UNW_LOONGARCH64_R13: usize = 13;
pub const UNW_LOONGARCH64_R14: usize = 14;
pub const UNW_LOONGARCH64_R15: usize = 15;
pub const UNW_LOONGARCH64_R16: usize = 16;
pub const UNW_LOONGARCH64_R17: usize = 17;
pub const UNW_LOONGARCH64_R18: usize = 18;
pub const UNW_LOONGARCH64_R19: usize = 19;
pub const UNW_LOONGARCH64_R20: usize = 20;
pub const UNW_LOONGARCH64_R21: usize = 21;
pub const UNW_LOONGARCH64_R22: usize = 22;
pub const UNW_LOONGARCH64_R23: usize = 23;
pub const UNW_LOONGARCH64_R24: usize = 24;
pub const UNW_LOONGARCH64_R25: usize = 25;
pub const UNW_LOONGARCH64_R26: usize = 26;
pub const UNW_LOONGARCH64_R27: usize = 27;
pub const UNW_LOONGARCH64_R28: usize = 28;
pub const UNW_LOONGARCH64_R29: usize = 29;
pub const UNW_LOONGARCH64_R30: usize = 30;
pub const UNW_LOONGARCH64_R31: usize = 31;
pub const UNW_LOONGARCH64_F0: usize = 32;
pub const UNW_LOONGARCH64_F1: usize = 33;
pub const UNW_LOONGARCH64_F2: usize = 34;
pub const UNW_LOONGARCH64_F3: usize = 35;
pub const UNW_LOONGARCH64_F4: usize = 36;
pub const UNW_LOONGARCH64_F5: usize = 37;
pub const UNW_LOONGARCH64_F6: usize = 38;
pub const UNW_LOONGARCH64_F7: usize = 39;
pub const UNW_LOONGARCH64_F8: usize = 40;
pub const UNW_LOONGARCH64_F9: usize = 41;
pub const UNW_LOONGARCH64_F10: usize = 42;
pub const UNW_LOONGARCH64_F11: usize = 43;
pub const UNW_LOONGARCH64_F12: usize = 44;
pub const UNW_LOONGARCH64_F13: usize = 45;
pub const UNW_LOONGARCH64_F14: usize = 46;
pub const UNW_LOONGARCH64_F15: usize = 47;
pub const UNW_LOONGARCH64_F16: usize = 48;
pub const UNW_LOONGARCH64_F17: usize = 49;
pub const UNW_LOONGARCH64_F18: usize = 50;
pub const UNW_LOONGARCH64_F19: usize = 51;
pub const UNW_LOONGARCH64_F20: usize = 52;
pub const UNW_LOONGARCH64_F21: usize = 53;
pub const UNW_LOONGARCH64_F22: usize = 54;
pub const UNW_LOONGARCH64_F23: usize = 55;
pub const UNW_LOONGARCH64_F24: usize = 56;
pub const UNW_LOONGARCH64_F25: usize = 57;
pub const UNW_LOONGARCH64_F26: usize = 58;
pub const UNW_LOONGARCH64_F27: usize = 59;
pub const UNW_LOONGARCH64_F28: usize = 60;
pub const UNW_LOONGARCH64_F29: usize = 61;
pub const UNW_LOONGARCH64_F30: usize = 62;
pub const UNW_LOONGARCH64_F31: usize = 63;
pub const UNW_LOONGARCH64_PC: usize = 64;
pub const UNW_LOONGARCH64_CFA: usize = 65;
pub const UNW_LOONGARCH64_RA: usize = 1;
pub const UNW_LOONGARCH64_SP: usize = 3;
pub const UNW_LOONGARCH64_FP: usize = 22;
pub const UNW_LOONGARCH64_MAX_REG_NUM: usize = 65;

/// Length of the location table of a LoongArch64 frame:
/// - 32 integer registers
/// - 32 floating point registers
/// - 8 condition flag registers
/// - 2 fake registers (argument pointer and frame pointer)
pub const LOONGARCH64_NUM_PRESERVED_REGS: usize = 74;

const NAMES: [&str; 32] = [
    "zero", "ra", "tp", "sp", "a0", "a1", "a2", "a3",
    "a4", "a5", "a6", "a7", "t0", "t1", "t2", "t3",
    "t4", "t5", "t6", "t7", "t8", "r21", "fp", "s0",
    "s1", "s2", "s3", "s4", "s5", "s6", "s7", "s8",
];

const F_NAMES: [&str; 32] = [
    "f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7",
    "f8", "f9", "f10", "f11", "f12", "f13", "f14", "f15",
    "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23",
    "f24", "f25", "f26", "f27", "f28", "f29", "f30", "f31",
];

/// Build the LoongArch64 profile.
///
/// R0 is hardwired to zero and R3 is the stack pointer, which reads as the
/// CFA. The PC has no slot of its own: it is only kept in the frame cache.
pub(crate) fn profile() -> ArchitectureProfile {
    let mut classes = vec![RegisterClass::Invalid; UNW_LOONGARCH64_MAX_REG_NUM + 1];
    for r in UNW_LOONGARCH64_R0..=UNW_LOONGARCH64_R31 {
        classes[r] = RegisterClass::Slot(r);
    }
    classes[UNW_LOONGARCH64_R0] = RegisterClass::ReadOnly(Synthetic::Zero);
    classes[UNW_LOONGARCH64_SP] = RegisterClass::ReadOnly(Synthetic::Cfa);
    classes[UNW_LOONGARCH64_PC] = RegisterClass::Cached {
        field: CachedField::Ip,
        slot: None,
    };
    classes[UNW_LOONGARCH64_CFA] = RegisterClass::ReadOnly(Synthetic::Cfa);

    let mut names: Vec<_> = NAMES.iter().chain(F_NAMES.iter()).map(|name| Some(*name)).collect();
    names.push(Some("pc"));
    names.push(Some("cfa"));

    ArchitectureProfile {
        name: "loongarch64",
        word_size: 8,
        byte_order: ByteOrder::Little,
        slot_count: LOONGARCH64_NUM_PRESERVED_REGS,
        classes,
        names,
        fp_alias: FpAlias {
            base_id: UNW_LOONGARCH64_F0,
            count: 32,
            base_slot: 32,
            stride: 1,
        },
        dwarf_map,
        legacy_dwarf_map: Some(legacy_dwarf_map),
    }
}

fn dwarf_map(raw: u64) -> Option<RegisterId> {
    let raw = usize::try_from(raw).ok()?;
    match raw {
        UNW_LOONGARCH64_R0..=UNW_LOONGARCH64_F31 => Some(raw),
        _ => None,
    }
}

/// Older LoongArch64 unwinders only knew the integer registers and sent every
/// other number, the FP registers included, to register 0.
fn legacy_dwarf_map(raw: u64) -> RegisterId {
    if raw <= UNW_LOONGARCH64_R31 as u64 {
        raw as RegisterId
    } else {
        UNW_LOONGARCH64_R0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UnknownRegisterPolicy;

    #[test]
    fn test_profile() {
        let p = profile();
        assert!(p.validate().is_ok());
        assert_eq!(p.register_count(), 66);
        assert_eq!(p.classify(UNW_LOONGARCH64_R0), RegisterClass::ReadOnly(Synthetic::Zero));
        assert_eq!(p.classify(UNW_LOONGARCH64_RA), RegisterClass::Slot(1));
        assert_eq!(p.classify(UNW_LOONGARCH64_SP), RegisterClass::ReadOnly(Synthetic::Cfa));
        assert_eq!(p.classify(UNW_LOONGARCH64_R31), RegisterClass::Slot(31));
        assert_eq!(
            p.classify(UNW_LOONGARCH64_PC),
            RegisterClass::Cached {
                field: CachedField::Ip,
                slot: None
            }
        );
        assert_eq!(p.classify(UNW_LOONGARCH64_F0), RegisterClass::Invalid);
        assert_eq!(p.classify(66), RegisterClass::Invalid);
    }

    #[test]
    fn test_fp_alias() {
        let p = profile();
        for n in 0..32 {
            assert_eq!(p.classify_fp(UNW_LOONGARCH64_F0 + n), Some(32 + n));
        }
        assert_eq!(p.classify_fp(UNW_LOONGARCH64_R31), None);
        assert_eq!(p.classify_fp(UNW_LOONGARCH64_PC), None);
    }

    #[test]
    fn test_names() {
        let p = profile();
        assert_eq!(p.register_name(UNW_LOONGARCH64_SP), Some("sp"));
        assert_eq!(p.register_name(UNW_LOONGARCH64_FP), Some("fp"));
        assert_eq!(p.register_name(UNW_LOONGARCH64_F31), Some("f31"));
        assert_eq!(p.register_name(UNW_LOONGARCH64_PC), Some("pc"));
        assert_eq!(p.register_name(UNW_LOONGARCH64_CFA), Some("cfa"));
        assert_eq!(p.register_name(66), None);
    }

    #[test]
    fn test_dwarf_map() {
        let p = profile();
        assert_eq!(p.dwarf_to_register(1, UnknownRegisterPolicy::Reject), Some(UNW_LOONGARCH64_RA));
        assert_eq!(p.dwarf_to_register(40, UnknownRegisterPolicy::Reject), Some(UNW_LOONGARCH64_F8));
        assert_eq!(p.dwarf_to_register(64, UnknownRegisterPolicy::Reject), None);
        assert_eq!(p.dwarf_to_register(64, UnknownRegisterPolicy::MapToZero), Some(UNW_LOONGARCH64_R0));
        assert_eq!(p.dwarf_to_register(1, UnknownRegisterPolicy::MapToZero), Some(UNW_LOONGARCH64_RA));
        assert_eq!(p.dwarf_to_register(31, UnknownRegisterPolicy::MapToZero), Some(UNW_LOONGARCH64_R31));
        assert_eq!(p.dwarf_to_register(32, UnknownRegisterPolicy::MapToZero), Some(UNW_LOONGARCH64_R0));
        assert_eq!(p.dwarf_to_register(40, UnknownRegisterPolicy::MapToZero), Some(UNW_LOONGARCH64_R0));
        assert_eq!(p.dwarf_to_register(1000, UnknownRegisterPolicy::MapToZero), Some(0));
    }
}
