#![allow(unused)]

use crate::profile::{ArchitectureProfile, ByteOrder, CachedField, FpAlias, RegisterClass, Synthetic};
use crate::registers::RegisterId;

// ARM register numbers, following the DWARF numbering of the ARM EABI.
pub const UNW_ARM_R0: usize = 0;
pub const UNW_ARM_R1: usize = 1;
pub const UNW_ARM_R2: usize = 2;
pub const UNW_ARM_R3: usize = 3;
pub const UNW_ARM_R4: usize = 4;
pub const UNW_ARM_R5: usize = 5;
pub const UNW_ARM_R6: usize = 6;
pub const UNW_ARM_R7: usize = 7;
pub const UNW_ARM_R8: usize = 8;
pub const UNW_ARM_R9: usize = 9;
pub const UNW_ARM_R10: usize = 10;
pub const UNW_ARM_R11: usize = 11;
pub const UNW_ARM_R12: usize = 12;
pub const UNW_ARM_R13: usize = 13;
pub const UNW_ARM_R14: usize = 14;
pub const UNW_ARM_R15: usize = 15;
pub const UNW_ARM_SP: usize = 13;
pub const UNW_ARM_LR: usize = 14;
pub const UNW_ARM_PC: usize = 15;
// reserved block
pub const UNW_ARM_S0: usize = 64;
pub const UNW_ARM_S1: usize = 65;
pub const UNW_ARM_S2: usize = 66;
pub const UNW_ARM_S3: usize = 67;
pub const UNW_ARM_S4: usize = 68;
pub const UNW_ARM_S5: usize = 69;
pub const UNW_ARM_S6: usize = 70;
pub const UNW_ARM_S7: usize = 71;
pub const UNW_ARM_S8: usize = 72;
pub const UNW_ARM_S9: usize = 73;
pub const UNW_ARM_S10: usize = 74;
pub const UNW_ARM_S11: usize = 75;
pub const UNW_ARM_S12: usize = 76;
pub const UNW_ARM_S13: usize = 77;
pub const UNW_ARM_S14: usize = 78;
pub const UNW_ARM_S15: usize = 79;
pub const UNW_ARM_S16: usize = 80;
pub const UNW_ARM_S17: usize = 81;
pub const UNW_ARM_S18: usize = 82;
pub const UNW_ARM_S19: usize = 83;
pub const UNW_ARM_S20: usize = 84;
pub const UNW_ARM_S21: usize = 85;
pub const UNW_ARM_S22: usize = 86;
pub const UNW_ARM_S23: usize = 87;
pub const UNW_ARM_S24: usize = 88;
pub const UNW_ARM_S25: usize = 89;
pub const UNW_ARM_S26: usize = 90;
pub const UNW_ARM_S27: usize = 91;
pub const UNW_ARM_S28: usize = 92;
pub const UNW_ARM_S29: usize = 93;
pub const UNW_ARM_S30: usize = 94;
pub const UNW_ARM_S31: usize = 95;
// reserved block
pub const UNW_ARM_D0: usize = 256;
pub const UNW_ARM_D1: usize = 257;
pub const UNW_ARM_D2: usize = 258;
pub const UNW_ARM_D3: usize = 259;
pub const UNW_ARM_D4: usize = 260;
pub const UNW_ARM_D5: usize = 261;
pub const UNW_ARM_D6: usize = 262;
pub const UNW_ARM_D7: usize = 263;
pub const UNW_ARM_D8: usize = 264;
pub const UNW_ARM_D9: usize = 265;
pub const UNW_ARM_D10: usize = 266;
pub const UNW_ARM_D11: usize = 267;
pub const UNW_ARM_D12: usize = 268;
pub const UNW_ARM_D13: usize = 269;
pub const UNW_ARM_D14: usize = 270;
pub const UNW_ARM_D15: usize = 271;
pub const UNW_ARM_D16: usize = 272;
pub const UNW_ARM_D17: usize = 273;
pub const UNW_ARM_D18: usize = 274;
pub const UNW_ARM_D19: usize = 275;
pub const UNW_ARM_D20: usize = 276;
pub const UNW_ARM_D21: usize = 277;
pub const UNW_ARM_D22: usize = 278;
pub const UNW_ARM_D23: usize = 279;
pub const UNW_ARM_D24: usize = 280;
pub const UNW_ARM_D25: usize = 281;
pub const UNW_ARM_D26: usize = 282;
pub const UNW_ARM_D27: usize = 283;
pub const UNW_ARM_D28: usize = 284;
pub const UNW_ARM_D29: usize = 285;
pub const UNW_ARM_D30: usize = 286;
pub const UNW_ARM_D31: usize = 287;
pub const UNW_ARM_CFA: usize = 288;
pub const UNW_ARM_MAX_REG_NUM: usize = 288;

/// Length of the location table of an ARM frame.
pub const ARM_NUM_PRESERVED_REGS: usize = 128;

const NAMES: [&str; 16] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp", "lr", "pc",
];

const S_NAMES: [&str; 32] = [
    "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "s12", "s13", "s14", "s15",
    "s16", "s17", "s18", "s19", "s20", "s21", "s22", "s23",
    "s24", "s25", "s26", "s27", "s28", "s29", "s30", "s31",
];

const D_NAMES: [&str; 32] = [
    "d0", "d1", "d2", "d3", "d4", "d5", "d6", "d7",
    "d8", "d9", "d10", "d11", "d12", "d13", "d14", "d15",
    "d16", "d17", "d18", "d19", "d20", "d21", "d22", "d23",
    "d24", "d25", "d26", "d27", "d28", "d29", "d30", "d31",
];

/// Build the ARM profile.
///
/// Core registers live in the location table at their own number. The stack
/// pointer is never saved on its own: it is the CFA of the frame and can only
/// be read. The PC is cached in the frame and mirrored in slot 15.
///
/// D0..D15 overlay S0..S31 pairwise, so they resolve to two 4-byte slots each
/// starting at the slot of S0.
pub(crate) fn profile() -> ArchitectureProfile {
    let mut classes = vec![RegisterClass::Invalid; UNW_ARM_MAX_REG_NUM + 1];
    for r in UNW_ARM_R0..=UNW_ARM_R14 {
        classes[r] = RegisterClass::Slot(r - UNW_ARM_R0);
    }
    classes[UNW_ARM_SP] = RegisterClass::ReadOnly(Synthetic::Cfa);
    classes[UNW_ARM_PC] = RegisterClass::Cached {
        field: CachedField::Ip,
        slot: Some(UNW_ARM_PC - UNW_ARM_R0),
    };
    classes[UNW_ARM_CFA] = RegisterClass::ReadOnly(Synthetic::Cfa);

    let mut names = vec![None; classes.len()];
    for (r, name) in NAMES.iter().enumerate() {
        names[UNW_ARM_R0 + r] = Some(*name);
    }
    for n in 0..32 {
        names[UNW_ARM_S0 + n] = Some(S_NAMES[n]);
        names[UNW_ARM_D0 + n] = Some(D_NAMES[n]);
    }
    names[UNW_ARM_CFA] = Some("cfa");

    ArchitectureProfile {
        name: "arm",
        word_size: 4,
        byte_order: ByteOrder::Little,
        slot_count: ARM_NUM_PRESERVED_REGS,
        classes,
        names,
        fp_alias: FpAlias {
            base_id: UNW_ARM_D0,
            count: 16,
            base_slot: UNW_ARM_S0,
            stride: 2,
        },
        dwarf_map,
        legacy_dwarf_map: None,
    }
}

fn dwarf_map(raw: u64) -> Option<RegisterId> {
    let raw = usize::try_from(raw).ok()?;
    match raw {
        UNW_ARM_R0..=UNW_ARM_R15 | UNW_ARM_S0..=UNW_ARM_S31 | UNW_ARM_D0..=UNW_ARM_D31 => Some(raw),
        _ => None,
    }
}
