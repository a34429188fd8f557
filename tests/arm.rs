use rand::Rng;
use unwind_regs::registers::arm::*;
use unwind_regs::{
    access_fp_register, access_register, AccessError, Architecture, Error, FrameContext, LocationDescriptor,
    SavedLocation, SnapshotAddressSpace,
};

const STACK: u64 = 0x10_0000;
const CFA: u64 = 0x10_1000;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A frame whose core registers and VFP registers were all pushed on the stack.
/// Slot `n` is saved at `STACK + 4 * n`.
fn frame() -> FrameContext<'static, SnapshotAddressSpace> {
    let profile = Architecture::Arm.profile();
    let mut space = SnapshotAddressSpace::new();
    space.add_region(STACK, vec![0; 4 * ARM_NUM_PRESERVED_REGS]);
    let mut frame = FrameContext::new(profile, space);
    for slot in (UNW_ARM_R0..=UNW_ARM_R15).chain(UNW_ARM_S0..=UNW_ARM_S31) {
        frame
            .set_location(slot, SavedLocation::Memory(STACK + 4 * slot as u64))
            .unwrap();
    }
    frame.set_cfa(CFA);
    frame.set_ip(0x8000);
    frame
}

fn read(frame: &mut FrameContext<'_, SnapshotAddressSpace>, id: usize) -> Result<u64, Error> {
    let mut value = 0;
    access_register(frame, id, &mut value, false)?;
    Ok(value)
}

fn write(frame: &mut FrameContext<'_, SnapshotAddressSpace>, id: usize, value: u64) -> Result<(), Error> {
    let mut value = value;
    access_register(frame, id, &mut value, true)
}

#[test]
fn test_pc_write_then_read() {
    init_logger();
    let mut frame = frame();
    write(&mut frame, UNW_ARM_R15, 0x1000).unwrap();
    assert_eq!(read(&mut frame, UNW_ARM_R15), Ok(0x1000));
    assert_eq!(frame.ip(), 0x1000);
    assert_eq!(LocationDescriptor::Slot(15).get(&mut frame), Ok(0x1000));
}

#[test]
fn test_sp_is_read_only() {
    init_logger();
    let mut frame = frame();
    assert_eq!(write(&mut frame, UNW_ARM_R13, 0xdead), Err(Error::ReadOnlyRegister));
    assert_eq!(write(&mut frame, UNW_ARM_CFA, 0xdead), Err(Error::ReadOnlyRegister));
    assert_eq!(read(&mut frame, UNW_ARM_R13), Ok(CFA));
    assert_eq!(read(&mut frame, UNW_ARM_CFA), Ok(CFA));
    assert_eq!(frame.cfa(), CFA);
}

#[test]
fn test_bad_register() {
    init_logger();
    let mut frame = frame();
    assert_eq!(read(&mut frame, 99), Err(Error::BadRegister(99)));
    assert_eq!(read(&mut frame, UNW_ARM_S0), Err(Error::BadRegister(UNW_ARM_S0)));
    assert_eq!(read(&mut frame, UNW_ARM_MAX_REG_NUM + 1), Err(Error::BadRegister(UNW_ARM_MAX_REG_NUM + 1)));
    assert_eq!(write(&mut frame, 1000, 1), Err(Error::BadRegister(1000)));
    for id in UNW_ARM_R0..=UNW_ARM_R15 {
        if id != UNW_ARM_R13 && id != UNW_ARM_R15 {
            assert_eq!(read(&mut frame, id), Ok(0));
        }
    }
}

#[test]
fn test_little_endian_memory() {
    let mut frame = frame();
    write(&mut frame, UNW_ARM_R4, 0x11223344).unwrap();
    let mut raw = [0u8; 4];
    unwind_regs::AddressSpace::read_memory(frame.space_mut(), STACK + 16, &mut raw).unwrap();
    assert_eq!(raw, [0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn test_random_round_trip() {
    init_logger();
    let mut rng = rand::thread_rng();
    let mut frame = frame();
    let writable: Vec<usize> = (UNW_ARM_R0..=UNW_ARM_R15).filter(|id| *id != UNW_ARM_R13).collect();
    let mut expected = vec![0u64; 16];
    expected[UNW_ARM_R15] = 0x8000;
    for _ in 0..256 {
        let id = writable[rng.gen_range(0..writable.len())];
        let value = rng.gen::<u32>() as u64;
        write(&mut frame, id, value).unwrap();
        expected[id] = value;
        for other in &writable {
            assert_eq!(read(&mut frame, *other), Ok(expected[*other]));
        }
        assert_eq!(read(&mut frame, UNW_ARM_R13), Ok(CFA));
    }
}

#[test]
fn test_values_truncate_to_32_bits() {
    let mut frame = frame();
    write(&mut frame, UNW_ARM_R0, 0xffff_ffff_0000_0001).unwrap();
    assert_eq!(read(&mut frame, UNW_ARM_R0), Ok(1));
}

#[test]
fn test_d_registers_alias_s_pairs() {
    init_logger();
    let mut frame = frame();
    for n in 0..16 {
        let mut value = n as f64 * 1.25 - 3.0;
        access_fp_register(&mut frame, UNW_ARM_D0 + n, &mut value, true).unwrap();
    }
    for n in 0..16 {
        let expected = n as f64 * 1.25 - 3.0;
        assert_eq!(frame.fp_register(UNW_ARM_D0 + n), Ok(expected));
        let low = LocationDescriptor::Slot(UNW_ARM_S0 + 2 * n).get(&mut frame).unwrap();
        let high = LocationDescriptor::Slot(UNW_ARM_S0 + 2 * n + 1).get(&mut frame).unwrap();
        assert_eq!(low | high << 32, expected.to_bits());
    }
    // Integer registers are untouched by FP traffic.
    assert_eq!(read(&mut frame, UNW_ARM_R0), Ok(0));
}

#[test]
fn test_bad_d_register() {
    let mut frame = frame();
    let mut value = 1.0;
    for id in [UNW_ARM_D16, UNW_ARM_D31, UNW_ARM_S0, UNW_ARM_R0, UNW_ARM_CFA, 5000] {
        assert_eq!(access_fp_register(&mut frame, id, &mut value, true), Err(Error::BadRegister(id)));
    }
}

#[test]
fn test_helpers() {
    let mut frame = frame();
    frame.set_register(UNW_ARM_LR, 0x2468).unwrap();
    assert_eq!(frame.register(UNW_ARM_LR), Ok(0x2468));
    frame.set_fp_register(UNW_ARM_D8, 0.5).unwrap();
    assert_eq!(frame.fp_register(UNW_ARM_D8), Ok(0.5));
}

#[test]
fn test_d_register_write_leaves_s_pair_on_failure() {
    init_logger();
    let mut space = SnapshotAddressSpace::new();
    space.add_region(0x1000, vec![0; 16]);
    let mut frame = FrameContext::new(Architecture::Arm.profile(), space);
    frame.set_location(UNW_ARM_S0, SavedLocation::Memory(0x1000)).unwrap();
    frame.set_location(UNW_ARM_S1, SavedLocation::Memory(0x9000)).unwrap();

    assert_eq!(
        frame.set_fp_register(UNW_ARM_D0, 1.1),
        Err(Error::Access(AccessError::InvalidAddress(0x9000)))
    );
    assert_eq!(LocationDescriptor::Slot(UNW_ARM_S0).get(&mut frame), Ok(0));
}
