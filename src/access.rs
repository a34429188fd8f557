use crate::frame::FrameContext;
use crate::location::LocationDescriptor;
use crate::profile::{CachedField, RegisterClass, Synthetic};
use crate::registers::RegisterId;
use crate::space::AddressSpace;
use crate::{Error, Result};

/// Read or write an integer register of `frame`.
///
/// On a read the value is stored into `value`, on a write `value` is stored
/// into the register. Register numbers the profile does not know fail with
/// [Error::BadRegister] before anything is touched.
///
/// Writing the instruction pointer updates the frame's cached copy, and also
/// its saved slot if the profile keeps one, so that reading it back either way
/// gives the new value. The saved slot is written first and the cache second:
/// when the slot write fails the error is returned and the cached instruction
/// pointer keeps its old value.
pub fn access_register<A: AddressSpace>(
    frame: &mut FrameContext<'_, A>,
    id: RegisterId,
    value: &mut u64,
    write: bool,
) -> Result<()> {
    let descriptor = match frame.profile().classify(id) {
        RegisterClass::Invalid => {
            log::debug!("bad register number {}", id);
            return Err(Error::BadRegister(id));
        }
        RegisterClass::ReadOnly(synthetic) => {
            if write {
                return Err(Error::ReadOnlyRegister);
            }
            match synthetic {
                Synthetic::Cfa => LocationDescriptor::Cached(CachedField::Cfa),
                Synthetic::Zero => LocationDescriptor::Immediate(0),
            }
        }
        RegisterClass::Cached { field, slot } => {
            if write {
                if field == CachedField::Cfa {
                    return Err(Error::ReadOnlyRegister);
                }
                // The slot goes first: if it cannot be written the cache stays as it was.
                if let Some(slot) = slot {
                    LocationDescriptor::Slot(slot).put(frame, *value)?;
                }
            }
            LocationDescriptor::Cached(field)
        }
        RegisterClass::Slot(slot) => LocationDescriptor::Slot(slot),
    };

    if write {
        descriptor.put(frame, *value)
    } else {
        *value = descriptor.get(frame)?;
        Ok(())
    }
}

/// Read or write a floating point register of `frame`.
pub fn access_fp_register<A: AddressSpace>(
    frame: &mut FrameContext<'_, A>,
    id: RegisterId,
    value: &mut f64,
    write: bool,
) -> Result<()> {
    let profile = frame.profile();
    let descriptor = match profile.classify_fp(id) {
        Some(slot) => LocationDescriptor::Slot(slot),
        None => {
            log::debug!("bad fp register number {}", id);
            return Err(Error::BadRegister(id));
        }
    };
    let stride = profile.fp_alias().stride;

    if write {
        descriptor.put_fp(frame, stride, *value)
    } else {
        *value = descriptor.get_fp(frame, stride)?;
        Ok(())
    }
}
