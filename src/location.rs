use crate::frame::FrameContext;
use crate::profile::{ByteOrder, CachedField};
use crate::space::AddressSpace;
use crate::{Error, Result};
use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use smallvec::SmallVec;

/// Where the stepping engine found a saved register, one entry of the
/// location table of a frame.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum SavedLocation {
    /// Nothing is known about the register.
    #[default]
    Undefined,
    /// Saved in memory at the address.
    Memory(u64),
    /// Held in another register of the address space.
    Register(u16),
    /// Not saved anywhere, the value was computed by the unwind rules.
    Value(u64),
}

/// How to get or put the value of a register.
///
/// A descriptor never owns any frame state. It only carries a slot number or a
/// field tag that is resolved again on every access, so it can be copied
/// freely and applied to any frame of the same profile.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum LocationDescriptor {
    /// A constant, which can only be read.
    Immediate(u64),
    /// An entry of the frame's location table.
    Slot(usize),
    /// A field cached in the frame.
    Cached(CachedField),
    #[default]
    Unresolved,
}

impl LocationDescriptor {
    pub fn get<A: AddressSpace>(self, frame: &mut FrameContext<'_, A>) -> Result<u64> {
        match self {
            LocationDescriptor::Immediate(v) => Ok(v),
            LocationDescriptor::Slot(slot) => read_slot(frame, slot),
            LocationDescriptor::Cached(CachedField::Ip) => Ok(frame.ip),
            LocationDescriptor::Cached(CachedField::Cfa) => Ok(frame.cfa),
            LocationDescriptor::Unresolved => Err(Error::UnresolvedLocation),
        }
    }

    /// Store `value`, truncated to the word size of the frame's profile.
    pub fn put<A: AddressSpace>(self, frame: &mut FrameContext<'_, A>, value: u64) -> Result<()> {
        match self {
            LocationDescriptor::Immediate(_) => Err(Error::ReadOnlyRegister),
            LocationDescriptor::Slot(slot) => write_slot(frame, slot, value),
            LocationDescriptor::Cached(CachedField::Ip) => {
                frame.set_ip(value);
                Ok(())
            }
            LocationDescriptor::Cached(CachedField::Cfa) => Err(Error::ReadOnlyRegister),
            LocationDescriptor::Unresolved => Err(Error::UnresolvedLocation),
        }
    }

    /// Read a double spread over `stride` word slots, the first slot holding
    /// the least significant word.
    pub fn get_fp<A: AddressSpace>(self, frame: &mut FrameContext<'_, A>, stride: usize) -> Result<f64> {
        match self {
            LocationDescriptor::Immediate(v) => Ok(f64::from_bits(v)),
            LocationDescriptor::Slot(slot) => {
                let bits_per_word = frame.profile.word_size() * 8;
                let mut bits = 0u64;
                for n in 0..stride {
                    bits |= read_slot(frame, slot + n)? << (n * bits_per_word);
                }
                Ok(f64::from_bits(bits))
            }
            LocationDescriptor::Cached(_) | LocationDescriptor::Unresolved => Err(Error::UnresolvedLocation),
        }
    }

    /// Write a double spread over `stride` word slots.
    ///
    /// On failure no slot is left changed: every slot must be writable and
    /// readable before the first word goes out, and if the address space
    /// rejects a later word the earlier slots get their old words back.
    pub fn put_fp<A: AddressSpace>(self, frame: &mut FrameContext<'_, A>, stride: usize, value: f64) -> Result<()> {
        match self {
            LocationDescriptor::Immediate(_) => Err(Error::ReadOnlyRegister),
            LocationDescriptor::Slot(slot) => {
                for n in 0..stride {
                    writable(frame.location(slot + n))?;
                }
                let mut old = SmallVec::<[u64; 2]>::with_capacity(stride);
                for n in 0..stride {
                    old.push(read_slot(frame, slot + n)?);
                }
                let bits_per_word = frame.profile.word_size() * 8;
                let bits = value.to_bits();
                for n in 0..stride {
                    if let Err(err) = write_slot(frame, slot + n, bits >> (n * bits_per_word)) {
                        for (m, word) in old.iter().enumerate().take(n) {
                            if write_slot(frame, slot + m, *word).is_err() {
                                log::warn!("{}: cannot restore slot {}", frame.profile.name(), slot + m);
                            }
                        }
                        return Err(err);
                    }
                }
                Ok(())
            }
            LocationDescriptor::Cached(_) | LocationDescriptor::Unresolved => Err(Error::UnresolvedLocation),
        }
    }
}

fn writable(location: Option<SavedLocation>) -> Result<()> {
    match location {
        Some(SavedLocation::Memory(_)) | Some(SavedLocation::Register(_)) => Ok(()),
        Some(SavedLocation::Value(_)) => Err(Error::ReadOnlyRegister),
        Some(SavedLocation::Undefined) | None => Err(Error::UnresolvedLocation),
    }
}

fn read_slot<A: AddressSpace>(frame: &mut FrameContext<'_, A>, slot: usize) -> Result<u64> {
    let profile = frame.profile;
    let mask = profile.word_mask();
    let value = match frame.location(slot) {
        Some(SavedLocation::Memory(address)) => {
            let mut buf = [0u8; 8];
            let buf = &mut buf[..profile.word_size()];
            frame.space.read_memory(address, buf)?;
            decode_word(profile.byte_order(), buf)
        }
        Some(SavedLocation::Register(r)) => frame.space.read_register(r)? & mask,
        Some(SavedLocation::Value(v)) => v & mask,
        Some(SavedLocation::Undefined) | None => return Err(Error::UnresolvedLocation),
    };
    log::trace!("{}: read slot {} = {:#x}", profile.name(), slot, value);
    Ok(value)
}

fn write_slot<A: AddressSpace>(frame: &mut FrameContext<'_, A>, slot: usize, value: u64) -> Result<()> {
    let profile = frame.profile;
    let value = value & profile.word_mask();
    match frame.location(slot) {
        Some(SavedLocation::Memory(address)) => {
            let mut buf = [0u8; 8];
            let buf = &mut buf[..profile.word_size()];
            encode_word(profile.byte_order(), value, buf);
            frame.space.write_memory(address, buf)?;
        }
        Some(SavedLocation::Register(r)) => frame.space.write_register(r, value)?,
        Some(SavedLocation::Value(_)) => return Err(Error::ReadOnlyRegister),
        Some(SavedLocation::Undefined) | None => return Err(Error::UnresolvedLocation),
    }
    log::trace!("{}: write slot {} = {:#x}", profile.name(), slot, value);
    Ok(())
}

/// Convert a word in target byte order into a host value. This is the only
/// place memory contents are decoded.
#[inline]
fn decode_word(order: ByteOrder, buf: &[u8]) -> u64 {
    match order {
        ByteOrder::Little => LittleEndian::read_uint(buf, buf.len()),
        ByteOrder::Big => BigEndian::read_uint(buf, buf.len()),
    }
}

#[inline]
fn encode_word(order: ByteOrder, value: u64, buf: &mut [u8]) {
    match order {
        ByteOrder::Little => LittleEndian::write_uint(buf, value, buf.len()),
        ByteOrder::Big => BigEndian::write_uint(buf, value, buf.len()),
    }
}
