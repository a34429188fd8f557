use crate::space::{AccessError, AddressSpace};
use crate::utils::AddressRange;
use std::collections::HashMap;

/// A captured copy of another program's stack memory and registers, e.g. the
/// state a sampling profiler saved for a thread.
///
/// Accesses must fall completely inside one captured region.
#[derive(Debug, Default, Clone)]
pub struct SnapshotAddressSpace {
    regions: Vec<(AddressRange, Vec<u8>)>,
    registers: HashMap<u16, u64>,
}

impl SnapshotAddressSpace {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a captured memory region starting at `start`. A region that overlaps
    /// an existing one replaces it.
    pub fn add_region(&mut self, start: u64, data: Vec<u8>) {
        let range = AddressRange {
            start,
            end: start.saturating_add(data.len() as u64),
        };
        self.regions.retain(|(r, _)| !r.overlaps(&range));
        self.regions.push((range, data));
    }

    #[inline]
    pub fn set_register(&mut self, register: u16, value: u64) {
        self.registers.insert(register, value);
    }

    #[inline]
    pub fn register(&self, register: u16) -> Option<u64> {
        self.registers.get(&register).copied()
    }

    fn find(&mut self, address: u64, len: usize) -> Result<&mut [u8], AccessError> {
        for (range, data) in &mut self.regions {
            if range.contains_span(address, len) {
                let offset = (address - range.start) as usize;
                return Ok(&mut data[offset..offset + len]);
            }
        }
        Err(AccessError::InvalidAddress(address))
    }
}

impl AddressSpace for SnapshotAddressSpace {
    fn read_memory(&mut self, address: u64, buf: &mut [u8]) -> Result<(), AccessError> {
        let src = self.find(address, buf.len())?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_memory(&mut self, address: u64, buf: &[u8]) -> Result<(), AccessError> {
        let dst = self.find(address, buf.len())?;
        dst.copy_from_slice(buf);
        Ok(())
    }

    fn read_register(&mut self, register: u16) -> Result<u64, AccessError> {
        self.register(register).ok_or(AccessError::InvalidRegister(register))
    }

    fn write_register(&mut self, register: u16, value: u64) -> Result<(), AccessError> {
        match self.registers.get_mut(&register) {
            Some(v) => {
                *v = value;
                Ok(())
            }
            None => Err(AccessError::InvalidRegister(register)),
        }
    }
}
