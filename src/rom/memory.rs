//! Memory image of a loaded CHIP-8 program.
//!
//! Addresses below the load address are the interpreter's reserved area and
//! always read as zero. The program bytes follow verbatim. The image never
//! changes after it is built.

use crate::config::ADDRESS_SPACE;
use crate::isa::INSTRUCTION_WIDTH;
use thiserror::Error;

/// Immutable, zero-indexed byte image.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryImage {
    bytes: Vec<u8>,
    load_address: u16,
}

impl MemoryImage {
    /// Place `program` at `load_address`.
    pub fn from_program(program: &[u8], load_address: u16) -> Result<Self, MemoryError> {
        let size = usize::from(load_address) + program.len();
        if size > ADDRESS_SPACE {
            return Err(MemoryError::ImageTooLarge {
                size: program.len(),
                available: ADDRESS_SPACE.saturating_sub(usize::from(load_address)),
            });
        }

        let mut bytes = vec![0u8; usize::from(load_address)];
        bytes.extend_from_slice(program);
        Ok(Self { bytes, load_address })
    }

    /// Total size, reserved area included.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no program bytes were loaded.
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == usize::from(self.load_address)
    }

    /// Address of the first program byte.
    #[inline]
    pub fn load_address(&self) -> u16 {
        self.load_address
    }

    /// One past the last valid address.
    #[inline]
    pub fn end(&self) -> u16 {
        // from_program caps the size at ADDRESS_SPACE, which fits in u16
        self.bytes.len() as u16
    }

    /// The loaded program bytes, without the reserved area.
    pub fn program_bytes(&self) -> &[u8] {
        &self.bytes[usize::from(self.load_address)..]
    }

    /// Read a byte.
    pub fn byte(&self, addr: u16) -> Result<u8, MemoryError> {
        self.bytes
            .get(usize::from(addr))
            .copied()
            .ok_or(MemoryError::OutOfBounds { addr, len: self.bytes.len() })
    }

    /// Read the big-endian instruction word starting at `addr`.
    pub fn word(&self, addr: u16) -> Result<u16, MemoryError> {
        let hi = self.byte(addr)?;
        let lo = self.byte(addr.wrapping_add(1))
            .map_err(|_| MemoryError::OutOfBounds { addr, len: self.bytes.len() })?;
        Ok(u16::from_be_bytes([hi, lo]))
    }

    /// Read the word following the one at `addr`, if the image has one.
    pub fn next_word(&self, addr: u16) -> Option<u16> {
        self.word(addr.checked_add(INSTRUCTION_WIDTH)?).ok()
    }

    /// Does a full instruction word start at `addr`?
    pub fn contains_word(&self, addr: u16) -> bool {
        usize::from(addr) + usize::from(INSTRUCTION_WIDTH) <= self.bytes.len()
    }
}

impl std::fmt::Debug for MemoryImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryImage")
            .field("load_address", &format_args!("0x{:x}", self.load_address))
            .field("program_bytes", &self.program_bytes().len())
            .finish()
    }
}

/// Errors that can occur during memory access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("address 0x{addr:x} is outside the image (size 0x{len:x})")]
    OutOfBounds { addr: u16, len: usize },

    #[error("program size {size} exceeds available space {available}")]
    ImageTooLarge { size: usize, available: usize },
}
