//! Symbol table produced by exploration.

use crate::isa::INSTRUCTION_WIDTH;
use crate::rom::MemoryImage;
use serde::{Serialize, Deserialize};
use std::collections::BTreeSet;

/// Classification of a single image address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressClass {
    /// Below the load address.
    Reserved,
    /// Part of an instruction that exploration proved reachable.
    Code,
    /// Anything else: sprites, tables, padding.
    Data,
}

/// Instruction and label addresses discovered by exploration.
///
/// Both sets hold even addresses inside the image. The table is read-only
/// once exploration finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    /// Start address of every reachable instruction.
    pub instruction_addresses: BTreeSet<u16>,
    /// Target of every backward jump.
    pub label_addresses: BTreeSet<u16>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_instruction(&self, addr: u16) -> bool {
        self.instruction_addresses.contains(&addr)
    }

    #[inline]
    pub fn is_label(&self, addr: u16) -> bool {
        self.label_addresses.contains(&addr)
    }

    /// Highest reachable instruction address.
    pub fn highest_instruction(&self) -> Option<u16> {
        self.instruction_addresses.last().copied()
    }

    /// First address after the last reachable instruction.
    pub fn code_end(&self) -> Option<u16> {
        self.highest_instruction().map(|addr| addr + INSTRUCTION_WIDTH)
    }

    /// Classify `addr`, or `None` when it lies outside the image.
    pub fn classify(&self, image: &MemoryImage, addr: u16) -> Option<AddressClass> {
        if usize::from(addr) >= image.len() {
            return None;
        }
        if addr < image.load_address() {
            return Some(AddressClass::Reserved);
        }
        let covered = self.is_instruction(addr)
            || (addr > 0 && self.is_instruction(addr - 1));
        Some(if covered { AddressClass::Code } else { AddressClass::Data })
    }

    /// Count code and data bytes in the loaded program.
    pub fn partition_counts(&self, image: &MemoryImage) -> (usize, usize) {
        (image.load_address()..image.end())
            .filter_map(|addr| self.classify(image, addr))
            .fold((0, 0), |(code, data), class| match class {
                AddressClass::Code => (code + 1, data),
                AddressClass::Data => (code, data + 1),
                AddressClass::Reserved => (code, data),
            })
    }
}
