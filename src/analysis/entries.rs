//! Subroutine entry point discovery.

use super::symbols::SymbolTable;
use crate::isa::{decode, Instruction};
use crate::rom::MemoryImage;
use std::collections::HashSet;

/// Collect the targets of every reachable call, in address order of the
/// calls, without duplicates.
///
/// Only addresses that exploration proved to be instructions are scanned,
/// so data that happens to look like `2NNN` is never mistaken for a call.
pub fn find_entry_points(image: &MemoryImage, symbols: &SymbolTable, entry: u16) -> Vec<u16> {
    let Some(last) = symbols.highest_instruction() else {
        return Vec::new();
    };
    if entry > last {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for &addr in symbols.instruction_addresses.range(entry..=last) {
        let Ok(word) = image.word(addr) else { continue };
        if let Instruction::Call { addr: target } = decode(word) {
            if seen.insert(target) {
                entries.push(target);
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode;

    fn make_image(instructions: &[Instruction]) -> MemoryImage {
        let bytes: Vec<u8> = instructions
            .iter()
            .flat_map(|i| encode(i).to_be_bytes())
            .collect();
        MemoryImage::from_program(&bytes, 0x200).unwrap()
    }

    #[test]
    fn test_first_seen_order_without_duplicates() {
        let image = make_image(&[
            Instruction::Call { addr: 0x300 },
            Instruction::Call { addr: 0x280 },
            Instruction::Call { addr: 0x300 },
            Instruction::Call { addr: 0x240 },
        ]);
        let symbols = SymbolTable {
            instruction_addresses: [0x200, 0x202, 0x204, 0x206].into_iter().collect(),
            ..SymbolTable::default()
        };

        assert_eq!(find_entry_points(&image, &symbols, 0x200), vec![0x300, 0x280, 0x240]);
    }

    #[test]
    fn test_calls_in_data_are_ignored() {
        let image = make_image(&[
            Instruction::Jump { addr: 0x204 },
            Instruction::Call { addr: 0x2FE }, // data that decodes as a call
            Instruction::Call { addr: 0x208 },
        ]);
        let symbols = SymbolTable {
            instruction_addresses: [0x200, 0x204].into_iter().collect(),
            ..SymbolTable::default()
        };

        assert_eq!(find_entry_points(&image, &symbols, 0x200), vec![0x208]);
    }

    #[test]
    fn test_empty_table() {
        let image = make_image(&[Instruction::Call { addr: 0x300 }]);
        assert!(find_entry_points(&image, &SymbolTable::new(), 0x200).is_empty());
    }
}
