//! Data region dump.
//!
//! Everything after the last reachable instruction is shown as bytes with a
//! bit bar, which makes sprites recognizable at a glance.

use crate::analysis::SymbolTable;
use crate::rom::MemoryImage;

const SET: char = '\u{2588}';
const CLEAR: char = '-';

/// Render the bits of `byte`, most significant first, as `█` and `-`.
pub fn bit_bar(byte: u8) -> String {
    (0..8)
        .rev()
        .map(|bit| if byte >> bit & 1 == 1 { SET } else { CLEAR })
        .collect()
}

/// Addresses of the data region: after the last instruction, never visited.
pub fn data_addresses<'a>(
    image: &'a MemoryImage,
    symbols: &'a SymbolTable,
) -> impl Iterator<Item = u16> + 'a {
    let start = symbols.code_end().unwrap_or(image.load_address());
    (start..image.end()).filter(move |addr| !symbols.is_instruction(*addr))
}

/// Dump the data region, one line per byte.
pub fn data_dump(image: &MemoryImage, symbols: &SymbolTable) -> String {
    let mut output = String::new();
    for addr in data_addresses(image, symbols) {
        let Ok(byte) = image.byte(addr) else { break };
        output.push_str(&format!("0x{:x}:  {:08b} {} 0x{:02x}\n", addr, byte, bit_bar(byte), byte));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_bar() {
        assert_eq!(bit_bar(0x00), "--------");
        assert_eq!(bit_bar(0xFF), "████████");
        assert_eq!(bit_bar(0x81), "█------█");
        assert_eq!(bit_bar(0x3C), "--████--");
    }

    #[test]
    fn test_dump_after_code() {
        let image = MemoryImage::from_program(&[0x12, 0x00, 0xF0, 0x90], 0x200).unwrap();
        let symbols = SymbolTable {
            instruction_addresses: [0x200].into_iter().collect(),
            ..SymbolTable::default()
        };

        assert_eq!(
            data_dump(&image, &symbols),
            "0x202:  11110000 ████---- 0xf0\n0x203:  10010000 █--█---- 0x90\n"
        );
    }

    #[test]
    fn test_no_data() {
        let image = MemoryImage::from_program(&[0x12, 0x00], 0x200).unwrap();
        let symbols = SymbolTable {
            instruction_addresses: [0x200].into_iter().collect(),
            ..SymbolTable::default()
        };
        assert!(data_dump(&image, &symbols).is_empty());
    }
}
