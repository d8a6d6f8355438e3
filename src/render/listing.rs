//! Flat pseudo-assembly listing.
//!
//! One line per word, no control-flow analysis: data is listed as if it
//! were code.

use crate::isa::{decode, mnemonic, MnemonicStyle};
use crate::rom::MemoryImage;

/// Disassemble a single word to skip-style text.
pub fn disassemble_word(word: u16) -> String {
    mnemonic(&decode(word), MnemonicStyle::Skip)
}

/// Format one listing line for the word at `addr`.
pub fn format_line(addr: u16, hi: u8, lo: u8) -> String {
    format!(
        "0x{:x}:  {:02x} {:02x}    {}",
        addr,
        hi,
        lo,
        disassemble_word(u16::from_be_bytes([hi, lo]))
    )
}

/// Disassemble the loaded program word by word.
pub fn pseudo_assembly(image: &MemoryImage) -> String {
    let mut output = String::new();
    let mut addr = image.load_address();

    for chunk in image.program_bytes().chunks(2) {
        match *chunk {
            [hi, lo] => output.push_str(&format_line(addr, hi, lo)),
            [odd] => output.push_str(&format!("0x{:x}:  {:02x}       db 0x{:02x}", addr, odd, odd)),
            _ => unreachable!("chunks(2) yields one or two bytes"),
        }
        output.push('\n');
        addr += 2;
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_format() {
        let image = MemoryImage::from_program(&[0x00, 0xE0, 0x30, 0x05, 0x12, 0x00], 0x200).unwrap();
        assert_eq!(
            pseudo_assembly(&image),
            "0x200:  00 e0    clear()\n\
             0x202:  30 05    skip if V0 == 0x5:\n\
             0x204:  12 00    goto label_200\n"
        );
    }

    #[test]
    fn test_dynamic_jump_is_listed() {
        // The flat listing does no analysis, so BNNN is just text here
        assert_eq!(disassemble_word(0xB2F0), "goto 0x2f0 + V0");
    }

    #[test]
    fn test_trailing_odd_byte() {
        let image = MemoryImage::from_program(&[0x00, 0xEE, 0x7F], 0x200).unwrap();
        let listing = pseudo_assembly(&image);
        assert_eq!(listing.lines().last(), Some("0x202:  7f       db 0x7f"));
    }
}
