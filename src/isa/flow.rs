//! Control-flow classification.
//!
//! CHIP-8 has no native if/else. A conditional skip followed by an
//! unconditional jump encodes it, so a skip is classified together with the
//! word that follows it.

use super::decode::{decode, Instruction, INSTRUCTION_WIDTH};

/// Control-flow role of the instruction at some address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Skip fused with a forward jump: an if/else.
    ///
    /// `body` is the jump target, entered when the condition of the
    /// condition-style mnemonic holds. `else_` is the word after the jump.
    SkipJumpForward { body: u16, else_: u16 },
    /// Skip fused with a jump to an address at or before the skip.
    SkipJumpBack { target: u16 },
    /// Skip whose next word is not a jump: conditionally runs one word.
    SkipOpcode,
    /// Jump to a later address.
    JumpForward { target: u16 },
    /// Jump to an address at or before the jump itself.
    JumpBack { target: u16 },
    /// Subroutine call.
    Call { target: u16 },
    /// Subroutine return.
    Return,
    /// `BNNN`: target depends on V0.
    DynamicJump { base: u16 },
    /// Anything else; falls through.
    Plain,
}

/// Classify the instruction `word` located at `pc`.
///
/// `next` is the word following it, or `None` at the end of the image.
/// It is only consulted when `word` is a skip.
pub fn classify(word: u16, next: Option<u16>, pc: u16) -> Flow {
    match decode(word) {
        Instruction::Skip(_) => match next.map(decode) {
            Some(Instruction::Jump { addr }) if addr <= pc => Flow::SkipJumpBack { target: addr },
            Some(Instruction::Jump { addr }) => Flow::SkipJumpForward {
                body: addr,
                else_: pc.wrapping_add(2 * INSTRUCTION_WIDTH),
            },
            _ => Flow::SkipOpcode,
        },
        Instruction::Jump { addr } if addr <= pc => Flow::JumpBack { target: addr },
        Instruction::Jump { addr } => Flow::JumpForward { target: addr },
        Instruction::Call { addr } => Flow::Call { target: addr },
        Instruction::Return => Flow::Return,
        Instruction::JumpOffset { addr } => Flow::DynamicJump { base: addr },
        _ => Flow::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_then_forward_jump() {
        let flow = classify(0x4005, Some(0x1208), 0x200);
        assert_eq!(flow, Flow::SkipJumpForward { body: 0x208, else_: 0x204 });
    }

    #[test]
    fn test_skip_then_backward_jump() {
        assert_eq!(
            classify(0x3005, Some(0x1200), 0x204),
            Flow::SkipJumpBack { target: 0x200 }
        );
        // A jump to the skip itself counts as backward
        assert_eq!(
            classify(0x3005, Some(0x1204), 0x204),
            Flow::SkipJumpBack { target: 0x204 }
        );
    }

    #[test]
    fn test_direction_is_relative_to_the_skip() {
        // Target equals the jump's own address (skip + 2): still forward
        // relative to the skip.
        assert_eq!(
            classify(0x3005, Some(0x1206), 0x204),
            Flow::SkipJumpForward { body: 0x206, else_: 0x208 }
        );
    }

    #[test]
    fn test_skip_then_non_jump() {
        assert_eq!(classify(0xE19E, Some(0x6001), 0x200), Flow::SkipOpcode);
        assert_eq!(classify(0xE19E, None, 0x200), Flow::SkipOpcode);
    }

    #[test]
    fn test_plain_jumps() {
        assert_eq!(classify(0x1200, None, 0x200), Flow::JumpBack { target: 0x200 });
        assert_eq!(classify(0x1300, None, 0x200), Flow::JumpForward { target: 0x300 });
    }

    #[test]
    fn test_call_return_dynamic() {
        assert_eq!(classify(0x2300, None, 0x200), Flow::Call { target: 0x300 });
        assert_eq!(classify(0x00EE, None, 0x200), Flow::Return);
        assert_eq!(classify(0xB300, None, 0x200), Flow::DynamicJump { base: 0x300 });
        assert_eq!(classify(0x6001, Some(0x1200), 0x200), Flow::Plain);
    }
}
