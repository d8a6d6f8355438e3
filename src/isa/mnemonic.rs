//! Mnemonic formatting for decoded instructions.
//!
//! Two renderings exist for the conditional skips. The flat listing shows
//! what the hardware does ("skip if ..."), while structured pseudocode shows
//! the condition under which the *next* instruction runs ("if ...").

use super::decode::{AluOp, Instruction, SkipCondition};

/// How conditional skips are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicStyle {
    /// `skip if V0 == 0x5:`
    Skip,
    /// `if V0 != 0x5:` (the condition that runs the next instruction)
    Condition,
}

/// Format a decoded instruction as a pseudocode line.
pub fn mnemonic(instr: &Instruction, style: MnemonicStyle) -> String {
    match *instr {
        Instruction::Clear => "clear()".to_string(),
        Instruction::Return => "return".to_string(),
        Instruction::Sys { addr } => format!("sys(0x{:x})", addr),
        Instruction::Jump { addr } => format!("goto label_{:x}", addr),
        Instruction::Call { addr } => format!("fun_{:x}()", addr),
        Instruction::Skip(cond) => format_skip(cond, style),
        Instruction::JumpOffset { addr } => format!("goto 0x{:x} + V0", addr),

        Instruction::LoadImm { x, nn } => format!("V{:x} = 0x{:x}", x, nn),
        Instruction::AddImm { x, nn } => format!("V{:x} += 0x{:x}", x, nn),
        Instruction::Alu { op, x, y } => format_alu(op, x, y),
        Instruction::Random { x, nn } => format!("V{:x} = random(0x{:x})", x, nn),

        Instruction::LoadIndex { addr } => format!("i = 0x{:x}", addr),
        Instruction::AddIndex { x } => format!("i += V{:x}", x),
        Instruction::LoadFont { x } => format!("i = hex_digit(V{:x})", x),
        Instruction::StoreBcd { x } => format!("bcd(V{:x})", x),
        Instruction::StoreRegs { x } => format!("save(V{:x})", x),
        Instruction::LoadRegs { x } => format!("load(V{:x})", x),

        Instruction::Draw { x, y, n } => format!("draw(V{:x}, V{:x}, 0x{:x})", x, y, n),
        Instruction::LoadDelay { x } => format!("V{:x} = delay", x),
        Instruction::WaitKey { x } => format!("V{:x} = key_halt()", x),
        Instruction::SetDelay { x } => format!("delay = V{:x}", x),
        Instruction::SetSound { x } => format!("sound_timer = V{:x}", x),

        Instruction::Unknown(word) => format!("unknown(0x{:04x})", word),
    }
}

fn format_skip(cond: SkipCondition, style: MnemonicStyle) -> String {
    // Condition style negates: the next word runs when the skip does NOT fire.
    let (skip, run) = match cond {
        SkipCondition::EqImm { x, nn } => (
            format!("V{:x} == 0x{:x}", x, nn),
            format!("V{:x} != 0x{:x}", x, nn),
        ),
        SkipCondition::NeImm { x, nn } => (
            format!("V{:x} != 0x{:x}", x, nn),
            format!("V{:x} == 0x{:x}", x, nn),
        ),
        SkipCondition::EqReg { x, y } => (
            format!("V{:x} == V{:x}", x, y),
            format!("V{:x} != V{:x}", x, y),
        ),
        SkipCondition::NeReg { x, y } => (
            format!("V{:x} != V{:x}", x, y),
            format!("V{:x} == V{:x}", x, y),
        ),
        SkipCondition::KeyDown { x } => (
            format!("key(V{:x}).isDown", x),
            format!("key(V{:x}).isUp", x),
        ),
        SkipCondition::KeyUp { x } => (
            format!("key(V{:x}).isUp", x),
            format!("key(V{:x}).isDown", x),
        ),
    };

    match style {
        MnemonicStyle::Skip => format!("skip if {}:", skip),
        MnemonicStyle::Condition => format!("if {}:", run),
    }
}

fn format_alu(op: AluOp, x: u8, y: u8) -> String {
    match op {
        AluOp::Move => format!("V{:x} = V{:x}", x, y),
        AluOp::Or => format!("V{:x} |= V{:x}", x, y),
        AluOp::And => format!("V{:x} &= V{:x}", x, y),
        AluOp::Xor => format!("V{:x} ^= V{:x}", x, y),
        AluOp::Add => format!("V{:x} += V{:x}", x, y),
        AluOp::Sub => format!("V{:x} -= V{:x}", x, y),
        AluOp::ShiftRight => format!("V{:x} >>= V{:x}", x, y),
        AluOp::SubReverse => format!("V{:x} = V{:x} - V{:x}", x, y, x),
        AluOp::ShiftLeft => format!("V{:x} <<= V{:x}", x, y),
    }
}
