//! Instruction decoder for CHIP-8.
//!
//! Every instruction is a 16-bit big-endian word. The high nibble selects
//! the instruction group; the remaining nibbles carry register indices
//! (`X`, `Y`), an 8-bit immediate (`NN`), a 4-bit immediate (`N`) or a
//! 12-bit address (`NNN`).

use serde::{Serialize, Deserialize};

/// Width of one instruction word in bytes.
pub const INSTRUCTION_WIDTH: u16 = 2;

/// Condition tested by a skip instruction.
///
/// A skip instruction jumps over the next word when its condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipCondition {
    /// `3XNN`: skip if VX == NN
    EqImm { x: u8, nn: u8 },
    /// `4XNN`: skip if VX != NN
    NeImm { x: u8, nn: u8 },
    /// `5XYN`: skip if VX == VY; the low nibble is not checked
    EqReg { x: u8, y: u8 },
    /// `9XY0`: skip if VX != VY
    NeReg { x: u8, y: u8 },
    /// `EX9E`: skip if the key in VX is pressed
    KeyDown { x: u8 },
    /// `EXA1`: skip if the key in VX is not pressed
    KeyUp { x: u8 },
}

/// Register-to-register operation of the `8XYN` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    /// `8XY0`: VX = VY
    Move,
    /// `8XY1`: VX |= VY
    Or,
    /// `8XY2`: VX &= VY
    And,
    /// `8XY3`: VX ^= VY
    Xor,
    /// `8XY4`: VX += VY
    Add,
    /// `8XY5`: VX -= VY
    Sub,
    /// `8XY6`: VX >>= VY
    ShiftRight,
    /// `8XY7`: VX = VY - VX
    SubReverse,
    /// `8XYE`: VX <<= VY
    ShiftLeft,
}

impl AluOp {
    fn from_nibble(n: u8) -> Option<Self> {
        match n {
            0x0 => Some(AluOp::Move),
            0x1 => Some(AluOp::Or),
            0x2 => Some(AluOp::And),
            0x3 => Some(AluOp::Xor),
            0x4 => Some(AluOp::Add),
            0x5 => Some(AluOp::Sub),
            0x6 => Some(AluOp::ShiftRight),
            0x7 => Some(AluOp::SubReverse),
            0xE => Some(AluOp::ShiftLeft),
            _ => None,
        }
    }

    fn to_nibble(self) -> u16 {
        match self {
            AluOp::Move => 0x0,
            AluOp::Or => 0x1,
            AluOp::And => 0x2,
            AluOp::Xor => 0x3,
            AluOp::Add => 0x4,
            AluOp::Sub => 0x5,
            AluOp::ShiftRight => 0x6,
            AluOp::SubReverse => 0x7,
            AluOp::ShiftLeft => 0xE,
        }
    }
}

/// Decoded CHIP-8 instruction.
///
/// The instruction set is organized into groups:
/// - Control: clear, return, sys, jump, call, skips, dynamic jump
/// - Registers: immediate loads, adds and the `8XYN` ALU group
/// - Index/memory: `I` loads, BCD, register save/load
/// - I/O: random, draw, timers, keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ==================== Control ====================

    /// `00E0`: clear the display
    Clear,

    /// `00EE`: return from subroutine
    Return,

    /// `0NNN`: machine code routine (ignored by interpreters)
    Sys { addr: u16 },

    /// `1NNN`: unconditional jump
    Jump { addr: u16 },

    /// `2NNN`: call subroutine
    Call { addr: u16 },

    /// Conditional skip of the next instruction word
    Skip(SkipCondition),

    /// `BNNN`: jump to NNN + V0; the target needs runtime state
    JumpOffset { addr: u16 },

    // ==================== Registers ====================

    /// `6XNN`: VX = NN
    LoadImm { x: u8, nn: u8 },

    /// `7XNN`: VX += NN
    AddImm { x: u8, nn: u8 },

    /// `8XYN`: register-to-register operation
    Alu { op: AluOp, x: u8, y: u8 },

    /// `CXNN`: VX = random & NN
    Random { x: u8, nn: u8 },

    // ==================== Index / Memory ====================

    /// `ANNN`: I = NNN
    LoadIndex { addr: u16 },

    /// `FX1E`: I += VX
    AddIndex { x: u8 },

    /// `FX29`: I = font glyph for VX
    LoadFont { x: u8 },

    /// `FX33`: store BCD of VX at I
    StoreBcd { x: u8 },

    /// `FX55`: store V0..=VX at I
    StoreRegs { x: u8 },

    /// `FX65`: load V0..=VX from I
    LoadRegs { x: u8 },

    // ==================== I/O ====================

    /// `DXYN`: draw an N-row sprite at (VX, VY)
    Draw { x: u8, y: u8, n: u8 },

    /// `FX07`: VX = delay timer
    LoadDelay { x: u8 },

    /// `FX0A`: block until a key is pressed, store it in VX
    WaitKey { x: u8 },

    /// `FX15`: delay timer = VX
    SetDelay { x: u8 },

    /// `FX18`: sound timer = VX
    SetSound { x: u8 },

    /// Any word with no defined meaning
    Unknown(u16),
}

/// Decode a 16-bit instruction word.
///
/// Decoding is total: words with no defined meaning become
/// [`Instruction::Unknown`].
pub fn decode(word: u16) -> Instruction {
    let x = ((word & 0x0F00) >> 8) as u8;
    let y = ((word & 0x00F0) >> 4) as u8;
    let n = (word & 0x000F) as u8;
    let nn = (word & 0x00FF) as u8;
    let nnn = word & 0x0FFF;

    match word >> 12 {
        0x0 => match word {
            0x00E0 => Instruction::Clear,
            0x00EE => Instruction::Return,
            _ => Instruction::Sys { addr: nnn },
        },
        0x1 => Instruction::Jump { addr: nnn },
        0x2 => Instruction::Call { addr: nnn },
        0x3 => Instruction::Skip(SkipCondition::EqImm { x, nn }),
        0x4 => Instruction::Skip(SkipCondition::NeImm { x, nn }),
        0x5 => Instruction::Skip(SkipCondition::EqReg { x, y }),
        0x6 => Instruction::LoadImm { x, nn },
        0x7 => Instruction::AddImm { x, nn },
        0x8 => match AluOp::from_nibble(n) {
            Some(op) => Instruction::Alu { op, x, y },
            None => Instruction::Unknown(word),
        },
        0x9 if n == 0 => Instruction::Skip(SkipCondition::NeReg { x, y }),
        0xA => Instruction::LoadIndex { addr: nnn },
        0xB => Instruction::JumpOffset { addr: nnn },
        0xC => Instruction::Random { x, nn },
        0xD => Instruction::Draw { x, y, n },
        0xE => match nn {
            0x9E => Instruction::Skip(SkipCondition::KeyDown { x }),
            0xA1 => Instruction::Skip(SkipCondition::KeyUp { x }),
            _ => Instruction::Unknown(word),
        },
        0xF => match nn {
            0x07 => Instruction::LoadDelay { x },
            0x0A => Instruction::WaitKey { x },
            0x15 => Instruction::SetDelay { x },
            0x18 => Instruction::SetSound { x },
            0x1E => Instruction::AddIndex { x },
            0x29 => Instruction::LoadFont { x },
            0x33 => Instruction::StoreBcd { x },
            0x55 => Instruction::StoreRegs { x },
            0x65 => Instruction::LoadRegs { x },
            _ => Instruction::Unknown(word),
        },
        _ => Instruction::Unknown(word),
    }
}

/// Encode an instruction back to its 16-bit word.
///
/// Register indices are masked to 4 bits, addresses to 12 bits.
pub fn encode(instr: &Instruction) -> u16 {
    fn xnn(op: u16, x: u8, nn: u8) -> u16 {
        op << 12 | (x as u16 & 0xF) << 8 | nn as u16
    }
    fn xy(op: u16, x: u8, y: u8, n: u16) -> u16 {
        op << 12 | (x as u16 & 0xF) << 8 | (y as u16 & 0xF) << 4 | (n & 0xF)
    }
    fn fx(x: u8, nn: u8) -> u16 {
        xnn(0xF, x, nn)
    }

    match *instr {
        Instruction::Clear => 0x00E0,
        Instruction::Return => 0x00EE,
        Instruction::Sys { addr } => addr & 0x0FFF,
        Instruction::Jump { addr } => 0x1000 | (addr & 0x0FFF),
        Instruction::Call { addr } => 0x2000 | (addr & 0x0FFF),
        Instruction::Skip(cond) => match cond {
            SkipCondition::EqImm { x, nn } => xnn(0x3, x, nn),
            SkipCondition::NeImm { x, nn } => xnn(0x4, x, nn),
            SkipCondition::EqReg { x, y } => xy(0x5, x, y, 0),
            SkipCondition::NeReg { x, y } => xy(0x9, x, y, 0),
            SkipCondition::KeyDown { x } => xnn(0xE, x, 0x9E),
            SkipCondition::KeyUp { x } => xnn(0xE, x, 0xA1),
        },
        Instruction::JumpOffset { addr } => 0xB000 | (addr & 0x0FFF),
        Instruction::LoadImm { x, nn } => xnn(0x6, x, nn),
        Instruction::AddImm { x, nn } => xnn(0x7, x, nn),
        Instruction::Alu { op, x, y } => xy(0x8, x, y, op.to_nibble()),
        Instruction::Random { x, nn } => xnn(0xC, x, nn),
        Instruction::LoadIndex { addr } => 0xA000 | (addr & 0x0FFF),
        Instruction::AddIndex { x } => fx(x, 0x1E),
        Instruction::LoadFont { x } => fx(x, 0x29),
        Instruction::StoreBcd { x } => fx(x, 0x33),
        Instruction::StoreRegs { x } => fx(x, 0x55),
        Instruction::LoadRegs { x } => fx(x, 0x65),
        Instruction::Draw { x, y, n } => xy(0xD, x, y, n as u16),
        Instruction::LoadDelay { x } => fx(x, 0x07),
        Instruction::WaitKey { x } => fx(x, 0x0A),
        Instruction::SetDelay { x } => fx(x, 0x15),
        Instruction::SetSound { x } => fx(x, 0x18),
        Instruction::Unknown(word) => word,
    }
}
