//! CHIP-8 instruction set.
//!
//! This module provides:
//! - A decoder from 16-bit words to a closed [`Instruction`] enum
//! - Mnemonic formatting in skip-centric and condition-centric styles
//! - Control-flow classification of skip/jump pairs

pub mod decode;
pub mod flow;
pub mod mnemonic;

pub use decode::{decode, encode, AluOp, Instruction, SkipCondition, INSTRUCTION_WIDTH};
pub use flow::{classify, Flow};
pub use mnemonic::{mnemonic, MnemonicStyle};
