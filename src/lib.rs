//! # CHIP-8 Decompiler
//!
//! Recovers structured, human-readable pseudocode from raw CHIP-8 program
//! images without executing them.
//!
//! CHIP-8 has no native if/else: conditionals are a "skip next instruction"
//! followed by an unconditional jump. The decompiler explores every
//! reachable path symbolically to separate code from data, then replays
//! each subroutine and rebuilds if/else nesting from that idiom.

pub mod config;
pub mod isa;
pub mod rom;
pub mod analysis;
pub mod render;
pub mod decompile;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use config::{AnalysisConfig, ConfigError};
pub use isa::{decode, encode, Instruction, Flow};
pub use rom::{MemoryImage, RomError, load_rom};
pub use analysis::{explore, find_entry_points, SymbolTable, ExploreError};
pub use render::{render_subroutine, pseudo_assembly, data_dump, RenderError};
pub use decompile::{decompile, Analysis, Decompiler, DecompileError};

#[cfg(feature = "tui")]
pub use tui::run_browser;
