//! Text products.
//!
//! This module provides:
//! - The control-flow tree renderer (structured pseudocode per subroutine)
//! - Whole-program assembly of the rendered subroutines
//! - A flat pseudo-assembly listing
//! - A dump of the data region

pub mod data;
pub mod listing;
pub mod program;
pub mod tree;

pub use data::{bit_bar, data_dump};
pub use listing::{disassemble_word, pseudo_assembly};
pub use program::{render_program, subroutine_name, MAIN_NAME};
pub use tree::{render_subroutine, Frame, Line, RenderError, Status};
