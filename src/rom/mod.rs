//! Program images.
//!
//! This module provides:
//! - An immutable memory image with the CHIP-8 reserved area
//! - A loader for raw ROM files

pub mod loader;
pub mod memory;

pub use loader::{image_from_bytes, load_rom, RomError};
pub use memory::{MemoryError, MemoryImage};
