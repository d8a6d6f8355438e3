//! ROM file loading.
//!
//! A CHIP-8 ROM is a raw binary with no header: its bytes are copied
//! verbatim to the load address.

use super::memory::{MemoryError, MemoryImage};
use crate::config::AnalysisConfig;
use std::path::Path;
use thiserror::Error;

/// Load a ROM file from disk into a memory image.
pub fn load_rom<P: AsRef<Path>>(path: P, config: &AnalysisConfig) -> Result<MemoryImage, RomError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| RomError::Io(format!("{}: {}", path.display(), e)))?;

    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    image_from_bytes(&bytes, config)
}

/// Build a memory image from ROM bytes already in memory.
pub fn image_from_bytes(bytes: &[u8], config: &AnalysisConfig) -> Result<MemoryImage, RomError> {
    if bytes.is_empty() {
        return Err(RomError::Empty);
    }
    if bytes.len() % 2 != 0 {
        log::warn!("ROM has an odd length ({} bytes); the last byte is not a full word", bytes.len());
    }

    Ok(MemoryImage::from_program(bytes, config.load_address)?)
}

/// Errors that can occur while loading a ROM.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("ROM is empty")]
    Empty,

    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_from_bytes() {
        let config = AnalysisConfig::default();
        let image = image_from_bytes(&[0x00, 0xE0, 0x12, 0x02], &config).unwrap();
        assert_eq!(image.word(0x200).unwrap(), 0x00E0);
        assert_eq!(image.word(0x202).unwrap(), 0x1202);
    }

    #[test]
    fn test_empty_rom_rejected() {
        let config = AnalysisConfig::default();
        assert_eq!(image_from_bytes(&[], &config), Err(RomError::Empty));
    }

    #[test]
    fn test_missing_file() {
        let config = AnalysisConfig::default();
        let err = load_rom("/nonexistent/rom.ch8", &config).unwrap_err();
        assert!(matches!(err, RomError::Io(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join("chip8_loader_test.ch8");
        std::fs::write(&path, [0x60, 0x01, 0x12, 0x02]).unwrap();

        let image = load_rom(&path, &AnalysisConfig::default()).unwrap();
        assert_eq!(image.program_bytes(), &[0x60, 0x01, 0x12, 0x02]);

        let _ = std::fs::remove_file(&path);
    }
}
