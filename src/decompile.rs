//! Decompiler front end.
//!
//! Ties the stages together: exploration produces the symbol table, the
//! entry finder lists subroutines, and the renderers produce text.

use crate::analysis::{find_entry_points, AddressClass, ExploreError, ExploreStats, Explorer, SymbolTable};
use crate::config::{AnalysisConfig, ConfigError};
use crate::render::{self, RenderError};
use crate::rom::{MemoryImage, RomError};
use serde::Serialize;
use thiserror::Error;

/// Result of static analysis over one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Instruction and label addresses.
    pub symbols: SymbolTable,
    /// Subroutine entry points in discovery order.
    pub entry_points: Vec<u16>,
    #[serde(skip)]
    pub stats: ExploreStats,
}

/// A memory image together with the configuration used to analyze it.
#[derive(Debug, Clone)]
pub struct Decompiler {
    image: MemoryImage,
    config: AnalysisConfig,
}

impl Decompiler {
    /// Create a decompiler over a loaded image.
    pub fn new(image: MemoryImage, config: AnalysisConfig) -> Self {
        Self { image, config }
    }

    /// Build a decompiler straight from ROM bytes.
    pub fn from_rom(bytes: &[u8], config: AnalysisConfig) -> Result<Self, DecompileError> {
        config.validate()?;
        let image = crate::rom::image_from_bytes(bytes, &config)?;
        Ok(Self::new(image, config))
    }

    pub fn image(&self) -> &MemoryImage {
        &self.image
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Explore the image and find subroutine entry points.
    pub fn analyze(&self) -> Result<Analysis, DecompileError> {
        let (symbols, stats) = Explorer::new(&self.image, &self.config).run()?;
        let entry_points = find_entry_points(&self.image, &symbols, self.config.entry_point);
        log::info!("found {} subroutines", entry_points.len());
        Ok(Analysis { symbols, entry_points, stats })
    }

    /// Flat listing of every word; needs no analysis.
    pub fn pseudo_assembly(&self) -> String {
        render::pseudo_assembly(&self.image)
    }

    /// Structured pseudocode for the whole program.
    pub fn pseudocode(&self, analysis: &Analysis) -> Result<String, DecompileError> {
        Ok(render::render_program(
            &self.image,
            &analysis.symbols,
            &analysis.entry_points,
            &self.config,
        )?)
    }

    /// Byte dump of the data region.
    pub fn data_dump(&self, analysis: &Analysis) -> String {
        render::data_dump(&self.image, &analysis.symbols)
    }

    /// Symbol table and entry points as pretty JSON.
    pub fn symbols_json(&self, analysis: &Analysis) -> Result<String, DecompileError> {
        serde_json::to_string_pretty(analysis).map_err(|e| DecompileError::Json(e.to_string()))
    }

    /// Classification of every address of the loaded program.
    pub fn partition(&self, analysis: &Analysis) -> Vec<(u16, AddressClass)> {
        (self.image.load_address()..self.image.end())
            .filter_map(|addr| analysis.symbols.classify(&self.image, addr).map(|c| (addr, c)))
            .collect()
    }
}

/// Analyze and render in one go.
pub fn decompile(image: &MemoryImage, config: &AnalysisConfig) -> Result<String, DecompileError> {
    let decompiler = Decompiler::new(image.clone(), config.clone());
    let analysis = decompiler.analyze()?;
    decompiler.pseudocode(&analysis)
}

/// Errors from any stage of decompilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompileError {
    #[error("ROM error: {0}")]
    Rom(#[from] RomError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("exploration failed: {0}")]
    Explore(#[from] ExploreError),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("JSON error: {0}")]
    Json(String),
}
