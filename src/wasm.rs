//! WebAssembly bindings for the decompiler.
//!
//! This module provides JavaScript-friendly wrappers around the core
//! pipeline. Every function takes the raw ROM bytes.

use wasm_bindgen::prelude::*;
use crate::{AnalysisConfig, Decompiler};
use crate::decompile::Analysis;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn analyzed(rom: &[u8]) -> Result<(Decompiler, Analysis), JsError> {
    let decompiler = Decompiler::from_rom(rom, AnalysisConfig::default())
        .map_err(|e| JsError::new(&format!("{}", e)))?;
    let analysis = decompiler.analyze()
        .map_err(|e| JsError::new(&format!("{}", e)))?;
    Ok((decompiler, analysis))
}

/// Structured pseudocode for the whole program.
#[wasm_bindgen]
pub fn decompile_pseudo(rom: &[u8]) -> Result<String, JsError> {
    let (decompiler, analysis) = analyzed(rom)?;
    decompiler.pseudocode(&analysis)
        .map_err(|e| JsError::new(&format!("{}", e)))
}

/// Flat pseudo-assembly listing.
#[wasm_bindgen]
pub fn pseudo_assembly(rom: &[u8]) -> Result<String, JsError> {
    let decompiler = Decompiler::from_rom(rom, AnalysisConfig::default())
        .map_err(|e| JsError::new(&format!("{}", e)))?;
    Ok(decompiler.pseudo_assembly())
}

/// Dump of the data region.
#[wasm_bindgen]
pub fn data_dump(rom: &[u8]) -> Result<String, JsError> {
    let (decompiler, analysis) = analyzed(rom)?;
    Ok(decompiler.data_dump(&analysis))
}

/// Symbol table and entry points as JSON.
#[wasm_bindgen]
pub fn symbols_json(rom: &[u8]) -> Result<String, JsError> {
    let (decompiler, analysis) = analyzed(rom)?;
    decompiler.symbols_json(&analysis)
        .map_err(|e| JsError::new(&format!("{}", e)))
}

/// Subroutine entry addresses in discovery order.
#[wasm_bindgen]
pub fn subroutine_entries(rom: &[u8]) -> Result<js_sys::Array, JsError> {
    let (_, analysis) = analyzed(rom)?;
    Ok(analysis
        .entry_points
        .iter()
        .map(|&addr| JsValue::from(addr))
        .collect())
}
