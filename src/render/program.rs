//! Whole-program pseudocode assembly.

use super::tree::{render_subroutine, Line, RenderError};
use crate::analysis::SymbolTable;
use crate::config::AnalysisConfig;
use crate::rom::MemoryImage;

/// Name of the block that holds the program entry.
pub const MAIN_NAME: &str = "main";

/// Deterministic name of the subroutine at `entry`.
pub fn subroutine_name(entry: u16) -> String {
    format!("fun_{:x}", entry)
}

/// Wrap rendered lines in a named block, one indent level deeper.
pub fn format_block(name: &str, lines: &[Line], indent: &str) -> String {
    let mut output = format!("def {}():\n", name);
    for line in lines {
        output.push_str(&indent.repeat(line.depth + 1));
        output.push_str(&line.text);
        output.push('\n');
    }
    output
}

/// Render one named block starting at `start`.
pub fn render_block(
    image: &MemoryImage,
    symbols: &SymbolTable,
    start: u16,
    name: &str,
    config: &AnalysisConfig,
) -> Result<String, RenderError> {
    let lines = render_subroutine(image, symbols, start, config)?;
    log::debug!("rendered {} at 0x{:x}: {} lines", name, start, lines.len());
    Ok(format_block(name, &lines, &config.indent))
}

/// Render the main block followed by every subroutine, blank-line separated.
pub fn render_program(
    image: &MemoryImage,
    symbols: &SymbolTable,
    entry_points: &[u16],
    config: &AnalysisConfig,
) -> Result<String, RenderError> {
    let mut blocks = Vec::with_capacity(entry_points.len() + 1);
    blocks.push(render_block(image, symbols, config.entry_point, MAIN_NAME, config)?);

    for &entry in entry_points {
        blocks.push(render_block(image, symbols, entry, &subroutine_name(entry), config)?);
    }

    Ok(blocks.join("\n"))
}
