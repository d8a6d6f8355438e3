//! Control-flow tree renderer.
//!
//! Replays one subroutine as a linear instruction stream and rebuilds
//! if/else nesting from the skip+jump idiom. Open conditionals live on an
//! explicit stack of frames; the stack order is the ancestry.
//!
//! A fused forward skip+jump opens a frame and continues in its body (the
//! jump target). When the body ends (return or backward jump) the renderer
//! emits `else:` and continues at the word after the jump. When an else
//! branch ends, the frame closes together with every enclosing frame that
//! is already in its else branch.

use crate::analysis::SymbolTable;
use crate::config::AnalysisConfig;
use crate::isa::{classify, decode, mnemonic, Flow, Instruction, MnemonicStyle, INSTRUCTION_WIDTH};
use crate::rom::MemoryImage;
use thiserror::Error;

/// Which branch of a conditional is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Body,
    Else,
}

/// An open conditional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Start of the body (the fused jump's target).
    pub body: u16,
    /// Start of the else branch (the word after the fused jump).
    pub else_: u16,
    pub status: Status,
}

/// One rendered line with its nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

impl Line {
    fn new(depth: usize, text: impl Into<String>) -> Self {
        Self { depth, text: text.into() }
    }
}

/// Render the body of the subroutine starting at `start`.
pub fn render_subroutine(
    image: &MemoryImage,
    symbols: &SymbolTable,
    start: u16,
    config: &AnalysisConfig,
) -> Result<Vec<Line>, RenderError> {
    let mut frames: Vec<Frame> = Vec::new();
    let mut lines = Vec::new();
    let mut pc = start;

    for _ in 0..config.max_render_steps {
        if symbols.is_label(pc) {
            lines.push(Line::new(frames.len(), format!("::label_{:x}::", pc)));
        }

        let word = image
            .word(pc)
            .map_err(|_| RenderError::OutOfBounds { address: pc })?;
        let next = image.next_word(pc);
        let depth = frames.len();

        match classify(word, next, pc) {
            Flow::SkipJumpForward { body, else_ } => {
                lines.push(Line::new(depth, text(word)));
                frames.push(Frame { body, else_, status: Status::Body });
                pc = body;
            }
            Flow::SkipJumpBack { .. } | Flow::SkipOpcode => {
                lines.push(Line::new(depth, text(word)));
                if let Some(next) = next {
                    if let Instruction::JumpOffset { .. } = decode(next) {
                        return Err(RenderError::DynamicJump { address: pc + INSTRUCTION_WIDTH });
                    }
                    lines.push(Line::new(depth + 1, text(next)));
                }
                pc += 2 * INSTRUCTION_WIDTH;
            }
            Flow::Return | Flow::JumpBack { .. } => {
                lines.push(Line::new(depth, text(word)));
                match reopen(&mut frames) {
                    Some(else_) => {
                        lines.push(Line::new(frames.len() - 1, "else:"));
                        pc = else_;
                    }
                    None => return Ok(lines),
                }
            }
            Flow::JumpForward { target } => pc = target,
            Flow::DynamicJump { .. } => {
                return Err(RenderError::DynamicJump { address: pc });
            }
            Flow::Call { .. } | Flow::Plain => {
                lines.push(Line::new(depth, text(word)));
                pc += INSTRUCTION_WIDTH;
            }
        }
    }

    Err(RenderError::IterationLimit { start, limit: config.max_render_steps })
}

/// Close finished else branches and switch the innermost open body to its
/// else branch. Returns where that else branch starts, or `None` when no
/// body is left open.
fn reopen(frames: &mut Vec<Frame>) -> Option<u16> {
    loop {
        let top = frames.last_mut()?;
        match top.status {
            Status::Body => {
                top.status = Status::Else;
                return Some(top.else_);
            }
            Status::Else => {
                frames.pop();
            }
        }
    }
}

fn text(word: u16) -> String {
    mnemonic(&decode(word), MnemonicStyle::Condition)
}

/// Errors that stop rendering a subroutine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("jump with register offset at 0x{address:x}: the target needs runtime register values")]
    DynamicJump { address: u16 },

    #[error("rendering from 0x{start:x} exceeded its ceiling of {limit} steps")]
    IterationLimit { start: u16, limit: usize },

    #[error("rendering reached 0x{address:x}, outside the loaded program")]
    OutOfBounds { address: u16 },
}
