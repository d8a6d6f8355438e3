//! Symbolic branch exploration.
//!
//! Starting from the entry point, every reachable path is replayed without
//! evaluating any register. Conditional skips fork the path, calls and
//! returns are followed through a simulated call stack, and backward jumps
//! end a path (the loop body they close was already replayed on the way
//! down). Every address a path touches is recorded as an instruction.

use super::stack::CallStack;
use super::symbols::SymbolTable;
use crate::config::AnalysisConfig;
use crate::isa::{decode, Instruction, INSTRUCTION_WIDTH};
use crate::rom::MemoryImage;
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// A pending exploration task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Branch {
    pc: u16,
    stack: CallStack,
}

/// Counters gathered during exploration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExploreStats {
    /// Branches taken off the queue.
    pub branches: usize,
    /// Skips that forked the current path.
    pub forks: usize,
    /// Instructions replayed across all branches.
    pub steps: usize,
}

/// Breadth-first explorer over one memory image.
pub struct Explorer<'a> {
    image: &'a MemoryImage,
    config: &'a AnalysisConfig,
    symbols: SymbolTable,
    queue: VecDeque<Branch>,
    /// Fork states already enqueued; replay is deterministic in them.
    seen: HashSet<Branch>,
    stats: ExploreStats,
}

impl<'a> Explorer<'a> {
    /// Create an explorer seeded at the configured entry point.
    pub fn new(image: &'a MemoryImage, config: &'a AnalysisConfig) -> Self {
        let mut explorer = Self {
            image,
            config,
            symbols: SymbolTable::new(),
            queue: VecDeque::new(),
            seen: HashSet::new(),
            stats: ExploreStats::default(),
        };
        explorer.enqueue(config.entry_point, CallStack::new());
        explorer
    }

    /// Drain the queue and return the finished symbol table.
    pub fn run(mut self) -> Result<(SymbolTable, ExploreStats), ExploreError> {
        while let Some(branch) = self.queue.pop_front() {
            self.stats.branches += 1;
            self.run_branch(branch)?;
        }

        log::info!(
            "exploration done: {} instructions, {} labels, {} forks, {} steps",
            self.symbols.instruction_addresses.len(),
            self.symbols.label_addresses.len(),
            self.stats.forks,
            self.stats.steps,
        );
        Ok((self.symbols, self.stats))
    }

    fn enqueue(&mut self, pc: u16, stack: CallStack) {
        let branch = Branch { pc, stack };
        if self.seen.insert(branch.clone()) {
            self.queue.push_back(branch);
        }
    }

    /// Replay one branch until it forks, loops back, or fails.
    fn run_branch(&mut self, branch: Branch) -> Result<(), ExploreError> {
        let Branch { mut pc, mut stack } = branch;

        loop {
            self.stats.steps += 1;
            if self.stats.steps > self.config.max_explore_steps {
                return Err(ExploreError::IterationLimit { limit: self.config.max_explore_steps });
            }

            let word = self.fetch(pc)?;
            self.symbols.instruction_addresses.insert(pc);

            match decode(word) {
                Instruction::Skip(_) => {
                    self.stats.forks += 1;
                    log::debug!("fork at 0x{:x} (call depth {})", pc, stack.depth());
                    self.enqueue(pc + INSTRUCTION_WIDTH, stack.clone());
                    self.enqueue(pc + 2 * INSTRUCTION_WIDTH, stack);
                    return Ok(());
                }
                Instruction::Jump { addr } if addr <= pc => {
                    if self.symbols.label_addresses.insert(addr) {
                        log::debug!("label at 0x{:x} (jump from 0x{:x})", addr, pc);
                    }
                    return Ok(());
                }
                Instruction::Jump { addr } => pc = addr,
                Instruction::JumpOffset { .. } => {
                    return Err(ExploreError::DynamicJump { address: pc });
                }
                Instruction::Call { addr } => {
                    if stack.depth() >= self.config.max_call_depth {
                        return Err(ExploreError::StackOverflow {
                            address: pc,
                            depth: self.config.max_call_depth,
                        });
                    }
                    stack = stack.push(pc + INSTRUCTION_WIDTH);
                    pc = addr;
                }
                Instruction::Return => match stack.pop() {
                    Some((ret, rest)) => {
                        pc = ret;
                        stack = rest;
                    }
                    None => return Err(ExploreError::EmptyCallStack { address: pc }),
                },
                _ => pc += INSTRUCTION_WIDTH,
            }
        }
    }

    fn fetch(&self, pc: u16) -> Result<u16, ExploreError> {
        if pc % 2 != 0 {
            return Err(ExploreError::Misaligned { address: pc });
        }
        if pc < self.image.load_address() || !self.image.contains_word(pc) {
            return Err(ExploreError::OutOfBounds { address: pc });
        }
        self.image
            .word(pc)
            .map_err(|_| ExploreError::OutOfBounds { address: pc })
    }
}

/// Explore `image` from the configured entry point.
pub fn explore(image: &MemoryImage, config: &AnalysisConfig) -> Result<SymbolTable, ExploreError> {
    Explorer::new(image, config).run().map(|(symbols, _)| symbols)
}

/// Errors that stop exploration. None of them leave a usable symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExploreError {
    #[error("jump with register offset at 0x{address:x}: the target needs runtime register values")]
    DynamicJump { address: u16 },

    #[error("return at 0x{address:x} with an empty call stack")]
    EmptyCallStack { address: u16 },

    #[error("call at 0x{address:x} exceeds the maximum call depth of {depth}")]
    StackOverflow { address: u16, depth: usize },

    #[error("exploration exceeded its ceiling of {limit} steps")]
    IterationLimit { limit: usize },

    #[error("instruction address 0x{address:x} is not word aligned")]
    Misaligned { address: u16 },

    #[error("instruction address 0x{address:x} is outside the loaded program")]
    OutOfBounds { address: u16 },
}
