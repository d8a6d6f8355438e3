//! Static control-flow analysis.
//!
//! This module provides:
//! - Breadth-first symbolic exploration producing the symbol table
//! - A persistent call stack shared between forked branches
//! - The code/data partition derived from the symbol table
//! - Subroutine entry point discovery

pub mod entries;
pub mod explore;
pub mod stack;
pub mod symbols;

pub use entries::find_entry_points;
pub use explore::{explore, ExploreError, ExploreStats, Explorer};
pub use stack::CallStack;
pub use symbols::{AddressClass, SymbolTable};
