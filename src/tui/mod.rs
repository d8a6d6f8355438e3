//! TUI browser for decompiled programs.
//!
//! Provides an interactive terminal view with:
//! - The flat listing colored by code/data partition
//! - Structured pseudocode side by side
//! - Label navigation

mod app;
mod ui;

pub use app::{BrowserApp, ListingRow, Pane, run_browser};
