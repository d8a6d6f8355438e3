//! Browser application state and logic.

use crate::analysis::AddressClass;
use crate::decompile::{Analysis, Decompiler, DecompileError};
use crate::render::listing::format_line;

/// One row of the listing pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub addr: u16,
    pub text: String,
    pub class: AddressClass,
    pub is_label: bool,
}

/// Which pane receives scroll keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Listing,
    Pseudocode,
}

/// Browser application state.
pub struct BrowserApp {
    /// Flat listing, one row per word.
    pub listing: Vec<ListingRow>,
    /// Structured pseudocode lines.
    pub pseudocode: Vec<String>,
    /// Pane with keyboard focus.
    pub focus: Pane,
    /// First visible listing row.
    pub listing_scroll: usize,
    /// First visible pseudocode line.
    pub code_scroll: usize,
    /// Should we quit?
    pub should_quit: bool,
    /// Status message to display.
    pub status: String,
}

impl BrowserApp {
    /// Build the browser state from an analyzed image.
    pub fn new(decompiler: &Decompiler, analysis: &Analysis) -> Result<Self, DecompileError> {
        let image = decompiler.image();
        let symbols = &analysis.symbols;

        let listing = image
            .program_bytes()
            .chunks_exact(2)
            .zip((image.load_address()..).step_by(2))
            .map(|(pair, addr)| ListingRow {
                addr,
                text: format_line(addr, pair[0], pair[1]),
                class: symbols.classify(image, addr).unwrap_or(AddressClass::Data),
                is_label: symbols.is_label(addr),
            })
            .collect();

        let pseudocode = decompiler
            .pseudocode(analysis)?
            .lines()
            .map(str::to_string)
            .collect();

        let (code, data) = symbols.partition_counts(image);
        Ok(Self {
            listing,
            pseudocode,
            focus: Pane::Listing,
            listing_scroll: 0,
            code_scroll: 0,
            should_quit: false,
            status: format!(
                "{} code bytes, {} data bytes, {} subroutines. Tab: switch pane, q: quit.",
                code, data, analysis.entry_points.len()
            ),
        })
    }

    /// Switch keyboard focus to the other pane.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Listing => Pane::Pseudocode,
            Pane::Pseudocode => Pane::Listing,
        };
    }

    /// Scroll the focused pane down by `rows`.
    pub fn scroll_down(&mut self, rows: usize) {
        let (scroll, len) = self.focused_mut();
        *scroll = (*scroll + rows).min(len.saturating_sub(1));
    }

    /// Scroll the focused pane up by `rows`.
    pub fn scroll_up(&mut self, rows: usize) {
        let (scroll, _) = self.focused_mut();
        *scroll = scroll.saturating_sub(rows);
    }

    /// Move the listing to the next labelled row after the current top.
    pub fn next_label(&mut self) {
        let found = self
            .listing
            .iter()
            .enumerate()
            .skip(self.listing_scroll + 1)
            .find(|(_, row)| row.is_label);

        match found {
            Some((index, row)) => {
                self.listing_scroll = index;
                self.status = format!("label_{:x}", row.addr);
            }
            None => self.status = "No further labels.".into(),
        }
    }

    fn focused_mut(&mut self) -> (&mut usize, usize) {
        match self.focus {
            Pane::Listing => (&mut self.listing_scroll, self.listing.len()),
            Pane::Pseudocode => (&mut self.code_scroll, self.pseudocode.len()),
        }
    }
}

/// Run the browser until the user quits.
pub fn run_browser(mut app: BrowserApp) -> std::io::Result<()> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    };
    use ratatui::prelude::*;
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    loop {
        terminal.draw(|frame| {
            super::ui::draw(frame, &app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                        KeyCode::Tab => app.toggle_focus(),
                        KeyCode::Char('g') => app.next_label(),
                        KeyCode::Up => app.scroll_up(1),
                        KeyCode::Down => app.scroll_down(1),
                        KeyCode::PageUp => app.scroll_up(20),
                        KeyCode::PageDown => app.scroll_down(20),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
