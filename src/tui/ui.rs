//! UI rendering for the browser.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::analysis::AddressClass;
use super::app::{BrowserApp, ListingRow, Pane};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &BrowserApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(rows[0]);

    draw_listing(frame, panes[0], app);
    draw_pseudocode(frame, panes[1], app);
    draw_status(frame, rows[1], app);
    draw_help(frame, rows[2]);
}

/// Draw the flat listing, colored by code/data partition.
fn draw_listing(frame: &mut Frame, area: Rect, app: &BrowserApp) {
    let visible = (area.height as usize).saturating_sub(2);

    let items: Vec<ListItem> = app
        .listing
        .iter()
        .skip(app.listing_scroll)
        .take(visible)
        .map(|row| {
            let marker = if row.is_label { "▶ " } else { "  " };
            ListItem::new(format!("{}{}", marker, row.text)).style(row_style(row))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Listing ")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Pane::Listing, Color::Cyan)));

    frame.render_widget(list, area);
}

/// Draw the structured pseudocode.
fn draw_pseudocode(frame: &mut Frame, area: Rect, app: &BrowserApp) {
    let visible = (area.height as usize).saturating_sub(2);

    let content: Vec<Line> = app
        .pseudocode
        .iter()
        .skip(app.code_scroll)
        .take(visible)
        .map(|text| {
            let trimmed = text.trim_start();
            let style = if trimmed.starts_with("def ") {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if trimmed.starts_with("::label_") {
                Style::default().fg(Color::Yellow)
            } else if trimmed.starts_with("if ") || trimmed == "else:" {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default()
            };
            Line::styled(text.clone(), style)
        })
        .collect();

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Pseudocode ")
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Pane::Pseudocode, Color::Green)));

    frame.render_widget(paragraph, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &BrowserApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("Tab: Switch pane  ↑↓: Scroll  PgUp/PgDn: Page"),
        Line::from("g: Next label  q: Quit"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

/// Color for a listing row.
fn row_style(row: &ListingRow) -> Style {
    match row.class {
        AddressClass::Code if row.is_label => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        AddressClass::Code => Style::default().fg(Color::White),
        AddressClass::Data | AddressClass::Reserved => Style::default().fg(Color::DarkGray),
    }
}

fn focus_style(focused: bool, color: Color) -> Style {
    if focused {
        Style::default().fg(color)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
