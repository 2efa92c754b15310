use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;

use crate::models::{format_timestamp, Lyric};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Terminal columns `text` occupies. Wide glyphs such as CJK take two cells,
/// so cursor placement cannot use the char count.
pub(crate) fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Second line of a home list entry: line count and length.
pub(crate) fn lyric_summary(lyric: &Lyric) -> String {
    let count = lyric.lines.len();
    let noun = if count == 1 { "line" } else { "lines" };
    format!("{count} {noun} • {}", format_timestamp(lyric.duration()))
}
