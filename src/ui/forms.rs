use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::helpers::display_width;
use crate::lrc::{self, ParsedLrc};
use crate::models::{Lyric, LyricLine};

/// Form state backing the import screen.
#[derive(Default, Clone)]
pub(crate) struct ImportForm {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) content: String,
    pub(crate) active: ImportField,
    pub(crate) error: Option<String>,
}

/// Fields of the import form in focus order.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub(crate) enum ImportField {
    #[default]
    Title,
    Artist,
    Content,
}

/// Title, artist and parsed lines ready to become a `Lyric`.
#[derive(Debug)]
pub(crate) struct ImportDraft {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) lines: Vec<LyricLine>,
}

impl ImportDraft {
    pub(crate) fn into_lyric(self, id: String) -> Lyric {
        Lyric {
            id,
            title: self.title,
            artist: self.artist,
            lines: self.lines,
        }
    }
}

impl ImportForm {
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            ImportField::Title => ImportField::Artist,
            ImportField::Artist => ImportField::Content,
            ImportField::Content => ImportField::Title,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            ImportField::Title => ImportField::Content,
            ImportField::Artist => ImportField::Title,
            ImportField::Content => ImportField::Artist,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.active_value_mut().push(ch);
        true
    }

    /// Enter starts a new line inside the content field and moves focus
    /// forward everywhere else.
    pub(crate) fn newline(&mut self) {
        if self.active == ImportField::Content {
            self.content.push('\n');
        } else {
            self.toggle_field();
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.active_value_mut().pop();
    }

    /// Parse the content as LRC and fill blank metadata from its tags. A
    /// title is required either way.
    pub(crate) fn parse_inputs(&self) -> Result<ImportDraft> {
        let ParsedLrc {
            title,
            artist,
            lines,
        } = lrc::parse(&self.content)?;

        let title = match self.title.trim() {
            "" => title.unwrap_or_default(),
            typed => typed.to_string(),
        };
        if title.is_empty() {
            return Err(anyhow!("Lyric title is required."));
        }
        let artist = match self.artist.trim() {
            "" => artist.unwrap_or_default(),
            typed => typed.to_string(),
        };

        Ok(ImportDraft {
            title,
            artist,
            lines,
        })
    }

    /// Render a single-line field for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: ImportField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<from [ti:]/[ar:] tag>".to_string()
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Content lines, with the focused field highlighted.
    pub(crate) fn content_lines(&self) -> Vec<Line<'static>> {
        let style = if self.active == ImportField::Content {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        if self.content.is_empty() {
            return vec![Line::from(Span::styled(
                "[00:00.00]Paste LRC lines here",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        self.content
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect()
    }

    /// Width of a field's text in terminal cells.
    pub(crate) fn value_width(&self, field: ImportField) -> usize {
        display_width(self.value(field))
    }

    /// Cursor position inside the content field as (column, row), in cells.
    pub(crate) fn content_cursor(&self) -> (usize, usize) {
        let row = self.content.matches('\n').count();
        let col = self
            .content
            .rsplit('\n')
            .next()
            .map(display_width)
            .unwrap_or(0);
        (col, row)
    }

    fn value(&self, field: ImportField) -> &str {
        match field {
            ImportField::Title => &self.title,
            ImportField::Artist => &self.artist,
            ImportField::Content => &self.content,
        }
    }

    fn active_value_mut(&mut self) -> &mut String {
        match self.active {
            ImportField::Title => &mut self.title,
            ImportField::Artist => &mut self.artist,
            ImportField::Content => &mut self.content,
        }
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmLyricRemove {
    pub(crate) id: String,
    pub(crate) title: String,
}

impl ConfirmLyricRemove {
    pub(crate) fn from(lyric: &Lyric) -> Self {
        Self {
            id: lyric.id.clone(),
            title: lyric.display_title(),
        }
    }
}

/// Free-form path entry, the terminal stand-in for the address bar.
#[derive(Default, Clone)]
pub(crate) struct PathPrompt {
    pub(crate) input: String,
}

impl PathPrompt {
    pub(crate) fn new() -> Self {
        Self {
            input: "/".to_string(),
        }
    }
}
