use std::mem;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::{debug, warn};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::{format_timestamp, Lyric};
use crate::router::{self, History, View};
use crate::store::{LyricStore, StoreEvent, SubscriptionId};

use super::forms::{ConfirmLyricRemove, ImportField, ImportForm, PathPrompt};
use super::helpers::{centered_rect, display_width, lyric_summary, surface_error};
use super::screens::{DetailScreen, HomeScreen, Screen};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows used by the detail header (title, artist, position).
const DETAIL_HEADER_HEIGHT: u16 = 4;
/// Lines skipped per PageUp/PageDown.
const PAGE_STEP: isize = 5;

/// Overlays that sit on top of the current screen.
enum Mode {
    Normal,
    ConfirmRemove(ConfirmLyricRemove),
    Navigating(PathPrompt),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Follow-up work collected while a screen is mutably borrowed.
enum Action {
    Stay,
    Exit,
    Back,
    Navigate(String),
    Confirm(ConfirmLyricRemove),
    Prompt,
}

/// Central application state shared across the TUI.
pub struct App {
    store: LyricStore,
    events: Receiver<StoreEvent>,
    subscription: SubscriptionId,
    history: History,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Take ownership of the store, subscribe to its changes and open
    /// `initial_path`.
    pub fn new(mut store: LyricStore, initial_path: &str) -> Self {
        let (sender, events) = mpsc::channel();
        let subscription = store.subscribe(move |event| {
            // The receiver lives as long as the app, so a failed send only
            // happens during teardown.
            let _ = sender.send(event.clone());
        });

        let mut app = Self {
            store,
            events,
            subscription,
            history: History::new(),
            screen: Screen::Home(HomeScreen::default()),
            mode: Mode::Normal,
            status: None,
        };
        app.navigate(initial_path);
        app
    }

    pub fn store(&self) -> &LyricStore {
        &self.store
    }

    /// Path of the screen currently shown.
    pub fn current_path(&self) -> &str {
        self.history.current()
    }

    /// Detach from the store and hand it back, ending the session.
    pub fn into_store(mut self) -> LyricStore {
        self.store.unsubscribe(self.subscription);
        self.store
    }

    /// Resolve `path` and show the matching screen. Unknown paths fall back
    /// to Home with an error in the footer.
    pub fn navigate(&mut self, path: &str) {
        match router::resolve(path) {
            Ok(view) => {
                debug!("navigating to {}", view.path());
                self.history.push(view.path());
                self.open_view(view);
            }
            Err(err) => {
                warn!("{err}");
                self.history.push("/");
                self.open_view(View::Home);
                self.set_status(err.to_string(), StatusKind::Error);
            }
        }
    }

    /// Like `navigate`, but overwrites the current history entry.
    fn redirect(&mut self, view: View) {
        debug!("redirecting to {}", view.path());
        self.history.replace(view.path());
        self.open_view(view);
    }

    fn go_back(&mut self) {
        let Some(previous) = self.history.back().map(str::to_string) else {
            return;
        };
        match router::resolve(&previous) {
            Ok(view) => self.open_view(view),
            Err(_) => self.open_view(View::Home),
        }
    }

    fn open_view(&mut self, view: View) {
        self.mode = Mode::Normal;
        self.screen = match view {
            View::Home => {
                let mut home = HomeScreen::default();
                if let Screen::Detail(detail) = &self.screen {
                    home.focus(self.store.lyrics(), &detail.id);
                }
                Screen::Home(home)
            }
            View::LyricDetail { id } => Screen::Detail(DetailScreen::new(id)),
            View::ImportLyric => Screen::Import(ImportForm::default()),
        };
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        let mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm)?,
            Mode::Navigating(prompt) => self.handle_prompt(code, prompt)?,
        };
        self.mode = mode;

        self.sync_store_events();
        Ok(exit)
    }

    /// Ctrl-S submits the import form.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        if matches!(self.mode, Mode::Normal) && matches!(self.screen, Screen::Import(_)) {
            self.submit_import();
            self.sync_store_events();
        }
        Ok(())
    }

    /// Advance playback on the detail screen and apply pending store events.
    pub(crate) fn tick(&mut self, elapsed: Duration) {
        if let Screen::Detail(detail) = &mut self.screen {
            if let Some(lyric) = self.store.get_lyric_by_id(&detail.id) {
                detail.tick(elapsed, lyric);
            }
        }
        self.sync_store_events();
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        let mut status_to_set: Option<(String, StatusKind)> = None;
        let action = match &mut self.screen {
            Screen::Home(home) => {
                let len = self.store.len();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => Action::Exit,
                    KeyCode::Up => {
                        home.move_selection(-1, len);
                        Action::Stay
                    }
                    KeyCode::Down => {
                        home.move_selection(1, len);
                        Action::Stay
                    }
                    KeyCode::PageUp => {
                        home.move_selection(-PAGE_STEP, len);
                        Action::Stay
                    }
                    KeyCode::PageDown => {
                        home.move_selection(PAGE_STEP, len);
                        Action::Stay
                    }
                    KeyCode::Home => {
                        home.move_selection(-(len as isize), len);
                        Action::Stay
                    }
                    KeyCode::End => {
                        home.select_last(len);
                        Action::Stay
                    }
                    KeyCode::Enter => match self.store.lyrics().get(home.selected) {
                        Some(lyric) => Action::Navigate(
                            View::LyricDetail {
                                id: lyric.id.clone(),
                            }
                            .path(),
                        ),
                        None => {
                            status_to_set =
                                Some(("No lyric selected.".to_string(), StatusKind::Error));
                            Action::Stay
                        }
                    },
                    KeyCode::Char('i') | KeyCode::Char('I') => {
                        Action::Navigate(View::ImportLyric.path())
                    }
                    KeyCode::Char('-') | KeyCode::Delete => {
                        match self.store.lyrics().get(home.selected) {
                            Some(lyric) => Action::Confirm(ConfirmLyricRemove::from(lyric)),
                            None => {
                                status_to_set = Some((
                                    "No lyric selected to remove.".to_string(),
                                    StatusKind::Error,
                                ));
                                Action::Stay
                            }
                        }
                    }
                    KeyCode::Char(':') => Action::Prompt,
                    _ => Action::Stay,
                }
            }
            Screen::Detail(detail) => {
                let lyric = self.store.get_lyric_by_id(&detail.id);
                match (code, lyric) {
                    (KeyCode::Char('q'), _) => Action::Exit,
                    (KeyCode::Esc | KeyCode::Backspace, _) => Action::Back,
                    (KeyCode::Char(':'), _) => Action::Prompt,
                    (KeyCode::Char(' '), Some(_)) => {
                        let text = if detail.clock.toggle() {
                            "Playing."
                        } else {
                            "Paused."
                        };
                        status_to_set = Some((text.to_string(), StatusKind::Info));
                        Action::Stay
                    }
                    (KeyCode::Up, Some(lyric)) => {
                        detail.move_cursor(-1, lyric);
                        Action::Stay
                    }
                    (KeyCode::Down, Some(lyric)) => {
                        detail.move_cursor(1, lyric);
                        Action::Stay
                    }
                    (KeyCode::PageUp, Some(lyric)) => {
                        detail.move_cursor(-PAGE_STEP, lyric);
                        Action::Stay
                    }
                    (KeyCode::PageDown, Some(lyric)) => {
                        detail.move_cursor(PAGE_STEP, lyric);
                        Action::Stay
                    }
                    (KeyCode::Enter, Some(lyric)) => {
                        if let Some(time) = detail.jump_to_cursor(lyric) {
                            status_to_set = Some((
                                format!("Jumped to {}.", format_timestamp(time)),
                                StatusKind::Info,
                            ));
                        }
                        Action::Stay
                    }
                    (KeyCode::Char('r') | KeyCode::Char('R'), Some(_)) => {
                        detail.restart();
                        status_to_set = Some(("Restarted.".to_string(), StatusKind::Info));
                        Action::Stay
                    }
                    (KeyCode::Char('-') | KeyCode::Delete, Some(lyric)) => {
                        Action::Confirm(ConfirmLyricRemove::from(lyric))
                    }
                    _ => Action::Stay,
                }
            }
            Screen::Import(form) => match code {
                KeyCode::Esc => {
                    status_to_set = Some(("Import cancelled.".to_string(), StatusKind::Info));
                    Action::Back
                }
                KeyCode::Tab => {
                    form.toggle_field();
                    Action::Stay
                }
                KeyCode::BackTab => {
                    form.previous_field();
                    Action::Stay
                }
                KeyCode::Backspace => {
                    form.backspace();
                    Action::Stay
                }
                KeyCode::Enter => {
                    form.newline();
                    Action::Stay
                }
                KeyCode::Char(ch) => {
                    if form.push_char(ch) {
                        form.error = None;
                    }
                    Action::Stay
                }
                _ => Action::Stay,
            },
        };

        if let Some((text, kind)) = status_to_set {
            self.set_status(text, kind);
        }

        match action {
            Action::Stay => {}
            Action::Exit => *exit = true,
            Action::Back => self.go_back(),
            Action::Navigate(path) => {
                self.clear_status();
                self.navigate(&path);
            }
            Action::Confirm(confirm) => {
                self.clear_status();
                return Ok(Mode::ConfirmRemove(confirm));
            }
            Action::Prompt => return Ok(Mode::Navigating(PathPrompt::new())),
        }
        Ok(Mode::Normal)
    }

    fn handle_confirm_remove(
        &mut self,
        code: KeyCode,
        confirm: ConfirmLyricRemove,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.store.remove_lyric(&confirm.id);
                if matches!(self.screen, Screen::Detail(_)) {
                    self.redirect(View::Home);
                }
                self.set_status(format!("Removed '{}'.", confirm.title), StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmRemove(confirm)),
        }
    }

    fn handle_prompt(&mut self, code: KeyCode, mut prompt: PathPrompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => Ok(Mode::Normal),
            KeyCode::Enter => {
                self.clear_status();
                self.navigate(prompt.input.trim());
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                prompt.input.pop();
                Ok(Mode::Navigating(prompt))
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                prompt.input.push(ch);
                Ok(Mode::Navigating(prompt))
            }
            _ => Ok(Mode::Navigating(prompt)),
        }
    }

    fn submit_import(&mut self) {
        let Screen::Import(form) = &mut self.screen else {
            return;
        };
        match form.parse_inputs() {
            Ok(draft) => {
                let id = self.store.next_id();
                let lyric = draft.into_lyric(id.clone());
                let title = lyric.display_title();
                self.store.add_lyric(lyric);
                self.redirect(View::LyricDetail { id });
                self.set_status(format!("Imported '{title}'."), StatusKind::Info);
            }
            Err(err) => {
                let message = surface_error(&err);
                warn!("import rejected: {message}");
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    /// Drain queued store events and repair any screen state they invalidate.
    fn sync_store_events(&mut self) {
        let mut removed_current = None;
        for event in self.events.try_iter() {
            if let (StoreEvent::Removed { id }, Screen::Detail(detail)) = (&event, &self.screen) {
                if *id == detail.id && self.store.get_lyric_by_id(id).is_none() {
                    removed_current = Some(id.clone());
                }
            }
        }

        if let Some(id) = removed_current {
            self.redirect(View::Home);
            self.set_status(format!("Lyric '{id}' was removed."), StatusKind::Info);
        }
        if let Screen::Home(home) = &mut self.screen {
            home.ensure_in_bounds(self.store.len());
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Home(home) => self.draw_home(frame, content_area, home),
            Screen::Detail(detail) => self.draw_detail(frame, content_area, detail),
            Screen::Import(form) => self.draw_import(frame, content_area, form),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::Navigating(prompt) => self.draw_prompt(frame, area, prompt),
            Mode::Normal => {}
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect, home: &HomeScreen) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Lyrics ({})", self.store.len()));

        let lyrics = self.store.lyrics();
        if lyrics.is_empty() {
            let message = Paragraph::new("No lyrics yet. Press 'i' to import one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = lyrics
            .iter()
            .map(|lyric| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        lyric.display_title(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        lyric_summary(lyric),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(home.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let Some(lyric) = self.store.get_lyric_by_id(&detail.id) else {
            let message = Paragraph::new(vec![
                Line::from(format!("Lyric not found: {}", detail.id)),
                Line::from(""),
                Line::from(Span::styled(
                    "Press Esc to go back.",
                    Style::default().fg(Color::Gray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Lyric"));
            frame.render_widget(message, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DETAIL_HEADER_HEIGHT.min(area.height)),
                Constraint::Min(0),
            ])
            .split(area);

        let state = if detail.clock.is_playing() {
            "Playing"
        } else {
            "Paused"
        };
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                lyric.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::raw(lyric.artist.clone()),
                Span::styled(
                    format!(
                        "  •  {state} {} / {}",
                        format_timestamp(detail.clock.position()),
                        format_timestamp(lyric.duration())
                    ),
                    Style::default().fg(Color::Gray),
                ),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Lyric"));
        frame.render_widget(header, chunks[0]);

        let body = Block::default().borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM);
        let inner = body.inner(chunks[1]);
        frame.render_widget(body, chunks[1]);
        if lyric.lines.is_empty() {
            let message = Paragraph::new("This lyric has no lines.").alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }

        let lines = self.detail_lines(lyric, detail, inner.height as usize);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
    }

    fn detail_lines(
        &self,
        lyric: &Lyric,
        detail: &DetailScreen,
        height: usize,
    ) -> Vec<Line<'static>> {
        let active = detail.active_index(lyric);
        let start = detail.scroll_offset(lyric.lines.len(), height);

        lyric
            .lines
            .iter()
            .enumerate()
            .skip(start)
            .take(height.max(1))
            .map(|(idx, line)| {
                let mut style = Style::default();
                if Some(idx) == active {
                    style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                } else {
                    style = style.fg(Color::Gray);
                }
                let marker = if idx == detail.cursor { "› " } else { "  " };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Yellow)),
                    Span::styled(
                        format!("[{}] ", format_timestamp(line.time)),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(line.text.clone(), style),
                ])
            })
            .collect()
    }

    fn draw_import(&self, frame: &mut Frame, area: Rect, form: &ImportForm) {
        let block = Block::default().title("Import Lyric").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let fields = Paragraph::new(vec![
            form.build_line("Title", ImportField::Title),
            form.build_line("Artist", ImportField::Artist),
        ]);
        frame.render_widget(fields, chunks[0]);

        let content_block = Block::default().borders(Borders::ALL).title("LRC Content");
        let content_inner = content_block.inner(chunks[1]);
        let (cursor_col, cursor_row) = form.content_cursor();
        let scroll = (cursor_row as u16).saturating_sub(content_inner.height.saturating_sub(1));
        let content = Paragraph::new(form.content_lines())
            .block(content_block)
            .scroll((scroll, 0));
        frame.render_widget(content, chunks[1]);

        let hint = match &form.error {
            Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                "Ctrl-S to import • Tab to switch fields • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        };
        frame.render_widget(Paragraph::new(hint).wrap(Wrap { trim: true }), chunks[2]);

        let (cursor_x, cursor_y) = match form.active {
            ImportField::Title => (
                chunks[0].x
                    + display_width("Title: ") as u16
                    + form.value_width(ImportField::Title) as u16,
                chunks[0].y,
            ),
            ImportField::Artist => (
                chunks[0].x
                    + display_width("Artist: ") as u16
                    + form.value_width(ImportField::Artist) as u16,
                chunks[0].y + 1,
            ),
            ImportField::Content => (
                content_inner.x + cursor_col as u16,
                content_inner.y + (cursor_row as u16).saturating_sub(scroll),
            ),
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from(Span::styled(
                self.history.current().to_string(),
                Style::default().fg(Color::DarkGray),
            ))
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&'static str, &'static str)] = match (&self.screen, &self.mode) {
            (_, Mode::ConfirmRemove(_)) => &[("[Y]", " Remove   "), ("[N/Esc]", " Cancel")],
            (_, Mode::Navigating(_)) => &[("[Enter]", " Go   "), ("[Esc]", " Cancel")],
            (Screen::Home(_), _) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Open   "),
                ("[i]", " Import   "),
                ("[-]", " Remove   "),
                ("[:]", " Go to path   "),
                ("[q]", " Quit"),
            ],
            (Screen::Detail(_), _) => &[
                ("[Space]", " Play/Pause   "),
                ("[↑↓]", " Select line   "),
                ("[Enter]", " Jump   "),
                ("[r]", " Restart   "),
                ("[-]", " Remove   "),
                ("[Esc]", " Back"),
            ],
            (Screen::Import(_), _) => &[
                ("[Ctrl-S]", " Import   "),
                ("[Tab]", " Next field   "),
                ("[Esc]", " Cancel"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
            .collect();
        Line::from(spans)
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmLyricRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove '{}'?", confirm.title)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, prompt: &PathPrompt) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Go to");
        let paragraph = Paragraph::new(Span::raw(format!("Path: {}", prompt.input)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + display_width(&format!("Path: {}", prompt.input)) as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cursor_x(app: &App) -> u16 {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal.get_cursor_position().unwrap().x
    }

    fn status(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            assert!(!app.handle_key(*code).unwrap());
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            let code = if ch == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(ch)
            };
            app.handle_key(code).unwrap();
        }
    }

    #[test]
    fn starts_on_home_with_the_seed_lyric() {
        let app = App::new(LyricStore::seeded(), "/");
        assert_eq!(app.current_path(), "/");
        let screen = render(&app);
        assert!(screen.contains("Lyrics (1)"));
        assert!(screen.contains("5 lines"));
        assert!(screen.contains("[i] Import"));
    }

    #[test]
    fn unknown_start_path_redirects_home() {
        let app = App::new(LyricStore::seeded(), "/nowhere");
        assert_eq!(app.current_path(), "/");
        assert!(matches!(app.screen, Screen::Home(_)));
        assert_eq!(status(&app), Some("No route matches '/nowhere'."));
    }

    #[test]
    fn deep_link_opens_detail_and_back_returns_home() {
        let mut app = App::new(LyricStore::seeded(), "/lyric/1");
        assert_eq!(app.current_path(), "/lyric/1");
        assert!(render(&app).contains("Simple Lyric"));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.current_path(), "/");
        assert!(matches!(app.screen, Screen::Home(_)));
    }

    #[test]
    fn enter_opens_selected_lyric() {
        let mut app = App::new(LyricStore::seeded(), "/");
        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.current_path(), "/lyric/1");
        match &app.screen {
            Screen::Detail(detail) => assert_eq!(detail.id, "1"),
            _ => panic!("expected the detail screen"),
        }
    }

    #[test]
    fn import_adds_lyric_and_shows_it() {
        let mut app = App::new(LyricStore::seeded(), "/");
        press(&mut app, &[KeyCode::Char('i')]);
        assert_eq!(app.current_path(), "/import");

        type_text(&mut app, "Night\nBand\n[00:01]hello\n[00:03]world");
        app.handle_ctrl_s().unwrap();

        assert_eq!(app.store().len(), 2);
        assert_eq!(app.current_path(), "/lyric/2");
        let imported = app.store().get_lyric_by_id("2").unwrap();
        assert_eq!(imported.title, "Night");
        assert_eq!(imported.artist, "Band");
        assert_eq!(imported.lines.len(), 2);
        assert_eq!(status(&app), Some("Imported 'Night - Band'."));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.current_path(), "/");
    }

    #[test]
    fn invalid_import_keeps_the_form_open() {
        let mut app = App::new(LyricStore::seeded(), "/import");
        type_text(&mut app, "Only a title");
        app.handle_ctrl_s().unwrap();

        assert_eq!(app.store().len(), 1);
        assert_eq!(app.current_path(), "/import");
        assert_eq!(status(&app), Some("No timed lyric lines found."));
        match &app.screen {
            Screen::Import(form) => {
                assert_eq!(form.error.as_deref(), Some("No timed lyric lines found."))
            }
            _ => panic!("expected the import form"),
        }
        assert!(render(&app).contains("No timed lyric lines found."));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.current_path(), "/");
        assert_eq!(status(&app), Some("Import cancelled."));
    }

    #[test]
    fn removing_from_detail_returns_home() {
        let mut app = App::new(LyricStore::seeded(), "/lyric/1");
        press(&mut app, &[KeyCode::Char('-')]);
        assert!(matches!(app.mode, Mode::ConfirmRemove(_)));
        assert!(render(&app).contains("Confirm Removal"));

        press(&mut app, &[KeyCode::Char('y')]);
        assert!(app.store().is_empty());
        assert_eq!(app.current_path(), "/");
        assert!(render(&app).contains("No lyrics yet"));
    }

    #[test]
    fn removal_can_be_cancelled() {
        let mut app = App::new(LyricStore::seeded(), "/");
        press(&mut app, &[KeyCode::Char('-'), KeyCode::Char('n')]);
        assert_eq!(app.store().len(), 1);
        assert_eq!(status(&app), Some("Removal cancelled."));
    }

    #[test]
    fn store_removal_elsewhere_closes_the_detail_view() {
        let mut app = App::new(LyricStore::seeded(), "/lyric/1");
        app.store.remove_lyric("1");
        app.tick(Duration::ZERO);
        assert_eq!(app.current_path(), "/");
        assert_eq!(status(&app), Some("Lyric '1' was removed."));
    }

    #[test]
    fn cursor_sits_after_wide_title_glyphs() {
        let mut wide = App::new(LyricStore::seeded(), "/import");
        type_text(&mut wide, "示例");
        let mut narrow = App::new(LyricStore::seeded(), "/import");
        type_text(&mut narrow, "abcd");
        assert_eq!(cursor_x(&wide), cursor_x(&narrow));

        let mut wide = App::new(LyricStore::seeded(), "/");
        press(&mut wide, &[KeyCode::Char(':')]);
        type_text(&mut wide, "歌");
        let mut narrow = App::new(LyricStore::seeded(), "/");
        press(&mut narrow, &[KeyCode::Char(':')]);
        type_text(&mut narrow, "ab");
        assert_eq!(cursor_x(&wide), cursor_x(&narrow));
    }

    #[test]
    fn path_prompt_navigates_to_missing_lyric() {
        let mut app = App::new(LyricStore::seeded(), "/");
        press(&mut app, &[KeyCode::Char(':'), KeyCode::Backspace]);
        type_text(&mut app, "/lyric/99");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.current_path(), "/lyric/99");
        assert!(render(&app).contains("Lyric not found: 99"));
    }

    #[test]
    fn playback_and_jump_on_detail() {
        let mut app = App::new(LyricStore::seeded(), "/lyric/1");
        press(&mut app, &[KeyCode::Char(' ')]);
        assert_eq!(status(&app), Some("Playing."));
        app.tick(Duration::from_secs(6));

        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(status(&app), Some("Jumped to 00:10.00."));
        match &app.screen {
            Screen::Detail(detail) => {
                assert_eq!(detail.cursor, 2);
                assert_eq!(detail.clock.position(), 10.0);
            }
            _ => panic!("expected the detail screen"),
        }
        assert!(render(&app).contains("Playing 00:10.00 / 00:20.00"));
    }

    #[test]
    fn quitting_from_home_and_detaching_the_store() {
        let mut app = App::new(LyricStore::seeded(), "/");
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
        let store = app.into_store();
        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(store.len(), 1);
    }
}
