use std::time::Duration;

use crate::models::Lyric;
use crate::playback::{active_line, PlaybackClock};

use super::forms::ImportForm;

/// Selection state for the home list. The lyrics themselves are read from the
/// store on every draw.
#[derive(Default)]
pub(crate) struct HomeScreen {
    pub(crate) selected: usize,
}

impl HomeScreen {
    pub(crate) fn move_selection(&mut self, offset: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let last = len as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub(crate) fn ensure_in_bounds(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Put the cursor on the first lyric with `id`, if present.
    pub(crate) fn focus(&mut self, lyrics: &[Lyric], id: &str) {
        if let Some(idx) = lyrics.iter().position(|lyric| lyric.id == id) {
            self.selected = idx;
        }
    }
}

/// State of the lyric detail view. Only the id is kept; the lyric is looked up
/// again whenever the screen needs it.
pub(crate) struct DetailScreen {
    pub(crate) id: String,
    pub(crate) clock: PlaybackClock,
    /// Line under the cursor for jump-to-line.
    pub(crate) cursor: usize,
    /// While set, the cursor follows the active line during playback.
    pub(crate) follow: bool,
}

impl DetailScreen {
    pub(crate) fn new(id: String) -> Self {
        Self {
            id,
            clock: PlaybackClock::new(),
            cursor: 0,
            follow: true,
        }
    }

    pub(crate) fn active_index(&self, lyric: &Lyric) -> Option<usize> {
        active_line(&lyric.lines, self.clock.position())
    }

    pub(crate) fn move_cursor(&mut self, offset: isize, lyric: &Lyric) {
        if lyric.lines.is_empty() {
            return;
        }
        let last = lyric.lines.len() as isize - 1;
        self.cursor = (self.cursor as isize + offset).clamp(0, last) as usize;
        self.follow = false;
    }

    /// Seek playback to the line under the cursor. Returns the timestamp
    /// jumped to.
    pub(crate) fn jump_to_cursor(&mut self, lyric: &Lyric) -> Option<f64> {
        let line = lyric.lines.get(self.cursor)?;
        self.clock.seek(line.time);
        self.follow = true;
        Some(line.time)
    }

    pub(crate) fn restart(&mut self) {
        self.clock.reset();
        self.cursor = 0;
        self.follow = true;
    }

    pub(crate) fn tick(&mut self, elapsed: Duration, lyric: &Lyric) {
        self.clock.tick(elapsed, lyric.duration());
        if self.follow {
            if let Some(active) = self.active_index(lyric) {
                self.cursor = active;
            }
        }
    }

    /// First visible line index so that the cursor stays centered in a
    /// window of `height` rows.
    pub(crate) fn scroll_offset(&self, total: usize, height: usize) -> usize {
        if height == 0 || total <= height {
            return 0;
        }
        let half = height / 2;
        self.cursor.saturating_sub(half).min(total - height)
    }
}

/// Top-level screens, one per route.
pub(crate) enum Screen {
    Home(HomeScreen),
    Detail(DetailScreen),
    Import(ImportForm),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_lyrics;

    #[test]
    fn home_selection_is_clamped() {
        let mut home = HomeScreen::default();
        home.move_selection(-3, 4);
        assert_eq!(home.selected, 0);
        home.move_selection(10, 4);
        assert_eq!(home.selected, 3);
        home.ensure_in_bounds(2);
        assert_eq!(home.selected, 1);
        home.ensure_in_bounds(0);
        assert_eq!(home.selected, 0);
    }

    #[test]
    fn playback_drags_the_cursor_until_the_user_moves_it() {
        let lyric = seed_lyrics().remove(0);
        let mut detail = DetailScreen::new(lyric.id.clone());
        detail.clock.play();
        detail.tick(Duration::from_secs(6), &lyric);
        assert_eq!(detail.cursor, 1);

        detail.move_cursor(2, &lyric);
        assert!(!detail.follow);
        detail.tick(Duration::from_secs(5), &lyric);
        assert_eq!(detail.cursor, 3);
        assert_eq!(detail.active_index(&lyric), Some(2));

        assert_eq!(detail.jump_to_cursor(&lyric), Some(15.0));
        assert_eq!(detail.active_index(&lyric), Some(3));
    }

    #[test]
    fn scroll_keeps_cursor_centered() {
        let mut detail = DetailScreen::new("1".into());
        assert_eq!(detail.scroll_offset(3, 10), 0);
        detail.cursor = 10;
        assert_eq!(detail.scroll_offset(40, 6), 7);
        detail.cursor = 39;
        assert_eq!(detail.scroll_offset(40, 6), 34);
    }
}
