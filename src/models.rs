//! Domain models shared by the store, the router-driven screens and the LRC
//! codec. They stay plain data holders; the store owns every instance and the
//! screens only ever borrow them through lookups.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
/// One timestamped fragment of a lyric.
pub struct LyricLine {
    /// Offset in seconds from the start of playback. Never negative.
    pub time: f64,
    /// Text shown while this line is active.
    pub text: String,
}

impl LyricLine {
    /// Build a line, clamping negative times to the start of playback.
    pub fn new(time: f64, text: impl Into<String>) -> Self {
        Self {
            time: time.max(0.0),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A song's metadata plus its ordered, time-coded lines.
pub struct Lyric {
    /// Identity key inside the collection. Lookups and removals compare on
    /// this field alone.
    pub id: String,
    /// Song title. Imports require one, either typed or from a `[ti:]` tag.
    pub title: String,
    /// Performer. May be empty; `display_title` then shows the title alone.
    pub artist: String,
    /// Insertion order is display and playback order.
    pub lines: Vec<LyricLine>,
}

impl Lyric {
    /// Compose a `Title - Artist` string that drops the hyphen when the
    /// artist is blank.
    pub fn display_title(&self) -> String {
        if self.artist.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }

    /// Timestamp of the final line, or zero for an empty lyric.
    pub fn duration(&self) -> f64 {
        self.lines
            .iter()
            .map(|line| line.time)
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Lyric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())
    }
}

/// Render seconds as `mm:ss.cc`, the notation LRC files use.
pub fn format_timestamp(secs: f64) -> String {
    let centis = (secs.max(0.0) * 100.0).round() as u64;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    let hundredths = centis % 100;
    format!("{minutes:02}:{seconds:02}.{hundredths:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_omits_blank_artist() {
        let mut lyric = Lyric {
            id: "7".into(),
            title: "Song".into(),
            artist: "  ".into(),
            lines: Vec::new(),
        };
        assert_eq!(lyric.display_title(), "Song");
        lyric.artist = "Band".into();
        assert_eq!(lyric.display_title(), "Song - Band");
    }

    #[test]
    fn timestamps_use_two_digit_fields() {
        assert_eq!(format_timestamp(0.0), "00:00.00");
        assert_eq!(format_timestamp(5.5), "00:05.50");
        assert_eq!(format_timestamp(83.25), "01:23.25");
        assert_eq!(format_timestamp(-3.0), "00:00.00");
    }

    #[test]
    fn negative_line_times_are_clamped() {
        assert_eq!(LyricLine::new(-1.0, "x").time, 0.0);
    }
}
