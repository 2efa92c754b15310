//! Reader and writer for the LRC lyric format (`[mm:ss.xx]text`). The import
//! form and the `--import` flag both funnel their input through `parse`.

use thiserror::Error;

use crate::models::{format_timestamp, Lyric, LyricLine};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LrcError {
    #[error("Invalid timestamp [{tag}] on line {line}.")]
    InvalidTimestamp { line: usize, tag: String },
    #[error("No timed lyric lines found.")]
    NoTimedLines,
}

/// Result of parsing an LRC document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLrc {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Sorted by time; lines sharing a timestamp keep file order.
    pub lines: Vec<LyricLine>,
}

pub fn parse(text: &str) -> Result<ParsedLrc, LrcError> {
    let mut parsed = ParsedLrc::default();
    let mut offset_ms: i64 = 0;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for (idx, raw) in text.lines().enumerate() {
        let mut rest = raw.trim();
        let mut stamps = Vec::new();

        while let Some(inner) = rest.strip_prefix('[') {
            let Some(close) = inner.find(']') else {
                break;
            };
            let tag = &inner[..close];
            rest = &inner[close + 1..];

            if looks_like_timestamp(tag) {
                let time = parse_timestamp(tag).ok_or_else(|| LrcError::InvalidTimestamp {
                    line: idx + 1,
                    tag: tag.to_string(),
                })?;
                stamps.push(time);
                continue;
            }

            let Some((key, value)) = tag.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "ti" if !value.is_empty() => parsed.title = Some(value.to_string()),
                "ar" if !value.is_empty() => parsed.artist = Some(value.to_string()),
                "offset" => offset_ms = value.parse().unwrap_or(0),
                _ => {}
            }
        }

        let text = rest.trim();
        for time in stamps {
            parsed.lines.push(LyricLine::new(time, text));
        }
    }

    if parsed.lines.is_empty() {
        return Err(LrcError::NoTimedLines);
    }

    if offset_ms != 0 {
        let shift = offset_ms as f64 / 1000.0;
        for line in parsed.lines.iter_mut() {
            line.time = (line.time - shift).max(0.0);
        }
    }
    parsed.lines.sort_by(|a, b| a.time.total_cmp(&b.time));

    Ok(parsed)
}

/// `[digits:...]` is a timestamp, well-formed or not. Anything else, such
/// as `[2x]` or `[1st verse]`, is an annotation.
fn looks_like_timestamp(tag: &str) -> bool {
    tag.split_once(':').is_some_and(|(minutes, _)| {
        !minutes.is_empty() && minutes.chars().all(|c| c.is_ascii_digit())
    })
}

/// Parse `mm:ss`, with an optional one to three digit fraction.
fn parse_timestamp(tag: &str) -> Option<f64> {
    let (minutes, seconds) = tag.split_once(':')?;
    if minutes.is_empty() || !minutes.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds, None),
    };
    if whole.is_empty() || whole.len() > 2 || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty()
            || fraction.len() > 3
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }
    }

    let minutes: f64 = minutes.parse().ok()?;
    let seconds: f64 = seconds.parse().ok()?;
    if seconds >= 60.0 {
        return None;
    }
    Some(minutes * 60.0 + seconds)
}

/// Write a lyric back out as LRC text.
pub fn to_lrc(lyric: &Lyric) -> String {
    let mut out = String::new();
    out.push_str(&format!("[ti:{}]\n", lyric.title));
    if !lyric.artist.trim().is_empty() {
        out.push_str(&format!("[ar:{}]\n", lyric.artist));
    }
    for line in &lyric.lines {
        out.push_str(&format!("[{}]{}\n", format_timestamp(line.time), line.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_lyrics;

    fn times(parsed: &ParsedLrc) -> Vec<f64> {
        parsed.lines.iter().map(|l| l.time).collect()
    }

    #[test]
    fn reads_metadata_and_timed_lines() {
        let parsed = parse(
            "[ti:Moon River]\n[ar:Henry Mancini]\n[al:Breakfast]\n\n[00:01.50]Moon river\n[00:04]wider than a mile\n",
        )
        .unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Moon River"));
        assert_eq!(parsed.artist.as_deref(), Some("Henry Mancini"));
        assert_eq!(times(&parsed), vec![1.5, 4.0]);
        assert_eq!(parsed.lines[1].text, "wider than a mile");
    }

    #[test]
    fn repeated_tags_expand_and_sort() {
        let parsed = parse("[00:10.00][00:02.00]chorus\n[00:05.000]verse\n[01:00.5]end").unwrap();
        assert_eq!(times(&parsed), vec![2.0, 5.0, 10.0, 60.5]);
        assert_eq!(parsed.lines[0].text, "chorus");
        assert_eq!(parsed.lines[2].text, "chorus");
    }

    #[test]
    fn offset_shifts_lines_earlier() {
        let parsed = parse("[offset:500]\n[00:00.20]a\n[00:03.00]b").unwrap();
        assert_eq!(times(&parsed), vec![0.0, 2.5]);
    }

    #[test]
    fn untimed_text_and_unclosed_tags_are_skipped() {
        let parsed = parse("plain text\n[broken\n[00:01]kept").unwrap();
        assert_eq!(parsed.lines.len(), 1);
        assert_eq!(parsed.lines[0].text, "kept");
    }

    #[test]
    fn rejects_bad_timestamps() {
        assert_eq!(
            parse("[00:01]ok\n[1:75]bad"),
            Err(LrcError::InvalidTimestamp {
                line: 2,
                tag: "1:75".to_string()
            })
        );
        assert!(matches!(
            parse("[00:01.x]bad"),
            Err(LrcError::InvalidTimestamp { line: 1, .. })
        ));
    }

    #[test]
    fn annotation_tags_are_not_timestamps() {
        let parsed = parse("[00:01]hello\n[2x]\n[1st verse]\n[00:03]world").unwrap();
        assert_eq!(times(&parsed), vec![1.0, 3.0]);
        assert_eq!(parsed.lines[1].text, "world");
    }

    #[test]
    fn byte_order_mark_does_not_hide_the_first_line() {
        let parsed = parse("\u{feff}[ti:Song]\n[00:01]hello").unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Song"));

        let parsed = parse("\u{feff}[00:00.00]first\n[00:01]second").unwrap();
        assert_eq!(times(&parsed), vec![0.0, 1.0]);
        assert_eq!(parsed.lines[0].text, "first");
    }

    #[test]
    fn rejects_documents_without_timed_lines() {
        assert_eq!(parse(""), Err(LrcError::NoTimedLines));
        assert_eq!(parse("[ti:Only]\n"), Err(LrcError::NoTimedLines));
    }

    #[test]
    fn written_lrc_parses_back_to_the_same_lines() {
        let seed = seed_lyrics().remove(0);
        let parsed = parse(&to_lrc(&seed)).unwrap();
        assert_eq!(parsed.title.as_deref(), Some(seed.title.as_str()));
        assert_eq!(parsed.artist.as_deref(), Some(seed.artist.as_str()));
        assert_eq!(parsed.lines, seed.lines);
    }
}
