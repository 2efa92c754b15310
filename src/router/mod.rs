//! Path-based navigation. The route table is plain data: an ordered slice of
//! named patterns that `resolve` walks front to back, stopping at the first
//! match. Nothing here touches the lyric store.

mod history;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

pub use history::History;

/// Identifier of the screen a route leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Home,
    LyricDetail,
    ImportLyric,
}

impl RouteName {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Home => "home",
            RouteName::LyricDetail => "lyric-detail",
            RouteName::ImportLyric => "import-lyric",
        }
    }
}

/// A single entry of the navigation table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub name: RouteName,
    pub pattern: &'static str,
}

/// Characters escaped when an id is placed into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b'%').add(b'/').add(b'?');

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        name: RouteName::Home,
        pattern: "/",
    },
    RouteDef {
        name: RouteName::LyricDetail,
        pattern: "/lyric/:id",
    },
    RouteDef {
        name: RouteName::ImportLyric,
        pattern: "/import",
    },
];

/// A resolved destination with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    LyricDetail { id: String },
    ImportLyric,
}

impl View {
    pub fn name(&self) -> RouteName {
        match self {
            View::Home => RouteName::Home,
            View::LyricDetail { .. } => RouteName::LyricDetail,
            View::ImportLyric => RouteName::ImportLyric,
        }
    }

    /// Canonical path for this view, the inverse of `resolve`.
    pub fn path(&self) -> String {
        match self {
            View::Home => "/".to_string(),
            View::LyricDetail { id } => format!("/lyric/{}", utf8_percent_encode(id, SEGMENT)),
            View::ImportLyric => "/import".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No route matches '{path}'.")]
    NotFound { path: String },
}

/// Resolve `path` against `ROUTES`.
pub fn resolve(path: &str) -> Result<View, RouteError> {
    let not_found = || RouteError::NotFound {
        path: path.to_string(),
    };
    let segments = split_path(path).ok_or_else(not_found)?;
    ROUTES
        .iter()
        .find_map(|route| match_pattern(route, &segments))
        .ok_or_else(not_found)
}

/// Drop query and fragment, ignore one trailing slash and split the rest
/// into segments. `/` yields no segments; relative paths yield `None`.
fn split_path(path: &str) -> Option<Vec<&str>> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let rest = path[..end].trim().strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(Vec::new());
    }
    Some(rest.split('/').collect())
}

fn match_pattern(route: &RouteDef, segments: &[&str]) -> Option<View> {
    let pattern: Vec<&str> = route.pattern.split('/').filter(|s| !s.is_empty()).collect();
    if pattern.len() != segments.len() {
        return None;
    }

    let mut id = None;
    for (expected, actual) in pattern.iter().zip(segments) {
        if let Some(param) = expected.strip_prefix(':') {
            if actual.is_empty() {
                return None;
            }
            if param == "id" {
                id = Some(percent_decode_str(actual).decode_utf8_lossy().into_owned());
            }
        } else if !expected.eq_ignore_ascii_case(actual) {
            return None;
        }
    }

    match route.name {
        RouteName::Home => Some(View::Home),
        RouteName::ImportLyric => Some(View::ImportLyric),
        RouteName::LyricDetail => id.map(|id| View::LyricDetail { id }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> View {
        View::LyricDetail { id: id.to_string() }
    }

    #[test]
    fn resolves_the_three_routes() {
        assert_eq!(resolve("/"), Ok(View::Home));
        assert_eq!(resolve("/lyric/42"), Ok(detail("42")));
        assert_eq!(resolve("/import"), Ok(View::ImportLyric));
    }

    #[test]
    fn tolerates_trailing_slash_case_and_query() {
        assert_eq!(resolve("/import/"), Ok(View::ImportLyric));
        assert_eq!(resolve("/IMPORT"), Ok(View::ImportLyric));
        assert_eq!(resolve("/lyric/7?autoplay=1#top"), Ok(detail("7")));
        assert_eq!(resolve("/?tab=all"), Ok(View::Home));
    }

    #[test]
    fn decodes_escaped_ids() {
        assert_eq!(resolve("/lyric/a%20b"), Ok(detail("a b")));
        assert_eq!(resolve("/lyric/100%"), Ok(detail("100%")));
        assert_eq!(resolve("/lyric/%E7%A4%BA"), Ok(detail("示")));
    }

    #[test]
    fn unmatched_paths_report_not_found() {
        for path in ["/lyric", "/lyric/", "/lyric/1/edit", "/settings", "", "import"] {
            assert_eq!(
                resolve(path),
                Err(RouteError::NotFound {
                    path: path.to_string()
                }),
                "{path:?} should not match"
            );
        }
    }

    #[test]
    fn view_paths_round_trip_through_resolve() {
        for view in [View::Home, View::ImportLyric, detail("1"), detail("a/b c")] {
            assert_eq!(resolve(&view.path()), Ok(view.clone()));
        }
        assert_eq!(detail("a/b c").path(), "/lyric/a%2Fb%20c");
        assert_eq!(detail("示").path(), "/lyric/%E7%A4%BA");
    }

    #[test]
    fn route_names_follow_the_table() {
        let names: Vec<&str> = ROUTES.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["home", "lyric-detail", "import-lyric"]);
        assert_eq!(detail("3").name(), RouteName::LyricDetail);
    }
}
