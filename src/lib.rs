//! Core library surface for the Simple Lyric terminal viewer.
//!
//! The binary only glues these pieces together: the lyric store, the route
//! table that picks a screen for a path, the LRC codec used by imports and
//! the Ratatui front-end.
pub mod config;
pub mod logging;
pub mod lrc;
pub mod models;
pub mod playback;
pub mod router;
pub mod store;
pub mod ui;

/// The domain types every other layer passes around.
pub use models::{Lyric, LyricLine};

/// Navigation and state, re-exported for the binary and integration tests.
pub use router::{resolve, History, RouteError, View};
pub use store::{LyricStore, StoreEvent};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
