//! Ratatui front-end. Each route maps to one `Screen`; overlays such as the
//! removal confirmation and the path prompt live in the app's `Mode` so they
//! can sit on top of any screen.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
