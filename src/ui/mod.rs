//! Ratatui front-end: the client form on top, the table in the middle and a
//! footer with the last status message and the key hints.

mod app;
mod forms;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
