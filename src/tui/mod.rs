//! TUI 答题模块

mod app;
mod event;
mod ui;

#[cfg(test)]
mod tests;

pub use app::{init_terminal, restore_terminal, run, App, AppResult, Screen, Tui};
pub use event::{handle_key, poll_event, TuiEvent};
pub use ui::render;
