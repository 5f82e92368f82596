//! 事件处理模块

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::tui::{App, Screen};

/// TUI 事件
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Tick,
}

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<TuiEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            // Windows 上会同时收到 Release
            if key.kind == KeyEventKind::Press {
                return Ok(Some(TuiEvent::Key(key)));
            }
        }
        return Ok(None);
    }
    Ok(Some(TuiEvent::Tick))
}

/// 选项快捷键：1-9 或 a-h
fn option_index(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c @ '1'..='9') => Some(c as usize - '1' as usize),
        KeyCode::Char(c @ 'a'..='h') => Some(c as usize - 'a' as usize),
        _ => None,
    }
}

/// 处理按键事件
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.quit();
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit();
            return;
        }
        _ => {}
    }

    match app.screen() {
        Screen::Loading => {}
        Screen::Question => handle_question_key(app, key),
        Screen::Feedback => handle_feedback_key(app, key),
        Screen::Results => handle_results_key(app, key),
    }
}

fn handle_question_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_option(),
        KeyCode::Char('k') | KeyCode::Up => app.prev_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Char('r') => app.restart(),
        code => {
            if let Some(index) = option_index(code) {
                app.select_option(index);
            }
        }
    }
}

fn handle_feedback_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => app.advance(),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.restart(),
        KeyCode::Char('v') => app.review(),
        KeyCode::Char('m') => app.more_questions(),
        _ => {}
    }
}
