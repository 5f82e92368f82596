//! TUI 应用状态和主循环

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;

use crate::runner::{QuizRunner, QuizState};
use crate::tui::event::{handle_key, poll_event, TuiEvent};

pub type AppResult<T> = Result<T>;
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// 当前显示的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// 还没有题目
    Loading,
    Question,
    Feedback,
    Results,
}

/// TUI 应用状态
pub struct App {
    pub runner: Option<QuizRunner>,
    /// Loading 页显示的文字
    pub loading_message: String,
    /// 问题页高亮的选项
    pub cursor: usize,
    /// 底部状态行（最近一次操作的提示）
    pub status: Option<String>,
    /// 是否退出
    pub should_quit: bool,
}

impl App {
    pub fn new(runner: QuizRunner) -> Self {
        Self {
            runner: Some(runner),
            loading_message: String::new(),
            cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    /// 没有可用题目时只显示 loading 页
    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            runner: None,
            loading_message: message.into(),
            cursor: 0,
            status: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.runner.as_ref().map(|r| r.state()) {
            None => Screen::Loading,
            Some(QuizState::AwaitingAnswer) => Screen::Question,
            Some(QuizState::ShowingFeedback) => Screen::Feedback,
            Some(QuizState::ShowingResults) => Screen::Results,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_option(&mut self) {
        if let Some(runner) = self.runner.as_ref() {
            if runner.state() == QuizState::AwaitingAnswer {
                let count = runner.current_question().options.len();
                self.cursor = (self.cursor + 1) % count;
            }
        }
    }

    pub fn prev_option(&mut self) {
        if let Some(runner) = self.runner.as_ref() {
            if runner.state() == QuizState::AwaitingAnswer {
                let count = runner.current_question().options.len();
                self.cursor = (self.cursor + count - 1) % count;
            }
        }
    }

    /// 选择选项并提交
    pub fn select_option(&mut self, index: usize) {
        let Some(runner) = self.runner.as_mut() else { return };
        match runner.submit_answer(index) {
            Ok(Some(_)) => {
                self.cursor = index;
                self.status = None;
            }
            Ok(None) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Enter：问题页提交高亮选项，反馈页进入下一题
    pub fn confirm(&mut self) {
        match self.screen() {
            Screen::Question => self.select_option(self.cursor),
            Screen::Feedback => self.advance(),
            Screen::Loading | Screen::Results => {}
        }
    }

    pub fn advance(&mut self) {
        let Some(runner) = self.runner.as_mut() else { return };
        match runner.advance() {
            Ok(_) => {
                self.cursor = 0;
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn restart(&mut self) {
        if let Some(runner) = self.runner.as_mut() {
            runner.restart();
            self.cursor = 0;
            self.status = None;
        }
    }

    pub fn review(&mut self) {
        let Some(runner) = self.runner.as_mut() else { return };
        self.status = Some(match runner.request_review() {
            Ok(()) => "Review requested".to_string(),
            Err(e) => e.to_string(),
        });
    }

    pub fn more_questions(&mut self) {
        let Some(runner) = self.runner.as_mut() else { return };
        self.status = Some(match runner.request_more_questions() {
            Ok(()) => "New quiz requested".to_string(),
            Err(e) => e.to_string(),
        });
    }
}

/// 进入 raw mode 和 alternate screen
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

/// 恢复终端
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// 主循环
pub fn run(terminal: &mut Tui, app: &mut App, tick: Duration) -> AppResult<()> {
    while !app.should_quit {
        terminal.draw(|frame| crate::tui::render(app, frame))?;

        if let Some(TuiEvent::Key(key)) = poll_event(tick)? {
            handle_key(app, key);
        }
    }
    Ok(())
}
