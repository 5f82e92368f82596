//! TUI 渲染模块

use crate::runner::QuizRunner;
use crate::tui::{App, Screen};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// 选项标签 A, B, C ...
pub(crate) fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// 渲染主界面
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // 垂直分割: 标题栏 | 进度 | 主区域 | 底部栏
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Length(3), // 进度
            Constraint::Min(8),    // 主区域
            Constraint::Length(1), // 底部栏
        ])
        .split(area);

    let screen = app.screen();
    let Some(runner) = app.runner.as_ref() else {
        render_loading(app, frame, area);
        return;
    };

    let set = runner.question_set();
    let header = format!(
        " Quizaurus │ {} ({})",
        set.topic, set.difficulty
    );
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        vertical[0],
    );

    render_progress(runner, frame, vertical[1]);

    match screen {
        Screen::Question | Screen::Feedback => render_question(app, runner, frame, vertical[2]),
        Screen::Results => render_results(runner, frame, vertical[2]),
        Screen::Loading => {}
    }

    render_footer(app, screen, runner, frame, vertical[3]);
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let message = if app.loading_message.is_empty() {
        "Generating your quiz..."
    } else {
        app.loading_message.as_str()
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "q: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Quizaurus "));
    frame.render_widget(paragraph, area);
}

fn render_progress(runner: &QuizRunner, frame: &mut Frame, area: Rect) {
    let ratio = runner.progress().clamp(0.0, 1.0);
    let label = match runner.summary() {
        Some(_) => "Complete".to_string(),
        None => format!(
            "Question {} of {}",
            runner.current_index() + 1,
            runner.total_questions()
        ),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_question(app: &App, runner: &QuizRunner, frame: &mut Frame, area: Rect) {
    let question = runner.current_question();
    let selected = runner.selected_answer();
    let showing_feedback = selected.is_some();

    let explanation_height = if showing_feedback { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(question.options.len() as u16 + 2),
            Constraint::Length(explanation_height),
        ])
        .split(area);

    let title = Paragraph::new(question.question.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Question "));
    frame.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (marker, style) = match selected {
                // 反馈页：正确答案绿色，选错的红色
                Some(s) if i == question.correct_index => {
                    let marker = if s == i { "✓" } else { " " };
                    (marker, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                }
                Some(s) if s == i => ("✗", Style::default().fg(Color::Red)),
                Some(_) => (" ", Style::default().fg(Color::DarkGray)),
                None if i == app.cursor => (
                    "›",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                None => (" ", Style::default()),
            };
            ListItem::new(format!("{} {}. {}", marker, option_label(i), option)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Options "));
    frame.render_widget(list, chunks[1]);

    if let Some(selected) = selected {
        let (verdict, color) = if question.is_correct(selected) {
            ("Correct!", Color::Green)
        } else {
            ("Incorrect", Color::Red)
        };
        let mut lines = vec![Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(explanation) = &question.explanation {
            lines.push(Line::from(explanation.as_str()));
        }
        let feedback = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Explanation "));
        frame.render_widget(feedback, chunks[2]);
    }
}

fn render_results(runner: &QuizRunner, frame: &mut Frame, area: Rect) {
    let Some(summary) = runner.summary() else { return };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(area);

    let title = Paragraph::new(summary.encouragement.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(title, chunks[0]);

    let stats = vec![
        Line::from(format!("TOTAL     {}", summary.total_count)),
        Line::from(Span::styled(
            format!("CORRECT   {}", summary.correct_count),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("MISTAKES  {}", runner.mistakes_count()),
            Style::default().fg(Color::Red),
        )),
    ];
    frame.render_widget(
        Paragraph::new(stats).block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Success rate "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(summary.success_rate.clamp(0.0, 1.0))
        .label(summary.percent());
    frame.render_widget(gauge, chunks[2]);
}

fn render_footer(app: &App, screen: Screen, runner: &QuizRunner, frame: &mut Frame, area: Rect) {
    if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(format!(" {}", status)).style(Style::default().fg(Color::Yellow)),
            area,
        );
        return;
    }

    let hint = match screen {
        Screen::Question => " ↑↓/jk: move │ Enter or a-h/1-9: answer │ r: restart │ q: quit".to_string(),
        Screen::Feedback if runner.is_last_question() => {
            " Enter/n: See Results │ r: restart │ q: quit".to_string()
        }
        Screen::Feedback => " Enter/n: Next Question │ r: restart │ q: quit".to_string(),
        Screen::Results => {
            let attempt = runner.attempt();
            let review = if attempt.review_requested { "(sent)" } else { "Review Results" };
            let more = if attempt.more_requested { "(sent)" } else { "More Questions" };
            format!(" r: Start Over │ v: {} │ m: {} │ q: quit", review, more)
        }
        Screen::Loading => " q: quit".to_string(),
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
