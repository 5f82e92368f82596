#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::host::channel::testing::RecordingChannel;
    use crate::host::HostEvent;
    use crate::quiz::{Difficulty, Question, QuestionSet};
    use crate::runner::QuizRunner;
    use crate::tui::{handle_key, render, App, Screen};

    fn question(text: &str, correct_index: usize) -> Question {
        Question {
            question: text.to_string(),
            options: vec!["A1".into(), "B1".into(), "C1".into(), "D1".into()],
            correct_index,
            explanation: Some(format!("{} explained", text)),
        }
    }

    fn app_with(channel: RecordingChannel) -> App {
        let set = QuestionSet {
            topic: "rust".to_string(),
            difficulty: Difficulty::Easy,
            questions: vec![question("Q1", 0), question("Q2", 2)],
        };
        App::new(QuizRunner::new(set, Box::new(channel)).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app_with(RecordingChannel::default());
        app.prev_option();
        assert_eq!(app.cursor, 3);
        app.next_option();
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_full_pass_via_keys() {
        // Given: 两道题
        let channel = RecordingChannel::default();
        let mut app = app_with(channel.clone());

        // When: 第一题选 a（正确），第二题选 b（错误）
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.screen(), Screen::Feedback);
        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Char('2')));
        handle_key(&mut app, key(KeyCode::Char('n')));

        // Then: 结果页 1/2
        assert_eq!(app.screen(), Screen::Results);
        let summary = app.runner.as_ref().unwrap().summary().unwrap().clone();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.encouragement, "Not bad!");
        assert_eq!(
            channel.events().last(),
            Some(&HostEvent::WidgetState {
                user_answers: vec![0, 1]
            })
        );
    }

    #[test]
    fn test_follow_up_sent_once() {
        let channel = RecordingChannel::default();
        let mut app = app_with(channel.clone());
        for code in [KeyCode::Enter, KeyCode::Enter, KeyCode::Enter, KeyCode::Enter] {
            handle_key(&mut app, key(code));
        }
        assert_eq!(app.screen(), Screen::Results);

        handle_key(&mut app, key(KeyCode::Char('m')));
        handle_key(&mut app, key(KeyCode::Char('m')));

        let follow_ups = channel
            .events()
            .into_iter()
            .filter(|e| matches!(e, HostEvent::FollowUp { .. }))
            .count();
        assert_eq!(follow_ups, 1);
        assert!(app.status.as_deref().unwrap().contains("already"));
    }

    #[test]
    fn test_restart_from_results() {
        let mut app = app_with(RecordingChannel::default());
        for code in [KeyCode::Enter, KeyCode::Enter, KeyCode::Enter, KeyCode::Enter] {
            handle_key(&mut app, key(code));
        }
        handle_key(&mut app, key(KeyCode::Char('r')));

        assert_eq!(app.screen(), Screen::Question);
        assert!(app.runner.as_ref().unwrap().answers().is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(RecordingChannel::default());
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::loading("waiting");
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_screens() {
        let mut app = App::loading("");
        assert!(draw(&mut app).contains("Generating your quiz"));

        let mut app = app_with(RecordingChannel::default());
        let question_screen = draw(&mut app);
        assert!(question_screen.contains("Q1"));
        assert!(question_screen.contains("Question 1 of 2"));

        handle_key(&mut app, key(KeyCode::Char('b')));
        let feedback_screen = draw(&mut app);
        assert!(feedback_screen.contains("Incorrect"));
        assert!(feedback_screen.contains("Q1 explained"));

        handle_key(&mut app, key(KeyCode::Enter));
        handle_key(&mut app, key(KeyCode::Char('c')));
        handle_key(&mut app, key(KeyCode::Enter));
        let results_screen = draw(&mut app);
        assert!(results_screen.contains("Not bad!"));
        assert!(results_screen.contains("50%"));
    }
}
