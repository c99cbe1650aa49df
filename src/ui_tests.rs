#[cfg(test)]
mod ui_render_tests {
    use std::path::PathBuf;

    use chrono::{DateTime, Duration, Utc};
    use ratatui::{backend::TestBackend, Terminal};

    use crate::config::{NO_MEANING, PLACEHOLDER_DEFINITION};
    use crate::db::session::SessionSummary;
    use crate::models::{DrillSession, MenuState, TestOutcome};
    use crate::timer::Clock;
    use crate::ui::{
        draw_menu, draw_quit_confirmation, draw_study, draw_study_ready, draw_summary, draw_test,
    };
    use crate::wordlist::{parse_delimited, LoadMode, WordStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 40)).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session(csv: &str) -> DrillSession {
        let store = WordStore::from_table(&parse_delimited(csv, ','), LoadMode::Auto).unwrap();
        let mut session = DrillSession::new("animals", store)
            .with_clock(Clock::Fixed(
                DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            ))
            .with_rng(StdRng::seed_from_u64(3));
        session.select_pool(10).unwrap();
        session
    }

    fn animals() -> DrillSession {
        session("word,meaning,example\ncat,a small feline,The cat sleeps.\ndog,a loyal pet,\n")
    }

    #[test]
    fn test_menu_lists_wordlists_and_settings() {
        let mut menu = MenuState::new(
            vec![PathBuf::from("wordlists/level234.csv"), PathBuf::from("wordlists/animals.tsv")],
            7,
        );
        menu.load_mode = LoadMode::Flat;
        menu.dictionary_enabled = true;
        menu.sessions.push(SessionSummary {
            id: 1,
            deck_name: "level234".to_string(),
            started_at: 0,
            completed_at: Some(10),
            pool_size: 7,
            correct_count: 5,
            total_count: 6,
        });

        let mut terminal = terminal();
        terminal.draw(|f| draw_menu(f, &menu)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("level234"));
        assert!(text.contains("animals"));
        assert!(text.contains("Pool size: 7"));
        assert!(text.contains("Load mode: Words only"));
        assert!(text.contains("Dictionary: On  Speech: Off"));
        assert!(text.contains("level234 (5/6)"));
    }

    #[test]
    fn test_menu_shows_load_error() {
        let mut menu = MenuState::new(Vec::new(), 10);
        menu.error = Some("Word list has no usable words".to_string());

        let mut terminal = terminal();
        terminal.draw(|f| draw_menu(f, &menu)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("No word lists found"));
        assert!(text.contains("Word list has no usable words"));
    }

    #[test]
    fn test_study_ready_screen() {
        let session = animals();
        let mut terminal = terminal();
        terminal.draw(|f| draw_study_ready(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("2 words selected"));
        assert!(text.contains("5 minutes"));
    }

    #[test]
    fn test_study_screen_counts_down_then_unlocks() {
        let mut session = animals();
        session.start_study();

        let mut terminal = terminal();
        terminal.draw(|f| draw_study(f, &session)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Time remaining: 05:00"));
        assert!(text.contains("Meaning: a small feline"));
        assert!(text.contains("Example: The cat sleeps."));
        assert!(!text.contains("Start Test"));

        session.timer.clock_mut().advance(Duration::seconds(300));
        terminal.draw(|f| draw_study(f, &session)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Press Enter to start the test"));
        assert!(text.contains("Start Test"));
    }

    #[test]
    fn test_study_screen_uses_dictionary_definition() {
        let mut session = session("word\nzephyr\n");
        session.start_study();

        let mut terminal = terminal();
        terminal.draw(|f| draw_study(f, &session)).unwrap();
        assert!(screen_text(&terminal).contains(NO_MEANING));

        session
            .definitions
            .insert("zephyr".to_string(), "a gentle breeze".to_string());
        terminal.draw(|f| draw_study(f, &session)).unwrap();
        assert!(screen_text(&terminal).contains("Meaning: a gentle breeze"));
    }

    #[test]
    fn test_test_screen_shows_prompt_and_input() {
        let mut session = animals();
        session.start_test().unwrap();
        session.input_buffer = "kat".to_string();
        session.cursor_position = 3;

        let mut terminal = terminal();
        terminal.draw(|f| draw_test(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Spell the word you hear"));
        assert!(text.contains("kat"));
        assert!(text.contains("Score 0/0"));
        assert!(text.contains("Submit"));
    }

    #[test]
    fn test_test_screen_shows_feedback() {
        let mut session = session("word\nzephyr\n");
        session.start_test().unwrap();
        session.input_buffer = "zefir".to_string();
        session.submit_answer();
        session.definitions.clear();
        if let Some(feedback) = session.feedback.as_mut() {
            feedback.meaning = Some(PLACEHOLDER_DEFINITION.to_string());
        }

        let mut terminal = terminal();
        terminal.draw(|f| draw_test(f, &session)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Incorrect. Your spelling: zefir / Correct spelling: zephyr"));
        assert!(text.contains(PLACEHOLDER_DEFINITION));
        assert!(text.contains("Score 0/1 (0%)"));
        assert!(text.contains("Next Word"));
    }

    #[test]
    fn test_quit_confirmation_screen() {
        let mut terminal = terminal();
        terminal.draw(draw_quit_confirmation).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Stop the test and see your score?"));
        assert!(text.contains("Yes (Show Score)"));
    }

    #[test]
    fn test_summary_screen() {
        let outcome = TestOutcome {
            deck_name: "animals".to_string(),
            pool_size: 3,
            correct_count: 3,
            total_count: 4,
        };

        let mut terminal = terminal();
        terminal.draw(|f| draw_summary(f, &outcome)).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Test Summary - animals"));
        assert!(text.contains("Score: 3/4"));
        assert!(text.contains("Accuracy: 75.0%"));
    }

    #[test]
    fn test_summary_with_no_attempts() {
        let outcome = TestOutcome {
            deck_name: "animals".to_string(),
            pool_size: 3,
            correct_count: 0,
            total_count: 0,
        };

        let mut terminal = terminal();
        terminal.draw(|f| draw_summary(f, &outcome)).unwrap();
        assert!(screen_text(&terminal).contains("No words attempted"));
    }
}
