use crate::error::SelectionError;
use crate::grading::{check, Feedback};
use crate::logger;
use crate::models::{
    AppState, DrillSession, LookupRequest, LookupResponse, MenuAction, MenuState, Progress,
    TestOutcome,
};
use crate::speech::Utterance;
use crate::utils::byte_index;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io;

pub const PASS_RESTART_NOTICE: &str = "All words have been used once. Starting over...";

impl DrillSession {
    /// Samples the session pool and forgets any previous progress.
    pub fn select_pool(&mut self, n: usize) -> Result<usize, SelectionError> {
        if self.store.is_empty() {
            return Err(SelectionError::EmptySelection);
        }
        self.selector.select_pool(self.store.words(), n, &mut self.rng);
        self.reset_counters();
        self.clear_turn();
        self.notice = None;
        Ok(self.selector.pool_size())
    }

    pub fn start_study(&mut self) {
        self.timer.start();
        let missing: Vec<String> = self
            .selector
            .pool()
            .iter()
            .filter(|word| self.store.meaning(word).is_none())
            .cloned()
            .collect();
        for word in missing {
            self.request_lookup(&word);
        }
        logger::log(&format!(
            "Study phase started for {} words from {}",
            self.selector.pool_size(),
            self.deck_name
        ));
    }

    /// The test unlocks only after a study phase has run its full length.
    pub fn can_start_test(&self) -> bool {
        self.timer.is_started() && self.timer.is_elapsed()
    }

    /// Begins a test pass over the pool and draws the first word.
    pub fn start_test(&mut self) -> Result<(), SelectionError> {
        self.reset_counters();
        self.selector.restart();
        self.next_word().map(|_| ())
    }

    pub fn next_word(&mut self) -> Result<String, SelectionError> {
        let passes_before = self.selector.completed_passes();
        let word = self.selector.next(&mut self.rng)?.to_string();

        self.notice = (self.selector.completed_passes() > passes_before)
            .then(|| PASS_RESTART_NOTICE.to_string());
        self.clear_turn();
        self.speak_current();
        Ok(word)
    }

    pub fn speak_current(&self) {
        if let Some(word) = self.selector.current() {
            let example = self.store.example(word).map(str::to_string);
            self.speaker.speak(Utterance::new(word).with_example(example));
        }
    }

    /// Grades the typed spelling. Blank input and repeat submissions are ignored.
    pub fn submit_answer(&mut self) -> Option<bool> {
        if self.feedback.is_some() || self.input_buffer.trim().is_empty() {
            return None;
        }

        let attempt = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;
        let expected = self.selector.current().unwrap_or_default().to_string();
        let correct = check(&expected, &attempt);

        self.total_count += 1;
        if correct {
            self.correct_count += 1;
        }

        let entry = self.store.entry(&expected);
        if !expected.is_empty() && entry.meaning.is_none() {
            self.request_lookup(&expected);
        }

        self.feedback = Some(Feedback {
            correct,
            attempt,
            meaning: entry
                .meaning
                .or_else(|| self.definitions.get(&expected.to_lowercase()).cloned()),
            example: entry.example,
            expected: entry.word,
        });
        Some(correct)
    }

    /// Meaning from the word list, falling back to a dictionary definition.
    pub fn meaning_for(&self, word: &str) -> Option<String> {
        self.store
            .meaning(word)
            .map(str::to_string)
            .or_else(|| self.definitions.get(&word.to_lowercase()).cloned())
    }

    /// Ends the test: returns the final counters and resets the live ones.
    pub fn stop(&mut self) -> TestOutcome {
        let outcome = TestOutcome {
            deck_name: self.deck_name.clone(),
            pool_size: self.selector.pool_size(),
            correct_count: self.correct_count,
            total_count: self.total_count,
        };
        self.reset_counters();
        self.selector.restart();
        self.clear_turn();
        self.notice = None;
        logger::log(&format!(
            "Test stopped: {}/{} correct on {}",
            outcome.correct_count, outcome.total_count, outcome.deck_name
        ));
        outcome
    }

    pub fn progress(&self) -> Progress {
        Progress {
            correct_count: self.correct_count,
            total_count: self.total_count,
            pool_size: self.selector.pool_size(),
            drawn_count: self.selector.drawn_count(),
            current_word: self.selector.current().map(str::to_string),
            feedback: self.feedback.as_ref().map(Feedback::lines),
        }
    }

    pub fn request_lookup(&mut self, word: &str) {
        let key = word.trim().to_lowercase();
        if key.is_empty() || self.definitions.contains_key(&key) || self.pending_lookups.contains(&key) {
            return;
        }
        let Some(tx) = &self.lookup_tx else {
            return;
        };

        if tx.send(LookupRequest::Define { word: key.clone() }).is_ok() {
            logger::log(&format!("Requested definition for '{}'", key));
            self.pending_lookups.insert(key);
        } else {
            logger::warn("Lookup worker is gone, disabling lookups");
            self.lookup_tx = None;
        }
    }

    pub fn process_lookup_response(&mut self, response: LookupResponse) {
        match response {
            LookupResponse::Definition { word, definition } => {
                let key = word.to_lowercase();
                self.pending_lookups.remove(&key);
                if let Some(feedback) = self.feedback.as_mut()
                    && feedback.meaning.is_none()
                    && feedback.expected.to_lowercase() == key
                {
                    feedback.meaning = Some(definition.clone());
                }
                self.definitions.insert(key, definition);
            }
        }
    }

    /// Applies every response the worker has delivered so far.
    pub fn drain_lookup_responses(&mut self) -> usize {
        let responses: Vec<LookupResponse> = match &self.lookup_rx {
            Some(rx) => rx.try_iter().collect(),
            None => return 0,
        };
        let count = responses.len();
        for response in responses {
            self.process_lookup_response(response);
        }
        count
    }

    fn reset_counters(&mut self) {
        self.correct_count = 0;
        self.total_count = 0;
    }

    fn clear_turn(&mut self) {
        self.feedback = None;
        self.last_error = None;
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
}

/// Maximum pool size offered on the menu; larger lists are drilled with quick practice.
pub const MAX_POOL_SIZE: usize = 500;

pub fn handle_menu_input(menu: &mut MenuState, key: KeyEvent) -> MenuAction {
    match key.code {
        KeyCode::Up => {
            menu.selected_file_index = menu.selected_file_index.saturating_sub(1);
            MenuAction::None
        }
        KeyCode::Down => {
            if menu.selected_file_index < menu.wordlists.len().saturating_sub(1) {
                menu.selected_file_index += 1;
            }
            MenuAction::None
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
            menu.pool_size = (menu.pool_size + 1).min(MAX_POOL_SIZE);
            MenuAction::None
        }
        KeyCode::Char('-') | KeyCode::Left => {
            menu.pool_size = menu.pool_size.saturating_sub(1).max(1);
            MenuAction::None
        }
        KeyCode::Char('m') => {
            menu.load_mode = menu.load_mode.next();
            MenuAction::None
        }
        KeyCode::Enter if menu.selected_wordlist().is_some() => MenuAction::StartStudy,
        KeyCode::Char('p') if menu.selected_wordlist().is_some() => MenuAction::QuickPractice,
        KeyCode::Char('q') | KeyCode::Esc => MenuAction::Quit,
        _ => MenuAction::None,
    }
}

pub fn handle_study_ready_input(session: &mut DrillSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Enter => {
            session.start_study();
            *app_state = AppState::Study;
        }
        KeyCode::Esc => *app_state = AppState::Menu,
        _ => {}
    }
}

pub fn handle_study_input(session: &mut DrillSession, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Enter if session.can_start_test() => match session.start_test() {
            Ok(()) => *app_state = AppState::Test,
            Err(e) => session.last_error = Some(e.to_string()),
        },
        KeyCode::Esc => *app_state = AppState::Menu,
        _ => {}
    }
}

pub fn handle_test_input(
    session: &mut DrillSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> io::Result<()> {
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        session.speak_current();
        return Ok(());
    }

    if session.feedback.is_none() {
        match key.code {
            KeyCode::Esc => {
                *app_state = AppState::TestQuitConfirm;
            }
            KeyCode::Enter => {
                session.submit_answer();
            }
            KeyCode::Left => {
                session.cursor_position = session.cursor_position.saturating_sub(1);
            }
            KeyCode::Right => {
                if session.cursor_position < session.input_buffer.chars().count() {
                    session.cursor_position += 1;
                }
            }
            KeyCode::Backspace => {
                if session.cursor_position > 0 {
                    let at = byte_index(&session.input_buffer, session.cursor_position - 1);
                    session.input_buffer.remove(at);
                    session.cursor_position -= 1;
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = byte_index(&session.input_buffer, session.cursor_position);
                session.input_buffer.insert(at, c);
                session.cursor_position += 1;
            }
            _ => {}
        }
    } else {
        match key.code {
            KeyCode::Esc => {
                *app_state = AppState::TestQuitConfirm;
            }
            KeyCode::Enter => {
                if let Err(e) = session.next_word() {
                    session.last_error = Some(e.to_string());
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Returns the outcome when the user confirms stopping the test.
pub fn handle_quit_confirm_input(
    session: &mut DrillSession,
    key: KeyEvent,
    app_state: &mut AppState,
) -> Option<TestOutcome> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            *app_state = AppState::Summary;
            Some(session.stop())
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            *app_state = AppState::Test;
            None
        }
        _ => None,
    }
}
