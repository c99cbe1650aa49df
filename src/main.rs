use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rusqlite::Connection;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

use spelling_drill::config::{Config, RECENT_SESSIONS_LIMIT, TICK_RATE};
use spelling_drill::db::{self, session as history};
use spelling_drill::dictionary::FreeDictionaryClient;
use spelling_drill::lookup_worker::spawn_lookup_worker;
use spelling_drill::models::{
    AppState, DrillSession, LookupRequest, LookupResponse, MenuAction, MenuState, TestOutcome,
};
use spelling_drill::session::{
    handle_menu_input, handle_quit_confirm_input, handle_study_input, handle_study_ready_input,
    handle_test_input,
};
use spelling_drill::speech::speaker_from_config;
use spelling_drill::wordlist::{deck_name, discover_wordlists, WordStore};
use spelling_drill::{logger, ui};

/// Lookup channel ends kept by the app while no drill holds them.
struct Lookups {
    tx: Sender<LookupRequest>,
    rx: Option<Receiver<LookupResponse>>,
}

struct App {
    config: Config,
    state: AppState,
    menu: MenuState,
    session: Option<DrillSession>,
    outcome: Option<TestOutcome>,
    history: Option<Connection>,
    lookups: Option<Lookups>,
}

impl App {
    fn new(config: Config) -> Self {
        let wordlists = discover_wordlists(&config.wordlist_dir);
        logger::log(&format!(
            "Found {} word lists in {}",
            wordlists.len(),
            config.wordlist_dir.display()
        ));

        let history = if config.history_enabled {
            match db::init_db() {
                Ok(conn) => Some(conn),
                Err(e) => {
                    logger::warn(&format!("Session history unavailable: {}", e));
                    None
                }
            }
        } else {
            None
        };

        let lookups = config.dictionary.as_ref().and_then(|dictionary| {
            let client = match FreeDictionaryClient::new(dictionary) {
                Ok(client) => client,
                Err(e) => {
                    logger::warn(&format!("Dictionary disabled: {}", e));
                    return None;
                }
            };
            let (request_tx, request_rx) = mpsc::channel();
            let (response_tx, response_rx) = mpsc::channel();
            match spawn_lookup_worker(client, response_tx, request_rx) {
                Ok(_) => Some(Lookups {
                    tx: request_tx,
                    rx: Some(response_rx),
                }),
                Err(e) => {
                    logger::warn(&format!("Failed to spawn lookup worker: {}", e));
                    None
                }
            }
        });

        let mut menu = MenuState::new(wordlists, config.pool_size);
        menu.dictionary_enabled = lookups.is_some();
        menu.speech_enabled = config.speech.is_some();

        let mut app = Self {
            config,
            state: AppState::Menu,
            menu,
            session: None,
            outcome: None,
            history,
            lookups,
        };
        app.refresh_sessions();
        app
    }

    fn refresh_sessions(&mut self) {
        if let Some(conn) = &self.history {
            match history::list_recent_sessions(conn, RECENT_SESSIONS_LIMIT) {
                Ok(sessions) => self.menu.sessions = sessions,
                Err(e) => logger::warn(&format!("Failed to list sessions: {}", e)),
            }
        }
    }

    fn open_session(&mut self, quick: bool) {
        let Some(path) = self.menu.selected_wordlist().cloned() else {
            return;
        };

        let store = match WordStore::load(&path, self.menu.load_mode) {
            Ok(store) => store,
            Err(e) => {
                logger::warn(&format!("Failed to load {}: {}", path.display(), e));
                self.menu.error = Some(e.to_string());
                return;
            }
        };

        let deck = deck_name(&path);
        let mut session = DrillSession::new(deck.clone(), store)
            .with_speaker(speaker_from_config(self.config.speech.as_ref()));
        if let Some(lookups) = self.lookups.as_mut()
            && let Some(rx) = lookups.rx.take()
        {
            session = session.with_lookups(lookups.tx.clone(), rx);
        }

        let pool_size = if quick {
            session.store.len()
        } else {
            self.menu.pool_size
        };
        let pool_size = match session.select_pool(pool_size) {
            Ok(n) => n,
            Err(e) => {
                self.menu.error = Some(e.to_string());
                self.session = Some(session);
                self.close_session();
                return;
            }
        };

        if let Some(conn) = &self.history {
            match history::create_session(conn, &deck, pool_size) {
                Ok(id) => {
                    logger::log(&format!("Recorded session {} for {}", id, deck));
                    session.history_id = Some(id);
                }
                Err(e) => logger::warn(&format!("Failed to record session: {}", e)),
            }
        }

        self.menu.error = None;
        self.outcome = None;
        if quick {
            if let Err(e) = session.start_test() {
                self.menu.error = Some(e.to_string());
                self.session = Some(session);
                self.close_session();
                return;
            }
            self.state = AppState::Test;
        } else {
            self.state = AppState::StudyReady;
        }
        self.session = Some(session);
    }

    /// Drops the current drill and takes back the lookup receiver.
    fn close_session(&mut self) {
        if let Some(mut session) = self.session.take()
            && let Some(lookups) = self.lookups.as_mut()
            && let Some(rx) = session.lookup_rx.take()
        {
            lookups.rx = Some(rx);
        }
        self.refresh_sessions();
    }

    fn finish_test(&mut self, outcome: TestOutcome) {
        if let (Some(conn), Some(id)) = (
            &self.history,
            self.session.as_ref().and_then(|s| s.history_id),
        ) {
            match history::record_result(conn, id, outcome.correct_count, outcome.total_count) {
                Ok(()) => match history::get_session(conn, id) {
                    Ok(Some(saved)) => logger::log(&format!(
                        "Saved session {} for {}: {}/{}",
                        saved.id, saved.deck_name, saved.correct_count, saved.total_count
                    )),
                    Ok(None) => logger::warn(&format!("Session {} missing after save", id)),
                    Err(e) => logger::warn(&format!("Failed to read back session {}: {}", id, e)),
                },
                Err(e) => logger::warn(&format!("Failed to save session result: {}", e)),
            }
        }
        self.outcome = Some(outcome);
        self.close_session();
    }

    /// Returns false when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> io::Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(false);
        }

        let previous = self.state;
        match self.state {
            AppState::Menu => match handle_menu_input(&mut self.menu, key) {
                MenuAction::StartStudy => self.open_session(false),
                MenuAction::QuickPractice => self.open_session(true),
                MenuAction::Quit => return Ok(false),
                MenuAction::None => {}
            },
            AppState::StudyReady => {
                if let Some(session) = self.session.as_mut() {
                    handle_study_ready_input(session, key, &mut self.state);
                }
            }
            AppState::Study => {
                if let Some(session) = self.session.as_mut() {
                    handle_study_input(session, key, &mut self.state);
                }
            }
            AppState::Test => {
                if let Some(session) = self.session.as_mut() {
                    handle_test_input(session, key, &mut self.state)?;
                }
            }
            AppState::TestQuitConfirm => {
                let outcome = self
                    .session
                    .as_mut()
                    .and_then(|session| handle_quit_confirm_input(session, key, &mut self.state));
                if let Some(outcome) = outcome {
                    self.finish_test(outcome);
                }
            }
            AppState::Summary => match key.code {
                KeyCode::Char('m') => self.state = AppState::Menu,
                KeyCode::Esc | KeyCode::Char('q') => return Ok(false),
                _ => {}
            },
        }

        if previous != AppState::Menu && self.state == AppState::Menu {
            self.close_session();
        }
        Ok(true)
    }

    fn draw(&self, f: &mut ratatui::Frame) {
        match (self.state, self.session.as_ref()) {
            (AppState::Menu, _) => ui::draw_menu(f, &self.menu),
            (AppState::StudyReady, Some(session)) => ui::draw_study_ready(f, session),
            (AppState::Study, Some(session)) => ui::draw_study(f, session),
            (AppState::Test, Some(session)) => ui::draw_test(f, session),
            (AppState::TestQuitConfirm, _) => ui::draw_quit_confirmation(f),
            (AppState::Summary, _) => {
                if let Some(outcome) = &self.outcome {
                    ui::draw_summary(f, outcome);
                }
            }
            (_, None) => ui::draw_menu(f, &self.menu),
        }
    }
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        if let Some(session) = app.session.as_mut() {
            session.drain_lookup_responses();
        }

        terminal.draw(|f| app.draw(f))?;

        if event::poll(TICK_RATE)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)?
        {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    let config = Config::from_env();
    logger::init(&config.log_path);
    logger::log("Starting spelling drill");

    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("Exiting spelling drill");
    result
}
