use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::db::session::SessionSummary;
use crate::grading::Feedback;
use crate::selector::SessionSelector;
use crate::speech::{SilentSpeaker, Speaker};
use crate::timer::{Clock, StudyTimer};
use crate::wordlist::{LoadMode, WordStore};

/// Everything one drill needs, owned by the event loop and handed to each handler.
pub struct DrillSession {
    pub deck_name: String,
    pub store: WordStore,
    pub selector: SessionSelector,
    pub timer: StudyTimer,
    pub correct_count: usize,
    pub total_count: usize,
    pub input_buffer: String,
    /// Cursor position in characters, not bytes.
    pub cursor_position: usize,
    pub feedback: Option<Feedback>,
    pub notice: Option<String>,
    pub last_error: Option<String>,
    /// Dictionary results keyed by lowercased word.
    pub definitions: HashMap<String, String>,
    pub pending_lookups: HashSet<String>,
    pub lookup_tx: Option<Sender<LookupRequest>>,
    pub lookup_rx: Option<Receiver<LookupResponse>>,
    pub speaker: Box<dyn Speaker>,
    pub history_id: Option<u64>,
    pub rng: StdRng,
}

impl DrillSession {
    pub fn new(deck_name: impl Into<String>, store: WordStore) -> Self {
        Self {
            deck_name: deck_name.into(),
            store,
            selector: SessionSelector::new(),
            timer: StudyTimer::new(Clock::System),
            correct_count: 0,
            total_count: 0,
            input_buffer: String::new(),
            cursor_position: 0,
            feedback: None,
            notice: None,
            last_error: None,
            definitions: HashMap::new(),
            pending_lookups: HashSet::new(),
            lookup_tx: None,
            lookup_rx: None,
            speaker: Box::new(SilentSpeaker),
            history_id: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_speaker(mut self, speaker: Box<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.timer = StudyTimer::new(clock);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_lookups(mut self, tx: Sender<LookupRequest>, rx: Receiver<LookupResponse>) -> Self {
        self.lookup_tx = Some(tx);
        self.lookup_rx = Some(rx);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    Define { word: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResponse {
    Definition { word: String, definition: String },
}

/// Snapshot of the counters the screens display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub correct_count: usize,
    pub total_count: usize,
    pub pool_size: usize,
    pub drawn_count: usize,
    pub current_word: Option<String>,
    pub feedback: Option<Vec<String>>,
}

impl Progress {
    pub fn accuracy(&self) -> Option<f64> {
        crate::utils::accuracy_percent(self.correct_count, self.total_count)
    }
}

/// Result of a test run, kept after the live counters are reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub deck_name: String,
    pub pool_size: usize,
    pub correct_count: usize,
    pub total_count: usize,
}

/// Menu selections that survive between drills.
#[derive(Debug, Clone)]
pub struct MenuState {
    pub wordlists: Vec<PathBuf>,
    pub selected_file_index: usize,
    pub sessions: Vec<SessionSummary>,
    pub pool_size: usize,
    pub load_mode: LoadMode,
    pub error: Option<String>,
    pub dictionary_enabled: bool,
    pub speech_enabled: bool,
}

impl MenuState {
    pub fn new(wordlists: Vec<PathBuf>, pool_size: usize) -> Self {
        Self {
            wordlists,
            selected_file_index: 0,
            sessions: Vec::new(),
            pool_size: pool_size.max(1),
            load_mode: LoadMode::Auto,
            error: None,
            dictionary_enabled: false,
            speech_enabled: false,
        }
    }

    pub fn selected_wordlist(&self) -> Option<&PathBuf> {
        self.wordlists.get(self.selected_file_index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    StartStudy,
    QuickPractice,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    StudyReady,
    Study,
    Test,
    TestQuitConfirm,
    Summary,
}
