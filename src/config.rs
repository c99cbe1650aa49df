use std::path::PathBuf;
use std::time::Duration;

/// Length of the study phase before the test can start (5 minutes).
pub const STUDY_DURATION_SECS: i64 = 5 * 60;

/// Upper bound for a single dictionary request.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool size offered on the menu when nothing else is configured.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Pause between the two spoken repetitions of a word.
pub const REPEAT_PAUSE: Duration = Duration::from_millis(1500);

/// How often the event loop wakes up to refresh the countdown and drain lookups.
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// Number of past sessions shown on the menu.
pub const RECENT_SESSIONS_LIMIT: usize = 20;

pub const PLACEHOLDER_DEFINITION: &str = "No definition available";
pub const NO_MEANING: &str = "No meaning available";
pub const NO_EXAMPLE: &str = "No example available";

pub const DEFAULT_WORDLIST_DIR: &str = "wordlists";
pub const DEFAULT_LOG_FILE: &str = "spelldrill.log";
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechConfig {
    pub program: String,
    pub pause: Duration,
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub wordlist_dir: PathBuf,
    pub log_path: PathBuf,
    pub pool_size: usize,
    pub dictionary: Option<DictionaryConfig>,
    pub speech: Option<SpeechConfig>,
    pub history_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let wordlist_dir = lookup("SPELLDRILL_WORDLIST_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WORDLIST_DIR.to_string());
        let log_path = lookup("SPELLDRILL_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
        let pool_size = lookup("SPELLDRILL_POOL_SIZE")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_POOL_SIZE);

        let dictionary = if is_off(lookup("SPELLDRILL_DICTIONARY")) {
            None
        } else {
            let base_url = lookup("SPELLDRILL_DICTIONARY_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string());
            Some(DictionaryConfig { base_url })
        };

        let speech = match lookup("SPELLDRILL_TTS") {
            Some(v) if v.trim().eq_ignore_ascii_case("off") => None,
            Some(v) if !v.trim().is_empty() => Some(SpeechConfig {
                program: v.trim().to_string(),
                pause: REPEAT_PAUSE,
            }),
            _ => Some(SpeechConfig {
                program: default_speech_program().to_string(),
                pause: REPEAT_PAUSE,
            }),
        };

        Self {
            wordlist_dir: PathBuf::from(wordlist_dir),
            log_path: PathBuf::from(log_path),
            pool_size,
            dictionary,
            speech,
            history_enabled: !is_off(lookup("SPELLDRILL_HISTORY")),
        }
    }
}

fn is_off(value: Option<String>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("off"))
}

fn default_speech_program() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak"
    }
}
