pub mod config;
pub mod db;
pub mod dictionary;
pub mod error;
pub mod grading;
pub mod logger;
pub mod lookup_worker;
pub mod models;
pub mod selector;
pub mod session;
pub mod speech;
pub mod timer;
pub mod ui;
pub mod utils;
pub mod wordlist;

#[cfg(test)]
mod ui_tests;

// Re-exports for convenience
pub use config::Config;
pub use error::{LookupError, SelectionError, SourceLoadError};
pub use grading::{check, Feedback};
pub use models::{AppState, DrillSession, MenuState, TestOutcome};
pub use selector::{PassState, SessionSelector};
pub use timer::{Clock, StudyTimer};
pub use wordlist::{LoadMode, WordStore};
