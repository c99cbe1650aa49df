use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use crate::config::SpeechConfig;
use crate::logger;

/// A word to speak, optionally followed by an example sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub word: String,
    pub example: Option<String>,
}

impl Utterance {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            example: None,
        }
    }

    pub fn with_example(mut self, example: Option<String>) -> Self {
        self.example = example;
        self
    }

    /// Word, word again, then the example if there is one.
    pub fn script(&self) -> Vec<&str> {
        let mut parts = vec![self.word.as_str(), self.word.as_str()];
        if let Some(example) = &self.example {
            parts.push(example.as_str());
        }
        parts
    }
}

/// Fire-and-forget speech: callers never wait for playback or learn whether it worked.
pub trait Speaker: Send {
    fn speak(&self, utterance: Utterance);
}

/// Used when speech is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, _utterance: Utterance) {}
}

/// Speaks through an external text-to-speech program such as `say` or `espeak`.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    pause: Duration,
}

impl CommandSpeaker {
    pub fn new(config: &SpeechConfig) -> Self {
        Self {
            program: config.program.clone(),
            pause: config.pause,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, utterance: Utterance) {
        let program = self.program.clone();
        let pause = self.pause;

        let spawned = thread::Builder::new()
            .name("spelling-drill::speech".to_string())
            .spawn(move || {
                for (i, text) in utterance.script().into_iter().enumerate() {
                    if i > 0 {
                        thread::sleep(pause);
                    }
                    let status = Command::new(&program)
                        .arg(text)
                        .stdin(Stdio::null())
                        .stdout(Stdio::null())
                        .stderr(Stdio::null())
                        .status();
                    if let Err(e) = status {
                        logger::warn(&format!("Speech command '{}' failed: {}", program, e));
                        return;
                    }
                }
            });

        if let Err(e) = spawned {
            logger::warn(&format!("Could not start speech thread: {}", e));
        }
    }
}

pub fn speaker_from_config(config: Option<&SpeechConfig>) -> Box<dyn Speaker> {
    match config {
        Some(config) => Box::new(CommandSpeaker::new(config)),
        None => Box::new(SilentSpeaker),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_repeats_word() {
        let utterance = Utterance::new("harbor");
        assert_eq!(utterance.script(), vec!["harbor", "harbor"]);
    }

    #[test]
    fn test_script_appends_example() {
        let utterance =
            Utterance::new("harbor").with_example(Some("Boats rest in the harbor.".to_string()));
        assert_eq!(
            utterance.script(),
            vec!["harbor", "harbor", "Boats rest in the harbor."]
        );
    }

    #[test]
    fn test_missing_program_does_not_panic() {
        let speaker = CommandSpeaker::new(&SpeechConfig {
            program: "definitely-not-a-tts-binary".to_string(),
            pause: Duration::ZERO,
        });
        speaker.speak(Utterance::new("quiet"));
    }

    #[test]
    fn test_speaker_from_config() {
        let silent = speaker_from_config(None);
        silent.speak(Utterance::new("nothing"));
    }
}
