use std::collections::HashMap;
use std::time::Duration;

use crate::config::{LOOKUP_TIMEOUT, PLACEHOLDER_DEFINITION};
use crate::dictionary::DefinitionSource;
use crate::error::LookupError;
use crate::logger;

/// Caching front for a `DefinitionSource`.
///
/// Failed lookups resolve to the placeholder, which is cached like any other
/// result so the same word is never looked up twice in a session.
pub struct Dictionary<S> {
    source: S,
    cache: HashMap<String, String>,
    timeout: Duration,
}

impl<S: DefinitionSource> Dictionary<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: HashMap::new(),
            timeout: LOOKUP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cached(&self, word: &str) -> Option<&str> {
        self.cache.get(&word.trim().to_lowercase()).map(String::as_str)
    }

    /// Returns the definition of `word`, or the placeholder when the source fails.
    pub async fn resolve(&mut self, word: &str) -> String {
        let key = word.trim().to_lowercase();
        if let Some(definition) = self.cache.get(&key) {
            return definition.clone();
        }

        let result = match tokio::time::timeout(self.timeout, self.source.define(&key)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout),
        };

        let definition = match result {
            Ok(definition) => {
                logger::log(&format!("Resolved definition for '{}'", key));
                definition
            }
            Err(e) => {
                logger::warn(&format!("Lookup for '{}' failed: {}", key, e));
                PLACEHOLDER_DEFINITION.to_string()
            }
        };

        self.cache.insert(key, definition.clone());
        definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubSource {
        calls: Arc<AtomicUsize>,
        reply: Option<&'static str>,
        delay: Duration,
    }

    #[async_trait]
    impl DefinitionSource for StubSource {
        async fn define(&self, word: &str) -> Result<String, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match self.reply {
                Some(text) => Ok(format!("{}: {}", word, text)),
                None => Err(LookupError::NoDefinition),
            }
        }
    }

    fn stub(reply: Option<&'static str>, delay: Duration) -> (StubSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            StubSource {
                calls: calls.clone(),
                reply,
                delay,
            },
            calls,
        )
    }

    #[tokio::test]
    async fn test_resolve_uses_lowercase_key_and_caches() {
        let (source, calls) = stub(Some("a small animal"), Duration::ZERO);
        let mut dictionary = Dictionary::new(source);

        assert_eq!(dictionary.resolve("Cat").await, "cat: a small animal");
        assert_eq!(dictionary.resolve(" CAT ").await, "cat: a small animal");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(dictionary.cached("cat"), Some("cat: a small animal"));
    }

    #[tokio::test]
    async fn test_failure_caches_placeholder() {
        let (source, calls) = stub(None, Duration::ZERO);
        let mut dictionary = Dictionary::new(source);

        assert_eq!(dictionary.resolve("qwzx").await, PLACEHOLDER_DEFINITION);
        assert_eq!(dictionary.resolve("qwzx").await, PLACEHOLDER_DEFINITION);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_placeholder() {
        let (source, calls) = stub(Some("too late"), Duration::from_millis(200));
        let mut dictionary = Dictionary::new(source).with_timeout(Duration::from_millis(20));

        assert_eq!(dictionary.resolve("slow").await, PLACEHOLDER_DEFINITION);
        assert_eq!(dictionary.cached("slow"), Some(PLACEHOLDER_DEFINITION));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
