use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::dictionary::{DefinitionSource, Dictionary};
use crate::logger;
use crate::models::{LookupRequest, LookupResponse};

/// Runs dictionary lookups off the UI thread until the request channel closes.
pub fn spawn_lookup_worker<S>(
    source: S,
    responses: Sender<LookupResponse>,
    requests: Receiver<LookupRequest>,
) -> io::Result<thread::JoinHandle<()>>
where
    S: DefinitionSource + 'static,
{
    thread::Builder::new()
        .name("spelling-drill::lookup_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::warn(&format!("Lookup worker could not start a runtime: {}", e));
                    return;
                }
            };
            let mut dictionary = Dictionary::new(source);

            while let Ok(request) = requests.recv() {
                match request {
                    LookupRequest::Define { word } => {
                        if dictionary.cached(&word).is_some() {
                            logger::log(&format!("Serving cached definition for '{}'", word));
                        } else {
                            logger::log(&format!("Worker received lookup for '{}'", word));
                        }
                        let definition = rt.block_on(dictionary.resolve(&word));
                        if responses
                            .send(LookupResponse::Definition { word, definition })
                            .is_err()
                        {
                            break;
                        }
                    }
                }
            }

            logger::log("Lookup worker channel disconnected, exiting");
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PLACEHOLDER_DEFINITION;
    use crate::error::LookupError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedSource;

    #[async_trait]
    impl DefinitionSource for FixedSource {
        async fn define(&self, word: &str) -> Result<String, LookupError> {
            if word == "cat" {
                Ok("a small animal".to_string())
            } else {
                Err(LookupError::NoDefinition)
            }
        }
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl DefinitionSource for CountingSource {
        async fn define(&self, word: &str) -> Result<String, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("meaning of {}", word))
        }
    }

    #[test]
    fn test_worker_serves_repeat_requests_from_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let source = CountingSource {
            calls: calls.clone(),
        };
        let handle = spawn_lookup_worker(source, resp_tx, req_rx).unwrap();

        for _ in 0..2 {
            req_tx
                .send(LookupRequest::Define {
                    word: "river".to_string(),
                })
                .unwrap();
        }
        for _ in 0..2 {
            let response = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(
                response,
                LookupResponse::Definition {
                    word: "river".to_string(),
                    definition: "meaning of river".to_string()
                }
            );
        }

        drop(req_tx);
        handle.join().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_worker_answers_requests() {
        let (req_tx, req_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let handle = spawn_lookup_worker(FixedSource, resp_tx, req_rx).unwrap();

        req_tx
            .send(LookupRequest::Define {
                word: "cat".to_string(),
            })
            .unwrap();
        req_tx
            .send(LookupRequest::Define {
                word: "zzz".to_string(),
            })
            .unwrap();

        let first = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = resp_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(
            first,
            LookupResponse::Definition {
                word: "cat".to_string(),
                definition: "a small animal".to_string()
            }
        );
        assert_eq!(
            second,
            LookupResponse::Definition {
                word: "zzz".to_string(),
                definition: PLACEHOLDER_DEFINITION.to_string()
            }
        );

        drop(req_tx);
        handle.join().unwrap();
    }
}
