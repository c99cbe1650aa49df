use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SelectionError;
use crate::logger;

/// Whether the current pass still has undrawn words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Active,
    /// Every pool member has been drawn; the next draw begins a new pass.
    Exhausted,
}

/// Draws words from a fixed pool without repeats until every pool member
/// has been drawn once; the next draw then starts a fresh pass.
#[derive(Debug, Clone, Default)]
pub struct SessionSelector {
    pool: Vec<String>,
    drawn: HashSet<String>,
    current: Option<String>,
    state: PassState,
    completed_passes: usize,
}

impl SessionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples up to `n` distinct words without replacement and starts a new pass.
    ///
    /// Identical strings count as one word, so the pool never holds duplicates.
    pub fn select_pool<R: Rng + ?Sized>(&mut self, words: &[String], n: usize, rng: &mut R) -> &[String] {
        let mut seen = HashSet::new();
        let distinct: Vec<&String> = words
            .iter()
            .filter(|word| seen.insert(word.as_str()))
            .collect();
        let n = n.min(distinct.len());
        self.pool = distinct
            .choose_multiple(rng, n)
            .map(|word| (*word).clone())
            .collect();
        self.restart();
        self.completed_passes = 0;
        logger::log(&format!(
            "Selected pool of {} out of {} distinct words",
            n,
            distinct.len()
        ));
        &self.pool
    }

    /// Forgets the draw history without changing the pool.
    pub fn restart(&mut self) {
        self.drawn.clear();
        self.current = None;
        self.state = PassState::Active;
    }

    /// Draws an undrawn pool word, starting a new pass first when the last one is exhausted.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&str, SelectionError> {
        if self.pool.is_empty() {
            return Err(SelectionError::EmptySelection);
        }

        if self.state == PassState::Exhausted || self.covers_pool() {
            self.drawn.clear();
            self.state = PassState::Active;
            self.completed_passes += 1;
            logger::log("All pool words drawn once, starting a new pass");
        }

        let available: Vec<&String> = self
            .pool
            .iter()
            .filter(|word| !self.drawn.contains(*word))
            .collect();
        let word = available
            .choose(rng)
            .map(|word| (*word).clone())
            .ok_or(SelectionError::EmptySelection)?;

        self.drawn.insert(word.clone());
        if self.covers_pool() {
            self.state = PassState::Exhausted;
        }
        Ok(self.current.insert(word).as_str())
    }

    fn covers_pool(&self) -> bool {
        self.pool.iter().all(|word| self.drawn.contains(word))
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn state(&self) -> PassState {
        self.state
    }

    /// Passes finished since the pool was selected.
    pub fn completed_passes(&self) -> usize {
        self.completed_passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_pool_larger_than_list_takes_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = words(&["cat", "dog", "sun"]);
        let mut selector = SessionSelector::new();
        let pool = selector.select_pool(&list, 50, &mut rng).to_vec();

        let mut sorted = pool.clone();
        sorted.sort();
        assert_eq!(sorted, words(&["cat", "dog", "sun"]));
        assert_eq!(selector.drawn_count(), 0);
    }

    #[test]
    fn test_pool_is_sampled_without_replacement() {
        let mut rng = StdRng::seed_from_u64(1);
        let list: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let mut selector = SessionSelector::new();
        let pool = selector.select_pool(&list, 5, &mut rng).to_vec();

        assert_eq!(pool.len(), 5);
        let unique: HashSet<&String> = pool.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(pool.iter().all(|w| list.contains(w)));
    }

    #[test]
    fn test_empty_pool_refuses_draw() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut selector = SessionSelector::new();
        assert_eq!(selector.next(&mut rng), Err(SelectionError::EmptySelection));

        selector.select_pool(&[], 4, &mut rng);
        assert_eq!(selector.next(&mut rng), Err(SelectionError::EmptySelection));
    }

    #[test]
    fn test_no_repeat_within_a_pass() {
        let mut rng = StdRng::seed_from_u64(42);
        let list: Vec<String> = (0..6).map(|i| format!("w{i}")).collect();
        let mut selector = SessionSelector::new();
        selector.select_pool(&list, 6, &mut rng);

        for pass in 0..4 {
            let mut seen = HashSet::new();
            for _ in 0..selector.pool_size() {
                let word = selector.next(&mut rng).unwrap().to_string();
                assert!(selector.pool().contains(&word));
                assert!(seen.insert(word), "repeat inside pass {pass}");
            }
            assert_eq!(selector.state(), PassState::Exhausted);
        }
        assert_eq!(selector.completed_passes(), 3);
    }

    #[test]
    fn test_exhausted_pass_resets_on_next_draw() {
        let mut rng = StdRng::seed_from_u64(9);
        let list = words(&["cat", "dog"]);
        let mut selector = SessionSelector::new();
        selector.select_pool(&list, 2, &mut rng);

        selector.next(&mut rng).unwrap();
        assert_eq!(selector.state(), PassState::Active);
        selector.next(&mut rng).unwrap();
        assert_eq!(selector.state(), PassState::Exhausted);
        assert_eq!(selector.drawn_count(), 2);

        selector.next(&mut rng).unwrap();
        assert_eq!(selector.state(), PassState::Active);
        assert_eq!(selector.drawn_count(), 1);
    }

    #[test]
    fn test_duplicate_words_count_as_one() {
        let mut rng = StdRng::seed_from_u64(11);
        let list = words(&["echo", "echo", "solo"]);
        let mut selector = SessionSelector::new();
        let mut pool = selector.select_pool(&list, 3, &mut rng).to_vec();
        pool.sort();
        assert_eq!(pool, words(&["echo", "solo"]));

        let first = selector.next(&mut rng).unwrap().to_string();
        let second = selector.next(&mut rng).unwrap().to_string();
        assert_ne!(first, second);
        assert_eq!(selector.drawn_count(), selector.pool_size());
        assert_eq!(selector.state(), PassState::Exhausted);
    }

    #[test]
    fn test_current_tracks_last_draw() {
        let mut rng = StdRng::seed_from_u64(5);
        let list = words(&["cat"]);
        let mut selector = SessionSelector::new();
        selector.select_pool(&list, 1, &mut rng);
        assert!(selector.current().is_none());

        selector.next(&mut rng).unwrap();
        assert_eq!(selector.current(), Some("cat"));
        selector.next(&mut rng).unwrap();
        assert_eq!(selector.current(), Some("cat"));

        selector.restart();
        assert!(selector.current().is_none());
        assert_eq!(selector.drawn_count(), 0);
    }
}
