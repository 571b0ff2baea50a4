//! Bounded mood history for temporal smoothing

use crate::Mood;
use std::collections::VecDeque;

/// Default window size for majority smoothing
pub const DEFAULT_HISTORY_SIZE: usize = 5;

/// Fixed-capacity FIFO of the most recent raw moods, oldest evicted first.
///
/// Invariant: `len() <= capacity()` at all times; iteration order is
/// chronological (oldest first).
#[derive(Debug, Clone)]
pub struct MoodHistory {
    entries: VecDeque<Mood>,
    capacity: usize,
}

impl MoodHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a raw mood, evicting the oldest entry beyond capacity
    pub fn push(&mut self, mood: Mood) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(mood);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the window in chronological order
    pub fn as_vec(&self) -> Vec<Mood> {
        self.entries.iter().copied().collect()
    }

    /// Most frequent mood in the window with its count.
    ///
    /// Ties resolve to the mood that entered the window first, matching the
    /// insertion-order behavior of the original counter.
    pub fn majority(&self) -> Option<(Mood, usize)> {
        let mut best: Option<(Mood, usize)> = None;
        let mut seen: Vec<Mood> = Vec::with_capacity(self.entries.len());

        for &mood in &self.entries {
            if seen.contains(&mood) {
                continue;
            }
            seen.push(mood);
            let count = self.entries.iter().filter(|&&m| m == mood).count();
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((mood, count));
            }
        }
        best
    }
}

impl Default for MoodHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_at_capacity() {
        let mut history = MoodHistory::new(5);
        for _ in 0..12 {
            history.push(Mood::Happy);
        }
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = MoodHistory::new(3);
        history.push(Mood::Happy);
        history.push(Mood::Sad);
        history.push(Mood::Angry);
        history.push(Mood::Fear);
        assert_eq!(history.as_vec(), vec![Mood::Sad, Mood::Angry, Mood::Fear]);
    }

    #[test]
    fn test_majority_counts() {
        let mut history = MoodHistory::new(5);
        history.push(Mood::Happy);
        history.push(Mood::Sad);
        history.push(Mood::Happy);
        assert_eq!(history.majority(), Some((Mood::Happy, 2)));
    }

    #[test]
    fn test_majority_tie_keeps_first_seen() {
        let mut history = MoodHistory::new(5);
        history.push(Mood::Sad);
        history.push(Mood::Happy);
        history.push(Mood::Sad);
        history.push(Mood::Happy);
        assert_eq!(history.majority(), Some((Mood::Sad, 2)));
    }

    #[test]
    fn test_majority_of_empty_window() {
        let history = MoodHistory::new(5);
        assert_eq!(history.majority(), None);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn arb_mood() -> impl Strategy<Value = Mood> {
            prop::sample::select(Mood::ALL.to_vec())
        }

        proptest! {
            #[test]
            fn prop_len_never_exceeds_capacity(
                moods in prop::collection::vec(arb_mood(), 0..40),
            ) {
                let mut history = MoodHistory::new(5);
                for mood in moods {
                    history.push(mood);
                }
                prop_assert!(history.len() <= history.capacity());
            }

            #[test]
            fn prop_window_is_suffix_of_input(
                moods in prop::collection::vec(arb_mood(), 1..40),
            ) {
                let mut history = MoodHistory::new(5);
                for &mood in &moods {
                    history.push(mood);
                }
                let tail: Vec<Mood> =
                    moods[moods.len().saturating_sub(5)..].to_vec();
                prop_assert_eq!(history.as_vec(), tail);
            }
        }
    }
}
