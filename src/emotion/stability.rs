use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::Emotion;

/// Frames an expression must be held before it counts
pub const MIN_FRAMES: u32 = 15;

/// Per-emotion episode counters
///
/// Counts only ever go up; there is no reset short of dropping the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub smile: u64,
    pub sad: u64,
}

impl Counters {
    pub fn get(&self, emotion: Emotion) -> u64 {
        match emotion {
            Emotion::Smile => self.smile,
            Emotion::Sad => self.sad,
        }
    }

    fn increment(&mut self, emotion: Emotion) {
        match emotion {
            Emotion::Smile => self.smile += 1,
            Emotion::Sad => self.sad += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.smile + self.sad
    }
}

/// Result of feeding one frame through the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilityUpdate {
    /// Label currently being tracked (None while nothing is detected)
    pub stable: Option<Emotion>,
    /// Set on the single frame where an episode reaches the threshold
    pub counted: Option<Emotion>,
}

impl StabilityUpdate {
    pub fn did_increment(&self) -> bool {
        self.counted.is_some()
    }
}

/// Debounce filter turning noisy per-frame labels into counted episodes
///
/// An episode is a run of identical non-None labels. The consecutive count
/// restarts at 0 whenever the label changes or drops to None, so each
/// episode passes the threshold frame exactly once.
#[derive(Debug, Clone)]
pub struct StabilityFilter {
    current: Option<Emotion>,
    consecutive: u32,
    counters: Counters,
}

impl StabilityFilter {
    pub fn new() -> Self {
        Self {
            current: None,
            consecutive: 0,
            counters: Counters::default(),
        }
    }

    /// Feed the raw label of one frame
    pub fn update(&mut self, raw: Option<Emotion>) -> StabilityUpdate {
        if raw.is_some() && raw == self.current {
            self.consecutive = self.consecutive.saturating_add(1);
        } else {
            if self.current != raw {
                trace!("Label changed: {:?} -> {:?}", self.current, raw);
            }
            self.consecutive = 0;
            self.current = raw;
        }

        // The first frame of a run sits at count 0, so the run length is one more
        let counted = match self.current {
            Some(emotion) if self.episode_len() == MIN_FRAMES => {
                self.counters.increment(emotion);
                debug!(
                    "{} held for {} frames, count now {}",
                    emotion,
                    MIN_FRAMES,
                    self.counters.get(emotion)
                );
                Some(emotion)
            }
            _ => None,
        };

        StabilityUpdate {
            stable: self.current,
            counted,
        }
    }

    /// Length of the episode in progress, 0 when no label is tracked
    pub fn episode_len(&self) -> u32 {
        match self.current {
            Some(_) => self.consecutive.saturating_add(1),
            None => 0,
        }
    }

    pub fn consecutive_count(&self) -> u32 {
        self.consecutive
    }

    pub fn current(&self) -> Option<Emotion> {
        self.current
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }
}

impl Default for StabilityFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SMILE: Option<Emotion> = Some(Emotion::Smile);
    const SAD: Option<Emotion> = Some(Emotion::Sad);

    fn feed(filter: &mut StabilityFilter, label: Option<Emotion>, frames: usize) -> usize {
        (0..frames)
            .filter(|_| filter.update(label).did_increment())
            .count()
    }

    /// Count maximal runs of identical non-None labels at least MIN_FRAMES long
    fn expected_episodes(labels: &[Option<Emotion>]) -> Counters {
        let mut counters = Counters::default();
        let mut i = 0;
        while i < labels.len() {
            let mut j = i;
            while j < labels.len() && labels[j] == labels[i] {
                j += 1;
            }
            if let Some(emotion) = labels[i] {
                if j - i >= MIN_FRAMES as usize {
                    counters.increment(emotion);
                }
            }
            i = j;
        }
        counters
    }

    #[test]
    fn test_initial_state() {
        let filter = StabilityFilter::new();
        assert_eq!(filter.current(), None);
        assert_eq!(filter.consecutive_count(), 0);
        assert_eq!(filter.counters(), &Counters::default());
    }

    #[test]
    fn test_interrupted_run_then_full_run() {
        let mut filter = StabilityFilter::new();
        feed(&mut filter, SMILE, 14);
        filter.update(None);
        feed(&mut filter, SMILE, 15);

        assert_eq!(filter.counters().smile, 1);
        assert_eq!(filter.counters().sad, 0);
    }

    #[test]
    fn test_short_run_never_counts() {
        let mut filter = StabilityFilter::new();
        assert_eq!(feed(&mut filter, SAD, 14), 0);
        assert_eq!(filter.counters().total(), 0);
        assert_eq!(filter.current(), SAD);
    }

    #[test]
    fn test_counts_once_on_threshold_frame() {
        let mut filter = StabilityFilter::new();
        for _ in 0..MIN_FRAMES - 1 {
            assert!(!filter.update(SMILE).did_increment());
        }
        let update = filter.update(SMILE);
        assert_eq!(update.counted, SMILE);
        assert_eq!(update.stable, SMILE);

        // Holding the expression does not count again
        assert_eq!(feed(&mut filter, SMILE, 500), 0);
        assert_eq!(filter.counters().smile, 1);
    }

    #[test]
    fn test_none_resets_count() {
        let mut filter = StabilityFilter::new();
        feed(&mut filter, SMILE, 10);
        assert_eq!(filter.consecutive_count(), 9);

        let update = filter.update(None);
        assert_eq!(update.stable, None);
        assert_eq!(filter.consecutive_count(), 0);
        assert_eq!(filter.episode_len(), 0);
    }

    #[test]
    fn test_other_label_resets_count() {
        let mut filter = StabilityFilter::new();
        feed(&mut filter, SMILE, 14);
        filter.update(SAD);
        assert_eq!(filter.consecutive_count(), 0);
        assert_eq!(filter.current(), SAD);

        // The old smile run cannot be resumed
        assert_eq!(feed(&mut filter, SMILE, 14), 0);
        assert_eq!(filter.counters().total(), 0);
    }

    #[test]
    fn test_alternating_episodes_count_separately() {
        let mut filter = StabilityFilter::new();
        feed(&mut filter, SMILE, 20);
        feed(&mut filter, SAD, 15);
        feed(&mut filter, None, 3);
        feed(&mut filter, SMILE, 15);

        assert_eq!(filter.counters().smile, 2);
        assert_eq!(filter.counters().sad, 1);
    }

    #[test]
    fn test_consecutive_count_saturates() {
        let mut filter = StabilityFilter {
            current: SAD,
            consecutive: u32::MAX - 1,
            counters: Counters::default(),
        };
        filter.update(SAD);
        filter.update(SAD);
        assert_eq!(filter.consecutive_count(), u32::MAX);
        assert_eq!(filter.counters().sad, 0);
    }

    fn label_strategy() -> impl Strategy<Value = Option<Emotion>> {
        prop_oneof![Just(None), Just(SMILE), Just(SAD)]
    }

    /// Runs of random label and length, so long episodes actually occur
    fn runs_strategy() -> impl Strategy<Value = Vec<Option<Emotion>>> {
        proptest::collection::vec((label_strategy(), 1usize..40), 0..30).prop_map(|runs| {
            runs.into_iter()
                .flat_map(|(label, len)| std::iter::repeat(label).take(len))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_counts_match_long_runs(labels in runs_strategy()) {
            let mut filter = StabilityFilter::new();
            for label in &labels {
                filter.update(*label);
            }
            prop_assert_eq!(*filter.counters(), expected_episodes(&labels));
        }

        #[test]
        fn prop_counters_never_decrease(labels in proptest::collection::vec(label_strategy(), 0..300)) {
            let mut filter = StabilityFilter::new();
            let mut previous = Counters::default();
            for label in labels {
                let update = filter.update(label);
                let now = *filter.counters();
                prop_assert!(now.smile >= previous.smile);
                prop_assert!(now.sad >= previous.sad);
                prop_assert_eq!(now.total() - previous.total(), u64::from(update.did_increment()));
                previous = now;
            }
        }

        #[test]
        fn prop_stable_label_follows_raw(labels in proptest::collection::vec(label_strategy(), 1..100)) {
            let mut filter = StabilityFilter::new();
            for label in labels {
                let update = filter.update(label);
                prop_assert_eq!(update.stable, label);
                if label.is_none() {
                    prop_assert_eq!(filter.consecutive_count(), 0);
                }
            }
        }
    }
}
