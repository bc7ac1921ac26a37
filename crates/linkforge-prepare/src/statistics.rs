//! Preparation statistics.
//!
//! One [`PrepareStatistics`] is returned per prepared sentence. It carries
//! the disjunct counts after every stage plus stage timings, and replaces
//! ad-hoc timing printouts.

use std::time::Duration;

/// Disjunct counts for one word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCounts {
    /// Word index in the sentence.
    pub word: usize,
    /// Disjuncts built from all alternatives.
    pub expanded: usize,
    /// Disjuncts left after duplicate elimination.
    pub after_dedup: usize,
    /// Disjuncts left after connector setup.
    pub after_reachability: usize,
}

/// Statistics for one sentence's preparation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrepareStatistics {
    /// Number of words in the sentence.
    pub words: usize,
    /// Disjuncts built by expansion.
    pub disjuncts_expanded: usize,
    /// Duplicates removed.
    pub duplicates_removed: usize,
    /// Disjuncts dropped because a connector could not attach.
    pub out_of_range_removed: usize,
    /// Connector records allocated in the arena.
    pub connectors_allocated: usize,
    /// Connectors stamped with provenance.
    pub connectors_tagged: usize,
    /// Time spent expanding and materialising.
    pub expansion_time: Duration,
    /// Time spent eliminating duplicates.
    pub dedup_time: Duration,
    /// Time spent setting connector bounds and provenance.
    pub setup_time: Duration,
    /// Total wall time.
    pub total_time: Duration,
    /// Counts for each word, in sentence order.
    pub per_word: Vec<WordCounts>,
}

impl PrepareStatistics {
    /// Creates empty statistics sized for `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            words,
            per_word: (0..words)
                .map(|word| WordCounts {
                    word,
                    ..WordCounts::default()
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Disjuncts left after duplicate elimination.
    pub fn disjuncts_after_dedup(&self) -> usize {
        self.per_word.iter().map(|w| w.after_dedup).sum()
    }

    /// Disjuncts handed to the parser.
    pub fn disjuncts_remaining(&self) -> usize {
        self.per_word.iter().map(|w| w.after_reachability).sum()
    }

    /// Fraction of expanded disjuncts that were pruned (0.0 to 1.0).
    pub fn pruned_fraction(&self) -> f64 {
        if self.disjuncts_expanded == 0 {
            0.0
        } else {
            1.0 - self.disjuncts_remaining() as f64 / self.disjuncts_expanded as f64
        }
    }

    /// Returns true if some word ended with no disjuncts.
    ///
    /// Such a sentence cannot have a complete linkage.
    pub fn has_empty_word(&self) -> bool {
        self.per_word.iter().any(|w| w.after_reachability == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrepareStatistics {
        let mut stats = PrepareStatistics::new(2);
        stats.disjuncts_expanded = 10;
        stats.per_word[0].expanded = 6;
        stats.per_word[0].after_dedup = 4;
        stats.per_word[0].after_reachability = 3;
        stats.per_word[1].expanded = 4;
        stats.per_word[1].after_dedup = 4;
        stats.per_word[1].after_reachability = 2;
        stats
    }

    #[test]
    fn test_new_indexes_words() {
        let stats = PrepareStatistics::new(3);
        assert_eq!(stats.words, 3);
        let indices: Vec<_> = stats.per_word.iter().map(|w| w.word).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_totals() {
        let stats = sample();
        assert_eq!(stats.disjuncts_after_dedup(), 8);
        assert_eq!(stats.disjuncts_remaining(), 5);
        assert!((stats.pruned_fraction() - 0.5).abs() < f64::EPSILON);
        assert!(!stats.has_empty_word());
    }

    #[test]
    fn test_pruned_fraction_zero() {
        let stats = PrepareStatistics::new(0);
        assert_eq!(stats.pruned_fraction(), 0.0);
    }

    #[test]
    fn test_empty_word() {
        let mut stats = sample();
        stats.per_word[1].after_reachability = 0;
        assert!(stats.has_empty_word());
    }
}
