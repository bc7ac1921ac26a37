//! Progress of one sentence's preparation.
//!
//! [`PrepareScope`] is what resource terminations look at between words.
//! [`SharedScope`] holds the same counters for parallel expansion workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Running counters for a preparation in progress.
#[derive(Debug, Clone)]
pub struct PrepareScope {
    start_time: Instant,
    words_done: usize,
    disjuncts_built: usize,
}

impl PrepareScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            words_done: 0,
            disjuncts_built: 0,
        }
    }

    /// Scope whose clock started at `start_time`.
    pub fn started_at(start_time: Instant) -> Self {
        Self {
            start_time,
            ..Self::new()
        }
    }

    /// Records one finished word and the disjuncts built for it.
    pub fn record_word(&mut self, disjuncts: usize) {
        self.words_done += 1;
        self.disjuncts_built += disjuncts;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn words_done(&self) -> usize {
        self.words_done
    }

    pub fn disjuncts_built(&self) -> usize {
        self.disjuncts_built
    }
}

impl Default for PrepareScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress counters updated concurrently by expansion workers.
///
/// The first [`stop`](Self::stop) wins and records which word noticed it
/// and why. Workers that see [`is_stopped`](Self::is_stopped) skip their
/// remaining words.
#[derive(Debug)]
pub struct SharedScope {
    start_time: Instant,
    words_done: AtomicUsize,
    disjuncts_built: AtomicUsize,
    stop_reason: OnceLock<(usize, String)>,
}

impl SharedScope {
    pub fn started_at(start_time: Instant) -> Self {
        Self {
            start_time,
            words_done: AtomicUsize::new(0),
            disjuncts_built: AtomicUsize::new(0),
            stop_reason: OnceLock::new(),
        }
    }

    pub fn record_word(&self, disjuncts: usize) {
        self.disjuncts_built.fetch_add(disjuncts, Ordering::Relaxed);
        self.words_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time view for termination checks.
    pub fn snapshot(&self) -> PrepareScope {
        PrepareScope {
            start_time: self.start_time,
            words_done: self.words_done.load(Ordering::Relaxed),
            disjuncts_built: self.disjuncts_built.load(Ordering::Relaxed),
        }
    }

    /// Stops the pass. Later calls keep the first reason.
    pub fn stop(&self, word: usize, reason: String) {
        let _ = self.stop_reason.set((word, reason));
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_reason.get().is_some()
    }

    pub fn stop_reason(&self) -> Option<&(usize, String)> {
        self.stop_reason.get()
    }

    pub fn words_done(&self) -> usize {
        self.words_done.load(Ordering::Relaxed)
    }
}
