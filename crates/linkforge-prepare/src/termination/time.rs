//! Time-based termination.

use std::time::Duration;

use super::Termination;
use crate::scope::PrepareScope;

/// Terminates once preparation has run for a time limit.
///
/// # Example
///
/// ```
/// use linkforge_prepare::termination::TimeTermination;
///
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &PrepareScope) -> bool {
        scope.elapsed() >= self.limit
    }

    fn describe(&self) -> String {
        format!("time limit of {}ms", self.limit.as_millis())
    }
}
