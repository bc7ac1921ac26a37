//! Resource terminations checked between words.
//!
//! Preparation cannot be cancelled mid-word. After each word the pipeline
//! asks its terminations whether the sentence should be abandoned; when one
//! fires, every partial disjunct list is discarded. Parallel expansion
//! workers also ask before starting each word.

mod composite;
mod disjunct_count;
mod external;
mod time;

use std::fmt::Debug;

use linkforge_config::ParseOptions;

use crate::scope::PrepareScope;

pub use composite::OrTermination;
pub use disjunct_count::DisjunctCountTermination;
pub use external::ExternalTermination;
pub use time::TimeTermination;

/// Decides whether a sentence's preparation should be abandoned.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if preparation should stop.
    fn is_terminated(&self, scope: &PrepareScope) -> bool;

    /// Short human-readable description of the limit.
    fn describe(&self) -> String;

    /// Description of the limit that fired, if any.
    fn reason(&self, scope: &PrepareScope) -> Option<String> {
        self.is_terminated(scope).then(|| self.describe())
    }
}

/// An absent limit never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &PrepareScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(scope))
    }

    fn describe(&self) -> String {
        match self {
            Some(t) => t.describe(),
            None => "no limit".to_string(),
        }
    }

    fn reason(&self, scope: &PrepareScope) -> Option<String> {
        self.as_ref().and_then(|t| t.reason(scope))
    }
}

impl Termination for Box<dyn Termination> {
    fn is_terminated(&self, scope: &PrepareScope) -> bool {
        (**self).is_terminated(scope)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn reason(&self, scope: &PrepareScope) -> Option<String> {
        (**self).reason(scope)
    }
}

/// The resource budget configured in `options.resources`.
pub type ResourceTermination = OrTermination<(Option<TimeTermination>, Option<DisjunctCountTermination>)>;

/// Builds the termination for the configured resource budget.
pub fn from_options(options: &ParseOptions) -> ResourceTermination {
    let resources = options.resources.as_ref();
    let time = resources
        .and_then(|r| r.time_limit())
        .map(TimeTermination::new);
    let count = resources
        .and_then(|r| r.max_disjuncts)
        .map(DisjunctCountTermination::new);
    OrTermination::new((time, count))
}
