//! Disjunct count termination.

use super::Termination;
use crate::scope::PrepareScope;

/// Terminates once more than `limit` disjuncts have been built.
///
/// Counts disjuncts as expanded, before duplicate elimination.
#[derive(Debug, Clone)]
pub struct DisjunctCountTermination {
    limit: usize,
}

impl DisjunctCountTermination {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Termination for DisjunctCountTermination {
    fn is_terminated(&self, scope: &PrepareScope) -> bool {
        scope.disjuncts_built() > self.limit
    }

    fn describe(&self) -> String {
        format!("disjunct limit of {}", self.limit)
    }
}
