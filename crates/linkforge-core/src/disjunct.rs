//! Disjunct records.

use std::sync::Arc;

use crate::arena::{ConnectorId, DisjunctId};
use crate::gword::GwordSetId;

/// One candidate interpretation of a word.
///
/// Allocated whole from the sentence arena and never shared across words.
#[derive(Debug, Clone, PartialEq)]
pub struct Disjunct {
    pub left: Option<ConnectorId>,
    pub right: Option<ConnectorId>,
    /// Dictionary string of the word alternative, e.g. `dog.n`.
    pub word_string: Arc<str>,
    /// Sum of node costs along the expansion path.
    pub cost: f64,
    pub next: Option<DisjunctId>,
    pub originating: GwordSetId,
}
