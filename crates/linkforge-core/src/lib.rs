//! LinkForge Core - data model for link-grammar sentence preparation
//!
//! This crate provides the types shared by every preparation stage:
//! - Interned connector labels and dictionary expressions
//! - Connector and disjunct records addressed by typed arena indices
//! - Word-graph provenance sets
//! - The sentence-scoped arena and the sentence/word model
//! - Rendering and the error type

pub mod arena;
pub mod connector;
pub mod disjunct;
pub mod display;
pub mod error;
pub mod expression;
pub mod gword;
pub mod sentence;
pub mod symbol;

pub use arena::{
    Arena, ArenaError, ArenaLimits, ConnectorId, DisjunctId, Pool, PoolId, MAX_RECORDS,
};
pub use connector::Connector;
pub use disjunct::Disjunct;
pub use display::{ConnectorDisplay, DisjunctDisplay};
pub use error::{ExpressionError, LinkForgeError, Result};
pub use expression::{ConnectorTerm, Direction, Expression, ExpressionKind};
pub use gword::{GwordId, GwordSet, GwordSetId, GwordSetTable};
pub use sentence::{Sentence, Word, XNode};
pub use symbol::{Interner, Symbol};
