//! LinkForge - link-grammar sentence preparation in Rust
//!
//! Turns each word's dictionary expressions into a pruned, cost-bounded list
//! of disjuncts ready for a link-grammar parser.
//!
//! # Example
//!
//! ```rust
//! use linkforge::prelude::*;
//! use linkforge_test::{and, TestDictionary};
//!
//! let mut dict = TestDictionary::new();
//! let det = dict.conn("D+");
//! let noun = and(vec![dict.conn("D-"), dict.conn("S+")]);
//! let verb = dict.conn("S-");
//! let mut sentence = dict.sentence(vec![("the", det), ("cat", noun), ("sat", verb)]);
//!
//! let stats = prepare_to_parse(&mut sentence, &ParseOptions::default()).unwrap();
//! assert_eq!(stats.disjuncts_remaining(), 3);
//! ```

pub mod logging;

// Data model
pub use linkforge_core::{
    Arena, ArenaError, ArenaLimits, Connector, ConnectorId, Direction, Disjunct, DisjunctDisplay,
    DisjunctId, Expression, ExpressionError, ExpressionKind, GwordId, GwordSet, GwordSetId,
    Interner, LinkForgeError, Result, Sentence, Symbol, Word, XNode,
};

// Options
pub use linkforge_config::{
    ArenaConfig, ConfigError, DuplicateCostPolicy, ExpansionThreadCount, ParseOptions,
    ResourceConfig,
};

// Pipeline
pub use linkforge_prepare::{
    prepare_batch, prepare_to_parse, DisjunctCountTermination, ExternalTermination,
    OrTermination, PrepareStatistics, Preparer, Termination, TimeTermination, WordCounts,
};

/// Individual stages, for callers that drive preparation themselves.
pub mod stages {
    pub use linkforge_prepare::{
        build_disjuncts_for_exp, catenate_disjuncts, eliminate_duplicate_disjuncts,
        expand_expression, gword_record_in_connector, merge_alternatives, setup_connectors,
    };
}

pub mod prelude {
    pub use super::{
        prepare_batch, prepare_to_parse, Direction, Expression, Interner, LinkForgeError,
        ParseOptions, PrepareStatistics, Preparer, Sentence, XNode,
    };
}
