//! LinkForge Prepare - turns word expressions into parser-ready disjuncts
//!
//! This crate provides the preparation pipeline run before parsing:
//! - Expression expansion under a cost cutoff
//! - Merging of per-alternative disjunct lists
//! - Duplicate elimination with provenance union
//! - Connector distance bounds and out-of-range pruning
//! - Provenance tagging of connectors
//! - Resource terminations, statistics and diagnostics

pub mod dedup;
pub mod diagnostics;
pub mod expand;
pub mod merge;
pub mod prepare;
pub mod provenance;
pub mod reachability;
pub mod scope;
pub mod statistics;
pub mod termination;

pub use dedup::{eliminate_duplicate_disjuncts, DedupOutcome};
pub use diagnostics::{VERBOSITY_COUNTS, VERBOSITY_DUMP};
pub use expand::{build_disjuncts_for_exp, expand_expression, Clause, ClauseConnector};
pub use merge::{catenate_disjuncts, merge_alternatives};
pub use prepare::{prepare_batch, prepare_to_parse, Preparer};
pub use provenance::gword_record_in_connector;
pub use reachability::{setup_connectors, ReachabilityOutcome};
pub use scope::{PrepareScope, SharedScope};
pub use statistics::{PrepareStatistics, WordCounts};
pub use termination::{
    DisjunctCountTermination, ExternalTermination, OrTermination, Termination, TimeTermination,
};

#[cfg(test)]
mod expand_tests;
