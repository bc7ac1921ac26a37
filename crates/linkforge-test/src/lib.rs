//! Shared test fixtures for LinkForge crates.
//!
//! This crate provides dictionary shorthand and sentence builders for tests.
//! It depends only on `linkforge-core` so the pipeline crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`dictionary`] - connector shorthand (`"S+"`, `"O-"`) and sentence building
//! - [`random`] - seeded random expression trees for property tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! linkforge-test = { workspace = true }
//! ```
//!
//! Then build expressions and sentences:
//!
//! ```
//! use linkforge_test::dictionary::{and, TestDictionary};
//!
//! let mut dict = TestDictionary::new();
//! let verb = and(vec![dict.conn("S-"), dict.conn("O+")]);
//! let sentence = dict.sentence(vec![("ran.v", verb)]);
//! assert_eq!(sentence.len(), 1);
//! ```

pub mod dictionary;
pub mod random;

pub use dictionary::{and, opt, or, TestDictionary};
pub use random::{random_expression, seeded_rng, RandomExpressionConfig};
