//! Seeded random expression trees.
//!
//! Property tests draw a seed and build an expression from it, so every
//! failure reproduces from the seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use linkforge_core::{Direction, Expression};

use crate::dictionary::TestDictionary;

/// Shape bounds for generated trees.
#[derive(Debug, Clone)]
pub struct RandomExpressionConfig {
    pub max_depth: usize,
    pub max_children: usize,
    /// Labels are drawn from `L0..L{label_count}`.
    pub label_count: usize,
    /// Costs are drawn from `0..=max_cost` in quarter steps.
    pub max_cost: f64,
    pub max_length_limit: u32,
}

impl Default for RandomExpressionConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_children: 3,
            label_count: 4,
            max_cost: 2.0,
            max_length_limit: 4,
        }
    }
}

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generates a random AND/OR tree over a small label alphabet.
pub fn random_expression<R: Rng + ?Sized>(
    rng: &mut R,
    dict: &mut TestDictionary,
    config: &RandomExpressionConfig,
) -> Expression {
    build(rng, dict, config, config.max_depth)
}

fn build<R: Rng + ?Sized>(
    rng: &mut R,
    dict: &mut TestDictionary,
    config: &RandomExpressionConfig,
    depth: usize,
) -> Expression {
    let cost = random_cost(rng, config.max_cost);
    if depth == 0 || rng.random_bool(0.35) {
        let label = format!("L{}", rng.random_range(0..config.label_count.max(1)));
        let direction = if rng.random_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        let label = dict.interner_mut().intern(&label);
        let mut exp = Expression::connector(direction, label).with_cost(cost);
        if rng.random_bool(0.5) {
            exp = exp.with_length_limit(rng.random_range(1..=config.max_length_limit.max(1)));
        }
        if rng.random_bool(0.2) {
            exp = exp.optional();
        }
        return exp;
    }

    let n = rng.random_range(1..=config.max_children.max(1));
    let children = (0..n)
        .map(|_| build(rng, dict, config, depth - 1))
        .collect();
    let node = if rng.random_bool(0.5) {
        Expression::and(children)
    } else {
        Expression::or(children)
    };
    node.with_cost(cost)
}

fn random_cost<R: Rng + ?Sized>(rng: &mut R, max_cost: f64) -> f64 {
    let steps = (max_cost * 4.0).floor().max(0.0) as u32;
    rng.random_range(0..=steps) as f64 / 4.0
}
