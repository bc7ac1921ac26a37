//! Tests for expression expansion and disjunct materialisation.

use std::sync::Arc;

use proptest::prelude::*;

use linkforge_core::{
    Arena, ArenaError, ArenaLimits, ConnectorId, Direction, Expression, GwordId, GwordSet,
    Interner,
};
use linkforge_test::{
    and, opt, or, random_expression, seeded_rng, RandomExpressionConfig, TestDictionary,
};

use crate::expand::{build_disjuncts_for_exp, expand_expression, Clause};

fn labels(clause: &Clause<'_>, interner: &Interner) -> Vec<String> {
    clause
        .connectors
        .iter()
        .map(|c| {
            format!(
                "{}{}",
                interner.resolve(c.term.label).unwrap_or("?"),
                c.term.direction
            )
        })
        .collect()
}

fn chain_labels(arena: &Arena, interner: &Interner, head: Option<ConnectorId>) -> Vec<String> {
    arena
        .connectors(head)
        .map(|(_, c)| interner.resolve(c.label).unwrap_or("?").to_string())
        .collect()
}

#[test]
fn test_or_branch_over_cutoff_is_pruned() {
    let mut dict = TestDictionary::new();
    let exp = or(vec![dict.conn("S+"), dict.conn("O-").with_cost(1.0)]);

    let clauses = expand_expression(&exp, 0.5);
    assert_eq!(clauses.len(), 1);
    assert_eq!(labels(&clauses[0], dict.interner()), vec!["S+"]);
    assert_eq!(clauses[0].cost, 0.0);
}

#[test]
fn test_cutoff_is_inclusive() {
    let mut dict = TestDictionary::new();
    let exp = dict.conn("S+").with_cost(0.5);
    assert_eq!(expand_expression(&exp, 0.5).len(), 1);
    assert!(expand_expression(&exp, 0.25).is_empty());
}

#[test]
fn test_and_is_cross_product_in_order() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![
        or(vec![dict.conn("A+"), dict.conn("B+")]),
        or(vec![dict.conn("C-"), dict.conn("D-").with_cost(1.0)]),
    ]);

    let clauses = expand_expression(&exp, f64::INFINITY);
    let shown: Vec<_> = clauses
        .iter()
        .map(|c| (labels(c, dict.interner()), c.cost))
        .collect();
    assert_eq!(
        shown,
        vec![
            (vec!["A+".to_string(), "C-".to_string()], 0.0),
            (vec!["A+".to_string(), "D-".to_string()], 1.0),
            (vec!["B+".to_string(), "C-".to_string()], 0.0),
            (vec!["B+".to_string(), "D-".to_string()], 1.0),
        ]
    );
}

#[test]
fn test_and_combinations_over_cutoff_are_not_built() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![
        or(vec![dict.conn("A+"), dict.conn("B+").with_cost(2.0)]),
        or(vec![dict.conn("C-"), dict.conn("D-").with_cost(2.0)]),
    ]);

    let clauses = expand_expression(&exp, 3.0);
    assert_eq!(clauses.len(), 3);
    assert!(clauses.iter().all(|c| c.cost <= 3.0));
}

#[test]
fn test_optional_terminal_adds_empty_clause() {
    let mut dict = TestDictionary::new();
    let exp = dict.conn("S+").with_cost(1.0).optional();

    let clauses = expand_expression(&exp, f64::INFINITY);
    assert_eq!(clauses.len(), 2);
    assert!(clauses[0].connectors.is_empty());
    assert_eq!(clauses[0].cost, 0.0);
    assert_eq!(clauses[1].cost, 1.0);

    // Only the empty choice fits under a tight cutoff.
    let clauses = expand_expression(&exp, 0.5);
    assert_eq!(clauses.len(), 1);
    assert!(clauses[0].connectors.is_empty());
}

#[test]
fn test_optional_braces_expand_like_optional_terminal() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![dict.conn("S-"), opt(dict.conn("O+"))]);

    let clauses = expand_expression(&exp, f64::INFINITY);
    let shown: Vec<_> = clauses.iter().map(|c| labels(c, dict.interner())).collect();
    assert_eq!(
        shown,
        vec![vec!["S-".to_string(), "O+".to_string()], vec!["S-".to_string()]]
    );
}

#[test]
fn test_node_costs_accumulate() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![
        dict.conn("S+").with_cost(0.5),
        or(vec![dict.conn("O+"), dict.conn("P+").with_cost(1.0)]).with_cost(0.25),
    ])
    .with_cost(1.0);

    let costs: Vec<f64> = expand_expression(&exp, f64::INFINITY)
        .iter()
        .map(|c| c.cost)
        .collect();
    assert_eq!(costs, vec![1.75, 2.75]);
}

#[test]
fn test_and_node_cost_over_cutoff_yields_nothing() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![dict.conn("S+")]).with_cost(3.0);
    assert!(expand_expression(&exp, 2.7).is_empty());
}

#[test]
fn test_empty_and_and_empty_or() {
    let empty_and = Expression::and(vec![]);
    let clauses = expand_expression(&empty_and, 0.0);
    assert_eq!(clauses.len(), 1);
    assert!(clauses[0].connectors.is_empty());

    let empty_or = Expression::or(vec![]);
    assert!(expand_expression(&empty_or, f64::INFINITY).is_empty());
}

#[test]
fn test_connector_carries_terminal_cost() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![dict.conn("S+").with_cost(0.5), dict.conn("O+")]);

    let clauses = expand_expression(&exp, f64::INFINITY);
    let costs: Vec<f64> = clauses[0].connectors.iter().map(|c| c.cost).collect();
    assert_eq!(costs, vec![0.5, 0.0]);
}

#[test]
fn test_chain_heads_are_outermost() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![
        dict.conn("A-"),
        dict.conn("B-"),
        dict.conn("C+"),
        dict.conn("D+"),
    ]);
    let clauses = expand_expression(&exp, f64::INFINITY);

    let mut arena = Arena::default();
    let prov = arena.gword_sets.intern(GwordSet::single(GwordId(0))).unwrap();
    let head = build_disjuncts_for_exp(&mut arena, &clauses, &Arc::from("w"), prov)
        .unwrap()
        .unwrap();

    let d = &arena.disjuncts[head];
    assert_eq!(chain_labels(&arena, dict.interner(), d.left), vec!["A", "B"]);
    assert_eq!(chain_labels(&arena, dict.interner(), d.right), vec!["D", "C"]);
    assert!(arena
        .connectors(d.left)
        .all(|(_, c)| c.direction == Direction::Left && !c.shallow));
}

#[test]
fn test_materialised_list_keeps_clause_order() {
    let mut dict = TestDictionary::new();
    let exp = or(vec![
        dict.conn("A+"),
        dict.conn("B+").with_cost(1.0),
        dict.conn("C+").with_cost(2.0),
    ]);
    let clauses = expand_expression(&exp, f64::INFINITY);

    let mut arena = Arena::default();
    let prov = arena.gword_sets.intern(GwordSet::single(GwordId(3))).unwrap();
    let head = build_disjuncts_for_exp(&mut arena, &clauses, &Arc::from("w"), prov).unwrap();

    let costs: Vec<f64> = arena.disjuncts(head).map(|(_, d)| d.cost).collect();
    assert_eq!(costs, vec![0.0, 1.0, 2.0]);
    assert!(arena.disjuncts(head).all(|(_, d)| d.originating == prov));
}

#[test]
fn test_no_clauses_builds_nothing() {
    let mut arena = Arena::default();
    let prov = arena.gword_sets.intern(GwordSet::new()).unwrap();
    let head = build_disjuncts_for_exp(&mut arena, &[], &Arc::from("w"), prov).unwrap();
    assert!(head.is_none());
    assert!(arena.disjuncts.is_empty());
}

#[test]
fn test_connector_limit_surfaces_arena_error() {
    let mut dict = TestDictionary::new();
    let exp = and(vec![dict.conn("A+"), dict.conn("B+"), dict.conn("C+")]);
    let clauses = expand_expression(&exp, f64::INFINITY);

    let mut arena = Arena::new(ArenaLimits {
        max_connectors: Some(2),
        ..ArenaLimits::default()
    });
    let prov = arena.gword_sets.intern(GwordSet::single(GwordId(0))).unwrap();
    let err = build_disjuncts_for_exp(&mut arena, &clauses, &Arc::from("w"), prov).unwrap_err();
    assert_eq!(
        err,
        ArenaError {
            pool: "Connector",
            limit: 2
        }
    );
}

fn small_trees() -> RandomExpressionConfig {
    RandomExpressionConfig {
        max_depth: 2,
        ..RandomExpressionConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_clause_fits_under_cutoff(seed in any::<u64>(), quarters in 0u32..16) {
        let cutoff = f64::from(quarters) * 0.25;
        let mut dict = TestDictionary::new();
        let config = RandomExpressionConfig::default();
        let exp = random_expression(&mut seeded_rng(seed), &mut dict, &config);

        for clause in expand_expression(&exp, cutoff) {
            prop_assert!(clause.cost >= 0.0);
            prop_assert!(clause.cost <= cutoff);
        }
    }

    #[test]
    fn prop_cutoff_only_removes_clauses(seed in any::<u64>(), quarters in 0u32..16) {
        let cutoff = f64::from(quarters) * 0.25;
        let mut dict = TestDictionary::new();
        let config = RandomExpressionConfig::default();
        let exp = random_expression(&mut seeded_rng(seed), &mut dict, &config);

        let all = expand_expression(&exp, f64::INFINITY);
        let kept = expand_expression(&exp, cutoff);
        let expected: Vec<_> = all.into_iter().filter(|c| c.cost <= cutoff).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn prop_and_is_cartesian_product(seed in any::<u64>()) {
        let mut rng = seeded_rng(seed);
        let mut dict = TestDictionary::new();
        let a = random_expression(&mut rng, &mut dict, &small_trees());
        let b = random_expression(&mut rng, &mut dict, &small_trees());

        let left = expand_expression(&a, f64::INFINITY);
        let right = expand_expression(&b, f64::INFINITY);
        let both = and(vec![a.clone(), b.clone()]);
        let product = expand_expression(&both, f64::INFINITY);

        prop_assert_eq!(product.len(), left.len() * right.len());
        for (i, l) in left.iter().enumerate() {
            for (j, r) in right.iter().enumerate() {
                let p = &product[i * right.len() + j];
                let joined: Vec<_> = l.connectors.iter().chain(&r.connectors).copied().collect();
                prop_assert_eq!(p.connectors.as_slice(), joined.as_slice());
                prop_assert_eq!(p.cost, l.cost + r.cost);
            }
        }
    }
}
