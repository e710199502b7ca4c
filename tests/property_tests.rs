//! Property-based tests for the weighted transition graph.
//!
//! These tests verify invariants that should hold for any graph:
//! - Adjacency stays square after every mutation
//! - Link increments are additive
//! - Transition matrix rows are probability distributions
//! - Stationary distributions of teleporting chains are proper distributions

use markov_rs::WeightedTransitionGraph;
use proptest::prelude::*;

/// Links between a small pool of labels, with non-negative weights.
fn arb_links() -> impl Strategy<Value = Vec<(u8, u8, f64)>> {
    prop::collection::vec((0u8..6, 0u8..6, 0.0f64..10.0), 0..30)
}

fn build(links: &[(u8, u8, f64)]) -> WeightedTransitionGraph<u8> {
    let mut graph = WeightedTransitionGraph::new();
    for &(from, to, weight) in links {
        graph.add_link_with(from, to, weight, true).unwrap();
    }
    graph
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn adjacency_is_square(links in arb_links(), extra in 0u8..10) {
        let mut graph = build(&links);
        graph.add_state(extra);

        for from in graph.states() {
            for to in graph.states() {
                prop_assert!(graph.weight(from, to).is_some(), "missing {} -> {}", from, to);
            }
        }
        prop_assert_eq!(graph.weight(&extra, &extra).is_some(), true);
    }

    #[test]
    fn inc_link_is_additive(a in -5.0f64..5.0, b in -5.0f64..5.0) {
        let mut graph = WeightedTransitionGraph::new();
        graph.add_state(0u8).add_state(1u8);
        graph.inc_link_with(0, 1, a, false).unwrap();
        graph.inc_link_with(0, 1, b, false).unwrap();
        let weight = graph.weight(&0, &1).unwrap();
        prop_assert!((weight - (a + b)).abs() < 1e-12);
    }

    #[test]
    fn transition_rows_sum_to_one(links in arb_links(), p in 0.0f64..=1.0) {
        let mut graph = build(&links);
        graph.add_state(0);
        graph.set_teleport(p).unwrap();

        let m = graph.transition_matrix();
        prop_assert_eq!(m.nrows(), graph.len());
        for i in 0..m.nrows() {
            let total: f64 = m.row(i).sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "row {} sums to {}", i, total);
        }
    }

    #[test]
    fn stationary_is_a_distribution(links in arb_links(), p in 0.05f64..=1.0) {
        let mut graph = build(&links);
        graph.add_state(0);
        graph.set_teleport(p).unwrap();

        let pi = graph.stationary().unwrap();
        prop_assert_eq!(pi.len(), graph.len());
        prop_assert_eq!(
            pi.iter().map(|(s, _)| *s).collect::<Vec<_>>(),
            graph.states().to_vec()
        );

        let total: f64 = pi.iter().map(|(_, mass)| mass).sum();
        prop_assert!((total - 1.0).abs() < 1e-8);
        for (state, mass) in &pi {
            prop_assert!(*mass > -1e-10, "negative mass {} at {}", mass, state);
        }

        // pi is a fixed point of the chain.
        let m = graph.transition_matrix();
        for j in 0..m.ncols() {
            let next: f64 = (0..m.nrows()).map(|i| pi[i].1 * m[(i, j)]).sum();
            prop_assert!((next - pi[j].1).abs() < 1e-8);
        }
    }
}
