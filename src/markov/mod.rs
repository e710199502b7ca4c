//! Weighted transition graph.
//!
//! A directed graph whose edge weights define a Markov chain. The adjacency
//! structure is kept square: every state has an entry for every state,
//! itself included, and missing links are stored as explicit zeros.
//!
//! ## Ordering
//!
//! States are kept in insertion order. `transition_matrix()`, `stationary()`
//! and the adjacency export all use that order.
//!
//! ## Limitations
//!
//! - **No removal**: states and links are only ever added or re-weighted.
//! - **No internal locking**: wrap the graph in a lock if several threads
//!   mutate it.

pub mod matrix;

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::{HashMap, HashSet};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use smallvec::SmallVec;

use crate::config::{validate_teleport, MarkovConfig};
use crate::{Error, Result};

// ============================================================================
// WeightedTransitionGraph
// ============================================================================

/// Directed graph with weighted transitions and a teleportation constant.
///
/// `S` is the state label. Anything hashable and cloneable works; the
/// `Debug` rendering is used in error messages.
#[derive(Debug, Clone)]
pub struct WeightedTransitionGraph<S = String> {
    /// States in insertion order.
    order: Vec<S>,
    /// source → (target → weight). Square and complete.
    adjacency: HashMap<S, HashMap<S, f64>>,
    /// Probability mass spread uniformly over all states on every step.
    teleport: f64,
    /// Decimals kept when matching eigenvalues against 1.
    eigen_decimals: u32,
}

impl<S> Default for WeightedTransitionGraph<S> {
    fn default() -> Self {
        let config = MarkovConfig::default();
        Self {
            order: Vec::new(),
            adjacency: HashMap::new(),
            teleport: config.teleport,
            eigen_decimals: config.eigen_decimals,
        }
    }
}

impl<S> WeightedTransitionGraph<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// An empty graph with teleport 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty graph using the given configuration.
    pub fn with_config(config: MarkovConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            teleport: config.teleport,
            eigen_decimals: config.eigen_decimals,
            ..Self::default()
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// States in insertion order.
    pub fn states(&self) -> &[S] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.adjacency.contains_key(state)
    }

    pub fn teleport(&self) -> f64 {
        self.teleport
    }

    pub fn eigen_decimals(&self) -> u32 {
        self.eigen_decimals
    }

    /// Raw weight of `from → to`, or `None` if either state is unknown.
    pub fn weight(&self, from: &S, to: &S) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Outgoing raw weights of `state`, in state order.
    pub fn row(&self, state: &S) -> Option<Vec<f64>> {
        let row = self.adjacency.get(state)?;
        Some(
            self.order
                .iter()
                .map(|target| row.get(target).copied().unwrap_or(0.0))
                .collect(),
        )
    }

    /// Weight lookup for states already known to be present.
    pub(crate) fn raw_weight(&self, from: &S, to: &S) -> f64 {
        self.weight(from, to).unwrap_or(0.0)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a state and give it a full row and column of zero weights.
    ///
    /// Existing weights are left alone, so adding a known state only
    /// re-checks the square structure.
    pub fn add_state(&mut self, label: S) -> &mut Self {
        if !self.adjacency.contains_key(&label) {
            self.order.push(label.clone());
            tracing::debug!(state = ?label, states = self.order.len(), "State added");
        }

        let row = self.adjacency.entry(label.clone()).or_default();
        for state in &self.order {
            row.entry(state.clone()).or_insert(0.0);
        }
        for row in self.adjacency.values_mut() {
            row.entry(label.clone()).or_insert(0.0);
        }
        self
    }

    /// Increment `s1 → s2` by 1. Both states must exist.
    pub fn inc_link(&mut self, s1: S, s2: S) -> Result<&mut Self> {
        self.inc_link_with(s1, s2, 1.0, false)
    }

    /// Add `increment` to the weight of `s1 → s2`.
    ///
    /// Negative increments decrement the link. With `auto_add`, unknown
    /// states are added first (`s1`, then `s2`); without it they fail with
    /// [`Error::MissingState`]. A non-finite increment, or one that would
    /// overflow the weight, fails with [`Error::InvalidParameter`] and
    /// leaves the graph untouched.
    pub fn inc_link_with(
        &mut self,
        s1: S,
        s2: S,
        increment: f64,
        auto_add: bool,
    ) -> Result<&mut Self> {
        if !increment.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "link increment must be finite, got {increment}"
            )));
        }
        if !auto_add {
            self.ensure_states(&s1, &s2)?;
        }

        let updated = self.weight(&s1, &s2).unwrap_or(0.0) + increment;
        if !updated.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "weight of {s1:?} -> {s2:?} overflows to {updated}"
            )));
        }

        if auto_add {
            self.add_state(s1.clone());
            self.add_state(s2.clone());
        }
        self.adjacency.entry(s1).or_default().insert(s2, updated);
        tracing::debug!(increment, weight = updated, "Link incremented");
        Ok(self)
    }

    /// Add a link of weight 1. Both states must exist.
    pub fn add_link(&mut self, s1: S, s2: S) -> Result<&mut Self> {
        self.add_link_with(s1, s2, 1.0, false)
    }

    /// Add a link of the given weight.
    ///
    /// NOTE: this is additive. A link that already carries weight `w` ends up
    /// with `w + weight`, not `weight`. Callers that need an absolute set
    /// must subtract the previous value themselves.
    pub fn add_link_with(
        &mut self,
        s1: S,
        s2: S,
        weight: f64,
        auto_add: bool,
    ) -> Result<&mut Self> {
        self.inc_link_with(s1.clone(), s2.clone(), 0.0, auto_add)?;
        self.inc_link_with(s1, s2, weight, false)
    }

    /// Set the teleportation constant. Must lie in [0, 1].
    pub fn set_teleport(&mut self, p: f64) -> Result<&mut Self> {
        validate_teleport(p)?;
        self.teleport = p;
        tracing::debug!(teleport = p, "Teleportation constant set");
        Ok(self)
    }

    fn ensure_states(&self, s1: &S, s2: &S) -> Result<()> {
        let mut labels: SmallVec<[String; 2]> = SmallVec::new();
        if !self.contains(s1) {
            labels.push(format!("{s1:?}"));
        }
        if s2 != s1 && !self.contains(s2) {
            labels.push(format!("{s2:?}"));
        }
        if labels.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingState { labels })
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Whether every state is reachable from the first inserted state.
    ///
    /// Follows directed links with nonzero weight. This is reachability
    /// from one source, not strong connectivity: `A → B` alone is
    /// connected, `B → A` alone is not. An empty graph is not connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.order.first() else {
            return false;
        };

        let mut reached: HashSet<&S> = HashSet::with_capacity(self.order.len());
        reached.insert(start);
        let mut frontier = VecDeque::from([start]);

        while let Some(state) = frontier.pop_front() {
            for target in &self.order {
                if self.raw_weight(state, target) != 0.0 && reached.insert(target) {
                    frontier.push_back(target);
                }
            }
        }

        reached.len() == self.order.len()
    }

    /// Sample the successor of `state`.
    ///
    /// Each state `s` is drawn with probability proportional to
    /// `(1 - p) * w(state, s) + p / n`.
    pub fn transition<R: Rng + ?Sized>(&self, state: &S, rng: &mut R) -> Result<S> {
        let row = self
            .adjacency
            .get(state)
            .ok_or_else(|| Error::UnknownState(format!("{state:?}")))?;

        if self.teleport == 0.0 && row.values().all(|w| *w == 0.0) {
            return Err(Error::NoTransition(format!("{state:?}")));
        }

        let p = self.teleport;
        let uniform = p / self.order.len() as f64;
        let weights: Vec<f64> = self
            .order
            .iter()
            .map(|target| (1.0 - p) * row.get(target).copied().unwrap_or(0.0) + uniform)
            .collect();

        let dist = WeightedIndex::new(&weights).map_err(|e| {
            Error::InvalidParameter(format!("cannot sample a transition from {state:?}: {e}"))
        })?;
        let next = self.order[dist.sample(rng)].clone();
        tracing::trace!(from = ?state, to = ?next, "Transition sampled");
        Ok(next)
    }
}
