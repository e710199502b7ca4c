//! Transition matrix and stationary distribution.
//!
//! ```text
//! raw weights W ──row-normalize──▶ R ──blend──▶ M = (1-p)·R + (p/n)·J
//!                                                │
//!                          eigenvalues of Mᵀ ◀───┘──▶ null vector of (Mᵀ - I)
//! ```
//!
//! Rows with zero total weight become identity rows, so every row of `M` is a
//! probability distribution. The stationary vector is the right-singular
//! vector of `Mᵀ - I` with the smallest singular value, which is real by
//! construction.

use std::fmt::Debug;
use std::hash::Hash;

use hashbrown::HashMap;
use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};

use super::WeightedTransitionGraph;
use crate::{Error, Result};

/// Iteration cap for the Schur decomposition behind the eigenvalue test.
const MAX_SCHUR_ITERATIONS: usize = 10_000;

impl<S> WeightedTransitionGraph<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Raw adjacency weights as a dense matrix. Row `i` holds the outgoing
    /// weights of `states()[i]`.
    pub fn adjacency_matrix(&self) -> DMatrix<f64> {
        let n = self.order.len();
        DMatrix::from_fn(n, n, |i, j| self.raw_weight(&self.order[i], &self.order[j]))
    }

    /// Row-stochastic transition matrix with teleportation blended in.
    ///
    /// Every row sums to 1. An empty graph yields a 0×0 matrix.
    pub fn transition_matrix(&self) -> DMatrix<f64> {
        let n = self.order.len();
        let mut matrix = self.adjacency_matrix();

        for i in 0..n {
            // Scale by the largest magnitude first so large finite weights
            // cannot overflow the row total.
            let scale = matrix.row(i).amax();
            let total: f64 = if scale == 0.0 {
                0.0
            } else {
                matrix.row(i).iter().map(|w| w / scale).sum()
            };
            for j in 0..n {
                matrix[(i, j)] = if total != 0.0 {
                    matrix[(i, j)] / scale / total
                } else if i == j {
                    1.0
                } else {
                    0.0
                };
            }
        }

        let p = self.teleport;
        let uniform = if n == 0 { 0.0 } else { p / n as f64 };
        matrix.map(|x| (1.0 - p) * x + uniform)
    }

    /// Stationary distribution, one `(state, probability)` pair per state in
    /// state order.
    ///
    /// Fails with [`Error::NoStationaryDistribution`] when no eigenvalue of
    /// the transposed transition matrix rounds to 1. When the eigenvalue 1
    /// is repeated (reducible chain) the first vector the SVD yields is
    /// used; no canonical choice is made.
    pub fn stationary(&self) -> Result<Vec<(S, f64)>> {
        let n = self.order.len();
        if n == 0 {
            return Err(Error::NoStationaryDistribution("the graph has no states".into()));
        }

        let transposed = self.transition_matrix().transpose();
        if transposed.iter().any(|x| !x.is_finite()) {
            return Err(Error::NoStationaryDistribution(
                "the transition matrix has non-finite entries".into(),
            ));
        }

        let schur = Schur::try_new(transposed.clone(), f64::EPSILON, MAX_SCHUR_ITERATIONS)
            .ok_or_else(|| {
                tracing::warn!(
                    states = n,
                    max_iterations = MAX_SCHUR_ITERATIONS,
                    "Schur decomposition did not converge"
                );
                Error::NoStationaryDistribution("eigenvalue iteration did not converge".into())
            })?;
        let eigenvalues = schur.complex_eigenvalues();
        let multiplicity = eigenvalues
            .iter()
            .filter(|lambda| rounds_to_one(lambda, self.eigen_decimals))
            .count();

        if multiplicity == 0 {
            tracing::warn!(
                eigenvalues = ?eigenvalues.as_slice(),
                decimals = self.eigen_decimals,
                "No eigenvalue of the transition matrix equals 1"
            );
            return Err(Error::NoStationaryDistribution(
                "no eigenvalue of the transition matrix equals 1".into(),
            ));
        }
        tracing::debug!(multiplicity, states = n, "Eigenvalue 1 found");

        let system = transposed - DMatrix::<f64>::identity(n, n);
        let svd = system.svd(false, true);
        let v_t = svd.v_t.ok_or_else(|| {
            Error::NoStationaryDistribution("right singular vectors were not computed".into())
        })?;

        let smallest = svd
            .singular_values
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(k, _)| k)
            .unwrap_or(0);

        let vector = v_t.row(smallest);
        let total: f64 = vector.sum();
        if total.abs() < f64::EPSILON {
            tracing::warn!(total, "Eigenvector for eigenvalue 1 sums to zero");
            return Err(Error::NoStationaryDistribution(
                "the eigenvector for eigenvalue 1 cannot be normalized".into(),
            ));
        }

        Ok(self
            .order
            .iter()
            .cloned()
            .zip(vector.iter().map(|x| x / total))
            .collect())
    }

    /// [`stationary`](Self::stationary) as a lookup map.
    pub fn stationary_map(&self) -> Result<HashMap<S, f64>> {
        Ok(self.stationary()?.into_iter().collect())
    }
}

/// Compare an eigenvalue against 1 after rounding both parts to `decimals`.
fn rounds_to_one(value: &Complex<f64>, decimals: u32) -> bool {
    let scale = 10f64.powi(decimals as i32);
    (value.re * scale).round() == scale && (value.im * scale).round() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn two_cycle() -> WeightedTransitionGraph<&'static str> {
        let mut g = WeightedTransitionGraph::new();
        g.add_link_with("A", "B", 1.0, true)
            .unwrap()
            .add_link_with("B", "A", 1.0, true)
            .unwrap();
        g
    }

    #[test]
    fn test_rounds_to_one() {
        assert!(rounds_to_one(&Complex::new(1.0000001, 0.0), 6));
        assert!(rounds_to_one(&Complex::new(0.9999999, -1e-9), 6));
        assert!(!rounds_to_one(&Complex::new(0.99, 0.0), 6));
        assert!(!rounds_to_one(&Complex::new(1.0, 0.5), 6));
    }

    #[test]
    fn test_transition_matrix_two_cycle() {
        let m = two_cycle().transition_matrix();
        assert_eq!(m, DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_transition_matrix_dead_end_is_identity_row() {
        let mut g = WeightedTransitionGraph::new();
        g.add_link_with("A", "B", 3.0, true).unwrap();
        let m = g.transition_matrix();
        assert_eq!(m, DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 0.0, 1.0]));
    }

    #[test]
    fn test_transition_matrix_teleport_blend() {
        let mut g = WeightedTransitionGraph::new();
        g.add_state("A").add_state("B").add_state("C");
        g.set_teleport(0.3).unwrap();
        let m = g.transition_matrix();
        for i in 0..3 {
            for j in 0..3 {
                let identity = if i == j { 1.0 } else { 0.0 };
                let expected = 0.7 * identity + 0.1;
                assert!((m[(i, j)] - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_transition_matrix_huge_weights_stay_stochastic() {
        let mut g = WeightedTransitionGraph::new();
        g.add_link_with("A", "B", 1e308, true).unwrap();
        g.add_link_with("A", "C", 1e308, true).unwrap();
        let m = g.transition_matrix();
        assert!(m.iter().all(|x| x.is_finite()));
        assert!((m[(0, 1)] - 0.5).abs() < EPS);
        assert!((m[(0, 2)] - 0.5).abs() < EPS);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn test_stationary_huge_weights_terminates() {
        let mut g = WeightedTransitionGraph::new();
        g.add_link_with("A", "B", 1e308, true).unwrap();
        g.add_link_with("B", "A", 1e308, false).unwrap();
        let pi = g.stationary().unwrap();
        assert!((pi[0].1 - 0.5).abs() < EPS);
        assert!((pi[1].1 - 0.5).abs() < EPS);
    }

    #[test]
    fn test_transition_matrix_empty() {
        let g: WeightedTransitionGraph<&str> = WeightedTransitionGraph::new();
        assert_eq!(g.transition_matrix().shape(), (0, 0));
    }

    #[test]
    fn test_stationary_two_cycle() {
        let pi = two_cycle().stationary().unwrap();
        assert_eq!(pi.len(), 2);
        assert_eq!(pi[0].0, "A");
        assert_eq!(pi[1].0, "B");
        assert!((pi[0].1 - 0.5).abs() < EPS);
        assert!((pi[1].1 - 0.5).abs() < EPS);
    }

    #[test]
    fn test_stationary_weighted_chain() {
        // A -> B always, B -> A or B with equal weight: pi = (1/3, 2/3)
        let mut g = WeightedTransitionGraph::new();
        g.add_link_with("A", "B", 1.0, true).unwrap();
        g.add_link_with("B", "A", 1.0, false).unwrap();
        g.add_link_with("B", "B", 1.0, false).unwrap();

        let pi = g.stationary_map().unwrap();
        assert!((pi[&"A"] - 1.0 / 3.0).abs() < 1e-8);
        assert!((pi[&"B"] - 2.0 / 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_stationary_empty_graph() {
        let g: WeightedTransitionGraph<&str> = WeightedTransitionGraph::new();
        assert!(matches!(g.stationary(), Err(Error::NoStationaryDistribution(_))));
    }
}
