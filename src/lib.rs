//! # markov-rs — Weighted Transition Graphs and Markov Chains
//!
//! A small in-memory directed graph whose edge weights define a Markov chain,
//! plus a pair of column transformers for tabular preprocessing.
//!
//! ## Design Principles
//!
//! 1. **Square adjacency**: every state always has a weight (possibly zero) to
//!    every other state, itself included. Mutations keep it that way.
//! 2. **Stable ordering**: matrices and distributions follow state insertion order.
//! 3. **Explicit randomness**: sampling takes the caller's `Rng`; no global generator.
//! 4. **No hidden state**: the graph is an ordinary owned value, no registry.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use markov_rs::WeightedTransitionGraph;
//!
//! # fn example() -> markov_rs::Result<()> {
//! let mut graph = WeightedTransitionGraph::new();
//! graph
//!     .add_link_with("A", "B", 1.0, true)?
//!     .add_link_with("B", "A", 1.0, true)?
//!     .set_teleport(0.15)?;
//!
//! let matrix = graph.transition_matrix();
//! let pi = graph.stationary()?;
//!
//! let mut rng = rand::thread_rng();
//! let next = graph.transition(&"A", &mut rng)?;
//! # let _ = (matrix, pi, next);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `markov` | `WeightedTransitionGraph`, transition matrix, stationary distribution |
//! | `config` | `MarkovConfig` (teleport default, eigenvalue rounding) |
//! | `export` | Plain-text adjacency table |
//! | `model` | `Value`, the tabular cell type |
//! | `table` | `Table`, `Transformer`, `ColumnSelector`, `ColumnDropper` |

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod export;
pub mod markov;
pub mod model;
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::MarkovConfig;
pub use markov::WeightedTransitionGraph;
pub use model::Value;
pub use table::{Column, ColumnDropper, ColumnSelector, Table, Transformer};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{} not instantiated as a state. Use add_state or enable auto-add.", .labels.join(", "))]
    MissingState { labels: smallvec::SmallVec<[String; 2]> },

    #[error("Invalid state {0}. Try add_state first.")]
    UnknownState(String),

    #[error("No transitions from state {0} and teleportation constant is 0. Change the teleportation constant or add more links.")]
    NoTransition(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("There does not exist a stationary distribution: {0}")]
    NoStationaryDistribution(String),

    #[error("Columns not found: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
