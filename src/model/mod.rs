//! # Tabular Data Model
//!
//! Cell values for the column transformers in [`crate::table`].
//!
//! Design rule: pure data. No I/O, no state.

pub mod value;

pub use value::Value;
