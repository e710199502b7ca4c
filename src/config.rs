//! Graph configuration.
//!
//! ```json
//! { "teleport": 0.15, "eigen_decimals": 6 }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of decimals an eigenvalue is rounded to before it is
/// compared against 1.
pub const DEFAULT_EIGEN_DECIMALS: u32 = 6;

/// Upper bound for `eigen_decimals`. Past this, rounding is below f64 resolution.
pub const MAX_EIGEN_DECIMALS: u32 = 15;

/// Configuration for a `WeightedTransitionGraph`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkovConfig {
    /// Initial teleportation constant, in [0, 1].
    pub teleport: f64,
    /// Decimals kept when matching eigenvalues against 1.
    pub eigen_decimals: u32,
}

impl Default for MarkovConfig {
    fn default() -> Self {
        Self {
            teleport: 0.0,
            eigen_decimals: DEFAULT_EIGEN_DECIMALS,
        }
    }
}

impl MarkovConfig {
    pub fn with_teleport(mut self, teleport: f64) -> Self {
        self.teleport = teleport;
        self
    }

    pub fn with_eigen_decimals(mut self, decimals: u32) -> Self {
        self.eigen_decimals = decimals;
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_teleport(self.teleport)?;
        if self.eigen_decimals > MAX_EIGEN_DECIMALS {
            return Err(Error::InvalidParameter(format!(
                "eigen_decimals must be at most {MAX_EIGEN_DECIMALS}, got {}",
                self.eigen_decimals
            )));
        }
        Ok(())
    }
}

/// Reject teleportation constants outside [0, 1]. NaN is rejected too.
pub(crate) fn validate_teleport(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidParameter(format!(
            "The teleportation constant must be between 0 and 1, got {p}."
        )));
    }
    Ok(())
}
