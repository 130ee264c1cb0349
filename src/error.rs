//! Error types for evictsim.
//!
//! Only configuration can fail: once a policy is built, `access` is total.

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// All errors surfaced by the policies, trace generator and simulator.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A construction parameter is out of range (e.g. zero capacity).
    ///
    /// Rejected immediately, never clamped.
    #[error("invalid configuration: {parameter} {reason}")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Internal bookkeeping disagrees with the resident set.
    ///
    /// Only produced by `check_invariants`; indicates a bug.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for `SimulationConfig`.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PolicyError {
    /// Builds an `InvalidConfiguration` error.
    pub fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        PolicyError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Rejects a zero capacity.
pub(crate) fn check_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(PolicyError::invalid("capacity", "must be at least 1"));
    }
    Ok(())
}
