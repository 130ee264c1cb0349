//! Simulation configuration.
//!
//! A [`SimulationConfig`] can be read from a JSON file, e.g.
//!
//! ```json
//! {
//!     "capacity": 50,
//!     "trace": { "kind": "sequential", "length": 1000000 },
//!     "policies": ["fifo", "lru", "lfu"]
//! }
//! ```
//!
//! Missing fields take their defaults. A `trace` object must name its `kind`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::policies::PolicyType;
use crate::trace::TraceSpec;
use crate::{PolicyError, Result};

/// Default number of resident pages.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Capacity shared by every simulated policy
    pub capacity: usize,
    /// Workload fed to every policy
    pub trace: TraceSpec,
    /// Policies to run, in report order
    pub policies: Vec<PolicyType>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            trace: TraceSpec::default(),
            policies: PolicyType::all().to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let config: SimulationConfig = serde_json::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), "loaded simulation config");
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(PolicyError::invalid("capacity", "must be at least 1"));
        }
        if self.policies.is_empty() {
            return Err(PolicyError::invalid("policies", "must name at least one policy"));
        }
        self.trace.validate()
    }
}
