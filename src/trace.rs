//! Synthetic access traces.
//!
//! A trace is an ordered list of page ids. Every generator is seeded, so the
//! same [`TraceSpec`] always yields the same trace and simulation results are
//! reproducible.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{PolicyError, Result};

/// Shape of a generated workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceKind {
    /// Pages `1..=length` in order, never reused. Every policy misses every access.
    Sequential,
    /// Page `i % working_set` at position `i`; a loop over a fixed working set.
    Cyclic { working_set: u64 },
    /// Independent uniform draws from `1..=pages`.
    Uniform { pages: u64 },
    /// Uniform over `1..=pages`, but every `hot_every`-th position is drawn
    /// from the hot set `1..=hot_pages` instead.
    Hotspot {
        pages: u64,
        hot_pages: u64,
        hot_every: usize,
    },
}

impl TraceKind {
    pub fn name(&self) -> &'static str {
        match self {
            TraceKind::Sequential => "sequential",
            TraceKind::Cyclic { .. } => "cyclic",
            TraceKind::Uniform { .. } => "uniform",
            TraceKind::Hotspot { .. } => "hotspot",
        }
    }

    /// Parse a kind name, using the default parameters for that kind.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sequential" => Ok(TraceKind::Sequential),
            "cyclic" => Ok(TraceKind::Cyclic { working_set: 100 }),
            "uniform" => Ok(TraceKind::Uniform { pages: 100 }),
            "hotspot" => Ok(TraceKind::default()),
            other => Err(PolicyError::invalid(
                "trace",
                format!("unknown trace kind '{other}' (expected sequential, cyclic, uniform or hotspot)"),
            )),
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            TraceKind::Sequential => Ok(()),
            TraceKind::Cyclic { working_set } => {
                if working_set == 0 {
                    return Err(PolicyError::invalid("working_set", "must be at least 1"));
                }
                Ok(())
            }
            TraceKind::Uniform { pages } => {
                if pages == 0 {
                    return Err(PolicyError::invalid("pages", "must be at least 1"));
                }
                Ok(())
            }
            TraceKind::Hotspot {
                pages,
                hot_pages,
                hot_every,
            } => {
                if pages == 0 {
                    return Err(PolicyError::invalid("pages", "must be at least 1"));
                }
                if hot_pages == 0 || hot_pages > pages {
                    return Err(PolicyError::invalid(
                        "hot_pages",
                        format!("must be between 1 and pages ({pages})"),
                    ));
                }
                if hot_every == 0 {
                    return Err(PolicyError::invalid("hot_every", "must be at least 1"));
                }
                Ok(())
            }
        }
    }
}

impl Default for TraceKind {
    fn default() -> Self {
        TraceKind::Hotspot {
            pages: 100,
            hot_pages: 10,
            hot_every: 5,
        }
    }
}

impl fmt::Display for TraceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceKind::Sequential => write!(f, "sequential"),
            TraceKind::Cyclic { working_set } => write!(f, "cyclic(working_set={working_set})"),
            TraceKind::Uniform { pages } => write!(f, "uniform(pages={pages})"),
            TraceKind::Hotspot {
                pages,
                hot_pages,
                hot_every,
            } => write!(f, "hotspot(pages={pages}, hot_pages={hot_pages}, every={hot_every})"),
        }
    }
}

/// Everything needed to reproduce a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSpec {
    #[serde(flatten)]
    pub kind: TraceKind,
    pub length: usize,
    pub seed: u64,
}

impl Default for TraceSpec {
    fn default() -> Self {
        Self {
            kind: TraceKind::default(),
            length: 1_000_000,
            seed: 42,
        }
    }
}

impl TraceSpec {
    pub fn new(kind: TraceKind, length: usize) -> Self {
        Self {
            kind,
            length,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject zero-sized page ranges. A zero `length` is allowed.
    pub fn validate(&self) -> Result<()> {
        self.kind.validate()
    }

    /// Build the trace.
    ///
    /// # Errors
    /// `InvalidConfiguration` when the kind's parameters are out of range.
    pub fn generate(&self) -> Result<Vec<u64>> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let trace = match self.kind {
            TraceKind::Sequential => (1..=self.length as u64).collect(),
            TraceKind::Cyclic { working_set } => {
                (0..self.length as u64).map(|i| i % working_set).collect()
            }
            TraceKind::Uniform { pages } => (0..self.length)
                .map(|_| rng.gen_range(1..=pages))
                .collect(),
            TraceKind::Hotspot {
                pages,
                hot_pages,
                hot_every,
            } => (0..self.length)
                .map(|i| {
                    if i % hot_every == 0 {
                        rng.gen_range(1..=hot_pages)
                    } else {
                        rng.gen_range(1..=pages)
                    }
                })
                .collect(),
        };
        Ok(trace)
    }
}

impl fmt::Display for TraceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} (seed {})", self.kind, self.length, self.seed)
    }
}
