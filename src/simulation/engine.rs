//! High-level runtime engine settings
//!
//! Selects the pairwise kick used when building and running a `Scenario`

use crate::configuration::config::{EngineConfig, KickConfig};
use crate::simulation::forces::{DirectKick, PairwiseKick, ParallelKick};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    pub kick: KickConfig,      // direct or parallel
    pub pairs_per_task: usize, // minimum pair block size, parallel only
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            kick: cfg.kick,
            pairs_per_task: cfg
                .pairs_per_task
                .unwrap_or(ParallelKick::DEFAULT_PAIRS_PER_TASK),
        }
    }

    /// Kick implementation matching these settings
    pub fn build_kick(&self) -> Box<dyn PairwiseKick + Send + Sync> {
        match self.kick {
            KickConfig::Direct => Box::new(DirectKick),
            KickConfig::Parallel => Box::new(ParallelKick::new(self.pairs_per_task)),
        }
    }
}
