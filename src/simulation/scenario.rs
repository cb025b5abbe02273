//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0, momentum already cancelled)
//! - the index of the reference body
//! - the active pairwise kick

use log::{debug, info, warn};

use crate::configuration::config::{BodyConfig, ConfigError, ScenarioConfig};
use crate::simulation::energy::{report_energy, EnergyReport};
use crate::simulation::engine::Engine;
use crate::simulation::forces::PairwiseKick;
use crate::simulation::integrator::run_steps;
use crate::simulation::momentum::{offset_momentum, total_momentum};
use crate::simulation::params::{Parameters, DAYS_PER_YEAR, SOLAR_MASS};
use crate::simulation::states::{Body, NVec3, System};

/// Fully-initialized simulation scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, current system state and
/// the kick used to advance it
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub reference: usize,
    pub kick: Box<dyn PairwiseKick + Send + Sync>,
}

impl Scenario {
    /// Validate `cfg`, build the system and cancel its total momentum.
    ///
    /// Fails before touching any state if the configuration is invalid.
    pub fn build(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body`, scaling the literals
        let bodies: Vec<Body> = cfg.bodies.iter().map(body_from_config).collect();
        let mut system = System::new(bodies);

        // Name -> index once; the engine only deals in indices from here on
        let reference = system
            .index_of(&cfg.reference)
            .ok_or_else(|| ConfigError::UnknownReference(cfg.reference.clone()))?;

        let heaviest = system
            .bodies()
            .iter()
            .map(|b| b.m)
            .fold(f64::MIN, f64::max);
        if system.mass(reference) < heaviest {
            warn!(
                "reference body `{}` is not the heaviest body; its velocity will absorb a large correction",
                cfg.reference
            );
        }

        let parameters = Parameters {
            dt: cfg.parameters.dt,
            steps: cfg.parameters.steps,
        };

        let engine = Engine::from_config(&cfg.engine);
        let kick = engine.build_kick();

        offset_momentum(reference, &mut system);
        debug!(
            "built scenario: {} bodies, reference `{}`, kick {}, residual momentum {:?}",
            system.len(),
            system.name(reference),
            kick.name(),
            total_momentum(&system).as_slice()
        );

        Ok(Self {
            engine,
            parameters,
            system,
            reference,
            kick,
        })
    }

    /// Current total energy
    pub fn energy(&self) -> f64 {
        report_energy(&self.system)
    }

    /// Advance by exactly `steps` steps of `parameters.dt`; 0 is a no-op
    pub fn run_steps(&mut self, steps: u64) {
        run_steps(&mut self.system, self.kick.as_ref(), self.parameters.dt, steps);
    }

    /// Baseline energy, `parameters.steps` steps, final energy
    pub fn run(&mut self) -> EnergyReport {
        let initial = self.energy();
        self.run_steps(self.parameters.steps);
        let last = self.energy();

        let report = EnergyReport { initial, last };
        info!(
            "ran {} steps (dt = {}, kick {}): relative energy drift {:.3e}",
            self.parameters.steps,
            self.parameters.dt,
            self.kick.name(),
            report.drift()
        );
        report
    }
}

fn body_from_config(bc: &BodyConfig) -> Body {
    Body::new(
        bc.name.clone(),
        NVec3::new(bc.x[0], bc.x[1], bc.x[2]),
        NVec3::new(bc.v[0], bc.v[1], bc.v[2]) * DAYS_PER_YEAR,
        bc.m * SOLAR_MASS,
    )
}
