//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – how the pairwise kick is evaluated (direct or parallel)
//! - [`ParametersConfig`] – time step and step count
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper, plus the reference body name
//!
//! # YAML format
//! The bundled reference scenario (`scenarios/outer_planets.yaml`) looks like:
//!
//! ```yaml
//! engine:
//!   kick: "direct"          # or "parallel"
//!   pairs_per_task: 64      # parallel only
//!
//! parameters:
//!   dt: 0.01                # fixed step size
//!   steps: 1000             # number of steps (default 1000)
//!
//! reference: "sun"          # body whose velocity cancels total momentum
//!
//! bodies:
//!   - name: "sun"
//!     x: [0.0, 0.0, 0.0]
//!     v: [0.0, 0.0, 0.0]    # per-day literal, scaled by DAYS_PER_YEAR
//!     m: 1.0                # solar masses, scaled by SOLAR_MASS
//! ```
//!
//! Velocity and mass literals are scaled when the runtime [`crate::Scenario`]
//! is built, not here.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::{Parameters, DEFAULT_DT};

/// Errors detected while loading or validating a scenario.
/// All of them abort before any state is normalized or integrated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("scenario has no bodies")]
    NoBodies,
    #[error("body name `{0}` appears more than once")]
    DuplicateName(String),
    #[error("reference body `{0}` is not part of the scenario")]
    UnknownReference(String),
    #[error("body `{name}` has non-positive or non-finite mass {m}")]
    InvalidMass { name: String, m: f64 },
    #[error("body `{name}`: `{field}` must have 3 components, got {len}")]
    BadVector {
        name: String,
        field: &'static str,
        len: usize,
    },
    #[error("body `{name}`: `{field}` contains a non-finite component")]
    NonFinite { name: String, field: &'static str },
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimestep(f64),
    #[error("step count must be at least 1")]
    ZeroSteps,
}

/// How the pairwise kick is evaluated
/// `kick: "direct"` or `kick: "parallel"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KickConfig {
    #[serde(rename = "direct")] // Sequential i < j loop, reproducible to the last bit
    #[default]
    Direct,

    #[serde(rename = "parallel")] // Pair blocks on the rayon pool, merged in a fixed order
    Parallel,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub kick: KickConfig, // kick strategy
    #[serde(default)]
    pub pairs_per_task: Option<usize>, // minimum pair block size for the parallel kick
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_steps() -> u64 {
    Parameters::default().steps
}

/// Global numerical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_dt")]
    pub dt: f64,    // fixed step size
    #[serde(default = "default_steps")]
    pub steps: u64, // number of steps; the CLI's positional count replaces it
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // Unique label, used to pick the reference body
    pub x: Vec<f64>,  // Initial position in AU
    pub v: Vec<f64>,  // Velocity literal, multiplied by DAYS_PER_YEAR at build time
    pub m: f64,       // Mass in solar masses, multiplied by SOLAR_MASS at build time
}

fn default_reference() -> String {
    "sun".to_string()
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Kick selection
    pub parameters: ParametersConfig, // Step size and count
    #[serde(default = "default_reference")]
    pub reference: String, // Name of the momentum reference body
    pub bodies: Vec<BodyConfig>, // Initial state of the system, in order
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text. Does not validate.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read a scenario from a YAML file. Does not validate.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Check every configuration-time precondition of the engine
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.parameters;
        if !(p.dt.is_finite() && p.dt > 0.0) {
            return Err(ConfigError::InvalidTimestep(p.dt));
        }
        if p.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let mut seen = HashSet::new();
        for b in &self.bodies {
            if !seen.insert(b.name.as_str()) {
                return Err(ConfigError::DuplicateName(b.name.clone()));
            }
            check_vector(&b.name, "x", &b.x)?;
            check_vector(&b.name, "v", &b.v)?;
            if !(b.m.is_finite() && b.m > 0.0) {
                return Err(ConfigError::InvalidMass {
                    name: b.name.clone(),
                    m: b.m,
                });
            }
        }

        if !seen.contains(self.reference.as_str()) {
            return Err(ConfigError::UnknownReference(self.reference.clone()));
        }
        Ok(())
    }

    /// Sun and the four giant planets, heliocentric, with the sun as reference.
    pub fn outer_planets() -> Self {
        let body = |name: &str, x: [f64; 3], v: [f64; 3], m: f64| BodyConfig {
            name: name.to_string(),
            x: x.to_vec(),
            v: v.to_vec(),
            m,
        };

        Self {
            engine: EngineConfig::default(),
            parameters: ParametersConfig {
                dt: DEFAULT_DT,
                steps: default_steps(),
            },
            reference: default_reference(),
            bodies: vec![
                body("sun", [0.0, 0.0, 0.0], [0.0, 0.0, 0.0], 1.0),
                body(
                    "jupiter",
                    [
                        4.84143144246472090e+00,
                        -1.16032004402742839e+00,
                        -1.03622044471123109e-01,
                    ],
                    [
                        1.66007664274403694e-03,
                        7.69901118419740425e-03,
                        -6.90460016972063023e-05,
                    ],
                    9.54791938424326609e-04,
                ),
                body(
                    "saturn",
                    [
                        8.34336671824457987e+00,
                        4.12479856412430479e+00,
                        -4.03523417114321381e-01,
                    ],
                    [
                        -2.76742510726862411e-03,
                        4.99852801234917238e-03,
                        2.30417297573763929e-05,
                    ],
                    2.85885980666130812e-04,
                ),
                body(
                    "uranus",
                    [
                        1.28943695621391310e+01,
                        -1.51111514016986312e+01,
                        -2.23307578892655734e-01,
                    ],
                    [
                        2.96460137564761618e-03,
                        2.37847173959480950e-03,
                        -2.96589568540237556e-05,
                    ],
                    4.36624404335156298e-05,
                ),
                body(
                    "neptune",
                    [
                        1.53796971148509165e+01,
                        -2.59193146099879641e+01,
                        1.79258772950371181e-01,
                    ],
                    [
                        2.68067772490389322e-03,
                        1.62824170038242295e-03,
                        -9.51592254519715870e-05,
                    ],
                    5.15138902046611451e-05,
                ),
            ],
        }
    }
}

fn check_vector(name: &str, field: &'static str, xs: &[f64]) -> Result<(), ConfigError> {
    if xs.len() != 3 {
        return Err(ConfigError::BadVector {
            name: name.to_string(),
            field,
            len: xs.len(),
        });
    }
    if xs.iter().any(|c| !c.is_finite()) {
        return Err(ConfigError::NonFinite {
            name: name.to_string(),
            field,
        });
    }
    Ok(())
}
