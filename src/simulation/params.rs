//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed integration step size,
//! - number of steps to run.
//!
//! Unit constants for the heliocentric scenario also live here: masses are
//! expressed in solar masses times `4 pi^2` so that `G = 1` with AU and years.

use std::f64::consts::PI;

/// Gravitational parameter of one solar mass in AU^3 / year^2
pub const SOLAR_MASS: f64 = 4.0 * PI * PI;

/// Scales the per-day velocity literals of the body table
pub const DAYS_PER_YEAR: f64 = 365.24;

/// Step size used by the reference scenario
pub const DEFAULT_DT: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub dt: f64,      // fixed time step
    pub steps: u64,   // number of steps for a full run
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            steps: 1000,
        }
    }
}
