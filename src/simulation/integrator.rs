//! Fixed-step kick-drift integrator for the N-body system
//!
//! One step: velocities are kicked with the pairwise gravity evaluated at the
//! current positions, then every position drifts with the velocity it just
//! received. Keeping this order is what gives the scheme its bounded energy
//! error over long runs.

use super::forces::{DirectKick, PairwiseKick};
use super::params::Parameters;
use super::states::System;

/// Advance the system by one step of `params.dt` using the given kick.
/// Updates velocities, positions and `sys.t` in place.
pub fn kick_drift(sys: &mut System, kick: &dyn PairwiseKick, params: &Parameters) {
    step(sys, kick, params.dt);
}

/// Advance the system by one step of `dt` with the sequential direct kick.
pub fn advance(dt: f64, sys: &mut System) {
    step(sys, &DirectKick, dt);
}

/// Run `steps` consecutive steps. Zero steps leaves `sys` untouched.
pub fn run_steps(sys: &mut System, kick: &dyn PairwiseKick, dt: f64, steps: u64) {
    for _ in 0..steps {
        step(sys, kick, dt);
    }
}

fn step(sys: &mut System, kick: &dyn PairwiseKick, dt: f64) {
    // Kick: v_n+1 = v_n + dt * a(x_n)
    kick.kick(dt, sys);

    // Drift: x_n+1 = x_n + dt * v_n+1
    sys.drift(dt);

    sys.t += dt;
}
