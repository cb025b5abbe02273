//! Energy diagnostic
//!
//! Total kinetic plus pairwise potential energy of the current state. Used to
//! check that the integrator keeps energy nearly constant.

use super::states::System;

/// Total energy of `sys`. Pure: no field of `sys` is touched.
///
/// Per body `i`: add `0.5 * m_i * |v_i|^2`, then subtract `m_i * m_j / r_ij`
/// for every `j > i`. Same pair order as the kick.
pub fn report_energy(sys: &System) -> f64 {
    let bodies = sys.bodies();
    let mut e = 0.0;

    for (i, bi) in bodies.iter().enumerate() {
        e += 0.5 * bi.m * bi.v.norm_squared();
        for bj in &bodies[i + 1..] {
            let d = bi.x - bj.x;
            let distance = d.dot(&d).sqrt();
            e -= (bi.m * bj.m) / distance;
        }
    }
    e
}

/// Energies captured before and after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub initial: f64,
    pub last: f64,
}

impl EnergyReport {
    /// Relative energy change `|last - initial| / |initial|`
    pub fn drift(&self) -> f64 {
        ((self.last - self.initial) / self.initial).abs()
    }
}
