//! Total linear momentum and the one-time momentum normalizer

use super::states::{NVec3, System};

/// `sum(m_i * v_i)` accumulated in index order
pub fn total_momentum(sys: &System) -> NVec3 {
    sys.bodies()
        .iter()
        .fold(NVec3::zeros(), |p, b| p + b.v * b.m)
}

/// Give body `reference` the velocity that cancels the momentum of every
/// other body, so the system as a whole stays at rest.
///
/// The reference body's own prior velocity is ignored. Panics if `reference`
/// is not a valid index.
pub fn offset_momentum(reference: usize, sys: &mut System) {
    let m_ref = sys.mass(reference);

    let mut p = NVec3::zeros();
    for (i, b) in sys.bodies().iter().enumerate() {
        if i != reference {
            p += b.v * b.m;
        }
    }

    *sys.velocity_mut(reference) = -p / m_ref;
}
