//! Core state types for the N-body simulation.
//!
//! Defines the body/system structs:
//! - `Body`   a named point mass using `NVec3` for position and velocity
//! - `System` the fixed, ordered collection of bodies plus the elapsed time `t`
//!
//! The number of bodies is fixed once a `System` is built. Masses are only
//! readable; positions and velocities are written by the integrator and, once,
//! by the momentum normalizer.

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // label used to resolve the reference body
    pub x: NVec3,     // position (AU)
    pub v: NVec3,     // velocity
    pub m: f64,       // mass (solar masses scaled by 4 pi^2)
}

impl Body {
    pub fn new(name: impl Into<String>, x: NVec3, v: NVec3, m: f64) -> Self {
        Self {
            name: name.into(),
            x,
            v,
            m,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    bodies: Vec<Body>, // fixed at construction
    pub t: f64,        // elapsed simulation time
}

impl System {
    /// Build a system at `t = 0`. No validation happens here; see
    /// [`crate::ScenarioConfig::validate`].
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Read-only view of every body, in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn name(&self, i: usize) -> &str {
        &self.bodies[i].name
    }

    pub fn position(&self, i: usize) -> NVec3 {
        self.bodies[i].x
    }

    pub fn velocity(&self, i: usize) -> NVec3 {
        self.bodies[i].v
    }

    pub fn mass(&self, i: usize) -> f64 {
        self.bodies[i].m
    }

    pub fn position_mut(&mut self, i: usize) -> &mut NVec3 {
        &mut self.bodies[i].x
    }

    pub fn velocity_mut(&mut self, i: usize) -> &mut NVec3 {
        &mut self.bodies[i].v
    }

    // Slice keeps the length fixed; only the kick loops use this.
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Index of the first body called `name`, if any
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.name == name)
    }

    /// Forward position update `x += dt * v` for every body
    pub(crate) fn drift(&mut self, dt: f64) {
        for b in self.bodies.iter_mut() {
            b.x += dt * b.v;
        }
    }
}
