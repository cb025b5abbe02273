use std::time::Instant;

use log::info;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::forces::{DirectKick, PairwiseKick, ParallelKick};
use crate::simulation::integrator::run_steps;
use crate::simulation::params::DEFAULT_DT;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{Body, NVec3, System};

/// Wall-clock cost of a run of fixed steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throughput {
    pub bodies: usize,
    pub steps: u64,
    pub seconds: f64,
}

impl Throughput {
    pub fn steps_per_sec(&self) -> f64 {
        self.steps as f64 / self.seconds
    }

    /// Pair interactions evaluated per second
    pub fn pairs_per_sec(&self) -> f64 {
        let pairs = (self.bodies * self.bodies.saturating_sub(1) / 2) as f64;
        pairs * self.steps_per_sec()
    }
}

/// Time `steps` steps of an already built scenario
pub fn time_steps(scenario: &mut Scenario, steps: u64) -> Throughput {
    let t0 = Instant::now();
    scenario.run_steps(steps);
    let seconds = t0.elapsed().as_secs_f64();

    let tp = Throughput {
        bodies: scenario.system.len(),
        steps,
        seconds,
    };
    info!(
        "{} steps of {} bodies in {:.6} s: {:.0} steps/s, {:.3e} pairs/s",
        steps,
        tp.bodies,
        seconds,
        tp.steps_per_sec(),
        tp.pairs_per_sec()
    );
    tp
}

/// Build `cfg` and time `steps` steps of it
pub fn bench_scenario(cfg: ScenarioConfig, steps: u64) -> Result<Throughput, ConfigError> {
    let mut scenario = Scenario::build(cfg)?;
    Ok(time_steps(&mut scenario, steps))
}

/// Helper to build a deterministic System of size `n`, no rand needed
pub fn make_system(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec3::new(
                (i_f * 0.37).sin() * 5.0 + i_f,
                (i_f * 0.13).cos() * 5.0,
                (i_f * 0.07).sin() * 5.0,
            );
            Body::new(format!("b{i}"), x, NVec3::zeros(), 1.0e-3)
        })
        .collect();
    System::new(bodies)
}

fn time_kick(sys: &System, kick: &dyn PairwiseKick, steps: u64) -> f64 {
    let mut sys = sys.clone();

    // Warm-up
    run_steps(&mut sys, kick, DEFAULT_DT, 1);

    let t0 = Instant::now();
    run_steps(&mut sys, kick, DEFAULT_DT, steps);
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Compare the direct and parallel kicks for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_kick_scaling() {
    println!("N,direct_ms,parallel_ms");

    let direct = DirectKick;
    let parallel = ParallelKick::default();

    for n in [5, 10, 50, 100, 200, 400, 800] {
        // Small n: average over many steps to smooth noise
        let steps = if n <= 100 { 1000 } else { 10 };
        let sys = make_system(n);

        let ms_direct = time_kick(&sys, &direct, steps);
        let ms_parallel = time_kick(&sys, &parallel, steps);

        println!("{},{:.6},{:.6}", n, ms_direct, ms_parallel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_bodies_are_distinct() {
        let sys = make_system(50);
        for i in 0..sys.len() {
            for j in (i + 1)..sys.len() {
                assert!((sys.position(i) - sys.position(j)).norm() > 0.0);
            }
        }
    }

    #[test]
    fn pairs_per_sec_counts_unordered_pairs() {
        let tp = Throughput {
            bodies: 5,
            steps: 100,
            seconds: 2.0,
        };
        assert_eq!(tp.steps_per_sec(), 50.0);
        assert_eq!(tp.pairs_per_sec(), 500.0);
    }
}
