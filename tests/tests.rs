use nbsim::{
    advance, kick_drift, offset_momentum, report_energy, run_steps, total_momentum, Body,
    DirectKick, KickConfig, NVec3, PairwiseKick, ParallelKick, Parameters, Scenario,
    ScenarioConfig, System,
};

/// Build a simple 2-body System separated along x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> System {
    System::new(vec![
        Body::new("a", NVec3::new(-dist / 2.0, 0.0, 0.0), NVec3::new(0.0, 0.3, 0.0), m1),
        Body::new("b", NVec3::new(dist / 2.0, 0.0, 0.0), NVec3::new(0.0, -0.2, 0.1), m2),
    ])
}

/// Reference scenario, momentum already cancelled
pub fn outer_planets() -> Scenario {
    Scenario::build(ScenarioConfig::outer_planets()).expect("built-in scenario is valid")
}

pub fn outer_planets_with(kick: KickConfig) -> Scenario {
    let mut cfg = ScenarioConfig::outer_planets();
    cfg.engine.kick = kick;
    Scenario::build(cfg).expect("built-in scenario is valid")
}

fn formatted(e: f64) -> String {
    format!("{:.9}", e)
}

// ==================================================================================
// Momentum tests
// ==================================================================================

#[test]
fn offset_momentum_zeroes_total_momentum() {
    let scenario = outer_planets();
    let p = total_momentum(&scenario.system);
    for c in p.iter() {
        assert!(c.abs() < 1e-12, "residual momentum {:?}", p);
    }
}

#[test]
fn offset_momentum_only_touches_reference_velocity() {
    let mut sys = two_body_system(1.0, 2.0, 3.0);
    let before = sys.clone();

    offset_momentum(1, &mut sys);

    assert_eq!(sys.velocity(0), before.velocity(0));
    assert_eq!(sys.position(0), before.position(0));
    assert_eq!(sys.position(1), before.position(1));
    assert_ne!(sys.velocity(1), before.velocity(1));

    let p = total_momentum(&sys);
    assert!(p.norm() < 1e-15, "residual momentum {:?}", p);
}

#[test]
fn offset_momentum_ignores_prior_reference_velocity() {
    // Reference body starts moving; the correction must still cancel everything
    let mut sys = two_body_system(1.0, 5.0, 1.0);
    *sys.velocity_mut(0) = NVec3::new(10.0, -4.0, 2.0);

    offset_momentum(0, &mut sys);

    let expected = -sys.velocity(1) * sys.mass(1) / sys.mass(0);
    assert_eq!(sys.velocity(0), expected);
    assert!(total_momentum(&sys).norm() < 1e-15);
}

#[test]
fn non_sun_reference_also_cancels_momentum() {
    let mut cfg = ScenarioConfig::outer_planets();
    cfg.reference = "jupiter".to_string();
    let scenario = Scenario::build(cfg).expect("jupiter is a valid reference");

    assert_eq!(scenario.reference, 1);
    let p = total_momentum(&scenario.system);
    for c in p.iter() {
        assert!(c.abs() < 1e-12, "residual momentum {:?}", p);
    }
}

#[test]
fn momentum_stays_near_zero_over_a_run() {
    let mut scenario = outer_planets();
    scenario.run_steps(1000);
    let p = total_momentum(&scenario.system);
    for c in p.iter() {
        assert!(c.abs() < 1e-12, "momentum drifted to {:?}", p);
    }
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn advance_newton_third_law() {
    let mut sys = two_body_system(1.0, 2.0, 3.0);
    let before = sys.clone();

    advance(0.01, &mut sys);

    let dv0 = sys.velocity(0) - before.velocity(0);
    let dv1 = sys.velocity(1) - before.velocity(1);
    let net = dv0 * sys.mass(0) + dv1 * sys.mass(1);

    assert!(net.norm() < 1e-15, "Net momentum change not zero: {:?}", net);
}

#[test]
fn advance_pulls_bodies_together() {
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    *sys.velocity_mut(0) = NVec3::zeros();
    *sys.velocity_mut(1) = NVec3::zeros();

    advance(0.01, &mut sys);

    // a starts on -x, b on +x
    assert!(sys.velocity(0).x > 0.0, "a is not pulled toward b");
    assert!(sys.velocity(1).x < 0.0, "b is not pulled toward a");
}

#[test]
fn advance_kicks_then_drifts() {
    // Bodies at rest: the drift only moves them if it sees the new velocity
    let mut sys = two_body_system(2.0, 1.0, 1.0);
    *sys.velocity_mut(0) = NVec3::zeros();
    *sys.velocity_mut(1) = NVec3::zeros();
    let x0 = sys.position(0);

    advance(0.1, &mut sys);

    // dt / r^3 = 0.1 / 8, dv = d * m * mag with d = -2 along x
    let dv = 2.0 * 1.0 * (0.1 / 8.0);
    assert!((sys.velocity(0).x - dv).abs() < 1e-15);
    assert!((sys.position(0).x - (x0.x + 0.1 * dv)).abs() < 1e-15);
    assert!((sys.t - 0.1).abs() < 1e-15);
}

#[test]
fn kick_drift_matches_advance_for_direct_kick() {
    let mut a = outer_planets().system;
    let mut b = a.clone();
    let params = Parameters::default();

    for _ in 0..10 {
        advance(params.dt, &mut a);
        kick_drift(&mut b, &DirectKick, &params);
    }
    assert_eq!(a, b);
}

#[test]
fn zero_steps_is_a_no_op() {
    let mut scenario = outer_planets();
    let before = scenario.system.clone();
    let e0 = scenario.energy();

    scenario.run_steps(0);

    assert_eq!(scenario.system, before);
    assert_eq!(scenario.energy(), e0);
}

#[test]
fn coincident_bodies_propagate_non_finite_values() {
    // Zero separation: dt / r^3 is infinite and 0 * inf is NaN. Nothing panics.
    let mut sys = two_body_system(0.0, 1.0, 2.0);
    assert_eq!(report_energy(&sys), f64::NEG_INFINITY);

    advance(0.01, &mut sys);
    for i in 0..sys.len() {
        assert!(sys.velocity(i).iter().all(|c| c.is_nan()), "body {i}: {:?}", sys.velocity(i));
        assert!(sys.position(i).iter().all(|c| c.is_nan()), "body {i}: {:?}", sys.position(i));
    }
    assert!(report_energy(&sys).is_nan());

    let mut par = two_body_system(0.0, 1.0, 2.0);
    ParallelKick::default().kick(0.01, &mut par);
    assert!(par.velocity(0).iter().all(|c| c.is_nan()));
    assert!(!report_energy(&par).is_finite());
}

// ==================================================================================
// Energy tests
// ==================================================================================

#[test]
fn report_energy_is_pure() {
    let scenario = outer_planets();
    let before = scenario.system.clone();

    let e1 = report_energy(&scenario.system);
    let e2 = report_energy(&scenario.system);

    assert_eq!(e1, e2);
    assert_eq!(scenario.system, before);
}

#[test]
fn report_energy_two_bodies_at_rest() {
    let mut sys = two_body_system(2.0, 3.0, 4.0);
    *sys.velocity_mut(0) = NVec3::zeros();
    *sys.velocity_mut(1) = NVec3::zeros();

    assert_eq!(report_energy(&sys), -(3.0 * 4.0) / 2.0);
}

#[test]
fn energy_is_nearly_conserved() {
    let mut scenario = outer_planets();
    let report = scenario.run();

    assert!(report.drift() < 1e-4, "relative drift {}", report.drift());
    assert_ne!(report.initial, report.last);
}

#[test]
fn reference_energies_after_1000_steps() {
    let mut scenario = outer_planets();
    let report = scenario.run();

    assert_eq!(formatted(report.initial), "-0.169075164");
    assert_eq!(formatted(report.last), "-0.169087605");
}

#[test]
fn reference_energies_from_bundled_yaml() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenarios/outer_planets.yaml");
    let cfg = ScenarioConfig::load(path).expect("bundled scenario loads");
    let mut scenario = Scenario::build(cfg).expect("bundled scenario is valid");
    let report = scenario.run();

    assert_eq!(formatted(report.initial), "-0.169075164");
    assert_eq!(formatted(report.last), "-0.169087605");
}

// ==================================================================================
// Parallel kick tests
// ==================================================================================

#[test]
fn parallel_kick_is_deterministic() {
    let mut a = outer_planets_with(KickConfig::Parallel);
    let mut b = outer_planets_with(KickConfig::Parallel);

    a.run_steps(500);
    b.run_steps(500);

    assert_eq!(a.system, b.system);
}

#[test]
fn parallel_kick_does_not_depend_on_thread_count() {
    let sys = outer_planets().system;
    let kick = ParallelKick::new(3);

    let run_on = |threads: usize| {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("thread pool");
        let mut s = sys.clone();
        pool.install(|| run_steps(&mut s, &kick, 0.01, 200));
        s
    };

    assert_eq!(run_on(1), run_on(4));
}

#[test]
fn parallel_kick_agrees_with_direct_kick() {
    let mut direct = outer_planets_with(KickConfig::Direct);
    let mut parallel = outer_planets_with(KickConfig::Parallel);

    let rd = direct.run();
    let rp = parallel.run();

    assert!(
        ((rd.last - rp.last) / rd.last).abs() < 1e-12,
        "direct {} vs parallel {}",
        rd.last,
        rp.last
    );
    assert!(rp.drift() < 1e-4);
}

#[test]
fn parallel_kick_newton_third_law() {
    for block in [1, 2, 64] {
        let mut sys = nbsim::make_system(12);
        let before = sys.clone();

        ParallelKick::new(block).kick(0.01, &mut sys);

        let net = (0..sys.len()).fold(NVec3::zeros(), |p, i| {
            p + (sys.velocity(i) - before.velocity(i)) * sys.mass(i)
        });
        assert!(net.norm() < 1e-15, "block {}: net momentum change {:?}", block, net);
    }
}

#[test]
fn parallel_kick_single_body_is_a_no_op() {
    let mut sys = System::new(vec![Body::new(
        "lonely",
        NVec3::new(1.0, 2.0, 3.0),
        NVec3::new(0.5, 0.0, 0.0),
        1.0,
    )]);
    let before = sys.clone();

    ParallelKick::default().kick(0.01, &mut sys);
    DirectKick.kick(0.01, &mut sys);

    assert_eq!(sys, before);
}

// ==================================================================================
// Benchmark helpers
// ==================================================================================

#[test]
fn bench_scenario_reports_run_size() {
    let tp = nbsim::bench_scenario(ScenarioConfig::outer_planets(), 10).expect("valid scenario");
    assert_eq!(tp.bodies, 5);
    assert_eq!(tp.steps, 10);
    assert!(tp.seconds >= 0.0);
}

#[test]
fn bench_scenario_rejects_invalid_config() {
    let mut cfg = ScenarioConfig::outer_planets();
    cfg.reference = "vulcan".to_string();
    assert!(nbsim::bench_scenario(cfg, 10).is_err());
}
