use nbsim::{bench_kick_scaling, bench_scenario, KickConfig, ScenarioConfig};

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let steps = 100_000;

    println!("Outer planets, {} steps", steps);
    println!("kick,seconds,steps_per_s,pairs_per_s");
    for kick in [KickConfig::Direct, KickConfig::Parallel] {
        let mut cfg = ScenarioConfig::outer_planets();
        cfg.engine.kick = kick;
        let tp = bench_scenario(cfg, steps)?;
        println!(
            "{:?},{:.4},{:.0},{:.3e}",
            kick,
            tp.seconds,
            tp.steps_per_sec(),
            tp.pairs_per_sec()
        );
    }

    println!();
    bench_kick_scaling();

    Ok(())
}
