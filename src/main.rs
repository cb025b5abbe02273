use nbsim::{time_steps, KickConfig, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KickArg {
    Direct,
    Parallel,
}

impl From<KickArg> for KickConfig {
    fn from(k: KickArg) -> Self {
        match k {
            KickArg::Direct => KickConfig::Direct,
            KickArg::Parallel => KickConfig::Parallel,
        }
    }
}

/// Integrate the outer solar system and print total energy before and after
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of fixed steps to run
    steps: u64,

    /// Body whose velocity cancels the total momentum (defaults to the scenario's)
    reference: Option<String>,

    /// YAML scenario file; the built-in outer planets are used when omitted.
    /// STEPS always replaces the file's `parameters.steps`
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Pairwise kick implementation (defaults to the scenario's)
    #[arg(short, long, value_enum)]
    kick: Option<KickArg>,

    /// Log step throughput of the run
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<ScenarioConfig> {
    let mut cfg = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => ScenarioConfig::outer_planets(),
    };

    // The positional count wins over the scenario file
    cfg.parameters.steps = args.steps;
    if let Some(reference) = &args.reference {
        cfg.reference = reference.clone();
    }
    if let Some(kick) = args.kick {
        cfg.engine.kick = kick.into();
    }

    debug!("{:?}", cfg);
    Ok(cfg)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // --bench reports through the logger, so it needs info level by default
    let default_level = if args.bench { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let cfg = load_scenario(&args)?;
    let mut scenario = Scenario::build(cfg).context("invalid scenario")?;

    println!("{:.9}", scenario.energy());

    let steps = scenario.parameters.steps;
    if args.bench {
        time_steps(&mut scenario, steps);
    } else {
        scenario.run_steps(steps);
    }

    println!("{:.9}", scenario.energy());

    Ok(())
}
