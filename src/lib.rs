pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::forces::{PairwiseKick, DirectKick, ParallelKick, pair_count};
pub use simulation::integrator::{advance, kick_drift, run_steps};
pub use simulation::momentum::{offset_momentum, total_momentum};
pub use simulation::energy::{report_energy, EnergyReport};
pub use simulation::params::{Parameters, SOLAR_MASS, DAYS_PER_YEAR, DEFAULT_DT};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConfigError, KickConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{Throughput, bench_scenario, bench_kick_scaling, time_steps, make_system};
