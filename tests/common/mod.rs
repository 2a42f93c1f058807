//! Shared helpers for integration tests.

use pv_sim::config::ScenarioConfig;
use pv_sim::sim::{KpiReport, StepRecord};

/// Builds the named preset with the given day count and seed.
pub fn preset_with(name: &str, days: u32, seed: u64) -> ScenarioConfig {
    let mut cfg = ScenarioConfig::from_preset(name).expect("known preset");
    cfg.simulation.days = days;
    cfg.simulation.seed = seed;
    cfg
}

/// Runs a scenario end to end and returns the records plus the KPI report.
pub fn run_scenario(cfg: &ScenarioConfig) -> (Vec<StepRecord>, KpiReport) {
    let mut engine = cfg.build_engine(None).expect("valid scenario");
    let nameplate_w = engine.nameplate_w();
    let dt_hours = engine.timing().dt_hours;
    let results = engine.run();
    let kpi = KpiReport::from_results(&results, dt_hours, nameplate_w);
    (results, kpi)
}
