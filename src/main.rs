//! PV simulator entry point — CLI wiring and config-driven engine
//! construction.

use std::path::Path;
use std::process;

use pv_sim::config::ScenarioConfig;
use pv_sim::io::export::export_csv;
use pv_sim::io::weather::read_weather_csv;
use pv_sim::sim::kpi::KpiReport;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    weather_path: Option<String>,
    telemetry_out: Option<String>,
}

fn print_help() {
    eprintln!("pv-sim — Photovoltaic system simulator");
    eprintln!();
    eprintln!("Usage: pv-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, stormy, rooftop)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --weather <path>         Drive the run from a weather CSV file");
    eprintln!("  --telemetry-out <path>   Export step records to CSV");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        weather_path: None,
        telemetry_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--weather" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --weather requires a path argument");
                    process::exit(1);
                }
                cli.weather_path = Some(args[i].clone());
            }
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline.
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load measured weather if requested
    let weather = match cli.weather_path {
        Some(ref path) => match read_weather_csv(Path::new(path)) {
            Ok(samples) => Some(samples),
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => None,
    };

    // Build and run
    let mut engine = match scenario.build_engine(weather) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let nameplate_w = engine.nameplate_w();
    let dt_hours = engine.timing().dt_hours;
    let results = engine.run();

    // Print per-step results
    for r in &results {
        println!("{r}");
    }

    // Print KPI report
    let kpi = KpiReport::from_results(&results, dt_hours, nameplate_w);
    println!("\n{kpi}");

    // Export CSV if requested
    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
}
