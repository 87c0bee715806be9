//! Storm telecom simulator entry point: CLI wiring and config-driven clock construction.

use std::path::Path;
use std::process;

use storm_telecom_sim::config::ScenarioConfig;
use storm_telecom_sim::io::export::export_csv;
use storm_telecom_sim::sim::kpi::RunSummary;
use tracing_subscriber::EnvFilter;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    ticks_override: Option<usize>,
    intensity_override: Option<f64>,
    telemetry_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("storm-telecom-sim: telecom network degradation under a tropical storm");
    eprintln!();
    eprintln!("Usage: storm-telecom-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --ticks <n>              Override number of ticks to run");
    eprintln!("  --intensity <f64>        Override initial storm intensity (0.0-1.0)");
    eprintln!("  --telemetry-out <path>   Export per-zone tick reports to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Keep the clock running behind the REST API");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the buffalo preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

/// Returns the value following flag `args[*i]`, or exits with an error.
fn flag_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> &'a str {
    let flag = &args[*i];
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires {what}");
        process::exit(1);
    }
    &args[*i]
}

/// Parses the value following a flag, or exits with an error.
fn parse_flag<T: std::str::FromStr>(args: &[String], i: &mut usize, ty: &str) -> T {
    let flag = args[*i].clone();
    let raw = flag_value(args, i, &format!("a {ty} argument"));
    raw.parse::<T>().unwrap_or_else(|_| {
        eprintln!("error: {flag} value \"{raw}\" is not a valid {ty}");
        process::exit(1);
    })
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        ticks_override: None,
        intensity_override: None,
        telemetry_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            "--preset" => {
                cli.preset = Some(flag_value(&args, &mut i, "a name argument").to_string());
            }
            "--seed" => cli.seed_override = Some(parse_flag(&args, &mut i, "u64")),
            "--ticks" => cli.ticks_override = Some(parse_flag(&args, &mut i, "usize")),
            "--intensity" => cli.intensity_override = Some(parse_flag(&args, &mut i, "f64")),
            "--telemetry-out" => {
                cli.telemetry_out = Some(flag_value(&args, &mut i, "a path argument").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => cli.port = parse_flag(&args, &mut i, "u16"),
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
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then buffalo default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::buffalo())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(ticks) = cli.ticks_override {
        scenario.simulation.ticks = ticks;
    }
    if let Some(intensity) = cli.intensity_override {
        scenario.storm.intensity = intensity;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let mut clock = scenario.build_clock().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    let reports: Vec<_> = (0..scenario.simulation.ticks)
        .map(|_| clock.tick())
        .collect();

    for r in &reports {
        println!("[tick {:>4}] {}", r.tick, r.storm);
        for z in &r.zones {
            println!("    {z}");
        }
    }

    println!("\n{}", RunSummary::from_reports(&reports));

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&reports, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(storm_telecom_sim::api::AppState::new(clock));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(storm_telecom_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
