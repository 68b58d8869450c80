//! Console front end for the disk simulator.
//!
//! Usage:
//!   disksim <FIFO|LOOK|FLOOK> [ASC|DESC] [--generate|--literal] [--seed N]
//!           [--config FILE] [--json FILE] [--metrics] [--quiet]
//!
//! Example:
//!   cargo run --bin disksim -- FLOOK DESC --generate --seed 7 --json target/flook.json

use std::fs;
use std::process;

use disksim::builder::SchedulerKind;
use disksim::config::SimConfig;
use disksim::driver::SimulationDriver;
use disksim::error::ConfigError;
use disksim::events::{EventSink, NullSink, SimEvent, Tee};
use disksim::report::SimulationReport;
use disksim::request::Process;
use disksim::workload::{literal_workload, WorkloadSpec};

#[cfg(feature = "metrics")]
use disksim::metrics::{
    MetricsExporter, MetricsSnapshotProvider, PrometheusTextExporter, SimMetrics,
};

#[derive(Debug, Default)]
struct Options {
    scheduler: String,
    direction: Option<String>,
    generate: bool,
    seed: Option<u64>,
    config_path: Option<String>,
    json_path: Option<String>,
    metrics: bool,
    quiet: bool,
}

/// Prints one line per event.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::InitialHead { track } => {
                println!("SCHEDULER: initial head position = track {track}")
            },
            SimEvent::HeadMoved { track, cost } => {
                println!("SCHEDULER: head moved to track {track} (time = {cost:.2})")
            },
            SimEvent::SplitQueues { active, waiting } => {
                println!("SCHEDULER: FLOOK queues: active = {active}, waiting = {waiting}")
            },
            SimEvent::ScheduleCompleted { total } => {
                println!("DRIVER: total scheduling time = {total:.3} ms")
            },
            SimEvent::RequestServiced {
                process_id,
                track,
                kind,
                total_cost,
            } => println!(
                "DRIVER: request {{process = {process_id}, track = {track}, kind = {kind}}}, \
                 processing time = {total_cost:.3}"
            ),
            SimEvent::QuantumExceeded { elapsed, .. } => {
                println!("DRIVER: processing time = {elapsed:.3} ms exceeded quantum")
            },
            SimEvent::SimulationCompleted { total } => {
                println!("DRIVER: total simulation time = {total:.3} ms")
            },
            SimEvent::BufferAdded { id } => println!("CACHE: {id} added"),
            SimEvent::BufferRefreshed { id } => println!("CACHE: {id} refreshed in Left"),
            SimEvent::BufferPromoted { id, new_frequency } => {
                println!("CACHE: {id} promoted (frequency {new_frequency})")
            },
            SimEvent::BufferEvicted { id, frequency } => {
                println!("CACHE: {id} evicted (frequency {frequency})")
            },
        }
    }
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} <FIFO|LOOK|FLOOK> [ASC|DESC] [--generate|--literal] [--seed N] \
         [--config FILE] [--json FILE] [--metrics] [--quiet]"
    );
    eprintln!();
    eprintln!("Example:");
    eprintln!("  {program} LOOK ASC --literal");
    process::exit(1);
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut positional = Vec::new();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--generate" => opts.generate = true,
            "--literal" => opts.generate = false,
            "--quiet" => opts.quiet = true,
            "--metrics" => opts.metrics = true,
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|e| format!("invalid seed {value:?}: {e}"))?;
                opts.seed = Some(seed);
            },
            "--config" => {
                opts.config_path = Some(iter.next().ok_or("--config needs a file")?.clone());
            },
            "--json" => {
                opts.json_path = Some(iter.next().ok_or("--json needs a file")?.clone());
            },
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            value => positional.push(value.to_string()),
        }
    }

    let mut positional = positional.into_iter();
    opts.scheduler = positional.next().ok_or("missing scheduler")?;
    opts.direction = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }
    Ok(opts)
}

fn load_config(path: Option<&str>) -> Result<SimConfig, ConfigError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| ConfigError::new(format!("cannot read {path}: {e}")))?;
            SimConfig::from_json_str(&json)
        },
        None => Ok(SimConfig::default()),
    }
}

fn build_workload(opts: &Options, config: &SimConfig) -> Result<Vec<Process>, ConfigError> {
    if opts.generate {
        WorkloadSpec::for_config(config, opts.seed.unwrap_or(42)).generate()
    } else {
        Ok(literal_workload())
    }
}

fn run(opts: &Options) -> Result<SimulationReport, ConfigError> {
    // Selection errors surface before any simulation state exists.
    let kind = SchedulerKind::from_selection(&opts.scheduler, opts.direction.as_deref())?;
    let config = load_config(opts.config_path.as_deref())?;
    let processes = build_workload(opts, &config)?;
    let driver = SimulationDriver::with_kind(config, kind, processes)?;

    let mut console = ConsoleSink;
    let mut null = NullSink;
    let base: &mut dyn EventSink = if opts.quiet { &mut null } else { &mut console };

    #[cfg(feature = "metrics")]
    let report = {
        let mut metrics = SimMetrics::default();
        let report = driver.run(&mut Tee(base, &mut metrics));
        if opts.metrics {
            let exporter = PrometheusTextExporter::new("disksim", std::io::stdout());
            exporter.export(&metrics.snapshot());
        }
        report
    };
    #[cfg(not(feature = "metrics"))]
    let report = driver.run(base);

    Ok(report)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("disksim");

    let opts = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        usage(program);
    });

    let report = run(&opts).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(2);
    });

    println!();
    println!("{} summary", report.scheduler);
    println!("  requests issued       {}", report.requests_issued);
    println!("  rounds                {}", report.rounds);
    println!("  quantum overruns      {}", report.quantum_overruns);
    println!("  schedule time         {:.3} ms", report.schedule_time);
    println!("  total simulation time {:.3} ms", report.total_simulation_time);
    println!("  final head            {}", report.final_head);
    println!("  cache Left            {:?}", report.cache.left);
    println!("  cache Middle          {:?}", report.cache.middle);
    println!("  cache Right           {:?}", report.cache.right);

    if let Some(path) = &opts.json_path {
        let json = report.to_json_pretty().unwrap_or_else(|e| {
            eprintln!("Error serializing report: {e}");
            process::exit(1);
        });
        fs::write(path, json).unwrap_or_else(|e| {
            eprintln!("Error writing {path}: {e}");
            process::exit(1);
        });
        println!("Wrote report to {path}");
    }
}
