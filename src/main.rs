use anyhow::Result;
use clap::Parser;
use host_dispatch::report::{PhaseReport, SimulationReport};
use host_dispatch::{Simulation, SimulationConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "host-dispatch")]
#[command(about = "Simulates request dispatch over a pool of hosts with sequential and optimized balancing")]
struct Args {
    /// JSON scenario file; command line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    hosts: Option<usize>,

    #[arg(long)]
    initial_load: Option<f64>,

    #[arg(long)]
    sequential_requests: Option<usize>,

    #[arg(long)]
    optimized_requests: Option<usize>,

    #[arg(long)]
    threshold: Option<f64>,

    #[arg(long)]
    load_increment: Option<f64>,

    #[arg(long)]
    load_jitter: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(hosts) = self.hosts {
            config.hosts = hosts;
        }
        if let Some(load) = self.initial_load {
            config.initial_load = load;
        }
        if let Some(n) = self.sequential_requests {
            config.sequential_requests = n;
        }
        if let Some(n) = self.optimized_requests {
            config.optimized_requests = n;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(increment) = self.load_increment {
            config.load_increment = increment;
        }
        if let Some(jitter) = self.load_jitter {
            config.load_jitter = jitter;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("host_dispatch={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => {
            let config = SimulationConfig::from_file(path).await?;
            info!("Loaded scenario from {}", path.display());
            config
        }
        None => SimulationConfig::default(),
    };
    args.apply(&mut config);

    let report = Simulation::new(config)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!();
    println!("Testing sequential request handling");
    println!("-----------------------------------");
    for record in &report.sequential.dispatches {
        println!("Request {} handled by host {}", record.request, record.host);
    }

    println!();
    println!("Testing optimized request handling");
    println!("----------------------------------");
    println!();
    println!("Initial load:");
    print_loads(&report.optimized.initial);

    for record in &report.optimized.dispatches {
        println!("Request {} handled by host {}", record.request, record.host);
        println!("New load:");
        print_loads(&record.hosts);
    }

    print_summary(&report.sequential);
    print_summary(&report.optimized);
}

fn print_loads(hosts: &[host_dispatch::HostSnapshot]) {
    for host in hosts {
        println!("{}", host);
    }
    println!();
}

fn print_summary(phase: &PhaseReport) {
    let counts = phase
        .served_counts()
        .into_iter()
        .map(|(id, n)| format!("{}={}", id, n))
        .collect::<Vec<_>>()
        .join(", ");
    println!("[SUMMARY] {} requests served: [{}]", phase.policy, counts);
}
