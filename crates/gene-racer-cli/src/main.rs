use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gene_racer_core::rng::create_rng;
use gene_racer_core::{RunSummary, SimConfig, Simulation, TickOutcome};
use rand::Rng;
use std::f64::consts::PI;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

const WARMUP_TICKS: u64 = 100;
const BENCHMARK_TICKS: u64 = 2_000;
const TARGET_TPS: f64 = 10_000.0;

#[derive(Parser)]
#[command(name = "gene-racer")]
#[command(about = "Headless driver for the gene-racer evolution engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless evolution from a config file
    Run {
        /// Path to config file (JSON); defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for the run summary (optional)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Stop after this many completed generations
        #[arg(long, default_value_t = 20)]
        generations: u64,

        /// Hard tick budget in case a generation never finishes
        #[arg(long, default_value_t = 1_000_000)]
        max_ticks: u64,

        /// Random obstacles sprinkled on the band before the run
        #[arg(long, default_value_t = 8)]
        obstacles: usize,
    },
    /// Run the tick-throughput benchmark suite
    Benchmark,
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

/// Scatter obstacles on the drivable band, the way the UI places them:
/// only positions that are currently on-track are accepted.
fn scatter_obstacles(sim: &mut Simulation, count: usize, seed: u64) {
    let mut rng = create_rng(seed.wrapping_add(1));
    let (cx, cy) = sim.track().center();
    let inner = sim.track().inner_radius();
    let band = sim.track().outer_radius() - inner;
    let mut placed = 0;
    while placed < count {
        let angle = rng.random::<f64>() * 2.0 * PI;
        let radius = inner + rng.random::<f64>() * band;
        let x = cx + radius * angle.cos();
        let y = cy + radius * angle.sin();
        if sim.is_on_track(x, y) {
            sim.add_obstacle(x, y);
            placed += 1;
        }
    }
}

fn run(
    config_path: Option<PathBuf>,
    out: Option<PathBuf>,
    generations: u64,
    max_ticks: u64,
    obstacles: usize,
) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let file = File::open(&path).context("failed to open config file")?;
            let reader = BufReader::new(file);
            let config: SimConfig =
                serde_json::from_reader(reader).context("failed to parse config")?;
            println!("Loaded config from {:?}", path);
            config
        }
        None => SimConfig::default(),
    };

    let mut sim = Simulation::new(&config).context("config validation error")?;
    scatter_obstacles(&mut sim, obstacles, config.seed);
    println!(
        "Track: outer={} inner={} obstacles={}",
        sim.track().outer_radius(),
        sim.track().inner_radius(),
        sim.track().obstacles().len()
    );
    println!(
        "Population: {} vehicles, mutation rate {}",
        sim.population().len(),
        sim.mutation_rate()
    );

    while sim.generation() < generations && sim.ticks() < max_ticks {
        if sim.tick() == TickOutcome::GenerationComplete {
            let stats = sim
                .history()
                .last()
                .expect("transition always records history");
            println!(
                "gen {:>4}  best {:>10.2}  mean {:>10.2}",
                stats.generation, stats.best_fitness, stats.mean_fitness
            );
        }
    }
    if sim.generation() < generations {
        println!(
            "Stopped at the tick budget ({max_ticks}) after {} generations.",
            sim.generation()
        );
    }

    let (best_fitness, best_genome) = match sim.champion() {
        Some((fitness, genome)) => (fitness, Some(genome)),
        None => (0.0, None),
    };
    let summary = RunSummary {
        schema_version: 1,
        generations: sim.generation(),
        ticks: sim.ticks(),
        samples: sim.history().to_vec(),
        best_fitness,
        best_genome,
    };

    if let Some(out_dir) = out {
        std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
        let summary_path = out_dir.join("summary.json");
        let file = File::create(&summary_path).context("failed to create summary file")?;
        serde_json::to_writer_pretty(file, &summary).context("failed to write summary")?;
        println!("Run complete. Summary saved to {:?}", summary_path);
    } else {
        println!(
            "Run complete. Best fitness over {} generations: {:.2}",
            summary.generations, summary.best_fitness
        );
    }
    Ok(())
}

fn run_benchmark(population_size: usize) -> Result<()> {
    let config = SimConfig {
        population_size,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(&config).context("benchmark config validation error")?;
    scatter_obstacles(&mut sim, 8, config.seed);

    for _ in 0..WARMUP_TICKS {
        sim.tick();
    }

    let start = Instant::now();
    for _ in 0..BENCHMARK_TICKS {
        sim.tick();
    }
    let elapsed = start.elapsed();
    let ticks_per_sec = BENCHMARK_TICKS as f64 / elapsed.as_secs_f64();

    let verdict = if ticks_per_sec >= TARGET_TPS {
        "GO"
    } else {
        "NO-GO"
    };
    println!("--- {population_size} vehicles ---");
    println!(
        "  Avg tick:      {:.1} us ({:.0} ticks/sec)",
        elapsed.as_micros() as f64 / BENCHMARK_TICKS as f64,
        ticks_per_sec
    );
    println!("  Generations:   {} completed", sim.generation());
    println!("  Verdict:       {verdict} (target: >={TARGET_TPS} ticks/sec)");
    println!();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p gene-racer-cli --release -- benchmark");
                eprintln!();
            }
            println!("=== gene-racer tick throughput ===");
            println!("Warmup: {WARMUP_TICKS} ticks, Benchmark: {BENCHMARK_TICKS} ticks");
            println!();
            for population_size in [50, 200, 1000] {
                run_benchmark(population_size)?;
            }
        }
        Commands::Run {
            config,
            out,
            generations,
            max_ticks,
            obstacles,
        } => run(config, out, generations, max_ticks, obstacles)?,
    }
    Ok(())
}
