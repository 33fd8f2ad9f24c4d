use std::{num::NonZeroUsize, path::PathBuf, time::Instant};

use anyhow::Context;
use clap::Parser;
use log::info;

use saxpy::{PoolKind, Report, SaxpyConfig, SaxpyInput};

/// Iterative SAXPY over a fixed set of worker threads.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Vector size
    #[arg(short = 'p', long)]
    size: Option<usize>,

    /// Seed for the initial vectors and scalar
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of worker threads
    #[arg(short = 'n', long)]
    threads: Option<usize>,

    /// Number of iterations
    #[arg(short, long)]
    iterations: Option<usize>,

    /// How worker threads are obtained each iteration
    #[arg(long, value_enum)]
    pool: Option<PoolKind>,

    /// JSON file with the base configuration, flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Print the initial and final vectors
    #[arg(long)]
    debug_vectors: bool,
}

impl Args {
    fn into_config(self) -> anyhow::Result<SaxpyConfig> {
        let mut config = match &self.config {
            Some(path) => SaxpyConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SaxpyConfig::default(),
        };

        if let Some(size) = self.size {
            config.size = non_zero("vector size", size)?;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(threads) = self.threads {
            config.threads = non_zero("threads", threads)?;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = non_zero("iterations", iterations)?;
        }
        if let Some(pool) = self.pool {
            config.pool = pool;
        }

        config.validate()?;
        Ok(config)
    }
}

fn non_zero(what: &str, value: usize) -> anyhow::Result<NonZeroUsize> {
    NonZeroUsize::new(value).with_context(|| format!("{what} must be greater than 0"))
}

fn print_vector(name: &str, values: &[f64]) {
    let values: Vec<_> = values.iter().map(|v| format!("{v:.6}")).collect();
    println!("{name} = [ {} ]", values.join(", "));
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let json = args.json;
    let debug_vectors = args.debug_vectors;
    let config = args.into_config()?;

    info!(
        "p = {}, seed = {}, n_threads = {}, max_iters = {}, pool = {:?}",
        config.size, config.seed, config.threads, config.iterations, config.pool
    );

    let input = SaxpyInput::seeded(config.size, config.seed).context("initializing vectors")?;

    if debug_vectors {
        print_vector("vector X", input.x());
        print_vector("vector Y", input.y());
        println!("a = {:.6}", input.a());
    }

    // Only the iterations are timed, the worker pool is built beforehand.
    let mut driver = saxpy::driver(&config).context("building driver")?;

    let start = Instant::now();
    let output = driver.run(input).context("running saxpy")?;
    let elapsed = start.elapsed();

    if debug_vectors {
        print_vector("RES: final vector Y", &output.y);
    }

    let report = Report::new(&output, elapsed);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}
