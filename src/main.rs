//! Lambda calculus reducer and type checker (command line).
//!
//! Terms are written as prelude names applied left to right:
//!
//! ```text
//! lambda-calc reduce plus 2 3
//! lambda-calc infer S K K
//! lambda-calc batch --terms 1000 --workers 8
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lambda_calc_rs::batch;
use lambda_calc_rs::logger::{self, LogLevel};
use lambda_calc_rs::schema::{InferenceReport, ReductionReport};
use lambda_calc_rs::*;

#[derive(Parser)]
#[command(name = "lambda-calc")]
#[command(about = "Lambda calculus reducer with Hindley-Milner type inference", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a term to normal form
    Reduce {
        /// Prelude names, applied left to right
        #[arg(required = true)]
        names: Vec<String>,

        /// JSON reduction config; flags given here override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// normal-order or applicative
        #[arg(short, long)]
        strategy: Option<Strategy>,

        /// Maximum reduction steps
        #[arg(long)]
        max_steps: Option<usize>,

        /// η-reduce the normal form
        #[arg(long)]
        eta: bool,

        /// Print every step
        #[arg(long)]
        trace: bool,

        /// Emit a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Infer the principal type of a term
    Infer {
        /// Prelude names, applied left to right
        #[arg(required = true)]
        names: Vec<String>,

        /// Emit a JSON report
        #[arg(long)]
        json: bool,
    },

    /// Reduce and type-check random closed terms in parallel
    Batch {
        /// Number of terms to generate
        #[arg(short, long, default_value_t = 1000)]
        terms: usize,

        /// Number of parallel workers (default: number of CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Maximum term depth
        #[arg(long, default_value_t = 8)]
        max_depth: usize,

        /// Minimum term depth
        #[arg(long, default_value_t = 3)]
        min_depth: usize,

        /// Maximum term size
        #[arg(long, default_value_t = 100)]
        max_size: usize,

        /// Maximum reduction steps per term
        #[arg(long, default_value_t = 1000)]
        max_steps: usize,

        #[arg(short, long, default_value_t = Strategy::NormalOrder)]
        strategy: Strategy,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the names the prelude understands
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_with_level(LogLevel::from_verbosity(cli.verbose));

    match cli.command {
        Commands::Reduce {
            names,
            config,
            strategy,
            max_steps,
            eta,
            trace,
            json,
        } => {
            let mut config = match config {
                Some(path) => ReductionConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ReductionConfig::default(),
            };
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if let Some(max_steps) = max_steps {
                config.max_steps = max_steps;
            }
            config.eta |= eta;
            config.trace |= trace;
            run_reduce(&parse_term(&names)?, config, json)
        }
        Commands::Infer { names, json } => run_infer(&parse_term(&names)?, json),
        Commands::Batch {
            terms,
            workers,
            max_depth,
            min_depth,
            max_size,
            max_steps,
            strategy,
            seed,
            json,
        } => {
            let generator = GeneratorConfig {
                max_depth,
                min_depth,
                max_size,
            };
            let reduction = ReductionConfig::new(strategy, max_steps);
            run_batch(terms, workers.unwrap_or_else(num_cpus::get), seed, &generator, &reduction, json)
        }
        Commands::List => {
            for name in prelude::NAMES {
                let term = prelude::lookup(name).context("prelude name")?;
                println!("{:<6} {}", name, term);
            }
            println!("{:<6} Church numeral up to {}", "0..", prelude::MAX_NUMERAL);
            Ok(())
        }
    }
}

fn parse_term(names: &[String]) -> Result<Term> {
    let mut terms = Vec::with_capacity(names.len());
    for name in names {
        match prelude::lookup(name) {
            Some(term) => terms.push(term),
            None if name.bytes().all(|b| b.is_ascii_digit()) => {
                bail!("numeral {} is larger than {}", name, prelude::MAX_NUMERAL)
            }
            None => bail!("unknown term `{}` (see `lambda-calc list`)", name),
        }
    }
    let mut terms = terms.into_iter();
    let head = terms.next().context("no term given")?;
    Ok(Term::apply(head, terms))
}

fn run_reduce(term: &Term, config: ReductionConfig, json: bool) -> Result<()> {
    let strategy = config.strategy;
    let reduction = Reducer::new(config).reduce(term);

    if json {
        let report = ReductionReport::new(term, strategy, &reduction);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (k, step) in reduction.trace.iter().enumerate() {
        println!("{:>4}  {}", k, step.term);
    }
    let steps = reduction.steps;
    match reduction.normal_form() {
        Ok(normal) => {
            println!("{}", normal);
            eprintln!("normal form after {} steps ({})", steps, strategy);
            Ok(())
        }
        Err(divergence) => {
            println!("{}", divergence.partial);
            Err(divergence.into())
        }
    }
}

fn run_infer(term: &Term, json: bool) -> Result<()> {
    let outcome = infer(&TypeEnv::empty(), term);

    if json {
        println!("{}", serde_json::to_string_pretty(&InferenceReport::new(term, &outcome))?);
        return Ok(());
    }

    let found = outcome.with_context(|| format!("cannot type {}", term))?;
    println!("{} : {}", term, found.principal());
    Ok(())
}

fn run_batch(
    count: usize,
    workers: usize,
    seed: u64,
    generator: &GeneratorConfig,
    reduction: &ReductionConfig,
    json: bool,
) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()
        .context("building worker pool")?;

    let terms = batch::generate_terms(count, seed, generator);
    let (_, _, summary) = batch::run(&terms, reduction, &TypeEnv::empty());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Workers: {}", workers);
    println!("Terms: {}", summary.total_terms);
    println!("  Total time: {:.2}ms", summary.total_time_ms);
    println!("  Avg steps/term: {:.2}", summary.avg_steps_per_term);
    println!("  Throughput: {:.0} terms/s", summary.throughput_terms_per_sec);
    println!("  Convergence: {:.1}%", summary.convergence_rate * 100.0);
    println!("  Typeable: {}/{}", summary.typed, summary.total_terms);
    Ok(())
}
