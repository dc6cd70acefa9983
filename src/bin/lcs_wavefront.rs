use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use wavefront_lcs::reference::full_table_lcs;
use wavefront_lcs::sequence::{load_file, SequencePair};
use wavefront_lcs::{Collective, Lcs, LcsError, LocalGroup, WavefrontBuilder};

/// Longest common subsequence by distributed anti-diagonal wavefront.
///
/// The input file holds `height width` on its first line, then the first
/// sequence (height characters) and the second sequence (width characters)
/// on one line each.
#[derive(Debug, Parser)]
#[command(name = "lcs-wavefront", version, about)]
struct Cli {
    /// Input file with the two sequences
    input: PathBuf,

    /// Ranks in the in-process group
    #[arg(short, long, env = "LCS_PROCESSES", default_value_t = 1,
          value_parser = clap::value_parser!(u64).range(1..))]
    processes: u64,

    /// Worker threads per rank [default: available parallelism]
    #[arg(short, long, env = "LCS_THREADS",
          value_parser = clap::value_parser!(u64).range(1..))]
    threads: Option<u64>,

    /// Busy-work rounds per matching cell
    #[arg(long, env = "LCS_COST_ITERATIONS", default_value_t = 20)]
    cost_iterations: u32,

    /// Cross-check the result against the full-table DP
    #[arg(long)]
    verify: bool,

    /// Print wall time to stderr
    #[arg(long)]
    time: bool,

    /// Run one rank per MPI process instead of the in-process group
    #[cfg(feature = "mpi")]
    #[arg(long, conflicts_with = "processes")]
    mpi: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let mut builder = WavefrontBuilder::new().with_cost_iterations(cli.cost_iterations);
    if let Some(threads) = cli.threads {
        builder = builder.with_threads(threads as usize);
    }
    let engine = builder.build();

    #[cfg(feature = "mpi")]
    {
        if cli.mpi {
            return run_mpi(&cli, &engine);
        }
    }

    let pair = match load_file(&cli.input) {
        Ok(pair) => pair,
        Err(err) => return fail(&err),
    };

    let start = Instant::now();
    let results = LocalGroup::new(cli.processes as usize).try_run(|rank| {
        let pair = if rank.is_coordinator() {
            Some(pair.clone())
        } else {
            None
        };
        let pair = SequencePair::share(rank, pair)?;
        engine.run(rank, &pair)
    });
    let lcs = match results {
        Ok(results) => results.into_iter().flatten().next().unwrap_or_else(Lcs::empty),
        Err(err) => return fail(&err),
    };
    if cli.time {
        eprintln!("time: {:.6}s", start.elapsed().as_secs_f64());
    }
    report(&cli, &pair, &lcs)
}

fn report(cli: &Cli, pair: &SequencePair, lcs: &Lcs) -> ExitCode {
    println!("{}", lcs.length);
    println!("{}", lcs.as_str_lossy());

    if cli.verify {
        let (first, second) = pair.original();
        let expected = full_table_lcs(first, second);
        if expected != *lcs {
            eprintln!(
                "verify: mismatch, full table gives {} \"{}\"",
                expected.length,
                expected.as_str_lossy()
            );
            return ExitCode::FAILURE;
        }
        eprintln!("verify: ok");
    }
    ExitCode::SUCCESS
}

fn fail(err: &LcsError) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::from(err.exit_code() as u8)
}

#[cfg(feature = "mpi")]
fn run_mpi(cli: &Cli, engine: &wavefront_lcs::WavefrontEngine) -> ExitCode {
    use wavefront_lcs::group::MpiGroup;

    let Some(world) = MpiGroup::initialize() else {
        eprintln!("error: MPI already initialized");
        return ExitCode::FAILURE;
    };

    let pair = if world.is_coordinator() {
        match load_file(&cli.input) {
            Ok(pair) => Some(pair),
            Err(err) => {
                eprintln!("error: {err}");
                world.abort(err.exit_code());
            }
        }
    } else {
        None
    };

    let start = Instant::now();
    let outcome = SequencePair::share(&world, pair)
        .and_then(|pair| engine.run(&world, &pair).map(|lcs| (pair, lcs)));
    match outcome {
        Ok((pair, Some(lcs))) => {
            if cli.time {
                eprintln!("time: {:.6}s", start.elapsed().as_secs_f64());
            }
            report(cli, &pair, &lcs)
        }
        Ok((_, None)) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            world.abort(err.exit_code());
        }
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}
