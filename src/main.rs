use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use nqueens_bag::bench::speedup_table;
use nqueens_bag::board::BoardState;
use nqueens_bag::logging::{self, LogConfig, LogFormat};
use nqueens_bag::search::config::{Scheduler, SearchConfig, DEFAULT_QUEUE_CAPACITY};
use nqueens_bag::search::generator::{choose_split_depth, count_tasks};
use nqueens_bag::search::parallel::run_parallel_search;
use nqueens_bag::{QueensError, MAX_BOARD_SIZE};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "nqueens")]
#[command(about = "nqueens - parallel N-Queens solution counter")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Log output format (default: $QUEENS_LOG_FORMAT, else pretty)
    #[arg(long, value_enum, global = true)]
    log_format: Option<CliLogFormat>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI scheduler selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliScheduler {
    /// Bounded monitor queue (producer/consumer)
    Queue,
    /// Bounded crossbeam channel
    Channel,
    /// Rayon scope, one task per partial board
    Structured,
}

impl From<CliScheduler> for Scheduler {
    fn from(cli: CliScheduler) -> Self {
        match cli {
            CliScheduler::Queue => Scheduler::Queue,
            CliScheduler::Channel => Scheduler::Channel,
            CliScheduler::Structured => Scheduler::Structured,
        }
    }
}

/// CLI log format selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLogFormat {
    Pretty,
    Compact,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(cli: CliLogFormat) -> Self {
        match cli {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Compact => LogFormat::Compact,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Count the solutions for one board size
    Solve {
        /// Board size (number of queens)
        #[arg(long, short = 'n', default_value = "8")]
        size: usize,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(long, short = 'j')]
        threads: Option<usize>,
        /// Rows filled in by the producer before handing off (default: heuristic)
        #[arg(long)]
        depth: Option<usize>,
        /// Tasks buffered between producer and workers
        #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
        capacity: usize,
        /// How tasks reach the workers
        #[arg(long, value_enum, default_value = "queue")]
        scheduler: CliScheduler,
        /// Print every solution as one column per row
        #[arg(long)]
        print_solutions: bool,
    },
    /// Time 1..=N threads against a single-thread baseline
    Bench {
        /// Board size (number of queens)
        #[arg(long, short = 'n', default_value = "8")]
        size: usize,
        /// Largest thread count to time
        #[arg(long, default_value = "4")]
        max_threads: usize,
        /// Runs per thread count; the median is reported
        #[arg(long, default_value = "5")]
        runs: usize,
        /// How tasks reach the workers
        #[arg(long, value_enum, default_value = "queue")]
        scheduler: CliScheduler,
    },
    /// Show the split depth chosen for a board size and the tasks it yields
    Depth {
        /// Board size (number of queens)
        #[arg(long, short = 'n', default_value = "8")]
        size: usize,
    },
}

// --- Commands ---

struct SolveOptions {
    size: usize,
    threads: Option<usize>,
    depth: Option<usize>,
    capacity: usize,
    scheduler: Scheduler,
    print_solutions: bool,
}

fn solve_command(options: SolveOptions) -> Result<(), QueensError> {
    let mut config = SearchConfig::default()
        .with_board_size(options.size)
        .with_split_depth_option(options.depth)
        .with_queue_capacity(options.capacity)
        .with_scheduler(options.scheduler)
        .with_collect_solutions(options.print_solutions);
    if let Some(threads) = options.threads {
        config = config.with_workers(threads);
    }
    config.validate()?;

    println!(
        "Solving N={} with depth {} and threads {} ({} scheduler)",
        config.board_size,
        config.resolved_split_depth(),
        config.workers,
        config.scheduler
    );

    let result = run_parallel_search(&config)?;

    if options.print_solutions {
        for queens in result.solution_boards() {
            match BoardState::from_queens(result.board_size, &queens) {
                Some(board) => println!("{}", board),
                None => println!("{:?}", queens),
            }
        }
    }

    println!("Tasks: {}", result.tasks_generated);
    println!("Total Solutions: {}", result.solutions);
    println!("Time: {:.6} seconds", result.elapsed_time.as_secs_f64());
    Ok(())
}

fn bench_command(
    size: usize,
    max_threads: usize,
    runs: usize,
    scheduler: Scheduler,
) -> Result<(), QueensError> {
    let config = SearchConfig::new(size, 1).with_scheduler(scheduler);
    config.validate()?;

    println!("=== N-Queens Parallel Solver ===");
    println!("Board Size (N): {}", size);
    println!("Task Depth: {}", config.resolved_split_depth());
    println!("Scheduler: {}", scheduler);
    println!("Runs per thread count: {} (using median)", runs);
    println!();

    let rows = speedup_table(&config, max_threads, runs)?;
    let baseline = rows.first().map_or(0, |row| row.solutions);
    println!("Solutions found: {}", baseline);
    println!();

    println!("{:<10} {:<15} {:<10}", "Threads", "Time (s)", "Speedup");
    println!("{:<10} {:<15} {:<10}", "-------", "--------", "-------");
    for row in &rows {
        println!(
            "{:<10} {:<15.6} {:<10.2}",
            row.workers,
            row.median.as_secs_f64(),
            row.speedup
        );
    }
    println!();
    println!(
        "Verification: Found {} solutions with every thread count (1..={})",
        baseline, max_threads
    );
    Ok(())
}

fn depth_command(size: usize) -> Result<(), QueensError> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(QueensError::InvalidBoardSize {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    let depth = choose_split_depth(size);
    println!("Board Size (N): {}", size);
    println!("Split Depth: {}", depth);
    println!("Tasks: {}", count_tasks(size, depth));
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut log_config = LogConfig::new().with_verbosity(args.verbose);
    if let Some(format) = args.log_format {
        log_config = log_config.with_format(format.into());
    }
    logging::init(log_config.with_env_overrides());

    let outcome = match args.command {
        Commands::Solve {
            size,
            threads,
            depth,
            capacity,
            scheduler,
            print_solutions,
        } => solve_command(SolveOptions {
            size,
            threads,
            depth,
            capacity,
            scheduler: scheduler.into(),
            print_solutions,
        }),
        Commands::Bench {
            size,
            max_threads,
            runs,
            scheduler,
        } => bench_command(size, max_threads, runs, scheduler.into()),
        Commands::Depth { size } => depth_command(size),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
