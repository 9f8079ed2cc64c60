use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use pathless_search::ai::{Opponent, OpponentSpec};
use pathless_search::config::AppConfig;
use pathless_search::game::Player;
use pathless_search::logging;
use pathless_search::search::SearchOrder;
use pathless_search::tasks::{
    solve, ConnectFourTask, JobShopTask, Solution, SudokuTask, Task, TourTask,
};

/// Solve small combinatorial problems with a pathless BFS/DFS tree search.
#[derive(Parser)]
#[command(name = "pathless-search", about = "Pathless tree search solver")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "pathless-search.toml")]
    config: PathBuf,

    /// Exploration order (overrides config and task default)
    #[arg(long, global = true, value_enum)]
    order: Option<SearchOrder>,

    /// Maximum number of node expansions
    #[arg(long, global = true)]
    max_steps: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill a Sudoku grid read from a text file
    Sudoku {
        /// One row per line, 0 or . for empty cells
        file: PathBuf,
    },
    /// Assign jobs to identical machines minimizing the makespan
    Jobshop {
        #[arg(long)]
        machines: usize,
        /// Comma-separated job durations
        #[arg(long, value_delimiter = ',', required = true)]
        durations: Vec<u64>,
    },
    /// Shortest path through every city between two endpoints
    Tour {
        /// Whitespace-separated distance matrix, 0 meaning no edge
        file: PathBuf,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Find a winning move sequence against an opponent policy
    ConnectFour {
        /// fixed:N, first, random or greedy
        #[arg(long)]
        opponent: Option<OpponentSpec>,
        /// Side to win for: red or yellow
        #[arg(long)]
        favorable: Option<Player>,
        /// Seed for the random opponent
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::DefaultConfig = cli.command {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    logging::init(&config.logging.filter);

    let order = cli.order.or(config.search.order);
    let max_steps = cli.max_steps.or(config.search.max_steps);

    match cli.command {
        Command::Sudoku { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let grid = SudokuTask::parse(&text).context("parsing sudoku grid")?;
            let task = SudokuTask::new(grid).context("building sudoku task")?;
            let solution = run(task.into_problem(), order, max_steps);
            for row in &solution.answer {
                let cells: Vec<String> = row.iter().map(u8::to_string).collect();
                println!("{}", cells.join(" "));
            }
            report(&solution);
        }
        Command::Jobshop {
            machines,
            durations,
        } => {
            let task = JobShopTask::new(machines, durations).context("building job shop task")?;
            let solution = run(task.clone().into_problem(), order, max_steps);
            println!("assignment: {:?}", solution.answer);
            if solution.found {
                println!("loads:      {:?}", task.loads(&solution.answer));
                println!("makespan:   {}", task.makespan(&solution.answer));
            }
            report(&solution);
        }
        Command::Tour { file, from, to } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let distances = TourTask::parse(&text).context("parsing distance matrix")?;
            let task = TourTask::new(distances, from, to).context("building tour task")?;
            let solution = run(task.into_problem(), order, max_steps);
            println!("path:   {:?}", solution.answer.cities);
            match solution.answer.length {
                Some(length) => println!("length: {length}"),
                None => println!("length: unreachable"),
            }
            report(&solution);
        }
        Command::ConnectFour {
            opponent,
            favorable,
            seed,
        } => {
            let spec = opponent.unwrap_or(config.connect_four.opponent);
            let favorable = favorable.unwrap_or(config.connect_four.favorable);
            let policy = spec.build(seed.or(config.connect_four.seed));
            info!(opponent = policy.name(), %favorable, "connect four lookahead");

            let task = ConnectFourTask::new(policy, favorable).context("building lookahead")?;
            let order = order.unwrap_or_else(|| task.default_order());
            let mut search = task.into_search(order);
            let outcome = search.run(max_steps);
            let moves = search.problem().decode(search.best());
            println!("{favorable} moves: {moves:?}");
            if let Some(node) = search.best() {
                println!("{}", node.state);
            }
            report(&Solution {
                answer: moves,
                found: search.best().is_some(),
                outcome,
                stats: search.stats(),
            });
        }
        Command::DefaultConfig => unreachable!("handled before loading config"),
    }

    Ok(())
}

fn run<T: Task>(task: T, order: Option<SearchOrder>, max_steps: Option<usize>) -> Solution<T::Answer> {
    let order = order.unwrap_or_else(|| task.default_order());
    info!(%order, ?max_steps, "starting search");
    solve(task, order, max_steps)
}

fn report<A>(solution: &Solution<A>) {
    let stats = solution.stats;
    println!(
        "{:?}: found={} expanded={} generated={} goals={} improvements={} peak_frontier={}",
        solution.outcome,
        solution.found,
        stats.expanded,
        stats.generated,
        stats.goals,
        stats.improvements,
        stats.peak_frontier,
    );
}
