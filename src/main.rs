//! Tower puzzle solver CLI
//!
//! Loads a layout file and either plays it out step by step or enumerates
//! the game tree for the shortest solution.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tower::search::{GameTree, TreeLimits, TreeObserver, TreeStats};
use tower::{load_layout, Board, Solver, SolverConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Greedy play guided by a bounded lookahead
    Step,
    /// Exhaustive tree search for the shortest win
    Tree,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Layout file to load
    layout: PathBuf,

    /// How to solve the layout
    #[arg(value_enum, default_value_t = Mode::Step)]
    mode: Mode,

    /// Search depth used to value each candidate move
    #[arg(short, long, default_value_t = 3)]
    lookahead: u8,

    /// Maximum number of moves to commit
    #[arg(short, long, default_value_t = 50)]
    max_steps: usize,

    /// Worker threads for valuing candidate moves
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Tree depth in moves (tree mode)
    #[arg(short, long, default_value_t = 4)]
    depth: usize,

    /// Node budget for the tree (tree mode)
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Disable the transposition table
    #[arg(long, default_value_t = false)]
    no_cache: bool,

    /// Only print the summary
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

/// Logs each finished tree level
struct LevelLogger;

impl TreeObserver for LevelLogger {
    fn on_level(&mut self, depth: usize, nodes: usize) {
        info!(depth, nodes, "tree level complete");
    }

    fn on_finish(&mut self, stats: &TreeStats) {
        info!(
            nodes = stats.nodes,
            won = stats.won_nodes,
            truncated = stats.truncated,
            "tree complete"
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let board = load_layout(&args.layout)
        .with_context(|| format!("loading layout {}", args.layout.display()))?;

    if !args.quiet {
        println!("{}\n", board);
    }

    match args.mode {
        Mode::Step => run_steps(&args, &board),
        Mode::Tree => run_tree(&args, board),
    }
}

fn run_steps(args: &Args, board: &Board) -> Result<()> {
    let config = SolverConfig::default()
        .with_lookahead(args.lookahead)
        .with_max_steps(args.max_steps)
        .with_threads(args.threads)
        .with_cache(!args.no_cache);

    let mut solver = Solver::new(config);
    let report = solver.solve(board).context("solving layout")?;

    if !args.quiet {
        let mut replay = board.clone();
        for (i, step) in report.steps.iter().enumerate() {
            replay.make_move(step.mv)?;
            println!("Step {}: {} (score {})", i + 1, step.mv, step.score);
            println!("{}\n", replay);
        }
    }

    println!(
        "Outcome: {} after {} moves ({} nodes, {}ms)",
        report.outcome,
        report.steps.len(),
        report.stats.nodes,
        report.time_ms
    );
    Ok(())
}

fn run_tree(args: &Args, board: Board) -> Result<()> {
    let mut limits = TreeLimits::default().with_max_depth(args.depth);
    if let Some(max_nodes) = args.max_nodes {
        limits = limits.with_max_nodes(max_nodes);
    }

    let tree = GameTree::build_with_observer(board, limits, &mut LevelLogger);
    println!(
        "Tree: {} nodes, leaf depth {}-{}",
        tree.len(),
        tree.min_leaf_depth(),
        tree.max_leaf_depth()
    );

    match tree.shortest_win() {
        Some(solution) => {
            println!("Shortest win: {} moves", solution.len());
            if !args.quiet {
                for (mv, after) in solution.moves.iter().zip(solution.boards.iter().skip(1)) {
                    println!("{}", mv);
                    println!("{}\n", after);
                }
            }
        }
        None => println!("No win within {} moves", args.depth),
    }
    Ok(())
}
