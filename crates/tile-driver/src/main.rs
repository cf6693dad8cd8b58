//! CLI entry point for the tile driver.
//!
//! Usage:
//!   tile-driver solve <puzzle.json> [options]
//!   tile-driver solve --tiles 1,4,2,3,0,5,6,7,8
//!   tile-driver estimate --stdin
//!   tile-driver verify <puzzle.json> --moves KH
//!
//! Options (solve):
//!   --max-expansions <n>  Abort after n node expansions
//!   --timeout <seconds>   Abort after this much search time
//!   --no-parity-check     Search even if the parity check says unsolvable
//!
//! Set `RUST_LOG=tile_driver=debug` for search progress on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tile_driver::{
    breakdown, replay, solve_puzzle, Estimate, Puzzle, PuzzleConfig, SolveError, SolverConfig,
};

#[derive(Parser)]
#[command(name = "tile-driver")]
#[command(about = "Optimal A* solver for the N-puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest move sequence to the solved configuration
    Solve {
        #[command(flatten)]
        input: PuzzleInput,

        /// Maximum node expansions before giving up
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Skip the up-front solvability check
        #[arg(long)]
        no_parity_check: bool,
    },
    /// Print the heuristic estimate for a configuration
    Estimate {
        #[command(flatten)]
        input: PuzzleInput,
    },
    /// Replay a move string and check it solves the configuration
    Verify {
        #[command(flatten)]
        input: PuzzleInput,

        /// Moves in the HJKL alphabet (blank left, down, up, right)
        #[arg(long, default_value = "")]
        moves: String,
    },
}

/// Where to read the configuration from
#[derive(Args)]
struct PuzzleInput {
    /// Path to puzzle JSON file ({"tiles": [...]})
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read puzzle JSON from stdin instead of a file
    #[arg(long)]
    stdin: bool,

    /// Comma-separated tiles in row-major order, 0 for the blank
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["file", "stdin"])]
    tiles: Option<Vec<u8>>,
}

/// Output format for a solve
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes_expanded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes_generated: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frontier_high_water: Option<usize>,
    time_elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    width: usize,
    solvable: bool,
    #[serde(flatten)]
    estimate: Estimate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_tiles: Option<Vec<u8>>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let (ok, json) = match cli.command {
        Commands::Solve {
            input,
            max_expansions,
            timeout,
            no_parity_check,
        } => {
            let config = match read_puzzle(&input) {
                Ok(c) => c,
                Err(e) => return fail(&e),
            };
            let solver_config = SolverConfig {
                max_expansions,
                timeout: timeout.map(Duration::from_secs),
                check_solvability: !no_parity_check,
            };
            let output = run_solve(config, &solver_config);
            (output.solved, serde_json::to_string_pretty(&output))
        }
        Commands::Estimate { input } => {
            let config = match read_puzzle(&input) {
                Ok(c) => c,
                Err(e) => return fail(&e),
            };
            let output = EstimateOutput {
                width: config.tiles.width(),
                solvable: config.tiles.is_solvable(),
                estimate: breakdown(&config.tiles),
                id: config.id,
            };
            (true, serde_json::to_string_pretty(&output))
        }
        Commands::Verify { input, moves } => {
            let config = match read_puzzle(&input) {
                Ok(c) => c,
                Err(e) => return fail(&e),
            };
            let output = run_verify(config, &moves);
            (output.valid, serde_json::to_string_pretty(&output))
        }
    };

    match json {
        Ok(text) => println!("{text}"),
        Err(e) => return fail(&format!("failed to encode output: {e}")),
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn fail(message: &str) -> ExitCode {
    eprintln!("Error: {message}");
    ExitCode::FAILURE
}

fn read_puzzle(input: &PuzzleInput) -> Result<PuzzleConfig, String> {
    if let Some(tiles) = &input.tiles {
        let puzzle = Puzzle::from_tiles(tiles).map_err(|e| e.to_string())?;
        return Ok(PuzzleConfig {
            id: None,
            tiles: puzzle,
        });
    }

    let json_content = if input.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        buffer
    } else if let Some(path) = &input.file {
        fs::read_to_string(path).map_err(|e| format!("failed to read file {path:?}: {e}"))?
    } else {
        return Err("must provide a file path, --stdin or --tiles".to_string());
    };

    serde_json::from_str(&json_content).map_err(|e| format!("invalid puzzle JSON: {e}"))
}

fn run_solve(config: PuzzleConfig, solver_config: &SolverConfig) -> SolveOutput {
    match solve_puzzle(&config.tiles, solver_config) {
        Ok(solution) => SolveOutput {
            id: config.id,
            solved: true,
            moves: Some(solution.move_string()),
            length: Some(solution.len()),
            reason: None,
            nodes_expanded: Some(solution.stats.nodes_expanded),
            nodes_generated: Some(solution.stats.nodes_generated),
            frontier_high_water: Some(solution.stats.frontier_high_water),
            time_elapsed_ms: solution.stats.time_elapsed_ms,
        },
        Err(err) => {
            let nodes_expanded = match &err {
                SolveError::SearchAborted { nodes_expanded, .. } => Some(*nodes_expanded),
                _ => None,
            };
            SolveOutput {
                id: config.id,
                solved: false,
                moves: None,
                length: None,
                reason: Some(err.to_string()),
                nodes_expanded,
                nodes_generated: None,
                frontier_high_water: None,
                time_elapsed_ms: 0,
            }
        }
    }
}

fn run_verify(config: PuzzleConfig, moves: &str) -> VerifyOutput {
    match replay(&config.tiles, moves) {
        Ok(result) => {
            let valid = result.solved_exactly();
            let reason = match result.first_solved_at {
                _ if valid => None,
                Some(step) => Some(format!(
                    "goal reached after {step} moves, {} extra moves follow",
                    result.steps - step
                )),
                None => Some("moves do not reach the goal".to_string()),
            };
            VerifyOutput {
                id: config.id,
                valid,
                reason,
                end_tiles: Some(result.end.tiles().to_vec()),
            }
        }
        Err(err) => VerifyOutput {
            id: config.id,
            valid: false,
            reason: Some(err.to_string()),
            end_tiles: None,
        },
    }
}
