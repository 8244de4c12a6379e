use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ghost_maze_core::{
    GameState, SearchOutcome, SolverConfig, Strategy, actions_to_string,
    evaluation::{self, EvaluationRow},
    loader::load_game_from_string,
    search, trace,
};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAP: &str = "maps/map01.txt";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one strategy on a map and print the plan
    Solve {
        /// Map file to load
        #[arg(short, long, value_name = "MAP_FILE", default_value = DEFAULT_MAP)]
        map: PathBuf,
        /// Strategy name: BFS, DFS, IDS, A*, Weighted A* (or bfs, dfs, ids, astar, wastar)
        #[arg(short, long, default_value = "A*")]
        strategy: Strategy,
        /// Time limit in seconds, overriding the configuration
        #[arg(short, long, value_name = "SECS")]
        timeout: Option<u64>,
        /// JSON solver configuration
        #[arg(short, long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,
        /// Write the replayed frames as JSON to this file
        #[arg(short, long, value_name = "OUT_FILE")]
        frames: Option<PathBuf>,
    },
    /// Run every strategy on every map and print a comparison table per map
    Bench {
        /// JSON solver configuration
        #[arg(short, long, value_name = "CONFIG_FILE")]
        config: Option<PathBuf>,
        /// Map files to evaluate
        #[arg(value_name = "MAP_FILE", default_value = DEFAULT_MAP)]
        maps: Vec<PathBuf>,
    },
    /// Print a parsed map
    Show {
        /// Map file to load
        #[arg(short, long, value_name = "MAP_FILE", default_value = DEFAULT_MAP)]
        map: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Solve {
            map,
            strategy,
            timeout,
            config,
            frames,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(secs) = timeout {
                config.time_limits.insert(strategy, secs);
            }
            let start = load_map(&map, &config)?;
            solve(strategy, &start, &config, frames.as_deref())
        }
        Command::Bench { config, maps } => {
            let config = load_config(config.as_deref())?;
            for map in &maps {
                let start = load_map(map, &config)?;
                println!("{}", map.display());
                print_table(&evaluation::evaluate(&start, &config));
                println!();
            }
            Ok(())
        }
        Command::Show { map } => {
            let start = load_map(&map, &SolverConfig::default())?;
            print!("{start}");
            Ok(())
        }
    }
}

/// Uses `RUST_LOG` when it is set and valid, `info` otherwise.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    SolverConfig::from_json_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn load_map(path: &Path, config: &SolverConfig) -> Result<GameState> {
    if !path.exists() {
        anyhow::bail!("Map file does not exist: {}", path.display());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read map file: {}", path.display()))?;
    let start = load_game_from_string(&text, config.ghost_radius)
        .with_context(|| format!("Failed to load map: {}", path.display()))?;
    info!(
        map = %path.display(),
        ghosts = start.ghosts().len(),
        food = start.food().len(),
        "map loaded"
    );
    Ok(start)
}

fn solve(
    strategy: Strategy,
    start: &GameState,
    config: &SolverConfig,
    frames_out: Option<&Path>,
) -> Result<()> {
    let report = search::solve(strategy, start, config);
    println!("Algorithm: {}", report.strategy);
    println!("Time:      {}", format_duration(report.elapsed));
    println!("Expanded:  {}", report.stats.expanded);

    let path = match report.outcome {
        SearchOutcome::Solved(path) => path,
        SearchOutcome::Exhausted => {
            println!("Result:    no solution");
            return Ok(());
        }
        SearchOutcome::TimedOut => {
            println!("Result:    timed out");
            return Ok(());
        }
    };
    println!("Moves:     {}", path.len());
    println!("Plan:      {}", actions_to_string(&path));

    if let Some(out) = frames_out {
        let frames = trace::build_trace(start, &path)?;
        let json = serde_json::to_string_pretty(&frames)?;
        fs::write(out, json)
            .with_context(|| format!("Failed to write frames: {}", out.display()))?;
        info!(frames = frames.len(), out = %out.display(), "trace written");
    }
    Ok(())
}

fn print_table(rows: &[EvaluationRow]) {
    println!("{:<12} {:>10} {:>6}  {}", "Algorithm", "Time", "Moves", "Result");
    for row in rows {
        println!(
            "{:<12} {:>10} {:>6}  {}",
            row.strategy.name(),
            format_duration(row.elapsed),
            row.moves(),
            row.result
        );
    }
}

fn format_duration(elapsed: Duration) -> String {
    format!("{:.3}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_honours_rust_log() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(Some("ghost_maze_core=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
