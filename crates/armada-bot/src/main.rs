//! Turn loop: read a turn's state from stdin, plan, write orders to stdout.

#![forbid(unsafe_code)]

use std::io::{self, BufRead, Write};

use anyhow::Result;
use armada_forecast::TimelineEngine;
use armada_planner::{EmittedOrder, InvasionPlanner, PlannerConfig, TurnClock};
use armada_world::GameMap;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "armada-bot", version, about = "Turn-based fleet contest bot")]
struct Cli {
    /// Per-turn planning budget, in milliseconds.
    #[arg(long, default_value_t = 900)]
    timeout_ms: u64,

    /// Score plans against opponent-held planets like any other, instead of
    /// favoring them.
    #[arg(long)]
    no_aggression: bool,

    /// Size invasions against the garrison alone, ignoring enemy ships close
    /// enough to counter the landing.
    #[arg(long)]
    no_enemy_reach: bool,

    /// Log planner internals to stderr.
    #[arg(short, long)]
    verbose: bool,
}

struct Game {
    map: GameMap,
    engine: TimelineEngine,
    planner: InvasionPlanner,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut config = PlannerConfig::default();
    if cli.no_aggression {
        config = config.with_aggression_bonus(1.0);
    }
    if cli.no_enemy_reach {
        config = config.with_count_enemy_reach(false);
    }

    let mut game: Option<Game> = None;
    let mut turn_state = String::new();

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.starts_with("go") {
            turn_state.push_str(&line);
            turn_state.push('\n');
            continue;
        }

        let clock = TurnClock::start(cli.timeout_ms);
        let orders = match play_turn(&mut game, &turn_state, config, &clock) {
            Ok(orders) => orders,
            Err(err) => {
                // A turn we cannot parse still needs an answer, or the
                // engine driving us will time us out.
                warn!(%err, "skipping turn");
                Vec::new()
            }
        };
        turn_state.clear();

        for order in orders {
            writeln!(out, "{} {} {}", order.source, order.target, order.ships)?;
        }
        writeln!(out, "go")?;
        out.flush()?;
    }

    Ok(())
}

fn play_turn(
    game: &mut Option<Game>,
    state: &str,
    config: PlannerConfig,
    clock: &TurnClock,
) -> Result<Vec<EmittedOrder>> {
    if let Some(game) = game.as_mut() {
        game.map.update(state)?;
        game.engine.ingest_turn(&game.map);
    } else {
        let map = GameMap::parse(state)?;
        let engine = TimelineEngine::new(&map);
        info!(
            planets = map.num_planets(),
            horizon = engine.horizon(),
            "map loaded"
        );
        *game = Some(Game {
            map,
            engine,
            planner: InvasionPlanner::new(config),
        });
    }

    let Some(game) = game.as_mut() else {
        return Ok(Vec::new());
    };
    Ok(game.planner.plan_turn(&game.map, &mut game.engine, clock))
}
