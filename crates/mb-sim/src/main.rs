//! mb-sim: fire a single projection over an ASCII map
//!
//! Loads a map, resolves one effect against it, and prints what every
//! player would have been told, followed by the map as it now stands.

mod map;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use mb_core::dungeon::{Depth, Grid};
use mb_core::player::{Notice, PlayerId};
use mb_core::{EffectRequest, EngineConfig, GameRng, GfType, ProjectFlags, Source, World};

/// Fire one bolt, beam, or ball over a map and show the result
#[derive(Parser, Debug)]
#[command(name = "mb-sim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ASCII map file
    #[arg(short = 'm', long = "map")]
    map: PathBuf,

    /// Engine config (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// RNG seed
    #[arg(long = "seed", default_value_t = 1)]
    seed: u64,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Damage type (e.g. fire, acid, kill_wall)
    #[arg(short = 'g', long = "gf")]
    gf: GfType,

    /// Target cell as Y,X
    #[arg(short = 'a', long = "at", value_parser = parse_grid)]
    at: Grid,

    #[arg(short = 'd', long = "damage", default_value_t = 10)]
    damage: i32,

    #[arg(short = 'r', long = "radius", default_value_t = 0)]
    radius: i32,

    /// env, player, or monster:Y,X
    #[arg(short = 's', long = "source", default_value = "player")]
    source: String,

    /// Comma-separated projection flags
    #[arg(short = 'f', long = "flags", default_value = "grid,item,kill")]
    flags: String,
}

fn parse_grid(s: &str) -> Result<Grid, String> {
    let (y, x) = s
        .split_once(',')
        .ok_or_else(|| format!("expected Y,X, got '{s}'"))?;
    let y = y.trim().parse().map_err(|e| format!("bad row '{y}': {e}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad column '{x}': {e}"))?;
    Ok(Grid::new(y, x))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_source(arg: &str, world: &World, depth: Depth, hero: Option<PlayerId>) -> Result<Source> {
    match arg {
        "env" => Ok(Source::Env),
        "player" => match hero {
            Some(id) => Ok(Source::Player(id)),
            None => bail!("source is 'player' but the map has no '@'"),
        },
        other => {
            let Some(at) = other.strip_prefix("monster:") else {
                bail!("unknown source '{other}'");
            };
            let grid = parse_grid(at).map_err(anyhow::Error::msg)?;
            let level = world.level(depth).context("map level missing")?;
            match level.occupant(grid).monster() {
                Some(id) => Ok(Source::Monster(id)),
                None => bail!("no monster at {grid}"),
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    let flags = ProjectFlags::parse_list(&args.flags).with_context(|| format!("bad flag list '{}'", args.flags))?;

    let depth = 1;
    let mut world = World::new(config, GameRng::new(args.seed));
    let text = std::fs::read_to_string(&args.map).with_context(|| format!("reading {}", args.map.display()))?;
    let parsed = map::parse_map(&text, depth, &world.races).with_context(|| format!("parsing {}", args.map.display()))?;
    let hero = parsed.install(&mut world)?;
    tracing::info!(monsters = world.monsters.len(), players = world.players.len(), "map loaded");

    let source = resolve_source(&args.source, &world, depth, hero)?;
    let outcome = EffectRequest::new(source, depth, args.at, args.gf, args.damage)
        .radius(args.radius)
        .flags(flags)
        .fire(&mut world);

    tracing::info!(
        notice = outcome.notice,
        cells = outcome.projection.grids.len(),
        monsters = outcome.monsters_hit,
        players = outcome.players_hit,
        "projection resolved"
    );

    for player in world.players.iter() {
        let visuals = player
            .outbox
            .iter()
            .filter(|n| matches!(n, Notice::Visual { .. }))
            .count();
        println!("{} ({} visuals):", player.name, visuals);
        for msg in player.messages() {
            println!("  {msg}");
        }
        for notice in &player.outbox {
            if let Notice::SpellRelay { prayer, spell } = notice {
                println!("  [relay {} #{spell}]", if *prayer { "prayer" } else { "spell" });
            }
        }
    }
    print!("{}", map::render(&world, depth));
    Ok(())
}
