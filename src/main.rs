use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use engine::{prelude::*, ScenarioStatus, Settings};
use util::Logos;

pub const GAME_NAME: &str = "undercroft";

const DEFAULT_MAP: &str = "
    ####################
    #@....#......,,,,..#
    #.(...+....r..,,,..#
    #.....#.......%%...#
    ###+###~~~.........#
    #......~~~...o..&&.#
    #..|...........&&&.#
    #......#####.......#
    #..j...#...'....[..#
    ####################";

#[derive(Parser, Debug)]
#[command(name = GAME_NAME, about = "Run a dungeon simulation headless")]
struct Args {
    #[arg(long, value_parser = |e: &str| Ok::<Logos, &str>(Logos::new(e)), help = "Game world seed")]
    seed: Option<Logos>,

    #[arg(long, help = "Number of turns to run, defaults to the turn limit")]
    turns: Option<u32>,

    #[arg(long, help = "IDM settings file")]
    config: Option<PathBuf>,

    #[arg(long, help = "ASCII map file")]
    map: Option<PathBuf>,

    #[arg(long, help = "Let the AI play the player character")]
    autopilot: bool,
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Default::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    idm::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = load_settings(args.config.as_ref())?;
    settings.autopilot |= args.autopilot;
    let turns = args.turns.unwrap_or(settings.turn_limit);

    let seed = args
        .seed
        .unwrap_or_else(|| Logos::sample(&mut rand::thread_rng(), 10));
    log::info!("seed: {seed}");

    let map = match &args.map {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => DEFAULT_MAP.to_string(),
    };

    let mut r = Runtime::new(settings, &seed);
    r.load_ascii_level(LevelId(0), &map)?;
    if r.player().is_none() {
        return Err(Error::NoPlayer.into());
    }

    for turn in 1..=turns {
        r.tick()?;
        for msg in r.drain_msgs() {
            if let Msg::Message(text) = msg {
                println!("{text}");
            }
        }

        if r.scenario_status() == ScenarioStatus::Lost {
            println!("You died on turn {turn}.");
            return Ok(());
        }
    }

    log::info!("ran {turns} turns");
    Ok(())
}
