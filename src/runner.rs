//! Headless runner: plays a seeded game with the autoplayer.
//!
//! Two drivers are available. `place` jumps straight to the chosen placement
//! through [`apply_place`]. `keys` reaches it the way a player would: rotate
//! presses, then a held arrow key repeated by the DAS/ARR handler while
//! gravity keeps ticking, then a hard drop.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::core::{GameSnapshot, GameState, SimpleRng};
use crate::engine::{apply_place, Autoplayer, Placement};
use crate::input::{InputHandler, RepeatKey};
use crate::types::{GameAction, GameEvent, Rules, SpeedMode};

/// Upper bound of simulated ticks spent steering one piece with keys
const MAX_STEER_TICKS: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    Place,
    Keys,
}

impl Drive {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "place" => Some(Drive::Place),
            "keys" => Some(Drive::Keys),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub pieces: u32,
    pub tick_ms: u32,
    pub speed: SpeedMode,
    pub best_score: u32,
    pub rules_path: Option<PathBuf>,
    pub drive: Drive,
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            pieces: 100,
            tick_ms: 16,
            speed: SpeedMode::Normal,
            best_score: 0,
            rules_path: None,
            drive: Drive::Place,
            json: false,
        }
    }
}

pub const USAGE: &str = "\
usage: sakura-tetris [options]

  --seed N        bag seed (default 1)
  --pieces N      stop after N pieces (default 100)
  --tick-ms N     simulated frame length in ms (default 16)
  --fast          speed mode gravity
  --best N        best score carried in from a previous session
  --rules PATH    JSON rules file; missing fields keep reference values
  --drive MODE    place | keys (default place)
  --json          print the final report as JSON";

/// Parse command line arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || take_value(args, &mut i, flag);
        match flag {
            "-h" | "--help" => return Ok(None),
            "--seed" => config.seed = parse_number(flag, value()?)?,
            "--pieces" => config.pieces = parse_number(flag, value()?)?,
            "--tick-ms" => {
                config.tick_ms = parse_number(flag, value()?)?;
                if config.tick_ms == 0 {
                    return Err(anyhow!("--tick-ms must be positive"));
                }
            }
            "--best" => config.best_score = parse_number(flag, value()?)?,
            "--rules" => config.rules_path = Some(PathBuf::from(value()?)),
            "--drive" => {
                let v = value()?;
                config.drive =
                    Drive::from_str(v).ok_or_else(|| anyhow!("invalid --drive value: {}", v))?;
            }
            "--fast" => config.speed = SpeedMode::Fast,
            "--json" => config.json = true,
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

fn parse_number(flag: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, value))
}

/// Load a rules file; fields it does not name keep their reference values.
pub fn load_rules(path: &Path) -> Result<Rules> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading rules file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing rules file {}", path.display()))
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub seed: u32,
    pub pieces: u32,
    pub score: u32,
    pub best_score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
    pub events: Vec<GameEvent>,
    pub snapshot: GameSnapshot,
}

/// Play until `config.pieces` pieces are locked or the game ends.
///
/// `on_event` sees every event as it is drained from the session.
pub fn run(
    config: &RunConfig,
    rules: Rules,
    mut on_event: impl FnMut(&GameEvent),
) -> Result<RunReport> {
    let mut game = GameState::with_source(SimpleRng::new(config.seed), rules)
        .with_best_score(config.best_score);
    game.start();

    let player = Autoplayer::default();
    let mut input = InputHandler::from_rules(&rules);
    let mut clock_ms: u64 = 0;
    let mut pieces = 0;
    let mut events = Vec::new();

    while pieces < config.pieces && !game.game_over() {
        // One frame passes before every decision.
        clock_ms += u64::from(config.tick_ms);
        if game.tick(config.tick_ms, config.speed).lock.is_some() {
            pieces += 1;
            drain_events(&mut game, &mut events, &mut on_event);
            continue;
        }

        let placement = player.choose(&game);
        let locked = match (config.drive, placement) {
            (Drive::Keys, Some(p)) => {
                steer_with_keys(&mut game, &mut input, &mut clock_ms, config, p)
            }
            (Drive::Place, Some(p)) => {
                apply_place(&mut game, p.x, p.rotation, p.use_hold)
                    .map_err(|e| anyhow!("placement {:?} rejected: {}", p, e))?;
                1
            }
            (_, None) => u32::from(game.hard_drop().is_some()),
        };
        pieces += locked;
        drain_events(&mut game, &mut events, &mut on_event);
    }

    Ok(RunReport {
        seed: config.seed,
        pieces,
        score: game.score(),
        best_score: game.best_score().max(game.score()),
        level: game.level(),
        lines: game.lines(),
        game_over: game.game_over(),
        events,
        snapshot: game.snapshot(),
    })
}

fn drain_events(
    game: &mut GameState<SimpleRng>,
    out: &mut Vec<GameEvent>,
    on_event: &mut impl FnMut(&GameEvent),
) {
    for event in game.take_events() {
        on_event(&event);
        out.push(event);
    }
}

/// Drive the active piece to `target` through discrete inputs and ticks.
///
/// Returns the number of pieces locked on the way (gravity may lock the
/// piece before the hard drop).
fn steer_with_keys(
    game: &mut GameState<SimpleRng>,
    input: &mut InputHandler,
    clock_ms: &mut u64,
    config: &RunConfig,
    target: Placement,
) -> u32 {
    let mut locked = 0;

    if target.use_hold {
        game.apply_action(GameAction::Hold);
    }

    for _ in 0..3 {
        match game.active() {
            Some(active) if active.rotation != target.rotation && active.kind == target.kind => {
                if !game.apply_action(GameAction::RotateCw) {
                    break;
                }
            }
            _ => break,
        }
    }

    let Some(start) = game.active() else {
        return locked;
    };
    let key = if target.x < start.x {
        Some(RepeatKey::Left)
    } else if target.x > start.x {
        Some(RepeatKey::Right)
    } else {
        None
    };

    if let Some(key) = key {
        if let Some(action) = input.press(key, *clock_ms) {
            game.apply_action(action);
        }
        for _ in 0..MAX_STEER_TICKS {
            let at_target = game.active().map_or(true, |a| a.x == target.x);
            if at_target {
                break;
            }
            let mut blocked = false;
            for action in input.update(*clock_ms) {
                blocked |= !game.apply_action(action);
            }
            *clock_ms += u64::from(config.tick_ms);
            if game.tick(config.tick_ms, config.speed).lock.is_some() {
                locked += 1;
                break;
            }
            if blocked {
                break;
            }
        }
        input.release(key);
    }

    if locked == 0 && game.hard_drop().is_some() {
        locked += 1;
    }
    locked
}
