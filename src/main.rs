//! Headless Tetris runner (default binary).
//!
//! Plays a seeded session with the autoplayer and reports the result.
//! Events are logged to stderr as they happen; the report goes to stdout.

use anyhow::Result;

use sakura_tetris::runner::{load_rules, parse_args, run, RunReport, USAGE};
use sakura_tetris::types::{GameEvent, Rules};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let rules = match &config.rules_path {
        Some(path) => {
            let rules = load_rules(path)?;
            eprintln!("[Rules] Loaded {}", path.display());
            rules
        }
        None => Rules::default(),
    };

    eprintln!(
        "[Game] Seed {} ({:?} drive, {:?} gravity, up to {} pieces)",
        config.seed, config.drive, config.speed, config.pieces
    );
    let report = run(&config, rules, log_event)?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn log_event(event: &GameEvent) {
    match *event {
        GameEvent::LineCleared { count, difficult } => {
            let tag = if difficult { " (tetris)" } else { "" };
            eprintln!("[Game] Cleared {} line(s){}", count, tag);
        }
        GameEvent::LeveledUp { level } => eprintln!("[Game] Level {}", level),
        GameEvent::GameOver {
            final_score,
            best_score,
        } => eprintln!("[Game] Game over: score {}, best {}", final_score, best_score),
    }
}

fn print_summary(report: &RunReport) {
    println!("seed        {}", report.seed);
    println!("pieces      {}", report.pieces);
    println!("score       {}", report.score);
    println!("best        {}", report.best_score);
    println!("level       {}", report.level);
    println!("lines       {}", report.lines);
    println!("game over   {}", report.game_over);
    println!();
    for row in report.snapshot.board.iter() {
        let line: String = row
            .iter()
            .map(|&c| if c == 0 { '.' } else { '#' })
            .collect();
        println!("{}", line);
    }
}
