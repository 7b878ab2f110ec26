//! Headless simulation runner (default binary).
//!
//! Drives a default-config session with random gestures and prints one JSON
//! snapshot line per turn, plus a final summary on stderr. Exists so the
//! engine can be exercised end to end without any rendering surface.
//!
//! Usage: gemgrid [seed] [turns]

use anyhow::{Context, Result};

use gemgrid::config::EngineConfig;
use gemgrid::core::{BoardEngine, SimpleRng};
use gemgrid::types::RotateDir;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let seed: u32 = match args.next() {
        Some(arg) => arg.parse().context("seed must be a u32")?,
        None => 1,
    };
    let turns: u32 = match args.next() {
        Some(arg) => arg.parse().context("turn count must be a u32")?,
        None => 100,
    };

    run(seed, turns)
}

fn run(seed: u32, turns: u32) -> Result<()> {
    let mut engine = BoardEngine::new(EngineConfig::default(), seed)?;
    // Separate stream for the driver so gesture choice never perturbs the
    // engine's own draw sequence
    let mut driver = SimpleRng::new(seed ^ 0x9e37_79b9);

    let (rows, cols) = engine.board().dimensions();
    for _ in 0..turns {
        // Roughly one rotation attempt per dozen gestures
        if driver.next_range(12) == 0 {
            let dir = if driver.next_range(2) == 0 {
                RotateDir::Left
            } else {
                RotateDir::Right
            };
            engine.request_rotate(dir);
        } else {
            let r = driver.next_range(rows as u32) as usize;
            let c = driver.next_range(cols as u32) as usize;
            engine.select_cell(r, c);
        }

        println!("{}", serde_json::to_string(&engine.snapshot())?);
    }

    eprintln!(
        "seed {}: {} turns, score {}, {} rotations left",
        seed,
        turns,
        engine.score(),
        engine.rotations_left()
    );
    Ok(())
}
