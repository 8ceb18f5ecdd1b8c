//! Headless simulation command

use anyhow::{Context, Result};
use pebble_core::GameConfig;
use pebble_engine::{Engine, GameEvent, InputState};
use pebble_level::LevelFile;
use std::fs;

pub fn run(level_path: &str, frames: u32, config_path: Option<&str>) -> Result<()> {
    let json = fs::read_to_string(level_path)
        .with_context(|| format!("reading {level_path}"))?;
    let level = LevelFile::from_json_str(&json)?;

    // A bad config is surfaced and the safe default takes over; the run
    // itself still happens
    let config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            match GameConfig::from_json_str(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("config error: {e}; falling back to defaults");
                    GameConfig::default()
                }
            }
        }
        None => GameConfig::default(),
    };

    let mut engine = Engine::from_level(level, config)?;
    let input = InputState::new();

    let mut player_killed = 0u32;
    let mut entities_destroyed = 0u32;
    let mut trigger_enters = 0u32;
    for _ in 0..frames {
        engine.step(&input, 1.0 / 60.0);
        for event in engine.bus.drain() {
            match event {
                GameEvent::PlayerKilled => player_killed += 1,
                GameEvent::EntityDestroyed { .. } => entities_destroyed += 1,
                GameEvent::TriggerEntered { .. } => trigger_enters += 1,
                _ => {}
            }
        }
    }

    println!(
        "Simulated {frames} steps of '{}' ({} entities remain).",
        engine.level.name,
        engine.store.len()
    );
    if let Some(position) = engine.player.entity.position(&engine.physics) {
        println!(
            "  player: ({:.0}, {:.0}), health {:.0}",
            position.x, position.y, engine.player.entity.health
        );
    }
    println!("  player-killed events: {player_killed}");
    println!("  entities destroyed: {entities_destroyed}");
    println!("  trigger entries: {trigger_enters}");
    Ok(())
}
