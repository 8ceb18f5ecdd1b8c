//! Level export command: load, optionally simulate, re-derive

use anyhow::{Context, Result};
use pebble_core::GameConfig;
use pebble_engine::{Engine, InputState};
use pebble_level::LevelFile;
use std::fs;

pub fn run(level_path: &str, output_path: &str, frames: u32) -> Result<()> {
    let json = fs::read_to_string(level_path)
        .with_context(|| format!("reading {level_path}"))?;
    let level = LevelFile::from_json_str(&json)?;

    let mut engine = Engine::from_level(level, GameConfig::default())?;

    let input = InputState::new();
    for _ in 0..frames {
        engine.step(&input, 1.0 / 60.0);
        engine.bus.drain();
    }

    let exported = engine.export_level();
    fs::write(output_path, exported.to_json_string()?)
        .with_context(|| format!("writing {output_path}"))?;

    println!(
        "Exported '{}' to {output_path} ({} entities, {} triggers).",
        exported.name,
        exported.entities.len(),
        exported.triggers.len()
    );
    Ok(())
}
