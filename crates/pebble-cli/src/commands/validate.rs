//! Level validation command

use anyhow::{Context, Result};
use pebble_core::GameConfig;
use pebble_engine::Engine;
use pebble_entity::Behavior;
use pebble_level::LevelFile;
use std::fs;

pub fn run(level_path: &str) -> Result<()> {
    let json = fs::read_to_string(level_path)
        .with_context(|| format!("reading {level_path}"))?;
    let level = LevelFile::from_json_str(&json)?;

    // Assemble into a throwaway world to prove every descriptor builds
    let engine = Engine::from_level(level, GameConfig::default())?;

    let mut clouds = 0;
    let mut liquids = 0;
    let mut triggers = 0;
    let mut spawn_points = 0;
    let mut kill_boxes = 0;
    let mut plain = 0;
    for entity in engine.store.iter() {
        match &entity.behavior {
            Behavior::None => plain += 1,
            Behavior::Cloud(_) => clouds += 1,
            Behavior::Liquid(_) => liquids += 1,
            Behavior::Trigger(_) => triggers += 1,
            Behavior::SpawnPoint(_) => spawn_points += 1,
            Behavior::KillBox => kill_boxes += 1,
        }
    }

    println!("Level '{}' is valid.", engine.level.name);
    println!(
        "  world: {}x{}",
        engine.level.world_size.width, engine.level.world_size.height
    );
    println!("  entities: {plain}");
    println!("  clouds: {clouds}");
    println!("  liquids: {liquids}");
    println!("  triggers: {triggers}");
    println!("  spawn points: {spawn_points}");
    println!("  kill boxes: {kill_boxes}");
    Ok(())
}
