//! Level export: full re-derivation from the live world
//!
//! A save regenerates every descriptor from current body state (positions
//! and angles rounded to whole units/degrees); it is never a diff against
//! the loaded file. Boundary kill-boxes are implied by the boundary
//! settings and are not exported as entities.

use crate::format::{EntityDef, EntityKind, LevelFile, TriggerDef};
use pebble_core::Result;
use pebble_entity::{Behavior, Entity, Player, PlayerConfig};
use pebble_physics::PhysicsWorld;
use std::fs;
use std::path::Path;

/// Re-derive a level file from live entities. `template` supplies the
/// world-level settings (size, boundaries, overrides) that have no live
/// representation.
pub fn export_level(
    template: &LevelFile,
    entities: &[Entity],
    player: Option<&Player>,
    physics: &PhysicsWorld,
) -> LevelFile {
    let mut out = LevelFile {
        name: template.name.clone(),
        world_size: template.world_size,
        wall_thickness: template.wall_thickness,
        boundaries: template.boundaries,
        overrides: template.overrides,
        player: None,
        entities: Vec::new(),
        triggers: Vec::new(),
    };

    for entity in entities {
        if entity.is_destroyed || entity.behavior.is_kill_box() {
            continue;
        }

        let config = live_config(entity, physics);
        match &entity.behavior {
            Behavior::None => out.entities.push(EntityDef {
                config,
                entity_type: EntityKind::Entity,
                ..Default::default()
            }),
            Behavior::Cloud(_) => out.entities.push(EntityDef {
                config,
                entity_type: EntityKind::Cloud,
                ..Default::default()
            }),
            Behavior::Liquid(state) => out.entities.push(EntityDef {
                config,
                entity_type: EntityKind::Liquid,
                viscosity: state.viscosity,
                ..Default::default()
            }),
            Behavior::Trigger(state) => out.triggers.push(TriggerDef {
                config,
                trigger_type: state.trigger_type.clone(),
            }),
            Behavior::SpawnPoint(_) => out.entities.push(EntityDef {
                config,
                entity_type: EntityKind::PlayerSpawn,
                ..Default::default()
            }),
            Behavior::KillBox => unreachable!("filtered above"),
        }
    }

    if let Some(player) = player {
        let mut config = PlayerConfig {
            entity: live_config(&player.entity, physics),
            move_force: player.move_force,
            jump_force: player.jump_force,
            max_speed: player.max_speed,
        };
        config.entity.label = "player".to_string();
        out.player = Some(config);
    }

    out
}

/// Write a re-derived level file as pretty JSON
pub fn save_level<P: AsRef<Path>>(
    path: P,
    template: &LevelFile,
    entities: &[Entity],
    player: Option<&Player>,
    physics: &PhysicsWorld,
) -> Result<()> {
    let level = export_level(template, entities, player, physics);
    let json = level.to_json_string()?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.as_ref().display(), "saved level");
    Ok(())
}

/// Clone an entity's config with position/rotation refreshed from the live
/// body, rounded to integer units/degrees
fn live_config(entity: &Entity, physics: &PhysicsWorld) -> pebble_entity::EntityConfig {
    let mut config = entity.config.clone();
    if let Some(position) = entity.position(physics) {
        config.x = position.x.round();
        config.y = position.y.round();
    }
    if let Some(angle) = entity.angle(physics) {
        config.rotation = angle.to_degrees().round();
    }
    config.health = entity.health;
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;

    fn sample_level() -> LevelFile {
        LevelFile::from_json_str(
            r#"{
                "name": "export-test",
                "entities": [
                    {"x": 100.4, "y": 200.6, "rotation": 14.7},
                    {"x": 300, "y": 100, "entityType": "liquid", "viscosity": 0.25}
                ],
                "triggers": [
                    {"x": 400, "y": 100, "triggerType": "goal"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn export_rounds_and_preserves_kinds() {
        let mut physics = PhysicsWorld::new();
        let level = sample_level();
        let assembled = assemble(&level, &mut physics).unwrap();

        let out = export_level(&level, &assembled.entities, Some(&assembled.player), &physics);

        // Kill boxes are not exported
        assert_eq!(out.entities.len(), 2);
        assert_eq!(out.triggers.len(), 1);
        assert_eq!(out.entities[0].config.x, 100.0);
        assert_eq!(out.entities[0].config.y, 201.0);
        assert_eq!(out.entities[0].config.rotation, 15.0);
        assert_eq!(out.entities[1].entity_type, EntityKind::Liquid);
        assert_eq!(out.entities[1].viscosity, 0.25);
        assert_eq!(out.triggers[0].trigger_type, "goal");
        assert!(out.player.is_some());
    }

    #[test]
    fn destroyed_entities_are_not_exported() {
        let mut physics = PhysicsWorld::new();
        let level = sample_level();
        let mut assembled = assemble(&level, &mut physics).unwrap();

        // Destroy the plain box
        let target = assembled
            .entities
            .iter()
            .position(|e| matches!(e.behavior, Behavior::None) && !e.behavior.is_kill_box())
            .unwrap();
        assembled.entities[target].destroy(&mut physics);

        let out = export_level(&level, &assembled.entities, Some(&assembled.player), &physics);
        assert_eq!(out.entities.len(), 1);
    }

    #[test]
    fn save_then_reload_round_trips() {
        let mut physics = PhysicsWorld::new();
        let level = sample_level();
        let assembled = assemble(&level, &mut physics).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        save_level(&path, &level, &assembled.entities, Some(&assembled.player), &physics)
            .unwrap();

        let back = LevelFile::from_json_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.name, "export-test");
        assert_eq!(back.entities.len(), 2);
        assert_eq!(back.triggers.len(), 1);
    }
}
