//! World assembly from a parsed level file
//!
//! Builds the boundary kill-boxes, constructs every entity and trigger
//! descriptor through the closed-tag factory, and resolves the player
//! config (spawn point beats the legacy flat config).

use crate::format::{EntityDef, EntityKind, LevelFile};
use pebble_core::Result;
use pebble_entity::{
    Behavior, CloudState, Entity, EntityConfig, LiquidState, Player, PlayerConfig,
    SpawnPointState, SpawnTarget, TriggerState,
};
use pebble_physics::PhysicsWorld;

/// The live output of assembling a level
pub struct AssembledLevel {
    pub entities: Vec<Entity>,
    pub player: Player,
}

/// Build the full live world for a level file
pub fn assemble(level: &LevelFile, physics: &mut PhysicsWorld) -> Result<AssembledLevel> {
    let mut entities = Vec::new();

    if level.boundaries.enabled {
        entities.extend(build_boundaries(level, physics));
    }

    for def in &level.entities {
        entities.push(build_entity(def, physics));
    }

    for def in &level.triggers {
        let mut config = def.config.clone();
        config.is_static = true;
        entities.push(Entity::spawn(
            config,
            Behavior::Trigger(TriggerState::new(def.trigger_type.clone())),
            physics,
        ));
    }

    let player = Player::spawn(resolve_player_config(level), physics);

    tracing::info!(
        level = %level.name,
        entities = entities.len(),
        triggers = level.triggers.len(),
        "assembled level"
    );

    Ok(AssembledLevel { entities, player })
}

/// Construct one entity from its descriptor, dispatching on the closed tag
pub fn build_entity(def: &EntityDef, physics: &mut PhysicsWorld) -> Entity {
    let mut config = def.config.clone();
    let behavior = match def.entity_type {
        EntityKind::Entity => Behavior::None,
        EntityKind::Cloud => Behavior::Cloud(CloudState::default()),
        EntityKind::Liquid => Behavior::Liquid(LiquidState::new(def.viscosity)),
        EntityKind::Trigger => Behavior::Trigger(TriggerState::new(def.trigger_type.clone())),
        EntityKind::PlayerSpawn => Behavior::SpawnPoint(SpawnPointState {
            spawns: SpawnTarget::Player,
        }),
    };

    // Zones never fall under gravity
    if !matches!(def.entity_type, EntityKind::Entity) {
        config.is_static = true;
    }

    Entity::spawn(config, behavior, physics)
}

/// Build the four boundary kill-boxes around the world edges
pub fn build_boundaries(level: &LevelFile, physics: &mut PhysicsWorld) -> Vec<Entity> {
    let w = level.world_size.width;
    let h = level.world_size.height;
    let t = level.wall_thickness;

    let edges = [
        // (center x, center y, width, height)
        (w * 0.5, -t * 0.5, w + 2.0 * t, t),
        (w * 0.5, h + t * 0.5, w + 2.0 * t, t),
        (-t * 0.5, h * 0.5, t, h + 2.0 * t),
        (w + t * 0.5, h * 0.5, t, h + 2.0 * t),
    ];

    edges
        .iter()
        .map(|&(x, y, width, height)| {
            let config = EntityConfig {
                label: "kill_box".to_string(),
                x,
                y,
                width,
                height,
                is_static: true,
                ..Default::default()
            };
            Entity::spawn(config, Behavior::KillBox, physics)
        })
        .collect()
}

/// Resolve the player config: a `player_spawn` entity wins; otherwise the
/// flat config with per-level overrides shallow-merged over it
pub fn resolve_player_config(level: &LevelFile) -> PlayerConfig {
    let mut config = level.player.clone().unwrap_or_default();

    let spawn = level
        .entities
        .iter()
        .find(|d| d.entity_type == EntityKind::PlayerSpawn);

    if let Some(spawn) = spawn {
        config.entity.x = spawn.config.x;
        config.entity.y = spawn.config.y;
    } else {
        if let Some(x) = level.overrides.player.x {
            config.entity.x = x;
        }
        if let Some(y) = level.overrides.player.y {
            config.entity.y = y;
        }
    }

    config
}
