//! World snapshots and reset reconciliation
//!
//! The snapshot is the editor's baseline: player state, camera, and every
//! entity's config/state/health/destroyed flag keyed by id. Restoring
//! reconciles the live world against it with a two-tier policy — the
//! tombstone set beats the snapshot, and the snapshot beats transient
//! world state.

use pebble_core::EntityId;
use pebble_engine::{Camera, Engine};
use pebble_entity::{
    Behavior, CloudState, Entity, EntityConfig, LiquidState, PhysicalState, TriggerState,
};
use std::collections::HashSet;

/// One entity's saved baseline
#[derive(Debug, Clone)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub config: EntityConfig,
    /// Behavior with runtime membership sets emptied
    pub behavior: Behavior,
    pub state: Option<PhysicalState>,
    pub health: f32,
    pub is_destroyed: bool,
}

/// A trigger's saved interior set, keyed by the trigger's id
#[derive(Debug, Clone)]
pub struct TriggerSnapshot {
    pub id: EntityId,
    pub entities_inside: HashSet<EntityId>,
}

/// A point-in-time copy of the live world
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub player_state: Option<PhysicalState>,
    pub player_health: f32,
    pub camera: Camera,
    pub entities: Vec<EntitySnapshot>,
    pub triggers: Vec<TriggerSnapshot>,
}

/// Strip runtime membership from a behavior; resets rebuild it from the
/// trigger snapshots and the per-frame passes
fn baseline_behavior(behavior: &Behavior) -> Behavior {
    match behavior {
        Behavior::None => Behavior::None,
        Behavior::Cloud(_) => Behavior::Cloud(CloudState::default()),
        Behavior::Liquid(state) => Behavior::Liquid(LiquidState::new(state.viscosity)),
        Behavior::Trigger(state) => Behavior::Trigger(TriggerState::new(state.trigger_type.clone())),
        Behavior::SpawnPoint(state) => Behavior::SpawnPoint(state.clone()),
        Behavior::KillBox => Behavior::KillBox,
    }
}

/// Capture the current live world
pub fn capture(engine: &Engine) -> WorldSnapshot {
    let entities = engine
        .store
        .iter()
        .map(|entity| EntitySnapshot {
            id: entity.id,
            config: entity.config.clone(),
            behavior: baseline_behavior(&entity.behavior),
            state: entity.capture_state(&engine.physics),
            health: entity.health,
            is_destroyed: entity.is_destroyed,
        })
        .collect();

    let triggers = engine
        .store
        .iter()
        .filter_map(|entity| match &entity.behavior {
            Behavior::Trigger(state) => Some(TriggerSnapshot {
                id: entity.id,
                entities_inside: state.entities_inside.clone(),
            }),
            _ => None,
        })
        .collect();

    WorldSnapshot {
        player_state: engine.player.entity.capture_state(&engine.physics),
        player_health: engine.player.entity.health,
        camera: engine.camera,
        entities,
        triggers,
    }
}

/// Reconcile the live world back to the snapshot.
///
/// - live entities absent from the snapshot are structural additions and
///   are destroyed unconditionally
/// - snapshotted entities (except tombstoned ids) are restored in place,
///   resurrected, or recreated fresh from the saved config
/// - tombstoned ids stay gone
/// - trigger interiors are restored keyed by trigger id
pub fn restore(engine: &mut Engine, snapshot: &WorldSnapshot, tombstones: &HashSet<EntityId>) {
    let Engine {
        ref mut store,
        ref mut physics,
        ref mut player,
        ref mut camera,
        ..
    } = *engine;

    // 1. Player: resurrect if needed, then state and health verbatim
    player.entity.restore_body(physics);
    if let Some(state) = &snapshot.player_state {
        player.entity.apply_state(physics, state);
    }
    player.entity.health = snapshot.player_health;

    // 2. Camera
    *camera = snapshot.camera;

    // 3-4. Anything live that the snapshot doesn't know is an addition
    // made after the baseline: drop it unconditionally
    let snapshot_ids: HashSet<EntityId> = snapshot.entities.iter().map(|s| s.id).collect();
    for id in store.ids() {
        if !snapshot_ids.contains(&id) {
            if let Some(mut entity) = store.remove(id) {
                entity.destroy(physics);
            }
        }
    }

    // 5-6. Restore every snapshotted entity, skipping tombstones
    for snap in &snapshot.entities {
        if tombstones.contains(&snap.id) {
            continue;
        }

        if let Some(entity) = store.get_mut(snap.id) {
            if snap.is_destroyed {
                entity.destroy(physics);
            } else {
                entity.restore_body(physics);
                if let Some(state) = &snap.state {
                    entity.apply_state(physics, state);
                }
                entity.health = snap.health;
            }
        } else if !snap.is_destroyed {
            // Vanished through game logic (e.g. a kill box): recreate
            // fresh from the saved config under the original id
            let mut entity = Entity::spawn_with_id(
                snap.id,
                snap.config.clone(),
                baseline_behavior(&snap.behavior),
                physics,
            );
            if let Some(state) = &snap.state {
                entity.apply_state(physics, state);
            }
            entity.health = snap.health;
            store.add(entity);
        }
    }

    // 7. Trigger interiors, keyed by id
    for trigger_snap in &snapshot.triggers {
        if let Some(entity) = store.get_mut(trigger_snap.id) {
            if let Behavior::Trigger(state) = &mut entity.behavior {
                state.entities_inside = trigger_snap.entities_inside.clone();
            }
        }
    }

    tracing::debug!(
        entities = store.len(),
        tombstones = tombstones.len(),
        "world restored from snapshot"
    );
}
