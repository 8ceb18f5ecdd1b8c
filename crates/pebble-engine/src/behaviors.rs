//! Per-frame behavior passes: clouds, liquids, trigger stay
//!
//! Clouds are recomputed from scratch every frame rather than maintained
//! from collision events; a body that teleports or is removed mid-contact
//! can never leave a stale "on top" entry behind.

use crate::events::{EventBus, GameEvent};
use crate::store::EntityStore;
use pebble_core::{Aabb, EntityId};
use pebble_entity::behavior::CLOUD_TOP_TOLERANCE;
use pebble_entity::{Behavior, Player};
use pebble_physics::{PhysicsWorld, RigidBodyHandle};
use std::collections::HashSet;

/// Added to a submerged body's original air friction, scaled by viscosity
const LIQUID_DAMPING_GAIN: f32 = 0.3;
/// Base decay strength shared by the velocity factors below
const LIQUID_DECAY: f32 = 0.95;
/// Per-frame linear velocity multiplier step
const LIQUID_LINEAR_STEP: f32 = 0.05;
/// Per-frame angular velocity multiplier step
const LIQUID_ANGULAR_STEP: f32 = 0.1;

/// A dynamic body candidate for the cloud/liquid passes
struct BodyInfo {
    id: EntityId,
    handle: RigidBodyHandle,
    aabb: Aabb,
    velocity_y: f32,
}

/// Collect every live dynamic body: non-static entities plus the player
fn gather_dynamic_bodies(
    store: &EntityStore,
    player: &Player,
    physics: &PhysicsWorld,
) -> Vec<BodyInfo> {
    let mut bodies = Vec::new();

    for entity in store.iter() {
        if entity.is_destroyed || entity.config.is_static {
            continue;
        }
        let (Some(handle), Some(aabb), Some(velocity)) = (
            entity.body(),
            entity.aabb(physics),
            entity.velocity(physics),
        ) else {
            continue;
        };
        bodies.push(BodyInfo {
            id: entity.id,
            handle,
            aabb,
            velocity_y: velocity.y,
        });
    }

    if !player.entity.is_destroyed {
        if let (Some(handle), Some(aabb), Some(velocity)) = (
            player.entity.body(),
            player.entity.aabb(physics),
            player.entity.velocity(physics),
        ) {
            bodies.push(BodyInfo {
                id: player.entity.id,
                handle,
                aabb,
                velocity_y: velocity.y,
            });
        }
    }

    bodies
}

/// One-way platform pass. A body counts as approaching from above when it
/// is moving downward (or resting) and its bottom edge is at or above the
/// cloud's top edge, within tolerance. The collider is solid exactly while
/// someone is on top.
pub fn update_clouds(store: &mut EntityStore, player: &Player, physics: &mut PhysicsWorld) {
    let bodies = gather_dynamic_bodies(store, player, physics);
    let cloud_ids = store.ids_where(|b| matches!(b, Behavior::Cloud(_)));

    for cloud_id in cloud_ids {
        let Some(cloud) = store.get(cloud_id) else {
            continue;
        };
        if cloud.is_destroyed {
            continue;
        }
        let Some(cloud_aabb) = cloud.aabb(physics) else {
            continue;
        };
        let collider = cloud.collider();
        let cloud_top = cloud_aabb.min.y;

        let mut on_top = HashSet::new();
        for body in &bodies {
            if body.id == cloud_id {
                continue;
            }
            let from_above = body.velocity_y >= 0.0
                && body.aabb.max.y <= cloud_top + CLOUD_TOP_TOLERANCE;
            if from_above && body.aabb.overlaps_x(&cloud_aabb) {
                on_top.insert(body.id);
            }
        }

        let sensor = on_top.is_empty();
        if let Some(entity) = store.get_mut(cloud_id) {
            if let Behavior::Cloud(state) = &mut entity.behavior {
                state.entities_on_top = on_top;
            }
        }
        if let Some(handle) = collider {
            physics.set_sensor(handle, sensor);
        }
    }
}

/// Viscosity zone pass. Bounding-box overlap stands in for precise shape
/// intersection. On entry the body's current air friction is saved; on
/// exit exactly that value is restored, so a full enter/exit round-trip is
/// friction-neutral whatever the viscosity.
pub fn update_liquids(store: &mut EntityStore, player: &Player, physics: &mut PhysicsWorld) {
    let bodies = gather_dynamic_bodies(store, player, physics);
    let liquid_ids = store.ids_where(|b| matches!(b, Behavior::Liquid(_)));

    for liquid_id in liquid_ids {
        let Some(liquid) = store.get(liquid_id) else {
            continue;
        };
        if liquid.is_destroyed {
            continue;
        }
        let Some(liquid_aabb) = liquid.aabb(physics) else {
            continue;
        };

        let overlap_ids: HashSet<EntityId> = bodies
            .iter()
            .filter(|b| b.id != liquid_id && b.aabb.overlaps(&liquid_aabb))
            .map(|b| b.id)
            .collect();

        // Phase 1: figure out entries and exits against the tracked set
        let (viscosity, entries, exits) = {
            let Some(Behavior::Liquid(state)) = store.get(liquid_id).map(|e| &e.behavior) else {
                continue;
            };
            let entries: Vec<EntityId> = overlap_ids
                .iter()
                .filter(|id| !state.entities_in_liquid.contains(id))
                .copied()
                .collect();
            let exits: Vec<EntityId> = state
                .entities_in_liquid
                .iter()
                .filter(|id| !overlap_ids.contains(id))
                .copied()
                .collect();
            (state.viscosity, entries, exits)
        };

        // Phase 2: snapshot current damping for entering bodies before any
        // mutation
        let entry_damping: Vec<(EntityId, f32)> = entries
            .iter()
            .filter_map(|id| {
                let handle = bodies.iter().find(|b| b.id == *id)?.handle;
                Some((*id, physics.linear_damping(handle)?))
            })
            .collect();

        // Phase 3: update the tracked set and collect restores
        let mut restores: Vec<(EntityId, f32)> = Vec::new();
        if let Some(entity) = store.get_mut(liquid_id) {
            if let Behavior::Liquid(state) = &mut entity.behavior {
                for (id, damping) in &entry_damping {
                    state.entities_in_liquid.insert(*id);
                    state.saved_damping.insert(*id, *damping);
                }
                for id in &exits {
                    state.entities_in_liquid.remove(id);
                    if let Some(damping) = state.saved_damping.remove(id) {
                        restores.push((*id, damping));
                    }
                }
            }
        }

        // Phase 4: restore exited bodies that still exist
        for (id, damping) in restores {
            if let Some(body) = bodies.iter().find(|b| b.id == id) {
                physics.set_linear_damping(body.handle, damping);
            }
        }

        // Phase 5: drag every submerged body
        let Some(Behavior::Liquid(state)) = store.get(liquid_id).map(|e| &e.behavior) else {
            continue;
        };
        let linear_factor = 1.0 - viscosity * LIQUID_DECAY * LIQUID_LINEAR_STEP;
        let angular_factor = 1.0 - viscosity * LIQUID_DECAY * LIQUID_ANGULAR_STEP;
        for body in bodies.iter().filter(|b| state.entities_in_liquid.contains(&b.id)) {
            let original = state.saved_damping.get(&body.id).copied().unwrap_or(0.0);
            physics.set_linear_damping(body.handle, original + viscosity * LIQUID_DAMPING_GAIN);
            if let Some(velocity) = physics.velocity(body.handle) {
                physics.set_velocity(body.handle, velocity * linear_factor);
            }
            if let Some(angular) = physics.angular_velocity(body.handle) {
                physics.set_angular_velocity(body.handle, angular * angular_factor);
            }
        }
    }
}

/// Emit a stay notification for every body currently inside each trigger
pub fn dispatch_trigger_stay(store: &EntityStore, bus: &mut EventBus) {
    for entity in store.iter() {
        if entity.is_destroyed {
            continue;
        }
        if let Behavior::Trigger(state) = &entity.behavior {
            for other in &state.entities_inside {
                bus.push(GameEvent::TriggerStay {
                    trigger: entity.id,
                    other: *other,
                });
            }
        }
    }
}
