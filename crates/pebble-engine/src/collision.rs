//! Fixed-order collision dispatch
//!
//! One pair queue is drained from the physics engine per step. For each
//! pair the subsystems run in a fixed declared order: player ground
//! contact, kill box versus player, kill box versus entity, trigger
//! membership. Pairs themselves arrive in whatever order the physics
//! engine reports them.

use crate::events::{EventBus, GameEvent};
use crate::store::EntityStore;
use pebble_core::EntityId;
use pebble_entity::{Behavior, Player};
use pebble_physics::{ColliderHandle, CollisionEvent, PhysicsWorld};
use std::collections::HashMap;

/// Process one step's collision events
pub fn process_collision_events(
    events: &[CollisionEvent],
    store: &mut EntityStore,
    player: &mut Player,
    physics: &mut PhysicsWorld,
    bus: &mut EventBus,
) {
    let mut by_collider: HashMap<ColliderHandle, EntityId> = HashMap::new();
    for entity in store.iter() {
        if let Some(collider) = entity.collider() {
            by_collider.insert(collider, entity.id);
        }
    }
    let player_id = player.entity.id;
    if let Some(collider) = player.entity.collider() {
        by_collider.insert(collider, player_id);
    }

    for event in events {
        match event {
            CollisionEvent::Started(h1, h2, _) => {
                let (Some(&a), Some(&b)) = (by_collider.get(h1), by_collider.get(h2)) else {
                    continue;
                };
                bus.push(GameEvent::CollisionStarted { a, b });
                handle_pair_start(a, b, player_id, store, player, physics, bus);
            }
            CollisionEvent::Stopped(h1, h2, _) => {
                let (Some(&a), Some(&b)) = (by_collider.get(h1), by_collider.get(h2)) else {
                    continue;
                };
                bus.push(GameEvent::CollisionEnded { a, b });
                handle_pair_end(a, b, player_id, store, bus);
            }
        }
    }
}

fn handle_pair_start(
    a: EntityId,
    b: EntityId,
    player_id: EntityId,
    store: &mut EntityStore,
    player: &mut Player,
    physics: &mut PhysicsWorld,
    bus: &mut EventBus,
) {
    // (a) player ground-contact bookkeeping
    if a == player_id || b == player_id {
        let other = if a == player_id { b } else { a };
        notify_player_contact(other, store, player, physics);
    }

    // (b) kill box versus player, (c) kill box versus entity
    for (zone, other) in [(a, b), (b, a)] {
        let is_kill_box = store
            .get(zone)
            .map(|e| e.behavior.is_kill_box())
            .unwrap_or(false);
        if !is_kill_box {
            continue;
        }
        if other == player_id {
            // The consumer decides what player death means
            bus.push(GameEvent::PlayerKilled);
        } else if let Some(mut entity) = store.remove(other) {
            entity.destroy(physics);
            bus.push(GameEvent::EntityDestroyed { id: other });
        }
    }

    // (d) trigger membership
    for (zone, other) in [(a, b), (b, a)] {
        if let Some(entity) = store.get_mut(zone) {
            if let Behavior::Trigger(state) = &mut entity.behavior {
                if state.entities_inside.insert(other) {
                    bus.push(GameEvent::TriggerEntered {
                        trigger: zone,
                        other,
                    });
                }
            }
        }
    }
}

fn handle_pair_end(
    a: EntityId,
    b: EntityId,
    _player_id: EntityId,
    store: &mut EntityStore,
    bus: &mut EventBus,
) {
    for (zone, other) in [(a, b), (b, a)] {
        if let Some(entity) = store.get_mut(zone) {
            if let Behavior::Trigger(state) = &mut entity.behavior {
                if state.entities_inside.remove(&other) {
                    bus.push(GameEvent::TriggerExited {
                        trigger: zone,
                        other,
                    });
                }
            }
        }
    }
}

/// Ground contact: a solid body whose top edge sits at or below the
/// player's center restores the jump (+y is down)
fn notify_player_contact(
    other: EntityId,
    store: &EntityStore,
    player: &mut Player,
    physics: &PhysicsWorld,
) {
    let Some(other_entity) = store.get(other) else {
        return;
    };
    let solid = other_entity
        .collider()
        .map(|c| !physics.is_sensor(c))
        .unwrap_or(false);
    if !solid {
        return;
    }
    let (Some(player_aabb), Some(other_aabb)) =
        (player.entity.aabb(physics), other_entity.aabb(physics))
    else {
        return;
    };
    if other_aabb.min.y >= player_aabb.center().y {
        player.notify_ground_contact();
    }
}
