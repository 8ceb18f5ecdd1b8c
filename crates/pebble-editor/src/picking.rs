//! 2D entity hit-testing
//!
//! The select tool uses the precise tests (circle distance, point rotated
//! into body-local space for rectangles); the delete tool uses the
//! simplified axis-aligned test. Topmost means highest store index.
//! Boundary kill-boxes are never pickable.

use pebble_core::{Aabb, EntityId, Vec2};
use pebble_engine::EntityStore;
use pebble_entity::{Entity, ShapeKind};
use pebble_physics::PhysicsWorld;

/// Precise hit test: accounts for body rotation
pub fn hit_test(entity: &Entity, physics: &PhysicsWorld, point: Vec2) -> bool {
    let Some(position) = entity.position(physics) else {
        return false;
    };
    match entity.config.shape {
        ShapeKind::Circle => {
            let r = entity.config.radius;
            point.distance_squared(position) <= r * r
        }
        ShapeKind::Rectangle | ShapeKind::Triangle => {
            let angle = entity.angle(physics).unwrap_or(0.0);
            let local = (point - position).rotated(-angle);
            let half = entity.config.half_extents();
            local.x.abs() <= half.x && local.y.abs() <= half.y
        }
    }
}

/// Simplified hit test against the world-space AABB (ignores rotation)
pub fn hit_test_aabb(entity: &Entity, physics: &PhysicsWorld, point: Vec2) -> bool {
    entity
        .aabb(physics)
        .map(|aabb| aabb.contains_point(point))
        .unwrap_or(false)
}

fn pickable(entity: &Entity) -> bool {
    !entity.is_destroyed && !entity.behavior.is_kill_box()
}

/// Topmost entity under a point using the precise test
pub fn pick_topmost(store: &EntityStore, physics: &PhysicsWorld, point: Vec2) -> Option<EntityId> {
    store
        .iter()
        .filter(|e| pickable(e))
        .filter(|e| hit_test(e, physics, point))
        .map(|e| e.id)
        .last()
}

/// Topmost entity under a point using the simplified AABB test
pub fn pick_topmost_aabb(
    store: &EntityStore,
    physics: &PhysicsWorld,
    point: Vec2,
) -> Option<EntityId> {
    store
        .iter()
        .filter(|e| pickable(e))
        .filter(|e| hit_test_aabb(e, physics, point))
        .map(|e| e.id)
        .last()
}

/// Marquee membership: an entity is inside when its center point is
/// contained, not when it merely overlaps
pub fn entities_in_marquee(
    store: &EntityStore,
    physics: &PhysicsWorld,
    marquee: &Aabb,
) -> Vec<EntityId> {
    store
        .iter()
        .filter(|e| pickable(e))
        .filter(|e| {
            e.position(physics)
                .map(|p| marquee.contains_point(p))
                .unwrap_or(false)
        })
        .map(|e| e.id)
        .collect()
}

/// Centroid of a selection: the mean of the entity positions
pub fn selection_centroid(
    store: &EntityStore,
    physics: &PhysicsWorld,
    selection: &[EntityId],
) -> Option<Vec2> {
    let positions: Vec<Vec2> = selection
        .iter()
        .filter_map(|id| store.get(*id))
        .filter_map(|e| e.position(physics))
        .collect();
    if positions.is_empty() {
        return None;
    }
    let sum = positions
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + *p);
    Some(sum * (1.0 / positions.len() as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_engine::EntityStore;
    use pebble_entity::{Behavior, EntityConfig};

    fn store_with(configs: &[EntityConfig]) -> (EntityStore, PhysicsWorld) {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        for config in configs {
            store.add(Entity::spawn(config.clone(), Behavior::None, &mut physics));
        }
        (store, physics)
    }

    #[test]
    fn circle_hit_by_distance() {
        let config = EntityConfig {
            x: 100.0,
            y: 100.0,
            shape: ShapeKind::Circle,
            radius: 10.0,
            ..Default::default()
        };
        let (store, physics) = store_with(&[config]);
        let entity = store.iter().next().unwrap();

        assert!(hit_test(entity, &physics, Vec2::new(105.0, 100.0)));
        assert!(!hit_test(entity, &physics, Vec2::new(111.0, 100.0)));
    }

    #[test]
    fn rotated_rectangle_hit_uses_local_space() {
        let config = EntityConfig {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 10.0,
            rotation: 90.0,
            is_static: true,
            ..Default::default()
        };
        let (store, physics) = store_with(&[config]);
        let entity = store.iter().next().unwrap();

        // After a 90° turn the long axis is vertical
        assert!(hit_test(entity, &physics, Vec2::new(0.0, 18.0)));
        assert!(!hit_test(entity, &physics, Vec2::new(18.0, 0.0)));

        // The simplified AABB test disagrees on the rotated corners
        assert!(hit_test_aabb(entity, &physics, Vec2::new(0.0, 18.0)));
    }

    #[test]
    fn topmost_wins_on_overlap() {
        let a = EntityConfig {
            x: 0.0,
            y: 0.0,
            is_static: true,
            ..Default::default()
        };
        let (store, physics) = store_with(&[a.clone(), a]);
        let top_id = store.ids()[1];

        assert_eq!(pick_topmost(&store, &physics, Vec2::ZERO), Some(top_id));
    }

    #[test]
    fn kill_boxes_are_not_pickable() {
        let mut physics = PhysicsWorld::new();
        let mut store = EntityStore::new();
        store.add(Entity::spawn(
            EntityConfig {
                is_static: true,
                ..Default::default()
            },
            Behavior::KillBox,
            &mut physics,
        ));
        assert_eq!(pick_topmost(&store, &physics, Vec2::ZERO), None);
    }

    #[test]
    fn marquee_membership_is_center_point_based() {
        let configs: Vec<EntityConfig> = [(10.0, 10.0), (50.0, 50.0), (95.0, 10.0)]
            .iter()
            .map(|&(x, y)| EntityConfig {
                x,
                y,
                is_static: true,
                ..Default::default()
            })
            .collect();
        let (store, physics) = store_with(&configs);

        // Box covers the first two centers; the third overlaps only by edge
        let marquee = Aabb::from_min_max(Vec2::ZERO, Vec2::new(80.0, 80.0));
        let hits = entities_in_marquee(&store, &physics, &marquee);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn centroid_is_mean_of_positions() {
        let configs: Vec<EntityConfig> = [(0.0, 0.0), (100.0, 50.0)]
            .iter()
            .map(|&(x, y)| EntityConfig {
                x,
                y,
                is_static: true,
                ..Default::default()
            })
            .collect();
        let (store, physics) = store_with(&configs);
        let ids = store.ids();

        let centroid = selection_centroid(&store, &physics, &ids).unwrap();
        assert_eq!(centroid, Vec2::new(50.0, 25.0));
    }
}
