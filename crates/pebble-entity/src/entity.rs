//! The entity wrapper over a physics body
//!
//! An entity owns exactly one body with one collider, created at
//! construction. `destroy` removes the body from the world and latches
//! `is_destroyed`; the only way back is `restore_body`, used by editor
//! resets to rebuild the body from the saved config.

use crate::behavior::Behavior;
use crate::config::{EntityConfig, ShapeKind};
use pebble_core::{Aabb, EntityId, Vec2};
use pebble_physics::PhysicsWorld;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// A body's kinematic state, captured for snapshots and reapplied on reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalState {
    pub position: Vec2,
    /// Radians
    pub angle: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

impl Default for PhysicalState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
        }
    }
}

/// An entity wrapping one physics body
#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub config: EntityConfig,
    pub health: f32,
    pub is_destroyed: bool,
    pub behavior: Behavior,
    body: Option<RigidBodyHandle>,
    collider: Option<ColliderHandle>,
}

impl Entity {
    /// Create an entity and its body. This is the only creation path.
    pub fn spawn(config: EntityConfig, behavior: Behavior, physics: &mut PhysicsWorld) -> Self {
        Self::spawn_with_id(EntityId::new(), config, behavior, physics)
    }

    /// Create an entity under a known id (editor reset recreating a
    /// snapshotted entity)
    pub fn spawn_with_id(
        id: EntityId,
        config: EntityConfig,
        behavior: Behavior,
        physics: &mut PhysicsWorld,
    ) -> Self {
        let health = config.health.clamp(0.0, config.max_health);
        let (body, collider) = build_body(&config, &behavior, physics);
        Self {
            id,
            config,
            health,
            is_destroyed: false,
            behavior,
            body: Some(body),
            collider: Some(collider),
        }
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    pub fn collider(&self) -> Option<ColliderHandle> {
        self.collider
    }

    /// Reduce health, clamped at zero. No-op once destroyed.
    pub fn take_damage(&mut self, amount: f32) {
        if self.is_destroyed {
            return;
        }
        self.health = (self.health - amount).clamp(0.0, self.config.max_health);
    }

    /// Restore health, clamped at max. No-op once destroyed.
    pub fn heal(&mut self, amount: f32) {
        if self.is_destroyed {
            return;
        }
        self.health = (self.health + amount).clamp(0.0, self.config.max_health);
    }

    /// Remove the body from the world and latch the destroyed flag.
    /// Idempotent: the second call is a no-op.
    pub fn destroy(&mut self, physics: &mut PhysicsWorld) {
        if self.is_destroyed {
            return;
        }
        if let Some(handle) = self.body.take() {
            physics.remove_rigid_body(handle);
        }
        self.collider = None;
        self.is_destroyed = true;
    }

    /// Rebuild the body from the config. The one sanctioned resurrection
    /// path, used by editor resets; the caller reapplies any saved
    /// physical state afterwards.
    pub fn restore_body(&mut self, physics: &mut PhysicsWorld) {
        if self.body.is_none() {
            let (body, collider) = build_body(&self.config, &self.behavior, physics);
            self.body = Some(body);
            self.collider = Some(collider);
        }
        self.is_destroyed = false;
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        self.body.and_then(|h| physics.position(h))
    }

    pub fn set_position(&self, physics: &mut PhysicsWorld, position: Vec2) {
        if let Some(handle) = self.body {
            physics.set_position(handle, position);
        }
    }

    /// Body rotation in radians
    pub fn angle(&self, physics: &PhysicsWorld) -> Option<f32> {
        self.body.and_then(|h| physics.angle(h))
    }

    pub fn set_angle(&self, physics: &mut PhysicsWorld, angle: f32) {
        if let Some(handle) = self.body {
            physics.set_angle(handle, angle);
        }
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        self.body.and_then(|h| physics.velocity(h))
    }

    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec2) {
        if let Some(handle) = self.body {
            physics.set_velocity(handle, velocity);
        }
    }

    /// World-space bounding box of the live collider
    pub fn aabb(&self, physics: &PhysicsWorld) -> Option<Aabb> {
        self.collider.and_then(|h| physics.collider_aabb(h))
    }

    /// Capture the body's kinematic state for a snapshot
    pub fn capture_state(&self, physics: &PhysicsWorld) -> Option<PhysicalState> {
        let handle = self.body?;
        Some(PhysicalState {
            position: physics.position(handle)?,
            angle: physics.angle(handle)?,
            velocity: physics.velocity(handle)?,
            angular_velocity: physics.angular_velocity(handle)?,
        })
    }

    /// Reapply a captured kinematic state to the live body
    pub fn apply_state(&self, physics: &mut PhysicsWorld, state: &PhysicalState) {
        if let Some(handle) = self.body {
            physics.set_position(handle, state.position);
            physics.set_angle(handle, state.angle);
            physics.set_velocity(handle, state.velocity);
            physics.set_angular_velocity(handle, state.angular_velocity);
        }
    }

    /// Replace the collider shape after the config dimensions changed
    /// (editor scale tool)
    pub fn rebuild_shape(&self, physics: &mut PhysicsWorld) {
        if let Some(handle) = self.collider {
            physics.set_shape(handle, build_shape(&self.config));
        }
    }
}

fn build_shape(config: &EntityConfig) -> SharedShape {
    match config.shape {
        ShapeKind::Rectangle => SharedShape::cuboid(config.width * 0.5, config.height * 0.5),
        ShapeKind::Circle => SharedShape::ball(config.radius),
        ShapeKind::Triangle => {
            let hw = config.width * 0.5;
            let hh = config.height * 0.5;
            // Apex up: +y is down in world space
            SharedShape::triangle(point![-hw, hh], point![hw, hh], point![0.0, -hh])
        }
    }
}

fn build_body(
    config: &EntityConfig,
    behavior: &Behavior,
    physics: &mut PhysicsWorld,
) -> (RigidBodyHandle, ColliderHandle) {
    let builder = if config.is_static {
        RigidBodyBuilder::fixed()
    } else {
        RigidBodyBuilder::dynamic()
    };

    let body = builder
        .translation(vector![config.x, config.y])
        .rotation(config.rotation_radians())
        .linear_damping(config.friction_air)
        .build();
    let body_handle = physics.insert_rigid_body(body);

    let collider = ColliderBuilder::new(build_shape(config))
        .friction(config.friction)
        .restitution(config.restitution)
        .density(config.density)
        .sensor(behavior.initial_sensor(config.collision))
        .active_events(ActiveEvents::COLLISION_EVENTS)
        .build();
    let collider_handle = physics.insert_collider_with_parent(collider, body_handle);

    (body_handle, collider_handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_box(physics: &mut PhysicsWorld, x: f32, y: f32) -> Entity {
        let config = EntityConfig {
            x,
            y,
            ..Default::default()
        };
        Entity::spawn(config, Behavior::None, physics)
    }

    #[test]
    fn spawn_creates_exactly_one_body_and_collider() {
        let mut physics = PhysicsWorld::new();
        let entity = spawn_box(&mut physics, 10.0, 20.0);
        assert_eq!(physics.rigid_body_set.len(), 1);
        assert_eq!(physics.collider_set.len(), 1);
        assert_eq!(entity.position(&physics), Some(Vec2::new(10.0, 20.0)));
        assert!(!entity.is_destroyed);
    }

    #[test]
    fn damage_and_heal_clamp() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, 0.0, 0.0);

        entity.take_damage(150.0);
        assert_eq!(entity.health, 0.0);

        entity.heal(500.0);
        assert_eq!(entity.health, 100.0);
    }

    #[test]
    fn damage_then_heal_round_trips() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, 0.0, 0.0);

        entity.take_damage(10.0);
        entity.take_damage(10.0);
        entity.heal(5.0);
        assert_eq!(entity.health, 85.0);
    }

    #[test]
    fn destroy_is_idempotent_and_monotonic() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, 0.0, 0.0);

        entity.destroy(&mut physics);
        assert!(entity.is_destroyed);
        assert_eq!(physics.rigid_body_set.len(), 0);
        assert!(entity.body().is_none());

        // Second destroy and further mutation are no-ops
        entity.destroy(&mut physics);
        entity.take_damage(10.0);
        entity.heal(10.0);
        assert_eq!(entity.health, 100.0);
        assert!(entity.is_destroyed);
    }

    #[test]
    fn restore_body_resurrects_into_world() {
        let mut physics = PhysicsWorld::new();
        let mut entity = spawn_box(&mut physics, 5.0, 5.0);
        let id = entity.id;

        entity.destroy(&mut physics);
        assert_eq!(physics.rigid_body_set.len(), 0);

        entity.restore_body(&mut physics);
        assert!(!entity.is_destroyed);
        assert_eq!(entity.id, id);
        assert_eq!(physics.rigid_body_set.len(), 1);
        assert_eq!(entity.position(&physics), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn capture_and_apply_state() {
        let mut physics = PhysicsWorld::new();
        let entity = spawn_box(&mut physics, 1.0, 2.0);

        entity.set_velocity(&mut physics, Vec2::new(3.0, -4.0));
        let state = entity.capture_state(&physics).unwrap();
        assert_eq!(state.position, Vec2::new(1.0, 2.0));
        assert_eq!(state.velocity, Vec2::new(3.0, -4.0));

        entity.set_position(&mut physics, Vec2::new(50.0, 50.0));
        entity.apply_state(&mut physics, &state);
        assert_eq!(entity.position(&physics), Some(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn static_config_builds_fixed_body() {
        let mut physics = PhysicsWorld::new();
        let config = EntityConfig {
            is_static: true,
            ..Default::default()
        };
        let entity = Entity::spawn(config, Behavior::None, &mut physics);
        let body = physics.get_rigid_body(entity.body().unwrap()).unwrap();
        assert!(body.is_fixed());
    }
}
