//! The player: a distinguished entity with input-driven movement

use crate::behavior::Behavior;
use crate::config::EntityConfig;
use crate::entity::Entity;
use pebble_core::Vec2;
use pebble_physics::PhysicsWorld;
use serde::{Deserialize, Serialize};

/// Player configuration: the entity attributes plus movement parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    #[serde(flatten)]
    pub entity: EntityConfig,
    pub move_force: f32,
    pub jump_force: f32,
    pub max_speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            entity: EntityConfig {
                label: "player".to_string(),
                width: 30.0,
                height: 45.0,
                fill_color: "#e0b040".to_string(),
                stroke_color: "#8c6a20".to_string(),
                ..Default::default()
            },
            move_force: 40_000.0,
            jump_force: 450.0,
            max_speed: 300.0,
        }
    }
}

/// Per-frame movement intent, decoded from the input map by the engine
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// The player entity with movement-force parameters and ground-contact
/// bookkeeping
#[derive(Debug)]
pub struct Player {
    pub entity: Entity,
    pub move_force: f32,
    pub jump_force: f32,
    pub max_speed: f32,
    grounded: bool,
}

impl Player {
    pub fn spawn(config: PlayerConfig, physics: &mut PhysicsWorld) -> Self {
        let entity = Entity::spawn(config.entity, Behavior::None, physics);
        Self {
            entity,
            move_force: config.move_force,
            jump_force: config.jump_force,
            max_speed: config.max_speed,
            grounded: false,
        }
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Collision-start bookkeeping: contact from below restores the jump
    pub fn notify_ground_contact(&mut self) {
        self.grounded = true;
    }

    /// Apply one frame of movement intent. Horizontal force is capped by
    /// `max_speed`; jumping needs ground contact and spends it.
    pub fn apply_input(&mut self, input: &PlayerInput, physics: &mut PhysicsWorld, dt: f32) {
        if self.entity.is_destroyed {
            return;
        }
        let Some(handle) = self.entity.body() else {
            return;
        };
        let Some(velocity) = physics.velocity(handle) else {
            return;
        };

        let mut vx = velocity.x;
        if input.left {
            vx -= self.move_force * dt;
        }
        if input.right {
            vx += self.move_force * dt;
        }
        vx = vx.clamp(-self.max_speed, self.max_speed);

        let mut vy = velocity.y;
        if input.jump && self.grounded {
            // +y is down; jumping is negative
            vy = -self.jump_force;
            self.grounded = false;
        }

        physics.set_velocity(handle, Vec2::new(vx, vy));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_requires_ground_contact() {
        let mut physics = PhysicsWorld::new();
        let mut player = Player::spawn(PlayerConfig::default(), &mut physics);

        let input = PlayerInput {
            jump: true,
            ..Default::default()
        };
        player.apply_input(&input, &mut physics, 1.0 / 60.0);
        let vy = player.entity.velocity(&physics).unwrap().y;
        assert_eq!(vy, 0.0);

        player.notify_ground_contact();
        player.apply_input(&input, &mut physics, 1.0 / 60.0);
        let vy = player.entity.velocity(&physics).unwrap().y;
        assert!(vy < 0.0);
        assert!(!player.grounded());
    }

    #[test]
    fn horizontal_speed_is_capped() {
        let mut physics = PhysicsWorld::new();
        let mut player = Player::spawn(PlayerConfig::default(), &mut physics);

        let input = PlayerInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            player.apply_input(&input, &mut physics, 1.0 / 60.0);
        }
        let vx = player.entity.velocity(&physics).unwrap().x;
        assert!(vx <= player.max_speed + 1e-3);
        assert!(vx > 0.0);
    }

    #[test]
    fn destroyed_player_ignores_input() {
        let mut physics = PhysicsWorld::new();
        let mut player = Player::spawn(PlayerConfig::default(), &mut physics);
        player.entity.destroy(&mut physics);

        let input = PlayerInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        player.notify_ground_contact();
        player.apply_input(&input, &mut physics, 1.0 / 60.0);
        assert!(player.entity.velocity(&physics).is_none());
    }

    #[test]
    fn player_config_json_defaults() {
        let config: PlayerConfig = serde_json::from_str(r#"{"x": 100, "jumpForce": 500}"#).unwrap();
        assert_eq!(config.entity.x, 100.0);
        assert_eq!(config.jump_force, 500.0);
        assert_eq!(config.max_speed, PlayerConfig::default().max_speed);
    }
}
