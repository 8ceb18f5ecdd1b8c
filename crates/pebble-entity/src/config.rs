//! Declarative entity configuration
//!
//! Every field has a serde default so sparse level JSON loads. The label is
//! descriptive only; identity is the entity's id.

use pebble_core::Vec2;
use serde::{Deserialize, Serialize};

/// Collision shape variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl Default for ShapeKind {
    fn default() -> Self {
        ShapeKind::Rectangle
    }
}

/// How an entity's health is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthDisplay {
    None,
    Bar,
    Text,
}

impl Default for HealthDisplay {
    fn default() -> Self {
        HealthDisplay::None
    }
}

/// Physical, visual, and health attributes of an entity.
///
/// Dimensions are `width`/`height` for rectangles and triangles, `radius`
/// for circles. `rotation` is in degrees, matching the level file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityConfig {
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub shape: ShapeKind,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub rotation: f32,
    pub fill_color: String,
    pub stroke_color: String,
    pub friction: f32,
    pub friction_air: f32,
    pub restitution: f32,
    pub density: f32,
    pub is_static: bool,
    pub health: f32,
    pub max_health: f32,
    pub health_display: HealthDisplay,
    /// `false` turns the collider into a pure sensor (overlap only)
    pub collision: bool,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            label: "entity".to_string(),
            x: 0.0,
            y: 0.0,
            shape: ShapeKind::Rectangle,
            width: 50.0,
            height: 50.0,
            radius: 25.0,
            rotation: 0.0,
            fill_color: "#4a90d9".to_string(),
            stroke_color: "#2c5a8c".to_string(),
            friction: 0.1,
            friction_air: 0.01,
            restitution: 0.0,
            density: 0.001,
            is_static: false,
            health: 100.0,
            max_health: 100.0,
            health_display: HealthDisplay::None,
            collision: true,
        }
    }
}

impl EntityConfig {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    /// Rotation converted to radians for the physics body
    pub fn rotation_radians(&self) -> f32 {
        self.rotation.to_radians()
    }

    /// Half-extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match self.shape {
            ShapeKind::Circle => Vec2::new(self.radius, self.radius),
            ShapeKind::Rectangle | ShapeKind::Triangle => {
                Vec2::new(self.width * 0.5, self.height * 0.5)
            }
        }
    }
}
