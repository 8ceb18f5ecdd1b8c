//! Pebble Entity - the entity model over the physics world
//!
//! - `EntityConfig` — declarative physical/visual/health attributes
//! - `Entity` — wraps exactly one physics body, with health and a
//!   destroyed latch
//! - `Behavior` — closed variant set for specialized entities (one-way
//!   clouds, viscous liquids, trigger zones, spawn points, kill boxes)
//! - `Player` — the distinguished input-driven entity

pub mod behavior;
pub mod config;
pub mod entity;
pub mod player;

pub use behavior::{Behavior, CloudState, LiquidState, SpawnPointState, SpawnTarget, TriggerState};
pub use config::{EntityConfig, HealthDisplay, ShapeKind};
pub use entity::{Entity, PhysicalState};
pub use player::{Player, PlayerConfig, PlayerInput};
