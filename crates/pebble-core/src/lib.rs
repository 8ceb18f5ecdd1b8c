//! Pebble Core - shared types for the Pebble sandbox
//!
//! - `EntityId` — stable identifier standing in for a physics body id
//! - `Vec2` / `Aabb` — the small amount of 2D math the tools need
//! - `GameConfig` / `AspectRatio` — validated game configuration
//! - `PebbleError` / `Result` — the workspace error type

pub mod config;
pub mod error;
pub mod id;
pub mod types;

pub use config::{AspectRatio, GameConfig};
pub use error::{PebbleError, Result};
pub use id::EntityId;
pub use types::{Aabb, Vec2};
