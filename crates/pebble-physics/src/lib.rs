//! Pebble Physics - Rapier 2D integration
//!
//! The physics engine is consumed as a black box: create bodies, move them,
//! scale them, add/remove them from the world, and drain collision
//! start/end events. Everything else (entity semantics, behaviors, editor)
//! lives above this crate.

pub mod world;

pub use world::PhysicsWorld;

// Layers above deal in rapier handles and builders directly.
pub use rapier2d::prelude::{
    ColliderBuilder, ColliderHandle, CollisionEvent, RigidBodyBuilder, RigidBodyHandle,
    SharedShape,
};
