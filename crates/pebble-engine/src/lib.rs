//! Pebble Engine - the game loop controller
//!
//! - `EntityStore` — the single owner of the entity collection
//! - `Engine` — frame updates, behavior passes, fixed-order collision
//!   dispatch, pause/resume
//! - `GameEvent` / `EventBus` — typed event queue consumed by the shell
//! - `InputState` — key/action tracking over winit key codes
//! - `Camera` — screen/world mapping
//! - `GameClock` — fixed-timestep accumulator

pub mod behaviors;
pub mod camera;
pub mod clock;
pub mod collision;
pub mod engine;
pub mod events;
pub mod input;
pub mod store;

pub use camera::Camera;
pub use clock::GameClock;
pub use engine::{DebugFlags, Engine};
pub use events::{EventBus, GameEvent};
pub use input::InputState;
pub use store::EntityStore;
