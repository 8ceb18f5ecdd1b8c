//! Pebble Editor - in-process level editing
//!
//! The editor is constructed only after the engine exists, pauses the
//! engine while active, and mutates entities exclusively through the
//! engine's store. Resets reconcile the live world against a snapshot,
//! with deliberately deleted entities tombstoned out.

pub mod editor;
pub mod picking;
pub mod snapshot;
pub mod tools;

pub use editor::{Editor, ToolKind};
pub use snapshot::{EntitySnapshot, TriggerSnapshot, WorldSnapshot};
pub use tools::{DeleteTool, EntityTool, SelectTool, Tool, ToolCtx, TransformMode};
