//! Editor tools
//!
//! Tools are stateful objects with an activation lifecycle; only the
//! current tool receives input. Mouse handlers get world coordinates
//! already converted by the editor, and mutate the world through the
//! shared `ToolCtx`.

pub mod delete;
pub mod entity_tool;
pub mod select;

pub use delete::DeleteTool;
pub use entity_tool::{EntityPreset, EntityTool, PaletteCategory};
pub use select::{SelectTool, TransformMode};

use crate::snapshot::WorldSnapshot;
use pebble_core::{EntityId, Vec2};
use pebble_engine::Engine;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// Left mouse button index
pub const BUTTON_LEFT: u32 = 0;
/// Right mouse button index
pub const BUTTON_RIGHT: u32 = 2;

/// Mouse travel below this (screen pixels) counts as a click, not a drag
pub const CLICK_DRAG_THRESHOLD: f32 = 4.0;

/// Everything a tool may touch while handling input
pub struct ToolCtx<'a> {
    pub engine: &'a mut Engine,
    /// Deliberately deleted ids; resets never bring these back
    pub tombstones: &'a mut HashSet<EntityId>,
    /// The editor baseline; created entities are folded into it
    pub snapshot: &'a mut Option<WorldSnapshot>,
}

/// Base contract for editor tools
pub trait Tool {
    /// Identifier for UI and cursor selection (e.g. "select", "delete")
    fn name(&self) -> &'static str;

    /// Called when the tool becomes current
    fn activate(&mut self) {}

    /// Called when another tool takes over; drop any in-progress drag
    fn deactivate(&mut self) {}

    fn on_mouse_down(&mut self, _ctx: &mut ToolCtx, _button: u32, _world: Vec2) {}
    fn on_mouse_move(&mut self, _ctx: &mut ToolCtx, _world: Vec2) {}
    fn on_mouse_up(&mut self, _ctx: &mut ToolCtx, _button: u32, _world: Vec2) {}
    fn on_key_down(&mut self, _ctx: &mut ToolCtx, _key: KeyCode) {}
}
