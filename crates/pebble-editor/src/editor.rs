//! The editor state machine
//!
//! Two states: inactive (game running) and active (engine paused, tools
//! armed). Entering always resets to the last saved baseline; leaving
//! resumes the simulation. Exactly one tool is current at a time.

use crate::snapshot::{self, WorldSnapshot};
use crate::tools::{DeleteTool, EntityTool, SelectTool, Tool, ToolCtx};
use pebble_core::{EntityId, PebbleError, Result, Vec2};
use pebble_engine::Engine;
use pebble_entity::ShapeKind;
use std::collections::HashSet;
use winit::keyboard::KeyCode;

/// The closed set of editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Select,
    Entity,
    Delete,
}

pub struct Editor {
    active: bool,
    tool: ToolKind,
    pub select: SelectTool,
    pub delete: DeleteTool,
    pub entity_tool: EntityTool,
    /// The reset baseline; captured lazily on first use
    pub snapshot: Option<WorldSnapshot>,
    /// Tombstones for the current level session
    pub deleted_entity_ids: HashSet<EntityId>,
    viewport: Vec2,
}

impl Editor {
    /// Construct after the engine exists; the editor never outlives or
    /// precedes the world it edits
    pub fn new(viewport: Vec2) -> Self {
        Self {
            active: false,
            tool: ToolKind::Select,
            select: SelectTool::new(),
            delete: DeleteTool::new(),
            entity_tool: EntityTool::new(),
            snapshot: None,
            deleted_entity_ids: HashSet::new(),
            viewport,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn toggle(&mut self, engine: &mut Engine) {
        if self.active {
            self.hide(engine);
        } else {
            self.show(engine);
        }
    }

    /// Enter editing: snapshot lazily, reset to the baseline, pause the
    /// simulation and take the player's input away
    pub fn show(&mut self, engine: &mut Engine) {
        if self.active {
            return;
        }
        self.active = true;
        self.reset_to_initial_state(engine);
        engine.pause();
        engine.input_enabled = false;
        tracing::info!("editor opened");
    }

    /// Leave editing: disarm the current tool and resume the simulation
    pub fn hide(&mut self, engine: &mut Engine) {
        if !self.active {
            return;
        }
        self.active = false;
        self.current_tool_mut().deactivate();
        engine.resume();
        engine.input_enabled = true;
        tracing::info!("editor closed");
    }

    /// Switch tools: deactivate the old one, then activate the new one
    pub fn select_tool(&mut self, kind: ToolKind) {
        if self.tool == kind {
            return;
        }
        self.current_tool_mut().deactivate();
        self.tool = kind;
        self.current_tool_mut().activate();
    }

    /// Capture the current world as the new reset baseline. Called after
    /// structural edits so "reset" means "reset to the last deliberate
    /// checkpoint".
    pub fn save_initial_state(&mut self, engine: &Engine) {
        self.snapshot = Some(snapshot::capture(engine));
    }

    /// Reconcile the live world back to the baseline (capturing one
    /// lazily if none exists), then clear the selection
    pub fn reset_to_initial_state(&mut self, engine: &mut Engine) {
        if self.snapshot.is_none() {
            self.snapshot = Some(snapshot::capture(engine));
        }
        if let Some(snapshot) = &self.snapshot {
            snapshot::restore(engine, snapshot, &self.deleted_entity_ids);
        }
        self.select.clear_selection();
    }

    /// A new level replaces the session: tombstones die with it and the
    /// baseline is recaptured
    pub fn on_level_loaded(&mut self, engine: &Engine) {
        self.deleted_entity_ids.clear();
        self.select.clear_selection();
        self.snapshot = Some(snapshot::capture(engine));
    }

    /// Delete an entity by id, recording the tombstone first. The player
    /// is not an editable entity.
    pub fn delete_entity(&mut self, engine: &mut Engine, id: EntityId) -> Result<()> {
        if id == engine.player.entity.id {
            return Err(PebbleError::Editor("the player cannot be deleted".into()));
        }
        self.deleted_entity_ids.insert(id);
        if let Some(mut entity) = engine.store.remove(id) {
            entity.destroy(&mut engine.physics);
        }
        Ok(())
    }

    /// Changing an existing entity's shape variant is not implemented;
    /// reject with a notice instead of mutating anything
    pub fn morph_entity_shape(
        &mut self,
        engine: &Engine,
        id: EntityId,
        shape: ShapeKind,
    ) -> Result<()> {
        match engine.store.get(id).map(|e| e.config.shape) {
            Some(current) if current == shape => Ok(()),
            Some(_) => Err(PebbleError::Editor(
                "changing an entity's shape is not supported".into(),
            )),
            None => Err(PebbleError::EntityNotFound(id.raw())),
        }
    }

    /// Create a palette preset at a world position through the entity
    /// tool, folding it into the reset baseline
    pub fn create_entity(
        &mut self,
        engine: &mut Engine,
        category: usize,
        index: usize,
        position: Vec2,
    ) -> Result<EntityId> {
        let mut ctx = ToolCtx {
            engine,
            tombstones: &mut self.deleted_entity_ids,
            snapshot: &mut self.snapshot,
        };
        self.entity_tool.create_at(&mut ctx, category, index, position)
    }

    // --- Input entry points (screen coordinates) ---

    pub fn on_mouse_down(&mut self, engine: &mut Engine, button: u32, screen: Vec2) {
        if !self.active {
            return;
        }
        let world = engine.camera.screen_to_world(screen, self.viewport);
        let mut ctx = ToolCtx {
            engine,
            tombstones: &mut self.deleted_entity_ids,
            snapshot: &mut self.snapshot,
        };
        match self.tool {
            ToolKind::Select => self.select.on_mouse_down(&mut ctx, button, world),
            ToolKind::Entity => self.entity_tool.on_mouse_down(&mut ctx, button, world),
            ToolKind::Delete => self.delete.on_mouse_down(&mut ctx, button, world),
        }
    }

    pub fn on_mouse_move(&mut self, engine: &mut Engine, screen: Vec2) {
        if !self.active {
            return;
        }
        let world = engine.camera.screen_to_world(screen, self.viewport);
        let mut ctx = ToolCtx {
            engine,
            tombstones: &mut self.deleted_entity_ids,
            snapshot: &mut self.snapshot,
        };
        match self.tool {
            ToolKind::Select => self.select.on_mouse_move(&mut ctx, world),
            ToolKind::Entity => self.entity_tool.on_mouse_move(&mut ctx, world),
            ToolKind::Delete => self.delete.on_mouse_move(&mut ctx, world),
        }
    }

    pub fn on_mouse_up(&mut self, engine: &mut Engine, button: u32, screen: Vec2) {
        if !self.active {
            return;
        }
        let world = engine.camera.screen_to_world(screen, self.viewport);
        let mut ctx = ToolCtx {
            engine,
            tombstones: &mut self.deleted_entity_ids,
            snapshot: &mut self.snapshot,
        };
        match self.tool {
            ToolKind::Select => self.select.on_mouse_up(&mut ctx, button, world),
            ToolKind::Entity => self.entity_tool.on_mouse_up(&mut ctx, button, world),
            ToolKind::Delete => self.delete.on_mouse_up(&mut ctx, button, world),
        }
    }

    /// Keyboard while editing: arrows nudge the selection, R/S/M switch
    /// the transform mode; keys go to the current tool
    pub fn on_key_down(&mut self, engine: &mut Engine, key: KeyCode) {
        if !self.active {
            return;
        }
        let mut ctx = ToolCtx {
            engine,
            tombstones: &mut self.deleted_entity_ids,
            snapshot: &mut self.snapshot,
        };
        match self.tool {
            ToolKind::Select => self.select.on_key_down(&mut ctx, key),
            ToolKind::Entity => self.entity_tool.on_key_down(&mut ctx, key),
            ToolKind::Delete => self.delete.on_key_down(&mut ctx, key),
        }
    }

    fn current_tool_mut(&mut self) -> &mut dyn Tool {
        match self.tool {
            ToolKind::Select => &mut self.select,
            ToolKind::Entity => &mut self.entity_tool,
            ToolKind::Delete => &mut self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pebble_core::GameConfig;
    use pebble_level::LevelFile;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn sample_engine() -> Engine {
        let level = LevelFile::from_json_str(
            r#"{
                "worldSize": {"width": 800, "height": 600},
                "player": {"x": 400, "y": 100},
                "entities": [{"x": 200, "y": 100}]
            }"#,
        )
        .unwrap();
        Engine::from_level(level, GameConfig::default()).unwrap()
    }

    #[test]
    fn show_pauses_and_hide_resumes() {
        let mut engine = sample_engine();
        let mut editor = Editor::new(VIEWPORT);

        editor.show(&mut engine);
        assert!(editor.is_active());
        assert!(engine.is_paused());
        assert!(!engine.input_enabled);
        assert!(editor.snapshot.is_some());

        editor.hide(&mut engine);
        assert!(!editor.is_active());
        assert!(!engine.is_paused());
        assert!(engine.input_enabled);
    }

    #[test]
    fn tool_switch_deactivates_old_tool() {
        let mut engine = sample_engine();
        let mut editor = Editor::new(VIEWPORT);
        editor.show(&mut engine);

        // Select something, then switch tools: the selection is dropped
        let id = engine
            .store
            .iter()
            .find(|e| matches!(e.behavior, pebble_entity::Behavior::None))
            .unwrap()
            .id;
        editor.select.selection = vec![id];
        editor.select_tool(ToolKind::Delete);
        assert!(editor.select.selection.is_empty());
        assert_eq!(editor.current_tool(), ToolKind::Delete);
    }

    #[test]
    fn deleting_the_player_is_rejected() {
        let mut engine = sample_engine();
        let mut editor = Editor::new(VIEWPORT);
        editor.show(&mut engine);

        let player_id = engine.player.entity.id;
        let err = editor.delete_entity(&mut engine, player_id);
        assert!(err.is_err());
        assert!(!engine.player.entity.is_destroyed);
        assert!(!editor.deleted_entity_ids.contains(&player_id));
    }

    #[test]
    fn shape_morphing_is_rejected_without_mutation() {
        let mut engine = sample_engine();
        let mut editor = Editor::new(VIEWPORT);
        editor.show(&mut engine);

        let id = engine
            .store
            .iter()
            .find(|e| matches!(e.behavior, pebble_entity::Behavior::None))
            .unwrap()
            .id;

        let err = editor.morph_entity_shape(&engine, id, ShapeKind::Circle);
        assert!(err.is_err());
        assert_eq!(engine.store.get(id).unwrap().config.shape, ShapeKind::Rectangle);

        // Same shape is a no-op, not an error
        assert!(editor
            .morph_entity_shape(&engine, id, ShapeKind::Rectangle)
            .is_ok());
    }

    #[test]
    fn level_load_clears_tombstones() {
        let mut engine = sample_engine();
        let mut editor = Editor::new(VIEWPORT);
        editor.show(&mut engine);

        let id = engine
            .store
            .iter()
            .find(|e| matches!(e.behavior, pebble_entity::Behavior::None))
            .unwrap()
            .id;
        editor.delete_entity(&mut engine, id).unwrap();
        assert!(!editor.deleted_entity_ids.is_empty());

        editor.on_level_loaded(&engine);
        assert!(editor.deleted_entity_ids.is_empty());
    }
}
