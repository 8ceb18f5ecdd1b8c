//! The game loop controller
//!
//! Owns the physics world, the entity store, the player, and the event
//! bus. One `update` per frame drives the behavior passes, player input,
//! the physics step, and the fixed-order collision dispatch. The editor
//! pauses the engine while it mutates entities, so no edit happens inside
//! an update traversal.

use crate::behaviors;
use crate::camera::Camera;
use crate::clock::GameClock;
use crate::collision;
use crate::events::{EventBus, GameEvent};
use crate::input::InputState;
use crate::store::EntityStore;
use pebble_core::{EntityId, GameConfig, Result};
use pebble_entity::{Behavior, Entity, Player, PlayerInput, SpawnTarget};
use pebble_level::{assemble, LevelFile};
use pebble_physics::PhysicsWorld;
use winit::keyboard::KeyCode;

/// Damage/heal amount for the numeric test keys
const TEST_DAMAGE: f32 = 10.0;

/// Rendering debug toggles, flipped by Ctrl-chords
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFlags {
    pub panel: bool,
    pub labels: bool,
    pub wireframes: bool,
}

pub struct Engine {
    pub physics: PhysicsWorld,
    pub store: EntityStore,
    pub player: Player,
    pub bus: EventBus,
    pub camera: Camera,
    pub clock: GameClock,
    pub config: GameConfig,
    /// The loaded level; world-scoped settings for exports and resets
    pub level: LevelFile,
    /// When false, player input is ignored (editor active)
    pub input_enabled: bool,
    pub debug: DebugFlags,
    paused: bool,
}

impl Engine {
    /// Build a running engine from a parsed level and config
    pub fn from_level(level: LevelFile, config: GameConfig) -> Result<Self> {
        let mut physics = PhysicsWorld::new();
        let assembled = assemble(&level, &mut physics)?;
        let mut store = EntityStore::new();
        for entity in assembled.entities {
            store.add(entity);
        }

        let mut camera = Camera::default();
        if let Some(position) = assembled.player.entity.position(&physics) {
            camera.position = position;
        }

        Ok(Self {
            physics,
            store,
            player: assembled.player,
            bus: EventBus::new(),
            camera,
            clock: GameClock::new(),
            debug: DebugFlags {
                panel: config.debug_mode,
                ..Default::default()
            },
            config,
            level,
            input_enabled: true,
            paused: false,
        })
    }

    /// Replace the live world with a freshly assembled level. All-or-
    /// nothing: an assembly failure leaves the running state untouched.
    pub fn load_level(&mut self, level: LevelFile) -> Result<()> {
        let mut physics = PhysicsWorld::new();
        let assembled = assemble(&level, &mut physics)?;

        let mut store = EntityStore::new();
        for entity in assembled.entities {
            store.add(entity);
        }
        self.physics = physics;
        self.store = store;
        self.player = assembled.player;
        self.level = level;
        if let Some(position) = self.player.entity.position(&self.physics) {
            self.camera.position = position;
        }
        tracing::info!(level = %self.level.name, entities = self.store.len(), "level loaded");
        Ok(())
    }

    /// Swap in a validated game config
    pub fn apply_game_config(&mut self, config: GameConfig) {
        self.debug.panel = config.debug_mode;
        self.config = config;
    }

    /// Advance one frame: tick the clock, run any due fixed steps, then
    /// the once-per-frame key commands
    pub fn update(&mut self, input: &InputState) {
        self.clock.tick();
        while self.clock.should_fixed_update() {
            self.clock.consume_fixed_step();
            let dt = self.clock.fixed_timestep as f32;
            self.step(input, dt);
        }
        self.handle_key_commands(input);
    }

    /// One fixed simulation step. Order: cloud pass, liquid pass, trigger
    /// stay, player input, physics step, collision dispatch.
    pub fn step(&mut self, input: &InputState, dt: f32) {
        if self.paused {
            return;
        }

        behaviors::update_clouds(&mut self.store, &self.player, &mut self.physics);
        behaviors::update_liquids(&mut self.store, &self.player, &mut self.physics);
        behaviors::dispatch_trigger_stay(&self.store, &mut self.bus);

        if self.input_enabled {
            let intent = PlayerInput {
                left: input.is_action_pressed("move_left"),
                right: input.is_action_pressed("move_right"),
                jump: input.is_action_pressed("jump"),
            };
            self.player.apply_input(&intent, &mut self.physics, dt);
        }

        self.physics.step(dt);

        let events = self.physics.drain_collision_events();
        collision::process_collision_events(
            &events,
            &mut self.store,
            &mut self.player,
            &mut self.physics,
            &mut self.bus,
        );
    }

    /// Once-per-frame keyboard surface: debug chords, reset, file-picker
    /// requests, numeric damage/heal test keys
    pub fn handle_key_commands(&mut self, input: &InputState) {
        if input.is_chord_just_pressed(KeyCode::KeyD) {
            self.debug.panel = !self.debug.panel;
        }
        if input.is_chord_just_pressed(KeyCode::KeyL) {
            self.debug.labels = !self.debug.labels;
        }
        if input.is_chord_just_pressed(KeyCode::KeyY) {
            self.debug.wireframes = !self.debug.wireframes;
        }

        if input.ctrl_down() {
            return;
        }
        if input.is_action_just_pressed("reset") {
            self.bus.push(GameEvent::ResetRequested);
        }
        if input.is_action_just_pressed("load_level") {
            self.bus.push(GameEvent::LoadLevelRequested);
        }
        if input.is_action_just_pressed("load_game_config") {
            self.bus.push(GameEvent::LoadGameConfigRequested);
        }
        if input.is_action_just_pressed("load_player_config") {
            self.bus.push(GameEvent::LoadPlayerConfigRequested);
        }
        if input.is_action_just_pressed("damage_test") {
            self.player.entity.take_damage(TEST_DAMAGE);
        }
        if input.is_action_just_pressed("heal_test") {
            self.player.entity.heal(TEST_DAMAGE);
        }
    }

    /// Instantiate a spawn point's target at the point's own position.
    /// Returns the id of the spawned (or repositioned) entity.
    pub fn trigger_spawn_point(&mut self, id: EntityId) -> Option<EntityId> {
        let (position, target) = {
            let entity = self.store.get(id)?;
            let position = entity.position(&self.physics)?;
            match &entity.behavior {
                Behavior::SpawnPoint(state) => (position, state.spawns.clone()),
                _ => return None,
            }
        };

        match target {
            SpawnTarget::Player => {
                self.player.entity.restore_body(&mut self.physics);
                self.player.entity.set_position(&mut self.physics, position);
                Some(self.player.entity.id)
            }
            SpawnTarget::Entity(config) => {
                let mut config = *config;
                config.set_position(position);
                let entity = Entity::spawn(config, Behavior::None, &mut self.physics);
                Some(self.store.add(entity))
            }
        }
    }

    /// Re-derive the level file from the live world
    pub fn export_level(&self) -> LevelFile {
        pebble_level::export_level(
            &self.level,
            self.store.as_slice(),
            Some(&self.player),
            &self.physics,
        )
    }

    /// Destroy the player and every entity, emptying the store
    pub fn clear_entities(&mut self) {
        self.player.entity.destroy(&mut self.physics);
        self.store.clear(&mut self.physics);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_engine() -> Engine {
        let level = LevelFile::from_json_str(
            r#"{
                "name": "engine-test",
                "worldSize": {"width": 800, "height": 600},
                "player": {"x": 400, "y": 300},
                "entities": [{"x": 200, "y": 300}]
            }"#,
        )
        .unwrap();
        Engine::from_level(level, GameConfig::default()).unwrap()
    }

    #[test]
    fn from_level_builds_world_and_player() {
        let engine = sample_engine();
        // 4 boundary kill boxes + 1 entity
        assert_eq!(engine.store.len(), 5);
        assert!(!engine.player.entity.is_destroyed);
        assert_eq!(engine.camera.position.x, 400.0);
    }

    #[test]
    fn paused_engine_freezes_bodies() {
        let mut engine = sample_engine();
        let input = InputState::new();
        let start = engine.player.entity.position(&engine.physics).unwrap();

        engine.pause();
        for _ in 0..10 {
            engine.step(&input, 1.0 / 60.0);
        }
        assert_eq!(
            engine.player.entity.position(&engine.physics).unwrap(),
            start
        );

        engine.resume();
        for _ in 0..10 {
            engine.step(&input, 1.0 / 60.0);
        }
        assert_ne!(
            engine.player.entity.position(&engine.physics).unwrap(),
            start
        );
    }

    #[test]
    fn input_disabled_ignores_movement() {
        let mut engine = sample_engine();
        let mut input = InputState::new();
        input.process_key_down(winit::keyboard::KeyCode::KeyD);

        engine.input_enabled = false;
        for _ in 0..5 {
            engine.step(&input, 1.0 / 60.0);
        }
        let vx = engine.player.entity.velocity(&engine.physics).unwrap().x;
        assert_eq!(vx, 0.0);

        engine.input_enabled = true;
        for _ in 0..5 {
            engine.step(&input, 1.0 / 60.0);
        }
        let vx = engine.player.entity.velocity(&engine.physics).unwrap().x;
        assert!(vx > 0.0);
    }

    fn press(engine: &mut Engine, input: &mut InputState, key: winit::keyboard::KeyCode) {
        input.process_key_down(key);
        engine.handle_key_commands(input);
        input.process_key_up(key);
        input.end_frame();
    }

    #[test]
    fn damage_and_heal_test_keys() {
        let mut engine = sample_engine();
        let mut input = InputState::new();

        press(&mut engine, &mut input, winit::keyboard::KeyCode::Digit1);
        press(&mut engine, &mut input, winit::keyboard::KeyCode::Digit1);
        assert_eq!(engine.player.entity.health, 80.0);

        press(&mut engine, &mut input, winit::keyboard::KeyCode::Digit2);
        assert_eq!(engine.player.entity.health, 90.0);
    }

    #[test]
    fn clear_entities_empties_everything() {
        let mut engine = sample_engine();
        engine.clear_entities();
        assert!(engine.store.is_empty());
        assert!(engine.player.entity.is_destroyed);
        assert_eq!(engine.physics.rigid_body_set.len(), 0);
    }

    #[test]
    fn spawn_point_instantiates_at_its_position() {
        let level = LevelFile::from_json_str(
            r#"{
                "worldSize": {"width": 800, "height": 600},
                "entities": [{"x": 700, "y": 80, "entityType": "player_spawn"}]
            }"#,
        )
        .unwrap();
        let mut engine = Engine::from_level(level, GameConfig::default()).unwrap();

        // Player already spawned there by precedence
        assert_eq!(
            engine.player.entity.position(&engine.physics).map(|p| (p.x, p.y)),
            Some((700.0, 80.0))
        );

        // Move the player, then fire the spawn point: it snaps back
        let spawn_id = engine
            .store
            .iter()
            .find(|e| matches!(e.behavior, Behavior::SpawnPoint(_)))
            .unwrap()
            .id;
        engine
            .player
            .entity
            .set_position(&mut engine.physics, pebble_core::Vec2::new(100.0, 100.0));
        let respawned = engine.trigger_spawn_point(spawn_id);
        assert_eq!(respawned, Some(engine.player.entity.id));
        assert_eq!(
            engine.player.entity.position(&engine.physics),
            Some(pebble_core::Vec2::new(700.0, 80.0))
        );
    }

    #[test]
    fn reset_key_emits_request() {
        let mut engine = sample_engine();
        let mut input = InputState::new();
        input.process_key_down(winit::keyboard::KeyCode::KeyR);
        engine.handle_key_commands(&input);
        assert!(engine
            .bus
            .drain()
            .iter()
            .any(|e| matches!(e, GameEvent::ResetRequested)));
    }
}
