//! Input state management
//!
//! Tracks keyboard and mouse state per frame with an action binding map.
//! Ctrl-chorded shortcuts (debug toggles, editor toggle) are queried
//! directly rather than through the action map.

use pebble_core::Vec2;
use std::collections::{HashMap, HashSet};
use winit::keyboard::KeyCode;

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Mouse button state (button index -> pressed)
    mouse_buttons_down: HashSet<u32>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<u32>,
    /// Mouse buttons released this frame
    mouse_buttons_just_released: HashSet<u32>,

    /// Current mouse position in screen pixels
    pub mouse_position: Vec2,

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            mouse_buttons_just_released: HashSet::new(),
            mouse_position: Vec2::ZERO,
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert(
            "move_left".into(),
            vec![KeyCode::KeyA, KeyCode::ArrowLeft],
        );
        map.insert(
            "move_right".into(),
            vec![KeyCode::KeyD, KeyCode::ArrowRight],
        );
        map.insert(
            "jump".into(),
            vec![KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp],
        );
        map.insert("reset".into(), vec![KeyCode::KeyR]);
        map.insert("load_level".into(), vec![KeyCode::KeyL]);
        map.insert("load_game_config".into(), vec![KeyCode::KeyG]);
        map.insert("load_player_config".into(), vec![KeyCode::KeyP]);
        map.insert("damage_test".into(), vec![KeyCode::Digit1]);
        map.insert("heal_test".into(), vec![KeyCode::Digit2]);
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
        self.mouse_buttons_just_released.insert(button);
    }

    /// Process mouse movement (screen pixels)
    pub fn process_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.mouse_buttons_just_released.clear();
    }

    // --- Query methods ---

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    pub fn ctrl_down(&self) -> bool {
        self.keys_down.contains(&KeyCode::ControlLeft)
            || self.keys_down.contains(&KeyCode::ControlRight)
    }

    /// Ctrl + key chord pressed this frame
    pub fn is_chord_just_pressed(&self, key: KeyCode) -> bool {
        self.ctrl_down() && self.keys_just_pressed.contains(&key)
    }

    /// Is an action currently held? (any bound key is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false)
    }

    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    pub fn is_mouse_button_just_pressed(&self, button: u32) -> bool {
        self.mouse_buttons_just_pressed.contains(&button)
    }

    pub fn is_mouse_button_just_released(&self, button: u32) -> bool {
        self.mouse_buttons_just_released.contains(&button)
    }
}
