//! Specialized entity behaviors as a closed variant set
//!
//! Behaviors hold state only; the per-frame algorithms live in the engine's
//! update passes, dispatched by matching on the variant.

use crate::config::EntityConfig;
use pebble_core::EntityId;
use std::collections::{HashMap, HashSet};

/// Vertical tolerance when classifying a body as approaching a cloud from
/// above (world units)
pub const CLOUD_TOP_TOLERANCE: f32 = 5.0;

/// One-way platform state. Invariant: the collider is a sensor exactly when
/// `entities_on_top` is empty.
#[derive(Debug, Clone, Default)]
pub struct CloudState {
    pub entities_on_top: HashSet<EntityId>,
}

/// Viscosity zone state. Invariant: `saved_damping` holds exactly the
/// pre-entry air friction of every id in `entities_in_liquid`.
#[derive(Debug, Clone)]
pub struct LiquidState {
    /// Drag strength in [0, 1]
    pub viscosity: f32,
    pub entities_in_liquid: HashSet<EntityId>,
    pub saved_damping: HashMap<EntityId, f32>,
}

impl LiquidState {
    pub fn new(viscosity: f32) -> Self {
        Self {
            viscosity: viscosity.clamp(0.0, 1.0),
            entities_in_liquid: HashSet::new(),
            saved_damping: HashMap::new(),
        }
    }
}

/// Zone with enter/exit/stay notifications. Membership mirrors the physics
/// engine's collision start/end events; stale ids left behind by entities
/// destroyed elsewhere are never dereferenced for mutation.
#[derive(Debug, Clone, Default)]
pub struct TriggerState {
    pub trigger_type: String,
    pub entities_inside: HashSet<EntityId>,
}

impl TriggerState {
    pub fn new(trigger_type: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            entities_inside: HashSet::new(),
        }
    }
}

/// What a spawn point instantiates at its own position
#[derive(Debug, Clone)]
pub enum SpawnTarget {
    Player,
    Entity(Box<EntityConfig>),
}

/// Deferred instantiation marker; not itself collidable with gameplay
#[derive(Debug, Clone)]
pub struct SpawnPointState {
    pub spawns: SpawnTarget,
}

/// The closed set of specialized behaviors an entity can carry
#[derive(Debug, Clone, Default)]
pub enum Behavior {
    #[default]
    None,
    Cloud(CloudState),
    Liquid(LiquidState),
    Trigger(TriggerState),
    SpawnPoint(SpawnPointState),
    /// World-boundary region that destroys entities and kills the player
    KillBox,
}

impl Behavior {
    /// Whether a freshly spawned collider with this behavior starts as a
    /// sensor. Clouds start empty, hence passthrough; liquids, triggers,
    /// spawn points and kill boxes never generate contact response.
    pub fn initial_sensor(&self, collision_enabled: bool) -> bool {
        match self {
            Behavior::None => !collision_enabled,
            Behavior::Cloud(state) => state.entities_on_top.is_empty(),
            Behavior::Liquid(_)
            | Behavior::Trigger(_)
            | Behavior::SpawnPoint(_)
            | Behavior::KillBox => true,
        }
    }

    pub fn is_kill_box(&self) -> bool {
        matches!(self, Behavior::KillBox)
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, Behavior::Trigger(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_starts_as_sensor() {
        let behavior = Behavior::Cloud(CloudState::default());
        assert!(behavior.initial_sensor(true));
    }

    #[test]
    fn plain_entity_sensor_follows_collision_flag() {
        assert!(!Behavior::None.initial_sensor(true));
        assert!(Behavior::None.initial_sensor(false));
    }

    #[test]
    fn zones_are_always_sensors() {
        assert!(Behavior::Liquid(LiquidState::new(0.5)).initial_sensor(true));
        assert!(Behavior::Trigger(TriggerState::new("goal")).initial_sensor(true));
        assert!(Behavior::KillBox.initial_sensor(true));
    }

    #[test]
    fn liquid_viscosity_is_clamped() {
        assert_eq!(LiquidState::new(3.0).viscosity, 1.0);
        assert_eq!(LiquidState::new(-1.0).viscosity, 0.0);
    }
}
