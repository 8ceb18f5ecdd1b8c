//! Level file format definitions
//!
//! The `entity_type` tag is a closed enum: an unknown tag fails the parse
//! instead of silently becoming a plain entity. An absent tag is a plain
//! entity.

use pebble_core::{PebbleError, Result, Vec2};
use pebble_entity::{EntityConfig, PlayerConfig};
use serde::{Deserialize, Serialize};

/// World dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
        }
    }
}

/// Whether the boundary kill-boxes are built
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundarySettings {
    pub enabled: bool,
}

impl Default for BoundarySettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Per-level overrides shallow-merged over the flat player config
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerOverride {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub player: PlayerOverride,
}

/// Discriminator tag selecting the wrapper behavior for an entity
/// descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Entity,
    Cloud,
    Liquid,
    Trigger,
    PlayerSpawn,
}

impl Default for EntityKind {
    fn default() -> Self {
        EntityKind::Entity
    }
}

/// An entity descriptor: the full config plus the type tag and
/// type-specific extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityDef {
    #[serde(flatten)]
    pub config: EntityConfig,
    pub entity_type: EntityKind,
    /// Liquid drag strength in [0, 1]
    pub viscosity: f32,
    /// Trigger tag carried when `entity_type` is `trigger`
    pub trigger_type: String,
}

impl Default for EntityDef {
    fn default() -> Self {
        Self {
            config: EntityConfig::default(),
            entity_type: EntityKind::Entity,
            viscosity: 0.5,
            trigger_type: "zone".to_string(),
        }
    }
}

impl EntityDef {
    pub fn position(&self) -> Vec2 {
        self.config.position()
    }
}

/// A trigger descriptor from the level's dedicated trigger list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerDef {
    #[serde(flatten)]
    pub config: EntityConfig,
    pub trigger_type: String,
}

impl Default for TriggerDef {
    fn default() -> Self {
        Self {
            config: EntityConfig::default(),
            trigger_type: "zone".to_string(),
        }
    }
}

/// Root structure of a level JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelFile {
    pub name: String,
    pub world_size: WorldSize,
    pub wall_thickness: f32,
    pub boundaries: BoundarySettings,
    pub overrides: Overrides,
    /// Legacy flat player config; a `player_spawn` entity takes precedence
    pub player: Option<PlayerConfig>,
    pub entities: Vec<EntityDef>,
    pub triggers: Vec<TriggerDef>,
}

impl Default for LevelFile {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            world_size: WorldSize::default(),
            wall_thickness: 60.0,
            boundaries: BoundarySettings::default(),
            overrides: Overrides::default(),
            player: None,
            entities: Vec::new(),
            triggers: Vec::new(),
        }
    }
}

impl LevelFile {
    /// Parse a level from a JSON string. All-or-nothing: any malformed
    /// content fails the whole parse and leaves the caller's state alone.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| PebbleError::LevelParse(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_level() {
        let level = LevelFile::from_json_str(r#"{"name": "test"}"#).unwrap();
        assert_eq!(level.name, "test");
        assert!(level.boundaries.enabled);
        assert!(level.entities.is_empty());
    }

    #[test]
    fn parse_entity_types() {
        let json = r#"{
            "entities": [
                {"x": 1, "y": 2},
                {"x": 3, "y": 4, "entityType": "cloud"},
                {"x": 5, "y": 6, "entityType": "liquid", "viscosity": 0.8},
                {"x": 7, "y": 8, "entityType": "player_spawn"}
            ]
        }"#;
        let level = LevelFile::from_json_str(json).unwrap();
        assert_eq!(level.entities[0].entity_type, EntityKind::Entity);
        assert_eq!(level.entities[1].entity_type, EntityKind::Cloud);
        assert_eq!(level.entities[2].entity_type, EntityKind::Liquid);
        assert_eq!(level.entities[2].viscosity, 0.8);
        assert_eq!(level.entities[3].entity_type, EntityKind::PlayerSpawn);
    }

    #[test]
    fn unknown_entity_type_fails_the_load() {
        let json = r#"{"entities": [{"x": 0, "y": 0, "entityType": "portal"}]}"#;
        let err = LevelFile::from_json_str(json);
        assert!(err.is_err());
    }

    #[test]
    fn malformed_json_fails_whole_parse() {
        assert!(LevelFile::from_json_str("{not json").is_err());
        assert!(LevelFile::from_json_str(r#"{"worldSize": "big"}"#).is_err());
    }

    #[test]
    fn overrides_parse() {
        let level =
            LevelFile::from_json_str(r#"{"overrides": {"player": {"x": 120.0}}}"#).unwrap();
        assert_eq!(level.overrides.player.x, Some(120.0));
        assert_eq!(level.overrides.player.y, None);
    }

    #[test]
    fn level_json_round_trip() {
        let mut level = LevelFile::default();
        level.name = "round-trip".to_string();
        level.entities.push(EntityDef {
            entity_type: EntityKind::Cloud,
            ..Default::default()
        });

        let json = level.to_json_string().unwrap();
        let back = LevelFile::from_json_str(&json).unwrap();
        assert_eq!(back.name, "round-trip");
        assert_eq!(back.entities.len(), 1);
        assert_eq!(back.entities[0].entity_type, EntityKind::Cloud);
    }
}
