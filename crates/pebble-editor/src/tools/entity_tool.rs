//! Entity creation tool
//!
//! Right-click opens a categorized creation palette (by shape/material);
//! creating an entity folds it into the editor's snapshot baseline so the
//! next reset treats it as part of the level, not a transient to purge.

use crate::snapshot::EntitySnapshot;
use crate::tools::{Tool, ToolCtx, BUTTON_RIGHT};
use pebble_core::{EntityId, PebbleError, Result, Vec2};
use pebble_entity::{EntityConfig, ShapeKind};
use pebble_level::{assembler, EntityDef, EntityKind};
use winit::keyboard::KeyCode;

/// A named, ready-to-place entity descriptor
#[derive(Debug, Clone)]
pub struct EntityPreset {
    pub name: &'static str,
    pub def: EntityDef,
}

/// A palette group (boxes, balls, ramps, zones...)
#[derive(Debug, Clone)]
pub struct PaletteCategory {
    pub name: &'static str,
    pub presets: Vec<EntityPreset>,
}

#[derive(Debug)]
pub struct EntityTool {
    /// World position the creation menu was opened at
    pub menu_at: Option<Vec2>,
    pub palette: Vec<PaletteCategory>,
}

impl Default for EntityTool {
    fn default() -> Self {
        Self::new()
    }
}

fn preset(
    name: &'static str,
    entity_type: EntityKind,
    config: EntityConfig,
) -> EntityPreset {
    EntityPreset {
        name,
        def: EntityDef {
            config,
            entity_type,
            ..Default::default()
        },
    }
}

impl EntityTool {
    pub fn new() -> Self {
        Self {
            menu_at: None,
            palette: Self::default_palette(),
        }
    }

    fn default_palette() -> Vec<PaletteCategory> {
        vec![
            PaletteCategory {
                name: "Boxes",
                presets: vec![
                    preset(
                        "Wood Box",
                        EntityKind::Entity,
                        EntityConfig {
                            label: "wood_box".into(),
                            fill_color: "#b5854c".into(),
                            stroke_color: "#6e4f2a".into(),
                            friction: 0.4,
                            ..Default::default()
                        },
                    ),
                    preset(
                        "Stone Box",
                        EntityKind::Entity,
                        EntityConfig {
                            label: "stone_box".into(),
                            fill_color: "#8c8c94".into(),
                            stroke_color: "#55555c".into(),
                            friction: 0.6,
                            density: 0.0025,
                            ..Default::default()
                        },
                    ),
                    preset(
                        "Metal Box",
                        EntityKind::Entity,
                        EntityConfig {
                            label: "metal_box".into(),
                            fill_color: "#9fb4c7".into(),
                            stroke_color: "#5c7287".into(),
                            friction: 0.2,
                            density: 0.004,
                            restitution: 0.1,
                            ..Default::default()
                        },
                    ),
                ],
            },
            PaletteCategory {
                name: "Balls",
                presets: vec![
                    preset(
                        "Rubber Ball",
                        EntityKind::Entity,
                        EntityConfig {
                            label: "rubber_ball".into(),
                            shape: ShapeKind::Circle,
                            radius: 20.0,
                            fill_color: "#d95f5f".into(),
                            stroke_color: "#8c3535".into(),
                            restitution: 0.8,
                            ..Default::default()
                        },
                    ),
                    preset(
                        "Stone Ball",
                        EntityKind::Entity,
                        EntityConfig {
                            label: "stone_ball".into(),
                            shape: ShapeKind::Circle,
                            radius: 20.0,
                            fill_color: "#8c8c94".into(),
                            stroke_color: "#55555c".into(),
                            density: 0.0025,
                            ..Default::default()
                        },
                    ),
                ],
            },
            PaletteCategory {
                name: "Ramps",
                presets: vec![preset(
                    "Wood Ramp",
                    EntityKind::Entity,
                    EntityConfig {
                        label: "wood_ramp".into(),
                        shape: ShapeKind::Triangle,
                        width: 80.0,
                        height: 40.0,
                        fill_color: "#b5854c".into(),
                        stroke_color: "#6e4f2a".into(),
                        is_static: true,
                        ..Default::default()
                    },
                )],
            },
            PaletteCategory {
                name: "Zones",
                presets: vec![
                    preset(
                        "Cloud Platform",
                        EntityKind::Cloud,
                        EntityConfig {
                            label: "cloud".into(),
                            width: 120.0,
                            height: 20.0,
                            fill_color: "#e8ecf2".into(),
                            stroke_color: "#b0b8c4".into(),
                            ..Default::default()
                        },
                    ),
                    EntityPreset {
                        name: "Water",
                        def: EntityDef {
                            config: EntityConfig {
                                label: "water".into(),
                                width: 160.0,
                                height: 100.0,
                                fill_color: "#5f8fd9".into(),
                                stroke_color: "#35568c".into(),
                                ..Default::default()
                            },
                            entity_type: EntityKind::Liquid,
                            viscosity: 0.4,
                            ..Default::default()
                        },
                    },
                    EntityPreset {
                        name: "Honey",
                        def: EntityDef {
                            config: EntityConfig {
                                label: "honey".into(),
                                width: 160.0,
                                height: 100.0,
                                fill_color: "#d9a85f".into(),
                                stroke_color: "#8c6735".into(),
                                ..Default::default()
                            },
                            entity_type: EntityKind::Liquid,
                            viscosity: 0.9,
                            ..Default::default()
                        },
                    },
                    preset(
                        "Trigger Zone",
                        EntityKind::Trigger,
                        EntityConfig {
                            label: "trigger".into(),
                            width: 100.0,
                            height: 100.0,
                            fill_color: "#7fd95f".into(),
                            stroke_color: "#4f8c35".into(),
                            ..Default::default()
                        },
                    ),
                ],
            },
        ]
    }

    pub fn close_menu(&mut self) {
        self.menu_at = None;
    }

    /// Instantiate a palette preset at the given world position and fold
    /// it into the snapshot baseline
    pub fn create_at(
        &mut self,
        ctx: &mut ToolCtx,
        category: usize,
        index: usize,
        position: Vec2,
    ) -> Result<EntityId> {
        let (preset_name, mut def) = {
            let preset = self
                .palette
                .get(category)
                .and_then(|c| c.presets.get(index))
                .ok_or_else(|| {
                    PebbleError::Editor(format!("no palette preset at {category}/{index}"))
                })?;
            (preset.name, preset.def.clone())
        };
        def.config.set_position(position);

        let entity = assembler::build_entity(&def, &mut ctx.engine.physics);
        let id = entity.id;

        // Part of the current baseline from now on: a reset must keep it
        if let Some(snapshot) = ctx.snapshot.as_mut() {
            snapshot.entities.push(EntitySnapshot {
                id,
                config: entity.config.clone(),
                behavior: entity.behavior.clone(),
                state: entity.capture_state(&ctx.engine.physics),
                health: entity.health,
                is_destroyed: false,
            });
        }

        ctx.engine.store.add(entity);
        self.close_menu();
        tracing::debug!(%id, preset = preset_name, "entity created");
        Ok(id)
    }
}

impl Tool for EntityTool {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn deactivate(&mut self) {
        self.close_menu();
    }

    fn on_mouse_down(&mut self, _ctx: &mut ToolCtx, button: u32, world: Vec2) {
        if button == BUTTON_RIGHT {
            self.menu_at = Some(world);
        }
    }

    fn on_key_down(&mut self, _ctx: &mut ToolCtx, key: KeyCode) {
        if key == KeyCode::Escape {
            self.close_menu();
        }
    }
}
