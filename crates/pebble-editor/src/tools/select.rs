//! Select tool: click/marquee selection with Move/Rotate/Scale sub-modes
//!
//! Widget geometry is fixed in screen pixels and divided by the camera
//! zoom, so handles stay the same apparent size at any zoom level. All
//! transforms apply to the whole selection: moves preserve relative
//! offsets, rotation revolves positions about the shared centroid, and
//! scaling works in each entity's rotation-corrected local space.

use crate::picking;
use crate::tools::{Tool, ToolCtx, BUTTON_LEFT};
use pebble_core::{Aabb, EntityId, Vec2};
use pebble_entity::ShapeKind;
use winit::keyboard::KeyCode;

/// Center disc radius of the move widget (screen px)
const MOVE_CENTER_RADIUS: f32 = 12.0;
/// Arrow reach of the move widget (screen px)
const MOVE_ARROW_LEN: f32 = 40.0;
/// Half-width of the arrow hit band (screen px)
const MOVE_ARROW_BAND: f32 = 8.0;
/// Rotate annulus radii (screen px)
const ROTATE_INNER: f32 = 30.0;
const ROTATE_OUTER: f32 = 48.0;
/// Scale handle hit radius (screen px)
const SCALE_HANDLE_RADIUS: f32 = 10.0;
/// Arrow-key nudge step (world units)
const NUDGE_STEP: f32 = 1.0;

/// Minimum rectangle/triangle edge after scaling (world units)
const MIN_RECT_SIZE: f32 = 10.0;
/// Minimum circle radius after scaling (world units)
const MIN_CIRCLE_RADIUS: f32 = 5.0;

/// The active manipulation applied to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMode {
    Move,
    Rotate,
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveAxis {
    Free,
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScaleMode {
    Uniform,
    XOnly,
    YOnly,
}

#[derive(Debug, Clone)]
enum Drag {
    None,
    Marquee {
        start: Vec2,
        current: Vec2,
    },
    Move {
        axis: MoveAxis,
        start: Vec2,
        originals: Vec<(EntityId, Vec2)>,
    },
    Rotate {
        centroid: Vec2,
        start_angle: f32,
        originals: Vec<(EntityId, Vec2, f32)>,
    },
    Scale {
        mode: ScaleMode,
        anchor: EntityId,
        start_local: Vec2,
        /// (id, width, height, radius) at drag start
        originals: Vec<(EntityId, f32, f32, f32)>,
    },
}

pub struct SelectTool {
    pub selection: Vec<EntityId>,
    pub mode: TransformMode,
    drag: Drag,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectTool {
    pub fn new() -> Self {
        Self {
            selection: Vec::new(),
            mode: TransformMode::Move,
            drag: Drag::None,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.drag = Drag::None;
    }

    /// The marquee box while a drag-select is in progress
    pub fn marquee(&self) -> Option<Aabb> {
        match &self.drag {
            Drag::Marquee { start, current } => Some(Aabb::from_corners(*start, *current)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.drag, Drag::None)
    }

    /// Drop ids that no longer resolve to live entities
    fn prune_selection(&mut self, ctx: &ToolCtx) {
        self.selection.retain(|id| {
            ctx.engine
                .store
                .get(*id)
                .map(|e| !e.is_destroyed)
                .unwrap_or(false)
        });
    }

    fn try_begin_transform(&self, ctx: &ToolCtx, world: Vec2) -> Option<Drag> {
        let scale = 1.0 / ctx.engine.camera.zoom;
        let centroid =
            picking::selection_centroid(&ctx.engine.store, &ctx.engine.physics, &self.selection)?;

        match self.mode {
            TransformMode::Move => {
                let d = world - centroid;
                let axis = if d.length() <= MOVE_CENTER_RADIUS * scale {
                    MoveAxis::Free
                } else if d.y.abs() <= MOVE_ARROW_BAND * scale
                    && d.x.abs() <= MOVE_ARROW_LEN * scale
                {
                    MoveAxis::X
                } else if d.x.abs() <= MOVE_ARROW_BAND * scale
                    && d.y.abs() <= MOVE_ARROW_LEN * scale
                {
                    MoveAxis::Y
                } else {
                    return None;
                };
                let originals = self
                    .selection
                    .iter()
                    .filter_map(|id| {
                        let position = ctx.engine.store.get(*id)?.position(&ctx.engine.physics)?;
                        Some((*id, position))
                    })
                    .collect();
                Some(Drag::Move {
                    axis,
                    start: world,
                    originals,
                })
            }
            TransformMode::Rotate => {
                let d = (world - centroid).length();
                if d < ROTATE_INNER * scale || d > ROTATE_OUTER * scale {
                    return None;
                }
                let originals = self
                    .selection
                    .iter()
                    .filter_map(|id| {
                        let entity = ctx.engine.store.get(*id)?;
                        let position = entity.position(&ctx.engine.physics)?;
                        let angle = entity.angle(&ctx.engine.physics)?;
                        Some((*id, position, angle))
                    })
                    .collect();
                Some(Drag::Rotate {
                    centroid,
                    start_angle: (world - centroid).angle(),
                    originals,
                })
            }
            TransformMode::Scale => {
                let anchor = *self.selection.last()?;
                let entity = ctx.engine.store.get(anchor)?;
                let position = entity.position(&ctx.engine.physics)?;
                let angle = entity.angle(&ctx.engine.physics).unwrap_or(0.0);
                let local = (world - position).rotated(-angle);
                let half = entity.config.half_extents();
                let reach = SCALE_HANDLE_RADIUS * scale;

                let mode = scale_handle_at(local, half, reach)?;
                let originals = self
                    .selection
                    .iter()
                    .filter_map(|id| {
                        let config = &ctx.engine.store.get(*id)?.config;
                        Some((*id, config.width, config.height, config.radius))
                    })
                    .collect();
                Some(Drag::Scale {
                    mode,
                    anchor,
                    start_local: local,
                    originals,
                })
            }
        }
    }

    fn apply_drag(&mut self, ctx: &mut ToolCtx, world: Vec2) {
        match self.drag.clone() {
            Drag::None => {}
            Drag::Marquee { start, .. } => {
                self.drag = Drag::Marquee {
                    start,
                    current: world,
                };
            }
            Drag::Move {
                axis,
                start,
                originals,
            } => {
                let raw = world - start;
                let delta = match axis {
                    MoveAxis::Free => raw,
                    MoveAxis::X => Vec2::new(raw.x, 0.0),
                    MoveAxis::Y => Vec2::new(0.0, raw.y),
                };
                for (id, original) in &originals {
                    if let Some(entity) = ctx.engine.store.get(*id) {
                        entity.set_position(&mut ctx.engine.physics, *original + delta);
                    }
                }
            }
            Drag::Rotate {
                centroid,
                start_angle,
                originals,
            } => {
                let delta = (world - centroid).angle() - start_angle;
                for (id, position, angle) in &originals {
                    if let Some(entity) = ctx.engine.store.get(*id) {
                        entity.set_angle(&mut ctx.engine.physics, angle + delta);
                        entity.set_position(
                            &mut ctx.engine.physics,
                            position.rotated_around(centroid, delta),
                        );
                    }
                }
            }
            Drag::Scale {
                mode,
                anchor,
                start_local,
                originals,
            } => {
                let Some(entity) = ctx.engine.store.get(anchor) else {
                    return;
                };
                let Some(position) = entity.position(&ctx.engine.physics) else {
                    return;
                };
                let angle = entity.angle(&ctx.engine.physics).unwrap_or(0.0);
                let local = (world - position).rotated(-angle);

                let fx = local.x.abs() / start_local.x.abs().max(1e-3);
                let fy = local.y.abs() / start_local.y.abs().max(1e-3);
                let fu = local.length() / start_local.length().max(1e-3);
                let (fx, fy) = match mode {
                    ScaleMode::Uniform => (fu, fu),
                    ScaleMode::XOnly => (fx, 1.0),
                    ScaleMode::YOnly => (1.0, fy),
                };

                for (id, width, height, radius) in &originals {
                    let Some(entity) = ctx.engine.store.get_mut(*id) else {
                        continue;
                    };
                    match entity.config.shape {
                        ShapeKind::Circle => {
                            entity.config.radius = (radius * fx.max(fy)).max(MIN_CIRCLE_RADIUS);
                        }
                        ShapeKind::Rectangle | ShapeKind::Triangle => {
                            entity.config.width = (width * fx).max(MIN_RECT_SIZE);
                            entity.config.height = (height * fy).max(MIN_RECT_SIZE);
                        }
                    }
                    if let Some(entity) = ctx.engine.store.get(*id) {
                        entity.rebuild_shape(&mut ctx.engine.physics);
                    }
                }
            }
        }
    }
}

/// Which scale handle (if any) sits at the given local-space point.
/// Corners scale uniformly, edge midpoints scale one axis.
fn scale_handle_at(local: Vec2, half: Vec2, reach: f32) -> Option<ScaleMode> {
    let corners = [
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(-half.x, -half.y),
    ];
    for corner in corners {
        if local.distance(corner) <= reach {
            return Some(ScaleMode::Uniform);
        }
    }
    for edge in [Vec2::new(half.x, 0.0), Vec2::new(-half.x, 0.0)] {
        if local.distance(edge) <= reach {
            return Some(ScaleMode::XOnly);
        }
    }
    for edge in [Vec2::new(0.0, half.y), Vec2::new(0.0, -half.y)] {
        if local.distance(edge) <= reach {
            return Some(ScaleMode::YOnly);
        }
    }
    None
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "select"
    }

    fn deactivate(&mut self) {
        self.clear_selection();
    }

    fn on_mouse_down(&mut self, ctx: &mut ToolCtx, button: u32, world: Vec2) {
        if button != BUTTON_LEFT {
            return;
        }
        self.prune_selection(ctx);

        if !self.selection.is_empty() {
            if let Some(drag) = self.try_begin_transform(ctx, world) {
                self.drag = drag;
                return;
            }
        }

        if let Some(id) = picking::pick_topmost(&ctx.engine.store, &ctx.engine.physics, world) {
            self.selection = vec![id];
            self.drag = Drag::None;
        } else {
            self.selection.clear();
            self.drag = Drag::Marquee {
                start: world,
                current: world,
            };
        }
    }

    fn on_mouse_move(&mut self, ctx: &mut ToolCtx, world: Vec2) {
        self.apply_drag(ctx, world);
    }

    fn on_mouse_up(&mut self, ctx: &mut ToolCtx, button: u32, world: Vec2) {
        if button != BUTTON_LEFT {
            return;
        }
        if let Drag::Marquee { start, .. } = self.drag {
            let marquee = Aabb::from_corners(start, world);
            self.selection =
                picking::entities_in_marquee(&ctx.engine.store, &ctx.engine.physics, &marquee);
        }
        self.drag = Drag::None;
    }

    fn on_key_down(&mut self, ctx: &mut ToolCtx, key: KeyCode) {
        match key {
            KeyCode::KeyM => self.mode = TransformMode::Move,
            KeyCode::KeyR => self.mode = TransformMode::Rotate,
            KeyCode::KeyS => self.mode = TransformMode::Scale,
            KeyCode::ArrowLeft => self.nudge(ctx, Vec2::new(-NUDGE_STEP, 0.0)),
            KeyCode::ArrowRight => self.nudge(ctx, Vec2::new(NUDGE_STEP, 0.0)),
            KeyCode::ArrowUp => self.nudge(ctx, Vec2::new(0.0, -NUDGE_STEP)),
            KeyCode::ArrowDown => self.nudge(ctx, Vec2::new(0.0, NUDGE_STEP)),
            _ => {}
        }
    }
}

impl SelectTool {
    fn nudge(&mut self, ctx: &mut ToolCtx, delta: Vec2) {
        self.prune_selection(ctx);
        for id in &self.selection {
            if let Some(entity) = ctx.engine.store.get(*id) {
                if let Some(position) = entity.position(&ctx.engine.physics) {
                    entity.set_position(&mut ctx.engine.physics, position + delta);
                }
            }
        }
    }
}
