//! Delete tool: click the topmost entity or marquee a region
//!
//! Every deletion records the id into the tombstone set before destroying
//! the entity, so resets never resurrect it. Hit-testing here is the
//! simplified axis-aligned variant.

use crate::picking;
use crate::tools::{Tool, ToolCtx, BUTTON_LEFT, CLICK_DRAG_THRESHOLD};
use pebble_core::{Aabb, EntityId, Vec2};
use winit::keyboard::KeyCode;

#[derive(Debug, Default)]
pub struct DeleteTool {
    drag: Option<(Vec2, Vec2)>,
}

impl DeleteTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The marquee box while a drag-delete is in progress
    pub fn marquee(&self) -> Option<Aabb> {
        self.drag
            .map(|(start, current)| Aabb::from_corners(start, current))
    }

    fn delete(ctx: &mut ToolCtx, id: EntityId) {
        // Tombstone first: a reset between destroy and record would
        // otherwise bring the entity back
        ctx.tombstones.insert(id);
        if let Some(mut entity) = ctx.engine.store.remove(id) {
            entity.destroy(&mut ctx.engine.physics);
            tracing::debug!(%id, "entity deleted");
        }
    }
}

impl Tool for DeleteTool {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn deactivate(&mut self) {
        self.drag = None;
    }

    fn on_mouse_down(&mut self, _ctx: &mut ToolCtx, button: u32, world: Vec2) {
        if button == BUTTON_LEFT {
            self.drag = Some((world, world));
        }
    }

    fn on_mouse_move(&mut self, _ctx: &mut ToolCtx, world: Vec2) {
        if let Some((start, _)) = self.drag {
            self.drag = Some((start, world));
        }
    }

    fn on_mouse_up(&mut self, ctx: &mut ToolCtx, button: u32, world: Vec2) {
        if button != BUTTON_LEFT {
            return;
        }
        let Some((start, _)) = self.drag.take() else {
            return;
        };

        let threshold = CLICK_DRAG_THRESHOLD / ctx.engine.camera.zoom;
        if start.distance(world) <= threshold {
            // Click: delete the topmost hit
            if let Some(id) =
                picking::pick_topmost_aabb(&ctx.engine.store, &ctx.engine.physics, start)
            {
                Self::delete(ctx, id);
            }
        } else {
            // Marquee: delete everything whose center is inside
            let marquee = Aabb::from_corners(start, world);
            for id in picking::entities_in_marquee(&ctx.engine.store, &ctx.engine.physics, &marquee)
            {
                Self::delete(ctx, id);
            }
        }
    }

    fn on_key_down(&mut self, _ctx: &mut ToolCtx, _key: KeyCode) {}
}
