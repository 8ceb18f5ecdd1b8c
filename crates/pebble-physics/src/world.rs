//! Physics world wrapping Rapier 2D
//!
//! World coordinates are screen-like (+y down), so gravity points at +y.

use pebble_core::{Aabb, Vec2};
use rapier2d::prelude::*;

/// Default gravity in px/s², +y down
pub const GRAVITY: f32 = 980.0;

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    /// Collision events from the last step
    collision_recv: crossbeam::channel::Receiver<CollisionEvent>,
    contact_force_recv: crossbeam::channel::Receiver<ContactForceEvent>,
    event_handler: ChannelEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with the default downward gravity
    pub fn new() -> Self {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, contact_force_recv) = crossbeam::channel::unbounded();
        let event_handler = ChannelEventCollector::new(collision_send, contact_force_send);

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, GRAVITY],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            collision_recv,
            contact_force_recv,
            event_handler,
        }
    }

    /// Step the physics simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_handler,
        );
    }

    /// Drain collision start/end events from the last step
    pub fn drain_collision_events(&self) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.collision_recv.try_recv() {
            events.push(event);
        }
        events
    }

    /// Drain contact force events from the last step
    pub fn drain_contact_force_events(&self) -> Vec<ContactForceEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.contact_force_recv.try_recv() {
            events.push(event);
        }
        events
    }

    /// Insert a rigid body and return its handle
    pub fn insert_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Insert a collider attached to a rigid body
    pub fn insert_collider_with_parent(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a collider by handle
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Get a mutable collider by handle
    pub fn get_collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.collider_set.get_mut(handle)
    }

    // --- Convenience accessors used by the entity and editor layers ---

    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|b| Vec2::new(b.translation().x, b.translation().y))
    }

    pub fn set_position(&mut self, handle: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    /// Body rotation in radians
    pub fn angle(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(handle).map(|b| b.rotation().angle())
    }

    pub fn set_angle(&mut self, handle: RigidBodyHandle, angle: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_rotation(Rotation::new(angle), true);
        }
    }

    pub fn velocity(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(handle)
            .map(|b| Vec2::new(b.linvel().x, b.linvel().y))
    }

    pub fn set_velocity(&mut self, handle: RigidBodyHandle, velocity: Vec2) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    pub fn angular_velocity(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(handle).map(|b| b.angvel())
    }

    pub fn set_angular_velocity(&mut self, handle: RigidBodyHandle, angvel: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_angvel(angvel, true);
        }
    }

    /// Linear damping plays the air-friction role
    pub fn linear_damping(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(handle).map(|b| b.linear_damping())
    }

    pub fn set_linear_damping(&mut self, handle: RigidBodyHandle, damping: f32) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_linear_damping(damping);
        }
    }

    pub fn is_sensor(&self, handle: ColliderHandle) -> bool {
        self.collider_set
            .get(handle)
            .map(|c| c.is_sensor())
            .unwrap_or(false)
    }

    pub fn set_sensor(&mut self, handle: ColliderHandle, sensor: bool) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_sensor(sensor);
        }
    }

    /// Replace a collider's shape in place (used by the editor scale tool)
    pub fn set_shape(&mut self, handle: ColliderHandle, shape: SharedShape) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_shape(shape);
        }
    }

    /// World-space AABB of a collider
    pub fn collider_aabb(&self, handle: ColliderHandle) -> Option<Aabb> {
        self.collider_set.get(handle).map(|c| {
            let aabb = c.compute_aabb();
            Aabb::from_min_max(
                Vec2::new(aabb.mins.x, aabb.mins.y),
                Vec2::new(aabb.maxs.x, aabb.maxs.y),
            )
        })
    }

    pub fn wake_up(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.wake_up(true);
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
