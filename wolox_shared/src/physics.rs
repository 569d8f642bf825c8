//! Physics abstraction.
//!
//! The editor treats the simulation as an opaque stepped world: it adds a
//! few bodies at startup and advances it by a fixed timestep once per frame.
//! [`RapierPhysics`] is the real backend; [`NullPhysics`] stands in for
//! headless tests.

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::Vec2;

/// Physics parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Window coordinates: positive `y` points down.
    pub gravity: Vec2,
    /// Solver iterations per step.
    pub iterations: usize,
    /// Seconds a body must stay at rest before it is put to sleep.
    pub sleep_time_threshold: f32,
    /// Allowed penetration between colliders.
    pub collision_slop: f32,
    /// Simulated seconds per frame, independent of wall-clock time.
    pub timestep: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.0),
            iterations: 90,
            sleep_time_threshold: 0.5,
            collision_slop: 0.5,
            timestep: 0.01,
        }
    }
}

/// Handle to a dynamic body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub u64);

/// Physics stepper trait.
pub trait PhysicsBackend {
    fn step(&mut self, dt_sec: f32);
    /// Adds a fixed line segment from `a` to `b`.
    fn add_static_segment(&mut self, a: Vec2, b: Vec2, friction: f32);
    /// Adds a dynamic square box of side `size` at the origin.
    fn add_dynamic_box(&mut self, mass: f32, size: f32, friction: f32, elasticity: f32) -> BodyId;
    fn body_position(&self, body: BodyId) -> Option<Vec2>;
}

/// No-op physics.
#[derive(Default)]
pub struct NullPhysics {
    next_body: u64,
    steps: u64,
}

impl NullPhysics {
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl PhysicsBackend for NullPhysics {
    fn step(&mut self, _dt_sec: f32) {
        self.steps += 1;
    }

    fn add_static_segment(&mut self, _a: Vec2, _b: Vec2, _friction: f32) {}

    fn add_dynamic_box(&mut self, _mass: f32, _size: f32, _friction: f32, _elasticity: f32) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        id
    }

    fn body_position(&self, _body: BodyId) -> Option<Vec2> {
        None
    }
}

/// Rapier-backed 2D world.
pub struct RapierPhysics {
    config: PhysicsConfig,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    bodies: Vec<RigidBodyHandle>,
}

impl RapierPhysics {
    pub fn new(config: PhysicsConfig) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = config.timestep;
        integration_parameters.normalized_allowed_linear_error = config.collision_slop;
        if let Some(iterations) = std::num::NonZeroUsize::new(config.iterations) {
            integration_parameters.num_solver_iterations = iterations;
        }

        debug!(?config, "Creating physics world");

        Self {
            config,
            gravity: vector![config.gravity.x, config.gravity.y],
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            bodies: Vec::new(),
        }
    }
}

impl Default for RapierPhysics {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl PhysicsBackend for RapierPhysics {
    fn step(&mut self, dt_sec: f32) {
        self.integration_parameters.dt = dt_sec;
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
            &(),
        );
    }

    fn add_static_segment(&mut self, a: Vec2, b: Vec2, friction: f32) {
        let collider = ColliderBuilder::segment(point![a.x, a.y], point![b.x, b.y])
            .friction(friction)
            .build();
        self.collider_set.insert(collider);
    }

    fn add_dynamic_box(&mut self, mass: f32, size: f32, friction: f32, elasticity: f32) -> BodyId {
        let mut body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 0.0])
            .build();
        body.activation_mut().time_until_sleep = self.config.sleep_time_threshold;
        let handle = self.rigid_body_set.insert(body);

        let half = size / 2.0;
        let collider = ColliderBuilder::cuboid(half, half)
            .mass(mass)
            .friction(friction)
            .restitution(elasticity)
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.bodies.push(handle);
        BodyId(self.bodies.len() as u64 - 1)
    }

    fn body_position(&self, body: BodyId) -> Option<Vec2> {
        let handle = self.bodies.get(body.0 as usize)?;
        let t = self.rigid_body_set.get(*handle)?.translation();
        Some(Vec2::new(t.x, t.y))
    }
}
