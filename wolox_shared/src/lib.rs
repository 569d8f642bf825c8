//! `wolox_shared`
//!
//! Scene core used by the editor binary and the tests.
//!
//! Design goals:
//! - Per-frame logic is plain functions of owned state plus an input snapshot.
//! - Window, GUI and physics backends sit behind traits.
//! - No `unsafe`, no global mutable state.

pub mod config;
pub mod ecs;
pub mod gizmo;
pub mod input;
pub mod math;
pub mod physics;
pub mod render;
pub mod selection;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::ecs::*;
    pub use crate::gizmo::{GizmoController, GizmoOutcome, GizmoState};
    pub use crate::input::*;
    pub use crate::math::*;
    pub use crate::physics::{NullPhysics, PhysicsBackend, PhysicsConfig, RapierPhysics};
    pub use crate::render::*;
    pub use crate::selection::*;
}
