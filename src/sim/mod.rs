//! Simulation coordination
//!
//! Everything between raw input and the physics backend:
//! - Components stored in the entity world
//! - Input buffering and the fixed-rate tick scheduler
//! - Pause/step control state
//! - Systems that register and update physics bodies

pub mod components;
pub mod control;
pub mod input;
pub mod systems;

pub use components::{
    BodySnapshot, BoxCollider, GridComponent, Position, SphereCollider, SphereMesh, Velocity,
    body_snapshots, spawn_scene,
};
pub use control::{Command, SimState, SimulationControl};
pub use input::{InputBuffer, KeyCode, TickReport, TickScheduler};
pub use systems::{UpdateReport, register_colliders, update_bodies};
