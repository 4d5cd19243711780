//! Entity components and scene spawning
//!
//! Components are plain data stored in a `hecs::World`. No component refers to
//! another; systems join them through typed queries.

use glam::Vec3;
use hecs::{Entity, World};
use serde::Serialize;

use crate::consts::*;
use crate::physics::BodyHandle;

/// World-space centre of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

/// Linear velocity of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec3);

/// Static axis-aligned box collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub half_extent: Vec3,
}

/// Dynamic sphere collider; entities carrying it are simulated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereCollider {
    pub radius: f32,
}

/// Visual sphere. Colour comes from the palette selection, not the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereMesh {
    pub radius: f32,
}

/// Ground grid visual
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridComponent {
    pub slices: u32,
    pub spacing: f32,
}

impl Default for GridComponent {
    fn default() -> Self {
        Self {
            slices: GRID_SLICES,
            spacing: GRID_SPACING,
        }
    }
}

/// Per-body state dump, emitted by the headless runner
#[derive(Debug, Clone, Serialize)]
pub struct BodySnapshot {
    pub handle: BodyHandle,
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Spawn the static floor (no physics handle until colliders are registered)
pub fn spawn_floor(world: &mut World) -> Entity {
    world.spawn((
        Position(FLOOR_POSITION),
        GridComponent::default(),
        BoxCollider {
            half_extent: FLOOR_HALF_EXTENT,
        },
    ))
}

/// Spawn a simulated ball
pub fn spawn_ball(world: &mut World, position: Vec3, velocity: Vec3, radius: f32) -> Entity {
    world.spawn((
        Position(position),
        Velocity(velocity),
        SphereMesh { radius },
        SphereCollider { radius },
    ))
}

/// Spawn the reference scene: one floor, one ball
pub fn spawn_scene(world: &mut World) {
    spawn_floor(world);
    spawn_ball(world, BALL_POSITION, BALL_VELOCITY, BALL_RADIUS);
}

/// Snapshot every registered simulated body, ordered by handle
pub fn body_snapshots(world: &World) -> Vec<BodySnapshot> {
    let mut snapshots: Vec<BodySnapshot> = world
        .query::<(&BodyHandle, &Position, &Velocity)>()
        .iter()
        .map(|(_, (handle, position, velocity))| BodySnapshot {
            handle: *handle,
            position: position.0,
            velocity: velocity.0,
        })
        .collect();
    snapshots.sort_by_key(|s| s.handle);
    snapshots
}
