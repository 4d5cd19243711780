//! Systems bridging the world and the physics backend
//!
//! Registration stores the backend's handle on each entity, and every update is
//! addressed by that handle. World iteration order therefore never has to match
//! registration order.

use hecs::{Entity, World};

use super::SimulationControl;
use super::components::{BoxCollider, Position, SphereCollider, Velocity};
use crate::error::PhysicsError;
use crate::physics::{BodyHandle, PhysicsBackend, PhysicsSession, Registering, Running};

/// Outcome of one physics-update pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Simulated bodies handed to the backend
    pub bodies: usize,
    /// Whether the skip gate was set for this pass
    pub skipped: bool,
    /// Whether an armed step was consumed by this pass
    pub step_consumed: bool,
}

/// Register every collider with the backend: floors first, then balls.
/// Returns the number of bodies registered.
pub fn register_colliders<B: PhysicsBackend>(
    world: &mut World,
    physics: &mut PhysicsSession<B, Registering>,
) -> Result<usize, PhysicsError> {
    log::info!("Creating colliders");

    let floors: Vec<(Entity, BoxCollider, Position)> = world
        .query::<(&BoxCollider, &Position)>()
        .iter()
        .map(|(entity, (collider, position))| (entity, *collider, *position))
        .collect();
    let balls: Vec<(Entity, SphereCollider, Position, Velocity)> = world
        .query::<(&SphereCollider, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (collider, position, velocity))| {
            (entity, *collider, *position, *velocity)
        })
        .collect();

    let mut registered = 0;
    for (entity, collider, position) in floors {
        let handle = physics.create_floor(collider.half_extent, position.0);
        world.insert_one(entity, handle)?;
        registered += 1;
    }
    for (entity, collider, position, velocity) in balls {
        let handle = physics.create_ball(collider.radius, position.0, velocity.0);
        world.insert_one(entity, handle)?;
        registered += 1;
    }

    log::debug!("Registered {} colliders", registered);
    Ok(registered)
}

/// Advance every simulated body by one frame, gated by pause/step.
///
/// The gate is computed once for the pass: a single armed step advances all
/// bodies together in this frame and is cleared afterwards.
pub fn update_bodies<B: PhysicsBackend>(
    world: &mut World,
    control: &mut SimulationControl,
    physics: &mut PhysicsSession<B, Running>,
    dt: f32,
) -> UpdateReport {
    let skip = control.skip_gate();
    let mut bodies = 0;

    for (_, (_collider, handle, position, velocity)) in
        world.query_mut::<(&SphereCollider, &BodyHandle, &mut Position, &mut Velocity)>()
    {
        physics.update(*handle, dt, &mut position.0, &mut velocity.0, skip);
        bodies += 1;
    }

    let step_consumed = control.consume_step();
    if step_consumed {
        log::debug!("Single step advanced {} bodies", bodies);
    }

    UpdateReport {
        bodies,
        skipped: skip,
        step_consumed,
    }
}
