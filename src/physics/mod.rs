//! Physics backend contract
//!
//! The backend is an external collaborator reached through `PhysicsBackend`.
//! `PhysicsSession` wraps it in two phases so that bodies can only be created
//! before `start_simulation` and updated after it, and so that `cleanup`
//! consumes the session and runs exactly once.

use std::marker::PhantomData;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

pub mod simple;

#[cfg(test)]
pub(crate) mod recording;

pub use simple::SimplePhysics;

/// Opaque id minted by the backend for every registered body
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct BodyHandle(u32);

impl BodyHandle {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Narrow create/update contract of a physics engine
pub trait PhysicsBackend {
    fn initialise(&mut self) -> Result<(), PhysicsError>;

    /// Register a static box
    fn create_floor(&mut self, half_extent: Vec3, position: Vec3) -> BodyHandle;

    /// Register a dynamic sphere
    fn create_ball(&mut self, radius: f32, position: Vec3, velocity: Vec3) -> BodyHandle;

    /// Called once after every body is registered
    fn start_simulation(&mut self);

    /// Advance one body by `dt` unless `skip` is set. The backend writes the
    /// body's state back through `position` and `velocity` in either case.
    fn update(
        &mut self,
        handle: BodyHandle,
        dt: f32,
        position: &mut Vec3,
        velocity: &mut Vec3,
        skip: bool,
    );

    fn cleanup(&mut self);
}

/// Session phase: bodies may be created
#[derive(Debug)]
pub struct Registering;

/// Session phase: bodies may be updated
#[derive(Debug)]
pub struct Running;

/// A backend plus the phase it is in
#[derive(Debug)]
pub struct PhysicsSession<B, S> {
    backend: B,
    bodies: usize,
    _phase: PhantomData<S>,
}

impl<B, S> PhysicsSession<B, S> {
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Bodies registered with the backend
    pub fn body_count(&self) -> usize {
        self.bodies
    }
}

impl<B: PhysicsBackend> PhysicsSession<B, Registering> {
    pub fn initialise(mut backend: B) -> Result<Self, PhysicsError> {
        log::info!("Initialising physics backend");
        backend.initialise()?;
        Ok(Self {
            backend,
            bodies: 0,
            _phase: PhantomData,
        })
    }

    pub fn create_floor(&mut self, half_extent: Vec3, position: Vec3) -> BodyHandle {
        self.bodies += 1;
        self.backend.create_floor(half_extent, position)
    }

    pub fn create_ball(&mut self, radius: f32, position: Vec3, velocity: Vec3) -> BodyHandle {
        self.bodies += 1;
        self.backend.create_ball(radius, position, velocity)
    }

    pub fn start_simulation(mut self) -> PhysicsSession<B, Running> {
        log::info!("Starting simulation with {} bodies", self.bodies);
        self.backend.start_simulation();
        PhysicsSession {
            backend: self.backend,
            bodies: self.bodies,
            _phase: PhantomData,
        }
    }
}

impl<B: PhysicsBackend> PhysicsSession<B, Running> {
    pub fn update(
        &mut self,
        handle: BodyHandle,
        dt: f32,
        position: &mut Vec3,
        velocity: &mut Vec3,
        skip: bool,
    ) {
        self.backend.update(handle, dt, position, velocity, skip);
    }

    /// Tear the backend down and hand it back
    pub fn cleanup(mut self) -> B {
        log::info!("Preparing physics backend for shutdown");
        self.backend.cleanup();
        self.backend
    }
}
