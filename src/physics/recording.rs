//! Identity backend that records every call, for tests

use glam::Vec3;

use super::{BodyHandle, PhysicsBackend};
use crate::error::PhysicsError;

#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsCall {
    Initialise,
    CreateFloor(BodyHandle),
    CreateBall(BodyHandle),
    StartSimulation,
    Update { handle: BodyHandle, skip: bool },
    Cleanup,
}

#[derive(Debug, Default)]
pub struct RecordingPhysics {
    pub calls: Vec<PhysicsCall>,
    pub fail_initialise: bool,
    next_id: u32,
}

impl RecordingPhysics {
    /// Backend whose `initialise` is refused
    pub fn failing() -> Self {
        Self {
            fail_initialise: true,
            ..Self::default()
        }
    }

    pub fn updates(&self) -> Vec<(BodyHandle, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PhysicsCall::Update { handle, skip } => Some((*handle, *skip)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&PhysicsCall) -> bool) -> usize {
        self.calls.iter().filter(|c| wanted(c)).count()
    }

    fn mint(&mut self) -> BodyHandle {
        let handle = BodyHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }
}

impl PhysicsBackend for RecordingPhysics {
    fn initialise(&mut self) -> Result<(), PhysicsError> {
        if self.fail_initialise {
            return Err(PhysicsError::Backend("refused".to_string()));
        }
        self.calls.push(PhysicsCall::Initialise);
        Ok(())
    }

    fn create_floor(&mut self, _half_extent: Vec3, _position: Vec3) -> BodyHandle {
        let handle = self.mint();
        self.calls.push(PhysicsCall::CreateFloor(handle));
        handle
    }

    fn create_ball(&mut self, _radius: f32, _position: Vec3, _velocity: Vec3) -> BodyHandle {
        let handle = self.mint();
        self.calls.push(PhysicsCall::CreateBall(handle));
        handle
    }

    fn start_simulation(&mut self) {
        self.calls.push(PhysicsCall::StartSimulation);
    }

    fn update(
        &mut self,
        handle: BodyHandle,
        _dt: f32,
        _position: &mut Vec3,
        _velocity: &mut Vec3,
        skip: bool,
    ) {
        self.calls.push(PhysicsCall::Update { handle, skip });
    }

    fn cleanup(&mut self) {
        self.calls.push(PhysicsCall::Cleanup);
    }
}
