//! Built-in physics backend
//!
//! Semi-implicit Euler under constant gravity, with spheres resolved against
//! static axis-aligned boxes. Enough to drop a ball on a floor; swap in a real
//! engine through `PhysicsBackend` for anything more.

use glam::Vec3;

use super::{BodyHandle, PhysicsBackend};
use crate::consts::{GRAVITY, REST_SPEED, RESTITUTION};
use crate::error::PhysicsError;

#[derive(Debug, Clone, Copy)]
enum Body {
    Static {
        half_extent: Vec3,
        position: Vec3,
    },
    /// State lives in the caller's components; only the shape is kept
    Dynamic { radius: f32 },
}

/// Contact between a sphere and a box
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Points from the box toward the sphere centre
    normal: Vec3,
    penetration: f32,
}

#[derive(Debug)]
pub struct SimplePhysics {
    gravity: Vec3,
    restitution: f32,
    bodies: Vec<Body>,
    /// Indices of static bodies, built by `start_simulation`
    statics: Vec<usize>,
    initialised: bool,
}

impl Default for SimplePhysics {
    fn default() -> Self {
        Self::new(GRAVITY, RESTITUTION)
    }
}

impl SimplePhysics {
    pub fn new(gravity: Vec3, restitution: f32) -> Self {
        Self {
            gravity,
            restitution,
            bodies: Vec::new(),
            statics: Vec::new(),
            initialised: false,
        }
    }

    fn push(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle::new(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    fn step_sphere(&self, radius: f32, position: &mut Vec3, velocity: &mut Vec3, dt: f32) {
        *velocity += self.gravity * dt;
        *position += *velocity * dt;

        for &index in &self.statics {
            let Body::Static {
                half_extent,
                position: box_position,
            } = self.bodies[index]
            else {
                continue;
            };
            let Some(contact) = sphere_box_contact(*position, radius, box_position, half_extent)
            else {
                continue;
            };

            *position += contact.normal * contact.penetration;

            let normal_speed = velocity.dot(contact.normal);
            if normal_speed < 0.0 {
                let bounce = if -normal_speed < REST_SPEED {
                    1.0
                } else {
                    1.0 + self.restitution
                };
                *velocity -= contact.normal * normal_speed * bounce;
            }
        }
    }
}

/// Overlap test between a sphere and an axis-aligned box
fn sphere_box_contact(
    centre: Vec3,
    radius: f32,
    box_centre: Vec3,
    half_extent: Vec3,
) -> Option<Contact> {
    let min = box_centre - half_extent;
    let max = box_centre + half_extent;
    let closest = centre.clamp(min, max);
    let offset = centre - closest;
    let distance = offset.length();

    if distance >= radius {
        return None;
    }

    if distance > f32::EPSILON {
        return Some(Contact {
            normal: offset / distance,
            penetration: radius - distance,
        });
    }

    // Centre is inside the box: push out through the top face
    Some(Contact {
        normal: Vec3::Y,
        penetration: max.y + radius - centre.y,
    })
}

impl PhysicsBackend for SimplePhysics {
    fn initialise(&mut self) -> Result<(), PhysicsError> {
        if self.initialised {
            return Err(PhysicsError::AlreadyInitialised);
        }
        self.initialised = true;
        Ok(())
    }

    fn create_floor(&mut self, half_extent: Vec3, position: Vec3) -> BodyHandle {
        self.push(Body::Static {
            half_extent,
            position,
        })
    }

    fn create_ball(&mut self, radius: f32, _position: Vec3, _velocity: Vec3) -> BodyHandle {
        self.push(Body::Dynamic { radius })
    }

    fn start_simulation(&mut self) {
        self.statics = self
            .bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| matches!(body, Body::Static { .. }))
            .map(|(index, _)| index)
            .collect();
        log::debug!(
            "Broad phase ready: {} static, {} dynamic",
            self.statics.len(),
            self.bodies.len() - self.statics.len()
        );
    }

    fn update(
        &mut self,
        handle: BodyHandle,
        dt: f32,
        position: &mut Vec3,
        velocity: &mut Vec3,
        skip: bool,
    ) {
        let Some(&Body::Dynamic { radius }) = self.bodies.get(handle.id() as usize) else {
            log::warn!("Update for unknown or static body {:?} ignored", handle);
            return;
        };

        if !skip {
            self.step_sphere(radius, position, velocity, dt);
        }
    }

    fn cleanup(&mut self) {
        log::debug!("Releasing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.statics.clear();
        self.initialised = false;
    }
}
