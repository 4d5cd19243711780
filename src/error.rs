//! Error types
//!
//! All fallibility lives at startup and shutdown. The per-frame loop has no
//! error path.

use thiserror::Error;

/// Fatal errors raised before the frame loop begins
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("tick rate must be positive")]
    ZeroTickRate,

    #[error("window size {width}x{height} is invalid")]
    InvalidWindowSize { width: u32, height: u32 },

    #[error("debug scale must be positive, got {0}")]
    InvalidDebugScale(f32),

    #[error("physics backend failed to start")]
    Physics(#[from] PhysicsError),

    #[error("renderer failed to start")]
    Render(#[from] RenderError),
}

/// Errors reported by a physics backend or while registering bodies
#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("physics backend already initialised")]
    AlreadyInitialised,

    #[error("collider entity vanished during registration")]
    NoSuchEntity(#[from] hecs::NoSuchEntity),

    #[error("physics backend error: {0}")]
    Backend(String),
}

/// Errors reported by a graphics backend
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create a {width}x{height} render target")]
    TargetUnavailable { width: u32, height: u32 },
}
