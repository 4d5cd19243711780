//! Ball Sandbox - a fixed-tick physics sandbox with a debug inspector
//!
//! Core modules:
//! - `sim`: Components, input buffering, tick scheduling, pause/step control
//! - `physics`: Physics backend contract and the built-in backend
//! - `renderer`: Direct and debug (offscreen captured) render paths
//! - `platform`: Frame timing and key polling
//! - `app`: Phase-sequenced frame loop

pub mod app;
pub mod error;
pub mod physics;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::{PhysicsError, RenderError, StartupError};
pub use settings::Settings;

/// Startup constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Window title
    pub const TITLE: &str = "Ball Sandbox";
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;

    /// Fixed tick rate for input processing (Hz)
    pub const TICK_RATE: u32 = 60;
    /// Render pacing hint handed to the platform
    pub const TARGET_FPS: u32 = 60;

    /// The debug capture is shown at 1/DEBUG_SCALE of the window size
    pub const DEBUG_SCALE: f32 = 1.5;
    /// Widget and font scale for the inspector UI
    pub const UI_SCALE: f32 = 1.5;

    /// Camera looks at the origin from above and to the side
    pub const CAMERA_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
    pub const CAMERA_FOVY: f32 = 45.0;

    /// HUD layout
    pub const HUD_INSTRUCTIONS: &str = "Press F9 for debug mode";
    pub const HUD_TEXT_POSITION: Vec2 = Vec2::new(10.0, 40.0);
    pub const HUD_FONT_SIZE: f32 = 20.0;
    pub const FPS_POSITION: Vec2 = Vec2::new(10.0, 10.0);

    /// Floor body
    pub const FLOOR_POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
    pub const FLOOR_HALF_EXTENT: Vec3 = Vec3::new(5.0, 1.0, 5.0);
    pub const GRID_SLICES: u32 = 10;
    pub const GRID_SPACING: f32 = 1.0;

    /// Ball body
    pub const BALL_POSITION: Vec3 = Vec3::new(0.0, 10.0, 0.0);
    pub const BALL_VELOCITY: Vec3 = Vec3::new(0.5, 0.0, 0.0);
    pub const BALL_RADIUS: f32 = 0.5;

    /// Number of selectable sphere colours
    pub const PALETTE_LEN: usize = 5;

    /// Built-in physics
    pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
    pub const RESTITUTION: f32 = 0.5;
    /// Normal speeds below this come to rest instead of bouncing
    pub const REST_SPEED: f32 = 0.05;
}
