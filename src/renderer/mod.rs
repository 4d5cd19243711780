//! Render pipeline
//!
//! Two mutually exclusive paths per frame: direct to screen, or captured into
//! an offscreen target and composed into an inspector window next to the dev
//! panel. Graphics and UI are external backends behind `Graphics` and `Ui`.

pub mod debug;
pub mod panel;
pub mod recording;
pub mod scene;

pub use debug::DebugView;
pub use recording::{DrawCommand, Recorded, RecordingGraphics, ScriptedUi, UiEvent};

use glam::{Vec2, Vec3};

use crate::consts::{CAMERA_FOVY, CAMERA_POSITION, PALETTE_LEN};
use crate::error::RenderError;

/// RGBA colour, 0-1 per channel
pub type Color = [f32; 4];

/// Colors for scene elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.96, 0.96, 0.96, 1.0];
    pub const LETTERBOX: Color = [0.31, 0.31, 0.31, 1.0];
    pub const HUD_TEXT: Color = [0.31, 0.31, 0.31, 1.0];
    pub const TINT: Color = [1.0, 1.0, 1.0, 1.0];

    pub const MAROON: Color = [0.75, 0.13, 0.22, 1.0];
    pub const ORANGE: Color = [1.0, 0.63, 0.0, 1.0];
    pub const GOLD: Color = [1.0, 0.8, 0.0, 1.0];
    pub const LIME: Color = [0.0, 0.62, 0.18, 1.0];
    pub const SKY_BLUE: Color = [0.4, 0.75, 1.0, 1.0];
}

/// Selectable sphere colours (label, colour)
pub const PALETTE: [(&str, Color); PALETTE_LEN] = [
    ("Maroon", colors::MAROON),
    ("Orange", colors::ORANGE),
    ("Gold", colors::GOLD),
    ("Lime", colors::LIME),
    ("Sky blue", colors::SKY_BLUE),
];

/// Palette colour for an index, falling back to the first entry
pub fn palette_colour(index: usize) -> Color {
    PALETTE.get(index).unwrap_or(&PALETTE[0]).1
}

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: CAMERA_FOVY,
        }
    }
}

/// Axis-aligned rectangle in pixels. A negative height samples the source
/// upside down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Handle to an offscreen render target owned by the graphics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTarget {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Inspector window behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    pub auto_resize: bool,
    pub no_resize: bool,
    pub no_background: bool,
}

impl WindowFlags {
    /// Fixed, self-sizing, transparent window around the captured scene
    pub const INSPECTOR: WindowFlags = WindowFlags {
        auto_resize: true,
        no_resize: true,
        no_background: true,
    };
}

/// HSV button colouring; hovered and active states brighten the base
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonStyle {
    pub hue: f32,
}

impl ButtonStyle {
    pub const PLAY: ButtonStyle = ButtonStyle { hue: 0.2857 };
    pub const PAUSE: ButtonStyle = ButtonStyle { hue: 0.0 };
    pub const STEP: ButtonStyle = ButtonStyle { hue: 0.5714 };

    /// (hue, saturation, value) for regular, hovered and active states
    pub fn hsv(&self) -> [(f32, f32, f32); 3] {
        [
            (self.hue, 0.6, 0.6),
            (self.hue, 0.7, 0.7),
            (self.hue, 0.8, 0.8),
        ]
    }
}

/// Immediate-mode drawing backend
pub trait Graphics {
    fn begin_drawing(&mut self);
    fn end_drawing(&mut self);

    fn clear(&mut self, colour: Color);

    fn begin_3d(&mut self, camera: &Camera);
    fn end_3d(&mut self);
    fn draw_grid(&mut self, slices: u32, spacing: f32);
    fn draw_sphere(&mut self, centre: Vec3, radius: f32, colour: Color);

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, colour: Color);
    fn draw_fps(&mut self, position: Vec2);
    /// Current measured frame rate
    fn fps(&self) -> u32;

    fn create_render_target(&mut self, width: u32, height: u32)
    -> Result<RenderTarget, RenderError>;
    /// Redirect subsequent drawing into `target` until `end_target`
    fn begin_target(&mut self, target: RenderTarget);
    fn end_target(&mut self);
    /// Draw the `source` region of a target's texture into `destination`
    fn draw_target(&mut self, target: RenderTarget, source: Rect, destination: Rect, tint: Color);
}

/// Immediate-mode UI backend
pub trait Ui {
    fn begin_frame(&mut self);
    fn end_frame(&mut self);
    fn set_scale(&mut self, scale: f32);

    /// Returns whether the window's contents are visible. `end_window` must
    /// be called either way.
    fn begin_window(&mut self, title: &str, flags: WindowFlags) -> bool;
    fn end_window(&mut self);

    fn text(&mut self, text: &str);
    fn separator_text(&mut self, text: &str);
    fn same_line(&mut self);
    /// Returns true when clicked
    fn button(&mut self, label: &str, style: ButtonStyle) -> bool;
    /// Returns whether the node is open; call `tree_pop` only when it is
    fn tree_node(&mut self, label: &str) -> bool;
    fn tree_pop(&mut self);
    /// Returns true when clicked
    fn radio_button(&mut self, label: &str, active: bool) -> bool;
    fn image(&mut self, target: RenderTarget);
}
