//! Debug render path
//!
//! The scene is drawn into a full-size game target, which is closed before it
//! is sampled. The game target is then drawn flipped and downscaled into the
//! debug target, and the debug target is shown in the inspector window beside
//! the dev panel.

use hecs::World;

use super::panel::draw_dev_panel;
use super::scene::draw_scene;
use super::{Camera, Graphics, Rect, RenderTarget, Ui, WindowFlags, colors};
use crate::error::RenderError;
use crate::settings::Settings;
use crate::sim::SimulationControl;

pub const INSPECTOR_TITLE: &str = "Scene";

/// Offscreen targets and the blit rectangles between them
#[derive(Debug, Clone)]
pub struct DebugView {
    game: RenderTarget,
    debug: RenderTarget,
    source: Rect,
    destination: Rect,
}

impl DebugView {
    /// Create both targets. Called once at startup.
    pub fn new(graphics: &mut impl Graphics, settings: &Settings) -> Result<Self, RenderError> {
        let (width, height) = (settings.window_width, settings.window_height);
        let (debug_width, debug_height) = settings.debug_target_size();

        let game = graphics.create_render_target(width, height)?;
        let debug = graphics.create_render_target(debug_width, debug_height)?;

        Ok(Self {
            game,
            debug,
            // Render textures are stored bottom-up; sample with a negative height
            source: Rect::new(0.0, 0.0, width as f32, -(height as f32)),
            destination: Rect::new(0.0, 0.0, debug_width as f32, debug_height as f32),
        })
    }

    pub fn game_target(&self) -> RenderTarget {
        self.game
    }

    pub fn debug_target(&self) -> RenderTarget {
        self.debug
    }

    pub fn render(
        &self,
        graphics: &mut impl Graphics,
        ui: &mut impl Ui,
        world: &World,
        control: &mut SimulationControl,
        camera: &Camera,
    ) {
        graphics.clear(colors::LETTERBOX);

        graphics.begin_target(self.game);
        draw_scene(graphics, world, control, camera);
        graphics.end_target();

        graphics.begin_target(self.debug);
        graphics.draw_target(self.game, self.source, self.destination, colors::TINT);
        graphics.end_target();

        draw_dev_panel(ui, world, control, graphics.fps());

        if ui.begin_window(INSPECTOR_TITLE, WindowFlags::INSPECTOR) {
            ui.image(self.debug);
        }
        ui.end_window();
    }
}
