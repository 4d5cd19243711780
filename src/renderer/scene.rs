//! Scene drawing: grids, spheres and the HUD
//!
//! Read-only over the world. Sphere colour comes from the control state's
//! palette selection.

use hecs::World;

use super::{Camera, Graphics, colors, palette_colour};
use crate::consts::*;
use crate::sim::SimulationControl;
use crate::sim::components::{GridComponent, Position, SphereMesh};

pub fn draw_grids(graphics: &mut impl Graphics, world: &World) {
    for (_, (_position, grid)) in world.query::<(&Position, &GridComponent)>().iter() {
        graphics.draw_grid(grid.slices, grid.spacing);
    }
}

pub fn draw_spheres(graphics: &mut impl Graphics, world: &World, control: &SimulationControl) {
    let colour = palette_colour(control.selected_colour());
    for (_, (position, mesh)) in world.query::<(&Position, &SphereMesh)>().iter() {
        graphics.draw_sphere(position.0, mesh.radius, colour);
    }
}

/// Instruction line and frame-rate counter
pub fn draw_hud(graphics: &mut impl Graphics) {
    graphics.draw_text(HUD_INSTRUCTIONS, HUD_TEXT_POSITION, HUD_FONT_SIZE, colors::HUD_TEXT);
    graphics.draw_fps(FPS_POSITION);
}

/// Full scene into whatever target is bound: clear, 3D pass, HUD
pub fn draw_scene(
    graphics: &mut impl Graphics,
    world: &World,
    control: &SimulationControl,
    camera: &Camera,
) {
    graphics.clear(colors::BACKGROUND);
    graphics.begin_3d(camera);
    draw_grids(graphics, world);
    draw_spheres(graphics, world, control);
    graphics.end_3d();
    draw_hud(graphics);
}
