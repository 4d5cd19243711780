//! Dev panel: frame rate, Play/Pause/Step, body introspection, colour picker
//!
//! The only UI writer of `SimulationControl`.

use glam::Vec3;
use hecs::World;

use super::{ButtonStyle, PALETTE, Ui, WindowFlags};
use crate::sim::components::{Position, SphereMesh, Velocity};
use crate::sim::{Command, SimulationControl};

pub const DEV_PANEL_TITLE: &str = "Dev Panel";

/// Play/Pause/Step row. Returns the command clicked, if any.
fn simulation_controls(ui: &mut impl Ui, control: &mut SimulationControl) -> Option<Command> {
    ui.separator_text("Simulation");

    let mut clicked = None;
    if ui.button("Play", ButtonStyle::PLAY) {
        clicked = Some(Command::Play);
    }
    ui.same_line();
    if ui.button("Pause", ButtonStyle::PAUSE) {
        clicked = Some(Command::Pause);
    }
    ui.same_line();
    if ui.button("Step", ButtonStyle::STEP) {
        clicked = Some(Command::Step);
    }

    if let Some(command) = clicked {
        log::info!("{:?} clicked", command);
        control.apply(command);
    }
    clicked
}

/// Three read-only scalars at two decimals
fn vec3_row(ui: &mut impl Ui, value: Vec3) {
    let [x, y, z] = format_vec3(value);
    ui.text(&x);
    ui.same_line();
    ui.text(&y);
    ui.same_line();
    ui.text(&z);
}

pub fn format_vec3(value: Vec3) -> [String; 3] {
    [
        format!("{:.2}", value.x),
        format!("{:.2}", value.y),
        format!("{:.2}", value.z),
    ]
}

fn introspection(ui: &mut impl Ui, index: usize, position: Vec3, velocity: Vec3) {
    if !ui.tree_node(&format!("Sphere {} components", index)) {
        return;
    }
    if ui.tree_node("Position") {
        vec3_row(ui, position);
        ui.tree_pop();
    }
    if ui.tree_node("Velocity") {
        vec3_row(ui, velocity);
        ui.tree_pop();
    }
    ui.tree_pop();
}

fn colour_picker(ui: &mut impl Ui, control: &mut SimulationControl) {
    if !ui.tree_node("Sphere colour") {
        return;
    }
    for (index, (label, _)) in PALETTE.iter().enumerate() {
        if ui.radio_button(label, control.selected_colour() == index) {
            control.select_colour(index);
        }
    }
    ui.tree_pop();
}

/// Draw the dev panel window bound to live entity values
pub fn draw_dev_panel(ui: &mut impl Ui, world: &World, control: &mut SimulationControl, fps: u32) {
    if ui.begin_window(DEV_PANEL_TITLE, WindowFlags::default()) {
        ui.text(&format!("FPS: {}", fps));

        simulation_controls(ui, control);

        let mut query = world.query::<(&Position, &Velocity, &SphereMesh)>();
        for (index, (_, (position, velocity, _))) in query.iter().enumerate() {
            introspection(ui, index, position.0, velocity.0);
        }

        colour_picker(ui, control);
    }
    ui.end_window();
}
