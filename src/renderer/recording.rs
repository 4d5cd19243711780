//! Headless graphics and UI backends
//!
//! `RecordingGraphics` keeps the draw calls of the most recent frame, tagged
//! with the render target they went to. `ScriptedUi` plays back clicks that
//! were scheduled for given frames and records what the panel showed.

use std::collections::{HashMap, HashSet};

use glam::{Vec2, Vec3};

use super::{ButtonStyle, Camera, Color, Graphics, Rect, RenderTarget, Ui, WindowFlags};
use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Begin3d,
    End3d,
    Grid { slices: u32, spacing: f32 },
    Sphere { centre: Vec3, radius: f32, colour: Color },
    Text { text: String, position: Vec2 },
    Fps,
    BeginTarget(RenderTarget),
    EndTarget(RenderTarget),
    DrawTarget {
        target: RenderTarget,
        source: Rect,
        destination: Rect,
    },
}

/// A draw call and the target bound when it was issued (`None` = screen)
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub target: Option<RenderTarget>,
    pub command: DrawCommand,
}

#[derive(Debug)]
pub struct RecordingGraphics {
    commands: Vec<Recorded>,
    bound: Option<RenderTarget>,
    next_target: u32,
    /// Largest target edge the backend accepts
    pub max_target_size: u32,
    /// Frame rate reported by `fps`
    pub reported_fps: u32,
    frames: u64,
}

impl Default for RecordingGraphics {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            bound: None,
            next_target: 1,
            max_target_size: 8192,
            reported_fps: 60,
            frames: 0,
        }
    }
}

impl RecordingGraphics {
    /// Backend that refuses targets with an edge larger than `max`
    pub fn with_max_target_size(max: u32) -> Self {
        Self {
            max_target_size: max,
            ..Self::default()
        }
    }

    /// Draw calls since the last `begin_drawing`
    pub fn commands(&self) -> &[Recorded] {
        &self.commands
    }

    /// Frames completed
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sphere_colours(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|r| match r.command {
                DrawCommand::Sphere { colour, .. } => Some(colour),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, command: DrawCommand) {
        self.commands.push(Recorded {
            target: self.bound,
            command,
        });
    }
}

impl Graphics for RecordingGraphics {
    fn begin_drawing(&mut self) {
        self.commands.clear();
    }

    fn end_drawing(&mut self) {
        self.frames += 1;
    }

    fn clear(&mut self, colour: Color) {
        self.record(DrawCommand::Clear(colour));
    }

    fn begin_3d(&mut self, _camera: &Camera) {
        self.record(DrawCommand::Begin3d);
    }

    fn end_3d(&mut self) {
        self.record(DrawCommand::End3d);
    }

    fn draw_grid(&mut self, slices: u32, spacing: f32) {
        self.record(DrawCommand::Grid { slices, spacing });
    }

    fn draw_sphere(&mut self, centre: Vec3, radius: f32, colour: Color) {
        self.record(DrawCommand::Sphere {
            centre,
            radius,
            colour,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, _size: f32, _colour: Color) {
        self.record(DrawCommand::Text {
            text: text.to_string(),
            position,
        });
    }

    fn draw_fps(&mut self, _position: Vec2) {
        self.record(DrawCommand::Fps);
    }

    fn fps(&self) -> u32 {
        self.reported_fps
    }

    fn create_render_target(
        &mut self,
        width: u32,
        height: u32,
    ) -> Result<RenderTarget, RenderError> {
        if width == 0 || height == 0 || width > self.max_target_size || height > self.max_target_size
        {
            return Err(RenderError::TargetUnavailable { width, height });
        }
        let target = RenderTarget {
            id: self.next_target,
            width,
            height,
        };
        self.next_target += 1;
        Ok(target)
    }

    fn begin_target(&mut self, target: RenderTarget) {
        self.record(DrawCommand::BeginTarget(target));
        self.bound = Some(target);
    }

    fn end_target(&mut self) {
        if let Some(target) = self.bound.take() {
            self.commands.push(Recorded {
                target: Some(target),
                command: DrawCommand::EndTarget(target),
            });
        }
    }

    fn draw_target(&mut self, target: RenderTarget, source: Rect, destination: Rect, _tint: Color) {
        self.record(DrawCommand::DrawTarget {
            target,
            source,
            destination,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Window(String),
    Text(String),
    Clicked(String),
    Image(RenderTarget),
}

/// UI backend that clicks widgets on a schedule
#[derive(Debug, Default)]
pub struct ScriptedUi {
    frame: u64,
    schedule: HashMap<u64, Vec<String>>,
    pending: HashSet<String>,
    events: Vec<UiEvent>,
    /// Open state reported by `tree_node`
    pub collapse_trees: bool,
    scale: f32,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click the widget labelled `label` during frame `frame` (1-based)
    pub fn click_on(&mut self, frame: u64, label: &str) {
        self.schedule.entry(frame).or_default().push(label.to_string());
    }

    /// What the UI showed and did during the most recent frame
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    pub fn texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn take_click(&mut self, label: &str) -> bool {
        let clicked = self.pending.remove(label);
        if clicked {
            self.events.push(UiEvent::Clicked(label.to_string()));
        }
        clicked
    }
}

impl Ui for ScriptedUi {
    fn begin_frame(&mut self) {
        self.frame += 1;
        self.events.clear();
        self.pending = self
            .schedule
            .remove(&self.frame)
            .unwrap_or_default()
            .into_iter()
            .collect();
    }

    fn end_frame(&mut self) {
        for label in self.pending.drain() {
            log::warn!("Scripted click on '{}' found no widget", label);
        }
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    fn begin_window(&mut self, title: &str, _flags: WindowFlags) -> bool {
        self.events.push(UiEvent::Window(title.to_string()));
        true
    }

    fn end_window(&mut self) {}

    fn text(&mut self, text: &str) {
        self.events.push(UiEvent::Text(text.to_string()));
    }

    fn separator_text(&mut self, text: &str) {
        self.events.push(UiEvent::Text(text.to_string()));
    }

    fn same_line(&mut self) {}

    fn button(&mut self, label: &str, _style: ButtonStyle) -> bool {
        self.take_click(label)
    }

    fn tree_node(&mut self, _label: &str) -> bool {
        !self.collapse_trees
    }

    fn tree_pop(&mut self) {}

    fn radio_button(&mut self, label: &str, _active: bool) -> bool {
        self.take_click(label)
    }

    fn image(&mut self, target: RenderTarget) {
        self.events.push(UiEvent::Image(target));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_tagged_with_target() {
        let mut graphics = RecordingGraphics::default();
        let target = graphics.create_render_target(64, 32).unwrap();

        graphics.begin_drawing();
        graphics.begin_target(target);
        graphics.clear([0.0; 4]);
        graphics.end_target();
        graphics.clear([1.0; 4]);
        graphics.end_drawing();

        let targets: Vec<_> = graphics.commands().iter().map(|r| r.target).collect();
        assert_eq!(targets, vec![None, Some(target), Some(target), None]);
        assert_eq!(graphics.frames(), 1);
    }

    #[test]
    fn test_oversized_target_rejected() {
        let mut graphics = RecordingGraphics::with_max_target_size(100);
        assert!(graphics.create_render_target(101, 10).is_err());
        assert!(graphics.create_render_target(0, 10).is_err());
    }

    #[test]
    fn test_scripted_click_fires_once_on_its_frame() {
        let mut ui = ScriptedUi::new();
        ui.click_on(2, "Pause");

        ui.begin_frame();
        assert!(!ui.button("Pause", ButtonStyle::PAUSE));
        ui.end_frame();

        ui.begin_frame();
        assert!(ui.button("Pause", ButtonStyle::PAUSE));
        assert!(!ui.button("Pause", ButtonStyle::PAUSE));
        ui.end_frame();

        assert_eq!(ui.events(), &[UiEvent::Clicked("Pause".to_string())]);
    }
}
