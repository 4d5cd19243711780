//! Phase-sequenced frame loop
//!
//! One thread, one frame at a time, in a fixed order:
//! tick scheduler → key poll → render → physics update.
//! Physics for frame N finishes before frame N+1 renders, so the render pass
//! always reads a settled world.

use hecs::World;

use crate::error::StartupError;
use crate::physics::{BodyHandle, PhysicsBackend, PhysicsSession, Running};
use crate::platform::Platform;
use crate::renderer::{Camera, DebugView, Graphics, Ui, scene};
use crate::settings::Settings;
use crate::sim::{
    BodySnapshot, InputBuffer, SimulationControl, TickReport, TickScheduler, UpdateReport,
    body_snapshots, register_colliders, spawn_scene, update_bodies,
};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub tick: TickReport,
    pub debug_mode: bool,
    pub physics: UpdateReport,
}

pub struct App<B, G> {
    settings: Settings,
    world: World,
    control: SimulationControl,
    scheduler: TickScheduler,
    input: InputBuffer,
    debug_mode: bool,
    physics: PhysicsSession<B, Running>,
    graphics: G,
    camera: Camera,
    debug_view: DebugView,
    frames: u64,
}

impl<B: PhysicsBackend, G: Graphics> App<B, G> {
    /// Spawn the reference scene and bring every backend up.
    ///
    /// Any failure here is fatal; the frame loop never starts.
    pub fn new(settings: Settings, backend: B, graphics: G) -> Result<Self, StartupError> {
        let mut world = World::new();
        spawn_scene(&mut world);
        Self::with_world(settings, world, backend, graphics)
    }

    /// Start from a caller-populated world instead of the reference scene
    pub fn with_world(
        settings: Settings,
        mut world: World,
        backend: B,
        mut graphics: G,
    ) -> Result<Self, StartupError> {
        settings.validate()?;
        log::info!(
            "{} ({}x{}, {} Hz ticks)",
            settings.title,
            settings.window_width,
            settings.window_height,
            settings.tick_rate
        );

        let mut physics = PhysicsSession::initialise(backend)?;
        register_colliders(&mut world, &mut physics)?;
        let physics = physics.start_simulation();

        let debug_view = DebugView::new(&mut graphics, &settings)?;

        Ok(Self {
            scheduler: TickScheduler::new(settings.tick_rate),
            settings,
            world,
            control: SimulationControl::new(),
            input: InputBuffer::new(),
            debug_mode: false,
            physics,
            graphics,
            camera: Camera::default(),
            debug_view,
            frames: 0,
        })
    }

    /// Run one frame
    pub fn frame(&mut self, platform: &mut impl Platform, ui: &mut impl Ui) -> FrameReport {
        let frame_delta = platform.frame_time();

        let tick = self
            .scheduler
            .advance(frame_delta, &mut self.input, &mut self.debug_mode);
        if tick.ticked {
            log::debug!("Tick {}: {:?}", self.scheduler.ticks(), tick);
        }

        // Polled after the tick decision: applied at the next tick boundary
        self.input.push(platform.key_pressed());

        self.graphics.begin_drawing();
        ui.begin_frame();
        if self.debug_mode {
            self.debug_view.render(
                &mut self.graphics,
                ui,
                &self.world,
                &mut self.control,
                &self.camera,
            );
        } else {
            scene::draw_scene(&mut self.graphics, &self.world, &self.control, &self.camera);
        }
        ui.end_frame();
        self.graphics.end_drawing();

        let physics = update_bodies(
            &mut self.world,
            &mut self.control,
            &mut self.physics,
            frame_delta.as_secs_f32(),
        );

        self.frames += 1;
        FrameReport {
            tick,
            debug_mode: self.debug_mode,
            physics,
        }
    }

    /// Loop until the platform asks to close
    pub fn run_loop(&mut self, platform: &mut impl Platform, ui: &mut impl Ui) {
        platform.set_target_fps(self.settings.target_fps);
        ui.set_scale(self.settings.ui_scale);

        log::info!("Starting frame loop");
        while !platform.should_close() {
            let report = self.frame(platform, ui);
            log::trace!("Frame {}: {:?}", self.frames, report);
        }
        log::info!("Frame loop exited after {} frames", self.frames);
    }

    /// Loop until the platform asks to close, then tear physics down
    pub fn run(mut self, platform: &mut impl Platform, ui: &mut impl Ui) -> B {
        self.run_loop(platform, ui);
        self.shutdown()
    }

    /// Release the physics backend. Consumes the app, so it runs once.
    pub fn shutdown(self) -> B {
        self.physics.cleanup()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn control(&self) -> &SimulationControl {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut SimulationControl {
        &mut self.control
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn physics_backend(&self) -> &B {
        self.physics.backend()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn ticks(&self) -> u64 {
        self.scheduler.ticks()
    }

    /// Keys waiting for the next tick
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn snapshots(&self) -> Vec<BodySnapshot> {
        body_snapshots(&self.world)
    }

    pub fn snapshot(&self, handle: BodyHandle) -> Option<BodySnapshot> {
        self.snapshots().into_iter().find(|s| s.handle == handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::SimplePhysics;
    use crate::physics::recording::{PhysicsCall, RecordingPhysics};
    use crate::platform::HeadlessPlatform;
    use crate::renderer::{PALETTE, RecordingGraphics, ScriptedUi, colors};
    use crate::sim::{KeyCode, SimState};

    type TestApp = App<RecordingPhysics, RecordingGraphics>;

    fn app() -> TestApp {
        App::new(
            Settings::default(),
            RecordingPhysics::default(),
            RecordingGraphics::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_invalid_settings_abort_startup() {
        let settings = Settings {
            tick_rate: 0,
            ..Default::default()
        };
        let result = App::new(settings, RecordingPhysics::default(), RecordingGraphics::default());
        assert!(matches!(result, Err(StartupError::ZeroTickRate)));
    }

    #[test]
    fn test_backend_failure_aborts_startup() {
        let result = App::new(
            Settings::default(),
            RecordingPhysics::failing(),
            RecordingGraphics::default(),
        );
        assert!(matches!(result, Err(StartupError::Physics(_))));
    }

    #[test]
    fn test_render_target_failure_aborts_startup() {
        let graphics = RecordingGraphics::with_max_target_size(64);
        let result = App::new(Settings::default(), RecordingPhysics::default(), graphics);
        assert!(matches!(result, Err(StartupError::Render(_))));
    }

    #[test]
    fn test_running_updates_every_frame() {
        let app = app();
        let mut platform = HeadlessPlatform::at_rate(60, 200);
        let mut ui = ScriptedUi::new();

        let backend = app.run(&mut platform, &mut ui);

        let balls = backend.count(|c| matches!(c, PhysicsCall::CreateBall(_)));
        assert_eq!(balls, 1);
        let first_update = backend
            .calls
            .iter()
            .position(|c| matches!(c, PhysicsCall::Update { .. }))
            .unwrap();
        let start = backend
            .calls
            .iter()
            .position(|c| *c == PhysicsCall::StartSimulation)
            .unwrap();
        let create = backend
            .calls
            .iter()
            .position(|c| matches!(c, PhysicsCall::CreateBall(_)))
            .unwrap();
        assert!(create < start && start < first_update);

        let updates = backend.updates();
        assert_eq!(updates.len(), 200);
        assert!(updates.iter().all(|(_, skip)| !skip));

        assert_eq!(backend.calls.last(), Some(&PhysicsCall::Cleanup));
        assert_eq!(backend.count(|c| *c == PhysicsCall::Cleanup), 1);
        assert_eq!(platform.target_fps(), Some(Settings::default().target_fps));
    }

    #[test]
    fn test_single_step_advances_once() {
        let mut app = app();
        let mut platform = HeadlessPlatform::at_rate(60, 10);
        let mut ui = ScriptedUi::new();

        app.control_mut().pause();
        app.control_mut().step();
        let before = app.physics_backend().updates().len();
        let report = app.frame(&mut platform, &mut ui);

        let updates = app.physics_backend().updates();
        let this_frame = &updates[before..];
        assert_eq!(this_frame.len(), report.physics.bodies);
        assert_eq!(this_frame.len(), 1);
        assert!(this_frame.iter().all(|(_, skip)| !skip));
        assert!(!app.control().step_requested());
        assert_eq!(app.control().state(), SimState::Paused);

        let before = updates.len();
        app.frame(&mut platform, &mut ui);
        let updates = app.physics_backend().updates();
        assert!(updates[before..].iter().all(|(_, skip)| *skip));
    }

    #[test]
    fn test_debug_toggle_waits_for_tick() {
        let mut app = app();
        // 60 Hz ticks against 240 Hz frames: ticks land on frames 5 and 10
        let mut platform = HeadlessPlatform::at_rate(240, 12).press_on(5, KeyCode::F9);
        let mut ui = ScriptedUi::new();

        let mut flips = Vec::new();
        let mut previous = app.debug_mode();
        for frame in 1..=12u64 {
            let report = app.frame(&mut platform, &mut ui);
            if report.debug_mode != previous {
                flips.push(frame);
                previous = report.debug_mode;
            }
            if frame == 5 {
                assert!(report.tick.ticked);
                assert_eq!(app.pending_input(), 1);
            }
        }

        assert_eq!(flips, vec![10]);
        assert!(app.debug_mode());
        assert_eq!(app.ticks(), 2);
    }

    #[test]
    fn test_colour_selection_leaves_bodies() {
        let mut app = app();
        // F9 polled on frame 1 is applied at the frame-2 tick
        let mut platform = HeadlessPlatform::at_rate(60, 10).press_on(1, KeyCode::F9);
        let mut ui = ScriptedUi::new();
        ui.click_on(3, PALETTE[2].0);

        app.frame(&mut platform, &mut ui);
        app.frame(&mut platform, &mut ui);
        assert!(app.debug_mode());
        assert_eq!(app.graphics().sphere_colours(), vec![colors::MAROON]);

        let before = app.snapshots();
        app.frame(&mut platform, &mut ui);
        assert_eq!(app.control().selected_colour(), 2);

        app.frame(&mut platform, &mut ui);
        assert_eq!(app.graphics().sphere_colours(), vec![PALETTE[2].1]);

        // Identity backend: nothing but the colour changed
        let after = app.snapshots();
        assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(&after) {
            assert_eq!(b.position, a.position);
            assert_eq!(b.velocity, a.velocity);
        }
    }

    #[test]
    fn test_debug_frame_shows_inspector() {
        let mut app = app();
        let mut platform = HeadlessPlatform::at_rate(60, 10).press_on(1, KeyCode::F9);
        let mut ui = ScriptedUi::new();

        app.frame(&mut platform, &mut ui);
        assert!(ui.events().is_empty());
        app.frame(&mut platform, &mut ui);
        assert!(ui.texts().contains(&"FPS: 60"));
    }

    #[test]
    fn test_simple_physics_drops_ball() {
        let mut app = App::new(
            Settings::default(),
            SimplePhysics::default(),
            RecordingGraphics::default(),
        )
        .unwrap();
        let mut platform = HeadlessPlatform::at_rate(60, 600);
        let mut ui = ScriptedUi::new();

        for _ in 0..60 {
            app.frame(&mut platform, &mut ui);
        }
        let ball = app.snapshots().remove(0);
        assert!(ball.position.y < crate::consts::BALL_POSITION.y);
        assert!(ball.velocity.y < 0.0);

        // Pausing freezes the ball exactly
        app.control_mut().pause();
        let frozen = app.snapshot(ball.handle).unwrap();
        for _ in 0..30 {
            app.frame(&mut platform, &mut ui);
        }
        let still = app.snapshot(ball.handle).unwrap();
        assert_eq!(frozen.position, still.position);
        assert_eq!(frozen.velocity, still.velocity);
    }
}
