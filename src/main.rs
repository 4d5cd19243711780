//! Ball Sandbox entry point
//!
//! Runs the frame loop headless against the built-in physics backend and a
//! recording graphics backend, with a short scripted session: open the
//! inspector, pause, step twice, recolour the ball, resume.

use anyhow::Result;

use ball_sandbox::physics::SimplePhysics;
use ball_sandbox::platform::HeadlessPlatform;
use ball_sandbox::renderer::{PALETTE, RecordingGraphics, ScriptedUi};
use ball_sandbox::sim::KeyCode;
use ball_sandbox::{App, Settings};

/// Ten seconds at the default frame rate
const FRAMES: u64 = 600;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Ball Sandbox (headless) starting...");

    let settings = Settings::default();
    let mut platform =
        HeadlessPlatform::at_rate(settings.target_fps, FRAMES).press_on(10, KeyCode::F9);

    let mut ui = ScriptedUi::new();
    ui.click_on(120, "Pause");
    ui.click_on(150, "Step");
    ui.click_on(180, "Step");
    ui.click_on(200, PALETTE[2].0);
    ui.click_on(240, "Play");

    let mut app = App::new(settings, SimplePhysics::default(), RecordingGraphics::default())?;
    log::info!("Initial bodies: {}", serde_json::to_string(&app.snapshots())?);

    app.run_loop(&mut platform, &mut ui);

    log::info!(
        "{} frames, {} ticks, colour '{}'",
        app.frames(),
        app.ticks(),
        PALETTE[app.control().selected_colour()].0
    );
    println!("{}", serde_json::to_string_pretty(&app.snapshots())?);

    app.shutdown();
    Ok(())
}
