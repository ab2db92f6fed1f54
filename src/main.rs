use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use rts_camera::cli::Cli;
use rts_camera::frame::{FixedHz, FrameClock};
use rts_camera::{
    CameraPose, GroundPlane, Heightfield, InputSnapshot, Key, RtsCamera, RtsCameraConfig, Shape,
    TerrainScene, TriangleMesh, Viewport, WinitInput,
};

// === Constants ===

const INITIAL_WINDOW_WIDTH: u32 = 1280;
const INITIAL_WINDOW_HEIGHT: u32 = 720;
const TITLE_UPDATE_HZ: f32 = 4.0;
const GROUND_LAYER: u8 = 0;
const TERRAIN_LAYER: u8 = 1;

// === Scene ===

/// Flat ground with either a loaded mesh or procedural hills on top
fn build_scene(cli: &Cli) -> Result<TerrainScene> {
    let mut scene = TerrainScene::new("demo terrain")
        .with_collider(GROUND_LAYER, Shape::Plane(GroundPlane::new(0.0)));

    match &cli.terrain {
        Some(path) => {
            let mesh = TriangleMesh::from_gltf(path)?;
            scene.add(TERRAIN_LAYER, Shape::Mesh(mesh));
        }
        None => {
            let hills = Heightfield::from_fn(Vec2::splat(-60.0), 2.0, 61, 61, |x, z| {
                let ridge = (x * 0.08).sin() * (z * 0.06).cos() * 3.0;
                let mound = 6.0 * (-(x - 15.0).powi(2) / 120.0 - (z - 10.0).powi(2) / 120.0).exp();
                (ridge + mound).max(0.0)
            })?;
            scene.add(TERRAIN_LAYER, Shape::Heightfield(hills));
        }
    }

    Ok(scene)
}

fn load_config(cli: &Cli) -> Result<RtsCameraConfig> {
    match &cli.config {
        Some(path) => RtsCameraConfig::load(path),
        None => Ok(RtsCameraConfig::default()),
    }
}

fn build_rig(cli: &Cli, viewport: Viewport) -> Result<RtsCamera> {
    let config = load_config(cli)?;
    let scene = build_scene(cli)?;

    let mut rig = RtsCamera::new(CameraPose::default(), viewport, Box::new(scene));
    rig.initialize(config);
    Ok(rig)
}

fn describe(pose: &CameraPose) -> String {
    format!(
        "RTS Camera - pos ({:.1}, {:.1}, {:.1}) pitch {:.1} yaw {:.1}",
        pose.position.x, pose.position.y, pose.position.z, pose.pitch, pose.yaw
    )
}

// === Headless ===

/// Scripted input for frame `index` of `total`: pan, zoom toward the ground,
/// rotate, then rest
fn scripted_input(index: u64, total: u64, viewport: &Viewport) -> InputSnapshot {
    let center = viewport.center();
    let phase = index * 4 / total.max(1);

    match phase {
        0 => InputSnapshot::at(center).with_move(Vec2::new(0.3, 1.0)),
        1 => InputSnapshot::at(center + Vec2::new(120.0, -60.0)).with_scroll(-1.0),
        2 => InputSnapshot::at(center).with_key(Key::X),
        _ => InputSnapshot::at(center),
    }
}

fn run_headless(cli: &Cli) -> Result<()> {
    let viewport = Viewport::new(INITIAL_WINDOW_WIDTH as f32, INITIAL_WINDOW_HEIGHT as f32);
    let mut rig = build_rig(cli, viewport)?;
    let mut clock = FrameClock::fixed(cli.dt);

    log::info!("Running {} headless frames at dt = {}", cli.frames, cli.dt);

    for frame in clock.by_ref().take(cli.frames as usize) {
        let input = scripted_input(frame.number, cli.frames, rig.viewport());
        rig.update(frame.delta, &input);

        if frame.number % 60 == 0 {
            log::info!("Frame {}: {}", frame.number, describe(rig.pose()));
        }
    }

    let pose = serde_json::to_string_pretty(rig.pose()).context("Failed to serialize final pose")?;
    println!("{}", pose);
    Ok(())
}

// === Windowed ===

struct App {
    cli: Cli,
    window: Option<Arc<Window>>,
    rig: Option<RtsCamera>,
    input: WinitInput,
    clock: FrameClock,
    title_timer: FixedHz,
}

impl App {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            rig: None,
            input: WinitInput::new(INITIAL_WINDOW_HEIGHT as f32),
            clock: FrameClock::new(),
            title_timer: FixedHz::new(TITLE_UPDATE_HZ),
        }
    }

    fn redraw(&mut self) {
        let frame = self.clock.tick();

        if let Some(rig) = &mut self.rig {
            rig.update(frame.delta, &self.input);

            if self.title_timer.tick(frame.delta) {
                if let Some(window) = &self.window {
                    window.set_title(&describe(rig.pose()));
                }
            }
        }

        self.input.end_frame();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title("RTS Camera")
                .with_inner_size(winit::dpi::LogicalSize::new(
                    INITIAL_WINDOW_WIDTH,
                    INITIAL_WINDOW_HEIGHT,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let viewport = Viewport::new(size.width as f32, size.height as f32);
        self.input = WinitInput::new(viewport.height);

        match build_rig(&self.cli, viewport) {
            Ok(rig) => self.rig = Some(rig),
            Err(e) => {
                log::error!("Failed to set up camera rig: {:#}", e);
                event_loop.exit();
                return;
            }
        }

        self.clock.reset();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::Resized(size) => {
                self.input.process_event(&event);
                if let Some(rig) = &mut self.rig {
                    let mut viewport = *rig.viewport();
                    viewport.width = size.width as f32;
                    viewport.height = size.height as f32;
                    rig.set_viewport(viewport);
                }
            }
            WindowEvent::Focused(true) => {
                self.input.process_event(&event);
                self.clock.reset();
            }
            other => self.input.process_event(&other),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.headless {
        return run_headless(&cli);
    }

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli);

    log::info!(
        "RTS Camera - WASD/arrows move, Q/E zoom, Z/X rotate, middle drag pans, right drag orbits, Escape quits"
    );
    event_loop.run_app(&mut app)?;

    if let Some(rig) = &app.rig {
        log::info!("Exited at {}", describe(rig.pose()));
    }
    Ok(())
}
