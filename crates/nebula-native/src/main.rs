mod gemini;
mod gpu;
mod prompt;
mod simulated;

use std::sync::mpsc::TryRecvError;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use gemini::GeminiService;
use gpu::GpuState;
use nebula_core::{
    AppMode, HandTracker, LandmarkDetector, Mailbox, NebulaConfig, OrbitCamera, PaletteService,
    Scene, ThemeGenerator, ThemeSource,
};
use prompt::PromptCommand;
use simulated::{PointerHand, PointerSample};

// wheel pixels per zoom step on touchpads
const PIXELS_PER_ZOOM_STEP: f32 = 50.0;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = NebulaConfig::from_env()?;
    let mut scene = Scene::new(&config)?;

    // The cursor stands in for the camera hand tracker
    let pointer = Arc::new(Mailbox::<PointerSample>::new());
    let mut tracker = HandTracker::new(config.calibration);
    {
        let pointer = Arc::clone(&pointer);
        tracker.load(move || {
            Ok(Box::new(PointerHand::new(pointer)) as Box<dyn LandmarkDetector>)
        });
    }

    let service = config.api_key.clone().map(|key| {
        Arc::new(GeminiService::new(key, config.palette_model.clone())) as Arc<dyn PaletteService>
    });
    let mut generator = ThemeGenerator::new(service);
    let commands = prompt::spawn_reader()?;

    log::info!("Space: toggle interactive | R: rebuild field | Esc: quit");
    log::info!("drag: orbit | wheel: zoom | type a mood, or `near|mid|far #RRGGBB`, then Enter");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("nebula")
        .with_inner_size(LogicalSize::new(1280.0, 800.0))
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, config.particle_count))?;
    let mut orbit = OrbitCamera::default();
    let start = Instant::now();
    let mut last_frame = start;
    let mut cursor: Option<PhysicalPosition<f64>> = None;
    let mut dragging = false;
    let mut title = String::new();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => state.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key {
                Key::Named(NamedKey::Escape) => elwt.exit(),
                Key::Named(NamedKey::Space) => {
                    scene.toggle_mode(&mut tracker);
                }
                Key::Character(c) if c.as_str().eq_ignore_ascii_case("r") => {
                    if let Err(e) = scene.rebuild(config.particle_count) {
                        log::error!("[scene] rebuild failed: {e}");
                    }
                }
                _ => {}
            },
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                dragging = button_state == ElementState::Pressed;
                if dragging {
                    // the hand lets go while the camera is being moved
                    pointer.clear();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if dragging {
                    if let Some(prev) = cursor {
                        orbit.orbit(
                            (position.x - prev.x) as f32,
                            (position.y - prev.y) as f32,
                            state.height(),
                        );
                    }
                } else {
                    let size = state.window.inner_size();
                    pointer.publish(PointerSample {
                        x: position.x as f32 / size.width.max(1) as f32,
                        y: position.y as f32 / size.height.max(1) as f32,
                    });
                }
                cursor = Some(position);
            }
            WindowEvent::CursorLeft { .. } => {
                cursor = None;
                pointer.clear();
            }
            WindowEvent::MouseWheel { delta, .. } => match delta {
                MouseScrollDelta::LineDelta(_, y) => orbit.zoom(y),
                MouseScrollDelta::PixelDelta(p) => orbit.zoom(p.y as f32 / PIXELS_PER_ZOOM_STEP),
            },
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            let dt = (now - last_frame).as_secs_f32();
            last_frame = now;
            let elapsed = (now - start).as_secs_f32();

            loop {
                match commands.try_recv() {
                    Ok(PromptCommand::Generate(mood)) => {
                        if let Err(e) = generator.submit(&mood) {
                            log::warn!("[theme] {e}");
                        }
                    }
                    Ok(PromptCommand::SetStop(stop, color)) => {
                        if let Err(e) = scene.themes_mut().apply(ThemeSource::ManualStop(stop, color)) {
                            log::warn!("[theme] {e}");
                        }
                    }
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            }
            generator.poll(scene.themes_mut());
            scene.update_mode(&mut tracker);

            orbit.update(dt, scene.mode() == AppMode::Autopilot);
            let camera = orbit.camera(state.aspect());
            let view = camera.view_matrix();
            let hand = tracker.latest();
            let particles = scene.frame(elapsed, hand, view);
            match state.render(particles, camera.projection_matrix() * view) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }

            let status = scene.status_line(hand, generator.status());
            if status != title {
                state.window.set_title(&status);
                title = status;
            }
        }
        _ => {}
    })?;
    Ok(())
}
