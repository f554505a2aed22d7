// Tests for per-frame session wiring and the orbit camera.

use glam::{Mat4, Vec3};
use nebula_core::constants::*;
use nebula_core::*;
use std::thread;
use std::time::{Duration, Instant};

struct NoHand;

impl LandmarkDetector for NoHand {
    fn detect(&mut self) -> Option<GestureSample> {
        None
    }
}

fn scene(count: usize) -> Scene {
    let config = NebulaConfig {
        particle_count: count,
        seed: Some(17),
        ..NebulaConfig::default()
    };
    Scene::new(&config).unwrap()
}

fn view() -> Mat4 {
    OrbitCamera::default().camera(1.0).view_matrix()
}

fn interactive_tracker() -> HandTracker {
    let tracker = HandTracker::default();
    tracker.load(|| Ok(Box::new(NoHand) as Box<dyn LandmarkDetector>));
    let deadline = Instant::now() + Duration::from_secs(5);
    while !tracker.is_ready() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    tracker
}

#[test]
fn frame_produces_one_instance_per_particle() {
    let mut scene = scene(1_000);
    assert_eq!(scene.frame(0.0, None, view()).len(), 1_000);
    assert_eq!(scene.mode(), AppMode::Autopilot);
}

#[test]
fn hand_is_ignored_in_autopilot() {
    let mut scene = scene(100);
    let hand = HandState {
        expansion: 1.0,
        rotation: 1.0,
        detected: true,
    };
    for i in 0..60 {
        scene.frame(i as f32 / 60.0, Some(hand), view());
    }
    let signal = scene.signal();
    assert!(!signal.hovering);
    assert_eq!(signal.expansion, 0.5);
    assert_eq!(signal.rotation, 0.0);
}

#[test]
fn interactive_mode_follows_the_hand_and_resets_on_exit() {
    let mut scene = scene(100);
    let mut tracker = interactive_tracker();
    assert_eq!(scene.toggle_mode(&mut tracker), AppMode::Interactive);

    let hand = HandState {
        expansion: 1.0,
        rotation: -0.4,
        detected: true,
    };
    for i in 0..120 {
        scene.frame(i as f32 / 60.0, Some(hand), view());
    }
    let signal = scene.signal();
    assert!(signal.hovering);
    assert!(signal.expansion > 0.99);
    assert!((signal.rotation + 0.4).abs() < 1e-3);

    assert_eq!(scene.toggle_mode(&mut tracker), AppMode::Autopilot);
    scene.frame(2.0, Some(hand), view());
    let signal = scene.signal();
    assert!(!signal.hovering);
    assert_eq!(signal.expansion, 0.5);
}

#[test]
fn lost_hand_drops_out_of_the_interactive_regime() {
    let mut scene = scene(100);
    let mut tracker = interactive_tracker();
    scene.toggle_mode(&mut tracker);
    let seen = HandState {
        expansion: 0.2,
        rotation: 0.0,
        detected: true,
    };
    for _ in 0..60 {
        scene.frame(0.0, Some(seen), view());
    }
    assert!(scene.signal().hovering);
    let lost = HandState {
        detected: false,
        ..seen
    };
    for _ in 0..60 {
        scene.frame(0.0, Some(lost), view());
    }
    assert!(!scene.signal().hovering);
    scene.disengage(&mut tracker);
}

#[test]
fn rebuild_replaces_the_field() {
    let mut scene = scene(300);
    scene.rebuild(50).unwrap();
    assert_eq!(scene.field().len(), 50);
    assert_eq!(scene.frame(0.5, None, view()).len(), 50);
    assert_eq!(scene.rebuild(0), Err(FieldError::EmptyField));
    assert_eq!(scene.field().len(), 50);
}

#[test]
fn status_line_reports_mode_and_theme() {
    let mut scene = scene(10);
    let line = scene.status_line(None, GenerationStatus::Idle);
    assert!(line.contains("autopilot"));
    assert!(line.contains("Default Nebula"));

    scene
        .themes_mut()
        .apply(ThemeSource::ManualStop(ThemeStop::Far, Rgb::new(1, 2, 3)))
        .unwrap();
    let line = scene.status_line(None, GenerationStatus::Error);
    assert!(line.contains("generation failed"));
}

#[test]
fn status_line_shows_the_sensor_readout() {
    let mut scene = scene(10);
    let mut tracker = interactive_tracker();
    scene.toggle_mode(&mut tracker);
    assert!(scene
        .status_line(None, GenerationStatus::Idle)
        .contains("sensor searching"));
    let hand = HandState {
        expansion: 0.75,
        rotation: 0.0,
        detected: true,
    };
    let line = scene.status_line(Some(hand), GenerationStatus::Generating);
    assert!(line.contains("sensor online"));
    assert!(line.contains("open 75%"));
    assert!(line.contains("generating"));
    scene.disengage(&mut tracker);
}

#[test]
fn orbit_camera_starts_on_the_view_axis() {
    let orbit = OrbitCamera::default();
    assert!((orbit.eye() - Vec3::new(0.0, 0.0, CAMERA_DISTANCE)).length() < 1e-4);
    let camera = orbit.camera(16.0 / 9.0);
    assert!((camera.fovy_radians - 60f32.to_radians()).abs() < 1e-6);
    let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
    assert!((origin_in_view.z + CAMERA_DISTANCE).abs() < 1e-3);
}

#[test]
fn orbit_camera_clamps_zoom_and_polar_angle() {
    let mut orbit = OrbitCamera::default();
    orbit.zoom(1_000.0);
    assert_eq!(orbit.distance, CAMERA_MIN_DISTANCE);
    orbit.zoom(-1_000.0);
    assert_eq!(orbit.distance, CAMERA_MAX_DISTANCE);

    orbit.orbit(0.0, 10_000.0, 800.0);
    assert_eq!(orbit.polar, CAMERA_MIN_POLAR);
    orbit.orbit(0.0, -10_000.0, 800.0);
    assert_eq!(orbit.polar, CAMERA_MAX_POLAR);
}

#[test]
fn auto_rotate_only_when_enabled() {
    let mut orbit = OrbitCamera::default();
    orbit.update(1.0, false);
    assert_eq!(orbit.azimuth, 0.0);
    orbit.update(2.0, true);
    assert!((orbit.azimuth - 2.0 * AUTO_ROTATE_RAD_PER_SEC).abs() < 1e-6);
}
