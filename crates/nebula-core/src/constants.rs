// Shared visual and interaction tuning constants used by the core and the native frontend.

// Particle field
pub const DEFAULT_PARTICLE_COUNT: usize = 70_000;
pub const FIELD_RADIUS: f32 = 4.0; // solid sphere the base positions are sampled from
pub const SIZE_MIN: f32 = 0.2;
pub const SIZE_SPAN: f32 = 1.5; // size factor lies in [SIZE_MIN, SIZE_MIN + SIZE_SPAN]

// Signal smoothing rates (fraction of the remaining gap closed per frame)
pub const EXPANSION_RATE: f32 = 0.1;
pub const ROTATION_RATE: f32 = 0.1;
pub const HOVER_RATE: f32 = 0.05; // slower so detection toggles do not flicker
pub const NEUTRAL_EXPANSION: f32 = 0.5;
pub const HOVER_THRESHOLD: f32 = 0.5; // smoothed hover level above this selects the interactive regime

// Gesture calibration (normalized landmark units)
pub const OPEN_DISTANCE_MIN: f32 = 0.2; // mean wrist-to-fingertip distance of a closed fist
pub const OPEN_DISTANCE_MAX: f32 = 0.4; // mean wrist-to-fingertip distance of an open palm
pub const MIN_LANDMARKS: usize = 21;
pub const WRIST: usize = 0;
pub const MIDDLE_FINGER_BASE: usize = 9;
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];
pub const OPEN_HAND_THRESHOLD: f32 = 0.4; // status display only

// Ambient drift
pub const NOISE_FREQUENCY: f32 = 0.5;
pub const NOISE_TIME_SCALE: f32 = 0.2;
pub const AMBIENT_SCALE: f32 = 1.5;
pub const AMBIENT_NOISE_AMPLITUDE: f32 = 0.8;
pub const AMBIENT_ALPHA: f32 = 0.08;

// Contracted pose
pub const SHELL_RADIUS_MIN: f32 = 0.8;
pub const SHELL_RADIUS_SPAN: f32 = 0.4;
pub const VORTEX_WEIGHT: f32 = 0.3; // scaled by (1 - expansion)
pub const VORTEX_SPIN_BASE: f32 = 2.0; // polar angular speed, plus per-particle randomness
pub const VORTEX_RADIUS_MIN: f32 = 0.2; // polar radius factor when fully contracted
pub const VORTEX_HEIGHT_SCALE: f32 = 0.5;
pub const VORTEX_WOBBLE: f32 = 0.2;
pub const AGITATION_SPEED: f32 = 3.0;
pub const JITTER_AMPLITUDE: f32 = 0.1;

// Expanded pose
pub const BURST_SCALE_MIN: f32 = 3.0;
pub const BURST_SCALE_SPAN: f32 = 3.0;
pub const BURST_NOISE_AMPLITUDE: f32 = 1.5;

// Whole-cloud rotation (radians per second)
pub const IDLE_ROLL_SPEED: f32 = 0.1;
pub const DRIFT_YAW_SPEED: f32 = 0.05;

// Color and transparency
pub const PULSE_BASE: f32 = 0.8;
pub const PULSE_DEPTH: f32 = 0.2;
pub const PULSE_SPEED: f32 = 2.0;
pub const PULSE_DISTANCE_FALLOFF: f32 = 0.5;
pub const PULSE_PHASE_SPREAD: f32 = 5.0;
pub const FLICKER_DEPTH: f32 = 0.3;
pub const FLICKER_SPEED: f32 = 15.0;
pub const FLICKER_EXPANSION_MAX: f32 = 0.2; // flicker only below this expansion
pub const CONTRACTED_ALPHA: f32 = 0.02; // dense core, keep overlap from blowing out
pub const EXPANDED_ALPHA: f32 = 0.15;

// Point footprint
pub const TWINKLE_BASE: f32 = 0.8;
pub const TWINKLE_DEPTH: f32 = 0.2;
pub const TWINKLE_SPEED: f32 = 4.0;
pub const TWINKLE_PHASE_SPREAD: f32 = 100.0;
pub const POINT_SCALE: f32 = 150.0; // pixels at unit view depth
pub const MIN_VIEW_DEPTH: f32 = 0.1;

// Camera
pub const CAMERA_DISTANCE: f32 = 20.0;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 50.0;
pub const CAMERA_MIN_POLAR: f32 = std::f32::consts::PI / 3.0;
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI / 1.5;
pub const AUTO_ROTATE_RAD_PER_SEC: f32 = std::f32::consts::PI / 60.0;

// Gesture worker cadence (roughly one display refresh)
pub const POLL_INTERVAL_MS: u64 = 16;

// Default palette: deep blue -> teal -> aquamarine
pub const DEFAULT_THEME_LABEL: &str = "Default Nebula";
pub const DEFAULT_THEME_STOPS: [&str; 3] = ["#0F4C75", "#00CED1", "#7FFFD4"];
pub const BACKGROUND_HEX: &str = "#000510";

