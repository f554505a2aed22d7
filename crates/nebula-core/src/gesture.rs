//! Hand landmarks -> openness and roll.
//!
//! [`interpret`] is a pure geometric mapping with no memory. [`GestureFilter`]
//! sits on top of it on the worker side, smoothing the raw values and holding
//! the last known pose while the hand is lost.

use glam::Vec3;
use smallvec::SmallVec;
use std::f32::consts::FRAC_PI_2;

use crate::constants::{
    EXPANSION_RATE, FINGERTIPS, MIDDLE_FINGER_BASE, MIN_LANDMARKS, NEUTRAL_EXPANSION,
    OPEN_DISTANCE_MAX, OPEN_DISTANCE_MIN, OPEN_HAND_THRESHOLD, ROTATION_RATE, WRIST,
};
use crate::smoothing::smooth;

/// Normalized landmarks of one tracked hand for a single camera frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureSample {
    landmarks: SmallVec<[Vec3; MIN_LANDMARKS]>,
}

impl GestureSample {
    pub fn new(landmarks: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            landmarks: landmarks.into_iter().collect(),
        }
    }

    pub fn landmarks(&self) -> &[Vec3] {
        &self.landmarks
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

/// Empirical wrist-to-fingertip range mapped onto openness 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    pub closed_distance: f32,
    pub open_distance: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            closed_distance: OPEN_DISTANCE_MIN,
            open_distance: OPEN_DISTANCE_MAX,
        }
    }
}

impl Calibration {
    /// Linear map of a mean fingertip distance onto [0, 1], clamped.
    pub fn openness(&self, mean_distance: f32) -> f32 {
        let span = self.open_distance - self.closed_distance;
        if span <= f32::EPSILON {
            return if mean_distance >= self.open_distance { 1.0 } else { 0.0 };
        }
        ((mean_distance - self.closed_distance) / span).clamp(0.0, 1.0)
    }
}

/// Raw, unsmoothed reading of a detected hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    /// 0 = fist, 1 = open palm.
    pub openness: f32,
    /// Roll in radians, 0 when the hand is upright in the image.
    pub roll: f32,
}

/// Mean distance from the wrist to the five fingertips.
fn mean_fingertip_distance(landmarks: &[Vec3]) -> f32 {
    let wrist = landmarks[WRIST];
    let total: f32 = FINGERTIPS
        .iter()
        .map(|&tip| landmarks[tip].distance(wrist))
        .sum();
    total / FINGERTIPS.len() as f32
}

/// Roll of the wrist -> middle-finger-base axis in the image plane.
///
/// Image y grows downward, so an upright hand points along -y and maps to 0.
fn roll_angle(landmarks: &[Vec3]) -> f32 {
    let wrist = landmarks[WRIST];
    let base = landmarks[MIDDLE_FINGER_BASE];
    let dx = base.x - wrist.x;
    let dy = base.y - wrist.y;
    dy.atan2(dx) + FRAC_PI_2
}

/// Interpret one sample. `None` means no usable hand in this frame.
///
/// A sample whose wrist, palm or fingertip points are not finite counts as
/// no detection, so it can never poison the smoothed state.
pub fn interpret(sample: &GestureSample, calibration: &Calibration) -> Option<HandPose> {
    let landmarks = sample.landmarks();
    if landmarks.len() < MIN_LANDMARKS {
        return None;
    }
    let read = [WRIST, MIDDLE_FINGER_BASE].into_iter().chain(FINGERTIPS);
    if !read.map(|i| landmarks[i]).all(|p| p.is_finite()) {
        return None;
    }
    Some(HandPose {
        openness: calibration.openness(mean_fingertip_distance(landmarks)),
        roll: roll_angle(landmarks),
    })
}

/// Smoothed hand state published by the gesture worker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandState {
    pub expansion: f32,
    /// Already sign-inverted for the mirrored camera view.
    pub rotation: f32,
    pub detected: bool,
}

impl Default for HandState {
    fn default() -> Self {
        Self {
            expansion: NEUTRAL_EXPANSION,
            rotation: 0.0,
            detected: false,
        }
    }
}

impl HandState {
    /// Whether the status display should show the palm as open.
    pub fn is_open(&self) -> bool {
        self.expansion > OPEN_HAND_THRESHOLD
    }
}

/// Worker-side smoothing of interpreter output.
#[derive(Clone, Debug)]
pub struct GestureFilter {
    pub calibration: Calibration,
    pub expansion_rate: f32,
    pub rotation_rate: f32,
    expansion: f32,
    rotation: f32,
}

impl Default for GestureFilter {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}

impl GestureFilter {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            calibration,
            expansion_rate: EXPANSION_RATE,
            rotation_rate: ROTATION_RATE,
            expansion: NEUTRAL_EXPANSION,
            rotation: 0.0,
        }
    }

    /// Fold one detector result into the smoothed state.
    ///
    /// A missing hand leaves the smoothed values untouched.
    pub fn update(&mut self, sample: Option<&GestureSample>) -> HandState {
        match sample.and_then(|s| interpret(s, &self.calibration)) {
            Some(pose) => {
                self.expansion = smooth(self.expansion, pose.openness, self.expansion_rate);
                self.rotation = smooth(self.rotation, pose.roll, self.rotation_rate);
                self.state(true)
            }
            None => self.state(false),
        }
    }

    fn state(&self, detected: bool) -> HandState {
        HandState {
            expansion: self.expansion,
            rotation: -self.rotation,
            detected,
        }
    }

    pub fn reset(&mut self) {
        self.expansion = NEUTRAL_EXPANSION;
        self.rotation = 0.0;
    }
}
