//! Pointer-driven stand-in for a camera hand tracker.
//!
//! The cursor plays the role of the hand: horizontal position tilts it,
//! vertical position opens it (top of the window is an open palm, bottom a
//! fist). Landmarks are synthesized in the normalized image space a real
//! tracker would report.

use glam::Vec3;
use nebula_core::constants::{FINGERTIPS, MIDDLE_FINGER_BASE, MIN_LANDMARKS};
use nebula_core::{GestureSample, LandmarkDetector, Mailbox};
use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

const WRIST_AT: Vec3 = Vec3::new(0.5, 0.8, 0.0);
const PALM_LENGTH: f32 = 0.1;
// slightly past the calibration range so both extremes are reachable
const FIST_REACH: f32 = 0.15;
const PALM_REACH: f32 = 0.45;
const FINGER_FAN: [f32; 5] = [-0.5, -0.25, 0.0, 0.25, 0.5];

/// Cursor position normalized to the window, both axes in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

pub struct PointerHand {
    pointer: Arc<Mailbox<PointerSample>>,
}

impl PointerHand {
    pub fn new(pointer: Arc<Mailbox<PointerSample>>) -> Self {
        Self { pointer }
    }
}

impl LandmarkDetector for PointerHand {
    fn detect(&mut self) -> Option<GestureSample> {
        self.pointer.latest().map(synthesize)
    }
}

/// Landmarks for a hand rolled and opened according to `pointer`.
pub fn synthesize(pointer: PointerSample) -> GestureSample {
    let roll = (pointer.x.clamp(0.0, 1.0) - 0.5) * 2.0 * FRAC_PI_4;
    let reach = FIST_REACH + (1.0 - pointer.y.clamp(0.0, 1.0)) * (PALM_REACH - FIST_REACH);
    let along = |angle: f32, len: f32| WRIST_AT + Vec3::new(angle.sin(), -angle.cos(), 0.0) * len;

    let mut landmarks = [WRIST_AT; MIN_LANDMARKS];
    landmarks[MIDDLE_FINGER_BASE] = along(roll, PALM_LENGTH);
    for (tip, fan) in FINGERTIPS.iter().zip(FINGER_FAN) {
        landmarks[*tip] = along(roll + fan, reach);
    }
    GestureSample::new(landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nebula_core::{interpret, Calibration};

    #[test]
    fn top_of_window_is_an_open_palm() {
        let pose = interpret(&synthesize(PointerSample { x: 0.5, y: 0.0 }), &Calibration::default())
            .unwrap();
        assert_eq!(pose.openness, 1.0);
        assert!(pose.roll.abs() < 1e-5);
    }

    #[test]
    fn bottom_of_window_is_a_fist() {
        let pose = interpret(&synthesize(PointerSample { x: 0.5, y: 1.0 }), &Calibration::default())
            .unwrap();
        assert_eq!(pose.openness, 0.0);
    }

    #[test]
    fn horizontal_position_rolls_the_hand() {
        let calibration = Calibration::default();
        let right = interpret(&synthesize(PointerSample { x: 1.0, y: 0.5 }), &calibration).unwrap();
        let left = interpret(&synthesize(PointerSample { x: 0.0, y: 0.5 }), &calibration).unwrap();
        assert!((right.roll - FRAC_PI_4).abs() < 1e-4);
        assert!((left.roll + FRAC_PI_4).abs() < 1e-4);
    }

    #[test]
    fn no_pointer_means_no_hand() {
        let mut hand = PointerHand::new(Arc::new(Mailbox::new()));
        assert!(hand.detect().is_none());
    }
}
