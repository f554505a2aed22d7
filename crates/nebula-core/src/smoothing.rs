//! Exponential smoothing of noisy control values.
//!
//! The smoother is an explicit state object owned by whoever drives the frame
//! loop, so the data flow of a frame can be followed (and tested) without any
//! ambient state.

use crate::constants::{
    EXPANSION_RATE, HOVER_RATE, HOVER_THRESHOLD, NEUTRAL_EXPANSION, ROTATION_RATE,
};

/// Move `previous` toward `target` by `rate` of the remaining gap.
///
/// `rate` is expected in (0, 1]; a rate of 1 jumps straight to the target.
#[inline]
pub fn smooth(previous: f32, target: f32, rate: f32) -> f32 {
    debug_assert!(rate > 0.0 && rate <= 1.0, "smoothing rate {rate} out of range");
    previous + (target - previous) * rate
}

/// Per-signal smoothing rates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingRates {
    pub expansion: f32,
    pub rotation: f32,
    pub hover: f32,
}

impl Default for SmoothingRates {
    fn default() -> Self {
        Self {
            expansion: EXPANSION_RATE,
            rotation: ROTATION_RATE,
            hover: HOVER_RATE,
        }
    }
}

/// Raw per-frame targets before smoothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlTarget {
    pub expansion: f32,
    pub rotation: f32,
    pub hovering: bool,
}

impl ControlTarget {
    /// Targets used whenever no tracked hand is steering the cloud.
    pub const NEUTRAL: Self = Self {
        expansion: NEUTRAL_EXPANSION,
        rotation: 0.0,
        hovering: false,
    };
}

/// The smoothed control vector consumed by the deformation engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSignal {
    /// 0 = fully contracted, 1 = fully expanded.
    pub expansion: f32,
    pub hovering: bool,
    /// Roll of the whole cloud in radians (interactive regime only).
    pub rotation: f32,
    pub elapsed: f32,
}

impl ControlSignal {
    /// Autopilot signal at `elapsed` seconds.
    pub fn ambient(elapsed: f32) -> Self {
        Self {
            expansion: NEUTRAL_EXPANSION,
            hovering: false,
            rotation: 0.0,
            elapsed,
        }
    }
}

/// Session-scoped "last known" values of the three smoothed signals.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalSmoother {
    pub rates: SmoothingRates,
    expansion: f32,
    rotation: f32,
    hover_level: f32,
}

impl Default for SignalSmoother {
    fn default() -> Self {
        Self::new(SmoothingRates::default())
    }
}

impl SignalSmoother {
    pub fn new(rates: SmoothingRates) -> Self {
        Self {
            rates,
            expansion: NEUTRAL_EXPANSION,
            rotation: 0.0,
            hover_level: 0.0,
        }
    }

    /// Advance every signal one frame toward `target` and emit the signal for `elapsed`.
    pub fn step(&mut self, target: ControlTarget, elapsed: f32) -> ControlSignal {
        self.expansion = smooth(self.expansion, target.expansion, self.rates.expansion);
        self.rotation = smooth(self.rotation, target.rotation, self.rates.rotation);
        let hover_target = if target.hovering { 1.0 } else { 0.0 };
        self.hover_level = smooth(self.hover_level, hover_target, self.rates.hover);
        self.signal(elapsed)
    }

    /// Current smoothed state as a signal, without advancing.
    pub fn signal(&self, elapsed: f32) -> ControlSignal {
        ControlSignal {
            expansion: self.expansion.clamp(0.0, 1.0),
            hovering: self.hover_level > HOVER_THRESHOLD,
            rotation: self.rotation,
            elapsed: elapsed.max(0.0),
        }
    }

    /// Return to neutral: expansion 0.5, no rotation, not hovering.
    pub fn reset(&mut self) {
        self.expansion = NEUTRAL_EXPANSION;
        self.rotation = 0.0;
        self.hover_level = 0.0;
    }

    pub fn expansion(&self) -> f32 {
        self.expansion
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn hover_level(&self) -> f32 {
        self.hover_level
    }
}
