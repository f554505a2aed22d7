//! Per-frame particle deformation.
//!
//! Every particle's output is a pure function of its immutable attributes,
//! the frame's [`ControlSignal`] and the theme, so the loop is split across
//! worker threads with no shared mutable state. Everything that only depends
//! on the frame (rotation, alpha, flicker) is computed once in
//! [`FrameUniforms::new`].

use glam::{Mat3, Mat4, Vec3};
use rayon::prelude::*;

use crate::constants::*;
use crate::field::{Particle, ParticleField};
use crate::noise::{drift3, simplex3};
use crate::smoothing::ControlSignal;
use crate::theme::ThemeColors;

/// Top-level behavior of the engine for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Regime {
    /// Autopilot drift.
    Ambient,
    /// Gesture-driven contraction and expansion.
    Interactive,
}

impl Regime {
    pub fn of(signal: &ControlSignal) -> Self {
        if signal.hovering {
            Regime::Interactive
        } else {
            Regime::Ambient
        }
    }
}

/// One particle's visual output, laid out for direct upload as GPU instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderedParticle {
    pub position: [f32; 3],
    /// Point footprint in pixels.
    pub size: f32,
    pub color: [f32; 3],
    pub alpha: f32,
}

/// Values shared by every particle in a frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameUniforms {
    pub signal: ControlSignal,
    pub regime: Regime,
    pub colors: ThemeColors,
    pub rotation: Mat3,
    pub view: Mat4,
    pub alpha: f32,
    pub flicker: f32,
}

impl FrameUniforms {
    pub fn new(signal: ControlSignal, colors: ThemeColors, view: Mat4) -> Self {
        let regime = Regime::of(&signal);
        let t = signal.elapsed;
        let alpha = match regime {
            Regime::Ambient => AMBIENT_ALPHA,
            Regime::Interactive => lerp(CONTRACTED_ALPHA, EXPANDED_ALPHA, signal.expansion),
        };
        let flicker = if regime == Regime::Interactive && signal.expansion < FLICKER_EXPANSION_MAX {
            FLICKER_DEPTH * (t * FLICKER_SPEED).sin()
        } else {
            0.0
        };
        Self {
            signal,
            regime,
            colors,
            rotation: cloud_rotation(&signal),
            view,
            alpha,
            flicker,
        }
    }
}

/// Rotation applied to the whole cloud.
///
/// A roll about the view axis (idle spin in autopilot, the gesture angle when
/// interactive) composed with a slow yaw drift about the vertical axis.
pub fn cloud_rotation(signal: &ControlSignal) -> Mat3 {
    let t = signal.elapsed;
    let roll = match Regime::of(signal) {
        Regime::Ambient => t * IDLE_ROLL_SPEED,
        Regime::Interactive => signal.rotation,
    };
    let yaw = t * DRIFT_YAW_SPEED;
    Mat3::from_rotation_z(-roll) * Mat3::from_rotation_y(-yaw)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn drift_noise(base: Vec3, t: f32) -> Vec3 {
    drift3(base * NOISE_FREQUENCY, t * NOISE_TIME_SCALE)
}

/// Autopilot position: scaled base plus organic drift.
#[inline]
pub fn ambient_position(base: Vec3, t: f32) -> Vec3 {
    base * AMBIENT_SCALE + drift_noise(base, t) * AMBIENT_NOISE_AMPLITUDE
}

/// Fist pose: a thin shell swirled into a vortex, agitated by jitter.
pub fn contracted_position(base: Vec3, randomness: f32, expansion: f32, t: f32) -> Vec3 {
    let fist = 1.0 - expansion;
    let shell = base.normalize_or_zero() * (SHELL_RADIUS_MIN + randomness * SHELL_RADIUS_SPAN);

    let angle = base.z.atan2(base.x) + t * (VORTEX_SPIN_BASE + randomness);
    let radius = Vec3::new(base.x, 0.0, base.z).length()
        * (VORTEX_RADIUS_MIN + (1.0 - VORTEX_RADIUS_MIN) * expansion);
    let vortex = Vec3::new(
        angle.cos() * radius,
        base.y * VORTEX_HEIGHT_SCALE + (t * AGITATION_SPEED + base.x).sin() * VORTEX_WOBBLE * fist,
        angle.sin() * radius,
    );

    let ta = t * AGITATION_SPEED;
    let jitter = Vec3::new(
        simplex3(Vec3::new(base.x, ta, base.z)),
        simplex3(Vec3::new(ta, base.y, base.z)),
        simplex3(Vec3::new(base.x, base.y, ta)),
    ) * JITTER_AMPLITUDE
        * fist;

    shell.lerp(vortex, VORTEX_WEIGHT * fist) + jitter
}

/// Open-palm pose: an outward burst.
#[inline]
pub fn expanded_position(base: Vec3, randomness: f32, t: f32) -> Vec3 {
    base * (BURST_SCALE_MIN + randomness * BURST_SCALE_SPAN)
        + drift_noise(base, t) * BURST_NOISE_AMPLITUDE
}

/// Interactive position, blended between the two poses by `expansion`.
pub fn interactive_position(base: Vec3, randomness: f32, expansion: f32, t: f32) -> Vec3 {
    contracted_position(base, randomness, expansion, t)
        .lerp(expanded_position(base, randomness, t), expansion)
}

/// Position before the whole-cloud rotation.
#[inline]
pub fn local_position(particle: &Particle, signal: &ControlSignal) -> Vec3 {
    match Regime::of(signal) {
        Regime::Ambient => ambient_position(particle.base_position, signal.elapsed),
        Regime::Interactive => interactive_position(
            particle.base_position,
            particle.randomness,
            signal.expansion,
            signal.elapsed,
        ),
    }
}

/// Small sinusoidal size oscillation.
#[inline]
pub fn twinkle(t: f32, randomness: f32) -> f32 {
    TWINKLE_BASE + TWINKLE_DEPTH * (t * TWINKLE_SPEED + randomness * TWINKLE_PHASE_SPREAD).sin()
}

/// Pixel scale of a point `view_depth` units in front of the camera.
#[inline]
pub fn perspective_scale(view_depth: f32) -> f32 {
    POINT_SCALE / view_depth.max(MIN_VIEW_DEPTH)
}

/// Brightness pulse travelling outward from the center.
#[inline]
pub fn pulse(t: f32, distance: f32, randomness: f32) -> f32 {
    PULSE_BASE
        + PULSE_DEPTH
            * (t * PULSE_SPEED - distance * PULSE_DISTANCE_FALLOFF + randomness * PULSE_PHASE_SPREAD)
                .sin()
}

/// Evaluate one particle.
pub fn deform_particle(particle: &Particle, frame: &FrameUniforms) -> RenderedParticle {
    let t = frame.signal.elapsed;
    let position = frame.rotation * local_position(particle, &frame.signal);

    let base_color = frame.colors.sample(particle.gradient_position);
    let brightness = pulse(t, position.length(), particle.randomness) + frame.flicker;
    let color = base_color * brightness;

    let view_depth = -frame.view.transform_point3(position).z;
    let size = particle.size_factor * twinkle(t, particle.randomness) * perspective_scale(view_depth);

    RenderedParticle {
        position: position.to_array(),
        size,
        color: color.to_array(),
        alpha: frame.alpha,
    }
}

/// Reusable output buffer for a field.
pub struct Deformer {
    output: Vec<RenderedParticle>,
}

impl Deformer {
    pub fn new(count: usize) -> Self {
        Self {
            output: vec![RenderedParticle::default(); count],
        }
    }

    /// Recompute every particle for this frame and return the output buffer.
    pub fn evaluate(&mut self, field: &ParticleField, frame: &FrameUniforms) -> &[RenderedParticle] {
        if self.output.len() != field.len() {
            self.output.resize(field.len(), RenderedParticle::default());
        }
        self.output
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| *out = deform_particle(&field.particle(i), frame));
        &self.output
    }

    pub fn output(&self) -> &[RenderedParticle] {
        &self.output
    }
}
