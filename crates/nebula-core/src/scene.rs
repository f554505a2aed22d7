//! Per-frame session wiring: mode, smoothing, theme and deformation.

use glam::Mat4;
use std::fmt;

use crate::config::NebulaConfig;
use crate::deform::{Deformer, FrameUniforms, RenderedParticle};
use crate::error::{FieldError, TrackerError};
use crate::field::ParticleField;
use crate::gesture::HandState;
use crate::palette::GenerationStatus;
use crate::smoothing::{ControlSignal, ControlTarget, SignalSmoother, SmoothingRates};
use crate::theme::ThemeResolver;
use crate::tracker::{HandTracker, ModelStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Ambient drift, no sensor.
    Autopilot,
    /// Interactive requested, waiting for the model.
    LoadingModel,
    Interactive,
}

impl fmt::Display for AppMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppMode::Autopilot => "autopilot",
            AppMode::LoadingModel => "loading model",
            AppMode::Interactive => "interactive",
        })
    }
}

/// Drives the tracker from user mode requests.
#[derive(Debug)]
pub struct ModeController {
    mode: AppMode,
}

impl Default for ModeController {
    fn default() -> Self {
        Self {
            mode: AppMode::Autopilot,
        }
    }
}

impl ModeController {
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Try to switch to interactive; waits in `LoadingModel` while the model loads.
    pub fn request_interactive(&mut self, tracker: &mut HandTracker) -> AppMode {
        self.mode = match tracker.start() {
            Ok(()) => AppMode::Interactive,
            Err(TrackerError::Loading) => AppMode::LoadingModel,
            Err(e) => {
                log::warn!("[scene] interactive mode unavailable: {e}");
                AppMode::Autopilot
            }
        };
        self.mode
    }

    /// Back to autopilot, stopping the sensor. Safe in any mode.
    pub fn disengage(&mut self, tracker: &mut HandTracker) -> AppMode {
        tracker.stop();
        self.mode = AppMode::Autopilot;
        self.mode
    }

    pub fn toggle(&mut self, tracker: &mut HandTracker) -> AppMode {
        match self.mode {
            AppMode::Autopilot => self.request_interactive(tracker),
            AppMode::LoadingModel | AppMode::Interactive => self.disengage(tracker),
        }
    }

    /// Resolve a pending `LoadingModel` once the loader has finished.
    pub fn update(&mut self, tracker: &mut HandTracker) -> AppMode {
        if self.mode == AppMode::LoadingModel {
            match tracker.status() {
                ModelStatus::Ready => {
                    self.request_interactive(tracker);
                }
                ModelStatus::Unavailable(_) | ModelStatus::NotLoaded => {
                    self.mode = AppMode::Autopilot;
                }
                ModelStatus::Loading => {}
            }
        }
        self.mode
    }
}

pub struct Scene {
    field: ParticleField,
    deformer: Deformer,
    smoother: SignalSmoother,
    themes: ThemeResolver,
    modes: ModeController,
    seed: Option<u64>,
    signal: ControlSignal,
}

impl Scene {
    pub fn new(config: &NebulaConfig) -> Result<Self, FieldError> {
        let field = build_field(config.particle_count, config.seed)?;
        let mut scene = Self::with_field(field, config.rates);
        scene.seed = config.seed;
        Ok(scene)
    }

    pub fn with_field(field: ParticleField, rates: SmoothingRates) -> Self {
        log::info!("[scene] nebula with {} particles", field.len());
        Self {
            deformer: Deformer::new(field.len()),
            field,
            smoother: SignalSmoother::new(rates),
            themes: ThemeResolver::default(),
            modes: ModeController::default(),
            seed: None,
            signal: ControlSignal::ambient(0.0),
        }
    }

    /// Advance one frame at `elapsed` seconds and return the particle instances.
    ///
    /// `hand` is the newest state from the tracker mailbox; it is ignored
    /// outside interactive mode.
    pub fn frame(
        &mut self,
        elapsed: f32,
        hand: Option<HandState>,
        view: Mat4,
    ) -> &[RenderedParticle] {
        let target = match (self.modes.mode(), hand) {
            (AppMode::Interactive, Some(hand)) => ControlTarget {
                expansion: hand.expansion,
                rotation: hand.rotation,
                hovering: hand.detected,
            },
            _ => ControlTarget::NEUTRAL,
        };
        self.signal = self.smoother.step(target, elapsed);
        let frame = FrameUniforms::new(self.signal, self.themes.colors(), view);
        self.deformer.evaluate(&self.field, &frame)
    }

    /// Replace the field with `count` fresh particles and return to neutral.
    pub fn rebuild(&mut self, count: usize) -> Result<(), FieldError> {
        self.field = build_field(count, self.seed)?;
        self.deformer = Deformer::new(count);
        self.smoother.reset();
        log::info!("[scene] rebuilt field with {count} particles");
        Ok(())
    }

    pub fn toggle_mode(&mut self, tracker: &mut HandTracker) -> AppMode {
        let mode = self.modes.toggle(tracker);
        if mode == AppMode::Autopilot {
            self.smoother.reset();
        }
        log::info!("[scene] mode: {mode}");
        mode
    }

    pub fn disengage(&mut self, tracker: &mut HandTracker) {
        self.modes.disengage(tracker);
        self.smoother.reset();
    }

    pub fn update_mode(&mut self, tracker: &mut HandTracker) -> AppMode {
        let before = self.modes.mode();
        let mode = self.modes.update(tracker);
        if mode != before {
            log::info!("[scene] mode: {mode}");
        }
        mode
    }

    pub fn mode(&self) -> AppMode {
        self.modes.mode()
    }

    /// Signal used for the latest frame.
    pub fn signal(&self) -> ControlSignal {
        self.signal
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn themes(&self) -> &ThemeResolver {
        &self.themes
    }

    pub fn themes_mut(&mut self) -> &mut ThemeResolver {
        &mut self.themes
    }

    /// One-line readout for the window title.
    pub fn status_line(&self, hand: Option<HandState>, generation: GenerationStatus) -> String {
        let sensor = match (self.mode(), hand) {
            (AppMode::Interactive, Some(h)) if h.detected => format!(
                "sensor online | {} {:.0}% | rot {:.0}\u{b0}",
                if h.is_open() { "open" } else { "closed" },
                h.expansion * 100.0,
                h.rotation.to_degrees()
            ),
            (AppMode::Interactive, _) => "sensor searching".to_string(),
            (mode, _) => mode.to_string(),
        };
        let generation = match generation {
            GenerationStatus::Idle => "",
            GenerationStatus::Generating => " | generating...",
            GenerationStatus::Error => " | generation failed",
            GenerationStatus::Success => " | generated",
        };
        format!(
            "nebula | {sensor} | {}{generation}",
            self.themes.active().label
        )
    }
}

fn build_field(count: usize, seed: Option<u64>) -> Result<ParticleField, FieldError> {
    match seed {
        Some(seed) => ParticleField::create_seeded(count, seed),
        None => ParticleField::create(count),
    }
}
