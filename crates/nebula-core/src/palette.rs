//! Free-text -> palette generation through an external service.
//!
//! Requests are fire-and-forget: [`ThemeGenerator::submit`] spawns a worker
//! and returns immediately, and the frame loop picks the outcome up with
//! [`ThemeGenerator::poll`]. At most one request is in flight at a time, and
//! a failure only ever changes the reported status.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::error::GenerateError;
use crate::mailbox::Mailbox;
use crate::theme::{GeneratedPalette, ThemeResolver, ThemeSource};

/// The external text/structured-output collaborator.
pub trait PaletteService: Send + Sync + 'static {
    /// Send the instruction `prompt` and return the raw JSON text of the
    /// palette object, constrained to [`palette_schema`].
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Instruction sent to the service for a mood description.
pub fn palette_prompt(mood: &str) -> String {
    format!(
        "Generate a 3-color gradient palette for a particle system based on this mood/description: \"{}\". \
         The colors should be distinct and vibrant.",
        mood.trim()
    )
}

/// Fixed response schema: every field is a required string.
pub fn palette_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING", "description": "A creative name for the theme" },
            "start": { "type": "STRING", "description": "Start hex color (deep/dark)" },
            "mid": { "type": "STRING", "description": "Middle hex color (vibrant)" },
            "end": { "type": "STRING", "description": "End hex color (bright/highlight)" }
        },
        "required": ["name", "start", "mid", "end"]
    })
}

/// What the status indicator should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    Idle,
    Generating,
    Error,
    Success,
}

/// A finished request: the parsed palette or the reason it failed.
pub type GenerationOutcome = Result<GeneratedPalette, GenerateError>;

pub struct ThemeGenerator {
    service: Option<Arc<dyn PaletteService>>,
    in_flight: Arc<AtomicBool>,
    finished: Arc<Mailbox<GenerationOutcome>>,
    status: GenerationStatus,
}

impl ThemeGenerator {
    /// `None` disables generation; only manual edits are then possible.
    pub fn new(service: Option<Arc<dyn PaletteService>>) -> Self {
        if service.is_none() {
            log::warn!("[theme] no palette credential configured; generation disabled");
        }
        Self {
            service,
            in_flight: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(Mailbox::new()),
            status: GenerationStatus::Idle,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Capability flag for the UI.
    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    /// True from `submit` until `poll` has collected the outcome.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Fire a request for `prompt` in the background.
    pub fn submit(&mut self, prompt: &str) -> Result<(), GenerateError> {
        let service = self.service.clone().ok_or(GenerateError::Disabled)?;
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(GenerateError::Busy);
        }

        self.status = GenerationStatus::Generating;
        log::info!("[theme] generating palette for \"{prompt}\"");
        // the request stays in flight until poll collects its outcome
        let finished = Arc::clone(&self.finished);
        let spawned = thread::Builder::new()
            .name("palette-request".into())
            .spawn(move || finished.publish(request_palette(service.as_ref(), &prompt)));
        if let Err(e) = spawned {
            self.in_flight.store(false, Ordering::Release);
            self.status = GenerationStatus::Error;
            return Err(GenerateError::Service(e.to_string()));
        }
        Ok(())
    }

    /// Collect a finished request, if any, and install it through `resolver`.
    /// A new request can only be submitted once the previous outcome is collected.
    ///
    /// The active theme only changes when the palette passes validation.
    pub fn poll(&mut self, resolver: &mut ThemeResolver) -> Option<Result<(), GenerateError>> {
        let outcome = self.finished.take()?;
        self.in_flight.store(false, Ordering::Release);
        let installed = outcome.and_then(|palette| {
            resolver
                .apply(ThemeSource::Generated(palette))
                .map(|_| ())
                .map_err(GenerateError::from)
        });
        match &installed {
            Ok(()) => self.status = GenerationStatus::Success,
            Err(e) => {
                log::error!("[theme] palette generation failed: {e}");
                self.status = GenerationStatus::Error;
            }
        }
        Some(installed)
    }
}

/// Ask the service for a palette matching `mood` and parse its answer.
pub fn request_palette(
    service: &dyn PaletteService,
    mood: &str,
) -> Result<GeneratedPalette, GenerateError> {
    let text = service
        .generate(&palette_prompt(mood))
        .map_err(|e| GenerateError::Service(format!("{e:#}")))?;
    Ok(GeneratedPalette::from_json(&text)?)
}
