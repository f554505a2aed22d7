//! Hand tracking worker.
//!
//! The landmark model is loaded once on its own thread. While interactive
//! mode is on, a polling thread runs detection at roughly the display
//! cadence, smooths the result and publishes it into a [`Mailbox`]. The
//! render loop only ever reads the newest value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::constants::POLL_INTERVAL_MS;
use crate::error::TrackerError;
use crate::gesture::{Calibration, GestureFilter, GestureSample, HandState};
use crate::mailbox::Mailbox;

/// The camera + landmark model collaborator.
pub trait LandmarkDetector: Send + 'static {
    /// Landmarks of the most prominent hand in the current camera frame, if any.
    fn detect(&mut self) -> Option<GestureSample>;
}

/// Lifecycle of the landmark model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelStatus {
    NotLoaded,
    Loading,
    Ready,
    Unavailable(String),
}

type Detector = Box<dyn LandmarkDetector>;

struct Shared {
    status: Mutex<ModelStatus>,
    detector: Mutex<Option<Detector>>,
}

fn relock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct HandTracker {
    shared: Arc<Shared>,
    latest: Arc<Mailbox<HandState>>,
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<Detector>>,
    pub calibration: Calibration,
    pub poll_interval: Duration,
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(Calibration::default())
    }
}

impl HandTracker {
    pub fn new(calibration: Calibration) -> Self {
        Self {
            shared: Arc::new(Shared {
                status: Mutex::new(ModelStatus::NotLoaded),
                detector: Mutex::new(None),
            }),
            latest: Arc::new(Mailbox::new()),
            running: Arc::new(AtomicBool::new(false)),
            worker: None,
            calibration,
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }

    pub fn status(&self) -> ModelStatus {
        relock(&self.shared.status).clone()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == ModelStatus::Ready
    }

    /// Start loading the model in the background. Only the first call has an effect.
    pub fn load<F>(&self, loader: F)
    where
        F: FnOnce() -> anyhow::Result<Detector> + Send + 'static,
    {
        {
            let mut status = relock(&self.shared.status);
            if *status != ModelStatus::NotLoaded {
                log::debug!("[tracker] load ignored, model is {:?}", *status);
                return;
            }
            *status = ModelStatus::Loading;
        }
        log::info!("[tracker] loading gesture model");

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("gesture-model-load".into())
            .spawn(move || {
                let outcome = loader();
                let status = match outcome {
                    Ok(detector) => {
                        *relock(&shared.detector) = Some(detector);
                        log::info!("[tracker] gesture model ready");
                        ModelStatus::Ready
                    }
                    Err(e) => {
                        log::error!("[tracker] error loading gesture model: {e:#}");
                        ModelStatus::Unavailable(format!("{e:#}"))
                    }
                };
                *relock(&shared.status) = status;
            });
        if let Err(e) = spawned {
            log::error!("[tracker] could not spawn model loader: {e}");
            *relock(&self.shared.status) = ModelStatus::Unavailable(e.to_string());
        }
    }

    /// Begin polling the detector. Calling it while already running is a no-op.
    pub fn start(&mut self) -> Result<(), TrackerError> {
        if self.worker.is_some() {
            return Ok(());
        }
        match self.status() {
            ModelStatus::Ready => {}
            ModelStatus::Loading => return Err(TrackerError::Loading),
            ModelStatus::NotLoaded => return Err(TrackerError::NotLoaded),
            ModelStatus::Unavailable(reason) => return Err(TrackerError::Unavailable(reason)),
        }
        let mut detector = relock(&self.shared.detector)
            .take()
            .ok_or(TrackerError::NotLoaded)?;

        self.latest.clear();
        self.running.store(true, Ordering::Release);
        let running = Arc::clone(&self.running);
        let latest = Arc::clone(&self.latest);
        let mut filter = GestureFilter::new(self.calibration);
        let interval = self.poll_interval;

        // The detector moves into the worker and comes back through the join handle.
        let spawned = thread::Builder::new()
            .name("gesture-poll".into())
            .spawn(move || {
                log::debug!("[tracker] polling started");
                while running.load(Ordering::Acquire) {
                    let sample = detector.detect();
                    latest.publish(filter.update(sample.as_ref()));
                    thread::sleep(interval);
                }
                log::debug!("[tracker] polling stopped");
                detector
            });
        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                log::info!("[tracker] sensor link engaged");
                Ok(())
            }
            Err(e) => {
                // the detector went down with the closure
                self.running.store(false, Ordering::Release);
                log::error!("[tracker] could not spawn gesture worker: {e}");
                *relock(&self.shared.status) = ModelStatus::Unavailable(e.to_string());
                Err(TrackerError::Unavailable(e.to_string()))
            }
        }
    }

    /// Stop polling and wait for the worker to exit. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.worker.take() else {
            return;
        };
        match handle.join() {
            Ok(detector) => *relock(&self.shared.detector) = Some(detector),
            Err(_) => {
                log::error!("[tracker] gesture worker panicked; model marked unavailable");
                *relock(&self.shared.status) =
                    ModelStatus::Unavailable("gesture worker panicked".into());
            }
        }
        self.latest.clear();
        log::info!("[tracker] sensor link disengaged");
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Newest published hand state, if the worker has produced one.
    pub fn latest(&self) -> Option<HandState> {
        self.latest.latest()
    }
}

impl Drop for HandTracker {
    fn drop(&mut self) {
        self.stop();
    }
}
