//! Ambient drone subscriber.
//!
//! Audio never drives navigation: the owner calls `sync` with the current
//! sound flag and this module starts or stops its backend to match. A
//! backend that cannot be acquired or started degrades the ambience to a
//! permanent no-op; the error is returned once so the caller can log it.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Oscillator {
    pub frequency_hz: f64,
    pub waveform: Waveform,
}

/// Low drone: three detuned oscillators into one gain stage whose level
/// is wobbled by a slow LFO.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Drone {
    pub oscillators: Vec<Oscillator>,
    pub gain: f64,
    pub lfo_hz: f64,
    pub lfo_depth: f64,
}

impl Default for Drone {
    fn default() -> Self {
        Self {
            oscillators: vec![
                Oscillator {
                    frequency_hz: 60.0,
                    waveform: Waveform::Sine,
                },
                Oscillator {
                    frequency_hz: 67.0,
                    waveform: Waveform::Sine,
                },
                Oscillator {
                    frequency_hz: 74.0,
                    waveform: Waveform::Triangle,
                },
            ],
            gain: 0.1,
            lfo_hz: 0.1,
            lfo_depth: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmbienceError {
    /// No audio output could be acquired.
    Unavailable(String),
    /// The backend refused to start.
    Backend(String),
}

impl fmt::Display for AmbienceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmbienceError::Unavailable(msg) => write!(f, "audio unavailable: {msg}"),
            AmbienceError::Backend(msg) => write!(f, "audio backend error: {msg}"),
        }
    }
}

impl std::error::Error for AmbienceError {}

/// Something that can play a drone.
pub trait AmbienceBackend: Send {
    fn start(&mut self, drone: &Drone) -> Result<(), AmbienceError>;
    fn stop(&mut self);
}

type Acquire = Box<dyn FnMut() -> Result<Box<dyn AmbienceBackend>, AmbienceError> + Send>;

enum Slot {
    Idle,
    Playing(Box<dyn AmbienceBackend>),
    Paused(Box<dyn AmbienceBackend>),
    Degraded,
    Closed,
}

pub struct Ambience {
    acquire: Acquire,
    drone: Drone,
    slot: Slot,
}

impl Ambience {
    /// `acquire` is called lazily, the first time sound is switched on.
    pub fn new<F>(acquire: F) -> Self
    where
        F: FnMut() -> Result<Box<dyn AmbienceBackend>, AmbienceError> + Send + 'static,
    {
        Self {
            acquire: Box::new(acquire),
            drone: Drone::default(),
            slot: Slot::Idle,
        }
    }

    /// Bring playback in line with `sound_enabled`.
    pub fn sync(&mut self, sound_enabled: bool) -> Result<(), AmbienceError> {
        let slot = std::mem::replace(&mut self.slot, Slot::Degraded);
        let (slot, result) = match (slot, sound_enabled) {
            (Slot::Idle, true) => match (self.acquire)() {
                Ok(backend) => self.start(backend),
                Err(e) => (Slot::Degraded, Err(e)),
            },
            (Slot::Paused(backend), true) => self.start(backend),
            (Slot::Playing(mut backend), false) => {
                backend.stop();
                (Slot::Paused(backend), Ok(()))
            }
            (slot, _) => (slot, Ok(())),
        };
        self.slot = slot;
        result
    }

    fn start(&self, mut backend: Box<dyn AmbienceBackend>) -> (Slot, Result<(), AmbienceError>) {
        match backend.start(&self.drone) {
            Ok(()) => (Slot::Playing(backend), Ok(())),
            Err(e) => (Slot::Degraded, Err(e)),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.slot, Slot::Playing(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.slot, Slot::Degraded)
    }

    /// Stop and release the backend. Later `sync` calls do nothing.
    pub fn shutdown(&mut self) {
        if let Slot::Playing(mut backend) = std::mem::replace(&mut self.slot, Slot::Closed) {
            backend.stop();
        }
    }
}

impl Drop for Ambience {
    fn drop(&mut self) {
        self.shutdown();
    }
}
