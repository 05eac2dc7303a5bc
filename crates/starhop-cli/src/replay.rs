//! Deterministic replay of scripted input in simulated time.
//!
//! A script is a TOML file:
//!
//! ```toml
//! seed = 7
//! frame_ms = 16
//! duration_ms = 6000
//! sample_every_ms = 500
//!
//! [[event]]
//! at_ms = 4000
//! action = { kind = "navigate", index = 2 }
//! ```
//!
//! The clock advances in `frame_ms` steps but always lands exactly on
//! event and sample times, so output depends only on the script and seed.

use std::io::Write;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use starhop_core::{FRAME_MS, NavigationMachine, default_catalog};

fn default_frame_ms() -> f64 {
    FRAME_MS
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub seed: Option<u64>,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    pub duration_ms: f64,
    pub sample_every_ms: Option<f64>,
    #[serde(default, rename = "event")]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEvent {
    pub at_ms: f64,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    KeyDown { key: String },
    KeyUp { key: String },
    Navigate { index: usize },
    ToggleMinimap,
    ToggleHelp,
    ToggleSound,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let script: Script = toml::from_str(text).context("malformed TOML")?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 {
            anyhow::bail!("frame_ms must be positive, got {}", self.frame_ms);
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            anyhow::bail!("duration_ms must be non-negative, got {}", self.duration_ms);
        }
        let min_sample = self.frame_ms.min(1.0);
        if let Some(every) = self.sample_every_ms
            && (!every.is_finite() || every < min_sample)
        {
            anyhow::bail!("sample_every_ms must be at least {min_sample}, got {every}");
        }
        for (i, event) in self.events.iter().enumerate() {
            if !event.at_ms.is_finite() || event.at_ms < 0.0 {
                anyhow::bail!("event {i}: at_ms must be non-negative, got {}", event.at_ms);
            }
        }
        Ok(())
    }
}

fn apply(machine: &mut NavigationMachine, action: &Action) {
    match action {
        Action::KeyDown { key } => machine.on_key_down(key.as_str()),
        Action::KeyUp { key } => machine.on_key_up(key.as_str()),
        Action::Navigate { index } => {
            if let Err(rejected) = machine.navigate(*index) {
                tracing::debug!(
                    "t={}ms: navigation to {index} refused: {rejected}",
                    machine.now_ms()
                );
            }
        }
        Action::ToggleMinimap => machine.toggle_minimap(),
        Action::ToggleHelp => machine.toggle_help(),
        Action::ToggleSound => machine.toggle_sound(),
    }
}

fn emit(machine: &NavigationMachine, out: &mut impl Write) -> Result<()> {
    let line = serde_json::to_string(&machine.snapshot()).context("failed to encode snapshot")?;
    writeln!(out, "{line}").context("failed to write snapshot")?;
    Ok(())
}

/// Run `script` to completion, writing one JSON snapshot per line.
///
/// `seed` overrides the script's own seed. Events sharing a timestamp are
/// applied in file order. A final snapshot is always written.
pub fn run(script: &Script, seed: Option<u64>, out: &mut impl Write) -> Result<()> {
    let rng = match seed.or(script.seed) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let mut machine = NavigationMachine::new(default_catalog(), rng);

    let mut events = script.events.clone();
    events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    let mut events = events.into_iter().peekable();

    let mut now = 0.0_f64;
    let mut next_sample = script.sample_every_ms.map(|_| 0.0_f64);
    let mut last_emitted: Option<f64> = None;

    loop {
        while let Some(event) = events.next_if(|e| e.at_ms <= now) {
            apply(&mut machine, &event.action);
        }

        if let (Some(due), Some(every)) = (next_sample, script.sample_every_ms)
            && now >= due
        {
            emit(&machine, out)?;
            last_emitted = Some(now);
            next_sample = Some(due + every);
        }

        if now >= script.duration_ms {
            break;
        }

        let mut step = script.frame_ms.min(script.duration_ms - now);
        if let Some(event) = events.peek() {
            step = step.min(event.at_ms - now);
        }
        if let Some(due) = next_sample {
            step = step.min(due - now);
        }
        machine.tick(step);
        now += step;
    }

    if last_emitted != Some(now) {
        emit(&machine, out)?;
    }
    machine.shutdown();
    tracing::debug!(
        "replay finished at t={now}ms, {} event(s) after the end ignored",
        events.count()
    );
    Ok(())
}
