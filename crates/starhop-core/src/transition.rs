use serde::Serialize;

use crate::constants::{CONTENT_DELAY_MS, DOCK_DELAY_MS, REPOSITION_DELAY_MS};

/// Stages of a scripted navigation, in execution order.
///
/// Each stage runs when the previous stage's timer fires; only the next
/// stage is ever scheduled, so stages cannot run out of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Content hidden, craft released from its current destination.
    Undock,
    /// Craft placed above the target anchor at rest.
    Reposition,
    /// Craft docked, approaching; content not yet visible.
    Dock,
    /// Content visible. The transition is over once this stage runs.
    Reveal,
}

impl Stage {
    /// The stage that follows this one and the delay before it runs.
    pub fn next(self) -> Option<(Stage, f64)> {
        match self {
            Stage::Undock => Some((Stage::Reposition, REPOSITION_DELAY_MS)),
            Stage::Reposition => Some((Stage::Dock, DOCK_DELAY_MS)),
            Stage::Dock => Some((Stage::Reveal, CONTENT_DELAY_MS)),
            Stage::Reveal => None,
        }
    }
}

/// Marker for a scripted navigation in progress. While one exists, other
/// navigation requests and directional takeovers are refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub target: usize,
    /// Last stage that has run.
    pub stage: Stage,
}

impl Transition {
    pub fn start(target: usize) -> Self {
        Self {
            target,
            stage: Stage::Undock,
        }
    }
}
