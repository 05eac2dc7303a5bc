//! Read-only view of navigation state for renderers and other subscribers.
//!
//! JSON field names are camelCase to match what browser-side consumers
//! expect.

use serde::Serialize;

use crate::constants::{DOCKED_DISPLAY_OFFSET, PLANE_MAX, PLANE_MIN, TRANSIT_DISPLAY_OFFSET};
use crate::input::Key;
use crate::machine::{Mode, NavigationMachine};
use crate::transition::Stage;
use crate::vector::Vec2;

/// Which thruster plumes to draw. Only lit during manual flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Thrusters {
    pub main: bool,
    pub retro: bool,
    /// Left-side plume, fires when turning right.
    pub port: bool,
    /// Right-side plume, fires when turning left.
    pub starboard: bool,
}

/// Where the renderer should draw the craft.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pose {
    pub position: Vec2,
    pub heading: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub time_ms: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f64,
    pub mode: Mode,
    pub active_destination: usize,
    pub active_id: &'static str,
    pub content_visible: bool,
    pub minimap_visible: bool,
    pub help_visible: bool,
    pub sound_enabled: bool,
    pub loading: bool,
    pub progress: f64,
    pub transition: Option<Stage>,
    pub thrusters: Thrusters,
    pub pose: Pose,
}

impl NavigationMachine {
    pub fn snapshot(&self) -> Snapshot {
        let k = self.craft().kinematics;
        Snapshot {
            time_ms: self.now_ms(),
            position: k.position,
            velocity: k.velocity,
            heading: k.heading,
            mode: self.mode(),
            active_destination: self.active_destination(),
            active_id: self.active().map(|d| d.id).unwrap_or_default(),
            content_visible: self.content_visible(),
            minimap_visible: self.minimap_visible(),
            help_visible: self.help_visible(),
            sound_enabled: self.sound_enabled(),
            loading: self.is_loading(),
            progress: self.progress(),
            transition: self.transition().map(|t| t.stage),
            thrusters: self.thrusters(),
            pose: self.pose(),
        }
    }

    fn thrusters(&self) -> Thrusters {
        if self.mode() != Mode::ManualFlight {
            return Thrusters::default();
        }
        let input = self.input();
        let main = input.is_held(&Key::Up);
        Thrusters {
            main,
            retro: !main && input.is_held(&Key::Down),
            port: input.is_held(&Key::Right),
            starboard: input.is_held(&Key::Left),
        }
    }

    /// Physics pose while flying; otherwise a level pose offset from the
    /// active anchor (closer when docked, further while in transit).
    pub fn pose(&self) -> Pose {
        let k = self.craft().kinematics;
        let offset = match self.mode() {
            Mode::ManualFlight => {
                return Pose {
                    position: k.position,
                    heading: k.heading,
                };
            }
            Mode::Docked => DOCKED_DISPLAY_OFFSET,
            Mode::AutoTransit => TRANSIT_DISPLAY_OFFSET,
        };
        let anchor = self.active().map(|d| d.anchor).unwrap_or(k.position);
        Pose {
            position: (anchor + Vec2::from_tuple(offset)).clamp(PLANE_MIN, PLANE_MAX),
            heading: 0.0,
        }
    }
}
