//! Starhop navigation engine.
//!
//! A spacecraft flies between portfolio sections drawn as planets. The
//! pilot either holds arrow keys (inertial physics with damping, clamped
//! to a 100×100 plane, docking when slow and close to a planet) or asks
//! for a destination, which runs a timed undock → reposition → dock →
//! reveal sequence.
//!
//! Zero I/O: a single-threaded state machine advanced by `tick`, with
//! timers on simulated time. Renderers and audio read `Snapshot`s.

pub mod ambience;
pub mod constants;
pub mod destination;
pub mod docking;
pub mod gate;
pub mod input;
pub mod loading;
pub mod machine;
pub mod physics;
pub mod scheduler;
pub mod snapshot;
pub mod transition;
pub mod vector;

pub use ambience::{Ambience, AmbienceBackend, AmbienceError, Drone};
pub use constants::{DOCK_MAX_SPEED, DOCK_RADIUS, FRAME_MS, PLANE_MAX, PLANE_MIN};
pub use destination::{Catalog, Destination, default_catalog};
pub use gate::ContentGate;
pub use input::{Controls, InputState, Key, Thrust, Turn};
pub use loading::LoadingSequence;
pub use machine::{Mode, NavCraft, NavigationMachine, Rejected};
pub use physics::{Kinematics, integrate, wrap_heading};
pub use scheduler::{TimerId, TimerQueue};
pub use snapshot::{Pose, Snapshot, Thrusters};
pub use transition::{Stage, Transition};
pub use vector::Vec2;
