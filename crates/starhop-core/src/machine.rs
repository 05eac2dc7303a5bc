use std::fmt;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BOOT_NAVIGATE_DELAY_MS, INITIAL_POSITION, LOADING_SETTLE_MS, LOADING_STEP_MS, REVEAL_DELAY_MS,
};
use crate::destination::{Catalog, Destination};
use crate::docking;
use crate::gate::ContentGate;
use crate::input::{InputState, Key};
use crate::loading::LoadingSequence;
use crate::physics::{self, Kinematics};
use crate::scheduler::{Fired, TimerQueue};
use crate::transition::{Stage, Transition};
use crate::vector::Vec2;

/// High-level control mode of the craft.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Live physics driven by held keys.
    ManualFlight,
    /// Under scripted or startup control, not docked.
    AutoTransit,
    /// Settled at the active destination.
    Docked,
}

/// The single simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NavCraft {
    pub kinematics: Kinematics,
    pub mode: Mode,
}

/// Why a navigation request was refused. A refused request never changes
/// any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejected {
    OutOfRange { index: usize, len: usize },
    AlreadyActive(usize),
    InTransition,
    Loading,
    ShutDown,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::OutOfRange { index, len } => {
                write!(f, "destination {index} out of range (have {len})")
            }
            Rejected::AlreadyActive(index) => write!(f, "destination {index} is already active"),
            Rejected::InTransition => write!(f, "a transition is already in progress"),
            Rejected::Loading => write!(f, "still loading"),
            Rejected::ShutDown => write!(f, "navigation has shut down"),
        }
    }
}

impl std::error::Error for Rejected {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerEvent {
    LoadingStep,
    LoadingFinished,
    BootNavigate,
    Stage(Stage),
    Reveal,
}

/// Owner of all navigation state.
///
/// Every mutation goes through a method here: input events, navigation
/// requests, and `tick`, which advances simulated time, fires due timers
/// in order and then runs one physics step when flying manually.
pub struct NavigationMachine {
    catalog: Catalog,
    craft: NavCraft,
    active: usize,
    input: InputState,
    timers: TimerQueue<TimerEvent>,
    gate: ContentGate,
    loading: LoadingSequence,
    is_loading: bool,
    transition: Option<Transition>,
    minimap_visible: bool,
    help_visible: bool,
    sound_enabled: bool,
    now_ms: f64,
    alive: bool,
    rng: SmallRng,
}

impl NavigationMachine {
    /// Start a machine in its loading phase. The first navigation to
    /// destination 0 is issued automatically once loading completes.
    pub fn new(catalog: Catalog, rng: SmallRng) -> Self {
        let mut timers = TimerQueue::new();
        timers.schedule_after(0.0, LOADING_STEP_MS, TimerEvent::LoadingStep);
        Self {
            catalog,
            craft: NavCraft {
                kinematics: Kinematics::at_rest(Vec2::from_tuple(INITIAL_POSITION)),
                mode: Mode::AutoTransit,
            },
            active: 0,
            input: InputState::new(),
            timers,
            gate: ContentGate::new(),
            loading: LoadingSequence::new(),
            is_loading: true,
            transition: None,
            minimap_visible: false,
            help_visible: false,
            sound_enabled: false,
            now_ms: 0.0,
            alive: true,
            rng,
        }
    }

    /// Deterministic machine for tests and replays.
    pub fn seeded(catalog: Catalog, seed: u64) -> Self {
        Self::new(catalog, SmallRng::seed_from_u64(seed))
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Advance simulated time by `elapsed_ms`.
    ///
    /// Non-finite or negative elapsed time counts as zero. Timers due within
    /// the interval fire in due order, each seeing the clock at its own due
    /// time; physics then runs once over the whole interval.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if !self.alive {
            return;
        }
        let elapsed = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms
        } else {
            0.0
        };
        let target = self.now_ms + elapsed;

        while let Some(fired) = self.timers.pop_due(target) {
            self.now_ms = self.now_ms.max(fired.due_ms);
            self.handle_timer(fired);
        }
        self.now_ms = target;

        if self.craft.mode == Mode::ManualFlight && !self.is_loading {
            self.step_physics(elapsed);
        }
    }

    fn handle_timer(&mut self, fired: Fired<TimerEvent>) {
        let now = fired.due_ms;
        match fired.event {
            TimerEvent::LoadingStep => {
                if self.loading.step(&mut self.rng) {
                    self.timers
                        .schedule_after(now, LOADING_SETTLE_MS, TimerEvent::LoadingFinished);
                } else {
                    self.timers
                        .schedule_after(now, LOADING_STEP_MS, TimerEvent::LoadingStep);
                }
            }
            TimerEvent::LoadingFinished => {
                self.is_loading = false;
                self.timers
                    .schedule_after(now, BOOT_NAVIGATE_DELAY_MS, TimerEvent::BootNavigate);
            }
            TimerEvent::BootNavigate => {
                // The pilot may already have taken over in the meantime
                if self.transition.is_none() && self.craft.mode != Mode::ManualFlight {
                    self.begin_transition(0);
                }
            }
            TimerEvent::Stage(stage) => self.run_stage(stage),
            TimerEvent::Reveal => {
                if self.gate.fire(fired.id) {
                    self.run_stage(Stage::Reveal);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Record a key press and apply its immediate effects.
    ///
    /// Directional keys take manual control (undocking and hiding content)
    /// unless a scripted transition is running. Space flips the minimap.
    /// Digits request quick navigation. While loading, keys are recorded
    /// but only the minimap toggle has an effect.
    pub fn on_key_down(&mut self, key: impl Into<Key>) {
        if !self.alive {
            return;
        }
        let key = key.into();
        self.input.press(key.clone());

        if key == Key::Space {
            self.toggle_minimap();
        }
        if self.is_loading || self.transition.is_some() {
            return;
        }
        if key.is_directional() && self.craft.mode != Mode::ManualFlight {
            self.take_manual_control();
        }
        if let Some(index) = key.quick_jump_index() {
            // Out of range or already active: nothing to do
            let _ = self.navigate(index);
        }
    }

    /// Release a held key.
    pub fn on_key_up(&mut self, key: impl Into<Key>) {
        if !self.alive {
            return;
        }
        self.input.release(&key.into());
    }

    fn take_manual_control(&mut self) {
        self.gate.cancel(&mut self.timers);
        self.gate.hide();
        self.craft.mode = Mode::ManualFlight;
    }

    // -----------------------------------------------------------------------
    // Physics and docking
    // -----------------------------------------------------------------------

    fn step_physics(&mut self, elapsed_ms: f64) {
        let controls = self.input.controls();
        self.craft.kinematics = physics::integrate(self.craft.kinematics, controls, elapsed_ms);

        let k = self.craft.kinematics;
        if let Some(index) = docking::detect(k.position, k.velocity, &self.catalog) {
            self.dock_at(index);
        }
    }

    fn dock_at(&mut self, index: usize) {
        self.active = index;
        self.craft.mode = Mode::Docked;
        self.craft.kinematics.velocity = Vec2::ZERO;
        if let Some(dest) = self.catalog.get(index) {
            self.craft.kinematics.position = dest.hover_point();
        }
        self.gate
            .arm(&mut self.timers, self.now_ms, REVEAL_DELAY_MS, TimerEvent::Reveal);
    }

    // -----------------------------------------------------------------------
    // Scripted navigation
    // -----------------------------------------------------------------------

    /// Request a scripted flight to destination `index`.
    ///
    /// Runs undock → reposition (600ms) → dock (1200ms) → reveal (1000ms).
    /// Refused while loading, while another transition runs, for indices
    /// outside the catalog, and for the already active destination.
    pub fn navigate(&mut self, index: usize) -> Result<(), Rejected> {
        if !self.alive {
            return Err(Rejected::ShutDown);
        }
        if self.is_loading {
            return Err(Rejected::Loading);
        }
        if self.transition.is_some() {
            return Err(Rejected::InTransition);
        }
        if !self.catalog.contains_index(index) {
            return Err(Rejected::OutOfRange {
                index,
                len: self.catalog.len(),
            });
        }
        if index == self.active {
            return Err(Rejected::AlreadyActive(index));
        }
        self.begin_transition(index);
        Ok(())
    }

    fn begin_transition(&mut self, target: usize) {
        self.transition = Some(Transition::start(target));
        self.run_stage(Stage::Undock);
    }

    fn run_stage(&mut self, stage: Stage) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.stage = stage;
        let target = transition.target;

        match stage {
            Stage::Undock => {
                self.gate.cancel(&mut self.timers);
                self.gate.hide();
                self.craft.mode = Mode::AutoTransit;
            }
            Stage::Reposition => {
                self.active = target;
                if let Some(dest) = self.catalog.get(target) {
                    self.craft.kinematics.position = dest.hover_point();
                }
                self.craft.kinematics.velocity = Vec2::ZERO;
            }
            Stage::Dock => {
                self.craft.mode = Mode::Docked;
            }
            // The gate has already made content visible
            Stage::Reveal => {}
        }

        match stage.next() {
            // Reveal goes through the gate so the single-pending-timer rule
            // covers scripted and physics docks alike
            Some((Stage::Reveal, delay)) => {
                self.gate
                    .arm(&mut self.timers, self.now_ms, delay, TimerEvent::Reveal);
            }
            Some((next, delay)) => {
                self.timers
                    .schedule_after(self.now_ms, delay, TimerEvent::Stage(next));
            }
            None => self.transition = None,
        }
    }

    // -----------------------------------------------------------------------
    // UI flags
    // -----------------------------------------------------------------------

    pub fn toggle_minimap(&mut self) {
        if self.alive {
            self.minimap_visible = !self.minimap_visible;
        }
    }

    pub fn toggle_help(&mut self) {
        if self.alive {
            self.help_visible = !self.help_visible;
        }
    }

    pub fn toggle_sound(&mut self) {
        if self.alive {
            self.sound_enabled = !self.sound_enabled;
        }
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Cancel every pending timer and stop reacting to input. Idempotent.
    pub fn shutdown(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.gate.cancel(&mut self.timers);
        self.gate.hide();
        self.timers.clear();
        self.input.clear();
        self.transition = None;
        self.sound_enabled = false;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn craft(&self) -> &NavCraft {
        &self.craft
    }

    pub fn mode(&self) -> Mode {
        self.craft.mode
    }

    pub fn active_destination(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<&Destination> {
        self.catalog.get(self.active)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn content_visible(&self) -> bool {
        self.gate.is_visible()
    }

    pub fn reveal_pending(&self) -> bool {
        self.gate.is_pending()
    }

    pub fn minimap_visible(&self) -> bool {
        self.minimap_visible
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn progress(&self) -> f64 {
        self.loading.progress()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
