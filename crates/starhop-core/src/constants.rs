/// Reference frame interval in milliseconds (60fps). Physics scales by
/// `elapsed / FRAME_MS` so feel is independent of the real frame rate.
pub const FRAME_MS: f64 = 16.0;

/// Degrees of rotation per reference frame while a turn key is held.
pub const TURN_RATE_DEG: f64 = 3.0;

/// Acceleration per reference frame along the heading (forward key).
pub const FORWARD_THRUST: f64 = 0.05;

/// Acceleration per reference frame against the heading (reverse key).
pub const REVERSE_THRUST: f64 = 0.03;

/// Velocity retained per reference frame.
pub const DAMPING: f64 = 0.98;

/// Lower bound of the navigation plane on both axes.
pub const PLANE_MIN: f64 = 0.0;

/// Upper bound of the navigation plane on both axes.
pub const PLANE_MAX: f64 = 100.0;

/// Docking fires strictly inside this distance from an anchor.
pub const DOCK_RADIUS: f64 = 7.0;

/// Docking fires only strictly below this speed.
pub const DOCK_MAX_SPEED: f64 = 0.3;

/// Where a docked or repositioned craft hovers relative to the anchor.
pub const HOVER_OFFSET: (f64, f64) = (0.0, -7.0);

/// Presentation offset for a docked craft.
pub const DOCKED_DISPLAY_OFFSET: (f64, f64) = (0.0, -6.0);

/// Presentation offset while the craft is in auto transit.
pub const TRANSIT_DISPLAY_OFFSET: (f64, f64) = (0.0, -10.0);

/// Craft position before the first navigation.
pub const INITIAL_POSITION: (f64, f64) = (50.0, 50.0);

/// Settle time between a physics dock and content becoming visible.
pub const REVEAL_DELAY_MS: f64 = 1000.0;

/// Scripted transition: undock → reposition.
pub const REPOSITION_DELAY_MS: f64 = 600.0;

/// Scripted transition: reposition → dock.
pub const DOCK_DELAY_MS: f64 = 1200.0;

/// Scripted transition: dock → content visible.
pub const CONTENT_DELAY_MS: f64 = 1000.0;

/// Interval between loading progress increments.
pub const LOADING_STEP_MS: f64 = 200.0;

/// Exclusive upper bound of a single loading increment.
pub const LOADING_MAX_INCREMENT: f64 = 10.0;

/// Progress value at which loading is complete.
pub const LOADING_COMPLETE: f64 = 100.0;

/// Delay between full progress and the end of the loading phase.
pub const LOADING_SETTLE_MS: f64 = 500.0;

/// Delay between the end of loading and the first navigation.
pub const BOOT_NAVIGATE_DELAY_MS: f64 = 300.0;

/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;
