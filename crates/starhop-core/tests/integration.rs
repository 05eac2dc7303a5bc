//! End-to-end navigation scenarios driven through the public machine API:
//! startup, scripted transitions, manual flight, docking and teardown.

use starhop_core::{
    Catalog, Destination, Mode, NavigationMachine, Rejected, Stage, Vec2, default_catalog,
    docking,
};

const FRAME: f64 = 16.0;

fn booted_with(catalog: Catalog, seed: u64) -> NavigationMachine {
    let mut m = NavigationMachine::seeded(catalog, seed);
    for _ in 0..10_000 {
        if !m.is_loading() && m.content_visible() && m.transition().is_none() {
            return m;
        }
        m.tick(FRAME);
    }
    panic!("machine never finished booting");
}

fn booted() -> NavigationMachine {
    booted_with(default_catalog(), 42)
}

fn advance(m: &mut NavigationMachine, ms: f64) {
    let mut left = ms;
    while left > 0.0 {
        let step = left.min(FRAME);
        m.tick(step);
        left -= step;
    }
}

/// Startup: loading finishes, then the craft is flown to home automatically.
#[test]
fn startup_sequence_docks_home() {
    let mut m = NavigationMachine::seeded(default_catalog(), 9);
    assert!(m.is_loading());

    let mut saw_transit = false;
    while m.is_loading() || !m.content_visible() {
        m.tick(FRAME);
        if m.transition().is_some() {
            saw_transit = true;
        }
        assert!(m.now_ms() < 60_000.0, "boot took too long");
    }
    assert!(saw_transit, "home should be reached by a scripted transition");
    assert_eq!(m.active_destination(), 0);
    assert_eq!(m.mode(), Mode::Docked);
    assert_eq!(m.progress(), 100.0);
}

/// Startup timing: the first navigation starts 800ms after progress hits 100.
#[test]
fn startup_navigation_delays() {
    let mut m = NavigationMachine::seeded(default_catalog(), 11);
    while m.progress() < 100.0 {
        m.tick(1.0);
    }
    let full_at = m.now_ms();

    while m.is_loading() {
        m.tick(1.0);
    }
    assert_eq!(m.now_ms() - full_at, 500.0);

    while m.transition().is_none() {
        m.tick(1.0);
    }
    assert_eq!(m.now_ms() - full_at, 800.0);
}

/// navigate(2) from home: 600ms reposition, +1200ms dock, +1000ms content.
#[test]
fn scripted_transition_timeline() {
    let mut m = booted();
    assert_eq!(m.mode(), Mode::Docked);
    assert_eq!(m.active_destination(), 0);

    m.navigate(2).unwrap();
    assert!(!m.content_visible());
    assert_eq!(m.mode(), Mode::AutoTransit);
    assert_eq!(m.transition().map(|t| t.stage), Some(Stage::Undock));

    m.tick(599.0);
    assert_eq!(m.active_destination(), 0);
    m.tick(1.0);
    assert_eq!(m.active_destination(), 2);
    let anchor = m.catalog().get(2).unwrap().anchor;
    assert_eq!(m.craft().kinematics.position, anchor + Vec2::new(0.0, -7.0));
    assert_eq!(m.craft().kinematics.velocity, Vec2::ZERO);
    assert_eq!(m.mode(), Mode::AutoTransit);

    m.tick(1199.0);
    assert_eq!(m.mode(), Mode::AutoTransit);
    m.tick(1.0);
    assert_eq!(m.mode(), Mode::Docked);
    assert!(!m.content_visible());
    assert!(m.transition().is_some());

    m.tick(999.0);
    assert!(!m.content_visible());
    m.tick(1.0);
    assert!(m.content_visible());
    assert!(m.transition().is_none());
}

/// The same timeline holds when a single coarse tick spans every stage.
#[test]
fn scripted_transition_in_one_tick() {
    let mut m = booted();
    m.navigate(6).unwrap();
    m.tick(2800.0);
    assert_eq!(m.active_destination(), 6);
    assert_eq!(m.mode(), Mode::Docked);
    assert!(m.content_visible());
    assert!(m.transition().is_none());
}

/// Two requests in quick succession: only the first runs.
#[test]
fn second_request_during_transition_is_refused() {
    let mut m = booted();
    m.navigate(3).unwrap();
    m.tick(100.0);
    assert_eq!(m.navigate(5), Err(Rejected::InTransition));

    advance(&mut m, 2700.0);
    assert_eq!(m.active_destination(), 3);
    advance(&mut m, 5000.0);
    assert_eq!(m.active_destination(), 3);
    assert!(m.content_visible());
}

/// Out-of-range request: nothing changes, no panic.
#[test]
fn out_of_range_request_is_a_noop() {
    let mut m = booted();
    let before = m.snapshot();
    assert_eq!(
        m.navigate(9),
        Err(Rejected::OutOfRange { index: 9, len: 8 })
    );
    assert_eq!(m.snapshot(), before);
}

/// Holding forward from rest at 60fps: y falls every frame and speed
/// approaches, but never exceeds, the damped terminal speed.
#[test]
fn forward_thrust_accelerates_toward_terminal_speed() {
    let catalog = Catalog::new(vec![Destination::new("base", "Base", 50.0, 99.0)]).unwrap();
    let mut m = booted_with(catalog, 5);
    let start = m.craft().kinematics.position;
    assert_eq!(start, Vec2::new(50.0, 92.0));

    m.on_key_down("ArrowUp");
    assert_eq!(m.mode(), Mode::ManualFlight);

    let frame = 1000.0 / 60.0;
    let scale = frame / 16.0;
    let damping = 0.98_f64.powf(scale);
    let terminal = 0.05 * scale * damping / (1.0 - damping);

    let mut last_y = start.y;
    let mut last_speed = 0.0;
    for _ in 0..60 {
        m.tick(frame);
        let k = m.craft().kinematics;
        assert_eq!(m.mode(), Mode::ManualFlight);
        assert!(k.position.y < last_y, "y should keep falling");
        assert!(k.velocity.x.abs() < 1e-9);
        assert!(k.speed() > last_speed);
        assert!(k.speed() < terminal);
        last_y = k.position.y;
        last_speed = k.speed();
    }
    assert!(last_speed > terminal * 0.6);
}

/// Manual dock, then leave before the reveal fires: content stays hidden.
#[test]
fn undock_before_reveal_keeps_content_hidden() {
    let mut m = booted();

    // Leave the dock and drift back into range
    m.on_key_down("ArrowLeft");
    m.on_key_up("ArrowLeft");
    m.on_key_down("ArrowDown");
    m.tick(FRAME);
    m.on_key_up("ArrowDown");
    assert_eq!(m.mode(), Mode::Docked);
    assert!(m.reveal_pending());

    advance(&mut m, 900.0);
    m.on_key_down("ArrowRight");
    assert_eq!(m.mode(), Mode::ManualFlight);

    advance(&mut m, 10_000.0);
    assert!(!m.content_visible());
}

/// Flying manually into a different planet docks there.
#[test]
fn manual_flight_docks_at_new_destination() {
    let catalog = Catalog::new(vec![
        Destination::new("home", "Home", 50.0, 80.0),
        Destination::new("lookout", "Lookout", 50.0, 40.0),
    ])
    .unwrap();
    let mut m = booted_with(catalog, 8);
    assert_eq!(m.active_destination(), 0);
    assert_eq!(m.craft().kinematics.position, Vec2::new(50.0, 73.0));

    // Nose is up, toward the lookout: short burn, then coast in
    m.on_key_down("ArrowUp");
    advance(&mut m, 240.0);
    m.on_key_up("ArrowUp");
    assert_eq!(m.mode(), Mode::ManualFlight);

    for _ in 0..10_000 {
        if m.mode() == Mode::Docked {
            break;
        }
        m.tick(FRAME);
    }
    assert_eq!(m.mode(), Mode::Docked);
    assert_eq!(m.active_destination(), 1);
    assert_eq!(m.craft().kinematics.velocity, Vec2::ZERO);
    assert_eq!(m.craft().kinematics.position, Vec2::new(50.0, 33.0));

    advance(&mut m, 1000.0);
    assert!(m.content_visible());
}

/// Overlapping anchors: the earlier destination wins.
#[test]
fn docking_prefers_earlier_destination() {
    let catalog = Catalog::new(vec![
        Destination::new("a", "A", 30.0, 30.0),
        Destination::new("b", "B", 35.0, 30.0),
    ])
    .unwrap();
    assert_eq!(
        docking::detect(Vec2::new(33.0, 30.0), Vec2::new(0.0, 0.1), &catalog),
        Some(0)
    );
    assert_eq!(
        docking::detect(Vec2::new(40.0, 30.0), Vec2::new(0.0, 0.1), &catalog),
        Some(1)
    );
}

/// Teardown mid-transition: nothing fires afterwards.
#[test]
fn shutdown_mid_transition_fires_nothing() {
    let mut m = booted();
    m.navigate(4).unwrap();
    m.tick(700.0);
    assert_eq!(m.active_destination(), 4);
    m.shutdown();

    let before = m.snapshot();
    advance(&mut m, 5000.0);
    assert_eq!(m.snapshot(), before);
    assert_eq!(m.mode(), Mode::AutoTransit);
    assert!(!m.content_visible());
    assert_eq!(m.pending_timers(), 0);
}

/// A planet hugging the top edge: the craft rests below it and can leave.
#[test]
fn docked_at_top_edge_can_fly_away() {
    let catalog = Catalog::new(vec![
        Destination::new("top", "Top", 50.0, 3.0),
        Destination::new("low", "Low", 50.0, 60.0),
    ])
    .unwrap();
    let mut m = booted_with(catalog, 4);
    assert_eq!(m.mode(), Mode::Docked);
    assert_eq!(m.craft().kinematics.position, Vec2::new(50.0, 10.0));

    m.on_key_down("ArrowDown");
    advance(&mut m, 500.0);
    assert_eq!(m.mode(), Mode::ManualFlight);
    let k = m.craft().kinematics;
    assert!(k.position.y > 10.0, "craft should drift away, at {:?}", k.position);
    assert!(k.speed() > 0.0);
}

fn finish_loading(m: &mut NavigationMachine) {
    while m.is_loading() {
        m.tick(1.0);
    }
}

/// Arrow key in the gap between loading and the boot flight: the pilot
/// keeps control and the boot flight never starts.
#[test]
fn manual_takeover_before_boot_flight() {
    let mut m = NavigationMachine::seeded(default_catalog(), 21);
    finish_loading(&mut m);
    assert_eq!(m.mode(), Mode::AutoTransit);

    m.tick(100.0);
    m.on_key_down("ArrowUp");
    assert_eq!(m.mode(), Mode::ManualFlight);

    advance(&mut m, 400.0);
    assert_eq!(m.mode(), Mode::ManualFlight);
    assert!(m.transition().is_none());
    assert_eq!(m.active_destination(), 0);
    assert!(!m.content_visible());
}

/// Quick jump in the same gap: the requested flight runs, the boot flight
/// is dropped.
#[test]
fn quick_jump_before_boot_flight() {
    let mut m = NavigationMachine::seeded(default_catalog(), 21);
    finish_loading(&mut m);

    m.tick(100.0);
    m.on_key_down("3");
    assert_eq!(m.transition().map(|t| t.target), Some(2));

    advance(&mut m, 400.0);
    assert_eq!(m.transition().map(|t| t.target), Some(2));

    advance(&mut m, 2400.0);
    assert_eq!(m.active_destination(), 2);
    assert_eq!(m.mode(), Mode::Docked);
    assert!(m.content_visible());
    assert!(m.transition().is_none());

    advance(&mut m, 5000.0);
    assert_eq!(m.active_destination(), 2);
}
