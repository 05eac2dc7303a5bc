use std::collections::HashSet;

/// A keyboard key, parsed from DOM-style key names.
///
/// Unknown keys are kept verbatim: they are tracked as held but carry no
/// navigation meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Minimap toggle.
    Space,
    Digit(u8),
    Other(String),
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn parse(name: &str) -> Self {
        match name {
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }

    /// True for the four arrow keys that fly the craft.
    pub fn is_directional(&self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }

    /// Destination index a quick-jump digit asks for (`'1'` → 0).
    pub fn quick_jump_index(&self) -> Option<usize> {
        match self {
            Key::Digit(d) if *d >= 1 => Some(*d as usize - 1),
            _ => None,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::parse(name)
    }
}

/// Set of currently held keys. Order is irrelevant.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key held. Returns false if it was already held (key repeat).
    pub fn press(&mut self, key: Key) -> bool {
        self.held.insert(key)
    }

    /// Release a single key.
    pub fn release(&mut self, key: &Key) -> bool {
        self.held.remove(key)
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.held.contains(key)
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Drop every held key. Only used on teardown.
    pub(crate) fn clear(&mut self) {
        self.held.clear();
    }

    /// Flight intent for this tick.
    pub fn controls(&self) -> Controls {
        let turn = if self.is_held(&Key::Right) {
            Turn::Starboard
        } else if self.is_held(&Key::Left) {
            Turn::Port
        } else {
            Turn::None
        };
        let thrust = if self.is_held(&Key::Up) {
            Thrust::Forward
        } else if self.is_held(&Key::Down) {
            Thrust::Reverse
        } else {
            Thrust::Idle
        };
        Controls { turn, thrust }
    }
}

/// Rotation intent. Right wins when both turn keys are held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Turn {
    #[default]
    None,
    /// Counter-clockwise (left arrow).
    Port,
    /// Clockwise (right arrow).
    Starboard,
}

impl Turn {
    pub fn sign(self) -> f64 {
        match self {
            Turn::None => 0.0,
            Turn::Port => -1.0,
            Turn::Starboard => 1.0,
        }
    }
}

/// Thrust intent. Forward wins when both thrust keys are held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Thrust {
    #[default]
    Idle,
    Forward,
    Reverse,
}

/// Snapshot of held flight keys consumed by one physics step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Controls {
    pub turn: Turn,
    pub thrust: Thrust,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dom_names() {
        assert_eq!(Key::parse("ArrowUp"), Key::Up);
        assert_eq!(Key::parse("ArrowLeft"), Key::Left);
        assert_eq!(Key::parse(" "), Key::Space);
        assert_eq!(Key::parse("3"), Key::Digit(3));
        assert_eq!(Key::parse("x"), Key::Other("x".to_string()));
        assert_eq!(Key::parse("12"), Key::Other("12".to_string()));
    }

    #[test]
    fn test_quick_jump_index() {
        assert_eq!(Key::Digit(1).quick_jump_index(), Some(0));
        assert_eq!(Key::Digit(8).quick_jump_index(), Some(7));
        assert_eq!(Key::Digit(0).quick_jump_index(), None);
        assert_eq!(Key::Up.quick_jump_index(), None);
    }

    #[test]
    fn test_press_release_per_entry() {
        let mut input = InputState::new();
        assert!(input.press(Key::Up));
        assert!(!input.press(Key::Up));
        input.press(Key::Left);
        input.press(Key::parse("q"));
        assert_eq!(input.len(), 3);

        input.release(&Key::Up);
        assert!(!input.is_held(&Key::Up));
        assert!(input.is_held(&Key::Left));
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_forward_beats_reverse() {
        let mut input = InputState::new();
        input.press(Key::Up);
        input.press(Key::Down);
        assert_eq!(input.controls().thrust, Thrust::Forward);

        input.release(&Key::Up);
        assert_eq!(input.controls().thrust, Thrust::Reverse);
    }

    #[test]
    fn test_right_beats_left() {
        let mut input = InputState::new();
        input.press(Key::Left);
        assert_eq!(input.controls().turn, Turn::Port);
        input.press(Key::Right);
        assert_eq!(input.controls().turn, Turn::Starboard);
    }

    #[test]
    fn test_irrelevant_keys_no_controls() {
        let mut input = InputState::new();
        input.press(Key::parse("Shift"));
        input.press(Key::Space);
        assert_eq!(input.controls(), Controls::default());
    }
}
