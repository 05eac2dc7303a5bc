use serde::Serialize;

use crate::constants::{HOVER_OFFSET, PLANE_MAX, PLANE_MIN};
use crate::vector::Vec2;

/// A navigable content section, drawn as a planet at `anchor`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Destination {
    pub id: &'static str,
    pub name: &'static str,
    pub anchor: Vec2,
}

impl Destination {
    pub const fn new(id: &'static str, name: &'static str, x: f64, y: f64) -> Self {
        Self {
            id,
            name,
            anchor: Vec2::new(x, y),
        }
    }

    /// Point above the anchor where an arriving craft settles.
    ///
    /// Flipped below the anchor when above would leave the plane, so the
    /// craft always rests at least `DOCK_RADIUS` away and can fly off.
    pub fn hover_point(&self) -> Vec2 {
        let offset = Vec2::from_tuple(HOVER_OFFSET);
        let above = self.anchor + offset;
        let point = if above.y < PLANE_MIN {
            self.anchor - offset
        } else {
            above
        };
        point.clamp(PLANE_MIN, PLANE_MAX)
    }
}

const SECTIONS: [Destination; 8] = [
    Destination::new("home", "Home", 50.0, 15.0),
    Destination::new("about", "About", 15.0, 30.0),
    Destination::new("projects", "Projects", 85.0, 25.0),
    Destination::new("skills", "Skills", 25.0, 70.0),
    Destination::new("experience", "Experience", 75.0, 45.0),
    Destination::new("education", "Education", 10.0, 55.0),
    Destination::new("blog", "Blog", 60.0, 85.0),
    Destination::new("contact", "Contact", 40.0, 90.0),
];

/// Immutable, non-empty, ordered list of destinations.
///
/// Order matters: docking ties go to the lower index and quick-jump
/// digits map to `index + 1`.
#[derive(Clone, Debug)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Build a catalog. Returns `None` for an empty list since an active
    /// destination must always exist.
    pub fn new(destinations: Vec<Destination>) -> Option<Self> {
        if destinations.is_empty() {
            return None;
        }
        Some(Self { destinations })
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Destination> {
        self.destinations.get(index)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.destinations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Destination> {
        self.destinations.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        default_catalog()
    }
}

/// The eight portfolio sections in display order.
pub fn default_catalog() -> Catalog {
    Catalog {
        destinations: SECTIONS.to_vec(),
    }
}
