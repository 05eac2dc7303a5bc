use crate::constants::{DOCK_MAX_SPEED, DOCK_RADIUS};
use crate::destination::Catalog;
use crate::vector::Vec2;

/// Index of the destination the craft docks with, if any.
///
/// Docking needs the craft strictly inside `DOCK_RADIUS` of an anchor and
/// moving strictly slower than `DOCK_MAX_SPEED`. The scan runs in catalog
/// order and stops at the first match, so lower indices win overlaps.
pub fn detect(position: Vec2, velocity: Vec2, catalog: &Catalog) -> Option<usize> {
    if velocity.length() >= DOCK_MAX_SPEED {
        return None;
    }
    catalog
        .iter()
        .position(|d| position.distance(d.anchor) < DOCK_RADIUS)
}
