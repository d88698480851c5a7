//! Degenerate triangle rejection.

use config::constants::DEGENERATE_EPSILON;
use glam::DVec2;

/// True when the two edges leaving `p0` are parallel: both vertical, both
/// horizontal, or with slopes closer than `DEGENERATE_EPSILON`.
pub(crate) fn is_degenerate(p0: DVec2, p1: DVec2, p2: DVec2) -> bool {
    let d0 = p1 - p0;
    let d1 = p2 - p0;
    let vertical = |d: DVec2| d.x.abs() < DEGENERATE_EPSILON;
    let horizontal = |d: DVec2| d.y.abs() < DEGENERATE_EPSILON;

    if vertical(d0) && vertical(d1) {
        return true;
    }
    if horizontal(d0) && horizontal(d1) {
        return true;
    }
    if vertical(d0) || vertical(d1) {
        return false;
    }
    (d1.y / d1.x - d0.y / d0.x).abs() < DEGENERATE_EPSILON
}
