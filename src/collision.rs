//! Read-only hit tests. Resolution is always the caller's job.

use crate::entity::{Body, Wall};

/// A run of pixels checked before committing a single-step move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    /// Vertical scan at `x`, rows `top..=bottom`.
    Column { x: i32, top: i32, bottom: i32 },
    /// Horizontal scan at `y`, columns `left..=right`.
    Row { y: i32, left: i32, right: i32 },
}

/// True when any active wall lights pixel `(x, y)`.
pub fn wall_hit(walls: &[Wall], x: i32, y: i32) -> bool {
    walls
        .iter()
        .filter(|w| w.active)
        .any(|w| w.segment.covers(x, y))
}

pub fn wall_span_hit(walls: &[Wall], span: Span) -> bool {
    match span {
        Span::Column { x, top, bottom } => (top..=bottom).any(|y| wall_hit(walls, x, y)),
        Span::Row { y, left, right } => (left..=right).any(|x| wall_hit(walls, x, y)),
    }
}

/// Bounding-box test with inclusive edges.
pub fn broad_phase(a: &Body, b: &Body) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Full collision: box rejection first, then the pixel test.
pub fn obj_collided(a: &Body, b: &Body) -> bool {
    if !a.active || !b.active {
        return false;
    }
    broad_phase(a, b) && collide_bitmaps(a, b)
}

/// Pixel test over the overlap of the two boxes. Both bitmaps must be direct.
pub fn collide_bitmaps(a: &Body, b: &Body) -> bool {
    let ra = a.bounds();
    let rb = b.bounds();
    let top = ra.top.max(rb.top);
    let bottom = ra.bottom.min(rb.bottom);
    let left = ra.left.max(rb.left);
    let right = ra.right.min(rb.right);

    for row in 0..=(bottom - top) {
        for col in 0..=(right - left) {
            let (a_col, a_row) = (left - ra.left + col, top - ra.top + row);
            let (b_col, b_row) = (left - rb.left + col, top - rb.top + row);
            if a.bitmap.is_set(a_col, a_row) && b.bitmap.is_set(b_col, b_row) {
                return true;
            }
        }
    }
    false
}
