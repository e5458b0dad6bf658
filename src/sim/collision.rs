//! Collision detection
//!
//! The craft is a circle; each pylon contributes two axis-aligned
//! rectangles, one above the gap and one below it. The test is the
//! closest-point-on-rect against the circle center, compared squared.

use glam::Vec2;

use super::state::Pylon;

/// Circle vs axis-aligned rectangle, `min`/`max` corners.
#[inline]
pub fn circle_hits_rect(center: Vec2, radius: f32, min: Vec2, max: Vec2) -> bool {
    let closest = center.clamp(min, max);
    closest.distance_squared(center) < radius * radius
}

/// Test the craft against every pylon's segments, short-circuiting on the
/// first hit. Bounds are handled by the physics clamp, not here.
pub fn craft_hits_pylons(
    center: Vec2,
    radius: f32,
    pylons: &[Pylon],
    field_height: f32,
) -> bool {
    for pylon in pylons {
        let left = pylon.x;
        let right = pylon.trailing_edge();

        // Cheap reject: the circle cannot reach this pylon's column.
        if center.x + radius <= left || center.x - radius >= right {
            continue;
        }

        // Upper segment: y in [0, gap_top]
        let gap_top = pylon.gap_top();
        if gap_top > 0.0
            && circle_hits_rect(center, radius, Vec2::new(left, 0.0), Vec2::new(right, gap_top))
        {
            return true;
        }

        // Lower segment: y in [gap_bottom, field_height]
        let gap_bottom = pylon.gap_bottom();
        if gap_bottom < field_height
            && circle_hits_rect(
                center,
                radius,
                Vec2::new(left, gap_bottom),
                Vec2::new(right, field_height),
            )
        {
            return true;
        }
    }
    false
}
