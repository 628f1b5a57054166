use crate::foundation::core::Point4D;

/// Pointer moves shorter than this (4D distance) are ignored.
pub const MIN_PAINT_SEGMENT: f64 = 0.2;
/// Spacing of the instances laid down along a painted segment.
pub const PAINT_STEP: f64 = 0.1;

/// Points to place along the segment `from -> to`, excluding `from` and including `to`.
///
/// Returns `None` when the segment is not longer than [`MIN_PAINT_SEGMENT`] or not finite.
/// The points are produced lazily; a very long drag yields more points than any instance
/// buffer can hold, so callers stop pulling once nothing more can be placed.
pub fn segment_points(from: Point4D, to: Point4D) -> Option<impl Iterator<Item = Point4D>> {
    let d = from.distance(to);
    if !d.is_finite() || d <= MIN_PAINT_SEGMENT {
        return None;
    }
    // Saturates at usize::MAX for astronomically long segments.
    let steps = (d / PAINT_STEP).ceil() as usize;
    Some((1..=steps).map(move |i| from.lerp(to, i as f64 / steps as f64)))
}
