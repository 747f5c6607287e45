//! Geometry kernel
//!
//! Stroke-width lines, arrow heads and tessellated arcs built on top of the
//! surface's 1px primitives. None of these operations fail on degenerate
//! input; they only propagate surface errors.

use core::f64::consts::TAU;

pub use papr_protocol::vec2::Vec2;

use crate::backend::{DisplayError, DisplaySurface};

/// Full-circle tessellation resolution
pub const DEFAULT_ARC_STEPS: u32 = 48;

/// Minimum number of segments in any arc
pub const MIN_ARC_SEGMENTS: u32 = 8;

/// Arcs at or below this radius are not drawn
pub const MIN_ARC_RADIUS: f64 = 0.01;

/// Sweeps smaller than this (in magnitude) are widened to it
pub const MIN_ARC_SWEEP: f64 = 0.001;

/// Round to the nearest integer pixel, halves away from zero
pub fn iround(v: f64) -> i32 {
    libm::round(v) as i32
}

/// Draw a line `thickness` pixels wide from `a` to `b`
///
/// Wide strokes are drawn as parallel 1px lines offset along the normal.
/// Even widths use half-pixel offsets and drop the outermost line so the
/// stroke stays centered.
pub fn draw_line<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    a: Vec2,
    b: Vec2,
    thickness: u32,
) -> Result<(), DisplayError> {
    let stroke = thickness.max(1) as i32;
    if stroke == 1 {
        return surface.draw_line(iround(a.x), iround(a.y), iround(b.x), iround(b.y));
    }

    let normal = (b - a).normalize().perp();
    let even = stroke % 2 == 0;
    let center_offset = if even { 0.5 } else { 0.0 };
    let half = stroke / 2;

    for i in -half..=half {
        if even && i == half {
            continue;
        }
        let shift = normal * (i as f64 + center_offset);
        let (da, db) = (a + shift, b + shift);
        surface.draw_line(iround(da.x), iround(da.y), iround(db.x), iround(db.y))?;
    }
    Ok(())
}

/// Barb endpoints of an arrow head at `tip` pointing away from `from`
///
/// Each barb is pulled back `size` along the shaft and spread `size / 2`
/// to either side.
pub fn arrow_head_points(tip: Vec2, from: Vec2, size: f64) -> (Vec2, Vec2) {
    let dir = (tip - from).normalize();
    let n = dir.perp();
    let base = tip - dir * size;
    (base + n * (size * 0.5), base - n * (size * 0.5))
}

/// Draw both barbs of an arrow head
pub fn draw_arrow_head<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    tip: Vec2,
    from: Vec2,
    size: f64,
    thickness: u32,
) -> Result<(), DisplayError> {
    let (p1, p2) = arrow_head_points(tip, from, size);
    draw_line(surface, tip, p1, thickness)?;
    draw_line(surface, tip, p2, thickness)
}

/// Sweep actually drawn for a requested sweep
fn effective_sweep(sweep: f64) -> f64 {
    if libm::fabs(sweep) < MIN_ARC_SWEEP {
        MIN_ARC_SWEEP
    } else {
        sweep
    }
}

/// Number of straight segments used for an arc of `sweep` radians
///
/// Proportional to the sweep with `steps` segments per full turn, and never
/// fewer than [`MIN_ARC_SEGMENTS`].
pub fn arc_segment_count(sweep: f64, steps: u32) -> u32 {
    let sweep = libm::fabs(effective_sweep(sweep));
    let proportional = libm::floor(sweep / TAU * steps as f64);
    if proportional.is_finite() && proportional > MIN_ARC_SEGMENTS as f64 {
        proportional.min(u32::MAX as f64) as u32
    } else {
        MIN_ARC_SEGMENTS
    }
}

/// Draw an arc around `center` as a polyline
///
/// Starts at `start` radians and runs `sweep` radians, positive sweeps
/// turning from +x towards +y.
pub fn draw_arc<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    center: Vec2,
    radius: f64,
    start: f64,
    sweep: f64,
    steps: u32,
    thickness: u32,
) -> Result<(), DisplayError> {
    if radius <= MIN_ARC_RADIUS {
        return Ok(());
    }

    let sweep = effective_sweep(sweep);
    let segments = arc_segment_count(sweep, steps);
    let mut prev = center.polar(radius, start);

    for i in 1..=segments {
        let t = i as f64 / segments as f64;
        let current = center.polar(radius, start + sweep * t);
        draw_line(surface, prev, current, thickness)?;
        prev = current;
    }
    Ok(())
}

/// Draw a closed polygon through `corners`
pub fn draw_polygon<S: DisplaySurface + ?Sized>(
    surface: &mut S,
    corners: &[Vec2],
    thickness: u32,
) -> Result<(), DisplayError> {
    let Some(&last) = corners.last() else {
        return Ok(());
    };
    let mut prev = last;
    for &corner in corners {
        draw_line(surface, prev, corner, thickness)?;
        prev = corner;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingSurface};
    use alloc::vec;
    use proptest::prelude::*;

    #[test]
    fn test_iround_halves_away_from_zero() {
        assert_eq!(iround(2.5), 3);
        assert_eq!(iround(-2.5), -3);
        assert_eq!(iround(2.49), 2);
    }

    #[test]
    fn test_thin_line_rounds_endpoints() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_line(&mut surface, Vec2::new(1.4, 2.6), Vec2::new(10.5, 2.0), 1).unwrap();
        assert_eq!(surface.ops, vec![Op::Line(1, 3, 11, 2)]);
    }

    #[test]
    fn test_zero_thickness_is_one() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_line(&mut surface, Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0), 0).unwrap();
        assert_eq!(surface.ops.len(), 1);
    }

    #[test]
    fn test_odd_thickness_offsets() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_line(&mut surface, Vec2::new(0.0, 10.0), Vec2::new(20.0, 10.0), 3).unwrap();
        assert_eq!(
            surface.ops,
            vec![
                Op::Line(0, 9, 20, 9),
                Op::Line(0, 10, 20, 10),
                Op::Line(0, 11, 20, 11),
            ]
        );
    }

    #[test]
    fn test_even_thickness_skips_last_offset() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_line(&mut surface, Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0), 2).unwrap();
        // normal of +y is -x; offsets -0.5 and +0.5
        assert_eq!(
            surface.ops,
            vec![Op::Line(11, 0, 11, 20), Op::Line(10, 0, 10, 20)]
        );
    }

    #[test]
    fn test_arrow_head_points() {
        let (p1, p2) = arrow_head_points(Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0), 10.0);
        assert_eq!(p1, Vec2::new(90.0, 5.0));
        assert_eq!(p2, Vec2::new(90.0, -5.0));
    }

    #[test]
    fn test_arc_segment_count() {
        assert_eq!(arc_segment_count(0.0, 48), 8);
        assert_eq!(arc_segment_count(core::f64::consts::FRAC_PI_2, 48), 12);
        assert_eq!(arc_segment_count(TAU, 48), 48);
        assert_eq!(arc_segment_count(-TAU, 48), 48);
        assert_eq!(arc_segment_count(TAU, 0), 8);
    }

    #[test]
    fn test_tiny_radius_draws_nothing() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_arc(&mut surface, Vec2::new(50.0, 50.0), 0.01, 0.0, 1.0, 48, 1).unwrap();
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_arc_polyline() {
        let mut surface = RecordingSurface::new(200, 200);
        draw_arc(
            &mut surface,
            Vec2::new(50.0, 50.0),
            40.0,
            0.0,
            core::f64::consts::FRAC_PI_2,
            48,
            1,
        )
        .unwrap();
        assert_eq!(surface.ops.len(), 12);
        assert_eq!(surface.ops.first(), Some(&Op::Line(90, 50, 90, 55)));
        let Some(&Op::Line(_, _, x, y)) = surface.ops.last() else {
            panic!("expected line");
        };
        assert_eq!((x, y), (50, 90));
    }

    #[test]
    fn test_zero_sweep_still_draws() {
        let mut surface = RecordingSurface::new(100, 100);
        draw_arc(&mut surface, Vec2::new(50.0, 50.0), 10.0, 0.0, 0.0, 48, 1).unwrap();
        assert_eq!(surface.ops.len(), 8);
    }

    #[test]
    fn test_polygon_closes() {
        let mut surface = RecordingSurface::new(100, 100);
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
        ];
        draw_polygon(&mut surface, &corners, 1).unwrap();
        assert_eq!(
            surface.ops,
            vec![
                Op::Line(10, 10, 0, 0),
                Op::Line(0, 0, 10, 0),
                Op::Line(10, 0, 10, 10),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_arc_segments_monotonic(a in 0.0f64..20.0, b in 0.0f64..20.0, steps in 0u32..512) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let n_lo = arc_segment_count(lo, steps);
            let n_hi = arc_segment_count(hi, steps);
            prop_assert!(n_lo >= MIN_ARC_SEGMENTS);
            prop_assert!(n_hi >= n_lo);
        }

        #[test]
        fn prop_arc_segments_symmetric(sweep in -20.0f64..20.0) {
            prop_assert_eq!(arc_segment_count(sweep, 48), arc_segment_count(-sweep, 48));
        }
    }
}
