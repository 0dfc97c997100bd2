//! Axis snapping for node-to-node measurement lines.
//!
//! A free-form line between two anchors is presented as either a horizontal or
//! a vertical line, placed halfway between the anchors on the other axis.

use crate::types::{Point, SnapAxis, SnappedSegment};

/// Picks the axis a measurement between `source` and `target` is drawn along.
///
/// The axis with the larger spread wins. Equal spreads resolve to
/// [`SnapAxis::Horizontal`].
pub fn snap_axis(source: Point, target: Point) -> SnapAxis {
    let horizontal_distance = (target.x - source.x).abs();
    let vertical_distance = (target.y - source.y).abs();
    if horizontal_distance >= vertical_distance {
        SnapAxis::Horizontal
    } else {
        SnapAxis::Vertical
    }
}

/// Snaps the line between two anchors onto a horizontal or vertical segment.
///
/// # Arguments
///
/// * `source` - True anchor on the start node
/// * `target` - True anchor on the end node
///
/// # Returns
///
/// The axis-aligned segment with its midpoint and pixel length. Coincident
/// anchors produce a zero-length horizontal segment.
pub fn snap(source: Point, target: Point) -> SnappedSegment {
    let axis = snap_axis(source, target);
    let (start, end) = match axis {
        SnapAxis::Horizontal => {
            let aligned_y = (source.y + target.y) / 2.0;
            (
                Point::new(source.x, aligned_y),
                Point::new(target.x, aligned_y),
            )
        }
        SnapAxis::Vertical => {
            let aligned_x = (source.x + target.x) / 2.0;
            (
                Point::new(aligned_x, source.y),
                Point::new(aligned_x, target.y),
            )
        }
    };

    SnappedSegment {
        start,
        end,
        mid: start.midpoint(end),
        distance: start.distance_to(end),
        axis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_pair_snaps_horizontal() {
        let seg = snap(Point::new(0.0, 0.0), Point::new(100.0, 30.0));

        assert_eq!(seg.axis, SnapAxis::Horizontal);
        assert_eq!(seg.start, Point::new(0.0, 15.0));
        assert_eq!(seg.end, Point::new(100.0, 15.0));
        assert_eq!(seg.mid, Point::new(50.0, 15.0));
        assert_eq!(seg.distance, 100.0);
    }

    #[test]
    fn test_tall_pair_snaps_vertical() {
        let seg = snap(Point::new(0.0, 0.0), Point::new(10.0, 100.0));

        assert_eq!(seg.axis, SnapAxis::Vertical);
        assert_eq!(seg.start, Point::new(5.0, 0.0));
        assert_eq!(seg.end, Point::new(5.0, 100.0));
        assert_eq!(seg.distance, 100.0);
    }

    #[test]
    fn test_equal_spread_resolves_horizontal() {
        let seg = snap(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        assert_eq!(seg.axis, SnapAxis::Horizontal);
        assert_eq!(seg.start.y, seg.end.y);

        // Same rule with negative deltas
        assert_eq!(
            snap_axis(Point::new(10.0, 10.0), Point::new(-10.0, -10.0)),
            SnapAxis::Horizontal
        );
    }

    #[test]
    fn test_coincident_anchors_give_zero_length() {
        let p = Point::new(42.5, -17.0);
        let seg = snap(p, p);

        assert_eq!(seg.axis, SnapAxis::Horizontal);
        assert_eq!(seg.distance, 0.0);
        assert_eq!(seg.start, p);
        assert_eq!(seg.end, p);
        assert_eq!(seg.mid, p);
    }

    #[test]
    fn test_axis_invariant_holds_across_directions() {
        let origin = Point::new(200.0, 200.0);
        for step in 0..36 {
            let angle = (step as f32 * 10.0).to_radians();
            let target = origin.offset(angle.cos() * 137.0, angle.sin() * 59.0 + step as f32);
            let seg = snap(origin, target);
            match seg.axis {
                SnapAxis::Horizontal => assert_eq!(seg.start.y, seg.end.y),
                SnapAxis::Vertical => assert_eq!(seg.start.x, seg.end.x),
            }
            assert!(seg.distance >= 0.0);
        }
    }

    #[test]
    fn test_reversed_anchors_keep_length() {
        let a = Point::new(12.0, 80.0);
        let b = Point::new(220.0, 30.0);

        let forward = snap(a, b);
        let backward = snap(b, a);

        assert_eq!(forward.axis, backward.axis);
        assert_eq!(forward.distance, backward.distance);
        assert_eq!(forward.start, backward.end);
    }
}
