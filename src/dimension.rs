//! CAD-style offset dimension lines between two node centers.
//!
//! The dimension line runs parallel to the node-to-node axis, pushed off it by a
//! fixed distance in a configurable direction, with leaders back to both node
//! centers and an arrowhead at each end.

use crate::constants::{ARROW_SIZE, DEFAULT_OFFSET_ANGLE, DIMENSION_OFFSET_DISTANCE};
use crate::types::{ConnectorLine, DimensionLine, Point};

/// Builds a dimension line with the default offset angle and distance.
pub fn dimension_default(node_a: Point, node_b: Point) -> DimensionLine {
    dimension(node_a, node_b, DEFAULT_OFFSET_ANGLE, DIMENSION_OFFSET_DISTANCE)
}

/// Builds a dimension line with the default arrow size.
///
/// # Arguments
///
/// * `node_a` - Center of the first node
/// * `node_b` - Center of the second node
/// * `offset_angle_deg` - Offset direction relative to the A-to-B direction (90 = perpendicular)
/// * `offset_distance` - How far both endpoints are pushed, in pixels
pub fn dimension(
    node_a: Point,
    node_b: Point,
    offset_angle_deg: f32,
    offset_distance: f32,
) -> DimensionLine {
    dimension_with_arrow(node_a, node_b, offset_angle_deg, offset_distance, ARROW_SIZE)
}

/// Builds a dimension line with an explicit arrowhead size.
pub fn dimension_with_arrow(
    node_a: Point,
    node_b: Point,
    offset_angle_deg: f32,
    offset_distance: f32,
    arrow_size: f32,
) -> DimensionLine {
    let dx = node_b.x - node_a.x;
    let dy = node_b.y - node_a.y;
    let center_distance = dx.hypot(dy);
    let angle_degrees = dy.atan2(dx).to_degrees();

    // Both ends move by the same vector, so the line stays parallel to A-B
    let offset_rad = (angle_degrees + offset_angle_deg).to_radians();
    let shift_x = offset_distance * offset_rad.cos();
    let shift_y = offset_distance * offset_rad.sin();
    let start = node_a.offset(shift_x, shift_y);
    let end = node_b.offset(shift_x, shift_y);

    DimensionLine {
        start,
        end,
        leaders: [
            ConnectorLine { from: node_a, to: start },
            ConnectorLine { from: node_b, to: end },
        ],
        label_position: start.midpoint(end),
        center_distance,
        angle_degrees,
        arrowheads: arrowheads(start, end, angle_degrees, arrow_size),
    }
}

/// Arrowhead triangles at both ends of a segment pointing along `angle_degrees`.
///
/// Each triangle has its apex on the endpoint and its base `arrow_size` further
/// inside the segment, `arrow_size` wide.
fn arrowheads(start: Point, end: Point, angle_degrees: f32, arrow_size: f32) -> [[Point; 3]; 2] {
    let rad = angle_degrees.to_radians();
    let (ux, uy) = (rad.cos(), rad.sin());
    let (px, py) = (-uy, ux);
    let half = arrow_size * 0.5;

    let head = |apex: Point, inward: f32| {
        let base = apex.offset(ux * arrow_size * inward, uy * arrow_size * inward);
        [
            apex,
            base.offset(px * half, py * half),
            base.offset(-px * half, -py * half),
        ]
    };

    [head(start, 1.0), head(end, -1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-3);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-3);
    }

    #[test]
    fn test_horizontal_pair_offsets_downwards() {
        let line = dimension(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 90.0, 80.0);

        assert_abs_diff_eq!(line.angle_degrees, 0.0);
        assert_abs_diff_eq!(line.center_distance, 100.0);
        assert_point_eq(line.start, Point::new(0.0, 80.0));
        assert_point_eq(line.end, Point::new(100.0, 80.0));
        assert_point_eq(line.label_position, Point::new(50.0, 80.0));
    }

    #[test]
    fn test_defaults_match_explicit_call() {
        let a = Point::new(10.0, 20.0);
        let b = Point::new(-40.0, 95.0);
        assert_eq!(dimension_default(a, b), dimension(a, b, 90.0, 80.0));
    }

    #[test]
    fn test_leaders_always_present() {
        let line = dimension(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 90.0, 80.0);

        assert_eq!(line.leaders[0].from, Point::new(0.0, 0.0));
        assert_eq!(line.leaders[0].to, line.start);
        assert_eq!(line.leaders[1].from, Point::new(100.0, 0.0));
        assert_eq!(line.leaders[1].to, line.end);
        for leader in &line.leaders {
            assert_abs_diff_eq!(leader.length(), 80.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_coincident_nodes_still_get_leaders() {
        let p = Point::new(30.0, 30.0);
        let line = dimension(p, p, 90.0, 80.0);

        assert_eq!(line.center_distance, 0.0);
        assert_point_eq(line.start, Point::new(30.0, 110.0));
        assert_eq!(line.start, line.end);
        for leader in &line.leaders {
            assert_abs_diff_eq!(leader.length(), 80.0, epsilon = 1e-3);
        }
        for head in &line.arrowheads {
            assert!(head.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        }
    }

    #[test]
    fn test_zero_offset_distance_collapses_onto_axis() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 50.0);
        let line = dimension(a, b, 90.0, 0.0);

        assert_eq!(line.start, a);
        assert_eq!(line.end, b);
        assert_eq!(line.leaders[0].length(), 0.0);
    }

    #[test]
    fn test_offset_line_is_parallel() {
        let a = Point::new(10.0, 10.0);
        let b = Point::new(130.0, 60.0);
        let line = dimension(a, b, 45.0, 80.0);

        let (adx, ady) = (b.x - a.x, b.y - a.y);
        let (ldx, ldy) = (line.end.x - line.start.x, line.end.y - line.start.y);
        assert_abs_diff_eq!(adx, ldx, epsilon = 1e-3);
        assert_abs_diff_eq!(ady, ldy, epsilon = 1e-3);
    }

    #[test]
    fn test_arrowheads_point_outwards() {
        let line = dimension(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 90.0, 80.0);
        let [start_head, end_head] = line.arrowheads;

        assert_point_eq(start_head[0], Point::new(0.0, 80.0));
        assert_point_eq(start_head[1], Point::new(12.0, 86.0));
        assert_point_eq(start_head[2], Point::new(12.0, 74.0));

        assert_point_eq(end_head[0], Point::new(100.0, 80.0));
        assert_point_eq(end_head[1], Point::new(88.0, 86.0));
        assert_point_eq(end_head[2], Point::new(88.0, 74.0));
    }

    #[test]
    fn test_custom_arrow_size() {
        let line = dimension_with_arrow(
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            90.0,
            80.0,
            20.0,
        );

        // A->B points down, so a +90 offset pushes towards negative x
        assert_abs_diff_eq!(line.angle_degrees, 90.0, epsilon = 1e-3);
        assert_point_eq(line.start, Point::new(-80.0, 0.0));
        assert_point_eq(line.arrowheads[0][1], Point::new(-90.0, 20.0));
        assert_point_eq(line.arrowheads[0][2], Point::new(-70.0, 20.0));
    }
}
