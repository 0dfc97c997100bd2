//! Connector stubs between true anchors and a snapped measurement segment.

use crate::constants::CONNECTOR_THRESHOLD;
use crate::types::{ConnectorLine, Connectors, Point, SnapAxis, SnappedSegment};

/// Perpendicular distance from `anchor` to the line of `segment`.
fn perpendicular_offset(anchor: Point, snapped: Point, axis: SnapAxis) -> f32 {
    match axis {
        SnapAxis::Horizontal => (anchor.y - snapped.y).abs(),
        SnapAxis::Vertical => (anchor.x - snapped.x).abs(),
    }
}

fn stub(anchor: Point, snapped: Point, axis: SnapAxis, threshold: f32) -> Option<ConnectorLine> {
    (perpendicular_offset(anchor, snapped, axis) > threshold).then_some(ConnectorLine {
        from: anchor,
        to: snapped,
    })
}

/// Computes the connector stubs for a snapped measurement using the fixed
/// [`CONNECTOR_THRESHOLD`].
pub fn connectors(source: Point, target: Point, segment: &SnappedSegment) -> Connectors {
    connectors_with_threshold(source, target, segment, CONNECTOR_THRESHOLD)
}

/// Computes the connector stubs for a snapped measurement.
///
/// A stub from an anchor to its snapped endpoint is emitted only when the
/// anchor sits strictly further than `threshold` pixels from the segment's line.
///
/// # Arguments
///
/// * `source` - True anchor matched with `segment.start`
/// * `target` - True anchor matched with `segment.end`
/// * `segment` - Result of [`crate::snap`] for the same anchors
/// * `threshold` - Minimum perpendicular offset, in pixels
pub fn connectors_with_threshold(
    source: Point,
    target: Point,
    segment: &SnappedSegment,
    threshold: f32,
) -> Connectors {
    Connectors {
        source: stub(source, segment.start, segment.axis, threshold),
        target: stub(target, segment.end, segment.axis, threshold),
    }
}
