//! Per-frame measurement overlays.
//!
//! An overlay bundles everything a renderer needs to draw one measurement: the
//! geometry for its style, the label text, and where the label goes.

use crate::config::DisplaySettings;
use crate::connectors::connectors_with_threshold;
use crate::constants::LABEL_HIT_RADIUS;
use crate::dimension::dimension_with_arrow;
use crate::snapping::snap;
use crate::types::*;
use crate::units::{display_label, format_meters, format_units};
use serde::{Deserialize, Serialize};

/// Geometry of one measurement, by style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverlayGeometry {
    /// Axis-snapped segment with its connector stubs
    Snapped {
        /// The snapped measurement segment
        segment: SnappedSegment,
        /// Stubs back to the true anchors
        connectors: Connectors,
    },
    /// Offset dimension line
    Dimension(DimensionLine),
}

/// Everything needed to draw one measurement for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementOverlay {
    /// Measurement this overlay was built from
    pub id: MeasurementId,
    /// Lines, stubs and arrowheads
    pub geometry: OverlayGeometry,
    /// Text to show (override or computed distance)
    pub label: String,
    /// Center of the label
    pub label_position: Point,
    /// Whether the label is currently being edited
    pub editing: bool,
}

impl MeasurementOverlay {
    /// Returns true if `point` falls on the label's clickable area.
    pub fn label_contains(&self, point: Point) -> bool {
        (point.x - self.label_position.x).abs() <= LABEL_HIT_RADIUS
            && (point.y - self.label_position.y).abs() <= LABEL_HIT_RADIUS
    }
}

/// Computed (non-overridden) label for a measurement between two node centers.
pub fn computed_label(
    kind: MeasurementKind,
    start: Point,
    end: Point,
    settings: &DisplaySettings,
) -> String {
    match kind {
        MeasurementKind::AxisSnapped => format_meters(snap(start, end).distance, settings.px_per_meter),
        MeasurementKind::Dimension => format_units(start.distance_to(end)),
    }
}

/// Builds the overlay for one measurement.
///
/// # Arguments
///
/// * `measurement` - The measurement being drawn
/// * `start` - Current center of `measurement.start_node`
/// * `end` - Current center of `measurement.end_node`
/// * `settings` - Session display settings
pub fn build_overlay(
    measurement: &Measurement,
    start: Point,
    end: Point,
    settings: &DisplaySettings,
) -> MeasurementOverlay {
    let (geometry, computed, label_position) = match measurement.kind {
        MeasurementKind::AxisSnapped => {
            let segment = snap(start, end);
            let connectors = if settings.show_connectors {
                connectors_with_threshold(start, end, &segment, settings.connector_threshold)
            } else {
                Connectors::default()
            };
            (
                OverlayGeometry::Snapped { segment, connectors },
                format_meters(segment.distance, settings.px_per_meter),
                segment.mid,
            )
        }
        MeasurementKind::Dimension => {
            let line = dimension_with_arrow(
                start,
                end,
                measurement.effective_offset_angle(),
                settings.offset_distance,
                settings.arrow_size,
            );
            (
                OverlayGeometry::Dimension(line),
                format_units(line.center_distance),
                line.label_position,
            )
        }
    };

    MeasurementOverlay {
        id: measurement.id,
        geometry,
        label: display_label(computed, measurement.custom_distance.as_deref()),
        label_position,
        editing: false,
    }
}
