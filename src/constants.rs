//! Shared measurement-wide constants.
//! Centralizes the fixed geometry defaults and the values used by the renderers.

// Geometry defaults
/// Perpendicular distance (in pixels) an anchor must exceed before a connector stub is drawn.
pub const CONNECTOR_THRESHOLD: f32 = 20.0;
/// Distance (in pixels) a dimension line is pushed away from the node-to-node axis.
pub const DIMENSION_OFFSET_DISTANCE: f32 = 80.0;
/// Default offset angle (in degrees) relative to the node-to-node direction.
pub const DEFAULT_OFFSET_ANGLE: f32 = 90.0;
/// Length of a dimension-line arrowhead along the segment (in pixels).
pub const ARROW_SIZE: f32 = 12.0;
/// Default display scale in pixels per meter.
pub const DEFAULT_PX_PER_METER: f32 = 50.0;

// Rendering
/// Stroke width for measurement and dimension lines (in screen pixels).
pub const MEASUREMENT_STROKE_WIDTH: f32 = 1.5;
/// Stroke width for connector and leader stubs (in screen pixels).
pub const LEADER_STROKE_WIDTH: f32 = 1.0;
/// Dash length used for connector and leader stubs in SVG output.
pub const LEADER_DASH: f32 = 4.0;
/// Font size for distance labels.
pub const LABEL_FONT_SIZE: f32 = 12.0;
/// Radius (in world units) around a label's anchor that counts as a click on the label.
pub const LABEL_HIT_RADIUS: f32 = 18.0;
/// Padding (in world units) around nodes when computing SVG bounds.
pub const EXPORT_MARGIN: f32 = 40.0;
/// Radius used when drawing node markers in exports.
pub const NODE_MARKER_RADIUS: f32 = 6.0;

// Undo/redo
/// Maximum number of undo history entries to retain.
pub const MAX_UNDO_HISTORY: usize = 100;
