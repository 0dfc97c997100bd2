//! # Stage Measure
//!
//! Measurement geometry for stage-plan diagrams. Given the positions of two
//! nodes on a stage plan, the crate produces everything a renderer needs to
//! draw a distance between them:
//! - **Axis snapping**: a free-form node-to-node line becomes a horizontal or
//!   vertical measurement segment
//! - **Connectors**: stubs from the true anchors to the snapped segment, drawn
//!   only when the anchor is visibly off the line
//! - **Dimension lines**: CAD-style offset lines with leaders, arrowheads and a
//!   distance label
//!
//! Labels are converted from pixels to meters with a scale factor carried in
//! [`DisplaySettings`]. A [`MeasurementSession`] owns the plan, the settings,
//! the click-to-edit label state and undo history.

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod config;
mod connectors;
mod constants;
mod dimension;
mod overlay;
mod session;
mod snapping;
mod types;
mod units;

// Re-export public types and functions
pub use config::{ConfigError, DisplaySettings, ScaleFactor};
pub use connectors::{connectors, connectors_with_threshold};
pub use constants::*;
pub use dimension::{dimension, dimension_default, dimension_with_arrow};
pub use overlay::{build_overlay, computed_label, MeasurementOverlay, OverlayGeometry};
pub use session::*;
pub use snapping::{snap, snap_axis};
pub use types::*;
pub use units::{display_label, format_meters, format_units, meters_to_px, px_to_meters};
