//! Pixel/meter conversion and distance label formatting.

use crate::config::ScaleFactor;

/// Converts a pixel distance to meters.
pub fn px_to_meters(px: f32, scale: ScaleFactor) -> f32 {
    px / scale.px_per_meter()
}

/// Converts a distance in meters back to pixels.
pub fn meters_to_px(meters: f32, scale: ScaleFactor) -> f32 {
    meters * scale.px_per_meter()
}

/// Label for the scale-aware (axis-snapped) measurement, e.g. `"2.00 m"`.
///
/// Exact half-centimeter ties round away from zero, so 1.125 m reads `"1.13 m"`.
pub fn format_meters(px: f32, scale: ScaleFactor) -> String {
    // An f32 times 100 is exact in f64, so ties stay ties
    let centimeters = (f64::from(px_to_meters(px, scale)) * 100.0).round();
    format!("{:.2} m", centimeters / 100.0)
}

/// Label for the raw dimension-line measurement, e.g. `"100 units"`.
pub fn format_units(px: f32) -> String {
    format!("{} units", px.round() as i64)
}

/// Returns the override text when one is set, otherwise the computed label.
///
/// Blank overrides count as "no override".
pub fn display_label(computed: String, custom_distance: Option<&str>) -> String {
    match custom_distance {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => computed,
    }
}
