//! Drawing measurement overlays on an egui canvas.
//!
//! Overlays are computed in world (diagram pixel) space; a [`CanvasTransform`]
//! maps them to the screen with the canvas's current pan and zoom.

use crate::constants;
use crate::overlay::{MeasurementOverlay, OverlayGeometry};
use crate::types::{ConnectorLine, Point};
use egui::epaint::StrokeKind;

/// Pan and zoom of the canvas the overlays are drawn on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    /// Canvas pan offset (in screen space)
    pub offset: egui::Vec2,
    /// Zoom level (1.0 = normal)
    pub zoom: f32,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CanvasTransform {
    /// Converts world coordinates to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> egui::Pos2 {
        egui::pos2(world.x, world.y) * self.zoom + self.offset
    }

    /// Converts screen coordinates to world coordinates.
    pub fn screen_to_world(&self, screen: egui::Pos2) -> Point {
        let world = (screen - self.offset) / self.zoom;
        Point::new(world.x, world.y)
    }
}

/// Draws every overlay, in order.
pub fn paint_overlays(
    painter: &egui::Painter,
    transform: &CanvasTransform,
    overlays: &[MeasurementOverlay],
) {
    for overlay in overlays {
        paint_overlay(painter, transform, overlay);
    }
}

/// Draws one overlay: stubs first, then the measurement line, arrowheads and label.
pub fn paint_overlay(
    painter: &egui::Painter,
    transform: &CanvasTransform,
    overlay: &MeasurementOverlay,
) {
    let color = if overlay.editing {
        egui::Color32::from_rgb(100, 150, 255)
    } else {
        egui::Color32::DARK_GRAY
    };
    let zoom = transform.zoom;
    let line_stroke = egui::Stroke::new(constants::MEASUREMENT_STROKE_WIDTH, color);
    let stub_stroke = egui::Stroke::new(constants::LEADER_STROKE_WIDTH, color);

    let dashed = |stub: &ConnectorLine| {
        painter.extend(egui::Shape::dashed_line(
            &[
                transform.world_to_screen(stub.from),
                transform.world_to_screen(stub.to),
            ],
            stub_stroke,
            constants::LEADER_DASH * zoom,
            constants::LEADER_DASH * zoom,
        ));
    };

    match &overlay.geometry {
        OverlayGeometry::Snapped { segment, connectors } => {
            connectors.iter().for_each(dashed);
            painter.line_segment(
                [
                    transform.world_to_screen(segment.start),
                    transform.world_to_screen(segment.end),
                ],
                line_stroke,
            );
        }
        OverlayGeometry::Dimension(line) => {
            line.leaders.iter().for_each(dashed);
            painter.line_segment(
                [
                    transform.world_to_screen(line.start),
                    transform.world_to_screen(line.end),
                ],
                line_stroke,
            );
            for head in &line.arrowheads {
                painter.add(egui::Shape::convex_polygon(
                    head.iter().map(|p| transform.world_to_screen(*p)).collect(),
                    color,
                    egui::Stroke::NONE,
                ));
            }
        }
    }

    // Scale font size with zoom for readability
    let font_size = (constants::LABEL_FONT_SIZE * zoom).clamp(8.0, 24.0);
    let text_rect = painter.text(
        transform.world_to_screen(overlay.label_position),
        egui::Align2::CENTER_CENTER,
        &overlay.label,
        egui::FontId::proportional(font_size),
        color,
    );
    if overlay.editing {
        painter.rect_stroke(
            text_rect.expand(3.0),
            2.0,
            egui::Stroke::new(1.0, color),
            StrokeKind::Outside,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;
    use crate::session::{LabelEvent, MeasurementSession};
    use crate::types::MeasurementKind;

    /// Run a single headless egui frame and return the number of shapes produced.
    fn shapes_in_frame(mut f: impl FnMut(&egui::Painter)) -> usize {
        let mut raw = egui::RawInput::default();
        raw.screen_rect = Some(egui::Rect::from_min_size(
            egui::Pos2::ZERO,
            egui::vec2(1200.0, 800.0),
        ));

        let ctx = egui::Context::default();
        let output = ctx.run(raw, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                f(ui.painter());
            });
        });
        output.shapes.len()
    }

    #[test]
    fn test_transform_roundtrip() {
        let transform = CanvasTransform {
            offset: egui::vec2(30.0, -12.0),
            zoom: 2.5,
        };
        let world = Point::new(17.0, 42.0);

        let screen = transform.world_to_screen(world);
        assert_eq!(screen, egui::pos2(72.5, 93.0));

        let back = transform.screen_to_world(screen);
        assert!((back.x - world.x).abs() < 1e-4);
        assert!((back.y - world.y).abs() < 1e-4);
    }

    #[test]
    fn test_painting_overlays_adds_shapes() {
        let mut session = MeasurementSession::new(DisplaySettings::default());
        let a = session.add_node("Drums", (100.0, 100.0));
        let b = session.add_node("Bass", (400.0, 220.0));
        session.add_measurement(a, b, MeasurementKind::Dimension).unwrap();
        let snapped = session
            .add_measurement(a, b, MeasurementKind::AxisSnapped)
            .unwrap();
        session
            .handle_label_event(snapped, LabelEvent::BeginEdit)
            .unwrap();
        let overlays = session.overlays();
        let transform = CanvasTransform::default();

        let empty = shapes_in_frame(|_| {});
        let painted = shapes_in_frame(|painter| paint_overlays(painter, &transform, &overlays));

        // At minimum: two lines, two arrowheads, two labels and the edit frame
        assert!(painted >= empty + 7, "painted {painted}, empty {empty}");
    }
}
