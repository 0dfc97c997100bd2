//! Export utilities: render measurement overlays to an SVG document.

use super::MeasurementSession;
use crate::constants;
use crate::overlay::{MeasurementOverlay, OverlayGeometry};
use crate::types::*;
use egui::Color32;
use std::fmt::Write as _;

/// Options controlling SVG output.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Space added around the drawing, in pixels
    pub margin: f32,
    /// Color for measurement lines, stubs, arrowheads and labels
    pub stroke_color: Color32,
    /// Draw a marker and name for every node
    pub include_nodes: bool,
    /// Fill the document with `background_color`
    pub include_background: bool,
    /// Background fill
    pub background_color: Color32,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            margin: constants::EXPORT_MARGIN,
            stroke_color: Color32::from_rgb(40, 40, 40),
            include_nodes: true,
            include_background: false,
            background_color: Color32::WHITE,
        }
    }
}

impl MeasurementSession {
    /// Renders the current overlays (and optionally nodes) as an SVG document.
    pub fn to_svg(&self, options: &SvgOptions) -> String {
        render_svg(&self.plan, &self.overlays(), options)
    }
}

fn overlay_points(overlay: &MeasurementOverlay) -> Vec<Point> {
    let mut points = vec![overlay.label_position];
    match &overlay.geometry {
        OverlayGeometry::Snapped { segment, connectors } => {
            points.extend([segment.start, segment.end]);
            points.extend(connectors.iter().map(|c| c.from));
        }
        OverlayGeometry::Dimension(line) => {
            points.extend(line.leaders.iter().map(|l| l.from));
            points.extend(line.arrowheads.iter().flatten().copied());
        }
    }
    points
}

fn hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

/// Renders overlays for `plan` into a standalone SVG document.
///
/// The document is sized to fit every node and overlay plus `options.margin`.
pub fn render_svg(plan: &StagePlan, overlays: &[MeasurementOverlay], options: &SvgOptions) -> String {
    let margin = options.margin.max(0.0);
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    let node_points = plan.nodes.values().map(|n| n.position);
    let drawn_points = overlays.iter().flat_map(overlay_points);
    for p in node_points.chain(drawn_points) {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    // Fallback if there is nothing to draw: provide a small canvas
    if !min_x.is_finite() || !min_y.is_finite() {
        min_x = 0.0;
        min_y = 0.0;
        max_x = 0.0;
        max_y = 0.0;
    }

    let width = ((max_x - min_x) + 2.0 * margin).ceil().max(1.0) as u32;
    let height = ((max_y - min_y) + 2.0 * margin).ceil().max(1.0) as u32;

    let map = |p: Point| (p.x - min_x + margin, p.y - min_y + margin);
    let stroke = hex(options.stroke_color);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    );

    if options.include_background {
        let c = options.background_color;
        let _ = writeln!(
            out,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\" />",
            width,
            height,
            hex(c),
            (c.a() as f32) / 255.0
        );
    }

    if options.include_nodes {
        // Sort by name so output is stable regardless of map order
        let mut nodes: Vec<&StageNode> = plan.nodes.values().collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let _ = writeln!(out, "<g fill=\"#8095ff\" fill-opacity=\"0.6\">");
        for node in nodes {
            let (x, y) = map(node.position);
            let _ = writeln!(
                out,
                "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"{}\" />",
                x,
                y,
                constants::NODE_MARKER_RADIUS
            );
            let _ = writeln!(
                out,
                "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" fill=\"#444\" text-anchor=\"middle\">{}</text>",
                x,
                y - constants::NODE_MARKER_RADIUS - 4.0,
                constants::LABEL_FONT_SIZE,
                escape_xml(&node.name)
            );
        }
        let _ = writeln!(out, "</g>");
    }

    for overlay in overlays {
        let _ = writeln!(out, "<g data-measurement=\"{}\">", overlay.id);

        let stubs: Vec<ConnectorLine> = match &overlay.geometry {
            OverlayGeometry::Snapped { connectors, .. } => connectors.iter().copied().collect(),
            OverlayGeometry::Dimension(line) => line.leaders.to_vec(),
        };
        for stub in stubs {
            let (x1, y1) = map(stub.from);
            let (x2, y2) = map(stub.to);
            let _ = writeln!(
                out,
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{d},{d}\" />",
                x1,
                y1,
                x2,
                y2,
                stroke,
                constants::LEADER_STROKE_WIDTH,
                d = constants::LEADER_DASH
            );
        }

        let (start, end) = match &overlay.geometry {
            OverlayGeometry::Snapped { segment, .. } => (segment.start, segment.end),
            OverlayGeometry::Dimension(line) => (line.start, line.end),
        };
        let (x1, y1) = map(start);
        let (x2, y2) = map(end);
        let _ = writeln!(
            out,
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"{}\" />",
            x1,
            y1,
            x2,
            y2,
            stroke,
            constants::MEASUREMENT_STROKE_WIDTH
        );

        if let OverlayGeometry::Dimension(line) = &overlay.geometry {
            for head in &line.arrowheads {
                let points: Vec<String> = head
                    .iter()
                    .map(|p| {
                        let (x, y) = map(*p);
                        format!("{:.1},{:.1}", x, y)
                    })
                    .collect();
                let _ = writeln!(
                    out,
                    "  <polygon points=\"{}\" fill=\"{}\" />",
                    points.join(" "),
                    stroke
                );
            }
        }

        let (lx, ly) = map(overlay.label_position);
        let _ = writeln!(
            out,
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" paint-order=\"stroke\" stroke=\"#ffffff\" stroke-width=\"3\">{}</text>",
            lx,
            ly,
            constants::LABEL_FONT_SIZE,
            stroke,
            escape_xml(&overlay.label)
        );
        let _ = writeln!(out, "</g>");
    }

    out.push_str("</svg>\n");
    out
}

fn escape_xml(input: &str) -> String {
    let mut s = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => s.push_str("&amp;"),
            '<' => s.push_str("&lt;"),
            '>' => s.push_str("&gt;"),
            '"' => s.push_str("&quot;"),
            '\'' => s.push_str("&apos;"),
            _ => s.push(ch),
        }
    }
    s
}
