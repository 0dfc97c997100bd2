//! Core data types for the stage-plan measurement engine.
//!
//! This module defines the geometric value types produced every frame (points,
//! snapped segments, connector stubs, dimension lines) and the stage plan store
//! that owns nodes and the measurements placed between them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for stage nodes.
pub type NodeId = Uuid;

/// Unique identifier for measurements.
pub type MeasurementId = Uuid;

/// A position in diagram pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Creates a point from its coordinates.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

/// Which coordinate is held equal between the two ends of a snapped segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapAxis {
    /// Both ends share the same `y`
    Horizontal,
    /// Both ends share the same `x`
    Vertical,
}

/// An axis-aligned measurement segment derived from two anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnappedSegment {
    /// Snapped counterpart of the source anchor
    pub start: Point,
    /// Snapped counterpart of the target anchor
    pub end: Point,
    /// Midpoint of the segment, used to place the label
    pub mid: Point,
    /// Length of the segment in pixels
    pub distance: f32,
    /// Alignment rule used to build the segment
    pub axis: SnapAxis,
}

/// A straight stub from an anchor to its displayed position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectorLine {
    /// Original anchor
    pub from: Point,
    /// Snapped or offset position
    pub to: Point,
}

impl ConnectorLine {
    /// Length of the stub in pixels.
    pub fn length(&self) -> f32 {
        self.from.distance_to(self.to)
    }
}

/// The connector stubs emitted for one snapped measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Connectors {
    /// Stub from the source anchor to the segment start, if far enough away
    pub source: Option<ConnectorLine>,
    /// Stub from the target anchor to the segment end, if far enough away
    pub target: Option<ConnectorLine>,
}

impl Connectors {
    /// Iterates over the stubs that are present.
    pub fn iter(&self) -> impl Iterator<Item = &ConnectorLine> {
        self.source.iter().chain(self.target.iter())
    }

    /// Number of stubs present (0, 1 or 2).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true when no stub is needed on either side.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.target.is_none()
    }
}

/// A CAD-style dimension line parallel to the line between two node centers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionLine {
    /// Offset counterpart of the first node center
    pub start: Point,
    /// Offset counterpart of the second node center
    pub end: Point,
    /// Leader stubs from each node center to its offset endpoint (always present)
    pub leaders: [ConnectorLine; 2],
    /// Where the distance label is drawn (midpoint of `start`-`end`)
    pub label_position: Point,
    /// True distance between the two node centers in pixels
    pub center_distance: f32,
    /// Direction from the first to the second node, in degrees
    pub angle_degrees: f32,
    /// Arrowhead triangles at `start` and `end`; the apex is the first point of each
    pub arrowheads: [[Point; 3]; 2],
}

/// Geometry style a measurement is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeasurementKind {
    /// Axis-snapped line with threshold-gated connectors and a meter label
    AxisSnapped,
    /// Offset dimension line with leaders, arrowheads and a raw unit label
    #[default]
    Dimension,
}

/// A named measurement between two stage nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier for this measurement
    pub id: MeasurementId,
    /// Node the measurement starts at
    pub start_node: NodeId,
    /// Node the measurement ends at
    pub end_node: NodeId,
    /// Free-text label shown instead of the computed distance
    #[serde(default)]
    pub custom_distance: Option<String>,
    /// Offset angle in degrees; `None` means the perpendicular default
    #[serde(default)]
    pub offset_angle: Option<f32>,
    /// Geometry style
    #[serde(default)]
    pub kind: MeasurementKind,
}

impl Measurement {
    /// Creates a measurement between two nodes with no overrides.
    pub fn new(start_node: NodeId, end_node: NodeId, kind: MeasurementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_node,
            end_node,
            custom_distance: None,
            offset_angle: None,
            kind,
        }
    }

    /// Offset angle in effect, falling back to the perpendicular default.
    pub fn effective_offset_angle(&self) -> f32 {
        self.offset_angle
            .unwrap_or(crate::constants::DEFAULT_OFFSET_ANGLE)
    }
}

/// A node placed on the stage plan (an instrument, amp, monitor, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageNode {
    /// Unique identifier for this node
    pub id: NodeId,
    /// User-displayable name of the node
    pub name: String,
    /// Center of the node in diagram pixels
    pub position: Point,
}

impl StageNode {
    /// Creates a node with a fresh id.
    pub fn new(name: impl Into<String>, position: impl Into<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position: position.into(),
        }
    }
}

/// Errors raised by stage plan and session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// No node with this ID exists in the plan
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// No measurement with this ID exists in the plan
    #[error("Measurement not found: {0}")]
    MeasurementNotFound(MeasurementId),

    /// Both ends of a measurement reference the same node
    #[error("A measurement needs two distinct nodes, got {0} twice")]
    SelfMeasurement(NodeId),
}

/// Nodes on the stage and the measurements placed between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StagePlan {
    /// Map of all nodes, indexed by their ID
    pub nodes: HashMap<NodeId, StageNode>,
    /// Measurements in creation order
    pub measurements: Vec<Measurement>,
}

impl StagePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the plan to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a plan from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds a node and returns its ID.
    pub fn add_node(&mut self, node: StageNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Current center of a node.
    pub fn node_position(&self, id: NodeId) -> Result<Point, PlanError> {
        self.nodes
            .get(&id)
            .map(|n| n.position)
            .ok_or(PlanError::NodeNotFound(id))
    }

    /// Moves a node and returns its previous position.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> Result<Point, PlanError> {
        let node = self.nodes.get_mut(&id).ok_or(PlanError::NodeNotFound(id))?;
        Ok(std::mem::replace(&mut node.position, position))
    }

    /// Removes a node together with every measurement that references it.
    ///
    /// # Returns
    ///
    /// `true` if the node was found and removed.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        self.take_node(*id).is_ok()
    }

    /// Removes a node and hands back everything that went with it.
    ///
    /// The dropped measurements are returned with their former indices in
    /// ascending order, so re-inserting them front to back restores the list.
    pub fn take_node(
        &mut self,
        id: NodeId,
    ) -> Result<(StageNode, Vec<(usize, Measurement)>), PlanError> {
        let node = self.nodes.remove(&id).ok_or(PlanError::NodeNotFound(id))?;

        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.measurements.len());
        for (index, measurement) in std::mem::take(&mut self.measurements).into_iter().enumerate() {
            if measurement.start_node == id || measurement.end_node == id {
                dropped.push((index, measurement));
            } else {
                kept.push(measurement);
            }
        }
        self.measurements = kept;
        Ok((node, dropped))
    }

    /// Adds a measurement between two existing, distinct nodes.
    pub fn add_measurement(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        kind: MeasurementKind,
    ) -> Result<MeasurementId, PlanError> {
        if start_node == end_node {
            return Err(PlanError::SelfMeasurement(start_node));
        }
        for id in [start_node, end_node] {
            if !self.nodes.contains_key(&id) {
                return Err(PlanError::NodeNotFound(id));
            }
        }

        let measurement = Measurement::new(start_node, end_node, kind);
        let id = measurement.id;
        self.measurements.push(measurement);
        Ok(id)
    }

    /// Removes a measurement, returning it with the index it occupied.
    pub fn remove_measurement(
        &mut self,
        id: MeasurementId,
    ) -> Result<(usize, Measurement), PlanError> {
        let index = self
            .measurements
            .iter()
            .position(|m| m.id == id)
            .ok_or(PlanError::MeasurementNotFound(id))?;
        Ok((index, self.measurements.remove(index)))
    }

    /// Looks up a measurement by ID.
    pub fn measurement(&self, id: MeasurementId) -> Result<&Measurement, PlanError> {
        self.measurements
            .iter()
            .find(|m| m.id == id)
            .ok_or(PlanError::MeasurementNotFound(id))
    }

    /// Looks up a measurement by ID for modification.
    pub fn measurement_mut(&mut self, id: MeasurementId) -> Result<&mut Measurement, PlanError> {
        self.measurements
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(PlanError::MeasurementNotFound(id))
    }

    /// Both node centers of a measurement.
    pub fn endpoints(&self, measurement: &Measurement) -> Result<(Point, Point), PlanError> {
        Ok((
            self.node_position(measurement.start_node)?,
            self.node_position(measurement.end_node)?,
        ))
    }
}
