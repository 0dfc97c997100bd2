//! Measurement editing session.
//!
//! A [`MeasurementSession`] owns the stage plan, the display settings used for
//! every geometry call, the per-measurement label edit states and the undo
//! history. Renderers ask it for [`MeasurementOverlay`]s each frame and feed
//! user events back into it.
//!
//! # Module Organization
//!
//! - `label_edit` - Click-to-edit state machine for distance labels
//! - `undo` - Undo/redo history and plan-level reversal of actions
//! - `export` - SVG rendering of the current overlays
//! - `paint` - Drawing overlays on an egui painter

mod export;
mod label_edit;
mod paint;
mod undo;


pub use export::{render_svg, SvgOptions};
pub use label_edit::{LabelEditState, LabelEvent, LabelOutcome};
pub use paint::{paint_overlay, paint_overlays, CanvasTransform};
pub use undo::{UndoAction, UndoHistory, UndoableStagePlan};

use crate::config::DisplaySettings;
use crate::overlay::{build_overlay, computed_label, MeasurementOverlay};
use crate::types::*;
use crate::units::display_label;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stage plan plus the state needed to edit its measurements interactively.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementSession {
    /// Nodes and measurements
    pub plan: StagePlan,
    /// Scale factor and geometry tuning passed into every computation
    pub settings: DisplaySettings,
    /// Labels currently being edited, keyed by measurement
    #[serde(skip)]
    label_edits: HashMap<MeasurementId, LabelEditState>,
    #[serde(skip)]
    history: UndoHistory,
}

impl MeasurementSession {
    /// Creates an empty session with the given settings.
    pub fn new(settings: DisplaySettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Creates a session around an existing plan.
    pub fn with_plan(plan: StagePlan, settings: DisplaySettings) -> Self {
        Self {
            plan,
            settings,
            ..Self::default()
        }
    }

    /// Serialize the plan and settings to JSON (edit states and history are not kept)
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a session from JSON, rejecting out-of-range settings
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let session: Self = serde_json::from_str(json)?;
        session
            .settings
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(session)
    }

    /// Adds a node to the plan.
    pub fn add_node(&mut self, name: impl Into<String>, position: impl Into<Point>) -> NodeId {
        self.plan.add_node(StageNode::new(name, position))
    }

    /// Moves a node, recording the move for undo.
    pub fn move_node(&mut self, node_id: NodeId, position: Point) -> Result<(), PlanError> {
        let old_position = self.plan.move_node(node_id, position)?;
        if old_position != position {
            self.history.push_action(UndoAction::NodeMoved {
                node_id,
                old_position,
                new_position: position,
            });
        }
        Ok(())
    }

    /// Removes a node and its measurements, recording both for undo.
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<StageNode, PlanError> {
        let (node, measurements) = self.plan.take_node(node_id)?;
        for (_, measurement) in &measurements {
            self.label_edits.remove(&measurement.id);
        }
        log::debug!(
            "Removed node {} with {} measurement(s)",
            node.name,
            measurements.len()
        );
        self.history.push_action(UndoAction::NodeDeleted {
            node: node.clone(),
            measurements,
        });
        Ok(node)
    }

    /// Adds a measurement between two nodes.
    pub fn add_measurement(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        kind: MeasurementKind,
    ) -> Result<MeasurementId, PlanError> {
        let measurement_id = self.plan.add_measurement(start_node, end_node, kind)?;
        log::debug!("Created {kind:?} measurement {measurement_id}");
        self.history
            .push_action(UndoAction::MeasurementCreated { measurement_id });
        Ok(measurement_id)
    }

    /// Removes a measurement and any edit in progress on its label.
    pub fn remove_measurement(&mut self, id: MeasurementId) -> Result<Measurement, PlanError> {
        let (index, measurement) = self.plan.remove_measurement(id)?;
        self.label_edits.remove(&id);
        self.history.push_action(UndoAction::MeasurementDeleted {
            measurement: measurement.clone(),
            index,
        });
        Ok(measurement)
    }

    /// Changes a measurement's offset angle; `None` restores the perpendicular default.
    pub fn set_offset_angle(
        &mut self,
        id: MeasurementId,
        angle: Option<f32>,
    ) -> Result<(), PlanError> {
        let measurement = self.plan.measurement_mut(id)?;
        let old_angle = std::mem::replace(&mut measurement.offset_angle, angle);
        if old_angle != angle {
            self.history.push_action(UndoAction::OffsetAngleChanged {
                measurement_id: id,
                old_angle,
                new_angle: angle,
            });
        }
        Ok(())
    }

    /// Label text currently shown for a measurement (ignoring any edit in progress).
    pub fn label_text(&self, id: MeasurementId) -> Result<String, PlanError> {
        let measurement = self.plan.measurement(id)?;
        let (start, end) = self.plan.endpoints(measurement)?;
        let computed = computed_label(measurement.kind, start, end, &self.settings);
        Ok(display_label(computed, measurement.custom_distance.as_deref()))
    }

    /// Edit state of a measurement's label.
    pub fn label_state(&self, id: MeasurementId) -> LabelEditState {
        self.label_edits.get(&id).cloned().unwrap_or_default()
    }

    /// Feeds a label event into the measurement's edit state machine.
    ///
    /// Committed overrides are written to the measurement and recorded for undo.
    pub fn handle_label_event(
        &mut self,
        id: MeasurementId,
        event: LabelEvent,
    ) -> Result<(), PlanError> {
        let displayed = self.label_text(id)?;
        let mut state = self.label_edits.remove(&id).unwrap_or_default();
        let outcome = state.handle(event, &displayed);
        if state.is_editing() {
            self.label_edits.insert(id, state);
        }

        if let LabelOutcome::SetOverride(new_text) = outcome {
            let measurement = self.plan.measurement_mut(id)?;
            if measurement.custom_distance != new_text {
                let old_text = std::mem::replace(&mut measurement.custom_distance, new_text.clone());
                log::debug!("Label override for {id}: {old_text:?} -> {new_text:?}");
                self.history.push_action(UndoAction::LabelOverridden {
                    measurement_id: id,
                    old_text,
                    new_text,
                });
            }
        }
        Ok(())
    }

    /// Starts editing the label under `point`, if any, and returns its measurement.
    ///
    /// Labels drawn later sit on top, so they are hit-tested first.
    pub fn begin_edit_at(&mut self, point: Point) -> Option<MeasurementId> {
        let id = self
            .overlays()
            .iter()
            .rev()
            .find(|overlay| overlay.label_contains(point))
            .map(|overlay| overlay.id)?;
        self.handle_label_event(id, LabelEvent::BeginEdit).ok()?;
        Some(id)
    }

    /// Builds the overlays for every measurement in the current frame.
    ///
    /// Measurements whose nodes are missing are skipped.
    pub fn overlays(&self) -> Vec<MeasurementOverlay> {
        self.plan
            .measurements
            .iter()
            .filter_map(|measurement| {
                let (start, end) = match self.plan.endpoints(measurement) {
                    Ok(endpoints) => endpoints,
                    Err(err) => {
                        log::warn!("Skipping measurement {}: {err}", measurement.id);
                        return None;
                    }
                };
                let mut overlay = build_overlay(measurement, start, end, &self.settings);
                if let Some(draft) = self.label_edits.get(&measurement.id).and_then(|s| s.draft()) {
                    overlay.label = draft.to_string();
                    overlay.editing = true;
                }
                Some(overlay)
            })
            .collect()
    }

    /// Returns true if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undoes the most recent action that still applies.
    ///
    /// Actions whose targets were removed outside the session are discarded on
    /// the way. Returns false if nothing was undone.
    pub fn undo(&mut self) -> bool {
        while let Some(action) = self.history.pop_undo() {
            match self.plan.apply_undo(&action) {
                Some(redo_action) => {
                    log::debug!("Undo {action:?}");
                    self.history.push_redo(redo_action);
                    self.drop_stale_edits();
                    return true;
                }
                None => log::warn!("Discarding undo entry that no longer applies: {action:?}"),
            }
        }
        false
    }

    /// Redoes the most recently undone action that still applies.
    ///
    /// Returns false if nothing was redone.
    pub fn redo(&mut self) -> bool {
        while let Some(action) = self.history.pop_redo() {
            match self.plan.apply_undo(&action) {
                Some(undo_action) => {
                    log::debug!("Redo {action:?}");
                    // Don't call push_action here as it would clear the redo stack
                    self.history.push_undo(undo_action);
                    self.drop_stale_edits();
                    return true;
                }
                None => log::warn!("Discarding redo entry that no longer applies: {action:?}"),
            }
        }
        false
    }

    fn drop_stale_edits(&mut self) {
        let plan = &self.plan;
        self.label_edits
            .retain(|id, _| plan.measurement(*id).is_ok());
    }
}
