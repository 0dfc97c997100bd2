//! Undo/redo functionality for measurement edits.
//!
//! Every recorded action knows how to reverse itself against a [`StagePlan`];
//! reversing an action yields the action that re-applies it.

use crate::constants::MAX_UNDO_HISTORY;
use crate::types::*;
use serde::{Deserialize, Serialize};

/// Represents different types of actions that can be undone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UndoAction {
    /// A node was moved from one position to another
    NodeMoved {
        node_id: NodeId,
        old_position: Point,
        new_position: Point,
    },
    /// A node was created
    NodeCreated {
        node_id: NodeId,
    },
    /// A node was deleted along with the measurements that referenced it
    NodeDeleted {
        node: StageNode,
        measurements: Vec<(usize, Measurement)>,
    },
    /// A measurement was created
    MeasurementCreated {
        measurement_id: MeasurementId,
    },
    /// A measurement was deleted from the given index
    MeasurementDeleted {
        measurement: Measurement,
        index: usize,
    },
    /// A measurement's label override was changed
    LabelOverridden {
        measurement_id: MeasurementId,
        old_text: Option<String>,
        new_text: Option<String>,
    },
    /// A measurement's offset angle was changed
    OffsetAngleChanged {
        measurement_id: MeasurementId,
        old_angle: Option<f32>,
        new_angle: Option<f32>,
    },
}

/// Manages undo/redo history for an editing session.
#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    undo_stack: Vec<UndoAction>,
    redo_stack: Vec<UndoAction>,
}

impl UndoHistory {
    /// Creates a new empty undo history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new user action.
    ///
    /// This clears the redo stack since a new action invalidates any previously undone actions.
    pub fn push_action(&mut self, action: UndoAction) {
        self.push_undo(action);
        self.redo_stack.clear();
    }

    /// Pushes onto the undo stack without touching the redo stack.
    pub fn push_undo(&mut self, action: UndoAction) {
        self.undo_stack.push(action);
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Pushes an action that was just undone.
    pub fn push_redo(&mut self, action: UndoAction) {
        self.redo_stack.push(action);
    }

    /// Pops the most recent action from the undo stack.
    pub fn pop_undo(&mut self) -> Option<UndoAction> {
        self.undo_stack.pop()
    }

    /// Pops the most recent action from the redo stack.
    pub fn pop_redo(&mut self) -> Option<UndoAction> {
        self.redo_stack.pop()
    }

    /// Returns true if there are actions that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are actions that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of actions that can be undone.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}

/// Extension methods for applying undo actions to a stage plan.
pub trait UndoableStagePlan {
    /// Reverses `action`, returning the action that would re-apply it.
    ///
    /// Returns `None` when the action no longer applies (e.g. its node is gone).
    fn apply_undo(&mut self, action: &UndoAction) -> Option<UndoAction>;
}

impl UndoableStagePlan for StagePlan {
    fn apply_undo(&mut self, action: &UndoAction) -> Option<UndoAction> {
        match action {
            UndoAction::NodeMoved { node_id, old_position, new_position } => {
                self.move_node(*node_id, *old_position).ok()?;
                Some(UndoAction::NodeMoved {
                    node_id: *node_id,
                    old_position: *new_position,
                    new_position: *old_position,
                })
            }
            UndoAction::NodeCreated { node_id } => {
                let (node, measurements) = self.take_node(*node_id).ok()?;
                Some(UndoAction::NodeDeleted { node, measurements })
            }
            UndoAction::NodeDeleted { node, measurements } => {
                if self.nodes.contains_key(&node.id) {
                    return None;
                }
                self.nodes.insert(node.id, node.clone());
                // Indices are ascending, so each insert lands where it was
                for (index, measurement) in measurements {
                    let index = (*index).min(self.measurements.len());
                    self.measurements.insert(index, measurement.clone());
                }
                Some(UndoAction::NodeCreated { node_id: node.id })
            }
            UndoAction::MeasurementCreated { measurement_id } => {
                let (index, measurement) = self.remove_measurement(*measurement_id).ok()?;
                Some(UndoAction::MeasurementDeleted { measurement, index })
            }
            UndoAction::MeasurementDeleted { measurement, index } => {
                // Only restore if both nodes still exist
                self.endpoints(measurement).ok()?;
                let index = (*index).min(self.measurements.len());
                self.measurements.insert(index, measurement.clone());
                Some(UndoAction::MeasurementCreated { measurement_id: measurement.id })
            }
            UndoAction::LabelOverridden { measurement_id, old_text, new_text } => {
                let measurement = self.measurement_mut(*measurement_id).ok()?;
                measurement.custom_distance = old_text.clone();
                Some(UndoAction::LabelOverridden {
                    measurement_id: *measurement_id,
                    old_text: new_text.clone(),
                    new_text: old_text.clone(),
                })
            }
            UndoAction::OffsetAngleChanged { measurement_id, old_angle, new_angle } => {
                let measurement = self.measurement_mut(*measurement_id).ok()?;
                measurement.offset_angle = *old_angle;
                Some(UndoAction::OffsetAngleChanged {
                    measurement_id: *measurement_id,
                    old_angle: *new_angle,
                    new_angle: *old_angle,
                })
            }
        }
    }
}
