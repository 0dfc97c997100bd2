//! Click-to-edit state machine for distance labels.
//!
//! A label is either being viewed or being edited. Editing starts from the text
//! currently displayed; Enter commits, Escape discards, and losing focus commits
//! only when there is something to commit.

/// Edit state of a single measurement label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelEditState {
    /// Label shows the committed override or the computed distance
    #[default]
    Viewing,
    /// Label is an input field
    Editing {
        /// Text currently in the input field
        draft: String,
        /// Text displayed when editing began
        original: String,
    },
}

/// Events that drive a label's edit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelEvent {
    /// The label was clicked
    BeginEdit,
    /// The input field's text changed
    Input(String),
    /// Enter was pressed
    Commit,
    /// Escape was pressed
    Cancel,
    /// The input field lost focus
    Blur,
}

/// What a transition asks the owner of the measurement to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// Leave the stored override alone
    Unchanged,
    /// Replace the stored override; `None` clears it
    SetOverride(Option<String>),
}

impl LabelEditState {
    /// Returns true while the label is an input field.
    pub fn is_editing(&self) -> bool {
        matches!(self, LabelEditState::Editing { .. })
    }

    /// Text currently being edited, if any.
    pub fn draft(&self) -> Option<&str> {
        match self {
            LabelEditState::Editing { draft, .. } => Some(draft),
            LabelEditState::Viewing => None,
        }
    }

    /// Applies `event` and reports how the stored override should change.
    ///
    /// # Arguments
    ///
    /// * `event` - The user event
    /// * `displayed` - Label text shown right now, used to seed the draft on `BeginEdit`
    pub fn handle(&mut self, event: LabelEvent, displayed: &str) -> LabelOutcome {
        match (std::mem::take(self), event) {
            (LabelEditState::Viewing, LabelEvent::BeginEdit) => {
                *self = LabelEditState::Editing {
                    draft: displayed.to_string(),
                    original: displayed.to_string(),
                };
                LabelOutcome::Unchanged
            }
            (LabelEditState::Editing { original, .. }, LabelEvent::Input(text)) => {
                *self = LabelEditState::Editing { draft: text, original };
                LabelOutcome::Unchanged
            }
            (LabelEditState::Editing { draft, original }, LabelEvent::Commit) => {
                Self::commit(draft, &original)
            }
            (LabelEditState::Editing { draft, original }, LabelEvent::Blur) => {
                if draft.trim().is_empty() {
                    LabelOutcome::Unchanged
                } else {
                    Self::commit(draft, &original)
                }
            }
            (LabelEditState::Editing { .. }, LabelEvent::Cancel) => LabelOutcome::Unchanged,
            // Everything else leaves the state as it was
            (state, _) => {
                *self = state;
                LabelOutcome::Unchanged
            }
        }
    }

    fn commit(draft: String, original: &str) -> LabelOutcome {
        if draft.trim().is_empty() {
            LabelOutcome::SetOverride(None)
        } else if draft == original {
            LabelOutcome::Unchanged
        } else {
            LabelOutcome::SetOverride(Some(draft))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editing(displayed: &str) -> LabelEditState {
        let mut state = LabelEditState::Viewing;
        state.handle(LabelEvent::BeginEdit, displayed);
        state
    }

    #[test]
    fn test_begin_edit_seeds_draft() {
        let state = editing("100 units");
        assert!(state.is_editing());
        assert_eq!(state.draft(), Some("100 units"));
    }

    #[test]
    fn test_commit_sets_override() {
        let mut state = editing("100 units");
        state.handle(LabelEvent::Input("5m".into()), "100 units");

        let outcome = state.handle(LabelEvent::Commit, "100 units");

        assert_eq!(outcome, LabelOutcome::SetOverride(Some("5m".into())));
        assert_eq!(state, LabelEditState::Viewing);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut state = editing("100 units");
        state.handle(LabelEvent::Input("5m".into()), "100 units");

        let outcome = state.handle(LabelEvent::Cancel, "100 units");

        assert_eq!(outcome, LabelOutcome::Unchanged);
        assert_eq!(state, LabelEditState::Viewing);
    }

    #[test]
    fn test_empty_commit_clears_override() {
        let mut state = editing("5m");
        state.handle(LabelEvent::Input("  ".into()), "5m");

        assert_eq!(
            state.handle(LabelEvent::Commit, "5m"),
            LabelOutcome::SetOverride(None)
        );
    }

    #[test]
    fn test_blur_commits_non_empty_only() {
        let mut state = editing("2.00 m");
        state.handle(LabelEvent::Input("2.5 m".into()), "2.00 m");
        assert_eq!(
            state.handle(LabelEvent::Blur, "2.00 m"),
            LabelOutcome::SetOverride(Some("2.5 m".into()))
        );

        let mut state = editing("2.00 m");
        state.handle(LabelEvent::Input(String::new()), "2.00 m");
        assert_eq!(state.handle(LabelEvent::Blur, "2.00 m"), LabelOutcome::Unchanged);
        assert_eq!(state, LabelEditState::Viewing);
    }

    #[test]
    fn test_unchanged_commit_does_not_freeze_label() {
        let mut state = editing("100 units");
        assert_eq!(state.handle(LabelEvent::Commit, "100 units"), LabelOutcome::Unchanged);
    }

    #[test]
    fn test_events_ignored_while_viewing() {
        let mut state = LabelEditState::Viewing;
        for event in [
            LabelEvent::Input("x".into()),
            LabelEvent::Commit,
            LabelEvent::Cancel,
            LabelEvent::Blur,
        ] {
            assert_eq!(state.handle(event, "1.00 m"), LabelOutcome::Unchanged);
            assert_eq!(state, LabelEditState::Viewing);
        }
    }

    #[test]
    fn test_begin_edit_while_editing_keeps_draft() {
        let mut state = editing("1.00 m");
        state.handle(LabelEvent::Input("12".into()), "1.00 m");

        state.handle(LabelEvent::BeginEdit, "1.00 m");

        assert_eq!(state.draft(), Some("12"));
    }
}
