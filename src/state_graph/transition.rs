//! Transition representation

use crate::state_graph::StateId;
use serde::{Deserialize, Serialize};

/// A transition between states: the outcome of one beat.
///
/// A height of `0` means no ball was thrown this beat (slot 0 was empty);
/// any positive height is the single ball thrown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from_state: StateId,
    pub to_state: StateId,
    pub height: u8,
}

impl Transition {
    pub fn new(from_state: StateId, to_state: StateId, height: u8) -> Self {
        Self {
            from_state,
            to_state,
            height,
        }
    }

    /// Whether this transition is an idle beat (no throw).
    pub fn is_idle(&self) -> bool {
        self.height == 0
    }

    /// Get display label for the transition
    pub fn display_label(&self) -> String {
        if self.is_idle() {
            "idle".to_string()
        } else {
            self.height.to_string()
        }
    }
}
