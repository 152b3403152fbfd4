//! Held-button tracking and dispatch phases.
//!
//! The manager owns nothing but the held set: a button id is a member while
//! and only while the host reports it as physically held. Pressed/Released
//! are one-shot phases dispatched by the scene at the host callback; Held is
//! re-dispatched once per frame before model update, so held-button handlers
//! run at frame rate regardless of how long the button has been down.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Raw host button identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ButtonId(pub u32);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ButtonPhase {
    Pressed,
    Released,
    Held,
}

#[derive(Debug, Default)]
pub struct EventManager {
    held: HashSet<ButtonId>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Idempotent: a repeated down for an already-held id
    /// leaves the set unchanged.
    pub fn button_down(&mut self, id: ButtonId) {
        self.held.insert(id);
    }

    /// Record a release. A release without a prior press is a no-op.
    pub fn button_up(&mut self, id: ButtonId) {
        self.held.remove(&id);
    }

    pub fn is_held(&self, id: ButtonId) -> bool {
        self.held.contains(&id)
    }

    /// Currently-held ids in ascending order, for deterministic per-frame
    /// Held dispatch.
    pub fn held_buttons(&self) -> Vec<ButtonId> {
        let mut ids: Vec<ButtonId> = self.held.iter().copied().collect();
        ids.sort_by_key(|id| id.0);
        ids
    }
}
