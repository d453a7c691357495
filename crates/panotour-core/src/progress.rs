//! Runtime progress: per-node access state and the resume point.
//!
//! [`Progress`] owns the mutable runtime state of a tour session. It is
//! seeded from the graph's authoring-time states, optionally overlaid with a
//! persisted [`ProgressSnapshot`], and mutated only through the small state
//! transition API below. Everything handed outward is a disconnected copy;
//! live state is never aliased into storage or observers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::{AccessState, TourGraph};

// ---------------------------------------------------------------------------
// Snapshot wire format
// ---------------------------------------------------------------------------

/// The persisted projection of runtime state.
///
/// Wire format: `{ "stateIndex": { id: "blocked"|"unlocked"|"visited" },
/// "lastNodeId": id }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub state_index: HashMap<String, AccessState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_node_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Progress store
// ---------------------------------------------------------------------------

/// Mutable session state: one [`AccessState`] per graph node plus the node
/// to resume at. Exclusively owned by the navigation session; collaborators
/// only ever see snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    state_index: HashMap<String, AccessState>,
    last_node_id: Option<String>,
}

impl Progress {
    /// Fresh state from the graph: every node takes its authored
    /// `initial_state`, and the resume point is the designated initial node.
    pub fn initialize(graph: &TourGraph) -> Self {
        let state_index = graph
            .nodes()
            .map(|n| (n.id.clone(), n.initial_state))
            .collect();
        Progress {
            state_index,
            last_node_id: graph.initial_node_id().map(str::to_owned),
        }
    }

    /// Overlay a persisted snapshot.
    ///
    /// Entries whose id exists in the live index overwrite it; stale ids are
    /// silently dropped, so grafting a snapshot onto a changed graph never
    /// fails. The persisted resume point is adopted only if that node still
    /// exists. Idempotent and order-independent over the snapshot entries.
    pub fn merge_from(&mut self, snapshot: &ProgressSnapshot, graph: &TourGraph) {
        for (id, state) in &snapshot.state_index {
            if let Some(slot) = self.state_index.get_mut(id) {
                *slot = *state;
            }
        }
        if let Some(last) = &snapshot.last_node_id
            && graph.contains(last)
        {
            self.last_node_id = Some(last.clone());
        }
    }

    /// Whether the node may be entered or offered as a destination.
    pub fn is_accessible(&self, id: &str) -> bool {
        self.state_index
            .get(id)
            .is_some_and(|s| s.is_accessible())
    }

    /// Current access state, if the node is known.
    pub fn state_of(&self, id: &str) -> Option<AccessState> {
        self.state_index.get(id).copied()
    }

    /// Set the node's state to `Visited`. Valid from any prior state,
    /// including re-visiting.
    pub fn mark_visited(&mut self, id: &str) {
        if let Some(slot) = self.state_index.get_mut(id) {
            *slot = AccessState::Visited;
        }
    }

    /// Transition `Blocked -> Unlocked`; no-op from any other state, so
    /// `Visited` and `Unlocked` are never downgraded.
    pub fn unlock_if_blocked(&mut self, id: &str) {
        if let Some(slot) = self.state_index.get_mut(id)
            && *slot == AccessState::Blocked
        {
            *slot = AccessState::Unlocked;
        }
    }

    /// The node to resume at.
    pub fn last_node_id(&self) -> Option<&str> {
        self.last_node_id.as_deref()
    }

    /// Record the node the session is currently at.
    pub fn set_last_node_id(&mut self, id: impl Into<String>) {
        self.last_node_id = Some(id.into());
    }

    /// A deep, independent copy suitable for durable storage. Mutating the
    /// live state afterwards does not affect the returned snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            state_index: self.state_index.clone(),
            last_node_id: self.last_node_id.clone(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
