//! Serde structs for the authored tour-map definition.
//!
//! This is the format the authoring tool produces and the persistence
//! gateway stores under the map key. Field names are camelCase on the wire.
//! Shorthands are accepted here and resolved by the loader; nothing else in
//! the system ever sees them.

use panotour_core::graph::AccessState;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A whole tour map.
///
/// `nodes` is ordered (BTreeMap) so the initial-node fallback and graph
/// iteration are deterministic regardless of authoring order on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourMapData {
    /// Start node; defaults to the first node id in sorted order.
    #[serde(default)]
    pub initial_node_id: Option<String>,
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeData>,
}

/// A node definition. Every field except `panorama` is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    /// Display label; defaults to the node id.
    #[serde(default)]
    pub title: Option<String>,
    /// Panoramic image reference (URL or embedded data URI).
    pub panorama: String,
    #[serde(default)]
    pub links: Vec<LinkData>,
    /// Authoring-time access seed; defaults to blocked.
    #[serde(default)]
    pub initial_state: Option<AccessState>,
}

/// A link entry, supporting the bare-string shorthand and the full record
/// with optional angular placement and label.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkData {
    /// Short form: just the target node id. Angles auto-distributed, label
    /// defaulted.
    Short(String),
    /// Full form with explicit fields.
    #[serde(rename_all = "camelCase")]
    Full {
        target_id: String,
        #[serde(default)]
        yaw: Option<f64>,
        #[serde(default)]
        pitch: Option<f64>,
        #[serde(default)]
        text: Option<String>,
    },
}

impl LinkData {
    /// The target node id, whichever form was authored.
    pub fn target_id(&self) -> &str {
        match self {
            LinkData::Short(target) => target,
            LinkData::Full { target_id, .. } => target_id,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
