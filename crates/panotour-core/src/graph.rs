//! The scene graph: panorama nodes and the directional links between them.
//!
//! A [`TourGraph`] is built once per load from a normalized node list and is
//! immutable afterwards. The navigation subsystem never edits it; authoring
//! changes rebuild the graph wholesale. Links are kept in authoring order,
//! which drives the deterministic angular placement of unlabeled links.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Downward tilt (degrees) applied to links whose pitch was not authored.
pub const DEFAULT_PITCH: f64 = -8.0;

// ---------------------------------------------------------------------------
// Access state
// ---------------------------------------------------------------------------

/// Per-node reachability status. Monotonic lattice
/// `Blocked -> Unlocked -> Visited`; transitions never regress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessState {
    /// Not reachable; never offered as a destination, even if linked.
    Blocked,
    /// Reachable (a visited node links here) but not yet entered.
    Unlocked,
    /// Has been the current node at least once.
    Visited,
}

impl AccessState {
    /// Whether a node in this state may be entered or shown as a destination.
    pub fn is_accessible(self) -> bool {
        matches!(self, AccessState::Unlocked | AccessState::Visited)
    }
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// A directed edge from its owning node to `target_id`, placed at an angular
/// position in the panorama.
///
/// A target that does not exist in the graph is tolerated (graphs are
/// authored incrementally); such a link is simply never shown.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target_id: String,
    /// Horizontal angle in degrees.
    pub yaw: f64,
    /// Vertical angle in degrees.
    pub pitch: f64,
    /// Marker label.
    pub text: String,
}

impl Link {
    /// Build a link, filling in every omitted field: yaw is auto-distributed
    /// evenly around the horizon from the link's position in its owning
    /// node's sequence, pitch defaults to [`DEFAULT_PITCH`], and the label
    /// defaults to `Go to <target>`.
    pub fn normalized(
        target_id: impl Into<String>,
        yaw: Option<f64>,
        pitch: Option<f64>,
        text: Option<String>,
        index: usize,
        count: usize,
    ) -> Self {
        let target_id = target_id.into();
        let text = text.unwrap_or_else(|| format!("Go to {target_id}"));
        Link {
            yaw: yaw.unwrap_or_else(|| auto_yaw(index, count)),
            pitch: pitch.unwrap_or(DEFAULT_PITCH),
            text,
            target_id,
        }
    }
}

/// Evenly spread yaw for link `index` of `count`, centered on the horizon.
fn auto_yaw(index: usize, count: usize) -> f64 {
    (index as f64) * 360.0 / (count.max(1) as f64) - 180.0
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// A single panoramic scene. Constructed when the graph definition is
/// loaded; immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Unique string id.
    pub id: String,
    /// Display label; defaults to the id.
    pub title: String,
    /// Panoramic image reference (URL or embedded data URI).
    pub panorama: String,
    /// Outgoing links in authoring order.
    pub links: Vec<Link>,
    /// Authoring-time seed for the runtime access state. Overridden by any
    /// persisted progress; only `Blocked` and `Unlocked` make sense here.
    pub initial_state: AccessState,
}

impl Node {
    /// A node with defaults: title = id, no links, seeded `Blocked`.
    pub fn new(id: impl Into<String>, panorama: impl Into<String>) -> Self {
        let id = id.into();
        Node {
            title: id.clone(),
            id,
            panorama: panorama.into(),
            links: Vec::new(),
            initial_state: AccessState::Blocked,
        }
    }
}

// ---------------------------------------------------------------------------
// TourGraph
// ---------------------------------------------------------------------------

/// The immutable-per-load scene graph: nodes keyed by id plus a designated
/// initial node. Shared read-only by the progress store, unlock engine, and
/// navigation controller.
#[derive(Debug, Clone)]
pub struct TourGraph {
    nodes: HashMap<String, Node>,
    /// Node ids in sorted order, for deterministic iteration.
    order: Vec<String>,
    initial_node_id: Option<String>,
}

impl TourGraph {
    /// Build a graph from a normalized node sequence.
    ///
    /// If `initial_node_id` is `None` the first node id in sorted order is
    /// designated. A duplicated id keeps the later node (last write wins).
    /// Dangling link targets are kept as-is.
    pub fn new(initial_node_id: Option<String>, nodes: Vec<Node>) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            index.insert(node.id.clone(), node);
        }
        let mut order: Vec<String> = index.keys().cloned().collect();
        order.sort();
        let initial_node_id = initial_node_id.or_else(|| order.first().cloned());
        TourGraph {
            nodes: index,
            order,
            initial_node_id,
        }
    }

    /// The designated start node. `None` only for an empty graph.
    pub fn initial_node_id(&self) -> Option<&str> {
        self.initial_node_id.as_deref()
    }

    /// Look up a node by id. A miss is an ordinary `None`, never a panic.
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether `id` names a node in this graph.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes, in deterministic order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Auto-distributed angles
    // -----------------------------------------------------------------------
    #[test]
    fn auto_yaw_spreads_links_around_horizon() {
        // Three unlabeled links: -180, -60, 60.
        let l0 = Link::normalized("a", None, None, None, 0, 3);
        let l1 = Link::normalized("b", None, None, None, 1, 3);
        let l2 = Link::normalized("c", None, None, None, 2, 3);
        assert_eq!(l0.yaw, -180.0);
        assert_eq!(l1.yaw, -60.0);
        assert_eq!(l2.yaw, 60.0);
        assert_eq!(l0.pitch, DEFAULT_PITCH);
    }

    #[test]
    fn authored_angles_are_kept() {
        let l = Link::normalized("a", Some(42.0), Some(-15.0), Some("Door".into()), 0, 1);
        assert_eq!(l.yaw, 42.0);
        assert_eq!(l.pitch, -15.0);
        assert_eq!(l.text, "Door");
    }

    #[test]
    fn default_text_names_the_target() {
        let l = Link::normalized("kitchen", None, None, None, 0, 1);
        assert_eq!(l.text, "Go to kitchen");
    }

    // -----------------------------------------------------------------------
    // Graph construction
    // -----------------------------------------------------------------------
    #[test]
    fn lookup_miss_is_none() {
        let graph = TourGraph::new(None, vec![Node::new("a", "a.jpg")]);
        assert!(graph.get_node("a").is_some());
        assert!(graph.get_node("missing").is_none());
    }

    #[test]
    fn initial_node_defaults_to_first() {
        let graph = TourGraph::new(
            None,
            vec![Node::new("atrium", "1.jpg"), Node::new("hall", "2.jpg")],
        );
        assert_eq!(graph.initial_node_id(), Some("atrium"));
    }

    #[test]
    fn explicit_initial_node_wins() {
        let graph = TourGraph::new(
            Some("hall".into()),
            vec![Node::new("atrium", "1.jpg"), Node::new("hall", "2.jpg")],
        );
        assert_eq!(graph.initial_node_id(), Some("hall"));
    }

    #[test]
    fn empty_graph_has_no_initial_node() {
        let graph = TourGraph::new(None, vec![]);
        assert!(graph.is_empty());
        assert_eq!(graph.initial_node_id(), None);
    }

    #[test]
    fn node_order_is_deterministic() {
        let graph = TourGraph::new(
            None,
            vec![
                Node::new("c", "c.jpg"),
                Node::new("a", "a.jpg"),
                Node::new("b", "b.jpg"),
            ],
        );
        let ids: Vec<&str> = graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn dangling_link_targets_are_tolerated() {
        let mut node = Node::new("a", "a.jpg");
        node.links
            .push(Link::normalized("nowhere", None, None, None, 0, 1));
        let graph = TourGraph::new(None, vec![node]);
        assert!(!graph.contains("nowhere"));
        assert_eq!(graph.get_node("a").unwrap().links.len(), 1);
    }

    #[test]
    fn accessible_states() {
        assert!(!AccessState::Blocked.is_accessible());
        assert!(AccessState::Unlocked.is_accessible());
        assert!(AccessState::Visited.is_accessible());
    }

    #[test]
    fn access_state_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&AccessState::Unlocked).unwrap(),
            "\"unlocked\""
        );
        let s: AccessState = serde_json::from_str("\"visited\"").unwrap();
        assert_eq!(s, AccessState::Visited);
    }
}
