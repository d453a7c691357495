//! The progressive-disclosure policy.
//!
//! Arriving at a node is the only event with side effects on the
//! reachability of other nodes: the node itself becomes `Visited`, the
//! resume point moves, and every immediate link target that exists in the
//! graph is unlocked. Neighbors only -- never deeper nodes, and nothing is
//! ever re-locked.

use crate::graph::TourGraph;
use crate::progress::Progress;

/// Apply the arrival transition for `node_id`.
///
/// Unknown ids still move the resume point and are otherwise inert; links
/// to nodes missing from the graph are skipped, not errors.
pub fn on_arrival(graph: &TourGraph, progress: &mut Progress, node_id: &str) {
    progress.mark_visited(node_id);
    progress.set_last_node_id(node_id);

    let Some(node) = graph.get_node(node_id) else {
        return;
    };
    for link in &node.links {
        if graph.contains(&link.target_id) {
            progress.unlock_if_blocked(&link.target_id);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
