//! The rendering seam.
//!
//! The navigation core never touches a concrete panorama viewer. A UI
//! collaborator implements [`RenderAdapter`]; the controller hands it the
//! node to display plus the links currently visible, and the collaborator
//! calls [`crate::nav::Navigator::go_to`] with a link's `target_id` when its
//! marker is activated.
//!
//! State transitions are applied synchronously when navigation happens, not
//! when the panorama image finishes decoding, so an adapter may complete its
//! visual work later. Adapters must also tolerate `load` being called again
//! before a prior load visually completed (repeated navigation); the core
//! never cancels an in-flight render.

use crate::graph::Node;

/// A link marker the adapter should display. Only links whose target is
/// currently accessible are ever handed out; a route the user cannot take
/// yet is omitted entirely rather than shown disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleLink {
    /// Pass this to `Navigator::go_to` when the marker is activated.
    pub target_id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub text: String,
}

/// Implemented by the UI collaborator that owns the concrete viewer.
pub trait RenderAdapter {
    /// Display `node`'s panorama with the given clickable link markers.
    fn load(&mut self, node: &Node, links: &[VisibleLink]);
}
