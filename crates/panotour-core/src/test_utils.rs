//! Shared helpers for unit, property, and integration tests.
//!
//! Only compiled for tests or with the `test-utils` feature.

use crate::adapter::{RenderAdapter, VisibleLink};
use crate::graph::{Link, Node, TourGraph};

/// Adapter that records every `load` call instead of rendering.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    /// `(node id, visible links)` per load, in call order.
    pub loads: Vec<(String, Vec<VisibleLink>)>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the nodes loaded so far.
    pub fn loaded_ids(&self) -> Vec<&str> {
        self.loads.iter().map(|(id, _)| id.as_str()).collect()
    }
}

impl RenderAdapter for RecordingAdapter {
    fn load(&mut self, node: &Node, links: &[VisibleLink]) {
        self.loads.push((node.id.clone(), links.to_vec()));
    }
}

/// A node whose links point at `targets`, angles auto-distributed.
pub fn node_with_links(id: &str, targets: &[&str]) -> Node {
    let mut node = Node::new(id, format!("{id}.jpg"));
    node.links = targets
        .iter()
        .enumerate()
        .map(|(i, t)| Link::normalized(*t, None, None, None, i, targets.len()))
        .collect();
    node
}

/// A chain tour `ids[0] -> ids[1] -> ...`, initial node = first id.
pub fn linear_tour(ids: &[&str]) -> TourGraph {
    let nodes = ids
        .iter()
        .enumerate()
        .map(|(i, id)| match ids.get(i + 1) {
            Some(next) => node_with_links(id, &[next]),
            None => node_with_links(id, &[]),
        })
        .collect();
    TourGraph::new(ids.first().map(|s| s.to_string()), nodes)
}
