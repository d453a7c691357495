//! The navigation controller: one session object, no globals.
//!
//! A [`Navigator`] owns the graph, the progress store, the rendering
//! adapter, and the persistence gateway for a single tour session.
//! Construction restores persisted progress (discarding corrupt snapshots
//! wholesale); [`Navigator::start`] resumes the tour; [`Navigator::go_to`]
//! is the enforcement point for the unlock policy. Navigation never raises:
//! unknown or still-blocked destinations are silent no-ops, and persistence
//! failures cost durability, not the session.

use crate::adapter::{RenderAdapter, VisibleLink};
use crate::graph::{Node, TourGraph};
use crate::progress::{Progress, ProgressSnapshot};
use crate::store::{PROGRESS_KEY, StorageGateway};
use crate::unlock::on_arrival;

/// Callback invoked with a disconnected snapshot copy after every
/// successful navigation. For UI indicators; not required for correctness.
pub type ProgressObserver = Box<dyn FnMut(ProgressSnapshot)>;

/// A single-user, single-device tour session.
pub struct Navigator<A: RenderAdapter, G: StorageGateway> {
    graph: TourGraph,
    progress: Progress,
    adapter: A,
    gateway: G,
    on_progress: Option<ProgressObserver>,
}

impl<A: RenderAdapter, G: StorageGateway> Navigator<A, G> {
    /// Build a session: initialize progress from the graph, then overlay
    /// any persisted snapshot the gateway holds. A snapshot that fails to
    /// parse is discarded wholesale; a partial merge of corrupt data is
    /// never attempted.
    pub fn new(graph: TourGraph, adapter: A, gateway: G) -> Self {
        let mut progress = Progress::initialize(&graph);
        if let Some(raw) = gateway.load(PROGRESS_KEY) {
            match serde_json::from_str::<ProgressSnapshot>(&raw) {
                Ok(snapshot) => progress.merge_from(&snapshot, &graph),
                Err(e) => log::debug!("discarding corrupt progress snapshot: {e}"),
            }
        }
        Navigator {
            graph,
            progress,
            adapter,
            gateway,
            on_progress: None,
        }
    }

    /// Attach a progress observer.
    pub fn with_observer(mut self, observer: ProgressObserver) -> Self {
        self.on_progress = Some(observer);
        self
    }

    /// Enter the resume node: the persisted last node if any, else the
    /// graph's designated initial node. A no-op on an empty graph.
    pub fn start(&mut self) {
        let resume = self
            .progress
            .last_node_id()
            .or(self.graph.initial_node_id())
            .map(str::to_owned);
        if let Some(id) = resume {
            self.go_to(&id);
        }
    }

    /// Navigate to `node_id`.
    ///
    /// Silently ignored when the id is unknown, or when the node is neither
    /// the designated initial node nor currently accessible -- a `Blocked`
    /// node cannot be entered even by asking directly. The initial node is
    /// always enterable so `start` succeeds on a fresh tour.
    ///
    /// On success: the arrival transition runs, the adapter is asked to
    /// display the node with its currently visible links, the snapshot is
    /// persisted best-effort, and the observer is notified with a copy.
    pub fn go_to(&mut self, node_id: &str) {
        let Some(node) = self.graph.get_node(node_id) else {
            log::debug!("go_to: unknown node '{node_id}'");
            return;
        };
        let is_initial = self.graph.initial_node_id() == Some(node_id);
        if !is_initial && !self.progress.is_accessible(node_id) {
            log::debug!("go_to: node '{node_id}' is not accessible yet");
            return;
        }

        on_arrival(&self.graph, &mut self.progress, node_id);

        let links = visible_links(&self.progress, node);
        self.adapter.load(node, &links);

        let snapshot = self.progress.snapshot();
        match serde_json::to_string(&snapshot) {
            Ok(json) => {
                if let Err(e) = self.gateway.save(PROGRESS_KEY, &json) {
                    log::debug!("progress not persisted: {e}");
                }
            }
            Err(e) => log::debug!("progress snapshot not serializable: {e}"),
        }
        if let Some(observer) = &mut self.on_progress {
            observer(snapshot);
        }
    }

    /// The links of `node` whose target is accessible right now. Links to
    /// blocked or missing targets are omitted entirely.
    pub fn visible_links(&self, node: &Node) -> Vec<VisibleLink> {
        visible_links(&self.progress, node)
    }

    pub fn graph(&self) -> &TourGraph {
        &self.graph
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}

fn visible_links(progress: &Progress, node: &Node) -> Vec<VisibleLink> {
    node.links
        .iter()
        .filter(|l| progress.is_accessible(&l.target_id))
        .map(|l| VisibleLink {
            target_id: l.target_id.clone(),
            pitch: l.pitch,
            yaw: l.yaw,
            text: l.text.clone(),
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
