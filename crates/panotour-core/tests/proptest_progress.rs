//! Property-based tests for the progressive-unlock model.
//!
//! Uses proptest to generate random tour graphs, navigation sequences, and
//! persisted snapshots, then verify the structural invariants hold.

use panotour_core::graph::{AccessState, Link, Node, TourGraph};
use panotour_core::nav::Navigator;
use panotour_core::progress::{Progress, ProgressSnapshot};
use panotour_core::store::MemoryGateway;
use panotour_core::test_utils::RecordingAdapter;
use panotour_core::unlock::on_arrival;
use proptest::prelude::*;
use std::collections::HashMap;

// ===========================================================================
// Generators
// ===========================================================================

fn node_id(i: usize) -> String {
    format!("n{i}")
}

/// A random graph of `n` nodes with random directed edges, some of which may
/// dangle (target one past the last node).
fn arb_graph(max_nodes: usize) -> impl Strategy<Value = TourGraph> {
    (1..=max_nodes).prop_flat_map(move |n| {
        proptest::collection::vec((0..n, 0..=n), 0..n * 2).prop_map(move |edges| {
            let mut nodes: Vec<Node> = (0..n)
                .map(|i| Node::new(node_id(i), format!("{}.jpg", node_id(i))))
                .collect();
            let mut counts = vec![0usize; n];
            for &(from, _) in &edges {
                counts[from] += 1;
            }
            let mut placed = vec![0usize; n];
            for (from, to) in edges {
                let link = Link::normalized(
                    node_id(to),
                    None,
                    None,
                    None,
                    placed[from],
                    counts[from],
                );
                placed[from] += 1;
                nodes[from].links.push(link);
            }
            TourGraph::new(Some(node_id(0)), nodes)
        })
    })
}

/// A random sequence of go_to destinations, mixing known and unknown ids.
fn arb_destinations(max_nodes: usize, max_ops: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        prop_oneof![
            (0..max_nodes + 1).prop_map(node_id),
            Just("bogus".to_string()),
        ],
        1..=max_ops,
    )
}

/// A random persisted snapshot with both real and stale ids.
fn arb_snapshot(max_nodes: usize) -> impl Strategy<Value = ProgressSnapshot> {
    let state = prop_oneof![
        Just(AccessState::Blocked),
        Just(AccessState::Unlocked),
        Just(AccessState::Visited),
    ];
    let entry = (0..max_nodes * 2).prop_map(node_id);
    (
        proptest::collection::hash_map(entry, state, 0..max_nodes * 2),
        proptest::option::of((0..max_nodes * 2).prop_map(node_id)),
    )
        .prop_map(|(state_index, last_node_id)| ProgressSnapshot {
            state_index,
            last_node_id,
        })
}

fn rank(state: AccessState) -> u8 {
    match state {
        AccessState::Blocked => 0,
        AccessState::Unlocked => 1,
        AccessState::Visited => 2,
    }
}

fn states_of(nav: &Navigator<RecordingAdapter, MemoryGateway>) -> HashMap<String, AccessState> {
    nav.graph()
        .nodes()
        .map(|n| (n.id.clone(), nav.progress().state_of(&n.id).unwrap()))
        .collect()
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// No node's access state ever moves backwards, whatever the user does.
    #[test]
    fn monotonicity((graph, dests) in arb_graph(8).prop_flat_map(|g| {
        let dests = arb_destinations(8, 24);
        (Just(g), dests)
    })) {
        let mut nav = Navigator::new(graph, RecordingAdapter::new(), MemoryGateway::new());
        nav.start();
        let mut prev = states_of(&nav);
        for dest in dests {
            nav.go_to(&dest);
            let next = states_of(&nav);
            for (id, state) in &next {
                prop_assert!(rank(*state) >= rank(prev[id]), "{id} regressed");
            }
            prev = next;
        }
    }

    /// Arriving anywhere leaves no existing link target of that node blocked.
    #[test]
    fn unlock_propagation(graph in arb_graph(8), visit in 0..8usize) {
        let mut progress = Progress::initialize(&graph);
        let id = node_id(visit);
        on_arrival(&graph, &mut progress, &id);

        if let Some(node) = graph.get_node(&id) {
            for link in &node.links {
                if graph.contains(&link.target_id) {
                    let state = progress.state_of(&link.target_id).unwrap();
                    prop_assert_ne!(state, AccessState::Blocked);
                }
            }
        }
    }

    /// Merging any snapshot never fails, never leaks stale ids, and is
    /// idempotent.
    #[test]
    fn merge_safety(graph in arb_graph(8), snapshot in arb_snapshot(8)) {
        let mut progress = Progress::initialize(&graph);
        progress.merge_from(&snapshot, &graph);

        for id in snapshot.state_index.keys() {
            if !graph.contains(id) {
                prop_assert_eq!(progress.state_of(id), None);
            }
        }
        if let Some(last) = progress.last_node_id() {
            prop_assert!(graph.contains(last));
        }

        let once = progress.clone();
        progress.merge_from(&snapshot, &graph);
        prop_assert_eq!(progress, once);
    }

    /// A refused navigation (blocked or unknown destination) changes nothing
    /// and renders nothing.
    #[test]
    fn reachability_gate(graph in arb_graph(8), probe in 0..16usize) {
        let mut nav = Navigator::new(graph, RecordingAdapter::new(), MemoryGateway::new());
        nav.start();

        let id = node_id(probe);
        let enterable = nav.graph().initial_node_id() == Some(id.as_str())
            || nav.progress().is_accessible(&id);
        let snapshot_before = nav.progress().snapshot();
        let loads_before = nav.adapter().loads.len();

        nav.go_to(&id);

        if !enterable || !nav.graph().contains(&id) {
            prop_assert_eq!(nav.progress().snapshot(), snapshot_before);
            prop_assert_eq!(nav.adapter().loads.len(), loads_before);
        }
    }

    /// Navigating twice to the same accessible node yields the same snapshot.
    #[test]
    fn idempotent_re_entry(graph in arb_graph(8)) {
        let mut nav = Navigator::new(graph, RecordingAdapter::new(), MemoryGateway::new());
        nav.start();

        let Some(initial) = nav.graph().initial_node_id().map(str::to_owned) else {
            return Ok(());
        };
        nav.go_to(&initial);
        let first = nav.progress().snapshot();
        nav.go_to(&initial);
        prop_assert_eq!(nav.progress().snapshot(), first);
    }
}
