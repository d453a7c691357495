//! Panotour Core -- the navigation engine for hierarchical 360° tours.
//!
//! This crate provides the scene graph, progressive-unlock progress store,
//! unlock transition logic, and the navigation controller that every
//! Panotour front end depends on.
//!
//! # Progressive Unlock
//!
//! A tour is a directed graph of panorama [`graph::Node`]s. Each node starts
//! in an [`graph::AccessState`] (`Blocked` unless the author seeds it
//! otherwise) and moves through the monotonic lattice
//! `Blocked -> Unlocked -> Visited`, never backwards. Arriving at a node
//! marks it visited and unlocks its immediate link targets; nothing deeper,
//! and nothing is ever re-locked. A node can only be entered once it is
//! unlocked, with one exception: the graph's designated initial node is
//! always enterable so a fresh tour can start.
//!
//! # Key Types
//!
//! - [`graph::TourGraph`] -- Immutable-per-load scene graph with directional
//!   angular links.
//! - [`progress::Progress`] -- Runtime access state per node plus the resume
//!   point, merged from persisted snapshots.
//! - [`unlock::on_arrival`] -- The single transition that makes neighbors
//!   reachable.
//! - [`nav::Navigator`] -- Session object orchestrating start/navigation,
//!   rendering, and best-effort persistence.
//! - [`adapter::RenderAdapter`] -- The seam behind which a concrete panorama
//!   viewer lives.
//! - [`store::StorageGateway`] -- Durable key/value persistence seam, with
//!   in-memory and file-backed implementations.
//!
//! The navigation core never raises user-facing errors: unknown node ids,
//! dangling links, corrupt snapshots, and persistence failures all degrade
//! silently so a tour session is never failed by bad data.

pub mod adapter;
pub mod graph;
pub mod nav;
pub mod progress;
pub mod store;
pub mod unlock;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
