//! Panotour Data -- the external tour-map format and its loader.
//!
//! [`schema`] defines the serde structs for the authored map definition;
//! [`loader`] detects the file format (RON/JSON/TOML), deserializes, and
//! normalizes every shorthand into the canonical [`panotour_core::graph`]
//! representation. Normalization happens here and nowhere else; no code
//! deeper in the system branches on input shape.

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, build_graph, load_map_file, load_map_gateway, parse_map_json};
pub use schema::{LinkData, NodeData, TourMapData};
