//! Loading pipeline: read a map definition, normalize it into a graph.
//!
//! Provides format detection (RON/JSON/TOML), deserialization helpers, and
//! [`build_graph`] -- the single ingestion boundary where every authoring
//! shorthand (bare-string links, omitted angles, omitted titles and states)
//! becomes the one canonical graph representation.

use panotour_core::graph::{Link, Node, TourGraph};
use panotour_core::store::{MAP_KEY, StorageGateway};
use std::path::{Path, PathBuf};

use crate::schema::{LinkData, TourMapData};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a tour map.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// A deserialization error occurred while reading a file.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A deserialization error occurred on an in-memory definition.
    #[error("malformed tour map: {detail}")]
    Malformed { detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported map file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// Loading
// ===========================================================================

/// Load and normalize a map definition from a file, detecting the format
/// from its extension.
pub fn load_map_file(path: impl AsRef<Path>) -> Result<TourGraph, DataLoadError> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let raw = std::fs::read_to_string(path)?;
    let parse_err = |detail: String| DataLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };
    let map: TourMapData = match format {
        Format::Json => serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string()))?,
        Format::Ron => ron::from_str(&raw).map_err(|e| parse_err(e.to_string()))?,
        Format::Toml => toml::from_str(&raw).map_err(|e| parse_err(e.to_string()))?,
    };
    Ok(build_graph(map))
}

/// Parse and normalize a JSON map definition from a string (the wire form
/// the authoring tool and the persistence gateway use).
pub fn parse_map_json(raw: &str) -> Result<TourGraph, DataLoadError> {
    let map: TourMapData = serde_json::from_str(raw).map_err(|e| DataLoadError::Malformed {
        detail: e.to_string(),
    })?;
    Ok(build_graph(map))
}

/// Load the map definition stored under [`MAP_KEY`], if any.
///
/// `Ok(None)` means no map is stored (the caller falls back to the flat
/// mode); a stored-but-corrupt map is an error the caller may likewise
/// treat as "no hierarchical map".
pub fn load_map_gateway<G: StorageGateway>(
    gateway: &G,
) -> Result<Option<TourGraph>, DataLoadError> {
    match gateway.load(MAP_KEY) {
        Some(raw) => parse_map_json(&raw).map(Some),
        None => Ok(None),
    }
}

// ===========================================================================
// Normalization
// ===========================================================================

/// Turn a parsed definition into the canonical graph. Infallible by design:
/// missing fields default and unknown link targets stay dangling rather
/// than failing the load.
pub fn build_graph(map: TourMapData) -> TourGraph {
    let mut nodes = Vec::with_capacity(map.nodes.len());
    for (id, data) in map.nodes {
        let count = data.links.len();
        let links = data
            .links
            .into_iter()
            .enumerate()
            .map(|(i, link)| match link {
                LinkData::Short(target) => Link::normalized(target, None, None, None, i, count),
                LinkData::Full {
                    target_id,
                    yaw,
                    pitch,
                    text,
                } => Link::normalized(target_id, yaw, pitch, text, i, count),
            })
            .collect();

        let mut node = Node::new(id, data.panorama);
        if let Some(title) = data.title {
            node.title = title;
        }
        if let Some(state) = data.initial_state {
            node.initial_state = state;
        }
        node.links = links;
        nodes.push(node);
    }
    TourGraph::new(map.initial_node_id, nodes)
}

// ===========================================================================
// Tests
// ===========================================================================
