//! Panotour Project -- the operator-facing project registry.
//!
//! A project is one published tour: a name (slug), a password gating end-user
//! access, a title, a root panorama image, and the hotspots the authoring
//! tool placed. The registry persists as a single JSON entry through the
//! [`panotour_core::store::StorageGateway`] seam, degrading to a seeded
//! default set when the stored entry is missing or unreadable.
//!
//! Passwords here are illustrative plain-text checks; real authentication
//! strength is an explicit non-goal.
//!
//! [`scenes`] builds the flat (non-hierarchical) viewer configuration used
//! when a project has no hierarchical tour map: every scene is reachable
//! unconditionally, with no unlock state at all.

pub mod registry;
pub mod scenes;

pub use registry::{Hotspot, Project, ProjectError, ProjectRegistry, slugify};
pub use scenes::{MarkerKind, ROOT_SCENE, Scene, SceneMarker, build_scenes};
