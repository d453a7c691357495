//! The project registry: password-gated tours, persisted as one JSON entry.

use panotour_core::store::{GatewayError, PROJECTS_KEY, StorageGateway};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// The project name slugged down to nothing.
    #[error("project name '{raw}' contains no usable characters")]
    EmptyName { raw: String },

    /// A project with this slug already exists.
    #[error("project '{name}' already exists")]
    DuplicateProject { name: String },
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// A hotspot placed by the authoring tool. `target_image` turns the hotspot
/// into a doorway to a child scene; `parent_id` is the hotspot whose child
/// scene this one was placed in (`None` for the root scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// One published tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub password: String,
    pub title: String,
    /// Root panorama (URL or embedded data URI).
    pub image: String,
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
    #[serde(default)]
    pub created_at: String,
}

impl Project {
    pub fn new(
        password: impl Into<String>,
        title: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Project {
            password: password.into(),
            title: title.into(),
            image: image.into(),
            hotspots: Vec::new(),
            created_at: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All projects, keyed by slug. Loaded from and saved to the gateway as one
/// JSON entry under [`PROJECTS_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRegistry {
    projects: BTreeMap<String, Project>,
}

impl ProjectRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        ProjectRegistry {
            projects: BTreeMap::new(),
        }
    }

    /// The seeded demo set shipped with a fresh install.
    pub fn seeded() -> Self {
        let mut registry = ProjectRegistry::new();
        registry.projects.insert(
            "demo-project".into(),
            Project {
                created_at: "2024-01-01T00:00:00Z".into(),
                ..Project::new(
                    "123456",
                    "Demo Project",
                    "https://pannellum.org/images/alma.jpg",
                )
            },
        );
        registry.projects.insert(
            "model-house".into(),
            Project {
                created_at: "2024-01-01T00:00:00Z".into(),
                ..Project::new(
                    "casa2024",
                    "Model House",
                    "https://pannellum.org/images/cerro-toco-0.jpg",
                )
            },
        );
        registry.projects.insert(
            "luxury-apartment".into(),
            Project {
                created_at: "2024-01-01T00:00:00Z".into(),
                ..Project::new(
                    "luxo789",
                    "Luxury Apartment",
                    "https://pannellum.org/images/jfk.jpg",
                )
            },
        );
        registry
    }

    /// Load the registry from the gateway. A missing or unreadable entry
    /// falls back to the seeded defaults -- bad storage never fails a
    /// session.
    pub fn load<G: StorageGateway>(gateway: &G) -> Self {
        match gateway.load(PROJECTS_KEY) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(registry) => registry,
                Err(e) => {
                    log::debug!("discarding corrupt project registry: {e}");
                    ProjectRegistry::seeded()
                }
            },
            None => ProjectRegistry::seeded(),
        }
    }

    /// Persist the registry. Best-effort; callers may ignore the result.
    pub fn save<G: StorageGateway>(&self, gateway: &mut G) -> Result<(), GatewayError> {
        match serde_json::to_string(self) {
            Ok(json) => gateway.save(PROJECTS_KEY, &json),
            Err(e) => {
                log::debug!("project registry not serializable: {e}");
                Ok(())
            }
        }
    }

    /// Register a project under the slug of `name`. Returns the slug.
    pub fn create(&mut self, name: &str, project: Project) -> Result<String, ProjectError> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(ProjectError::EmptyName {
                raw: name.to_string(),
            });
        }
        if self.projects.contains_key(&slug) {
            return Err(ProjectError::DuplicateProject { name: slug });
        }
        self.projects.insert(slug.clone(), project);
        Ok(slug)
    }

    /// Remove a project by slug. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.projects.remove(&slugify(name)).is_some()
    }

    /// Look up a project by slug.
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.get(&slugify(name))
    }

    /// Check a project password. The name is slug-normalized first, so end
    /// users may type the display form. Plain-text comparison by design.
    pub fn authenticate(&self, name: &str, password: &str) -> Option<&Project> {
        self.get(name).filter(|p| p.password == password)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Project)> {
        self.projects.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Normalize a project name: lowercase, alphanumeric runs kept, everything
/// else collapsed into single `-` separators, leading/trailing `-` trimmed.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

// ===========================================================================
// Tests
// ===========================================================================
