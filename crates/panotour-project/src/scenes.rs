//! Flat (non-hierarchical) viewer configuration.
//!
//! When a project has no hierarchical tour map, the viewer falls back to a
//! plain tree of scenes derived from the authored hotspot list: the root
//! panorama is the `main` scene, every hotspot with a target image becomes a
//! child scene reachable through its marker, and each child scene gets a
//! back-marker to its parent. There is no access state here -- every scene
//! is unconditionally reachable.

use std::collections::BTreeMap;

use crate::registry::Hotspot;

/// Id of the root scene.
pub const ROOT_SCENE: &str = "main";

/// Pitch of the generated back-markers.
const BACK_PITCH: f64 = -10.0;

/// What activating a marker does.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    /// Plain label, no navigation.
    Info,
    /// Switch the viewer to another scene.
    Scene { scene_id: String },
}

/// A marker inside a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMarker {
    pub id: String,
    pub pitch: f64,
    pub yaw: f64,
    pub text: String,
    pub kind: MarkerKind,
}

/// One viewer scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub panorama: String,
    pub markers: Vec<SceneMarker>,
}

/// Scene id for the child scene behind a hotspot.
fn child_scene_id(hotspot_id: &str) -> String {
    format!("scene_{hotspot_id}")
}

/// Build the full scene map for a project: root panorama plus one scene per
/// hotspot carrying a target image, linked both ways. Hotspots are grouped
/// by `parent_id` (`None` = root). Malformed parent references that would
/// revisit a scene are skipped rather than recursed into.
pub fn build_scenes(main_image: &str, hotspots: &[Hotspot]) -> BTreeMap<String, Scene> {
    let mut scenes = BTreeMap::new();
    build_scene(&mut scenes, ROOT_SCENE, main_image, None, hotspots);
    scenes
}

fn build_scene(
    scenes: &mut BTreeMap<String, Scene>,
    scene_id: &str,
    panorama: &str,
    parent_scene_id: Option<&str>,
    hotspots: &[Hotspot],
) {
    if scenes.contains_key(scene_id) {
        // Cycle in parent references; already built, don't recurse again.
        return;
    }
    let mut markers = Vec::new();
    if let Some(parent) = parent_scene_id {
        markers.push(SceneMarker {
            id: format!("back_{scene_id}"),
            pitch: BACK_PITCH,
            yaw: 0.0,
            text: "Back".to_string(),
            kind: MarkerKind::Scene {
                scene_id: parent.to_string(),
            },
        });
    }
    scenes.insert(
        scene_id.to_string(),
        Scene {
            panorama: panorama.to_string(),
            markers,
        },
    );

    // Which hotspot's children live in this scene: none for the root, the
    // owning hotspot's id otherwise.
    let owner = scene_id.strip_prefix("scene_");
    let here: Vec<&Hotspot> = hotspots
        .iter()
        .filter(|h| h.parent_id.as_deref() == owner)
        .collect();

    for hotspot in here {
        let marker = match &hotspot.target_image {
            Some(target_image) => {
                let child_id = child_scene_id(&hotspot.id);
                build_scene(scenes, &child_id, target_image, Some(scene_id), hotspots);
                SceneMarker {
                    id: hotspot.id.clone(),
                    pitch: hotspot.pitch,
                    yaw: hotspot.yaw,
                    text: hotspot.text.clone(),
                    kind: MarkerKind::Scene { scene_id: child_id },
                }
            }
            None => SceneMarker {
                id: hotspot.id.clone(),
                pitch: hotspot.pitch,
                yaw: hotspot.yaw,
                text: hotspot.text.clone(),
                kind: MarkerKind::Info,
            },
        };
        if let Some(scene) = scenes.get_mut(scene_id) {
            scene.markers.push(marker);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hotspot(id: &str, parent: Option<&str>, target: Option<&str>) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            pitch: -5.0,
            yaw: 10.0,
            text: format!("Spot {id}"),
            target_image: target.map(str::to_string),
            parent_id: parent.map(str::to_string),
        }
    }

    #[test]
    fn root_only_when_no_hotspots() {
        let scenes = build_scenes("root.jpg", &[]);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[ROOT_SCENE].panorama, "root.jpg");
        assert!(scenes[ROOT_SCENE].markers.is_empty());
    }

    #[test]
    fn imageless_hotspot_becomes_info_marker() {
        let scenes = build_scenes("root.jpg", &[hotspot("h1", None, None)]);
        assert_eq!(scenes.len(), 1);
        let marker = &scenes[ROOT_SCENE].markers[0];
        assert_eq!(marker.kind, MarkerKind::Info);
        assert_eq!(marker.text, "Spot h1");
    }

    #[test]
    fn nested_hotspots_build_child_scenes_with_back_markers() {
        let scenes = build_scenes(
            "root.jpg",
            &[
                hotspot("h1", None, Some("bedroom.jpg")),
                hotspot("h2", Some("h1"), Some("closet.jpg")),
                hotspot("h3", Some("h1"), None),
            ],
        );

        assert_eq!(scenes.len(), 3);
        assert_eq!(
            scenes[ROOT_SCENE].markers[0].kind,
            MarkerKind::Scene {
                scene_id: "scene_h1".into()
            }
        );

        let bedroom = &scenes["scene_h1"];
        assert_eq!(bedroom.panorama, "bedroom.jpg");
        // Back marker first, then this scene's own hotspots.
        assert_eq!(
            bedroom.markers[0].kind,
            MarkerKind::Scene {
                scene_id: ROOT_SCENE.into()
            }
        );
        assert_eq!(bedroom.markers[0].text, "Back");
        assert_eq!(
            bedroom.markers[1].kind,
            MarkerKind::Scene {
                scene_id: "scene_h2".into()
            }
        );
        assert_eq!(bedroom.markers[2].kind, MarkerKind::Info);

        assert_eq!(scenes["scene_h2"].panorama, "closet.jpg");
    }

    #[test]
    fn self_referencing_hotspot_terminates() {
        // A hotspot claiming to be its own parent must not recurse forever.
        let scenes = build_scenes("root.jpg", &[hotspot("h1", Some("h1"), Some("loop.jpg"))]);
        assert!(scenes.contains_key(ROOT_SCENE));
        assert!(scenes.len() <= 2);
    }

    #[test]
    fn duplicate_hotspot_ids_build_the_scene_once() {
        // The second occurrence maps to the already-built scene id and must
        // not rebuild or recurse into it.
        let scenes = build_scenes(
            "root.jpg",
            &[
                hotspot("h1", None, Some("a.jpg")),
                hotspot("h1", Some("h1"), Some("b.jpg")),
            ],
        );
        assert_eq!(scenes["scene_h1"].panorama, "a.jpg");
        assert_eq!(scenes.len(), 2);
    }

    #[test]
    fn orphan_hotspots_are_unreachable_but_harmless() {
        let scenes = build_scenes("root.jpg", &[hotspot("h9", Some("missing"), Some("x.jpg"))]);
        assert_eq!(scenes.len(), 1);
        assert!(scenes[ROOT_SCENE].markers.is_empty());
    }
}
