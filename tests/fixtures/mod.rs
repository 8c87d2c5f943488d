//! Shared test fixtures for generation and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use togglegen::models::{GenerationRequest, SceneGraph, SceneNode};

/// Scene used across tests:
///
/// ```text
/// Avatar
/// ├── Accessories
/// │   ├── Hat
/// │   └── Glasses
/// ├── Body
/// └── Outfit
///     ├── Cape
///     └── Boots
/// ```
pub fn avatar_tree() -> SceneNode {
    SceneNode::leaf("Avatar")
        .with_child(
            SceneNode::leaf("Accessories")
                .with_child(SceneNode::leaf("Hat"))
                .with_child(SceneNode::leaf("Glasses")),
        )
        .with_child(SceneNode::leaf("Body"))
        .with_child(
            SceneNode::leaf("Outfit")
                .with_child(SceneNode::leaf("Cape"))
                .with_child(SceneNode::leaf("Boots")),
        )
}

/// Two different objects that share the name `Hat`:
///
/// ```text
/// Avatar
/// ├── Casual
/// │   └── Hat
/// └── Formal
///     └── Hat
/// ```
pub fn twin_hats_tree() -> SceneNode {
    SceneNode::leaf("Avatar")
        .with_child(SceneNode::leaf("Casual").with_child(SceneNode::leaf("Hat")))
        .with_child(SceneNode::leaf("Formal").with_child(SceneNode::leaf("Hat")))
}

/// A scene where an object named `..` sits between the root and `Hat`:
///
/// ```text
/// Avatar
/// ├── ..
/// │   └── Hat
/// └── Body
/// ```
pub fn dotted_tree() -> SceneNode {
    SceneNode::leaf("Avatar")
        .with_child(SceneNode::leaf("..").with_child(SceneNode::leaf("Hat")))
        .with_child(SceneNode::leaf("Body"))
}

/// The avatar scene as a graph.
pub fn avatar_scene() -> SceneGraph {
    SceneGraph::from_tree(&avatar_tree())
}

/// A root with `count` direct children named `Item0`, `Item1`, ...
pub fn flat_tree(count: usize) -> SceneNode {
    (0..count).fold(SceneNode::leaf("Root"), |node, i| {
        node.with_child(SceneNode::leaf(format!("Item{i}")))
    })
}

/// Request rooted at the object at `root` with `paths` as
/// targets. `None` becomes an absent slot.
pub fn request_for(scene: &SceneGraph, root: &str, paths: &[Option<&str>]) -> GenerationRequest {
    let root_id = scene
        .find_by_path(root)
        .unwrap_or_else(|| panic!("fixture root {root} not in scene"));
    let mut request = GenerationRequest::new()
        .with_root(root_id)
        .with_clip_folder("clips")
        .with_menu_folder("menus");

    for path in paths {
        match path {
            Some(path) => {
                let target = scene
                    .find_by_path(path)
                    .unwrap_or_else(|| panic!("fixture path {path} not in scene"));
                request.add_target(target);
            }
            None => {
                request.push_entry(None);
            }
        }
    }
    request
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Temp workspace holding `scene.json` and `toggles.toml`.
pub struct Workspace {
    /// Keeps the directory alive
    pub temp: TempDir,
    /// Scene file
    pub scene: PathBuf,
    /// Toggle sheet file
    pub toggles: PathBuf,
    /// Controller file (not created)
    pub controller: PathBuf,
    /// Exposed parameter file (not created)
    pub parameters: PathBuf,
    /// Isolated config directory
    pub config_dir: PathBuf,
}

impl Workspace {
    /// Creates a workspace with the avatar scene and the given sheet.
    pub fn new(sheet: &str) -> Self {
        Self::with_scene(&avatar_tree(), sheet)
    }

    /// Creates a workspace with `tree` as the scene and the given sheet.
    pub fn with_scene(tree: &SceneNode, sheet: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let scene_json =
            serde_json::to_string_pretty(tree).expect("Failed to serialize scene");
        let scene = write_file(temp.path(), "scene.json", &scene_json);
        let toggles = write_file(temp.path(), "toggles.toml", sheet);
        let config_dir = temp.path().join("config");

        Self {
            controller: temp.path().join("FX.json"),
            parameters: temp.path().join("Params.json"),
            scene,
            toggles,
            config_dir,
            temp,
        }
    }

    /// Workspace root.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

/// Sheet with three targets under the avatar root, Hat on by default.
pub const BASIC_SHEET: &str = r#"
root = "Avatar"
clip_folder = "out/clips"
menu_folder = "out/menus"

[[toggles]]
target = "Avatar/Accessories/Hat"
default_on = true

[[toggles]]
target = "Avatar/Outfit/Cape"

[[toggles]]
target = "Avatar/Outfit/Boots"
"#;

/// Sheet targeting both hats of [`twin_hats_tree`].
pub const TWIN_HATS_SHEET: &str = r#"
root = "Avatar"
clip_folder = "clips"
menu_folder = "menus"

[[toggles]]
target = "Avatar/Casual/Hat"

[[toggles]]
target = "Avatar/Formal/Hat"
"#;

/// Sheet targeting the hat below the `..` object of [`dotted_tree`].
pub const DOTTED_SHEET: &str = r#"
root = "Avatar"
clip_folder = "clips"
menu_folder = "menus"

[[toggles]]
target = "Avatar/../Hat"

[[toggles]]
target = "Avatar/Body"
"#;
