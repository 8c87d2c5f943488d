//! Document file I/O service.
//!
//! Centralizes loading and saving of the scene, toggle sheet and the two
//! parameter registries so the CLI never touches the filesystem directly.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::{AnimatorController, ExposedParameters, SceneGraph, SceneNode, ToggleSheet};
use crate::store::fs::write_json_atomic;

/// Service for reading and writing generation documents.
pub struct DocumentService;

impl DocumentService {
    /// Loads a scene from a JSON tree of `{ "name", "children" }` nodes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use togglegen::services::DocumentService;
    ///
    /// let scene = DocumentService::load_scene(Path::new("avatar.json"))?;
    /// println!("{} objects", scene.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load_scene(path: &Path) -> Result<SceneGraph> {
        let content = read(path, "scene")?;
        let root: SceneNode = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene {}", path.display()))?;
        Ok(SceneGraph::from_tree(&root))
    }

    /// Loads a toggle sheet from TOML.
    pub fn load_toggle_sheet(path: &Path) -> Result<ToggleSheet> {
        let content = read(path, "toggle sheet")?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse toggle sheet {}", path.display()))
    }

    /// Loads a controller, or creates an empty one named after the file stem
    /// when the file does not exist yet.
    pub fn load_controller_or_new(path: &Path) -> Result<AnimatorController> {
        if !path.exists() {
            return Ok(AnimatorController::new(file_stem(path)));
        }
        let content = read(path, "controller")?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse controller {}", path.display()))
    }

    /// Saves a controller atomically.
    pub fn save_controller(controller: &AnimatorController, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        write_json_atomic(path, controller)
            .with_context(|| format!("Failed to save controller to {}", path.display()))
    }

    /// Loads an exposed parameter list, or creates an empty one named after
    /// the file stem.
    pub fn load_exposed_or_new(path: &Path) -> Result<ExposedParameters> {
        if !path.exists() {
            return Ok(ExposedParameters::new(file_stem(path)));
        }
        let content = read(path, "parameter list")?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse parameter list {}", path.display()))
    }

    /// Saves an exposed parameter list atomically.
    pub fn save_exposed(exposed: &ExposedParameters, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        write_json_atomic(path, exposed)
            .with_context(|| format!("Failed to save parameter list to {}", path.display()))
    }
}

fn read(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {what} {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create folder {}", parent.display())),
        _ => Ok(()),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| "Untitled".to_string(), |s| s.to_string_lossy().into_owned())
}
