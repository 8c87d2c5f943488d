//! Toggle entries and the generation request that carries them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::scene::{ObjectId, SceneGraph};

/// One object to toggle and its initial visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEntry {
    /// Object whose visibility is animated
    pub target: ObjectId,
    /// Whether the generated layer starts in the On state
    pub default_on: bool,
}

impl ToggleEntry {
    /// Creates a new entry.
    #[must_use]
    pub const fn new(target: ObjectId, default_on: bool) -> Self {
        Self { target, default_on }
    }
}

/// Everything one generation run needs.
///
/// Entries are kept in order and may be absent (`None`). An absent entry
/// generates nothing but still occupies a slot when menu pages are sized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Object that clip paths are computed relative to
    pub root: Option<ObjectId>,
    /// Ordered toggle slots
    pub entries: Vec<Option<ToggleEntry>>,
    /// Destination folder for generated clips
    pub clip_folder: Option<PathBuf>,
    /// Destination folder for generated menu pages
    pub menu_folder: Option<PathBuf>,
}

impl GenerationRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root object.
    pub fn with_root(mut self, root: ObjectId) -> Self {
        self.root = Some(root);
        self
    }

    /// Sets the clip destination folder.
    pub fn with_clip_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.clip_folder = Some(folder.into());
        self
    }

    /// Sets the menu destination folder.
    pub fn with_menu_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.menu_folder = Some(folder.into());
        self
    }

    /// Returns true if `target` already has an entry.
    #[must_use]
    pub fn contains(&self, target: ObjectId) -> bool {
        self.entries.iter().flatten().any(|e| e.target == target)
    }

    /// Appends `target` with default-off, unless it is already present.
    ///
    /// Returns true if the target was added.
    pub fn add_target(&mut self, target: ObjectId) -> bool {
        self.push_entry(Some(ToggleEntry::new(target, false)))
    }

    /// Appends a raw slot.
    ///
    /// Absent slots are always appended; present ones are rejected when
    /// their target already has an entry.
    pub fn push_entry(&mut self, entry: Option<ToggleEntry>) -> bool {
        if let Some(e) = entry {
            if self.contains(e.target) {
                return false;
            }
        }
        self.entries.push(entry);
        true
    }

    /// Changes the default state of the entry at `index`.
    ///
    /// Returns false when the slot does not exist or is absent.
    pub fn set_default_on(&mut self, index: usize, default_on: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(Some(entry)) => {
                entry.default_on = default_on;
                true
            }
            _ => false,
        }
    }

    /// Removes the slot at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Option<ToggleEntry>> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Total number of slots, absent ones included.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots that carry a target.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.entries.iter().flatten().count()
    }
}

/// On-disk toggle sheet (TOML).
///
/// ```toml
/// root = "Avatar"
/// clip_folder = "generated/clips"
/// menu_folder = "generated/menus"
///
/// [[toggles]]
/// target = "Avatar/Accessories/Hat"
/// default_on = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSheet {
    /// Path of the root object
    #[serde(default)]
    pub root: Option<String>,
    /// Clip destination folder
    #[serde(default)]
    pub clip_folder: Option<PathBuf>,
    /// Menu destination folder
    #[serde(default)]
    pub menu_folder: Option<PathBuf>,
    /// Toggle rows in order
    #[serde(default)]
    pub toggles: Vec<ToggleSheetEntry>,
}

/// A single row of a [`ToggleSheet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSheetEntry {
    /// Slash-separated object path in the scene
    pub target: String,
    /// Initial state
    #[serde(default)]
    pub default_on: bool,
}

impl ToggleSheet {
    /// Resolves object paths against `scene`.
    ///
    /// Rows whose target cannot be found become absent slots, and an
    /// unresolvable root leaves the request without a root.
    pub fn resolve(&self, scene: &SceneGraph) -> GenerationRequest {
        let mut request = GenerationRequest {
            clip_folder: self.clip_folder.clone(),
            menu_folder: self.menu_folder.clone(),
            ..GenerationRequest::default()
        };

        if let Some(root_path) = &self.root {
            request.root = scene.find_by_path(root_path);
            if request.root.is_none() {
                warn!("Root object '{}' not found in scene", root_path);
            }
        }

        for row in &self.toggles {
            let entry = scene.find_by_path(&row.target).map(|target| ToggleEntry {
                target,
                default_on: row.default_on,
            });
            if entry.is_none() {
                warn!("Toggle target '{}' not found in scene", row.target);
            }
            if !request.push_entry(entry) {
                warn!("Toggle target '{}' listed more than once", row.target);
            }
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scene::SceneNode;

    fn scene() -> SceneGraph {
        SceneGraph::from_tree(
            &SceneNode::leaf("Avatar")
                .with_child(SceneNode::leaf("Hat"))
                .with_child(SceneNode::leaf("Cape")),
        )
    }

    #[test]
    fn test_add_target_ignores_duplicates() {
        let mut request = GenerationRequest::new();
        assert!(request.add_target(ObjectId(1)));
        assert!(!request.add_target(ObjectId(1)));
        assert!(request.add_target(ObjectId(2)));
        assert_eq!(request.slot_count(), 2);
        assert_eq!(request.entries[0], Some(ToggleEntry::new(ObjectId(1), false)));
    }

    #[test]
    fn test_absent_slots_count_as_slots() {
        let mut request = GenerationRequest::new();
        assert!(request.push_entry(None));
        assert!(request.push_entry(None));
        request.add_target(ObjectId(1));

        assert_eq!(request.slot_count(), 3);
        assert_eq!(request.valid_count(), 1);
    }

    #[test]
    fn test_set_default_on_and_remove() {
        let mut request = GenerationRequest::new();
        request.add_target(ObjectId(1));
        request.push_entry(None);

        assert!(request.set_default_on(0, true));
        assert!(!request.set_default_on(1, true));
        assert!(!request.set_default_on(5, true));
        assert!(request.entries[0].unwrap().default_on);

        assert_eq!(request.remove(1), Some(None));
        assert_eq!(request.remove(4), None);
        assert_eq!(request.slot_count(), 1);
    }

    #[test]
    fn test_sheet_resolve_missing_targets_become_absent() {
        let sheet: ToggleSheet = toml::from_str(
            r#"
            root = "Avatar"
            clip_folder = "clips"

            [[toggles]]
            target = "Avatar/Hat"
            default_on = true

            [[toggles]]
            target = "Avatar/Gloves"

            [[toggles]]
            target = "Avatar/Cape"
            "#,
        )
        .unwrap();

        let scene = scene();
        let request = sheet.resolve(&scene);

        assert_eq!(request.root, scene.find_by_path("Avatar"));
        assert_eq!(request.clip_folder, Some(PathBuf::from("clips")));
        assert_eq!(request.menu_folder, None);
        assert_eq!(request.slot_count(), 3);
        assert!(request.entries[1].is_none());
        assert!(request.entries[0].unwrap().default_on);
        assert!(!request.entries[2].unwrap().default_on);
    }

    #[test]
    fn test_sheet_resolve_unknown_root() {
        let sheet = ToggleSheet {
            root: Some("Nope".to_string()),
            ..ToggleSheet::default()
        };
        assert_eq!(sheet.resolve(&scene()).root, None);
    }
}
