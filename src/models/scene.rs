//! Scene object hierarchy used to resolve toggle targets and their paths.

use serde::{Deserialize, Serialize};

/// Index of an object inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

/// A single named object with an optional parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name as shown in the hierarchy
    pub name: String,
    /// Parent object, `None` for top-level objects
    pub parent: Option<ObjectId>,
}

/// Nested on-disk form of a scene hierarchy.
///
/// ```json
/// { "name": "Avatar", "children": [ { "name": "Hat" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Object name
    pub name: String,
    /// Child objects in hierarchy order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a leaf node.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Returns true if `name` can stand as one path component.
///
/// Empty names, `.`, `..` and names containing `/` or `\` are rejected.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Arena of scene objects with parent links.
///
/// Objects are never removed, so an [`ObjectId`] handed out by this graph
/// stays valid for its whole lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneGraph {
    objects: Vec<SceneObject>,
}

impl SceneGraph {
    /// Creates an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Builds a scene from a nested node tree.
    pub fn from_tree(root: &SceneNode) -> Self {
        let mut graph = Self::new();
        graph.insert_tree(None, root);
        graph
    }

    fn insert_tree(&mut self, parent: Option<ObjectId>, node: &SceneNode) -> ObjectId {
        let id = self.push(node.name.clone(), parent);
        for child in &node.children {
            self.insert_tree(Some(id), child);
        }
        id
    }

    fn push(&mut self, name: String, parent: Option<ObjectId>) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(SceneObject { name, parent });
        id
    }

    /// Adds a top-level object.
    pub fn add_root(&mut self, name: impl Into<String>) -> ObjectId {
        self.push(name.into(), None)
    }

    /// Adds a child under `parent`.
    ///
    /// Returns `None` if `parent` does not belong to this scene.
    pub fn add_child(&mut self, parent: ObjectId, name: impl Into<String>) -> Option<ObjectId> {
        self.get(parent)?;
        Some(self.push(name.into(), Some(parent)))
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Name of an object, if it exists.
    #[must_use]
    pub fn name(&self, id: ObjectId) -> Option<&str> {
        self.get(id).map(|o| o.name.as_str())
    }

    /// Direct children of `id` in insertion order.
    pub fn children(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, o)| o.parent == Some(id))
            .map(|(idx, _)| ObjectId(idx))
    }

    /// Resolves a slash-separated path starting at a top-level object.
    ///
    /// When siblings share a name the first one wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use togglegen::models::{SceneGraph, SceneNode};
    ///
    /// let scene = SceneGraph::from_tree(
    ///     &SceneNode::leaf("Avatar").with_child(SceneNode::leaf("Hat")),
    /// );
    /// assert!(scene.find_by_path("Avatar/Hat").is_some());
    /// assert!(scene.find_by_path("Avatar/Shoes").is_none());
    /// ```
    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<ObjectId> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let first = segments.next()?;

        let mut current = self
            .objects
            .iter()
            .position(|o| o.parent.is_none() && o.name == first)
            .map(ObjectId)?;

        for segment in segments {
            current = self
                .children(current)
                .find(|child| self.name(*child) == Some(segment))?;
        }

        Some(current)
    }

    /// Computes the path of `target` relative to `root`.
    ///
    /// Returns `None` when `target` is not `root` or one of its descendants.
    /// The root itself maps to the empty path.
    #[must_use]
    pub fn relative_path(&self, root: ObjectId, target: ObjectId) -> Option<String> {
        self.relative_segments(root, target)
            .map(|segments| segments.join("/"))
    }

    /// Object names from just below `root` down to `target`.
    ///
    /// Same containment rules as [`Self::relative_path`], but names are kept
    /// apart so they can be checked one by one.
    #[must_use]
    pub fn relative_segments(&self, root: ObjectId, target: ObjectId) -> Option<Vec<&str>> {
        self.get(root)?;
        let mut segments = Vec::new();
        let mut current = target;

        while current != root {
            let object = self.get(current)?;
            segments.push(object.name.as_str());
            current = object.parent?;
        }

        segments.reverse();
        Some(segments)
    }

    /// Returns true if `target` lies strictly below `root`.
    #[must_use]
    pub fn is_descendant(&self, root: ObjectId, target: ObjectId) -> bool {
        root != target && self.relative_path(root, target).is_some()
    }
}
