//! Clip synthesis: one constant visibility curve per (target, state).

use crate::constants::VISIBILITY_PROPERTY;
use crate::models::{is_valid_name, ObjectId, SceneGraph, ToggleClip, ToggleState};
use crate::services::error::GenerationError;

/// Builds the clip that puts `target` into `state`.
///
/// The clip is named `<target>_On` or `<target>_Off` and binds the target's
/// visibility through its path relative to `root`.
///
/// # Errors
///
/// - [`GenerationError::MissingRoot`] when `root` is `None`
/// - [`GenerationError::TargetOutsideRoot`] when `target` is not below `root`
///   (objects missing from the scene are never below it)
/// - [`GenerationError::InvalidObjectName`] when an object between `root`
///   and `target` has a name that is not a single path component
pub fn synthesize_clip(
    scene: &SceneGraph,
    root: Option<ObjectId>,
    target: ObjectId,
    state: ToggleState,
) -> Result<ToggleClip, GenerationError> {
    let target_name = scene
        .name(target)
        .map_or_else(|| format!("#{}", target.0), str::to_string);

    let root = root.ok_or_else(|| GenerationError::MissingRoot {
        target: target_name.clone(),
    })?;

    // the root itself would yield an empty path, which binds nothing
    let segments = scene
        .relative_segments(root, target)
        .filter(|segments| !segments.is_empty())
        .ok_or_else(|| GenerationError::TargetOutsideRoot {
            target: target_name.clone(),
            root: scene.name(root).unwrap_or("<unknown>").to_string(),
        })?;

    // clip names become file names and paths are joined with '/'
    if let Some(segment) = segments.iter().find(|segment| !is_valid_name(segment)) {
        return Err(GenerationError::InvalidObjectName {
            target: target_name,
            segment: (*segment).to_string(),
        });
    }
    let owner_path = segments.join("/");

    Ok(ToggleClip {
        name: format!("{}{}", target_name, state.clip_suffix()),
        owner_path,
        property: VISIBILITY_PROPERTY.to_string(),
        value: state.value(),
    })
}
