//! Data models for scenes, toggle requests, controllers and menus.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are designed to be independent of generation logic and storage.

pub mod clip;
pub mod controller;
pub mod menu;
pub mod parameter;
pub mod request;
pub mod scene;

// Re-export all model types
pub use clip::{ClipRef, ToggleClip, ToggleState};
pub use controller::{
    AnimatorController, AnimatorState, Condition, ConditionMode, ControllerLayer,
    ParameterValues, StateMachine, StateTransition,
};
pub use menu::{ControlKind, MenuControl, MenuPage};
pub use parameter::{
    bool_default, ControllerParameter, ExposedParameter, ExposedParameters, ParameterKind,
};
pub use request::{GenerationRequest, ToggleEntry, ToggleSheet, ToggleSheetEntry};
pub use scene::{is_valid_name, ObjectId, SceneGraph, SceneNode, SceneObject};
