//! Application-wide constants.
//!
//! This module defines the application name plus the fixed naming and sizing
//! rules used by toggle generation.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Togglegen";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "togglegen";

/// Number of controls a single menu page can hold.
pub const MENU_PAGE_CAPACITY: usize = 8;

/// Suffix appended to a target name to form its parameter and layer name.
pub const TOGGLE_SUFFIX: &str = "_Toggle";

/// Suffix appended to a target name to form its state machine name.
pub const STATE_MACHINE_SUFFIX: &str = "_SM";

/// Suffix of the clip that shows the target.
pub const CLIP_ON_SUFFIX: &str = "_On";

/// Suffix of the clip that hides the target.
pub const CLIP_OFF_SUFFIX: &str = "_Off";

/// Object property animated by toggle clips.
pub const VISIBILITY_PROPERTY: &str = "visibility";

/// Default prefix for generated menu page names.
pub const DEFAULT_MENU_PREFIX: &str = "ToggleMenu";
