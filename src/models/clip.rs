//! Constant-value visibility clips.

use serde::{Deserialize, Serialize};

use crate::constants::{CLIP_OFF_SUFFIX, CLIP_ON_SUFFIX};

/// The two states of a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToggleState {
    /// Target visible
    On,
    /// Target hidden
    Off,
}

impl ToggleState {
    /// Maps a boolean to a state.
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Curve value written by clips for this state.
    #[must_use]
    pub const fn value(self) -> f32 {
        match self {
            Self::On => 1.0,
            Self::Off => 0.0,
        }
    }

    /// Suffix appended to the target name for this state's clip.
    #[must_use]
    pub const fn clip_suffix(self) -> &'static str {
        match self {
            Self::On => CLIP_ON_SUFFIX,
            Self::Off => CLIP_OFF_SUFFIX,
        }
    }

    /// State name as shown in the state machine.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }
}

impl std::fmt::Display for ToggleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Animation artifact holding one constant curve.
///
/// The curve has a single key at time 0 and no interpolation, so sampling
/// at any time yields `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleClip {
    /// Clip name, e.g. `Hat_On`
    pub name: String,
    /// Path from the root object to the animated object
    pub owner_path: String,
    /// Animated property
    pub property: String,
    /// Constant curve value (1.0 visible, 0.0 hidden)
    pub value: f32,
}

impl ToggleClip {
    /// Samples the curve.
    #[must_use]
    pub fn sample(&self, _time: f32) -> f32 {
        self.value
    }

    /// Returns true if this clip shows its target.
    #[must_use]
    pub fn shows_target(&self) -> bool {
        self.sample(0.0) > 0.5
    }
}

/// Stable reference to a persisted clip, usable as a state's motion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClipRef {
    /// Clip name
    pub name: String,
    /// Store-specific location (file path for filesystem stores)
    pub location: String,
}
