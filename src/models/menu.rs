//! Fixed-capacity menu pages and their controls.

use serde::{Deserialize, Serialize};

/// Control type on a menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlKind {
    /// Flips a boolean parameter
    #[default]
    Toggle,
}

/// One entry on a menu page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuControl {
    /// Label shown to the user
    pub label: String,
    /// Parameter driven by the control
    pub parameter: String,
    /// Control type
    pub kind: ControlKind,
}

impl MenuControl {
    /// Creates a toggle control.
    pub fn toggle(label: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            parameter: parameter.into(),
            kind: ControlKind::Toggle,
        }
    }
}

/// A page of controls.
///
/// # Validation
///
/// - `controls.len()` never exceeds `capacity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuPage {
    /// Page name, e.g. `ToggleMenu_0`
    pub name: String,
    /// Maximum number of controls
    pub capacity: usize,
    /// Controls in insertion order
    #[serde(default)]
    pub controls: Vec<MenuControl>,
    /// Name of the exposed-parameter list the controls refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
}

impl MenuPage {
    /// Creates an empty page.
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            controls: Vec::new(),
            parameters: None,
        }
    }

    /// Returns true if another control fits.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.controls.len() < self.capacity
    }

    /// Appends a control, handing it back when the page is full.
    pub fn push(&mut self, control: MenuControl) -> Result<(), MenuControl> {
        if !self.has_room() {
            return Err(control);
        }
        self.controls.push(control);
        Ok(())
    }
}
