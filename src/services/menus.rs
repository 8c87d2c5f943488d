//! Menu pagination with a fixed page capacity.

use crate::constants::{DEFAULT_MENU_PREFIX, MENU_PAGE_CAPACITY};
use crate::models::{MenuControl, MenuPage};
use crate::services::error::GenerationError;

/// Number of pages needed for `slots` entries, `ceil(slots / capacity)`.
///
/// A capacity of zero is treated as one.
pub fn page_count(slots: usize, capacity: usize) -> usize {
    slots.div_ceil(capacity.max(1))
}

/// Allocates pages up front and places controls first-fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuPaginator {
    prefix: String,
    capacity: usize,
}

impl Default for MenuPaginator {
    fn default() -> Self {
        Self::new(DEFAULT_MENU_PREFIX, MENU_PAGE_CAPACITY)
    }
}

impl MenuPaginator {
    /// Creates a paginator. A capacity of zero is treated as one.
    pub fn new(prefix: impl Into<String>, capacity: usize) -> Self {
        Self {
            prefix: prefix.into(),
            capacity: capacity.max(1),
        }
    }

    /// Page capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Name of the page at `index`, e.g. `ToggleMenu_0`.
    #[must_use]
    pub fn page_name(&self, index: usize) -> String {
        format!("{}_{}", self.prefix, index)
    }

    /// Creates the empty pages for `slots` entries.
    ///
    /// Pages are sized from the slot count, absent slots included.
    #[must_use]
    pub fn preallocate(&self, slots: usize) -> Vec<MenuPage> {
        (0..page_count(slots, self.capacity))
            .map(|index| MenuPage::new(self.page_name(index), self.capacity))
            .collect()
    }

    /// Appends `control` to the first page with room.
    ///
    /// Returns the index of the page that received it.
    ///
    /// # Errors
    ///
    /// [`GenerationError::PageOverflow`] when every page is full.
    pub fn place(
        &self,
        pages: &mut [MenuPage],
        control: MenuControl,
    ) -> Result<usize, GenerationError> {
        let total = pages.len();
        let overflow = |control: MenuControl| GenerationError::PageOverflow {
            label: control.label,
            pages: total,
            capacity: self.capacity,
        };

        match pages.iter().position(MenuPage::has_room) {
            Some(index) => pages[index].push(control).map(|()| index).map_err(overflow),
            None => Err(overflow(control)),
        }
    }
}
