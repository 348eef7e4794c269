use crate::error::{BridgeError, Result};
use crate::protocol::{Item, Menu};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Top-level fields that `update_menu_fields` actually changed. A field is
/// `Some` only if its value differs from what was stored before.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MenuChanges {
    pub icon: Option<String>,
    pub title: Option<String>,
    pub tooltip: Option<String>,
}

impl MenuChanges {
    pub fn is_empty(&self) -> bool {
        self.icon.is_none() && self.title.is_none() && self.tooltip.is_none()
    }
}

/// The menu currently on screen. The item count is fixed when the store is
/// initialised; a sequence ID is an index into that fixed slice.
///
/// Cloning shares the same state. Every operation holds the lock for one
/// field or item update only.
#[derive(Clone, Default)]
pub struct MenuStore {
    menu: Arc<Mutex<Menu>>,
}

impl MenuStore {
    pub fn initialize(menu: Menu) -> Self {
        Self {
            menu: Arc::new(Mutex::new(menu)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Menu> {
        self.menu.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_item(&self, seq_id: i64) -> Result<Item> {
        let menu = self.lock();
        let index = slot(seq_id, menu.items.len())?;
        Ok(menu.items[index].clone())
    }

    /// Overwrites the content of a slot. The slot keeps its sequence ID.
    pub fn replace_item(&self, seq_id: i64, item: Item) -> Result<()> {
        let mut menu = self.lock();
        let index = slot(seq_id, menu.items.len())?;
        menu.items[index] = item;
        Ok(())
    }

    /// Compares icon, title and tooltip against `update` and stores the ones
    /// that differ. `update.items` is ignored: items are never added or
    /// removed after initialisation.
    pub fn update_menu_fields(&self, update: &Menu) -> MenuChanges {
        let mut menu = self.lock();
        let mut changes = MenuChanges::default();

        if menu.title != update.title {
            menu.title = update.title.clone();
            changes.title = Some(update.title.clone());
        }
        if menu.icon != update.icon {
            menu.icon = update.icon.clone();
            changes.icon = Some(update.icon.clone());
        }
        if menu.tooltip != update.tooltip {
            menu.tooltip = update.tooltip.clone();
            changes.tooltip = Some(update.tooltip.clone());
        }

        changes
    }

    pub fn snapshot(&self) -> Menu {
        self.lock().clone()
    }
}

fn slot(seq_id: i64, len: usize) -> Result<usize> {
    usize::try_from(seq_id)
        .ok()
        .filter(|&index| index < len)
        .ok_or(BridgeError::Index { seq_id, len })
}
