//! The UI capability the bridge drives.
//!
//! The protocol core never touches a toolkit directly. It talks to a
//! [`TrayUi`] for the top-level icon/title/tooltip and to one [`ItemUi`] per
//! menu entry. `crate::tray` provides the production implementation; tests
//! provide recording ones.

use anyhow::Result;
use tokio::sync::mpsc;

/// Fires once per click on the item it was obtained from. The source closes
/// when the item's UI handle is torn down.
pub type ClickSource = mpsc::UnboundedReceiver<()>;

pub trait TrayUi: Send {
    type Item: ItemUi;

    /// `None` clears the icon. `Some` carries raw image file bytes.
    fn set_icon(&mut self, icon: Option<&[u8]>) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    fn set_tooltip(&mut self, tooltip: &str) -> Result<()>;

    /// Appends an item. Items are addressed by the order they were added in.
    fn add_item(&mut self, title: &str, tooltip: &str) -> Result<Self::Item>;
}

pub trait ItemUi: Send {
    fn check(&self) -> Result<()>;
    fn uncheck(&self) -> Result<()>;
    fn enable(&self) -> Result<()>;
    fn disable(&self) -> Result<()>;
    fn set_title(&self, title: &str) -> Result<()>;
    fn set_tooltip(&self, tooltip: &str) -> Result<()>;
    fn on_clicked(&self) -> Result<ClickSource>;

    fn set_checked(&self, checked: bool) -> Result<()> {
        if checked {
            self.check()
        } else {
            self.uncheck()
        }
    }

    fn set_enabled(&self, enabled: bool) -> Result<()> {
        if enabled {
            self.enable()
        } else {
            self.disable()
        }
    }
}
