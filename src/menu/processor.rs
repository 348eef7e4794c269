use super::store::MenuStore;
use crate::error::{BridgeError, Result};
use crate::protocol::{Action, Item, Menu, RecordReader};
use crate::ui::{ClickSource, ItemUi, TrayUi};
use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::io::AsyncBufRead;

/// Applies update commands to the store and mirrors them onto the UI.
///
/// `items[n]` is the UI shadow of store slot `n`. Both are created together in
/// [`CommandProcessor::bootstrap`] and never grow or shrink afterwards.
pub struct CommandProcessor<U: TrayUi> {
    store: MenuStore,
    ui: U,
    items: Vec<U::Item>,
}

impl<U: TrayUi> CommandProcessor<U> {
    /// Builds the store from the startup descriptor and creates one UI item
    /// per entry, in declaration order. Returns the click sources in the same
    /// order, so `sources[n]` belongs to sequence ID `n`.
    pub fn bootstrap(menu: Menu, mut ui: U) -> anyhow::Result<(Self, Vec<ClickSource>)> {
        if !menu.icon.is_empty() {
            match decode_icon(&menu.icon) {
                Ok(bytes) => report("set icon", ui.set_icon(Some(&bytes))),
                Err(e) => log::error!("Startup icon ignored: {}", e),
            }
        }
        report("set title", ui.set_title(&menu.title));
        report("set tooltip", ui.set_tooltip(&menu.tooltip));

        let mut items = Vec::with_capacity(menu.items.len());
        let mut sources = Vec::with_capacity(menu.items.len());
        for (seq_id, item) in menu.items.iter().enumerate() {
            let handle = ui
                .add_item(&item.title, &item.tooltip)
                .with_context(|| format!("Failed to add menu item {}", seq_id))?;
            report("check item", handle.set_checked(item.checked));
            report("enable item", handle.set_enabled(item.enabled));
            sources.push(
                handle
                    .on_clicked()
                    .with_context(|| format!("Failed to observe clicks on item {}", seq_id))?,
            );
            items.push(handle);
        }

        log::info!("Menu initialised with {} items", items.len());

        let processor = Self {
            store: MenuStore::initialize(menu),
            ui,
            items,
        };
        Ok((processor, sources))
    }

    pub fn store(&self) -> &MenuStore {
        &self.store
    }

    /// Item changes land before menu changes. A bad sequence ID drops the
    /// whole command.
    pub fn apply(&mut self, action: &Action) -> Result<()> {
        let kind = action.kind;
        if !kind.touches_item() && !kind.touches_menu() {
            log::debug!("Ignoring inbound {:?} record", kind);
            return Ok(());
        }

        if kind.touches_item() {
            self.update_item(action.seq_id, &action.item)?;
        }
        if kind.touches_menu() {
            self.update_menu(&action.menu)?;
        }
        Ok(())
    }

    fn update_item(&mut self, seq_id: i64, item: &Item) -> Result<()> {
        self.store.replace_item(seq_id, item.clone())?;

        // replace_item already rejected anything outside 0..len
        let handle = &self.items[seq_id as usize];
        report("check item", handle.set_checked(item.checked));
        report("enable item", handle.set_enabled(item.enabled));
        report("set item title", handle.set_title(&item.title));
        report("set item tooltip", handle.set_tooltip(&item.tooltip));
        Ok(())
    }

    fn update_menu(&mut self, menu: &Menu) -> Result<()> {
        let changes = self.store.update_menu_fields(menu);
        let mut icon_result = Ok(());

        if let Some(title) = &changes.title {
            report("set title", self.ui.set_title(title));
        }
        if let Some(icon) = &changes.icon {
            if icon.is_empty() {
                report("clear icon", self.ui.set_icon(None));
            } else {
                match decode_icon(icon) {
                    Ok(bytes) => report("set icon", self.ui.set_icon(Some(&bytes))),
                    Err(e) => icon_result = Err(e),
                }
            }
        }
        if let Some(tooltip) = &changes.tooltip {
            report("set tooltip", self.ui.set_tooltip(tooltip));
        }

        icon_result
    }

    /// Applies commands in arrival order until the input stream ends. Bad
    /// records are logged and skipped.
    pub async fn run<R: AsyncBufRead + Unpin>(mut self, mut reader: RecordReader<R>) {
        loop {
            let action = match reader.read_action().await {
                Ok(action) => action,
                Err(BridgeError::StreamClosed) => {
                    log::info!("Input stream closed; no further updates will be applied");
                    return;
                }
                Err(BridgeError::Read(e)) if e.kind() != std::io::ErrorKind::InvalidData => {
                    log::error!("Stopping command intake: {}", e);
                    return;
                }
                Err(e) => {
                    log::error!("{}", e);
                    continue;
                }
            };

            match self.apply(&action) {
                Ok(()) => {}
                Err(e @ BridgeError::Icon(_)) => {
                    log::error!("Kept previous icon, other menu fields applied: {}", e);
                }
                Err(e) => log::error!("Dropped {:?} command: {}", action.kind, e),
            }
        }
    }
}

fn decode_icon(icon: &str) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(icon.trim())?)
}

fn report(what: &str, result: anyhow::Result<()>) {
    if let Err(e) = result {
        log::warn!("Failed to {}: {:#}", what, e);
    }
}
