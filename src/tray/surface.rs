use super::router::{ClickRouter, RouteResult};
use super::{icon, Dispatcher, ItemOp, UiCall};
use crate::config::BridgeConfig;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex, PoisonError};
use tray_icon::menu::{CheckMenuItem, Menu, MenuEvent};
use tray_icon::{TrayIcon, TrayIconBuilder};

struct SurfaceItem {
    widget: CheckMenuItem,
    title: String,
    checked: bool,
}

/// The live tray icon and its menu. Lives on the UI thread and applies
/// [`UiCall`]s in the order they were dispatched.
pub struct TraySurface {
    tray: TrayIcon,
    menu: Menu,
    items: Vec<SurfaceItem>,
    router: Arc<Mutex<ClickRouter>>,
    config: BridgeConfig,
}

impl TraySurface {
    pub fn new(config: BridgeConfig, dispatcher: Dispatcher) -> Result<Self> {
        let menu = Menu::new();
        let mut builder = TrayIconBuilder::new().with_menu(Box::new(menu.clone()));
        if !config.tooltip.is_empty() {
            builder = builder.with_tooltip(&config.tooltip);
        }
        let tray = builder.build().context("Failed to create tray icon")?;

        let router = Arc::new(Mutex::new(ClickRouter::new()));
        install_click_handler(router.clone(), dispatcher);

        Ok(Self {
            tray,
            menu,
            items: Vec::new(),
            router,
            config,
        })
    }

    /// Returns `false` once the event loop should stop.
    pub fn apply(&mut self, call: UiCall) -> bool {
        match call {
            UiCall::SetIcon(bytes) => self.set_icon(bytes.as_deref()),
            UiCall::SetTitle(title) => self.tray.set_title(Some(title)),
            UiCall::SetTooltip(tooltip) => {
                if let Err(e) = self.tray.set_tooltip(Some(tooltip)) {
                    log::warn!("Failed to set tooltip: {}", e);
                }
            }
            UiCall::AddItem { seq_id, title, .. } => self.add_item(seq_id, title),
            UiCall::Item { seq_id, op } => self.apply_item(seq_id, op),
            UiCall::Subscribe { seq_id, clicks } => {
                self.router
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .subscribe(seq_id, clicks);
            }
            UiCall::RestoreCheck { seq_id } => {
                if let Some(item) = self.items.get(seq_id) {
                    item.widget.set_checked(item.checked);
                }
            }
            UiCall::Quit => return false,
        }
        true
    }

    fn set_icon(&self, bytes: Option<&[u8]>) {
        let icon = match bytes.map(icon::decode).transpose() {
            Ok(icon) => icon,
            Err(e) => {
                log::error!("Keeping previous icon: {:#}", e);
                return;
            }
        };
        if let Err(e) = self.tray.set_icon(icon) {
            log::warn!("Failed to set icon: {}", e);
        }
    }

    fn add_item(&mut self, seq_id: usize, title: String) {
        if seq_id != self.items.len() {
            log::warn!(
                "Item {} added at position {}; clicks may be misattributed",
                seq_id,
                self.items.len()
            );
        }

        let widget =
            CheckMenuItem::with_id(ClickRouter::menu_id(seq_id), &title, true, false, None);
        if let Err(e) = self.menu.append(&widget) {
            log::error!("Failed to append menu item {}: {}", seq_id, e);
        }
        self.items.push(SurfaceItem {
            widget,
            title,
            checked: false,
        });
    }

    fn apply_item(&mut self, seq_id: usize, op: ItemOp) {
        let Some(item) = self.items.get_mut(seq_id) else {
            log::warn!("UI call for unknown item {}", seq_id);
            return;
        };

        match op {
            ItemOp::Check | ItemOp::Uncheck => {
                item.checked = op == ItemOp::Check;
                item.widget.set_checked(item.checked);
                if self.config.checked_suffix.is_some() {
                    item.widget
                        .set_text(self.config.display_title(&item.title, item.checked));
                }
            }
            ItemOp::Enable => item.widget.set_enabled(true),
            ItemOp::Disable => item.widget.set_enabled(false),
            ItemOp::SetTitle(title) => {
                item.widget
                    .set_text(self.config.display_title(&title, item.checked));
                item.title = title;
            }
            ItemOp::SetTooltip(_) => {
                log::trace!("Menu items carry no tooltip; ignoring tooltip for item {}", seq_id);
            }
        }
    }
}

fn install_click_handler(router: Arc<Mutex<ClickRouter>>, dispatcher: Dispatcher) {
    MenuEvent::set_event_handler(Some(move |event: MenuEvent| {
        let result = router
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .route(&event.id.0);

        let seq_id = match result {
            RouteResult::Delivered(seq_id) => {
                log::debug!("Item {} clicked", seq_id);
                seq_id
            }
            RouteResult::Closed(seq_id) => {
                log::debug!("Item {} clicked with no listener", seq_id);
                seq_id
            }
            RouteResult::Unrouted => return,
        };

        // Check state belongs to the parent; undo the toolkit's own toggle.
        if let Err(e) = dispatcher.send(UiCall::RestoreCheck { seq_id }) {
            log::warn!("Failed to restore check state of item {}: {:#}", seq_id, e);
        }
    }));
}
