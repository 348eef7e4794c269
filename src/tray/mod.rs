//! Production UI capability backed by `tray-icon`.
//!
//! Toolkit objects must stay on the UI thread, so the bridge never holds them.
//! [`ChannelUi`] and [`ChannelItem`] turn every capability call into a
//! [`UiCall`] and hand it to a [`Dispatcher`]; the platform loop feeds those
//! calls, in order, to a [`surface::TraySurface`] that owns the real icon and
//! menu.

pub mod icon;
pub mod platform;
pub mod router;
pub mod surface;

use crate::config::BridgeConfig;
use crate::ui::{ClickSource, ItemUi, TrayUi};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum UiCall {
    SetIcon(Option<Vec<u8>>),
    SetTitle(String),
    SetTooltip(String),
    AddItem {
        seq_id: usize,
        title: String,
        tooltip: String,
    },
    Item {
        seq_id: usize,
        op: ItemOp,
    },
    Subscribe {
        seq_id: usize,
        clicks: mpsc::UnboundedSender<()>,
    },
    /// Re-applies the last requested check state after the toolkit toggled
    /// it on its own in response to a click.
    RestoreCheck {
        seq_id: usize,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOp {
    Check,
    Uncheck,
    Enable,
    Disable,
    SetTitle(String),
    SetTooltip(String),
}

/// Thread-safe handle that delivers [`UiCall`]s to the UI thread.
#[derive(Clone)]
pub struct Dispatcher {
    send: Arc<dyn Fn(UiCall) -> Result<()> + Send + Sync>,
}

impl Dispatcher {
    pub fn new(send: impl Fn(UiCall) -> Result<()> + Send + Sync + 'static) -> Self {
        Self {
            send: Arc::new(send),
        }
    }

    pub fn send(&self, call: UiCall) -> Result<()> {
        (self.send)(call)
    }
}

pub struct ChannelUi {
    dispatcher: Dispatcher,
    next_seq_id: usize,
}

impl ChannelUi {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            next_seq_id: 0,
        }
    }
}

impl TrayUi for ChannelUi {
    type Item = ChannelItem;

    fn set_icon(&mut self, icon: Option<&[u8]>) -> Result<()> {
        self.dispatcher.send(UiCall::SetIcon(icon.map(<[u8]>::to_vec)))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.dispatcher.send(UiCall::SetTitle(title.to_string()))
    }

    fn set_tooltip(&mut self, tooltip: &str) -> Result<()> {
        self.dispatcher.send(UiCall::SetTooltip(tooltip.to_string()))
    }

    fn add_item(&mut self, title: &str, tooltip: &str) -> Result<ChannelItem> {
        let seq_id = self.next_seq_id;
        self.dispatcher.send(UiCall::AddItem {
            seq_id,
            title: title.to_string(),
            tooltip: tooltip.to_string(),
        })?;
        self.next_seq_id += 1;
        Ok(ChannelItem {
            seq_id,
            dispatcher: self.dispatcher.clone(),
        })
    }
}

pub struct ChannelItem {
    seq_id: usize,
    dispatcher: Dispatcher,
}

impl ChannelItem {
    fn send(&self, op: ItemOp) -> Result<()> {
        self.dispatcher.send(UiCall::Item {
            seq_id: self.seq_id,
            op,
        })
    }
}

impl ItemUi for ChannelItem {
    fn check(&self) -> Result<()> {
        self.send(ItemOp::Check)
    }

    fn uncheck(&self) -> Result<()> {
        self.send(ItemOp::Uncheck)
    }

    fn enable(&self) -> Result<()> {
        self.send(ItemOp::Enable)
    }

    fn disable(&self) -> Result<()> {
        self.send(ItemOp::Disable)
    }

    fn set_title(&self, title: &str) -> Result<()> {
        self.send(ItemOp::SetTitle(title.to_string()))
    }

    fn set_tooltip(&self, tooltip: &str) -> Result<()> {
        self.send(ItemOp::SetTooltip(tooltip.to_string()))
    }

    fn on_clicked(&self) -> Result<ClickSource> {
        let (clicks, source) = mpsc::unbounded_channel();
        self.dispatcher.send(UiCall::Subscribe {
            seq_id: self.seq_id,
            clicks,
        })?;
        Ok(source)
    }
}

/// Owns the platform event loop until [`TrayManager::run`] hands the current
/// thread over to it.
pub struct TrayManager {
    dispatcher: Dispatcher,
    event_loop: platform::PlatformLoop,
}

impl TrayManager {
    pub fn new(config: BridgeConfig) -> Result<Self> {
        let (dispatcher, event_loop) = platform::create(config)?;
        Ok(Self {
            dispatcher,
            event_loop,
        })
    }

    pub fn ui(&self) -> ChannelUi {
        ChannelUi::new(self.dispatcher.clone())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Blocks until a [`UiCall::Quit`] arrives.
    pub fn run(self) -> Result<()> {
        platform::run(self.event_loop)
    }
}
