use std::collections::HashMap;
use tokio::sync::mpsc;

const ITEM_ID_PREFIX: &str = "item-";

#[derive(Debug, PartialEq, Eq)]
pub enum RouteResult {
    Delivered(usize),
    /// The item exists but nobody is listening for its clicks anymore.
    Closed(usize),
    Unrouted,
}

/// Maps toolkit menu ids back to the click source of the item they belong to.
#[derive(Default)]
pub struct ClickRouter {
    routes: HashMap<usize, mpsc::UnboundedSender<()>>,
}

impl ClickRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The toolkit menu id given to the item with this sequence ID.
    pub fn menu_id(seq_id: usize) -> String {
        format!("{}{}", ITEM_ID_PREFIX, seq_id)
    }

    /// Inverse of [`ClickRouter::menu_id`]. Ids the bridge never handed out
    /// yield `None`.
    pub fn seq_id(menu_id: &str) -> Option<usize> {
        menu_id.strip_prefix(ITEM_ID_PREFIX)?.parse().ok()
    }

    /// Points an item's clicks at `clicks`, replacing any earlier listener.
    pub fn subscribe(&mut self, seq_id: usize, clicks: mpsc::UnboundedSender<()>) {
        self.routes.insert(seq_id, clicks);
    }

    pub fn route(&self, menu_id: &str) -> RouteResult {
        let Some((seq_id, clicks)) = Self::seq_id(menu_id)
            .and_then(|seq_id| self.routes.get(&seq_id).map(|clicks| (seq_id, clicks)))
        else {
            log::warn!("No route found for menu event: {}", menu_id);
            return RouteResult::Unrouted;
        };

        match clicks.send(()) {
            Ok(()) => RouteResult::Delivered(seq_id),
            Err(_) => RouteResult::Closed(seq_id),
        }
    }
}
