use std::sync::{Arc, Mutex};
use systray_bridge::ui::{ClickSource, ItemUi, TrayUi};
use tokio::sync::mpsc;

/// Every capability call, in the order it was made.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Click triggers for the items a `RecordingUi` created, by sequence ID.
#[derive(Clone, Default)]
pub struct Clicker {
    senders: Arc<Mutex<Vec<Option<mpsc::UnboundedSender<()>>>>>,
}

impl Clicker {
    pub fn click(&self, seq_id: usize) {
        let senders = self.senders.lock().unwrap();
        senders[seq_id].as_ref().unwrap().send(()).unwrap();
    }

    /// Simulates the toolkit tearing an item down.
    pub fn close(&self, seq_id: usize) {
        self.senders.lock().unwrap()[seq_id] = None;
    }

    pub fn len(&self) -> usize {
        self.senders.lock().unwrap().len()
    }
}

pub struct RecordingUi {
    log: CallLog,
    clicker: Clicker,
    next_seq_id: usize,
}

impl RecordingUi {
    pub fn new() -> (Self, CallLog, Clicker) {
        let log = CallLog::default();
        let clicker = Clicker::default();
        let ui = Self {
            log: log.clone(),
            clicker: clicker.clone(),
            next_seq_id: 0,
        };
        (ui, log, clicker)
    }
}

impl TrayUi for RecordingUi {
    type Item = RecordingItem;

    fn set_icon(&mut self, icon: Option<&[u8]>) -> anyhow::Result<()> {
        match icon {
            Some(bytes) => self.log.push(format!("set_icon({})", String::from_utf8_lossy(bytes))),
            None => self.log.push("set_icon(none)".to_string()),
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> anyhow::Result<()> {
        self.log.push(format!("set_title({})", title));
        Ok(())
    }

    fn set_tooltip(&mut self, tooltip: &str) -> anyhow::Result<()> {
        self.log.push(format!("set_tooltip({})", tooltip));
        Ok(())
    }

    fn add_item(&mut self, title: &str, tooltip: &str) -> anyhow::Result<RecordingItem> {
        let seq_id = self.next_seq_id;
        self.next_seq_id += 1;
        self.log.push(format!("add_item({}, {}, {})", seq_id, title, tooltip));
        Ok(RecordingItem {
            seq_id,
            log: self.log.clone(),
            clicker: self.clicker.clone(),
        })
    }
}

pub struct RecordingItem {
    seq_id: usize,
    log: CallLog,
    clicker: Clicker,
}

impl RecordingItem {
    fn record(&self, call: &str) -> anyhow::Result<()> {
        self.log.push(format!("item{}.{}", self.seq_id, call));
        Ok(())
    }
}

impl ItemUi for RecordingItem {
    fn check(&self) -> anyhow::Result<()> {
        self.record("check")
    }

    fn uncheck(&self) -> anyhow::Result<()> {
        self.record("uncheck")
    }

    fn enable(&self) -> anyhow::Result<()> {
        self.record("enable")
    }

    fn disable(&self) -> anyhow::Result<()> {
        self.record("disable")
    }

    fn set_title(&self, title: &str) -> anyhow::Result<()> {
        self.record(&format!("set_title({})", title))
    }

    fn set_tooltip(&self, tooltip: &str) -> anyhow::Result<()> {
        self.record(&format!("set_tooltip({})", tooltip))
    }

    fn on_clicked(&self) -> anyhow::Result<ClickSource> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut senders = self.clicker.senders.lock().unwrap();
        if senders.len() <= self.seq_id {
            senders.resize(self.seq_id + 1, None);
        }
        senders[self.seq_id] = Some(tx);
        Ok(rx)
    }
}
