use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Default env_logger filter. `RUST_LOG` still wins.
    pub log_level: String,
    /// How often the GTK loop drains queued UI calls.
    pub ui_poll_interval_ms: u64,
    /// Appended to the displayed title of checked items, for desktops that
    /// draw no check marks.
    pub checked_suffix: Option<String>,
    /// Tooltip shown before the startup descriptor arrives.
    pub tooltip: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ui_poll_interval_ms: 50,
            checked_suffix: None,
            tooltip: String::new(),
        }
    }
}

impl BridgeConfig {
    pub fn load() -> Result<Self> {
        let path = crate::paths::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: BridgeConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn ui_poll_interval(&self) -> Duration {
        Duration::from_millis(self.ui_poll_interval_ms.max(1))
    }

    /// The title an item is displayed with, given its checked state.
    pub fn display_title(&self, title: &str, checked: bool) -> String {
        match &self.checked_suffix {
            Some(suffix) if checked => format!("{}{}", title, suffix),
            _ => title.to_string(),
        }
    }
}
