pub mod codec;

pub use codec::{decode_action, decode_menu, encode_event, EventWriter, RecordReader};

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes JSON `null` as the field's zero value, the same way a missing
/// field is treated.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One entry in the tray's dropdown menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tooltip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub checked: bool,
}

/// The whole tray object. `icon` is base64 text of an image file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Menu {
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tooltip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    UpdateItem,
    UpdateMenu,
    #[serde(alias = "update-menu-and-item")]
    UpdateItemAndMenu,
    Clicked,
    Ready,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ActionType {
    pub fn touches_item(self) -> bool {
        matches!(self, ActionType::UpdateItem | ActionType::UpdateItemAndMenu)
    }

    pub fn touches_menu(self) -> bool {
        matches!(self, ActionType::UpdateMenu | ActionType::UpdateItemAndMenu)
    }
}

/// An inbound protocol record. Fields that do not apply to `kind` are left
/// at their zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Action {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: ActionType,
    #[serde(deserialize_with = "null_as_default")]
    pub item: Item,
    #[serde(deserialize_with = "null_as_default")]
    pub menu: Menu,
    #[serde(deserialize_with = "null_as_default")]
    pub seq_id: i64,
}

/// Records written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Event {
    Ready,
    Clicked { item: Item, seq_id: usize },
}
