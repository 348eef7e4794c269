pub mod bridge;
pub mod config;
pub mod error;
pub mod menu;
pub mod paths;
pub mod protocol;
pub mod signals;
pub mod tray;
pub mod ui;
