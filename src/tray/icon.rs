use anyhow::{Context, Result};
use tray_icon::Icon;

/// Builds a tray icon from the bytes of a PNG or ICO file.
pub fn decode(bytes: &[u8]) -> Result<Icon> {
    let image = image::load_from_memory(bytes)
        .context("Unsupported icon image")?
        .into_rgba8();
    let (width, height) = image.dimensions();
    Icon::from_rgba(image.into_raw(), width, height).context("Invalid icon dimensions")
}
