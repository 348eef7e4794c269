#[cfg(target_os = "linux")]
mod linux;

#[cfg(not(target_os = "linux"))]
mod standard;

#[cfg(target_os = "linux")]
pub use linux::{create, run, PlatformLoop};

#[cfg(not(target_os = "linux"))]
pub use standard::{create, run, PlatformLoop};
