use crate::config::BridgeConfig;
use crate::tray::surface::TraySurface;
use crate::tray::{Dispatcher, UiCall};
use anyhow::{anyhow, Context, Result};
use gtk::{self, glib};
use std::sync::mpsc::{self, Receiver};

pub struct PlatformLoop {
    calls: Receiver<UiCall>,
    dispatcher: Dispatcher,
    config: BridgeConfig,
}

pub fn create(config: BridgeConfig) -> Result<(Dispatcher, PlatformLoop)> {
    let (tx, calls) = mpsc::channel();
    let dispatcher = Dispatcher::new(move |call| {
        tx.send(call).map_err(|_| anyhow!("Tray UI thread has stopped"))
    });

    let event_loop = PlatformLoop {
        calls,
        dispatcher: dispatcher.clone(),
        config,
    };
    Ok((dispatcher, event_loop))
}

/// Runs GTK on the calling thread until a quit call is drained.
pub fn run(event_loop: PlatformLoop) -> Result<()> {
    gtk::init().context("Failed to initialize GTK")?;

    let PlatformLoop {
        calls,
        dispatcher,
        config,
    } = event_loop;
    let interval = config.ui_poll_interval();
    let mut surface = TraySurface::new(config, dispatcher)?;

    glib::timeout_add_local(interval, move || process_pending_calls(&calls, &mut surface));
    gtk::main();
    Ok(())
}

fn process_pending_calls(
    calls: &Receiver<UiCall>,
    surface: &mut TraySurface,
) -> glib::ControlFlow {
    while let Ok(call) = calls.try_recv() {
        if !surface.apply(call) {
            log::info!("Quitting tray event loop");
            gtk::main_quit();
            return glib::ControlFlow::Break;
        }
    }
    glib::ControlFlow::Continue
}
