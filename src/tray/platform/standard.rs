use crate::config::BridgeConfig;
use crate::tray::surface::TraySurface;
use crate::tray::{Dispatcher, UiCall};
use anyhow::{anyhow, Result};
use std::sync::{Mutex, PoisonError};
use tao::event::{Event, StartCause};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder};

pub struct PlatformLoop {
    event_loop: EventLoop<UiCall>,
    dispatcher: Dispatcher,
    config: BridgeConfig,
}

pub fn create(config: BridgeConfig) -> Result<(Dispatcher, PlatformLoop)> {
    let event_loop = EventLoopBuilder::<UiCall>::with_user_event().build();
    let proxy = Mutex::new(event_loop.create_proxy());
    let dispatcher = Dispatcher::new(move |call| {
        proxy
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .send_event(call)
            .map_err(|_| anyhow!("Tray event loop has stopped"))
    });

    let event_loop = PlatformLoop {
        event_loop,
        dispatcher: dispatcher.clone(),
        config,
    };
    Ok((dispatcher, event_loop))
}

/// Runs the native event loop on the calling thread, which must be the main
/// thread. Never returns; the process exits when the loop does.
pub fn run(event_loop: PlatformLoop) -> Result<()> {
    let PlatformLoop {
        event_loop,
        dispatcher,
        config,
    } = event_loop;
    let mut surface: Option<TraySurface> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            // The tray must be created once the native loop is running.
            Event::NewEvents(StartCause::Init) => {
                match TraySurface::new(config.clone(), dispatcher.clone()) {
                    Ok(created) => surface = Some(created),
                    Err(e) => {
                        log::error!("{:#}", e);
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }
            Event::UserEvent(call) => {
                let Some(surface) = surface.as_mut() else {
                    log::warn!("Dropping {:?} received before the tray was created", call);
                    return;
                };
                if !surface.apply(call) {
                    log::info!("Quitting tray event loop");
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    })
}
