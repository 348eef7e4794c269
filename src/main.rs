use anyhow::{Context, Result};
use systray_bridge::config::BridgeConfig;
use systray_bridge::tray::{TrayManager, UiCall};
use systray_bridge::{bridge, signals};

fn main() -> Result<()> {
    let (config, config_error) = match BridgeConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (BridgeConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(e) = config_error {
        log::warn!("Using default configuration: {:#}", e);
    }
    log::info!("Starting systray-bridge v{}", env!("CARGO_PKG_VERSION"));

    let tray = TrayManager::new(config)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let ui = tray.ui();
    runtime.spawn(async move {
        if let Err(e) = bridge::run(tokio::io::stdin(), tokio::io::stdout(), ui).await {
            log::error!("Bridge stopped: {:#}", e);
        }
    });

    let termination = {
        let _runtime = runtime.enter();
        signals::Termination::listen()
    };
    match termination {
        Ok(termination) => {
            let dispatcher = tray.dispatcher();
            runtime.spawn(async move {
                log::info!("{} received, quitting", termination.wait().await);
                if let Err(e) = dispatcher.send(UiCall::Quit) {
                    log::error!("{:#}", e);
                    std::process::exit(0);
                }
            });
        }
        Err(e) => log::error!("Cannot observe termination signals: {:#}", e),
    }

    tray.run()?;

    // The stdin reader may be parked in a blocking read; don't wait for it.
    runtime.shutdown_background();
    log::info!("Tray closed, exiting");
    Ok(())
}
