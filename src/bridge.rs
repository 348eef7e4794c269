//! Startup ordering for the protocol side of the process.
//!
//! 1. announce `ready` on the output stream
//! 2. read the startup descriptor
//! 3. build the store and every UI item, in declaration order
//! 4. run command intake and click egress concurrently
//!
//! The two pipelines share nothing but the [`MenuStore`](crate::menu::MenuStore).
//! Either may finish first; the end of the input stream stops only command
//! intake.

use crate::menu::{ClickMultiplexer, CommandProcessor};
use crate::protocol::{Event, EventWriter, Menu, RecordReader};
use crate::ui::TrayUi;
use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncWrite, BufReader};

pub async fn run<R, W, U>(input: R, output: W, ui: U) -> Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
    U: TrayUi + 'static,
    U::Item: 'static,
{
    let mut writer = EventWriter::new(output);
    match writer.send(&Event::Ready).await {
        Ok(()) => log::debug!("Ready sentinel sent"),
        Err(e) => log::error!("{}", e),
    }

    let mut reader = RecordReader::new(BufReader::new(input));
    let menu = match reader.read_menu().await {
        Ok(menu) => menu,
        Err(e) => {
            log::error!("Unusable startup descriptor, continuing with an empty menu: {}", e);
            Menu::default()
        }
    };

    let (processor, sources) = CommandProcessor::bootstrap(menu, ui)?;
    if processor.store().is_empty() {
        log::warn!("Menu has no items; no clicks will be reported");
    }
    let multiplexer = ClickMultiplexer::new(processor.store().clone(), sources);

    let commands = tokio::spawn(processor.run(reader));
    let clicks = tokio::spawn(multiplexer.run(writer));

    let (commands, clicks) = tokio::join!(commands, clicks);
    commands.context("Command pipeline aborted")?;
    clicks.context("Click pipeline aborted")?;
    Ok(())
}
