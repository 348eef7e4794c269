use anyhow::Result;

/// Termination signals, registered up front so one that arrives before
/// anything waits on it is still observed instead of killing the process.
///
/// Must be created inside a Tokio runtime context.
#[cfg(unix)]
pub struct Termination {
    terminate: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Termination {
    pub fn listen() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    /// Resolves with the name of the first termination signal received.
    pub async fn wait(mut self) -> &'static str {
        tokio::select! {
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.interrupt.recv() => "SIGINT",
        }
    }
}

#[cfg(windows)]
pub struct Termination {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Termination {
    pub fn listen() -> Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    pub async fn wait(mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "Ctrl-C"
    }
}
