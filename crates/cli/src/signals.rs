//! Process signals
//!
//! SIGTERM and SIGINT request a stop, SIGHUP requests a reload. The
//! simulation picks both up at its next tick.

use ddgen_call_engine::ControlFlags;
use tracing::info;

#[cfg(unix)]
pub async fn listen(control: ControlFlags) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut hangup = signal(SignalKind::hangup())?;

    loop {
        tokio::select! {
            _ = terminate.recv() => {
                info!("terminating by signal: SIGTERM");
                control.request_stop();
            }
            _ = interrupt.recv() => {
                info!("terminating by signal: SIGINT");
                control.request_stop();
            }
            _ = hangup.recv() => {
                info!("reload requested by signal: SIGHUP");
                control.request_reload();
            }
        }
    }
}

#[cfg(not(unix))]
pub async fn listen(control: ControlFlags) -> std::io::Result<()> {
    loop {
        tokio::signal::ctrl_c().await?;
        info!("terminating by signal: ctrl-c");
        control.request_stop();
    }
}
