//! Shutdown signals

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// Time in-flight purchase checks get to finish once a signal arrives.
pub(crate) const GRACE_PERIOD: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to listen for interrupt: {0}")]
    Interrupt(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to listen for SIGTERM: {0}")]
    Terminate(#[source] io::Error),
}

/// Stop `handle` gracefully on the first interrupt or terminate signal.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let signal_name = wait_for_signal().await?;

    info!(signal = signal_name, grace_period = ?GRACE_PERIOD, "shutting down");

    handle.stop_graceful(Some(GRACE_PERIOD));

    Ok(())
}

#[cfg(unix)]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::Terminate)?;

    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::Interrupt)?;

            Ok("interrupt")
        }
        _ = terminate.recv() => Ok("terminate"),
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignalError::Interrupt)?;

    Ok("interrupt")
}
