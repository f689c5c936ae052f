#[cfg(unix)]
use tokio::signal::unix::SignalKind;

/// Signals that end a tracking session.
///
/// SIGCHLD, SIGWINCH, SIGPIPE and SIGURG are raised during normal operation
/// and are not listened for.
#[cfg(unix)]
pub const TERMINATION_SIGNALS: [(SignalKind, &str); 7] = [
    (SignalKind::hangup(), "SIGHUP"),
    (SignalKind::interrupt(), "SIGINT"),
    (SignalKind::quit(), "SIGQUIT"),
    (SignalKind::terminate(), "SIGTERM"),
    (SignalKind::user_defined1(), "SIGUSR1"),
    (SignalKind::user_defined2(), "SIGUSR2"),
    (SignalKind::alarm(), "SIGALRM"),
];

/// Resolves on the first termination-class signal and returns its name.
///
/// Every signal a user or supervisor would send to stop the process counts,
/// not only Ctrl-C. Signals whose handler cannot be installed are skipped;
/// if none can be installed this falls back to Ctrl-C.
#[cfg(unix)]
pub async fn termination_signal() -> &'static str {
    use futures::future::{FutureExt, select_all};
    use tokio::signal::unix::signal;
    use tracing::warn;

    let mut listeners = Vec::with_capacity(TERMINATION_SIGNALS.len());
    for (kind, name) in TERMINATION_SIGNALS {
        match signal(kind) {
            Ok(mut stream) => listeners.push(
                async move {
                    stream.recv().await;
                    name
                }
                .boxed(),
            ),
            Err(e) => warn!("cannot listen for {name}: {e}"),
        }
    }

    if listeners.is_empty() {
        return ctrl_c().await;
    }

    let (name, _, _) = select_all(listeners).await;
    name
}

#[cfg(not(unix))]
pub async fn termination_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "Ctrl-C",
        Err(e) => {
            tracing::error!("cannot listen for Ctrl-C: {e}");
            std::future::pending().await
        }
    }
}
