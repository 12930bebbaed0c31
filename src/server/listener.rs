//! Web listener with lifecycle observation.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::{ShutdownError, StartupError};

/// Lifecycle events emitted by the serve task.
#[derive(Debug)]
pub enum LifecycleEvent {
    /// The serve task is about to bind.
    Starting,
    /// The socket is bound and accepting connections.
    Started,
    /// Startup failed; carries the cause.
    Failure(StartupError),
    /// The shutdown trigger fired.
    Stopping,
    /// The serve loop exited.
    Stopped,
}

/// Observer attached to a listener; receives each event exactly once.
pub type LifecycleObserver = Arc<dyn Fn(LifecycleEvent) + Send + Sync>;

/// An unstarted listener: bind address, router, optional observer.
pub struct WebListener {
    bind_addr: String,
    router: Router,
    observer: Option<LifecycleObserver>,
}

impl WebListener {
    /// Configure a listener for the given host and port.
    pub fn new(hostname: &str, port: u16, router: Router) -> Self {
        Self {
            bind_addr: format!("{hostname}:{port}"),
            router,
            observer: None,
        }
    }

    /// Attach a lifecycle observer.
    pub fn with_observer(mut self, observer: LifecycleObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Spawn the serve task and return its handle.
    ///
    /// Binding happens inside the task; readiness or failure is
    /// reported through the attached observer, not the return value.
    pub fn start(self) -> ListenerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(serve(self.bind_addr, self.router, self.observer, shutdown_rx));
        ListenerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

async fn serve(
    bind_addr: String,
    router: Router,
    observer: Option<LifecycleObserver>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    let emit = |event: LifecycleEvent| {
        if let Some(obs) = &observer {
            obs(event);
        }
    };

    emit(LifecycleEvent::Starting);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(source) => {
            let cause = StartupError::Bind {
                addr: bind_addr.clone(),
                source,
            };
            let reported = cause.to_string();
            // Signal the gate first, then keep the listener's own error
            // reporting via the log.
            emit(LifecycleEvent::Failure(cause));
            tracing::error!(address = %bind_addr, error = %reported, "listener failed to start");
            return;
        }
    };

    emit(LifecycleEvent::Started);
    tracing::info!(address = %bind_addr, "embedded server listening");

    let stopping = observer.clone();
    let shutdown = async move {
        let _ = shutdown_rx.changed().await;
        if let Some(obs) = &stopping {
            obs(LifecycleEvent::Stopping);
        }
    };

    if let Err(error) = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
    {
        tracing::error!(address = %bind_addr, error = %error, "serve loop error");
    }

    emit(LifecycleEvent::Stopped);
    tracing::info!(address = %bind_addr, "embedded server stopped");
}

/// Handle to a running serve task.
pub struct ListenerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ListenerHandle {
    /// Trigger shutdown and join the serve task, bounded by `timeout`.
    pub async fn stop(mut self, timeout: Duration) -> Result<(), ShutdownError> {
        let _ = self.shutdown.send(true);
        match tokio::time::timeout(timeout, &mut self.task).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(join)) => Err(ShutdownError::Join(join.to_string())),
            Err(_elapsed) => {
                self.task.abort();
                Err(ShutdownError::StopTimedOut { waited: timeout })
            }
        }
    }

    /// Abort the serve task without waiting. Used on the failed-start
    /// path, where there is nothing graceful left to do.
    pub fn abort(self) {
        self.task.abort();
    }
}
