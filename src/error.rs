//! Error definitions for the harness.
//!
//! # Propagation Policy
//! - Startup-path errors surface synchronously from `start()`
//! - Stop-path errors are logged and swallowed (teardown must never
//!   fail otherwise-passing tests)
//! - Reset-path errors propagate (a silently-failed reset would corrupt
//!   every following test)

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the harness lifecycle operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// `start()` was called while an instance is already running.
    #[error("server already running; call stop() before starting again")]
    AlreadyRunning,

    /// The named properties resource could not be resolved from the
    /// lookup root. This is a startup error, never default-substitution.
    #[error("could not resolve properties resource '{resource}'")]
    ConfigurationMissing { resource: String },

    /// The properties resource was found but could not be read or parsed.
    #[error("invalid properties resource '{resource}'")]
    ConfigurationInvalid {
        resource: String,
        #[source]
        source: ResourceError,
    },

    /// The listener reported a failure during startup.
    #[error("server startup failed")]
    StartupFailed(#[source] StartupError),

    /// The listener did not report readiness within the configured bound.
    #[error("server did not report readiness within {waited:?}")]
    StartupTimedOut { waited: Duration },

    /// An operation that requires a running instance was called while
    /// stopped.
    #[error("no server instance is running")]
    NotRunning,

    /// The data-reset collaborator failed.
    #[error("data reset failed")]
    ResetFailed(#[source] ResetError),
}

/// Failure causes reported by the listener or bootstrapper during a
/// start attempt. Carried through the readiness gate to the caller.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Failed to bind the listening socket.
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// A pre-start health check rule rejected the configuration.
    #[error("startup health check '{rule}' failed: {reason}")]
    HealthCheck { rule: &'static str, reason: String },

    /// The serve task exited before signalling readiness.
    #[error("server task exited before signalling readiness")]
    Aborted,
}

/// Errors raised while stopping the listener. Logged and swallowed by
/// the harness: teardown failures must not fail otherwise-passing tests.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// The serve task panicked or was cancelled during shutdown.
    #[error("serve task failed during shutdown: {0}")]
    Join(String),

    /// The serve task did not stop within the bound and was aborted.
    #[error("serve task did not stop within {waited:?}; aborted")]
    StopTimedOut { waited: Duration },
}

/// Error type for properties resource loading.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Error type for data-reset operations.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ResetError(pub String);
