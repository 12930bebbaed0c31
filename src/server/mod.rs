//! Network listener subsystem.
//!
//! # Data Flow
//! ```text
//! WebListener::start()
//!     → spawn serve task
//!         → emit Starting
//!         → bind TcpListener (failure → emit Failure(cause))
//!         → emit Started
//!         → axum::serve until shutdown trigger (→ emit Stopping)
//!         → emit Stopped
//!     → ListenerHandle { shutdown trigger, join handle }
//! ```
//!
//! # Design Decisions
//! - Lifecycle events are delivered to one attached observer; the
//!   harness wires that observer to a fresh readiness gate per start
//! - The handle's stop join is bounded; a stuck serve task is aborted
//!   rather than hanging the next test's setup

pub mod listener;

pub use listener::{LifecycleEvent, LifecycleObserver, ListenerHandle, WebListener};
