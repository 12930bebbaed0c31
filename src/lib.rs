//! Embedded Test Server Harness
//!
//! Boots an in-process, network-reachable HTTP service bound to an
//! ephemeral in-memory entity store, so integration tests can exercise a
//! real request/response stack without external processes or persistent
//! storage.
//!
//! # Architecture Overview
//!
//! ```text
//! ServerHarness::start()
//!     → config (resolve properties resource, fail fast if missing)
//!     → bootstrap (health checks → backend factory → module routers)
//!     → server (bind listener, spawn serve task)
//!     → readiness (gate between serve task and caller, bounded wait)
//!
//! ServerHarness::stop()
//!     → trigger shutdown → join serve task → clear instance handle
//!
//! ServerHarness::reset_data()
//!     → storage::DataCleaner (clear all entities, backend stays usable)
//! ```

// Core subsystems
pub mod bootstrap;
pub mod config;
pub mod harness;
pub mod server;

// Service surface
pub mod modules;
pub mod storage;

// Cross-cutting concerns
pub mod error;
pub mod observability;
pub mod readiness;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use harness::ServerHarness;
pub use storage::InMemoryBackend;
