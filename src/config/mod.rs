//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! HarnessConfig (fluent builder, per test fixture)
//!     → loader.rs resolves the named properties resource from the
//!       fixed lookup root (env override or crate resources/)
//!     → loader.rs parses TOML into ServerProperties
//!     → immutable once a start attempt begins
//! ```
//!
//! # Design Decisions
//! - Resource absence is a startup error, never default-substitution
//! - HarnessConfig is rebuilt fluently between starts, never mutated
//!   while an instance is running

pub mod loader;
pub mod schema;

pub use loader::{load_properties, resolve_resource};
pub use schema::{HarnessConfig, ServerProperties, StoreSettings};
