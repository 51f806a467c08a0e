#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unused, dead_code)]
#![allow(clippy::module_name_repetitions)]
//! Telemetry primitives shared by the Strata console binaries.
//!
//! Layout:
//! - `init.rs`: subscriber installation, log format selection, build SHA
//! - `context.rs`: per-invocation span carrying the request identifier
//! - `error.rs`: error type for telemetry setup

pub mod context;
pub mod error;
pub mod init;

pub use context::invocation_span;
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
