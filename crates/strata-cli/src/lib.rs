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
#![allow(clippy::redundant_pub_crate)]

//! Operator CLI for a Strata storage cluster's session endpoints.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `commands/`: command handlers grouped by concern
//! - `client.rs`: shared HTTP client, errors, and the reqwest auth transport
//! - `navigator.rs`: terminal stand-in for browser navigation
//! - `state.rs`: on-disk session state (username and session cookie)
//! - `output.rs`: renderers and formatting helpers
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod navigator;
pub(crate) mod output;
pub(crate) mod state;

pub use cli::run;
