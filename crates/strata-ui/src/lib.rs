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
//! Strata storage console, browser edition.
//!
//! Layout:
//! - `i18n`: translation bundles with English fallback and RTL metadata
//! - `nav.rs`: sidebar entries and their permission gates
//! - `state.rs`: the yewdux store mirroring the session and boot progress
//! - `app/`, `components/`, `services/`: wasm-only Yew shell, pages, and the
//!   gloo-net transport behind [`strata_auth::AuthApi`]

pub mod i18n;
pub mod nav;
pub mod state;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod services;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
