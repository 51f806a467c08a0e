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
//! Authentication and session lifecycle for the Strata storage console.
//!
//! Layout:
//! - `model.rs`: identity, permission, credential, and `/auth` wire types
//! - `strength.rs`: deterministic credential strength scoring
//! - `store.rs`: the session store singleton and its persisted username
//! - `modal.rs`: open-dialog registry used to clear overlays before login
//! - `controller.rs`: login, logout, and startup reconciliation
//! - `api.rs` / `navigation.rs` / `storage.rs`: seams implemented by the CLI and browser shells
//!
//! Everything here is DOM-free and single-threaded: shared state uses `Rc` and
//! interior mutability, and the async seams are `?Send`.

pub mod api;
pub mod controller;
pub mod error;
pub mod modal;
pub mod model;
pub mod navigation;
pub mod storage;
pub mod store;
pub mod strength;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{AUTH_LOGOUT_PATH, AUTH_PATH, AuthApi};
pub use controller::{AuthSessionController, BootstrapOutcome};
pub use error::{AuthError, AuthResult, StorageError};
pub use modal::{ModalHandle, ModalId, ModalRegistry};
pub use model::{
    Action, AuthStatus, AuthStatusPayload, Credentials, Identity, LOCAL_LOGIN_MARKER,
    LoginResponse, LogoutResponse, PermissionSet,
};
pub use navigation::{NavigationMode, Navigator, View};
pub use storage::{MemoryStorage, UsernameStorage};
pub use store::{SessionState, SessionStore};
pub use strength::{StrengthDescriptor, StrengthResult, score};
