//! Client layer for the circuitlens activation explorer.
//!
//! One capability contract, two real provider backends behind it, plus an
//! explicit offline backend for running without any provider:
//!
//! - [`chat::ChatApiBackend`]: a managed chat-completion API (JSON over
//!   HTTPS, bearer auth); response text is fetched remotely and the
//!   activation payload is synthesized locally.
//! - [`inspect::InspectionBackend`]: a self-hosted inspection service
//!   that returns the full payload itself.
//! - [`offline::OfflineBackend`]: no network at all; canned response,
//!   local synthesis. Selected explicitly, never used as a failure
//!   fallback.
//!
//! The [`Inspector`] facade owns the active backend reference and is what
//! a UI shell talks to.

pub mod backend;
pub mod chat;
pub mod error;
pub mod facade;
pub mod inspect;
pub mod offline;

pub use backend::{Backend, BackendConfig};
pub use error::ClientError;
pub use facade::Inspector;
