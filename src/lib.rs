//! Insight-Sphere session gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard talks to an external analytics backend (trends, opinions,
//! skill paths) over JSON/HTTP. `SessionGateway` is the only code path that
//! mints, persists, attaches, or revokes the bearer token for that backend.
//! Views consume it through the [`SessionApi`] trait and gate protected
//! content with the helpers in [`guard`].
//!
//! ERROR HANDLING
//! ==============
//! Every gateway operation resolves to an [`Outcome`]. Transport failures,
//! malformed bodies, and backend rejections are folded into
//! `Outcome::Failure` at the operation boundary; nothing escapes as a panic
//! or an `Err`.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod oauth;
pub mod outcome;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::SessionApi;
pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use gateway::{AuthState, SessionGateway};
pub use outcome::Outcome;
pub use storage::{AUTH_TOKEN_KEY, DurableStorage, FileStorage, MemoryStorage, REMEMBER_ME_KEY, StorageError};
