//! Abstract component interfaces consumed by the Outrigger dispatch core.
//!
//! Each module defines the seam for one capability kind: the typed requests a
//! component receives (already validated and namespaced by the core) and the
//! trait a backend adapter implements. `memory` holds an in-memory reference
//! implementation of every kind, used by tests and demos.

pub mod config;
pub mod file;
pub mod lock;
pub mod memory;
pub mod pubsub;
pub mod sequencer;
pub mod state;

/// Semantic failure of a component operation. The dispatch core maps these
/// onto its wire error taxonomy; anything a component cannot express with a
/// dedicated variant travels as `Internal`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{0}' was not found")]
    NotFound(String),
    #[error("etag mismatch for key '{0}'")]
    ETagMismatch(String),
    #[error("invalid etag '{etag}' for key '{key}'")]
    ETagInvalid { key: String, etag: String },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Capabilities a component self-reports at construction time. The core
/// consults these instead of downcasting to stronger interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// The pub/sub component expires messages itself; the core should hand
    /// `ttlInSeconds` metadata through untouched.
    MessageTtl,
    /// The state component enforces etags on writes.
    Etag,
}
