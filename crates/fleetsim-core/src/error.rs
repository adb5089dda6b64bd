//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every failure here is caller-recoverable and leaves the originating
/// aggregate unchanged. Unmet preconditions that are *not* failures
/// (accelerating while stopped, shifting an automatic) are reported as
/// no-op outcomes by the vehicle context instead.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Start was attempted with an empty tank or battery.
    #[error("cannot start: energy reserve is empty")]
    InsufficientResource,

    /// A cargo load would exceed the truck's effective capacity.
    #[error("cannot load {requested} t: only {available} t of capacity remain")]
    OverCapacity {
        /// The weight the caller tried to load.
        requested: f64,
        /// Capacity remaining before the load.
        available: f64,
    },

    /// A cargo unload asked for more than is currently loaded.
    #[error("cannot unload {requested} t: only {loaded} t are loaded")]
    InsufficientCargo {
        /// The weight the caller tried to unload.
        requested: f64,
        /// Cargo on board before the unload.
        loaded: f64,
    },

    /// The factory was given a variant tag it does not know.
    #[error("unsupported vehicle variant: {0}")]
    UnsupportedVariant(String),

    /// A construction or operation parameter was out of range.
    #[error("invalid {field}: {reason}")]
    InvalidConstructionParameter {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
