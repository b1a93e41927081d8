//! Error types for the Switchyard domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Every failure carries
//! enough context (toggle name, service name, owning service) to render a
//! precise user-facing message; [`Error::kind`] exposes the coarse taxonomy
//! for transport layers to map onto their own status vocabulary.

use thiserror::Error;

/// The coarse failure taxonomy exposed to transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Referenced toggle or assignment is absent.
    NotFound,
    /// Duplicate id, exclusivity violation, or a deletion blocked by
    /// live references.
    Conflict,
    /// Malformed toggle definition or an exclusion flag misused for a
    /// kind that forbids it.
    InvalidArgument,
    /// Invariant violation or store failure — not a user error.
    Internal,
}

/// The top-level error type for all Switchyard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Not found ---
    #[error("Toggle '{0}' doesn't exist")]
    ToggleNotFound(String),

    #[error("Assignment '{0}' doesn't exist")]
    AssignmentNotFound(String),

    // --- Conflicts ---
    #[error("Toggle '{0}' already exists")]
    ToggleExists(String),

    #[error("Toggle '{0}' is being used by services, so it cannot be deleted")]
    ToggleInUse(String),

    #[error("Assignment with id '{0}' already exists")]
    DuplicateAssignmentId(String),

    #[error("Toggle '{toggle}' is already registered with enabled=true for service '{service}'")]
    AlreadyEnabled { toggle: String, service: String },

    #[error("Toggle '{toggle}' is already registered with enabled=false for service '{service}'")]
    AlreadyDisabled { toggle: String, service: String },

    #[error("Toggle '{toggle}' is exclusive to service '{owner}'")]
    ExclusiveTo { toggle: String, owner: String },

    #[error("Toggle '{toggle}' is already registered for service '{service}'")]
    AlreadyRegistered { toggle: String, service: String },

    // --- Invalid arguments ---
    #[error("Toggle name can't be empty or whitespace")]
    EmptyToggleName,

    #[error("Toggle name is immutable: can't rename '{name}' to '{proposed}'")]
    ToggleNameImmutable { name: String, proposed: String },

    #[error("The exclusion flag is not applicable for {kind} toggles and must be false")]
    ExclusionNotApplicable { kind: crate::ToggleKind },

    // --- Store / internal ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The coarse kind of this error, for transport status mapping.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ToggleNotFound(_) | Self::AssignmentNotFound(_) => ErrorKind::NotFound,
            Self::ToggleExists(_)
            | Self::ToggleInUse(_)
            | Self::DuplicateAssignmentId(_)
            | Self::AlreadyEnabled { .. }
            | Self::AlreadyDisabled { .. }
            | Self::ExclusiveTo { .. }
            | Self::AlreadyRegistered { .. } => ErrorKind::Conflict,
            Self::EmptyToggleName
            | Self::ToggleNameImmutable { .. }
            | Self::ExclusionNotApplicable { .. } => ErrorKind::InvalidArgument,
            Self::Store(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by a [`crate::Store`] backend.
///
/// The engine performs no local recovery — a store failure propagates
/// directly as a failure of the triggering call.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("key '{0}' already exists")]
    DuplicateKey(String),

    #[error("key '{0}' not found")]
    MissingKey(String),

    #[error("backend failure: {0}")]
    Backend(String),
}
