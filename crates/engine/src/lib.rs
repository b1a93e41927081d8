//! Toggle catalog and assignment policy engine.
//!
//! The engine decides, for each assignment proposal, whether it may be
//! created, must flip an existing record, must be silently absorbed, or
//! must be rejected — given the full set of known assignments and the
//! per-kind exclusivity semantics. The decision rules themselves are pure
//! functions in [`policy`]; [`AssignmentEngine`] wires them to the stores
//! and serializes admission per toggle name.

pub mod catalog;
pub mod engine;
pub mod policy;

pub use catalog::ToggleCatalog;
pub use engine::{Admission, AssignmentEngine};
pub use policy::Decision;
