//! # Switchyard Core
//!
//! Domain types, error taxonomy, and the store trait for the Switchyard
//! feature-toggle service. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Persistence is defined as a trait here ([`Store`]); implementations live
//! in `switchyard-store`. The policy engine in `switchyard-engine` consumes
//! only this crate's types, which enables:
//! - Swapping store backends via configuration
//! - Easy testing with in-memory stores
//! - Clean dependency graph (all crates depend inward on core)

pub mod assignment;
pub mod error;
pub mod store;
pub mod toggle;

// Re-export key types at crate root for ergonomics
pub use assignment::Assignment;
pub use error::{Error, ErrorKind, Result, StoreError};
pub use store::{Entity, Store};
pub use toggle::{Toggle, ToggleKind};
