//! Store backends for Switchyard.

pub mod memory;

pub use memory::MemoryStore;
