//! Workspace registry backends.
//!
//! [`MemoryRegistry`] serves single-process deployments and tests;
//! [`ValkeyRegistry`] is selected when a Valkey URL is configured.

pub mod memory;
pub mod valkey;

pub use memory::MemoryRegistry;
pub use valkey::ValkeyRegistry;
