//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: outbound HTTP clients,
//! archive packing, registry backends, sessions, and environment loading.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::web` are forbidden.

pub mod archive;
pub mod automation;
pub mod config;
pub mod generator;
pub mod http;
pub mod registry;
pub mod session;
