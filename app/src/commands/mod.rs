//! Command implementations

pub mod serve;
pub mod validate;
