//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::web`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod credentials;
pub mod error;
pub mod prompt;
pub mod validate;
pub mod workflow;
pub mod workspace;

pub use config::{AppConfig, RunPolicy, WorkflowSettings, WorkspacePolicy};
pub use error::{
    AuthError, ConfigError, GenerationError, InputError, RegistryError, RemoteError,
    ValidationError, WorkflowError, WorkspaceError,
};
pub use prompt::{GeneratedConfig, Prompt};
pub use validate::{ValidatedConfig, ValidationReason, ValidationResult, validate_config};
pub use workflow::{ApplyOutcome, ConfigurationVersion, PlanOutcome, RemoteStep, WorkflowStage};
pub use workspace::{Actor, RemoteWorkspace};
