//! Domain layer - pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod health;
pub mod probe;
pub mod profile;
pub mod remote_url;
pub mod routing;

pub use config::{GitprofConfig, PassphrasePolicy, ServiceConfig};
pub use error::{ConfigError, ProfileError};
pub use gitprof_common::{GlobalIdentity, Profile, Registry};
pub use probe::ProbeOutcome;
pub use profile::{SshLayout, validate_email, validate_profile_name};
pub use routing::HostRoute;
