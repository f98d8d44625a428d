//! Infrastructure layer - concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, filesystem
//! access, the registry document, the SSH config and `known_hosts` files, the
//! git CLI, and the YAML configuration file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod fs;
pub mod git;
pub mod known_hosts;
pub mod paths;
pub mod registry_store;
pub mod ssh_config;
