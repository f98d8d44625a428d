//! Integration tests for gitprof CLI
//!
//! These tests spawn the actual binary against a throwaway home directory
//! and check end-to-end behavior. They never reach the network.

mod cli_tests;
mod config_command;
