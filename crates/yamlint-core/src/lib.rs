//! Core functionality for the yamlint YAML linter
//!
//! This crate provides the core linting functionality including:
//! - YAML tokenization and token windows
//! - Rule checking and diagnostic generation
//! - Configuration management
//! - File discovery and processing

pub mod analyze;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod lints;
pub mod rule_set;
pub mod settings;
pub mod suppression;
pub mod token;
pub mod toml;
