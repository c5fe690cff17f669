//! Configuration module for Vestnik
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use vestnik::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.logic.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, DbConfig, LogicConfig, SeedUrl};
