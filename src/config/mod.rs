//! Configuration module for favicon discovery
//!
//! This module provides the `FinderConfig` struct and its builder with
//! validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::FinderConfigBuilder;
pub use types::FinderConfig;
