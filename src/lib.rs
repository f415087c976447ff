/// Configuration resolution: config file, environment fallback, flag overrides
pub mod config;

/// Output formatting utilities for the rendered changelog
pub mod formatter;

/// GitHub REST API client, error taxonomy, and Link-header pagination
pub mod github;

/// Core services: milestone resolution and closed-issue collection
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
