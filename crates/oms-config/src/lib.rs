//! Configuration module for the order-management service.
//!
//! This module provides structures and utilities for managing service
//! configuration. It supports loading configuration from TOML files and
//! provides validation to ensure all required values are properly set.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the order-management service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to the service instance.
	pub service: ServiceConfig,
	/// Configuration for the snapshot persistence layer.
	pub snapshot: SnapshotConfig,
	/// Configuration for the demo data seeder.
	pub seeder: Option<SeederConfig>,
	/// Configuration for the activity reporter.
	pub reporter: Option<ReporterConfig>,
}

/// Configuration specific to the service instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
	/// Unique identifier for this service instance.
	pub id: String,
}

/// Configuration for the snapshot persistence layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnapshotConfig {
	/// Which backend implementation to use as primary.
	pub primary: String,
	/// Map of backend implementation names to their configurations.
	pub implementations: HashMap<String, toml::Value>,
	/// Interval in seconds between checkpoint flushes of dirty collections.
	#[serde(default = "default_flush_interval_seconds")]
	pub flush_interval_seconds: u64,
}

/// Returns the default checkpoint flush interval in seconds.
fn default_flush_interval_seconds() -> u64 {
	5
}

/// Configuration for the demo data seeder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeederConfig {
	/// Whether the seeder runs at all.
	#[serde(default)]
	pub enabled: bool,
	/// Interval in milliseconds between generated entity batches.
	#[serde(default = "default_seeder_interval_ms")]
	pub interval_ms: u64,
}

/// Returns the default seeder batch interval in milliseconds.
fn default_seeder_interval_ms() -> u64 {
	200
}

/// Configuration for the activity reporter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReporterConfig {
	/// Interval in milliseconds between activity scans.
	#[serde(default = "default_reporter_interval_ms")]
	pub interval_ms: u64,
}

/// Returns the default reporter scan interval in milliseconds.
fn default_reporter_interval_ms() -> u64 {
	200
}

impl Config {
	/// Loads configuration from a TOML file at the given path.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		content.parse()
	}

	/// Validates that the configuration is internally consistent.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.service.id.is_empty() {
			return Err(ConfigError::Validation("service.id must not be empty".into()));
		}
		if !self
			.snapshot
			.implementations
			.contains_key(&self.snapshot.primary)
		{
			return Err(ConfigError::Validation(format!(
				"snapshot.primary '{}' has no matching entry in snapshot.implementations",
				self.snapshot.primary
			)));
		}
		if self.snapshot.flush_interval_seconds == 0 {
			return Err(ConfigError::Validation(
				"snapshot.flush_interval_seconds must be at least 1".into(),
			));
		}
		if let Some(seeder) = &self.seeder {
			if seeder.interval_ms == 0 {
				return Err(ConfigError::Validation(
					"seeder.interval_ms must be at least 1".into(),
				));
			}
		}
		if let Some(reporter) = &self.reporter {
			if reporter.interval_ms == 0 {
				return Err(ConfigError::Validation(
					"reporter.interval_ms must be at least 1".into(),
				));
			}
		}
		Ok(())
	}
}

impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let config: Config = toml::from_str(s)?;
		config.validate()?;
		Ok(config)
	}
}
