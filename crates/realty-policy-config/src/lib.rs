// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the realty policy service.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with cross-field validation
//! - Consistent environment variable naming (`REALTY_POLICY_*`)
//!
//! # Usage
//!
//! ```ignore
//! use realty_policy_config::load_config;
//!
//! let config = load_config()?;
//! println!("resolving profiles via {}", config.resolver.backend);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::PolicyServiceConfigLayer;
pub use sections::*;
pub use sources::{
	CliOverrides, CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};

use tracing::{debug, info};

/// Fully resolved service configuration.
#[derive(Debug, Clone, Default)]
pub struct PolicyServiceConfig {
	pub logging: LoggingConfig,
	pub policy: PolicyConfig,
	pub resolver: ResolverConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`REALTY_POLICY_*`)
/// 2. User config file (`~/.config/realty/policy.toml`)
/// 3. System config file (`/etc/realty/policy.toml`)
/// 4. Built-in defaults
pub fn load_config() -> Result<PolicyServiceConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> =
		vec![Box::new(DefaultsSource), Box::new(TomlSource::system())];
	if let Some(user) = TomlSource::user() {
		sources.push(Box::new(user));
	}
	sources.push(Box::new(EnvSource));
	load_from_sources(sources)
}

/// Load configuration for the command-line tool.
///
/// An explicit `config_file` replaces the system file. The user file and
/// environment still apply, and `overrides` win over everything.
pub fn load_config_with_cli(
	config_file: Option<std::path::PathBuf>,
	overrides: CliOverrides,
) -> Result<PolicyServiceConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
	match config_file {
		Some(path) => sources.push(Box::new(TomlSource::new(path))),
		None => sources.push(Box::new(TomlSource::system())),
	}
	if let Some(user) = TomlSource::user() {
		sources.push(Box::new(user));
	}
	sources.push(Box::new(EnvSource));
	sources.push(Box::new(CliSource::new(overrides)));

	load_from_sources(sources)
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<PolicyServiceConfig, ConfigError> {
	let mut merged = PolicyServiceConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<PolicyServiceConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge an arbitrary set of sources in precedence order.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<PolicyServiceConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = PolicyServiceConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: PolicyServiceConfigLayer) -> Result<PolicyServiceConfig, ConfigError> {
	let logging = layer.logging.unwrap_or_default().finalize();
	let policy = layer.policy.unwrap_or_default().finalize();
	let resolver = layer.resolver.unwrap_or_default().finalize();

	validate_config(&resolver)?;

	info!(
		backend = %resolver.backend,
		timeout_ms = resolver.timeout_ms,
		cache_enabled = resolver.cache_enabled,
		agent_self_client = policy.agent_self_client,
		"configuration loaded"
	);

	Ok(PolicyServiceConfig {
		logging,
		policy,
		resolver,
	})
}

fn validate_config(resolver: &ResolverConfig) -> Result<(), ConfigError> {
	resolver.validate()
}
