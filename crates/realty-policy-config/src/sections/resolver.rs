// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity resolver configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_TIMEOUT_MS: u64 = 2_000;

/// Where principal profiles are looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverBackend {
	/// Profiles seeded from a JSON file and held in memory.
	#[default]
	Memory,
	/// Profiles stored in a SQLite database.
	Sqlite,
}

impl ResolverBackend {
	pub fn as_str(&self) -> &'static str {
		match self {
			ResolverBackend::Memory => "memory",
			ResolverBackend::Sqlite => "sqlite",
		}
	}
}

impl fmt::Display for ResolverBackend {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ResolverBackend {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"memory" => Ok(ResolverBackend::Memory),
			"sqlite" => Ok(ResolverBackend::Sqlite),
			_ => Err(ConfigError::InvalidValue {
				key: "resolver.backend".to_string(),
				message: format!("unknown backend '{s}', expected memory or sqlite"),
			}),
		}
	}
}

/// Resolver configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfigLayer {
	pub backend: Option<ResolverBackend>,
	pub profiles_path: Option<PathBuf>,
	pub database_url: Option<String>,
	pub timeout_ms: Option<u64>,
	pub cache_enabled: Option<bool>,
}

impl ResolverConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.backend.is_some() {
			self.backend = other.backend;
		}
		if other.profiles_path.is_some() {
			self.profiles_path = other.profiles_path;
		}
		if other.database_url.is_some() {
			self.database_url = other.database_url;
		}
		if other.timeout_ms.is_some() {
			self.timeout_ms = other.timeout_ms;
		}
		if other.cache_enabled.is_some() {
			self.cache_enabled = other.cache_enabled;
		}
	}

	pub fn finalize(self) -> ResolverConfig {
		ResolverConfig {
			backend: self.backend.unwrap_or_default(),
			profiles_path: self.profiles_path,
			database_url: self.database_url,
			timeout_ms: self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
			cache_enabled: self.cache_enabled.unwrap_or(true),
		}
	}
}

/// Resolver configuration (runtime, fully resolved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolverConfig {
	pub backend: ResolverBackend,
	/// JSON profile seed for the memory backend. Without one the backend starts empty.
	pub profiles_path: Option<PathBuf>,
	/// Required by the sqlite backend.
	pub database_url: Option<String>,
	/// Upper bound on a single profile lookup.
	pub timeout_ms: u64,
	/// Wrap the backend in a caching resolver.
	pub cache_enabled: bool,
}

impl ResolverConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	pub(crate) fn validate(&self) -> Result<(), ConfigError> {
		if self.timeout_ms == 0 {
			return Err(ConfigError::Validation(
				"resolver.timeout_ms must be greater than zero".to_string(),
			));
		}
		if self.backend == ResolverBackend::Sqlite && self.database_url.is_none() {
			return Err(ConfigError::Validation(
				"resolver.backend = \"sqlite\" requires resolver.database_url \
				 (REALTY_POLICY_DATABASE_URL)"
					.to_string(),
			));
		}
		Ok(())
	}
}

impl Default for ResolverConfig {
	fn default() -> Self {
		ResolverConfigLayer::default().finalize()
	}
}
