// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::PolicyServiceConfigLayer;
use crate::sections::{
	LoggingConfigLayer, PolicyConfigLayer, ResolverBackend, ResolverConfigLayer,
};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<PolicyServiceConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<PolicyServiceConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(PolicyServiceConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
	precedence: Precedence,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			precedence: Precedence::ConfigFile,
		}
	}

	pub fn system() -> Self {
		Self::new("/etc/realty/policy.toml")
	}

	/// `$XDG_CONFIG_HOME/realty/policy.toml`, layered above the system file.
	pub fn user() -> Option<Self> {
		dirs::config_dir().map(|dir| Self {
			path: dir.join("realty").join("policy.toml"),
			precedence: Precedence::UserFile,
		})
	}

	pub fn path(&self) -> &std::path::Path {
		&self.path
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<PolicyServiceConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(PolicyServiceConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: PolicyServiceConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: REALTY_POLICY_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<PolicyServiceConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_vars(&|name| std::env::var(name).ok())
	}
}

/// Command-line overrides, applied above every other source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub log_level: Option<String>,
	pub json_logs: Option<bool>,
	pub backend: Option<ResolverBackend>,
	pub profiles_path: Option<PathBuf>,
	pub database_url: Option<String>,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<PolicyServiceConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let overrides = self.overrides.clone();
		Ok(PolicyServiceConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: overrides.log_level,
				json: overrides.json_logs,
			}),
			policy: None,
			resolver: Some(ResolverConfigLayer {
				backend: overrides.backend,
				profiles_path: overrides.profiles_path,
				database_url: overrides.database_url,
				..Default::default()
			}),
		})
	}
}

type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

fn load_from_vars(lookup: &Lookup<'_>) -> Result<PolicyServiceConfigLayer, ConfigError> {
	let env = Vars(lookup);
	Ok(PolicyServiceConfigLayer {
		logging: Some(LoggingConfigLayer {
			level: env.var("REALTY_POLICY_LOG_LEVEL"),
			json: env.bool("REALTY_POLICY_LOG_JSON"),
		}),
		policy: Some(PolicyConfigLayer {
			agent_self_client: env.bool("REALTY_POLICY_AGENT_SELF_CLIENT"),
		}),
		resolver: Some(ResolverConfigLayer {
			backend: env
				.var("REALTY_POLICY_RESOLVER_BACKEND")
				.map(|v| v.parse())
				.transpose()?,
			profiles_path: env.var("REALTY_POLICY_PROFILES_PATH").map(PathBuf::from),
			database_url: env.var("REALTY_POLICY_DATABASE_URL"),
			timeout_ms: env.u64("REALTY_POLICY_RESOLVER_TIMEOUT_MS")?,
			cache_enabled: env.bool("REALTY_POLICY_RESOLVER_CACHE_ENABLED"),
		}),
	})
}

struct Vars<'a, 'b>(&'a Lookup<'b>);

impl Vars<'_, '_> {
	fn var(&self, name: &str) -> Option<String> {
		(self.0)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn u64(&self, name: &str) -> Result<Option<u64>, ConfigError> {
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("invalid u64 value '{v}'"),
			}),
			None => Ok(None),
		}
	}
}
