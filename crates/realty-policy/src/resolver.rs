// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity resolution.
//!
//! An [`IdentityResolver`] maps a principal id to its [`Profile`]. Resolution is
//! read-only. Callers must treat every error, not only
//! [`ResolveError::NotFound`], as "not authenticated".

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::types::{Principal, PrincipalId, Profile};

/// Failure to resolve a principal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
	#[error("profile not found")]
	NotFound,

	#[error("identity backend error: {0}")]
	Backend(String),

	#[error("identity lookup timed out")]
	Timeout,
}

/// Source of principal profiles.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
	async fn resolve(&self, id: &PrincipalId) -> Result<Profile, ResolveError>;

	/// Resolves `id` into a [`Principal`].
	async fn principal(&self, id: &PrincipalId) -> Result<Principal, ResolveError> {
		let profile = self.resolve(id).await?;
		Ok(Principal {
			id: id.clone(),
			profile,
		})
	}
}

#[async_trait]
impl<T: IdentityResolver + ?Sized> IdentityResolver for Arc<T> {
	async fn resolve(&self, id: &PrincipalId) -> Result<Profile, ResolveError> {
		(**self).resolve(id).await
	}
}

/// Failure to load a profile seed.
#[derive(Debug, Error)]
pub enum SeedError {
	#[error("failed to read profile seed {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid profile seed: {0}")]
	Parse(#[from] serde_json::Error),
}

/// Profiles held in memory.
///
/// Seeds are JSON objects keyed by principal id:
///
/// ```json
/// { "A1": { "role": "agent", "clientIds": { "C1": true } } }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryResolver {
	profiles: RwLock<HashMap<PrincipalId, Profile>>,
}

impl InMemoryResolver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_profiles<I>(profiles: I) -> Self
	where
		I: IntoIterator<Item = (PrincipalId, Profile)>,
	{
		Self {
			profiles: RwLock::new(profiles.into_iter().collect()),
		}
	}

	/// Parses a JSON seed.
	pub fn from_json_str(json: &str) -> Result<Self, SeedError> {
		let profiles: HashMap<PrincipalId, Profile> = serde_json::from_str(json)?;
		Ok(Self {
			profiles: RwLock::new(profiles),
		})
	}

	/// Reads and parses a JSON seed file.
	pub async fn load_json_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
		let path = path.as_ref();
		let json = tokio::fs::read_to_string(path)
			.await
			.map_err(|source| SeedError::Io {
				path: path.to_path_buf(),
				source,
			})?;
		let resolver = Self::from_json_str(&json)?;
		debug!(path = %path.display(), profiles = resolver.len().await, "loaded profile seed");
		Ok(resolver)
	}

	pub async fn insert(&self, id: impl Into<PrincipalId>, profile: Profile) {
		self.profiles.write().await.insert(id.into(), profile);
	}

	pub async fn remove(&self, id: &PrincipalId) -> Option<Profile> {
		self.profiles.write().await.remove(id)
	}

	pub async fn len(&self) -> usize {
		self.profiles.read().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.profiles.read().await.is_empty()
	}
}

#[async_trait]
impl IdentityResolver for InMemoryResolver {
	#[instrument(level = "debug", skip(self), fields(principal_id = %id))]
	async fn resolve(&self, id: &PrincipalId) -> Result<Profile, ResolveError> {
		self.profiles
			.read()
			.await
			.get(id)
			.cloned()
			.ok_or(ResolveError::NotFound)
	}
}
