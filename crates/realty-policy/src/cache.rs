// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Caching identity resolver.
//!
//! Profiles are fetched on first use and held until invalidated, refreshed or
//! evicted. A profile that does not exist is cached as [`ProfileState::Missing`]
//! for a short time only, so a principal created later becomes visible without
//! an explicit invalidation. A backend failure is recorded as
//! [`ProfileState::Failed`] and retried on the next lookup, so one bad fetch
//! never poisons the entry.
//!
//! The cache holds at most `capacity` entries. When full, expired misses go
//! first, then the oldest entry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

use crate::resolver::{IdentityResolver, ResolveError};
use crate::types::{PrincipalId, Profile};

/// Default upper bound on cached principals.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Default lifetime of a cached [`ProfileState::Missing`].
pub const DEFAULT_MISSING_TTL: Duration = Duration::from_secs(30);

/// Cached lookup result for one principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
	Ready(Profile),
	Missing,
	Failed(String),
}

impl ProfileState {
	fn from_result(result: Result<Profile, ResolveError>) -> Self {
		match result {
			Ok(profile) => ProfileState::Ready(profile),
			Err(ResolveError::NotFound) => ProfileState::Missing,
			Err(err) => ProfileState::Failed(err.to_string()),
		}
	}

	fn to_result(&self) -> Result<Profile, ResolveError> {
		match self {
			ProfileState::Ready(profile) => Ok(profile.clone()),
			ProfileState::Missing => Err(ResolveError::NotFound),
			ProfileState::Failed(message) => Err(ResolveError::Backend(message.clone())),
		}
	}

	pub fn is_ready(&self) -> bool {
		matches!(self, ProfileState::Ready(_))
	}
}

struct Entry {
	state: ProfileState,
	fetched_at: Instant,
}

impl Entry {
	fn is_expired(&self, missing_ttl: Duration) -> bool {
		match self.state {
			ProfileState::Ready(_) => false,
			ProfileState::Missing => self.fetched_at.elapsed() >= missing_ttl,
			ProfileState::Failed(_) => true,
		}
	}
}

/// [`IdentityResolver`] wrapper with bounded per-principal caching.
pub struct CachedResolver<R> {
	inner: R,
	capacity: usize,
	missing_ttl: Duration,
	entries: Mutex<HashMap<PrincipalId, Entry>>,
	/// Serializes fetches for the same principal. Removed once the fetch lands.
	fetch_locks: Mutex<HashMap<PrincipalId, Arc<Mutex<()>>>>,
}

impl<R: IdentityResolver> CachedResolver<R> {
	pub fn new(inner: R) -> Self {
		Self {
			inner,
			capacity: DEFAULT_CACHE_CAPACITY,
			missing_ttl: DEFAULT_MISSING_TTL,
			entries: Mutex::new(HashMap::new()),
			fetch_locks: Mutex::new(HashMap::new()),
		}
	}

	/// Builder: cap the number of cached principals. Zero is treated as one.
	pub fn with_capacity(mut self, capacity: usize) -> Self {
		self.capacity = capacity.max(1);
		self
	}

	/// Builder: how long a miss is remembered.
	pub fn with_missing_ttl(mut self, ttl: Duration) -> Self {
		self.missing_ttl = ttl;
		self
	}

	pub fn inner(&self) -> &R {
		&self.inner
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Current cached state, without fetching. Expired misses read as absent.
	pub async fn state(&self, id: &PrincipalId) -> Option<ProfileState> {
		let entries = self.entries.lock().await;
		let entry = entries.get(id)?;
		match entry.state {
			ProfileState::Missing if entry.is_expired(self.missing_ttl) => None,
			_ => Some(entry.state.clone()),
		}
	}

	/// Fetches `id` from the backing resolver, replacing any cached state.
	#[instrument(level = "debug", skip(self), fields(principal_id = %id))]
	pub async fn refresh(&self, id: &PrincipalId) -> ProfileState {
		let lock = self.fetch_lock(id).await;
		let state = {
			let _guard = lock.lock().await;
			self.fetch(id).await
		};
		self.release_fetch_lock(id).await;
		state
	}

	/// Drops the cached entry for `id`.
	pub async fn invalidate(&self, id: &PrincipalId) {
		if self.entries.lock().await.remove(id).is_some() {
			info!(principal_id = %id, "invalidated cached profile");
		}
	}

	/// Drops every cached entry.
	pub async fn clear(&self) {
		let mut entries = self.entries.lock().await;
		let count = entries.len();
		entries.clear();
		if count > 0 {
			info!(count, "cleared profile cache");
		}
	}

	pub async fn len(&self) -> usize {
		self.entries.lock().await.len()
	}

	pub async fn is_empty(&self) -> bool {
		self.entries.lock().await.is_empty()
	}

	/// Number of in-flight fetch locks.
	pub async fn pending_fetches(&self) -> usize {
		self.fetch_locks.lock().await.len()
	}

	async fn cached(&self, id: &PrincipalId) -> Option<ProfileState> {
		let entries = self.entries.lock().await;
		entries
			.get(id)
			.filter(|entry| !entry.is_expired(self.missing_ttl))
			.map(|entry| entry.state.clone())
	}

	async fn fetch(&self, id: &PrincipalId) -> ProfileState {
		let state = ProfileState::from_result(self.inner.resolve(id).await);
		if let ProfileState::Failed(message) = &state {
			warn!(principal_id = %id, error = %message, "profile fetch failed");
		} else {
			debug!(principal_id = %id, ready = state.is_ready(), "cached profile");
		}
		self.store(id, state.clone()).await;
		state
	}

	async fn store(&self, id: &PrincipalId, state: ProfileState) {
		let mut entries = self.entries.lock().await;
		if !entries.contains_key(id) && entries.len() >= self.capacity {
			let missing_ttl = self.missing_ttl;
			entries.retain(|_, entry| !entry.is_expired(missing_ttl));
			if entries.len() >= self.capacity {
				let oldest = entries
					.iter()
					.min_by_key(|(_, entry)| entry.fetched_at)
					.map(|(key, _)| key.clone());
				if let Some(oldest) = oldest {
					trace!(principal_id = %oldest, "evicting cached profile");
					entries.remove(&oldest);
				}
			}
		}
		entries.insert(
			id.clone(),
			Entry {
				state,
				fetched_at: Instant::now(),
			},
		);
	}

	async fn fetch_lock(&self, id: &PrincipalId) -> Arc<Mutex<()>> {
		let mut locks = self.fetch_locks.lock().await;
		locks
			.entry(id.clone())
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.clone()
	}

	async fn release_fetch_lock(&self, id: &PrincipalId) {
		self.fetch_locks.lock().await.remove(id);
	}
}

#[async_trait]
impl<R: IdentityResolver> IdentityResolver for CachedResolver<R> {
	async fn resolve(&self, id: &PrincipalId) -> Result<Profile, ResolveError> {
		// Fast path: no fetch lock
		if let Some(state) = self.cached(id).await {
			trace!(principal_id = %id, "profile cache hit");
			return state.to_result();
		}

		let lock = self.fetch_lock(id).await;
		let state = {
			let _guard = lock.lock().await;

			// Another task may have fetched while we waited
			match self.cached(id).await {
				Some(state) => {
					trace!(principal_id = %id, "profile cache hit (post-lock)");
					state
				}
				None => self.fetch(id).await,
			}
		};
		self.release_fetch_lock(id).await;
		state.to_result()
	}
}
