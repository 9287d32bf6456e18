// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Profile repository.
//!
//! Profiles are stored one row per principal. `client_ids` holds the JSON
//! encoding of the agent's client map.

use async_trait::async_trait;
use chrono::Utc;
use realty_policy::{IdentityResolver, PrincipalId, Profile, ResolveError, Role};
use sqlx::{sqlite::SqlitePool, Row};
use std::collections::BTreeMap;

use crate::error::DbError;

#[async_trait]
pub trait ProfileStore: Send + Sync {
	async fn upsert_profile(&self, id: &PrincipalId, profile: &Profile) -> Result<(), DbError>;
	async fn upsert_profiles(&self, profiles: &[(PrincipalId, Profile)]) -> Result<usize, DbError>;
	async fn get_profile(&self, id: &PrincipalId) -> Result<Option<Profile>, DbError>;
	async fn list_profiles(&self) -> Result<Vec<(PrincipalId, Profile)>, DbError>;
	async fn delete_profile(&self, id: &PrincipalId) -> Result<bool, DbError>;
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
	async fn upsert_profile(&self, id: &PrincipalId, profile: &Profile) -> Result<(), DbError> {
		self.upsert_profile(id, profile).await
	}

	async fn upsert_profiles(&self, profiles: &[(PrincipalId, Profile)]) -> Result<usize, DbError> {
		self.upsert_profiles(profiles).await
	}

	async fn get_profile(&self, id: &PrincipalId) -> Result<Option<Profile>, DbError> {
		self.get_profile(id).await
	}

	async fn list_profiles(&self) -> Result<Vec<(PrincipalId, Profile)>, DbError> {
		self.list_profiles().await
	}

	async fn delete_profile(&self, id: &PrincipalId) -> Result<bool, DbError> {
		self.delete_profile(id).await
	}
}

/// SQLite-backed profile store.
#[derive(Clone)]
pub struct SqliteProfileStore {
	pool: SqlitePool,
}

impl SqliteProfileStore {
	/// Create a new profile store with the given pool.
	///
	/// The `profiles` table must already exist; see [`crate::run_migrations`].
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Insert or replace a profile.
	#[tracing::instrument(skip(self, profile), fields(principal_id = %id, role = %profile.role))]
	pub async fn upsert_profile(&self, id: &PrincipalId, profile: &Profile) -> Result<(), DbError> {
		let client_ids = serde_json::to_string(&profile.client_ids)?;

		sqlx::query(
			r#"
			INSERT INTO profiles (id, role, client_ids, updated_at)
			VALUES (?, ?, ?, ?)
			ON CONFLICT(id) DO UPDATE SET
				role = excluded.role,
				client_ids = excluded.client_ids,
				updated_at = excluded.updated_at
			"#,
		)
		.bind(id.as_str())
		.bind(profile.role.as_str())
		.bind(&client_ids)
		.bind(Utc::now().to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(principal_id = %id, "profile upserted");
		Ok(())
	}

	/// Insert or replace many profiles in one transaction.
	#[tracing::instrument(skip(self, profiles), fields(count = profiles.len()))]
	pub async fn upsert_profiles(&self, profiles: &[(PrincipalId, Profile)]) -> Result<usize, DbError> {
		let now = Utc::now().to_rfc3339();
		let mut tx = self.pool.begin().await?;

		for (id, profile) in profiles {
			let client_ids = serde_json::to_string(&profile.client_ids)?;
			sqlx::query(
				r#"
				INSERT INTO profiles (id, role, client_ids, updated_at)
				VALUES (?, ?, ?, ?)
				ON CONFLICT(id) DO UPDATE SET
					role = excluded.role,
					client_ids = excluded.client_ids,
					updated_at = excluded.updated_at
				"#,
			)
			.bind(id.as_str())
			.bind(profile.role.as_str())
			.bind(&client_ids)
			.bind(&now)
			.execute(&mut *tx)
			.await?;
		}

		tx.commit().await?;
		tracing::debug!(count = profiles.len(), "profiles imported");
		Ok(profiles.len())
	}

	/// Get a profile by principal id.
	///
	/// # Returns
	/// `None` if no row exists, or if the stored role is not a known role.
	#[tracing::instrument(skip(self), fields(principal_id = %id))]
	pub async fn get_profile(&self, id: &PrincipalId) -> Result<Option<Profile>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, role, client_ids
			FROM profiles
			WHERE id = ?
			"#,
		)
		.bind(id.as_str())
		.fetch_optional(&self.pool)
		.await?;

		match row {
			Some(row) => parse_profile_row(&row).map(|parsed| parsed.map(|(_, profile)| profile)),
			None => Ok(None),
		}
	}

	/// List every profile with a known role, ordered by id.
	#[tracing::instrument(skip(self))]
	pub async fn list_profiles(&self) -> Result<Vec<(PrincipalId, Profile)>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT id, role, client_ids
			FROM profiles
			ORDER BY id
			"#,
		)
		.fetch_all(&self.pool)
		.await?;

		let mut profiles = Vec::with_capacity(rows.len());
		for row in &rows {
			if let Some(parsed) = parse_profile_row(row)? {
				profiles.push(parsed);
			}
		}
		Ok(profiles)
	}

	/// Delete a profile.
	///
	/// # Returns
	/// `true` if a row was removed.
	#[tracing::instrument(skip(self), fields(principal_id = %id))]
	pub async fn delete_profile(&self, id: &PrincipalId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
			.bind(id.as_str())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(principal_id = %id, "profile deleted");
		}
		Ok(deleted)
	}
}

#[async_trait]
impl IdentityResolver for SqliteProfileStore {
	#[tracing::instrument(level = "debug", skip(self), fields(principal_id = %id))]
	async fn resolve(&self, id: &PrincipalId) -> std::result::Result<Profile, ResolveError> {
		match self.get_profile(id).await {
			Ok(Some(profile)) => Ok(profile),
			Ok(None) => Err(ResolveError::NotFound),
			Err(e) => Err(ResolveError::Backend(e.to_string())),
		}
	}
}

/// Rows with an unknown role are skipped so they read as missing.
fn parse_profile_row(
	row: &sqlx::sqlite::SqliteRow,
) -> Result<Option<(PrincipalId, Profile)>, DbError> {
	let id: String = row.get("id");
	let role: String = row.get("role");
	let client_ids: String = row.get("client_ids");

	let role = match role.parse::<Role>() {
		Ok(role) => role,
		Err(e) => {
			tracing::warn!(principal_id = %id, error = %e, "ignoring profile with unknown role");
			return Ok(None);
		}
	};
	let client_ids: BTreeMap<String, bool> = serde_json::from_str(&client_ids)?;

	Ok(Some((PrincipalId::new(id), Profile { role, client_ids })))
}
