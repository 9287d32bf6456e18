// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolver and store construction from configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use realty_policy::{Authorizer, CachedResolver, IdentityResolver, InMemoryResolver, TracingSink};
use realty_policy_config::{PolicyServiceConfig, ResolverBackend, ResolverConfig};
use realty_policy_db::{create_pool, run_migrations, SqliteProfileStore};
use tracing::{info, warn};

/// Opens the profile database named by `resolver.database_url`, applying migrations.
pub async fn open_store(config: &ResolverConfig) -> Result<SqliteProfileStore> {
	let url = config
		.database_url
		.as_deref()
		.context("no profile database configured (set REALTY_POLICY_DATABASE_URL or --database-url)")?;
	let pool = create_pool(url)
		.await
		.with_context(|| format!("failed to open profile database {url}"))?;
	run_migrations(&pool).await?;
	Ok(SqliteProfileStore::new(pool))
}

/// Builds the configured identity resolver.
pub async fn build_resolver(config: &ResolverConfig) -> Result<Arc<dyn IdentityResolver>> {
	let resolver: Arc<dyn IdentityResolver> = match config.backend {
		ResolverBackend::Memory => match &config.profiles_path {
			Some(path) => {
				let resolver = InMemoryResolver::load_json_file(path)
					.await
					.with_context(|| format!("failed to load profile seed {}", path.display()))?;
				Arc::new(resolver)
			}
			None => {
				warn!("no profile seed configured, every principal will resolve as unauthenticated");
				Arc::new(InMemoryResolver::new())
			}
		},
		ResolverBackend::Sqlite => Arc::new(open_store(config).await?),
	};

	info!(
		backend = %config.backend,
		cache_enabled = config.cache_enabled,
		"identity resolver ready"
	);

	if config.cache_enabled {
		Ok(Arc::new(CachedResolver::new(resolver)))
	} else {
		Ok(resolver)
	}
}

/// Builds an [`Authorizer`] wired to the configured resolver, options and timeout.
pub async fn build_authorizer(config: &PolicyServiceConfig) -> Result<Authorizer> {
	let resolver = build_resolver(&config.resolver).await?;
	Ok(Authorizer::new(resolver)
		.with_options(config.policy.options())
		.with_timeout(config.resolver.timeout())
		.with_sink(Arc::new(TracingSink)))
}
