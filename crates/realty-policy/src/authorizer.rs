// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Async authorization facade.
//!
//! [`Authorizer`] ties identity resolution to [`evaluate`]: it resolves the
//! caller with a bounded timeout, evaluates the request, records the decision
//! and returns only the caller-facing [`PolicyError`]. Every resolution failure
//! is treated as an unauthenticated caller.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::abac::{evaluate, AccessRequest, Decision, PolicyOptions};
use crate::audit::{DecisionRecord, DecisionSink, TracingSink};
use crate::error::PolicyError;
use crate::resolver::{IdentityResolver, ResolveError};
use crate::types::{Principal, PrincipalId};

/// Default bound on a single identity lookup.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Authorizer {
	resolver: Arc<dyn IdentityResolver>,
	options: PolicyOptions,
	timeout: Duration,
	sink: Arc<dyn DecisionSink>,
}

impl Authorizer {
	pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
		Self {
			resolver,
			options: PolicyOptions::default(),
			timeout: DEFAULT_RESOLVE_TIMEOUT,
			sink: Arc::new(TracingSink),
		}
	}

	pub fn with_options(mut self, options: PolicyOptions) -> Self {
		self.options = options;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn with_sink(mut self, sink: Arc<dyn DecisionSink>) -> Self {
		self.sink = sink;
		self
	}

	pub fn options(&self) -> &PolicyOptions {
		&self.options
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	/// Resolves the caller, or `None` if it cannot be authenticated.
	#[instrument(level = "debug", skip(self), fields(principal_id = ?id.map(|i| i.as_str())))]
	pub async fn resolve_principal(&self, id: Option<&PrincipalId>) -> Option<Principal> {
		let id = id?;
		let result = match tokio::time::timeout(self.timeout, self.resolver.principal(id)).await {
			Ok(result) => result,
			Err(_) => Err(ResolveError::Timeout),
		};

		match result {
			Ok(principal) => Some(principal),
			Err(ResolveError::NotFound) => {
				debug!(principal_id = %id, "no profile for principal");
				None
			}
			Err(err) => {
				warn!(principal_id = %id, error = %err, "identity resolution failed, treating as unauthenticated");
				None
			}
		}
	}

	/// Resolves the caller and evaluates the request, returning the full decision.
	pub async fn decide(&self, id: Option<&PrincipalId>, request: &AccessRequest) -> Decision {
		let principal = self.resolve_principal(id).await;
		let decision = evaluate(principal.as_ref(), request, &self.options);
		let resolved = principal.as_ref().map(|p| &p.id);
		self.sink.record(&DecisionRecord::new(resolved, request, &decision));
		decision
	}

	/// Resolves the caller and evaluates the request.
	///
	/// Errors carry no detail about which rule failed.
	pub async fn authorize(
		&self,
		id: Option<&PrincipalId>,
		request: &AccessRequest,
	) -> Result<(), PolicyError> {
		self.decide(id, request).await.into_result()
	}
}

impl std::fmt::Debug for Authorizer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Authorizer")
			.field("options", &self.options)
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}
