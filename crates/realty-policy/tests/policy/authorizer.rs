// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end authorization through a seeded resolver.

use std::io::Write;
use std::sync::Arc;

use realty_policy::{
	AccessRequest, Authorizer, CachedResolver, Collection, DecisionOutcome, IdentityResolver,
	InMemoryResolver, PolicyError, PrincipalId, ProfileState, RecordingSink,
};

use super::support::{offer, party};

const SEED: &str = r#"{
	"A1": { "role": "agent", "clientIds": { "C1": true } },
	"A2": { "role": "agent" },
	"C1": { "role": "buyer" }
}"#;

async fn seeded_resolver() -> (InMemoryResolver, tempfile::NamedTempFile) {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(SEED.as_bytes()).unwrap();
	let resolver = InMemoryResolver::load_json_file(file.path()).await.unwrap();
	(resolver, file)
}

#[tokio::test]
async fn agent_reaches_client_offer_written_by_another_agent() {
	let (resolver, _seed) = seeded_resolver().await;
	let authorizer = Authorizer::new(Arc::new(resolver));

	let request = AccessRequest::read(Collection::Offers, party("A2", "C1"));
	assert_eq!(
		authorizer.authorize(Some(&PrincipalId::new("A1")), &request).await,
		Ok(())
	);
}

#[tokio::test]
async fn denial_surfaces_only_generic_error() {
	let (resolver, _seed) = seeded_resolver().await;
	let sink = Arc::new(RecordingSink::new());
	let authorizer = Authorizer::new(Arc::new(resolver)).with_sink(sink.clone());

	let request = AccessRequest::create(Collection::Offers, offer("A1", "C1"));
	let err = authorizer
		.authorize(Some(&PrincipalId::new("A2")), &request)
		.await
		.unwrap_err();

	assert_eq!(err, PolicyError::Forbidden);
	assert_eq!(err.public_message(), "access denied");

	let records = sink.records();
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].outcome, DecisionOutcome::Denied);
	assert!(records[0].reason.is_some());
}

#[tokio::test]
async fn unknown_principal_fails_closed() {
	let (resolver, _seed) = seeded_resolver().await;
	let authorizer = Authorizer::new(Arc::new(resolver));

	let request = AccessRequest::read(Collection::MarketData, realty_policy::Record::new());
	let err = authorizer
		.authorize(Some(&PrincipalId::new("nobody")), &request)
		.await
		.unwrap_err();
	assert_eq!(err, PolicyError::Unauthenticated);
	assert_eq!(err.public_message(), "authentication required");
}

#[tokio::test]
async fn cached_resolver_serves_authorizer() {
	let (resolver, _seed) = seeded_resolver().await;
	let cache = Arc::new(CachedResolver::new(resolver));
	let authorizer = Authorizer::new(cache.clone() as Arc<dyn IdentityResolver>);

	let request = AccessRequest::read(Collection::Offers, party("A1", "C1"));
	let c1 = PrincipalId::new("C1");
	assert_eq!(authorizer.authorize(Some(&c1), &request).await, Ok(()));
	assert!(matches!(cache.state(&c1).await, Some(ProfileState::Ready(_))));

	// Profile removed upstream: still served until invalidated.
	cache.inner().remove(&c1).await;
	assert_eq!(authorizer.authorize(Some(&c1), &request).await, Ok(()));

	cache.invalidate(&c1).await;
	assert_eq!(
		authorizer.authorize(Some(&c1), &request).await,
		Err(PolicyError::Unauthenticated)
	);
	assert_eq!(cache.state(&c1).await, Some(ProfileState::Missing));
}
