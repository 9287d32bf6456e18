// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy evaluation engine.
//!
//! [`evaluate`] is the single decision procedure. It runs in two phases:
//!
//! 1. **Authentication**: no collection has a public path, so an absent
//!    principal is denied before any rule is consulted
//! 2. **Family policy**: delegates to the module for the collection's
//!    [`PolicyFamily`]
//!
//! Evaluation is pure. It never suspends, never mutates its inputs, and is safe
//! to call concurrently from any number of tasks.

use tracing::{debug, instrument};

use super::policies::{account, document, market, transaction};
use super::table::PolicyFamily;
use super::types::{AccessRequest, Check, Decision, DenyReason, PolicyOptions};
use crate::types::Principal;

/// Decides whether `principal` may perform the request.
///
/// # Tracing
///
/// Instrumented at debug level. Deny reasons are logged here and nowhere
/// else; callers should only surface [`crate::PolicyError::public_message`].
#[instrument(
    level = "debug",
    skip(principal, request, options),
    fields(
        principal_id = principal.map(|p| p.id.as_str()).unwrap_or("<anonymous>"),
        collection = %request.collection,
        operation = %request.operation,
    )
)]
pub fn evaluate(
	principal: Option<&Principal>,
	request: &AccessRequest,
	options: &PolicyOptions,
) -> Decision {
	let decision = Decision::from(check(principal, request, options));
	if let Decision::Deny(reason) = &decision {
		debug!(%reason, "access denied");
	}
	decision
}

/// Boolean form of [`evaluate`].
pub fn is_allowed(
	principal: Option<&Principal>,
	request: &AccessRequest,
	options: &PolicyOptions,
) -> bool {
	evaluate(principal, request, options).is_allowed()
}

fn check(principal: Option<&Principal>, request: &AccessRequest, options: &PolicyOptions) -> Check {
	let Some(principal) = principal else {
		return Err(DenyReason::Unauthenticated);
	};

	match request.collection.family() {
		PolicyFamily::Transaction { schema } => {
			transaction::evaluate(principal, request, schema, options)
		}
		PolicyFamily::CounterOffer => {
			transaction::evaluate_counter_offer(principal, request, options)
		}
		PolicyFamily::Document => document::evaluate(principal, request, options),
		PolicyFamily::AgentManaged | PolicyFamily::PublicMarket => {
			market::evaluate_agent_managed(principal, request)
		}
		PolicyFamily::AgentOwnedMarket => market::evaluate_agent_owned(principal, request),
		PolicyFamily::LegacyOwner => account::evaluate_legacy(principal, request),
		PolicyFamily::UserProfile => account::evaluate_user(principal, request),
		PolicyFamily::SystemConfig => account::evaluate_system_config(principal, request),
		PolicyFamily::AuditLog => account::evaluate_audit_log(principal, request),
	}
}
