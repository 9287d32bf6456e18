// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Transaction record policies: offers, negotiations and the collections that
//! hang off them.

use crate::abac::predicates::{require_agent, require_owner, require_resource_access};
use crate::abac::{AccessRequest, Check, PolicyOptions};
use crate::record::AGENT_ID;
use crate::schema::{self, SchemaKind};
use crate::types::{Operation, Principal};

/// Agent-created records shared between an agent and a client.
pub fn evaluate(
	principal: &Principal,
	request: &AccessRequest,
	schema: SchemaKind,
	options: &PolicyOptions,
) -> Check {
	match request.operation {
		Operation::Read => require_resource_access(principal, request.existing()?, options),
		Operation::Create => {
			require_agent(principal)?;
			let proposed = request.proposed()?;
			require_owner(principal, proposed, AGENT_ID)?;
			schema::validate(schema, proposed)?;
			Ok(())
		}
		Operation::Update => {
			require_resource_access(principal, request.existing()?, options)?;
			schema::validate(schema, request.proposed()?)?;
			Ok(())
		}
		Operation::Delete => delete_by_agent(principal, request),
	}
}

/// Counter offers can be raised by either side of a negotiation, so creation
/// only needs access to the proposed record rather than agent ownership.
pub fn evaluate_counter_offer(
	principal: &Principal,
	request: &AccessRequest,
	options: &PolicyOptions,
) -> Check {
	match request.operation {
		Operation::Read => require_resource_access(principal, request.existing()?, options),
		Operation::Create => {
			let proposed = request.proposed()?;
			require_resource_access(principal, proposed, options)?;
			schema::validate(SchemaKind::Party, proposed)?;
			Ok(())
		}
		Operation::Update => {
			require_resource_access(principal, request.existing()?, options)?;
			schema::validate(SchemaKind::Party, request.proposed()?)?;
			Ok(())
		}
		Operation::Delete => delete_by_agent(principal, request),
	}
}

fn delete_by_agent(principal: &Principal, request: &AccessRequest) -> Check {
	require_agent(principal)?;
	require_owner(principal, request.existing()?, AGENT_ID)
}
