// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Market data, templates and agent-owned market records.

use crate::abac::predicates::{require_agent, require_owner};
use crate::abac::{AccessRequest, Check};
use crate::record::AGENT_ID;
use crate::types::{Operation, Principal};

/// Shared reference data: any principal reads, agents write.
pub fn evaluate_agent_managed(principal: &Principal, request: &AccessRequest) -> Check {
	match request.operation {
		Operation::Read => Ok(()),
		Operation::Create | Operation::Update | Operation::Delete => require_agent(principal),
	}
}

/// Alerts and reports belong to a single agent.
///
/// Writes are checked against the record as it will be stored; a delete has no
/// proposed data, so it is checked against the stored record instead.
pub fn evaluate_agent_owned(principal: &Principal, request: &AccessRequest) -> Check {
	match request.operation {
		Operation::Read => require_owner(principal, request.existing()?, AGENT_ID),
		Operation::Create | Operation::Update => {
			require_agent(principal)?;
			require_owner(principal, request.proposed()?, AGENT_ID)
		}
		Operation::Delete => {
			require_agent(principal)?;
			require_owner(principal, request.existing()?, AGENT_ID)
		}
	}
}
