// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission tiers for UI layers.
//!
//! A tier lists, per collection, the operations a principal of that class can
//! ever be granted given a suitable relationship to the record. It is a
//! rendering hint derived from the policy table and is never consulted by
//! [`crate::abac::evaluate`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::abac::PolicyFamily;
use crate::types::{Collection, Operation, Role};

use crate::types::Operation::{Create, Delete, Read, Update};

/// Principal class a tier describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
	/// Principals with the agent role.
	Agent,
	/// Buyers and sellers.
	Client,
	/// Any signed-in principal, with no relationship to the record.
	Public,
}

impl Tier {
	pub fn all() -> &'static [Tier] {
		&[Tier::Agent, Tier::Client, Tier::Public]
	}

	/// The tier a role belongs to.
	pub fn for_role(role: Role) -> Tier {
		if role.is_client() {
			Tier::Client
		} else {
			Tier::Agent
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Tier::Agent => "AGENT",
			Tier::Client => "CLIENT",
			Tier::Public => "PUBLIC",
		}
	}
}

impl fmt::Display for Tier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Collections and their reachable operations for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTier {
	pub tier: Tier,
	pub collections: BTreeMap<Collection, Vec<Operation>>,
}

impl PermissionTier {
	/// Builds the tier from the policy table.
	pub fn derive(tier: Tier) -> Self {
		let collections = Collection::ALL
			.iter()
			.filter_map(|c| {
				let ops = reachable(c.family(), tier);
				(!ops.is_empty()).then(|| (*c, ops.to_vec()))
			})
			.collect();
		Self { tier, collections }
	}

	pub fn allows(&self, collection: Collection, operation: Operation) -> bool {
		self.collections
			.get(&collection)
			.is_some_and(|ops| ops.contains(&operation))
	}
}

/// All three tiers, in `AGENT`, `CLIENT`, `PUBLIC` order.
pub fn permission_tiers() -> Vec<PermissionTier> {
	Tier::all().iter().map(|t| PermissionTier::derive(*t)).collect()
}

fn reachable(family: PolicyFamily, tier: Tier) -> &'static [Operation] {
	match (family, tier) {
		(PolicyFamily::Transaction { .. }, Tier::Agent) => &[Create, Read, Update, Delete],
		(PolicyFamily::Transaction { .. }, Tier::Client) => &[Read, Update],
		(PolicyFamily::CounterOffer, Tier::Agent) => &[Create, Read, Update, Delete],
		(PolicyFamily::CounterOffer, Tier::Client) => &[Create, Read, Update],
		// ACL grants apply to any role.
		(PolicyFamily::Document, Tier::Agent | Tier::Client) => &[Create, Read, Update, Delete],
		// Documents flagged `isPublic`.
		(PolicyFamily::Document, Tier::Public) => &[Read],
		(PolicyFamily::AgentManaged | PolicyFamily::PublicMarket, Tier::Agent) => {
			&[Create, Read, Update, Delete]
		}
		(PolicyFamily::AgentManaged | PolicyFamily::PublicMarket, _) => &[Read],
		(PolicyFamily::AgentOwnedMarket, Tier::Agent) => &[Create, Read, Update, Delete],
		(PolicyFamily::LegacyOwner, Tier::Agent | Tier::Client) => &[Read, Update, Delete],
		(PolicyFamily::UserProfile, Tier::Agent | Tier::Client) => &[Create, Read, Update],
		(PolicyFamily::UserProfile, Tier::Public) => &[Read],
		(PolicyFamily::SystemConfig, _) => &[Read],
		(PolicyFamily::AuditLog, Tier::Agent | Tier::Client) => &[Create, Read],
		_ => &[],
	}
}
