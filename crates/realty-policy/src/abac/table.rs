// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The policy table: which rule family governs each collection.

use serde::Serialize;

use crate::schema::SchemaKind;
use crate::types::Collection;

/// Rule shape shared by a group of collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum PolicyFamily {
	/// Agent/client records. Read and update need resource access, create and
	/// delete need the owning agent. Writes are validated against `schema`.
	Transaction { schema: SchemaKind },
	/// Like [`PolicyFamily::Transaction`], but either party may create.
	CounterOffer,
	/// Role rules combined with the embedded document ACL.
	Document,
	/// Readable by any authenticated principal, written by agents.
	AgentManaged,
	/// Public market data. Same shape as [`PolicyFamily::AgentManaged`].
	PublicMarket,
	/// Market records private to the agent that owns them.
	AgentOwnedMarket,
	/// Pre-transaction records keyed by a single `userId` owner.
	LegacyOwner,
	/// Profile documents keyed by the principal's id.
	UserProfile,
	/// Read-only configuration.
	SystemConfig,
	/// Append-only audit entries, visible to the user they concern.
	AuditLog,
}

impl PolicyFamily {
	/// Returns the family for a collection.
	pub fn of(collection: Collection) -> Self {
		use Collection::*;

		match collection {
			Offers => PolicyFamily::Transaction {
				schema: SchemaKind::Offer,
			},
			Negotiations => PolicyFamily::Transaction {
				schema: SchemaKind::Negotiation,
			},
			OfferComparisons
			| OfferDocuments
			| OfferWorkflows
			| NegotiationStrategies
			| AppraisalScenarios
			| NegotiationDocuments
			| MarketAnalyses
			| RiskAssessments
			| DocumentLibraries
			| DocumentShares
			| DocumentAnalytics => PolicyFamily::Transaction {
				schema: SchemaKind::Party,
			},
			CounterOffers => PolicyFamily::CounterOffer,
			Documents => PolicyFamily::Document,
			DocumentTemplates => PolicyFamily::AgentManaged,
			MarketData | Comparables | MarketTrends | MarketForecasts => PolicyFamily::PublicMarket,
			MarketAlerts | MarketReports => PolicyFamily::AgentOwnedMarket,
			RepairEstimates => PolicyFamily::LegacyOwner,
			Users => PolicyFamily::UserProfile,
			SystemConfig => PolicyFamily::SystemConfig,
			AuditLogs => PolicyFamily::AuditLog,
		}
	}

	/// Schema applied to proposed data, if the family validates writes.
	pub fn schema(&self) -> Option<SchemaKind> {
		match self {
			PolicyFamily::Transaction { schema } => Some(*schema),
			PolicyFamily::CounterOffer => Some(SchemaKind::Party),
			PolicyFamily::Document => Some(SchemaKind::Document),
			_ => None,
		}
	}
}

impl Collection {
	/// The rule family governing this collection.
	pub fn family(&self) -> PolicyFamily {
		PolicyFamily::of(*self)
	}
}

/// Every collection paired with its family, in declaration order.
pub fn policy_table() -> Vec<(Collection, PolicyFamily)> {
	Collection::ALL
		.iter()
		.map(|c| (*c, PolicyFamily::of(*c)))
		.collect()
}
