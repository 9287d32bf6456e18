// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for the policy engine.
//!
//! - **ID newtypes**: Opaque, case-sensitive string identifiers ([`PrincipalId`],
//!   [`ResourceId`]) issued by the external identity provider and database
//! - **Roles**: The three transaction roles ([`Role`])
//! - **Profiles**: The resolved identity record ([`Profile`]) and the
//!   authenticated actor ([`Principal`])
//! - **Collections and operations**: The governed collection names
//!   ([`Collection`]) and CRUD verbs ([`Operation`])
//!
//! Identifiers are compared by exact byte equality. No trimming, case folding
//! or other normalization is ever applied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(String);

		impl $name {
			/// Create a new ID from any string-like value.
			pub fn new(id: impl Into<String>) -> Self {
				Self(id.into())
			}

			/// Borrow the raw identifier.
			pub fn as_str(&self) -> &str {
				&self.0
			}

			/// Get the inner string value.
			pub fn into_inner(self) -> String {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(&self.0)
			}
		}

		impl From<&str> for $name {
			fn from(id: &str) -> Self {
				Self(id.to_string())
			}
		}

		impl From<String> for $name {
			fn from(id: String) -> Self {
				Self(id)
			}
		}
	};
}

define_id_type!(PrincipalId, "Identifier of an authenticated principal.");
define_id_type!(ResourceId, "Document key of a stored resource.");

// =============================================================================
// Roles
// =============================================================================

/// The role recorded on a principal's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	/// Licensed agent acting for one or more clients.
	Agent,
	/// Client on the purchasing side.
	Buyer,
	/// Client on the selling side.
	Seller,
}

impl Role {
	/// Returns all roles.
	pub fn all() -> &'static [Role] {
		&[Role::Agent, Role::Buyer, Role::Seller]
	}

	/// Returns true for the two client roles.
	pub fn is_client(&self) -> bool {
		matches!(self, Role::Buyer | Role::Seller)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Agent => "agent",
			Role::Buyer => "buyer",
			Role::Seller => "seller",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Role {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"agent" => Ok(Role::Agent),
			"buyer" => Ok(Role::Buyer),
			"seller" => Ok(Role::Seller),
			other => Err(ParseError::UnknownRole(other.to_string())),
		}
	}
}

// =============================================================================
// Profiles
// =============================================================================

/// Profile record for a principal, as stored by the identity backing store.
///
/// `client_ids` is only meaningful for agents. Membership is decided by key
/// presence; the boolean flag is carried through but never consulted, which is
/// how the database rule language evaluates `key in map`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub role: Role,
	#[serde(rename = "clientIds", default)]
	pub client_ids: BTreeMap<String, bool>,
}

impl Profile {
	/// Creates a profile with no associated clients.
	pub fn new(role: Role) -> Self {
		Self {
			role,
			client_ids: BTreeMap::new(),
		}
	}

	/// Creates an agent profile associated with the given clients.
	pub fn agent<I, S>(client_ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			role: Role::Agent,
			client_ids: client_ids.into_iter().map(|c| (c.into(), true)).collect(),
		}
	}

	/// Returns true if `client_id` is a key of the client map.
	pub fn lists_client(&self, client_id: &str) -> bool {
		self.client_ids.contains_key(client_id)
	}
}

/// An authenticated principal with its resolved profile.
///
/// Unauthenticated requests are represented by the absence of a principal
/// (`Option<&Principal>::None`), never by a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: PrincipalId,
	pub profile: Profile,
}

impl Principal {
	pub fn new(id: impl Into<PrincipalId>, profile: Profile) -> Self {
		Self {
			id: id.into(),
			profile,
		}
	}

	pub fn role(&self) -> Role {
		self.profile.role
	}
}

// =============================================================================
// Operations
// =============================================================================

/// CRUD operation requested against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
	Create,
	Read,
	Update,
	Delete,
}

impl Operation {
	pub fn all() -> &'static [Operation] {
		&[
			Operation::Create,
			Operation::Read,
			Operation::Update,
			Operation::Delete,
		]
	}

	/// Returns true for operations that inspect the stored record.
	pub fn reads_existing(&self) -> bool {
		matches!(self, Operation::Read | Operation::Update | Operation::Delete)
	}

	/// Returns true for operations that carry proposed data.
	pub fn writes_proposed(&self) -> bool {
		matches!(self, Operation::Create | Operation::Update)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Operation::Create => "create",
			Operation::Read => "read",
			Operation::Update => "update",
			Operation::Delete => "delete",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Operation {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"create" => Ok(Operation::Create),
			"read" => Ok(Operation::Read),
			"update" => Ok(Operation::Update),
			"delete" => Ok(Operation::Delete),
			other => Err(ParseError::UnknownOperation(other.to_string())),
		}
	}
}

// =============================================================================
// Collections
// =============================================================================

macro_rules! define_collections {
	($($variant:ident => $name:literal),+ $(,)?) => {
		/// A governed collection. Names are wire contracts and case-sensitive.
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		pub enum Collection {
			$(
				#[serde(rename = $name)]
				$variant,
			)+
		}

		impl Collection {
			/// Every governed collection, in declaration order.
			pub const ALL: &'static [Collection] = &[$(Collection::$variant),+];

			/// The stored collection name.
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Collection::$variant => $name,)+
				}
			}
		}

		impl FromStr for Collection {
			type Err = ParseError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($name => Ok(Collection::$variant),)+
					other => Err(ParseError::UnknownCollection(other.to_string())),
				}
			}
		}
	};
}

define_collections! {
	Users => "users",
	Offers => "offers",
	OfferComparisons => "offer_comparisons",
	CounterOffers => "counter_offers",
	OfferDocuments => "offer_documents",
	OfferWorkflows => "offer_workflows",
	Negotiations => "negotiations",
	NegotiationStrategies => "negotiation_strategies",
	AppraisalScenarios => "appraisal_scenarios",
	NegotiationDocuments => "negotiation_documents",
	MarketAnalyses => "market_analyses",
	RiskAssessments => "risk_assessments",
	Documents => "documents",
	DocumentTemplates => "document_templates",
	DocumentLibraries => "document_libraries",
	DocumentShares => "document_shares",
	DocumentAnalytics => "document_analytics",
	MarketData => "market_data",
	Comparables => "comparables",
	MarketTrends => "market_trends",
	MarketForecasts => "market_forecasts",
	MarketAlerts => "market_alerts",
	MarketReports => "market_reports",
	RepairEstimates => "repair_estimates",
	SystemConfig => "system_config",
	AuditLogs => "audit_logs",
}

impl fmt::Display for Collection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
