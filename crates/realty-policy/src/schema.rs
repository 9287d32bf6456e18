// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema validators for proposed records.
//!
//! Each [`Schema`] is a required-field list plus a set of value-domain checks.
//! Validation is all-or-nothing: the first failing field rejects the record.
//! Fields not named by a schema are ignored (and are not stripped).

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;
use crate::record::{Record, AGENT_ID, CLIENT_ID};

/// Record kind a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
	Offer,
	Negotiation,
	Document,
	/// Any governed record that only has to name its agent and client.
	Party,
}

impl fmt::Display for SchemaKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SchemaKind::Offer => write!(f, "offer"),
			SchemaKind::Negotiation => write!(f, "negotiation"),
			SchemaKind::Document => write!(f, "document"),
			SchemaKind::Party => write!(f, "party"),
		}
	}
}

macro_rules! define_domain {
	($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
		pub enum $name {
			$(
				#[serde(rename = $wire)]
				$variant,
			)+
		}

		impl $name {
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			pub fn as_str(&self) -> &'static str {
				match self {
					$($name::$variant => $wire,)+
				}
			}

			/// Exact, case-sensitive lookup of a stored value.
			pub fn from_wire(value: &str) -> Option<Self> {
				match value {
					$($wire => Some($name::$variant),)+
					_ => None,
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.as_str())
			}
		}
	};
}

define_domain!(
	/// Which side an offer is written for.
	OfferType {
		Buyer => "buyer",
		Seller => "seller",
	}
);

define_domain!(
	OfferStatus {
		Draft => "draft",
		Submitted => "submitted",
		Accepted => "accepted",
		Rejected => "rejected",
		Countered => "countered",
		Expired => "expired",
	}
);

define_domain!(
	NegotiationType {
		BuyerNegotiation => "buyer_negotiation",
		SellerNegotiation => "seller_negotiation",
	}
);

define_domain!(
	NegotiationStatus {
		Active => "active",
		Completed => "completed",
		Stalled => "stalled",
		Cancelled => "cancelled",
	}
);

define_domain!(
	DocumentStatus {
		Draft => "draft",
		Review => "review",
		Approved => "approved",
		Final => "final",
		Sent => "sent",
		Archived => "archived",
	}
);

/// Minimum and maximum document title length, in characters.
pub const TITLE_MIN_LEN: usize = 1;
pub const TITLE_MAX_LEN: usize = 200;

/// Required-field list and value-domain checks for one record kind.
pub struct Schema {
	pub kind: SchemaKind,
	pub required: &'static [&'static str],
	constraints: fn(&Record) -> Result<(), ValidationError>,
}

impl Schema {
	/// Validates a proposed record against this schema.
	pub fn validate(&self, record: &Record) -> Result<(), ValidationError> {
		if let Some(field) = self.required.iter().find(|f| !record.has_field(f)) {
			return Err(ValidationError::MissingField {
				kind: self.kind,
				field: *field,
			});
		}
		(self.constraints)(record)
	}
}

impl fmt::Debug for Schema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Schema")
			.field("kind", &self.kind)
			.field("required", &self.required)
			.finish()
	}
}

pub static OFFER: Schema = Schema {
	kind: SchemaKind::Offer,
	required: &[
		"agentId",
		"clientId",
		"propertyId",
		"type",
		"status",
		"purchasePrice",
		"earnestMoney",
		"downPayment",
		"loanAmount",
		"offerDate",
		"expirationDate",
		"closingDate",
	],
	constraints: check_offer,
};

pub static NEGOTIATION: Schema = Schema {
	kind: SchemaKind::Negotiation,
	required: &["agentId", "clientId", "offerId", "propertyId", "type", "status"],
	constraints: check_negotiation,
};

pub static DOCUMENT: Schema = Schema {
	kind: SchemaKind::Document,
	required: &["agentId", "clientId", "title", "type", "category", "status"],
	constraints: check_document,
};

pub static PARTY: Schema = Schema {
	kind: SchemaKind::Party,
	required: &[AGENT_ID, CLIENT_ID],
	constraints: no_constraints,
};

/// Returns the schema for a record kind.
pub fn schema_for(kind: SchemaKind) -> &'static Schema {
	match kind {
		SchemaKind::Offer => &OFFER,
		SchemaKind::Negotiation => &NEGOTIATION,
		SchemaKind::Document => &DOCUMENT,
		SchemaKind::Party => &PARTY,
	}
}

/// Validates `record` as a record of the given kind.
pub fn validate(kind: SchemaKind, record: &Record) -> Result<(), ValidationError> {
	schema_for(kind).validate(record)
}

/// Validates untyped JSON, rejecting anything that is not an object.
pub fn validate_value(kind: SchemaKind, value: &serde_json::Value) -> Result<(), ValidationError> {
	match value {
		serde_json::Value::Object(map) => validate(kind, &Record::from(map.clone())),
		_ => Err(ValidationError::NotAnObject { kind }),
	}
}

fn no_constraints(_: &Record) -> Result<(), ValidationError> {
	Ok(())
}

/// Offer validation: the base terms plus the funding amounts.
fn check_offer(record: &Record) -> Result<(), ValidationError> {
	check_offer_terms(record)?;
	check_offer_funds(record)
}

/// `type` and `status` domains and a positive purchase price.
pub fn check_offer_terms(record: &Record) -> Result<(), ValidationError> {
	let kind = SchemaKind::Offer;
	check_domain(kind, record, "type", OfferType::from_wire)?;
	check_domain(kind, record, "status", OfferStatus::from_wire)?;
	let price = require_number(kind, record, "purchasePrice")?;
	if price <= 0.0 {
		return Err(invalid(kind, "purchasePrice", "must be greater than 0"));
	}
	Ok(())
}

/// Non-negative earnest money and down payment.
pub fn check_offer_funds(record: &Record) -> Result<(), ValidationError> {
	let kind = SchemaKind::Offer;
	for field in ["earnestMoney", "downPayment"] {
		if require_number(kind, record, field)? < 0.0 {
			return Err(invalid(kind, field, "must not be negative"));
		}
	}
	Ok(())
}

fn check_negotiation(record: &Record) -> Result<(), ValidationError> {
	let kind = SchemaKind::Negotiation;
	check_domain(kind, record, "type", NegotiationType::from_wire)?;
	check_domain(kind, record, "status", NegotiationStatus::from_wire)?;
	Ok(())
}

fn check_document(record: &Record) -> Result<(), ValidationError> {
	let kind = SchemaKind::Document;
	check_domain(kind, record, "status", DocumentStatus::from_wire)?;
	let title = record
		.str_field("title")
		.ok_or_else(|| invalid(kind, "title", "must be a string"))?;
	let len = title.chars().count();
	if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
		return Err(invalid(
			kind,
			"title",
			format!("length {len} outside {TITLE_MIN_LEN}..={TITLE_MAX_LEN}"),
		));
	}
	Ok(())
}

fn check_domain<T>(
	kind: SchemaKind,
	record: &Record,
	field: &'static str,
	parse: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
	let value = record
		.str_field(field)
		.ok_or_else(|| invalid(kind, field, "must be a string"))?;
	parse(value).ok_or_else(|| invalid(kind, field, format!("unexpected value '{value}'")))
}

fn require_number(
	kind: SchemaKind,
	record: &Record,
	field: &'static str,
) -> Result<f64, ValidationError> {
	record
		.number_field(field)
		.ok_or_else(|| invalid(kind, field, "must be a number"))
}

fn invalid(kind: SchemaKind, field: &'static str, reason: impl Into<String>) -> ValidationError {
	ValidationError::InvalidValue {
		kind,
		field,
		reason: reason.into(),
	}
}
