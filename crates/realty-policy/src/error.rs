// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy error types.
//!
//! [`PolicyError`] is the caller-facing taxonomy. Its variants deliberately
//! carry no detail about which predicate failed; use
//! [`PolicyError::public_message`] for anything shown to an end user and log the
//! [`crate::abac::DenyReason`] instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::SchemaKind;

/// Outcome of a denied or unresolvable request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyError {
	/// No resolvable principal.
	#[error("authentication required")]
	Unauthenticated,

	/// Authenticated, but a predicate evaluated to false.
	#[error("forbidden")]
	Forbidden,

	/// The proposed record was rejected by its schema validator.
	#[error("validation failed")]
	ValidationFailed,

	/// The identity or the referenced resource is absent.
	#[error("not found")]
	NotFound,
}

impl PolicyError {
	/// Message safe to surface to an end user.
	///
	/// Everything other than a missing identity collapses to the same string so
	/// that responses cannot be used to probe resource existence or ownership.
	pub fn public_message(&self) -> &'static str {
		match self {
			PolicyError::Unauthenticated => "authentication required",
			PolicyError::Forbidden | PolicyError::ValidationFailed | PolicyError::NotFound => {
				"access denied"
			}
		}
	}
}

/// Schema validation failure for a proposed record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationError {
	#[error("{kind} record is missing required field `{field}`")]
	MissingField {
		kind: SchemaKind,
		field: &'static str,
	},

	#[error("{kind} record has invalid `{field}`: {reason}")]
	InvalidValue {
		kind: SchemaKind,
		field: &'static str,
		reason: String,
	},

	#[error("{kind} record must be a JSON object")]
	NotAnObject { kind: SchemaKind },
}

/// Failure to parse a wire name into one of the policy enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
	#[error("unknown role: {0}")]
	UnknownRole(String),

	#[error("unknown operation: {0}")]
	UnknownOperation(String),

	#[error("unknown collection: {0}")]
	UnknownCollection(String),

	#[error("unknown document permission: {0}")]
	UnknownPermission(String),
}
