// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-document ACL evaluation.
//!
//! Documents embed a `permissions` object with four member lists and a public
//! flag. This check is independent of roles and ownership; for the `documents`
//! collection it is consulted in addition to the role-based rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::record::{Record, PERMISSIONS};

/// One of the four document ACL lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentPermission {
	#[serde(rename = "canView")]
	CanView,
	#[serde(rename = "canEdit")]
	CanEdit,
	#[serde(rename = "canShare")]
	CanShare,
	#[serde(rename = "canDelete")]
	CanDelete,
}

impl DocumentPermission {
	pub fn all() -> &'static [DocumentPermission] {
		&[
			DocumentPermission::CanView,
			DocumentPermission::CanEdit,
			DocumentPermission::CanShare,
			DocumentPermission::CanDelete,
		]
	}

	/// Field name of the list inside the `permissions` object.
	pub fn as_str(&self) -> &'static str {
		match self {
			DocumentPermission::CanView => "canView",
			DocumentPermission::CanEdit => "canEdit",
			DocumentPermission::CanShare => "canShare",
			DocumentPermission::CanDelete => "canDelete",
		}
	}
}

impl fmt::Display for DocumentPermission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DocumentPermission {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		DocumentPermission::all()
			.iter()
			.copied()
			.find(|p| p.as_str() == s)
			.ok_or_else(|| ParseError::UnknownPermission(s.to_string()))
	}
}

/// ACL embedded in a document.
///
/// Lists are non-exclusive: a principal may appear in any number of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
	#[serde(default)]
	pub is_public: bool,
	#[serde(default)]
	pub can_view: Vec<String>,
	#[serde(default)]
	pub can_edit: Vec<String>,
	#[serde(default)]
	pub can_share: Vec<String>,
	#[serde(default)]
	pub can_delete: Vec<String>,
}

impl PermissionSet {
	/// Reads the `permissions` object of a document snapshot.
	///
	/// Malformed content never errors: a missing or non-list entry reads as an
	/// empty list, non-string members are skipped, and `isPublic` is only true
	/// when it is literally `true`.
	pub fn from_record(record: &Record) -> Self {
		let Some(Value::Object(perms)) = record.get(PERMISSIONS) else {
			return Self::default();
		};

		let list = |permission: DocumentPermission| -> Vec<String> {
			perms
				.get(permission.as_str())
				.and_then(Value::as_array)
				.map(|items| {
					items
						.iter()
						.filter_map(Value::as_str)
						.map(str::to_string)
						.collect()
				})
				.unwrap_or_default()
		};

		Self {
			is_public: perms.get("isPublic").and_then(Value::as_bool).unwrap_or(false),
			can_view: list(DocumentPermission::CanView),
			can_edit: list(DocumentPermission::CanEdit),
			can_share: list(DocumentPermission::CanShare),
			can_delete: list(DocumentPermission::CanDelete),
		}
	}

	pub fn members(&self, permission: DocumentPermission) -> &[String] {
		match permission {
			DocumentPermission::CanView => &self.can_view,
			DocumentPermission::CanEdit => &self.can_edit,
			DocumentPermission::CanShare => &self.can_share,
			DocumentPermission::CanDelete => &self.can_delete,
		}
	}

	/// Exact membership test against a single list.
	pub fn is_listed(&self, principal_id: &str, permission: DocumentPermission) -> bool {
		self.members(permission).iter().any(|m| m == principal_id)
	}

	/// Public documents grant `canView` to everyone; everything else needs a listing.
	pub fn allows(&self, principal_id: &str, permission: DocumentPermission) -> bool {
		if permission == DocumentPermission::CanView && self.is_public {
			return true;
		}
		self.is_listed(principal_id, permission)
	}
}

/// Checks a document ACL for `principal_id`.
pub fn check_permission(
	document: &Record,
	principal_id: &str,
	permission: DocumentPermission,
) -> bool {
	PermissionSet::from_record(document).allows(principal_id, permission)
}
