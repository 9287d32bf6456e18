// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource snapshots.
//!
//! A [`Record`] is the field map of a stored document (the *existing* snapshot)
//! or of a pending write (the *proposed* snapshot). Field names are wire
//! contracts with the stored data and are matched case-sensitively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the associated agent's principal id.
pub const AGENT_ID: &str = "agentId";
/// Field holding the associated client's principal id.
pub const CLIENT_ID: &str = "clientId";
/// Owner field of legacy single-owner records.
pub const USER_ID: &str = "userId";
/// Embedded per-document ACL.
pub const PERMISSIONS: &str = "permissions";

/// Field map of a stored or proposed resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
	pub fn new() -> Self {
		Self(Map::new())
	}

	/// Wraps a JSON value, returning `None` unless it is an object.
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(map) => Some(Self(map)),
			_ => None,
		}
	}

	/// Builder: set a field.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(key.into(), value.into());
		self
	}

	/// Builder: drop a field.
	pub fn without(mut self, key: &str) -> Self {
		self.0.remove(key);
		self
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.0.insert(key.into(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Key presence, regardless of the value (including `null`).
	pub fn has_field(&self, key: &str) -> bool {
		self.0.contains_key(key)
	}

	pub fn str_field(&self, key: &str) -> Option<&str> {
		self.0.get(key).and_then(Value::as_str)
	}

	pub fn number_field(&self, key: &str) -> Option<f64> {
		self.0.get(key).and_then(Value::as_f64)
	}

	pub fn bool_field(&self, key: &str) -> Option<bool> {
		self.0.get(key).and_then(Value::as_bool)
	}

	pub fn agent_id(&self) -> Option<&str> {
		self.str_field(AGENT_ID)
	}

	pub fn client_id(&self) -> Option<&str> {
		self.str_field(CLIENT_ID)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn as_map(&self) -> &Map<String, Value> {
		&self.0
	}
}

impl From<Map<String, Value>> for Record {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}
