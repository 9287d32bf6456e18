// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy evaluation switches.

use realty_policy::PolicyOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfigLayer {
	pub agent_self_client: Option<bool>,
}

impl PolicyConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.agent_self_client.is_some() {
			self.agent_self_client = other.agent_self_client;
		}
	}

	pub fn finalize(self) -> PolicyConfig {
		let defaults = PolicyOptions::default();
		PolicyConfig {
			agent_self_client: self
				.agent_self_client
				.unwrap_or(defaults.agent_self_client),
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
	pub agent_self_client: bool,
}

impl PolicyConfig {
	pub fn options(&self) -> PolicyOptions {
		PolicyOptions {
			agent_self_client: self.agent_self_client,
		}
	}
}

impl Default for PolicyConfig {
	fn default() -> Self {
		PolicyConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		assert_eq!(PolicyConfig::default().options(), PolicyOptions::default());
	}

	#[test]
	fn test_layer_finalize_with_values() {
		let config = PolicyConfigLayer {
			agent_self_client: Some(false),
		}
		.finalize();
		assert!(!config.options().agent_self_client);
	}

	#[test]
	fn test_merge_overwrites() {
		let mut base = PolicyConfigLayer {
			agent_self_client: Some(false),
		};
		base.merge(PolicyConfigLayer::default());
		assert_eq!(base.agent_self_client, Some(false));
		base.merge(PolicyConfigLayer {
			agent_self_client: Some(true),
		});
		assert_eq!(base.agent_self_client, Some(true));
	}
}
