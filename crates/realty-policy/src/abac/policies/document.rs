// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Document policy: role rules combined with the embedded ACL.

use crate::abac::predicates::{has_resource_access, require_listed, require_party};
use crate::abac::{AccessRequest, Check, DenyReason, PolicyOptions};
use crate::permissions::{DocumentPermission, PermissionSet};
use crate::schema::{self, SchemaKind};
use crate::types::{Operation, Principal};

/// Evaluates access to the `documents` collection.
///
/// Reads succeed for anyone in `canView`, for public documents, and for the
/// document's agent/client relationship. Edits and deletes are ACL-only.
pub fn evaluate(principal: &Principal, request: &AccessRequest, options: &PolicyOptions) -> Check {
	match request.operation {
		Operation::Read => {
			let existing = request.existing()?;
			let acl = PermissionSet::from_record(existing);
			if acl.allows(principal.id.as_str(), DocumentPermission::CanView)
				|| has_resource_access(
					Some(principal),
					existing.agent_id(),
					existing.client_id(),
					options,
				) {
				Ok(())
			} else {
				Err(DenyReason::NotInAcl {
					permission: DocumentPermission::CanView,
				})
			}
		}
		Operation::Create => {
			let proposed = request.proposed()?;
			schema::validate(SchemaKind::Document, proposed)?;
			require_party(principal, proposed)
		}
		Operation::Update => {
			require_listed(principal, request.existing()?, DocumentPermission::CanEdit)?;
			schema::validate(SchemaKind::Document, request.proposed()?)?;
			Ok(())
		}
		Operation::Delete => {
			require_listed(principal, request.existing()?, DocumentPermission::CanDelete)
		}
	}
}
