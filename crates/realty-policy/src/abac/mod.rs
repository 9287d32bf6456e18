// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute-based access control for the governed collections.
//!
//! - [`evaluate`] / [`is_allowed`]: the decision procedure
//! - [`predicates`]: named role and relationship predicates
//! - [`PolicyFamily`] / [`policy_table`]: which rules apply to which collection
//! - [`AccessRequest`], [`Decision`], [`DenyReason`], [`PolicyOptions`]: evaluation types

mod engine;
pub mod policies;
pub mod predicates;
mod table;
mod types;

pub use engine::{evaluate, is_allowed};
pub use table::{policy_table, PolicyFamily};
pub use types::{AccessRequest, Check, Decision, DenyReason, PolicyOptions};
