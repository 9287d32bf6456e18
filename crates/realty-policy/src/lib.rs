// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access-control policy engine for real-estate transaction records.
//!
//! This crate provides:
//! - Role and relationship predicates over agents, buyers and sellers
//! - Schema validators for proposed offers, negotiations and documents
//! - Per-document ACL evaluation
//! - A policy table mapping every governed collection to its rules
//! - Identity resolution with in-memory and caching resolvers
//! - An async [`Authorizer`] that fails closed and records every decision
//!
//! # Design
//!
//! The rules mirror those enforced by the document database that stores the
//! records. Evaluation is a pure function of three explicit inputs:
//!
//! - **Principal**: the resolved caller, or `None` when unauthenticated
//! - **Existing snapshot**: the record as currently stored
//! - **Proposed snapshot**: the record a write would store
//!
//! Nothing is read from ambient request state, so the same inputs always yield
//! the same [`Decision`].
//!
//! # Security Considerations
//!
//! - Denials carry a [`DenyReason`] for logs only; callers surface
//!   [`PolicyError::public_message`], which never reveals the failing rule
//! - Identity lookups are bounded and any failure reads as unauthenticated

pub mod abac;
pub mod audit;
pub mod authorizer;
pub mod cache;
pub mod error;
pub mod permissions;
pub mod record;
pub mod resolver;
pub mod schema;
pub mod tiers;
pub mod types;

pub use abac::{
	evaluate, is_allowed, policy_table, AccessRequest, Decision, DenyReason, PolicyFamily,
	PolicyOptions,
};
pub use audit::{DecisionOutcome, DecisionRecord, DecisionSink, RecordingSink, TracingSink};
pub use authorizer::{Authorizer, DEFAULT_RESOLVE_TIMEOUT};
pub use cache::{CachedResolver, ProfileState};
pub use error::{ParseError, PolicyError, ValidationError};
pub use permissions::{check_permission, DocumentPermission, PermissionSet};
pub use record::Record;
pub use resolver::{IdentityResolver, InMemoryResolver, ResolveError, SeedError};
pub use schema::{
	DocumentStatus, NegotiationStatus, NegotiationType, OfferStatus, OfferType, SchemaKind,
};
pub use tiers::{permission_tiers, PermissionTier, Tier};
pub use types::{Collection, Operation, Principal, PrincipalId, Profile, ResourceId, Role};
