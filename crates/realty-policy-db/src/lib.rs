// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite profile storage for the realty policy engine.
//!
//! [`SqliteProfileStore`] persists principal profiles and implements
//! [`realty_policy::IdentityResolver`] so it can back an
//! [`realty_policy::Authorizer`] directly.

pub mod error;
pub mod pool;
pub mod profile;
pub mod testing;

pub use error::{DbError, Result};
pub use pool::{create_pool, run_migrations};
pub use profile::{ProfileStore, SqliteProfileStore};
