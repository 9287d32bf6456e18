// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-family policy modules.
//!
//! Every function here receives an authenticated principal; the engine denies
//! anonymous callers before dispatching.

pub mod account;
pub mod document;
pub mod market;
pub mod transaction;
