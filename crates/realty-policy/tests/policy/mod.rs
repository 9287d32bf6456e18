// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod accounts;
mod authorizer;
mod documents;
mod market;
mod properties;
mod support;
mod transactions;
