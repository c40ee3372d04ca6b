// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod error;
pub mod kubernetes;
pub mod schema;
pub mod types;
