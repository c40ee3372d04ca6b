// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Type-level description of custom resources.

pub mod resource;

pub use resource::{ApiConfig, ResourceObject, Scope, TypedResource};
