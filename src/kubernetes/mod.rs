// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes-facing pieces: CRD assembly, metadata mapping, and the
//! typed object client.

pub mod client;
pub mod crd;
pub mod meta;
pub mod names;
pub mod watch;

pub use client::ResourceClient;
pub use crd::{build_crd, crd_json, crd_yaml, install, SchemaStyle};
pub use names::sanitize_name;
pub use watch::{ResourceEvent, WatchSession};
