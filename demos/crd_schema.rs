// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Define a minimal custom resource type and print its CRD document.
//!
//! Run with `cargo run --example crd-schema`; the output can be piped
//! straight into `kubectl apply -f -`.

use kubedef::kubernetes::{crd_yaml, SchemaStyle};
use kubedef::types::{ApiConfig, TypedResource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// regroup multiple resources
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TypedResource for Resource {
    fn api_config() -> ApiConfig {
        ApiConfig::new("example.com", "v1alpha1")
    }
}

fn main() -> anyhow::Result<()> {
    print!("{}", crd_yaml::<Resource>(SchemaStyle::Wrapped)?);
    Ok(())
}
