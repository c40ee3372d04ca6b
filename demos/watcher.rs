// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Install the Resource CRD and log every change to its instances.
//!
//! Watch sessions are finite; when the server closes one, the loop simply
//! opens the next. The event handler takes its mutual-exclusion primitive
//! as an argument rather than reaching for process-global state.

use anyhow::{Context, Result};
use kube::Client;
use kubedef::kubernetes::{install, ResourceClient, ResourceEvent};
use kubedef::types::{ApiConfig, TypedResource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

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

#[derive(Debug, Default)]
struct Stats {
    seen: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let namespace =
        std::env::var("WATCH_NAMESPACE").unwrap_or_else(|_| "default".to_string());

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    install::<Resource>(&client, true).await?;
    info!("CRD installed, watching namespace {}", namespace);

    let stats = Arc::new(Mutex::new(Stats::default()));
    let resources = ResourceClient::<Resource>::namespaced(client, &namespace);

    loop {
        let mut session = resources.watch().await?;
        loop {
            match session.next_event().await {
                Ok(Some(event)) => handle_event(event, &stats).await,
                Ok(None) => {
                    info!("Watch window closed, reopening");
                    break;
                }
                Err(e) => {
                    warn!("Watch session failed: {}", e);
                    break;
                }
            }
        }
    }
}

async fn handle_event(event: ResourceEvent<Resource>, stats: &Mutex<Stats>) {
    let mut stats = stats.lock().await;
    stats.seen += 1;
    let object = event.object();
    info!(
        "{} resource {}/{} ({} events so far)",
        event.action(),
        object.metadata.namespace.clone().unwrap_or_default(),
        object.metadata.name.clone().unwrap_or_default(),
        stats.seen
    );
}
