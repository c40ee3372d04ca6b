// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed pass-through client for custom resource instances.

use crate::error::{KubedefError, Result};
use crate::kubernetes::names;
use crate::kubernetes::watch::WatchSession;
use crate::types::{ResourceObject, TypedResource};
use futures::StreamExt;
use kube::api::{
    DeleteParams, DynamicObject, ListParams, Patch, PatchParams, PostParams, WatchParams,
};
use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;
use kube::{Api, Client};
use serde_json::json;
use std::marker::PhantomData;
use tracing::debug;

/// Object lifecycle operations for one resource type.
///
/// Every call is a single pass-through to the API server; there are no
/// retries and no caching. Transient failures surface unchanged and retry
/// policy belongs to the caller.
pub struct ResourceClient<T> {
    api: Api<DynamicObject>,
    _resource: PhantomData<T>,
}

impl<T: TypedResource> ResourceClient<T> {
    /// A client scoped to one namespace.
    pub fn namespaced(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced_with(client, namespace, &Self::api_resource()),
            _resource: PhantomData,
        }
    }

    /// A client over the whole cluster, for cluster-scoped resources or
    /// cross-namespace watches.
    pub fn all(client: Client) -> Self {
        Self {
            api: Api::all_with(client, &Self::api_resource()),
            _resource: PhantomData,
        }
    }

    /// Create the instance, resolving its object name first.
    ///
    /// An explicit `metadata.name` is used as-is; otherwise a `name` field
    /// on the spec is sanitized into an RFC-1123 name; otherwise a
    /// `{singular}-{uuid}` name is synthesized.
    pub async fn create(&self, object: &ResourceObject<T>) -> Result<ResourceObject<T>> {
        let mut body = object.to_json()?;
        let name = names::object_name::<T>(&object.metadata, &body["spec"]);
        debug!("Creating {} '{}'", T::kind(), name);
        body["metadata"]["name"] = json!(name);

        let body: DynamicObject = serde_json::from_value(body)?;
        let created = self.api.create(&PostParams::default(), &body).await?;
        self.decode(created)
    }

    /// Merge-patch the instance's `spec`; metadata is never patched.
    pub async fn patch(&self, object: &ResourceObject<T>) -> Result<ResourceObject<T>> {
        let name = object
            .metadata
            .name
            .clone()
            .ok_or(KubedefError::MissingName)?;
        let body = json!({ "spec": serde_json::to_value(&object.spec)? });

        debug!("Patching {} '{}'", T::kind(), name);
        let patched = self
            .api
            .patch(&name, &PatchParams::default(), &Patch::Merge(&body))
            .await?;
        self.decode(patched)
    }

    pub async fn get(&self, name: &str) -> Result<ResourceObject<T>> {
        let found = self.api.get(name).await?;
        self.decode(found)
    }

    pub async fn list(&self) -> Result<Vec<ResourceObject<T>>> {
        let objects = self.api.list(&ListParams::default()).await?;
        objects.items.into_iter().map(|o| self.decode(o)).collect()
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        debug!("Deleting {} '{}'", T::kind(), name);
        self.api.delete(name, &DeleteParams::default()).await?;
        Ok(())
    }

    /// Open a watch session starting from the beginning of history.
    pub async fn watch(&self) -> Result<WatchSession<T>> {
        self.watch_from("0").await
    }

    /// Open a watch session from a known resource version.
    ///
    /// The session is finite: it ends when the server-side timeout elapses,
    /// and continuing means opening a new session.
    pub async fn watch_from(&self, resource_version: &str) -> Result<WatchSession<T>> {
        debug!("Watching {} from resource version {}", T::plural(), resource_version);
        let events = self
            .api
            .watch(&WatchParams::default(), resource_version)
            .await?;
        Ok(WatchSession::new(events.boxed()))
    }

    fn decode(&self, obj: DynamicObject) -> Result<ResourceObject<T>> {
        ResourceObject::from_json(serde_json::to_value(&obj)?)
    }

    fn api_resource() -> ApiResource {
        let gvk = GroupVersionKind::gvk(&T::group(), &T::version(), &T::kind());
        ApiResource::from_gvk_with_plural(&gvk, &T::plural())
    }
}

impl<T: TypedResource> std::fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &T::kind())
            .field("scope", &T::scope())
            .finish()
    }
}
