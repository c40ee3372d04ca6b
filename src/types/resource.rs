// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed custom resources: API coordinates, the resource trait, and instances.

use crate::error::{KubedefError, Result};
use crate::kubernetes::meta;
use kube::api::ObjectMeta;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

/// Whether instances of a resource live in a namespace or cluster-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Namespaced,
    Cluster,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Namespaced => "Namespaced",
            Scope::Cluster => "Cluster",
        }
    }
}

/// API coordinates for a custom resource type.
///
/// The plural defaults to `{lowercased kind}s`; irregular plurals are not
/// inferred and must be set explicitly with [`ApiConfig::with_plural`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub group: String,
    pub version: String,
    pub scope: Scope,
    pub plural: Option<String>,
}

impl ApiConfig {
    pub fn new(group: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            scope: Scope::default(),
            plural: None,
        }
    }

    pub fn cluster_scoped(mut self) -> Self {
        self.scope = Scope::Cluster;
        self
    }

    pub fn with_plural(mut self, plural: &str) -> Self {
        self.plural = Some(plural.to_string());
        self
    }
}

/// A Rust type that maps to a Kubernetes custom resource.
///
/// The type itself describes the `spec` of the resource; its schema comes
/// from the [`JsonSchema`] implementation and its API coordinates from
/// [`TypedResource::api_config`]. The kind is the schemars schema name.
pub trait TypedResource: JsonSchema + Serialize + DeserializeOwned {
    fn api_config() -> ApiConfig;

    fn kind() -> String {
        Self::schema_name()
    }

    fn singular() -> String {
        Self::kind().to_lowercase()
    }

    fn plural() -> String {
        Self::api_config()
            .plural
            .unwrap_or_else(|| format!("{}s", Self::singular()))
    }

    fn group() -> String {
        Self::api_config().group
    }

    fn version() -> String {
        Self::api_config().version
    }

    fn scope() -> Scope {
        Self::api_config().scope
    }

    fn api_version() -> String {
        format!("{}/{}", Self::group(), Self::version())
    }
}

/// An instance of a typed resource together with its object metadata.
#[derive(Debug, Clone)]
pub struct ResourceObject<T> {
    pub metadata: ObjectMeta,
    pub spec: T,
    raw: Option<Value>,
}

impl<T: TypedResource> ResourceObject<T> {
    /// Wrap a spec value with empty metadata, ready for a create call.
    pub fn new(spec: T) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec,
            raw: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.metadata.name = Some(name.to_string());
        self
    }

    /// Build an instance from the wire JSON of a cluster response.
    ///
    /// The object's `apiVersion` and `kind` must match the type's API
    /// coordinates; its metadata keys are reverse-mapped through the
    /// attribute table. The original JSON is retained and available via
    /// [`ResourceObject::raw`].
    pub fn from_json(value: Value) -> Result<Self> {
        let expected = Self::type_label();
        let api_version = value
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let kind = value.get("kind").and_then(Value::as_str).unwrap_or_default();
        if api_version != T::api_version() || kind != T::kind() {
            return Err(KubedefError::MetadataMismatch {
                expected,
                found: format!("{api_version}/{kind}"),
            });
        }

        let metadata = match value.get("metadata").and_then(Value::as_object) {
            Some(wire) => meta::to_object_meta(wire)?,
            None => ObjectMeta::default(),
        };

        let spec: T = serde_json::from_value(value.get("spec").cloned().unwrap_or(Value::Null))?;

        Ok(Self {
            metadata,
            spec,
            raw: Some(value),
        })
    }

    /// Serialize to the wire shape `{kind, apiVersion, metadata, spec}`.
    pub fn to_json(&self) -> Result<Value> {
        Ok(json!({
            "apiVersion": T::api_version(),
            "kind": T::kind(),
            "metadata": Value::Object(meta::to_wire(&self.metadata)?),
            "spec": serde_json::to_value(&self.spec)?,
        }))
    }

    /// The raw JSON this instance was parsed from, if any.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    fn type_label() -> String {
        format!("{}/{}", T::api_version(), T::kind())
    }
}
