// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! OpenAPI-v3 schema derivation, delegated to schemars.

use crate::error::{KubedefError, Result};
use schemars::gen::SchemaSettings;
use schemars::schema::{InstanceType, SchemaObject, SingleOrVec};
use schemars::JsonSchema;
use serde_json::Value;

/// Derive a self-contained OpenAPI-v3 schema for `T`.
///
/// Subschemas are inlined so the result carries no `$ref` entries; the
/// returned value is the schema object itself, without a `$schema` key.
/// A CRD validation schema must describe an object, so any type whose
/// derived root schema is not an object is rejected.
pub fn derive_schema<T: JsonSchema>() -> Result<Value> {
    let settings = SchemaSettings::openapi3().with(|s| {
        s.inline_subschemas = true;
    });
    let root = settings.into_generator().into_root_schema_for::<T>();

    if !is_object_schema(&root.schema) {
        return Err(KubedefError::SchemaDerivation(format!(
            "derived schema for '{}' is not an object type",
            T::schema_name()
        )));
    }

    Ok(serde_json::to_value(&root.schema)?)
}

/// Render the derived schema for `T` as a JSON string.
pub fn schema_json<T: JsonSchema>() -> Result<String> {
    Ok(serde_json::to_string(&derive_schema::<T>()?)?)
}

/// Render the derived schema for `T` as YAML.
pub fn schema_yaml<T: JsonSchema>() -> Result<String> {
    Ok(serde_yaml::to_string(&derive_schema::<T>()?)?)
}

fn is_object_schema(schema: &SchemaObject) -> bool {
    match &schema.instance_type {
        Some(SingleOrVec::Single(t)) => **t == InstanceType::Object,
        Some(SingleOrVec::Vec(ts)) => ts.contains(&InstanceType::Object),
        None => schema.object.is_some(),
    }
}
