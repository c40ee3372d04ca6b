// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bidirectional mapping between ObjectMeta wire keys and attribute names.

use crate::error::{KubedefError, Result};
use kube::api::ObjectMeta;
use serde_json::{Map, Value};

/// Canonical attribute-name → wire-key table for `ObjectMeta`.
///
/// Lookups in the wire→attribute direction use the reverse of this table.
const ATTRIBUTE_MAP: &[(&str, &str)] = &[
    ("annotations", "annotations"),
    ("creation_timestamp", "creationTimestamp"),
    ("deletion_grace_period_seconds", "deletionGracePeriodSeconds"),
    ("deletion_timestamp", "deletionTimestamp"),
    ("finalizers", "finalizers"),
    ("generate_name", "generateName"),
    ("generation", "generation"),
    ("labels", "labels"),
    ("managed_fields", "managedFields"),
    ("name", "name"),
    ("namespace", "namespace"),
    ("owner_references", "ownerReferences"),
    ("resource_version", "resourceVersion"),
    ("self_link", "selfLink"),
    ("uid", "uid"),
];

/// Look up the wire key for an attribute name.
pub fn wire_key(attribute: &str) -> Option<&'static str> {
    ATTRIBUTE_MAP
        .iter()
        .find(|(attr, _)| *attr == attribute)
        .map(|(_, key)| *key)
}

/// Look up the attribute name for a wire key.
pub fn attribute_name(key: &str) -> Option<&'static str> {
    ATTRIBUTE_MAP
        .iter()
        .find(|(_, wire)| *wire == key)
        .map(|(attr, _)| *attr)
}

/// Build an `ObjectMeta` from the `metadata` object of a wire JSON response.
///
/// Every key present must resolve through the attribute table; an unmapped
/// key fails the whole conversion with `UnknownMetadataKey`.
pub fn to_object_meta(wire: &Map<String, Value>) -> Result<ObjectMeta> {
    let mut meta = ObjectMeta::default();
    for (key, value) in wire {
        let attribute = attribute_name(key)
            .ok_or_else(|| KubedefError::UnknownMetadataKey(key.clone()))?;
        set_attribute(&mut meta, attribute, value)?;
    }
    Ok(meta)
}

/// Serialize an `ObjectMeta` back to its wire representation.
///
/// Only attributes that are set are emitted, so a value constructed by
/// [`to_object_meta`] round-trips to exactly the keys it was built from.
pub fn to_wire(meta: &ObjectMeta) -> Result<Map<String, Value>> {
    let mut wire = Map::new();
    put(&mut wire, "annotations", &meta.annotations)?;
    put(&mut wire, "creation_timestamp", &meta.creation_timestamp)?;
    put(
        &mut wire,
        "deletion_grace_period_seconds",
        &meta.deletion_grace_period_seconds,
    )?;
    put(&mut wire, "deletion_timestamp", &meta.deletion_timestamp)?;
    put(&mut wire, "finalizers", &meta.finalizers)?;
    put(&mut wire, "generate_name", &meta.generate_name)?;
    put(&mut wire, "generation", &meta.generation)?;
    put(&mut wire, "labels", &meta.labels)?;
    put(&mut wire, "managed_fields", &meta.managed_fields)?;
    put(&mut wire, "name", &meta.name)?;
    put(&mut wire, "namespace", &meta.namespace)?;
    put(&mut wire, "owner_references", &meta.owner_references)?;
    put(&mut wire, "resource_version", &meta.resource_version)?;
    put(&mut wire, "self_link", &meta.self_link)?;
    put(&mut wire, "uid", &meta.uid)?;
    Ok(wire)
}

fn set_attribute(meta: &mut ObjectMeta, attribute: &str, value: &Value) -> Result<()> {
    let value = value.clone();
    match attribute {
        "annotations" => meta.annotations = serde_json::from_value(value)?,
        "creation_timestamp" => meta.creation_timestamp = serde_json::from_value(value)?,
        "deletion_grace_period_seconds" => {
            meta.deletion_grace_period_seconds = serde_json::from_value(value)?
        }
        "deletion_timestamp" => meta.deletion_timestamp = serde_json::from_value(value)?,
        "finalizers" => meta.finalizers = serde_json::from_value(value)?,
        "generate_name" => meta.generate_name = serde_json::from_value(value)?,
        "generation" => meta.generation = serde_json::from_value(value)?,
        "labels" => meta.labels = serde_json::from_value(value)?,
        "managed_fields" => meta.managed_fields = serde_json::from_value(value)?,
        "name" => meta.name = serde_json::from_value(value)?,
        "namespace" => meta.namespace = serde_json::from_value(value)?,
        "owner_references" => meta.owner_references = serde_json::from_value(value)?,
        "resource_version" => meta.resource_version = serde_json::from_value(value)?,
        "self_link" => meta.self_link = serde_json::from_value(value)?,
        "uid" => meta.uid = serde_json::from_value(value)?,
        // attribute_name only returns names from the table
        _ => unreachable!("attribute '{attribute}' missing from table"),
    }
    Ok(())
}

fn put<V: serde::Serialize>(
    wire: &mut Map<String, Value>,
    attribute: &str,
    value: &Option<V>,
) -> Result<()> {
    if let Some(value) = value {
        // every attribute in ObjectMeta has an entry in the table
        let key = wire_key(attribute).expect("attribute missing from table");
        wire.insert(key.to_string(), serde_json::to_value(value)?);
    }
    Ok(())
}
