// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! RFC-1123 object name sanitization and synthesis.

use crate::types::TypedResource;
use kube::api::ObjectMeta;
use serde_json::Value;
use uuid::Uuid;

/// Sanitize an arbitrary string into an RFC-1123 object name.
///
/// Every maximal run of characters outside `[A-Za-z0-9]` collapses into a
/// single hyphen and the result is lowercased; hyphens never start or end
/// the output. Idempotent: sanitizing a sanitized name is a no-op.
pub fn sanitize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

/// Resolve the `metadata.name` to use when creating an instance.
///
/// An explicit `metadata.name` wins unchanged; otherwise a `name` field on
/// the spec is sanitized; otherwise a `{singular}-{uuid}` name is
/// synthesized.
pub(crate) fn object_name<T: TypedResource>(metadata: &ObjectMeta, spec: &Value) -> String {
    if let Some(name) = &metadata.name {
        return name.clone();
    }
    if let Some(name) = spec.get("name").and_then(Value::as_str) {
        let sanitized = sanitize_name(name);
        if !sanitized.is_empty() {
            return sanitized;
        }
    }
    sanitize_name(&format!("{}-{}", T::singular(), Uuid::new_v4()))
}
