// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubedefError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Schema derivation failed: {0}")]
    SchemaDerivation(String),

    #[error("CRD '{0}' already exists")]
    AlreadyExists(String),

    #[error("apiVersion/kind mismatch: expected '{expected}', found '{found}'")]
    MetadataMismatch { expected: String, found: String },

    #[error("No attribute mapping for metadata key '{0}'")]
    UnknownMetadataKey(String),

    #[error("Object has no metadata.name")]
    MissingName,

    #[error("Watch stream failed: {message} (code {code})")]
    WatchFailed { message: String, code: u16 },

    #[error("JSON conversion failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KubedefError>;
