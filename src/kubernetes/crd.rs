// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD document assembly and cluster installation.

use crate::error::{KubedefError, Result};
use crate::schema::derive_schema;
use crate::types::TypedResource;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
    CustomResourceDefinitionVersion, CustomResourceValidation, JSONSchemaProps,
};
use kube::api::{ObjectMeta, PostParams};
use kube::{Api, Client};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// How the derived spec schema is placed into `openAPIV3Schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStyle {
    /// Nest the schema under `{type: object, properties: {spec: ...}}` so it
    /// validates the `spec` sub-document of stored objects. This is the
    /// style [`install`] uses.
    Wrapped,
    /// Use the derived schema directly as the whole `openAPIV3Schema`.
    Inline,
}

/// Assemble the CustomResourceDefinition document for `T`.
///
/// The document has `metadata.name = {plural}.{group}` and a single version
/// entry that is both served and stored. Serialization is deterministic for
/// a given type, so reapplying the rendered document is diff-free.
pub fn build_crd<T: TypedResource>(style: SchemaStyle) -> Result<CustomResourceDefinition> {
    let schema = derive_schema::<T>()?;
    let props: JSONSchemaProps = serde_json::from_value(schema)?;
    let open_api_v3_schema = match style {
        SchemaStyle::Wrapped => JSONSchemaProps {
            type_: Some("object".to_string()),
            properties: Some(BTreeMap::from([("spec".to_string(), props)])),
            ..Default::default()
        },
        SchemaStyle::Inline => props,
    };

    let group = T::group();
    let plural = T::plural();

    Ok(CustomResourceDefinition {
        metadata: ObjectMeta {
            name: Some(format!("{plural}.{group}")),
            ..Default::default()
        },
        spec: CustomResourceDefinitionSpec {
            group,
            scope: T::scope().as_str().to_string(),
            names: CustomResourceDefinitionNames {
                kind: T::kind(),
                singular: Some(T::singular()),
                plural,
                ..Default::default()
            },
            versions: vec![CustomResourceDefinitionVersion {
                name: T::version(),
                served: true,
                storage: true,
                schema: Some(CustomResourceValidation {
                    open_api_v3_schema: Some(open_api_v3_schema),
                }),
                ..Default::default()
            }],
            ..Default::default()
        },
        status: None,
    })
}

/// Render the CRD document for `T` as YAML.
pub fn crd_yaml<T: TypedResource>(style: SchemaStyle) -> Result<String> {
    Ok(serde_yaml::to_string(&build_crd::<T>(style)?)?)
}

/// Render the CRD document for `T` as JSON.
pub fn crd_json<T: TypedResource>(style: SchemaStyle) -> Result<String> {
    Ok(serde_json::to_string(&build_crd::<T>(style)?)?)
}

/// Install the CRD for `T` into the cluster.
///
/// A conflict (the CRD already exists) counts as success when `exist_ok` is
/// set, and fails with `AlreadyExists` otherwise. An existing CRD is never
/// diffed or updated; changing the type and reinstalling does not change
/// what the cluster serves.
#[instrument(skip(client))]
pub async fn install<T: TypedResource>(client: &Client, exist_ok: bool) -> Result<()> {
    let crd = build_crd::<T>(SchemaStyle::Wrapped)?;
    let name = crd.metadata.name.clone().unwrap_or_default();
    let api: Api<CustomResourceDefinition> = Api::all(client.clone());

    match api.create(&PostParams::default(), &crd).await {
        Ok(_) => {
            info!("Installed CRD {}", name);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 409 => {
            if exist_ok {
                debug!("CRD {} already exists", name);
                Ok(())
            } else {
                Err(KubedefError::AlreadyExists(name))
            }
        }
        Err(e) => Err(e.into()),
    }
}
