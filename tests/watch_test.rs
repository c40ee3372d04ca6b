// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch session decoding against a mock API server.

mod common;

use common::MockApiServer;
use futures::StreamExt;
use kubedef::error::KubedefError;
use kubedef::kubernetes::{ResourceClient, ResourceEvent};
use kubedef::types::{ApiConfig, TypedResource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct Widget {
    size: i32,
    color: String,
}

impl TypedResource for Widget {
    fn api_config() -> ApiConfig {
        ApiConfig::new("test.example.com", "v1")
    }
}

const WIDGETS_PATH: &str = "/apis/test.example.com/v1/namespaces/default/widgets";

fn widget_json(name: &str, resource_version: &str) -> Value {
    json!({
        "apiVersion": "test.example.com/v1",
        "kind": "Widget",
        "metadata": {
            "name": name,
            "namespace": "default",
            "resourceVersion": resource_version,
        },
        "spec": {"size": 3, "color": "blue"},
    })
}

fn watch_body(events: &[Value]) -> String {
    events.iter().map(|e| e.to_string() + "\n").collect()
}

fn watch_client(events: &[Value]) -> ResourceClient<Widget> {
    let server = MockApiServer::new().on_get(WIDGETS_PATH, 200, &watch_body(events));
    ResourceClient::namespaced(server.into_client(), "default")
}

#[tokio::test]
async fn test_watch_yields_each_change_in_order() {
    let widgets = watch_client(&[
        json!({"type": "ADDED", "object": widget_json("w", "1")}),
        json!({"type": "MODIFIED", "object": widget_json("w", "2")}),
        json!({"type": "DELETED", "object": widget_json("w", "3")}),
    ]);

    let mut session = widgets.watch().await.unwrap();

    let event = session.next_event().await.unwrap().unwrap();
    assert!(matches!(&event, ResourceEvent::Added(_)));
    assert_eq!(event.object().metadata.resource_version.as_deref(), Some("1"));

    let event = session.next_event().await.unwrap().unwrap();
    assert!(matches!(&event, ResourceEvent::Modified(_)));

    let event = session.next_event().await.unwrap().unwrap();
    assert!(matches!(&event, ResourceEvent::Deleted(_)));
    assert_eq!(event.action(), "DELETED");

    // window is over, and stays over
    assert!(session.next_event().await.unwrap().is_none());
    assert!(session.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn test_watch_skips_bookmarks() {
    let bookmark = json!({
        "type": "BOOKMARK",
        "object": {
            "apiVersion": "test.example.com/v1",
            "kind": "Widget",
            "metadata": {"resourceVersion": "5"},
        },
    });
    let widgets = watch_client(&[
        bookmark,
        json!({"type": "ADDED", "object": widget_json("w", "6")}),
    ]);

    let mut session = widgets.watch().await.unwrap();
    let event = session.next_event().await.unwrap().unwrap();
    assert_eq!(event.object().metadata.resource_version.as_deref(), Some("6"));
}

#[tokio::test]
async fn test_watch_error_event_ends_the_session() {
    let widgets = watch_client(&[
        json!({
            "type": "ERROR",
            "object": {
                "kind": "Status",
                "apiVersion": "v1",
                "metadata": {},
                "status": "Failure",
                "message": "too old resource version",
                "reason": "Expired",
                "code": 410,
            },
        }),
        json!({"type": "ADDED", "object": widget_json("w", "7")}),
    ]);

    let mut session = widgets.watch().await.unwrap();
    let err = session.next_event().await.unwrap_err();
    assert!(matches!(err, KubedefError::WatchFailed { code: 410, .. }));

    // the session is poisoned; later events are not surfaced
    assert!(session.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_event_aborts_the_session() {
    let mut wrong_kind = widget_json("w", "1");
    wrong_kind["kind"] = json!("Gadget");
    let widgets = watch_client(&[
        json!({"type": "ADDED", "object": wrong_kind}),
        json!({"type": "ADDED", "object": widget_json("w", "2")}),
    ]);

    let mut session = widgets.watch().await.unwrap();
    let err = session.next_event().await.unwrap_err();
    assert!(matches!(err, KubedefError::MetadataMismatch { .. }));
    assert!(session.next_event().await.unwrap().is_none());
}

#[tokio::test]
async fn test_into_stream_matches_pull_contract() {
    let widgets = watch_client(&[
        json!({"type": "ADDED", "object": widget_json("a", "1")}),
        json!({"type": "ADDED", "object": widget_json("b", "2")}),
    ]);

    let session = widgets.watch().await.unwrap();
    let events: Vec<_> = session.into_stream().collect().await;
    assert_eq!(events.len(), 2);
    let names: Vec<_> = events
        .into_iter()
        .map(|e| e.unwrap().into_object().metadata.name.unwrap())
        .collect();
    assert_eq!(names, ["a", "b"]);
}
