// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! A small forum: Post objects live in the cluster, and a web page streams
//! every change over server-sent events.
//!
//! Run with `cargo run --example forum-webapp`, then open
//! http://localhost:8000/posts and create Post objects with kubectl.

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use futures::Stream;
use kube::Client;
use kubedef::kubernetes::{install, ResourceClient, WatchSession};
use kubedef::types::{ApiConfig, TypedResource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Post {
    pub id: String,
    pub user: String,
    pub content: String,
    pub published: bool,
    /// List of tags for the post
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TypedResource for Post {
    fn api_config() -> ApiConfig {
        ApiConfig::new("forum.example.com", "v1beta1")
    }
}

const PAGE: &str = r#"<html>
  <head>
    <title>Posts</title>
  </head>
  <body>
    <h1>Posts</h1>
    <ul id="posts"></ul>
    <script type="text/javascript">
      const source = new EventSource('/post-sse');
      source.onmessage = (message) => {
        const item = document.createElement('li');
        item.textContent = message.data;
        document.getElementById('posts').appendChild(item);
      };
    </script>
  </body>
</html>
"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;
    install::<Post>(&client, true).await?;

    let app = Router::new()
        .route("/posts", get(index))
        .route("/post-sse", get(post_events))
        .with_state(client);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
    info!("Serving forum on http://localhost:8000/posts");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(PAGE)
}

async fn post_events(
    State(client): State<Client>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let posts = ResourceClient::<Post>::namespaced(client, "default");
    Sse::new(post_stream(posts)).keep_alive(KeepAlive::default())
}

/// Emit one SSE event per Post change, reopening watch sessions as the
/// server closes them.
fn post_stream(
    posts: ResourceClient<Post>,
) -> impl Stream<Item = std::result::Result<Event, Infallible>> {
    futures::stream::unfold(
        (posts, None::<WatchSession<Post>>),
        |(posts, mut session)| async move {
            loop {
                let mut current = match session.take() {
                    Some(current) => current,
                    None => match posts.watch().await {
                        Ok(opened) => opened,
                        Err(e) => {
                            warn!("Failed to open watch: {}", e);
                            tokio::time::sleep(Duration::from_secs(5)).await;
                            continue;
                        }
                    },
                };
                match current.next_event().await {
                    Ok(Some(change)) => {
                        let payload = json!({
                            "happened": change.action(),
                            "object": change.object().raw(),
                        });
                        let event = Event::default().data(payload.to_string());
                        return Some((Ok(event), (posts, Some(current))));
                    }
                    Ok(None) => {
                        // window elapsed, open a fresh session
                    }
                    Err(e) => {
                        warn!("Watch session failed: {}", e);
                    }
                }
            }
        },
    )
}
