// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch sessions: a restartable, finite view of a resource watch stream.

use crate::error::{KubedefError, Result};
use crate::types::{ResourceObject, TypedResource};
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use kube::api::{DynamicObject, WatchEvent};
use std::marker::PhantomData;
use tracing::debug;

/// A change to a watched resource, paired with the decoded object.
#[derive(Debug)]
pub enum ResourceEvent<T> {
    Added(ResourceObject<T>),
    Modified(ResourceObject<T>),
    Deleted(ResourceObject<T>),
}

impl<T> ResourceEvent<T> {
    pub fn object(&self) -> &ResourceObject<T> {
        match self {
            ResourceEvent::Added(o) | ResourceEvent::Modified(o) | ResourceEvent::Deleted(o) => o,
        }
    }

    pub fn into_object(self) -> ResourceObject<T> {
        match self {
            ResourceEvent::Added(o) | ResourceEvent::Modified(o) | ResourceEvent::Deleted(o) => o,
        }
    }

    /// The change kind as the API server spells it.
    pub fn action(&self) -> &'static str {
        match self {
            ResourceEvent::Added(_) => "ADDED",
            ResourceEvent::Modified(_) => "MODIFIED",
            ResourceEvent::Deleted(_) => "DELETED",
        }
    }
}

/// One watch window over a resource collection.
///
/// A session ends when the server-side timeout elapses ([`next_event`]
/// returns `Ok(None)`) and is not resumed internally; the caller starts a
/// fresh session to continue. A decode failure or stream error ends the
/// session the same way, after surfacing the error once.
///
/// [`next_event`]: WatchSession::next_event
pub struct WatchSession<T> {
    events: BoxStream<'static, kube::Result<WatchEvent<DynamicObject>>>,
    finished: bool,
    _resource: PhantomData<T>,
}

impl<T: TypedResource> WatchSession<T> {
    pub(crate) fn new(events: BoxStream<'static, kube::Result<WatchEvent<DynamicObject>>>) -> Self {
        Self {
            events,
            finished: false,
            _resource: PhantomData,
        }
    }

    /// Pull the next change from this session.
    ///
    /// Bookmark events are skipped. `Ok(None)` marks the end of the window.
    pub async fn next_event(&mut self) -> Result<Option<ResourceEvent<T>>> {
        if self.finished {
            return Ok(None);
        }
        while let Some(item) = self.events.next().await {
            let event = match item {
                Ok(event) => event,
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            };
            match event {
                WatchEvent::Added(obj) => {
                    return self.decode(obj).map(|o| Some(ResourceEvent::Added(o)))
                }
                WatchEvent::Modified(obj) => {
                    return self.decode(obj).map(|o| Some(ResourceEvent::Modified(o)))
                }
                WatchEvent::Deleted(obj) => {
                    return self.decode(obj).map(|o| Some(ResourceEvent::Deleted(o)))
                }
                WatchEvent::Bookmark(_) => {
                    debug!("Skipping bookmark event");
                }
                WatchEvent::Error(status) => {
                    self.finished = true;
                    return Err(KubedefError::WatchFailed {
                        message: status.message,
                        code: status.code,
                    });
                }
            }
        }
        self.finished = true;
        Ok(None)
    }

    /// Adapt this session into a stream of events.
    ///
    /// The stream yields at most one `Err` item and ends after it, matching
    /// the pull-based contract.
    pub fn into_stream(self) -> impl Stream<Item = Result<ResourceEvent<T>>> {
        futures::stream::unfold(self, |mut session| async move {
            match session.next_event().await {
                Ok(Some(event)) => Some((Ok(event), session)),
                Ok(None) => None,
                Err(e) => Some((Err(e), session)),
            }
        })
    }

    fn decode(&mut self, obj: DynamicObject) -> Result<ResourceObject<T>> {
        let decoded = serde_json::to_value(&obj)
            .map_err(KubedefError::from)
            .and_then(ResourceObject::from_json);
        if decoded.is_err() {
            // a malformed event poisons the whole session
            self.finished = true;
        }
        decoded
    }
}
