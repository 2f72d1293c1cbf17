//! Scripted transport for tests.

use crate::{Error, Model, Request, Response, Result};
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc, time::Duration};

/// A model that replays queued responses and records every request.
///
/// Clones share the same script.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<Result<Response>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
    delay: Option<Duration>,
}

impl Scripted {
    /// Create a model replaying the given responses in order
    pub fn new(replies: impl IntoIterator<Item = Response>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Ok).collect())),
            ..Default::default()
        }
    }

    /// Queue a failure
    pub fn fail(&self, error: Error) {
        self.replies.lock().push_back(Err(error));
    }

    /// Wait before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The requests received so far
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Number of queued responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }
}

impl Model for Scripted {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.requests.lock().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .pop_front()
            .unwrap_or(Err(Error::NoResponse))
    }
}
