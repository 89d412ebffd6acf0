//! Mock AI service for testing

use async_trait::async_trait;
use fairway_api::AiRequest;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{AiError, AiResult, AiService};

/// Replays scripted responses in order and records every request
#[derive(Default)]
pub struct MockAiService {
    responses: Mutex<VecDeque<AiResult<Value>>>,
    requests: Mutex<Vec<AiRequest>>,
}

impl MockAiService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond_with(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    /// Queue a service failure carrying `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(AiError::Service(message.into())));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<AiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiService for MockAiService {
    async fn submit(&self, request: AiRequest) -> AiResult<Value> {
        let action = request.action();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AiError::Unsupported(format!("no scripted response for {}", action))))
    }
}
