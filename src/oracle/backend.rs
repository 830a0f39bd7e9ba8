//! Oracle backends.
//!
//! `GenaiOracle` calls a hosted model through `genai`. `DisabledOracle` refuses every
//! call. `MockOracle` replays scripted replies for tests.

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error};

use super::config::OracleConfig;
use super::error::{OracleError, OracleResult};

#[async_trait]
/// Opaque text-in/text-out matcher.
pub trait Oracle: Send + Sync {
    /// Backend label used in logs and errors.
    fn name(&self) -> &str;
    /// Sends `system` instructions plus a `user` payload and returns the raw reply text.
    async fn query(&self, system: &str, user: &str) -> OracleResult<String>;
}

/// Models that reject a separate system message.
const SYSTEMLESS_MODEL_PREFIX: &str = "o1-";

/// Splits prompts into `(system, user)` messages for `model`.
///
/// Models without system-message support get the instructions prepended to the user
/// message instead.
pub fn fold_prompts(model: &str, system: &str, user: &str) -> (Option<String>, String) {
    if model.starts_with(SYSTEMLESS_MODEL_PREFIX) {
        (None, format!("{system}\n\n{user}"))
    } else {
        (Some(system.to_string()), user.to_string())
    }
}

/// Hosted model backend.
pub struct GenaiOracle {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl std::fmt::Debug for GenaiOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiOracle")
            .field("model", &self.model)
            .finish()
    }
}

impl GenaiOracle {
    pub fn new(config: &OracleConfig) -> Self {
        let options = ChatOptions::default()
            .with_temperature(config.temperature as f64)
            .with_max_tokens(config.max_tokens);

        Self {
            client: Client::default(),
            model: config.model().to_string(),
            options,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Oracle for GenaiOracle {
    fn name(&self) -> &str {
        &self.model
    }

    async fn query(&self, system: &str, user: &str) -> OracleResult<String> {
        let (system, user) = fold_prompts(&self.model, system, user);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(user));

        debug!(model = %self.model, "Sending oracle request");

        let response = self
            .client
            .exec_chat(&self.model, ChatRequest::new(messages), Some(&self.options))
            .await
            .map_err(|e| {
                error!(model = %self.model, "Oracle provider error: {}", e);
                OracleError::Request {
                    model: self.model.clone(),
                    reason: e.to_string(),
                }
            })?;

        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(OracleError::EmptyResponse {
                model: self.model.clone(),
            }),
        }
    }
}

/// Backend used when no provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledOracle;

#[async_trait]
impl Oracle for DisabledOracle {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn query(&self, _system: &str, _user: &str) -> OracleResult<String> {
        Err(OracleError::Unsupported {
            backend: self.name().to_string(),
        })
    }
}

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockOracle, RecordedCall};

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::Oracle;
    use crate::oracle::error::{OracleError, OracleResult};

    /// One recorded oracle call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub system: String,
        pub user: String,
    }

    #[derive(Debug, Clone, Default)]
    /// Replays queued replies in order; fails once the queue is empty.
    pub struct MockOracle {
        replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl MockOracle {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_reply(self, reply: impl Into<String>) -> Self {
            self.push_reply(reply);
            self
        }

        pub fn with_failure(self, reason: impl Into<String>) -> Self {
            self.replies.lock().push_back(Err(reason.into()));
            self
        }

        pub fn push_reply(&self, reply: impl Into<String>) {
            self.replies.lock().push_back(Ok(reply.into()));
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl Oracle for MockOracle {
        fn name(&self) -> &str {
            "mock"
        }

        async fn query(&self, system: &str, user: &str) -> OracleResult<String> {
            self.calls.lock().push(RecordedCall {
                system: system.to_string(),
                user: user.to_string(),
            });

            match self.replies.lock().pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(reason)) => Err(OracleError::Request {
                    model: "mock".to_string(),
                    reason,
                }),
                None => Err(OracleError::EmptyResponse {
                    model: "mock".to_string(),
                }),
            }
        }
    }
}
