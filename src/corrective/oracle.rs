use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::debug;

use crate::constants::{ORACLE_CONTENT_PREFIX, ORACLE_QUERY_PREFIX};
use crate::document::truncate_chars;

use super::error::OracleError;

/// Default model used for relevance grading.
pub const DEFAULT_ORACLE_MODEL: &str = "llama3.2:3b";

/// Tokens the oracle may spend on a reply; a score needs at most a handful.
const MAX_REPLY_TOKENS: u32 = 8;

/// Free-text completion service used to grade relevance.
///
/// The only contract on the reply is that it may carry an integer near the front.
#[async_trait]
pub trait RelevanceOracle: Send + Sync {
    /// Completes `prompt` and returns the raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, OracleError>;
}

/// Builds the grading prompt for one (query, document) pair.
///
/// The query is cut to 200 characters and the document to 300.
pub fn grading_prompt(query: &str, content: &str) -> String {
    format!(
        "Rate how relevant the document is to the question on a scale from 0 to 100.\n\
         Question: {}\n\
         Document: {}\n\
         Reply with a single integer only.\n\
         Score:",
        truncate_chars(query, ORACLE_QUERY_PREFIX),
        truncate_chars(content, ORACLE_CONTENT_PREFIX),
    )
}

/// [`RelevanceOracle`] backed by any chat model `genai` can reach (Ollama, OpenAI, ...).
#[derive(Clone)]
pub struct GenaiOracle {
    client: Client,
    model: String,
    options: ChatOptions,
}

impl std::fmt::Debug for GenaiOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiOracle")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenaiOracle {
    /// Creates an oracle for `model` using the default `genai` client (provider is
    /// resolved from the model name; unknown names go to a local Ollama).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_client(Client::default(), model)
    }

    pub fn with_client(client: Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default()
                .with_temperature(0.0)
                .with_max_tokens(MAX_REPLY_TOKENS),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl RelevanceOracle for GenaiOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);

        let response = self
            .client
            .exec_chat(&self.model, request, Some(&self.options))
            .await
            .map_err(|e| OracleError::RequestFailed {
                model: self.model.clone(),
                reason: e.to_string(),
            })?;

        let reply = response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| OracleError::EmptyReply {
                model: self.model.clone(),
            })?;

        debug!(model = %self.model, reply_len = reply.len(), "Oracle replied");

        Ok(reply)
    }
}
