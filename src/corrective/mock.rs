use std::sync::Mutex;

use async_trait::async_trait;

use super::error::OracleError;
use super::oracle::RelevanceOracle;

type ReplyFn = Box<dyn Fn(&str) -> Result<String, OracleError> + Send + Sync>;

/// Scripted [`RelevanceOracle`] for tests.
///
/// Replies are chosen by the prompt text, so a test can route each document to its
/// own score or failure by matching on a marker in the document content.
pub struct MockOracle {
    reply_fn: ReplyFn,
    prompts: Mutex<Vec<String>>,
}

impl std::fmt::Debug for MockOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockOracle")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl MockOracle {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<String, OracleError> + Send + Sync + 'static,
    {
        Self {
            reply_fn: Box::new(f),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always replies with `reply`.
    pub fn constant(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self::from_fn(move |_| Ok(reply.clone()))
    }

    /// Replies with the score of the first `(marker, score)` whose marker appears in the
    /// prompt; prompts matching no marker get `default_reply`.
    pub fn by_marker<I, S>(scores: I, default_reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let table: Vec<(String, u32)> = scores.into_iter().map(|(m, s)| (m.into(), s)).collect();
        let default_reply = default_reply.into();
        Self::from_fn(move |prompt| {
            Ok(table
                .iter()
                .find(|(marker, _)| prompt.contains(marker.as_str()))
                .map(|(_, score)| score.to_string())
                .unwrap_or_else(|| default_reply.clone()))
        })
    }

    /// Fails every call.
    pub fn failing() -> Self {
        Self::from_fn(|_| {
            Err(OracleError::Unavailable {
                reason: "injected failure".to_string(),
            })
        })
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().expect("lock poisoned").len()
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl RelevanceOracle for MockOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        self.prompts
            .lock()
            .expect("lock poisoned")
            .push(prompt.to_string());
        (self.reply_fn)(prompt)
    }
}
