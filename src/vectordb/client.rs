use qdrant_client::Qdrant;
use qdrant_client::qdrant::{Condition, Filter, RetrievedPoint, ScrollPointsBuilder};

use super::error::VectorDbError;

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantClient {
    client: Qdrant,
    url: String,
}

impl QdrantClient {
    /// Creates a client for `url`.
    pub fn new(url: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Lists up to `limit` points whose keyword `field` equals `value`, with payload.
    pub async fn scroll_matching(
        &self,
        collection: &str,
        field: &str,
        value: &str,
        limit: u32,
    ) -> Result<Vec<RetrievedPoint>, VectorDbError> {
        let filter = Filter::must([Condition::matches(field, value.to_string())]);

        let response = self
            .client
            .scroll(
                ScrollPointsBuilder::new(collection)
                    .filter(filter)
                    .limit(limit)
                    .with_payload(true)
                    .with_vectors(false),
            )
            .await
            .map_err(|e| VectorDbError::ScrollFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(response.result)
    }
}
