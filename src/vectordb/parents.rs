use tracing::debug;

use crate::config::Config;
use crate::constants::PARENT_ID_KEY;
use crate::document::Document;
use crate::retrieval::{ParentExpander, RetrievalError, expand_by_parent_id};

use super::client::QdrantClient;
use super::error::VectorDbError;
use super::payload::{METADATA_FIELD, document_from_payload};

/// [`ParentExpander`] that looks parents up in a Qdrant collection by
/// `metadata.parent_id`.
///
/// Lookups that fail (unreachable server, malformed payload) are logged and leave
/// that chunk unexpanded; the other chunks still expand.
#[derive(Clone)]
pub struct QdrantParentStore {
    client: QdrantClient,
    collection: String,
    filter_field: String,
}

impl std::fmt::Debug for QdrantParentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantParentStore")
            .field("url", &self.client.url())
            .field("collection", &self.collection)
            .finish()
    }
}

impl QdrantParentStore {
    pub fn new(client: QdrantClient, collection: impl Into<String>) -> Self {
        Self {
            client,
            collection: collection.into(),
            filter_field: format!("{METADATA_FIELD}.{PARENT_ID_KEY}"),
        }
    }

    /// Connects to `url` and reads parents from `collection`.
    pub fn connect(url: &str, collection: impl Into<String>) -> Result<Self, VectorDbError> {
        Ok(Self::new(QdrantClient::new(url)?, collection))
    }

    /// Connects to `config.qdrant_url` and reads parents from `config.parent_collection`.
    pub fn from_config(config: &Config) -> Result<Self, VectorDbError> {
        Self::connect(&config.qdrant_url, config.parent_collection.clone())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Fetches the parent stored under `parent_id`, if any.
    pub async fn fetch_parent(&self, parent_id: &str) -> Result<Option<Document>, VectorDbError> {
        let points = self
            .client
            .scroll_matching(&self.collection, &self.filter_field, parent_id, 1)
            .await?;

        let Some(point) = points.into_iter().next() else {
            debug!(parent_id, collection = %self.collection, "Parent not found");
            return Ok(None);
        };

        document_from_payload(&self.collection, &point.payload).map(Some)
    }
}

impl ParentExpander for QdrantParentStore {
    async fn expand(&self, documents: Vec<Document>) -> Result<Vec<Document>, RetrievalError> {
        let input = documents.len();

        let expanded = expand_by_parent_id(documents, move |parent_id| async move {
            self.fetch_parent(&parent_id).await
        })
        .await;

        debug!(input, output = expanded.len(), "Expanded chunks to parents");

        Ok(expanded)
    }
}
