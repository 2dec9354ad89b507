use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::{Config, FastRerankerBackend, PipelineConfig};
use crate::corrective::{GenaiOracle, RelevanceFilter};
use crate::document::Document;
use crate::embedding::{LexicalScorer, Reranker, RerankerConfig};
use crate::rerank::{FastReranker, PrecisionReranker};

use super::collaborators::{ParentExpander, SearchBackend};
use super::error::RetrievalError;

/// Runs search, reranking, corrective filtering and parent expansion for one query.
///
/// Every stage past search is optional: a missing stage, a disabled flag or an
/// unavailable model turns that stage into a pass-through. Stages run strictly in
/// order and share nothing but the document list.
pub struct RetrievalOrchestrator<S, E> {
    search: S,
    expander: E,
    fast: Option<FastReranker>,
    precision: Option<PrecisionReranker>,
    filter: Option<RelevanceFilter>,
}

impl<S, E> std::fmt::Debug for RetrievalOrchestrator<S, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalOrchestrator")
            .field("fast", &self.fast)
            .field("precision", &self.precision)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

impl<S: SearchBackend, E: ParentExpander> RetrievalOrchestrator<S, E> {
    /// Orchestrator with search and expansion only; add stages with the `with_*` methods.
    pub fn new(search: S, expander: E) -> Self {
        Self {
            search,
            expander,
            fast: None,
            precision: None,
            filter: None,
        }
    }

    /// Builds every stage `config` describes. Model loading failures leave the stage
    /// unavailable instead of failing construction.
    pub fn from_config(search: S, expander: E, config: &Config) -> Self {
        let fast = match config.fast_reranker {
            FastRerankerBackend::Lexical => Some(FastReranker::new(Arc::new(LexicalScorer::new()))),
            FastRerankerBackend::CrossEncoder(ref path) => Some(FastReranker::new(Arc::new(
                Reranker::load_or_unavailable(RerankerConfig::new(path.clone())),
            ))),
            FastRerankerBackend::Disabled => None,
        };

        let precision = PrecisionReranker::from_config(config.precision_reranker_config());

        let filter = RelevanceFilter::new(Arc::new(GenaiOracle::new(config.oracle_model.clone())))
            .with_concurrency(config.oracle_concurrency);

        info!(
            fast = ?config.fast_reranker,
            precision_available = precision.is_available(),
            oracle_model = %config.oracle_model,
            "Retrieval pipeline configured"
        );

        Self {
            search,
            expander,
            fast,
            precision: Some(precision),
            filter: Some(filter),
        }
    }

    pub fn with_fast_reranker(mut self, reranker: FastReranker) -> Self {
        self.fast = Some(reranker);
        self
    }

    pub fn with_precision_reranker(mut self, reranker: PrecisionReranker) -> Self {
        self.precision = Some(reranker);
        self
    }

    pub fn with_relevance_filter(mut self, filter: RelevanceFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn search_backend(&self) -> &S {
        &self.search
    }

    pub fn fast_reranker(&self) -> Option<&FastReranker> {
        self.fast.as_ref()
    }

    pub fn precision_reranker(&self) -> Option<&PrecisionReranker> {
        self.precision.as_ref()
    }

    pub fn relevance_filter(&self) -> Option<&RelevanceFilter> {
        self.filter.as_ref()
    }

    /// Retrieves documents for `query`.
    ///
    /// Fails only when the search backend fails, passing its error through unchanged.
    /// An empty search result is returned as-is without touching any other stage.
    #[instrument(skip_all, fields(query_len = query.len(), category = category_filter))]
    pub async fn retrieve(
        &self,
        query: &str,
        category_filter: Option<&str>,
        config: &PipelineConfig,
    ) -> Result<Vec<Document>, RetrievalError> {
        let mut documents = self
            .search
            .search(query, category_filter, config.top_k_initial)
            .await?;

        debug!(candidates = documents.len(), "Search complete");

        if documents.is_empty() {
            return Ok(documents);
        }

        if config.use_rerank {
            if let Some(fast) = self.fast.as_ref().filter(|r| r.is_available())
                && documents.len() > 1
            {
                documents = fast.rerank(query, documents, config.top_k_fast);
            }

            if let Some(precision) = self.precision.as_ref().filter(|r| r.is_available())
                && documents.len() > 1
            {
                documents = precision.rerank(query, documents, config.top_k_precise);
            }
        }

        if config.use_corrective_filter
            && let Some(filter) = &self.filter
        {
            documents = filter
                .filter(query, documents, config.min_relevance_score)
                .await;
        }

        if config.use_parent_expansion {
            documents = self.expand(documents).await;
        }

        info!(returned = documents.len(), "Retrieval complete");

        Ok(documents)
    }

    /// Precision-reranks `documents` on their own, outside a full retrieval.
    ///
    /// Follows the same rule as [`retrieve`](Self::retrieve): the model only runs on two
    /// or more documents. Otherwise, or without an available precision stage, the first
    /// `top_k` documents are returned in order.
    pub fn rerank(&self, query: &str, mut documents: Vec<Document>, top_k: usize) -> Vec<Document> {
        match self.precision.as_ref().filter(|r| r.is_available()) {
            Some(precision) if documents.len() > 1 => precision.rerank(query, documents, top_k),
            _ => {
                documents.truncate(top_k);
                documents
            }
        }
    }

    /// Runs the corrective filter on `documents` on their own. Without a filter the
    /// input is returned unchanged.
    pub async fn filter(&self, query: &str, documents: Vec<Document>, min_score: u32) -> Vec<Document> {
        match &self.filter {
            Some(filter) => filter.filter(query, documents, min_score).await,
            None => documents,
        }
    }

    async fn expand(&self, documents: Vec<Document>) -> Vec<Document> {
        let fallback = documents.clone();

        match self.expander.expand(documents).await {
            Ok(expanded) => {
                debug!(expanded = expanded.len(), "Parent expansion complete");
                expanded
            }
            Err(e) => {
                warn!(error = %e, "Parent expansion failed, returning chunks");
                fallback
            }
        }
    }
}
