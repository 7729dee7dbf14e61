//! Query orchestrator for fetching credential listings.
//!
//! This module provides the `QueryOrchestrator` which turns a search term into
//! a listing URL, fetches it through a [`Transport`], and runs the page through
//! the listing parser. It makes exactly one request per call and keeps no
//! state between calls.

use crate::document::ListingParser;
use crate::error::{FetchError, Result};
use crate::record::QueryResult;
use crate::transport::{HttpTransport, Transport};
use crate::url_builder::build_query_url;
use bugmenot_core::QueryConfig;
use std::sync::Arc;

/// Fetches and extracts credential listings for search terms.
#[derive(Clone)]
pub struct QueryOrchestrator {
    /// Transport used for the single outbound request per query
    transport: Arc<dyn Transport>,
    /// Site root the `/view/<term>` path is appended to
    base_url: String,
    /// Locates account entries in the returned page
    parser: ListingParser,
}

impl QueryOrchestrator {
    /// Create a new orchestrator over an arbitrary transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            parser: ListingParser::default(),
        }
    }

    /// Create an orchestrator with an HTTP transport built from `config`.
    pub fn from_config(config: &QueryConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.base_url.clone()))
    }

    /// Use different container/entry markers.
    #[must_use]
    pub fn with_parser(mut self, parser: ListingParser) -> Self {
        self.parser = parser;
        self
    }

    /// Site root queries are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the listing page for `term` and extract its records.
    ///
    /// Records come back in document order, unsorted. Transport failures are
    /// returned unchanged inside [`FetchError::Transport`]; a page without
    /// account entries is [`FetchError::EmptyResponse`], never an empty result.
    pub async fn fetch(&self, term: &str) -> Result<QueryResult> {
        let url = build_query_url(&self.base_url, term)?;

        let bytes = match self.transport.get(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", url, e);
                return Err(FetchError::Transport(e));
            }
        };

        let html = String::from_utf8(bytes)?;
        let records = self.parser.parse(&html)?;

        tracing::info!("Extracted {} accounts for '{}'", records.len(), term.trim());
        Ok(QueryResult::new(term.trim(), records))
    }
}
