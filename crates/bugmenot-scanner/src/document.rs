//! Locating account entries in a listing page.

use crate::error::{FetchError, Result};
use crate::extractor::extract_block;
use crate::record::CredentialRecord;
use scraper::{Html, Selector};

pub const CONTENT_ID: &str = "content";
pub const ACCOUNT_CLASS: &str = "account";

/// Locates account entries in a listing page.
///
/// Entries are the direct children of the element with id `content` that carry
/// the class `account`. Nested or unmarked elements are ignored.
#[derive(Debug, Clone)]
pub struct ListingParser {
    container_id: String,
    entry_class: String,
    container: Selector,
    entries: Selector,
}

impl Default for ListingParser {
    fn default() -> Self {
        Self::new(CONTENT_ID, ACCOUNT_CLASS).expect("static listing selectors are valid")
    }
}

impl ListingParser {
    /// Build a parser for a container id and entry class.
    ///
    /// Fails with [`FetchError::InvalidSelector`] when the markers don't form a
    /// valid CSS selector.
    pub fn new(container_id: impl Into<String>, entry_class: impl Into<String>) -> Result<Self> {
        let container_id = container_id.into();
        let entry_class = entry_class.into();

        let container = Selector::parse(&format!("#{container_id}")).map_err(|e| {
            FetchError::InvalidSelector(format!("container #{container_id}: {e}"))
        })?;
        let entries =
            Selector::parse(&format!("#{container_id} > .{entry_class}")).map_err(|e| {
                FetchError::InvalidSelector(format!("entry .{entry_class}: {e}"))
            })?;

        Ok(Self {
            container_id,
            entry_class,
            container,
            entries,
        })
    }

    /// Parse page text and extract one record per account entry.
    pub fn parse(&self, html: &str) -> Result<Vec<CredentialRecord>> {
        let document = Html::parse_document(html);
        self.records(&document)
    }

    pub fn records(&self, document: &Html) -> Result<Vec<CredentialRecord>> {
        let records: Vec<_> = self
            .account_blocks(document)?
            .iter()
            .enumerate()
            .map(|(sequence, block)| extract_block(block, sequence))
            .collect();

        let blank = records.iter().filter(|r| r.is_blank()).count();
        if blank > 0 {
            tracing::debug!(
                "{} of {} account entries had no recognizable fields",
                blank,
                records.len()
            );
        }

        Ok(records)
    }

    /// Visible text of each account entry, in document order.
    ///
    /// Fails with [`FetchError::EmptyResponse`] when the container is missing
    /// or holds no account entries. An entry with no text still counts.
    pub fn account_blocks(&self, document: &Html) -> Result<Vec<String>> {
        if document.select(&self.container).next().is_none() {
            tracing::warn!("No #{} container in response", self.container_id);
            return Err(FetchError::EmptyResponse);
        }

        let blocks: Vec<String> = document
            .select(&self.entries)
            .map(|entry| entry.text().collect::<Vec<_>>().join(" "))
            .collect();

        if blocks.is_empty() {
            tracing::warn!("#{} holds no .{} entries", self.container_id, self.entry_class);
            return Err(FetchError::EmptyResponse);
        }

        Ok(blocks)
    }
}
