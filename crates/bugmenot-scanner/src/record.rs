//! Credential records and the result set of one query.

use crate::resolver;
use crate::sort::{self, SortMode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One account entry as extracted from a listing page.
///
/// Every field is optional: a block that is present but unparseable still
/// yields a record. Fields are private so a record cannot change after the
/// extraction pass that built it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialRecord {
    username: Option<String>,
    password: Option<String>,
    success_rate_raw: Option<String>,
    votes_raw: Option<String>,
    age_raw: Option<String>,
    original_sequence: usize,
}

impl CredentialRecord {
    pub(crate) fn empty(original_sequence: usize) -> Self {
        Self {
            username: None,
            password: None,
            success_rate_raw: None,
            votes_raw: None,
            age_raw: None,
            original_sequence,
        }
    }

    pub(crate) fn set_username(&mut self, value: &str) {
        self.username = Some(value.to_string());
    }

    pub(crate) fn set_password(&mut self, value: &str) {
        self.password = Some(value.to_string());
    }

    pub(crate) fn set_success_rate(&mut self, phrase: &[&str]) {
        self.success_rate_raw = Some(phrase.join(" "));
    }

    pub(crate) fn set_votes(&mut self, phrase: &[&str]) {
        self.votes_raw = Some(phrase.join(" "));
    }

    pub(crate) fn set_age(&mut self, phrase: &[&str]) {
        self.age_raw = Some(phrase.join(" "));
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Free text such as `"87% success rate"`.
    #[must_use]
    pub fn success_rate_raw(&self) -> Option<&str> {
        self.success_rate_raw.as_deref()
    }

    /// Free text such as `"12 votes"`.
    #[must_use]
    pub fn votes_raw(&self) -> Option<&str> {
        self.votes_raw.as_deref()
    }

    /// Free text such as `"3 months old"`.
    #[must_use]
    pub fn age_raw(&self) -> Option<&str> {
        self.age_raw.as_deref()
    }

    /// Zero-based position of the entry in the source document.
    #[must_use]
    pub fn original_sequence(&self) -> usize {
        self.original_sequence
    }

    /// True when nothing could be extracted from the block.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.success_rate_raw.is_none()
            && self.votes_raw.is_none()
            && self.age_raw.is_none()
    }

    #[must_use]
    pub fn success_rate_value(&self) -> i64 {
        resolver::success_rate(self.success_rate_raw())
    }

    #[must_use]
    pub fn votes_value(&self) -> i64 {
        resolver::votes(self.votes_raw())
    }

    #[must_use]
    pub fn age_instant(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        resolver::age_instant_at(self.age_raw(), now)
    }
}

/// Records produced by one fetch cycle, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    term: String,
    records: Vec<CredentialRecord>,
}

impl QueryResult {
    #[must_use]
    pub fn new(term: impl Into<String>, records: Vec<CredentialRecord>) -> Self {
        Self {
            term: term.into(),
            records,
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Records in discovery order.
    #[must_use]
    pub fn records(&self) -> &[CredentialRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A reordered view; the stored order is left untouched.
    #[must_use]
    pub fn sorted(&self, mode: SortMode) -> Vec<CredentialRecord> {
        let mut view = self.records.clone();
        sort::sort_records(&mut view, mode);
        view
    }
}
