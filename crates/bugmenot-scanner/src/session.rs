//! Search session: the caller-side owner of the current result.
//!
//! Every call to [`QuerySession::search`] starts a new generation and drops
//! the previous result outright. A search that finishes after a newer one has
//! started is discarded instead of overwriting fresher data. Results are kept
//! in discovery order and sorted on the way out.

use crate::cache::ResultCache;
use crate::error::Result;
use crate::orchestrator::QueryOrchestrator;
use crate::record::{CredentialRecord, QueryResult};
use crate::sort::SortMode;
use bugmenot_core::AppConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Records for the term, sorted by the session's mode.
    Ready(Vec<CredentialRecord>),
    /// The term was blank; the session is now empty.
    Cleared,
    /// A newer search started before this one finished.
    Superseded,
}

struct SessionState {
    term: Option<String>,
    result: Option<QueryResult>,
    sort_mode: SortMode,
    cache: ResultCache,
}

pub struct QuerySession {
    orchestrator: QueryOrchestrator,
    generation: AtomicU64,
    debounce: Duration,
    state: RwLock<SessionState>,
}

impl QuerySession {
    #[must_use]
    pub fn new(orchestrator: QueryOrchestrator) -> Self {
        Self {
            orchestrator,
            generation: AtomicU64::new(0),
            debounce: Duration::ZERO,
            state: RwLock::new(SessionState {
                term: None,
                result: None,
                sort_mode: SortMode::None,
                cache: ResultCache::new(0),
            }),
        }
    }

    /// Build a session with an HTTP orchestrator and the configured session
    /// settings. An unknown `default_sort` falls back to discovery order.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let orchestrator = QueryOrchestrator::from_config(&config.query)?;
        let sort_mode = config.session.default_sort.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, falling back to '{}'", e, SortMode::None);
            SortMode::None
        });

        Ok(Self::new(orchestrator)
            .with_debounce(Duration::from_millis(config.session.debounce_ms))
            .with_cache_capacity(config.session.cache_capacity)
            .with_sort_mode(sort_mode))
    }

    /// Wait this long before issuing a query, so a burst of searches only
    /// fetches the last term.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.state.get_mut().cache = ResultCache::new(capacity);
        self
    }

    #[must_use]
    pub fn with_sort_mode(mut self, mode: SortMode) -> Self {
        self.state.get_mut().sort_mode = mode;
        self
    }

    /// Search for `term`, replacing whatever the session held.
    ///
    /// Errors from the orchestrator are returned as-is and leave the session
    /// empty, unless a newer search has already taken over.
    pub async fn search(&self, term: &str) -> Result<SearchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let term = term.trim();

        {
            let mut state = self.state.write().await;
            state.result = None;
            state.term = (!term.is_empty()).then(|| term.to_string());
        }

        if term.is_empty() {
            return Ok(SearchOutcome::Cleared);
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if self.is_stale(generation) {
                tracing::debug!("Search for '{}' superseded before it was sent", term);
                return Ok(SearchOutcome::Superseded);
            }
        }

        let cached = self.state.write().await.cache.get(term);
        if let Some(result) = cached {
            tracing::debug!("Serving '{}' from cache", term);
            return Ok(self.store(generation, result).await);
        }

        let fetched = self.orchestrator.fetch(term).await;
        if self.is_stale(generation) {
            tracing::debug!("Discarding stale response for '{}'", term);
            return Ok(SearchOutcome::Superseded);
        }

        Ok(self.store(generation, fetched?).await)
    }

    /// Drop the cached result for the current term and fetch it again.
    pub async fn refresh(&self) -> Result<SearchOutcome> {
        let term = {
            let mut state = self.state.write().await;
            match state.term.clone() {
                Some(term) => {
                    state.cache.invalidate(&term);
                    term
                }
                None => return Ok(SearchOutcome::Cleared),
            }
        };

        self.search(&term).await
    }

    /// Forget the current term, result and every cached result.
    pub async fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.write().await;
        state.term = None;
        state.result = None;
        state.cache.clear();
    }

    /// Change the sort mode and return the reordered records.
    pub async fn set_sort_mode(&self, mode: SortMode) -> Vec<CredentialRecord> {
        let mut state = self.state.write().await;
        state.sort_mode = mode;
        Self::view(&state)
    }

    pub async fn sort_mode(&self) -> SortMode {
        self.state.read().await.sort_mode
    }

    /// Current records, sorted by the session's mode.
    pub async fn sorted_records(&self) -> Vec<CredentialRecord> {
        Self::view(&*self.state.read().await)
    }

    /// Current result in discovery order.
    pub async fn result(&self) -> Option<QueryResult> {
        self.state.read().await.result.clone()
    }

    pub async fn current_term(&self) -> Option<String> {
        self.state.read().await.term.clone()
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    async fn store(&self, generation: u64, result: QueryResult) -> SearchOutcome {
        let mut state = self.state.write().await;
        // Checked again under the lock: a newer search may have cleared state
        // between the caller's check and here.
        if self.is_stale(generation) {
            return SearchOutcome::Superseded;
        }

        state.cache.insert(result.term(), result.clone());
        state.result = Some(result);
        SearchOutcome::Ready(Self::view(&state))
    }

    fn view(state: &SessionState) -> Vec<CredentialRecord> {
        state
            .result
            .as_ref()
            .map(|result| result.sorted(state.sort_mode))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, TransportError};
    use crate::transport::mock::MockTransport;
    use std::sync::Arc;

    const BASE: &str = "http://bugmenot.com";

    const PAGE: &str = r#"<div id="content">
        <div class="account">Username: first Password: a Stats: 10% success rate 5 votes 1 days old</div>
        <div class="account">Username: second Password: b Stats: 90% success rate 20 votes 2 years old</div>
        <div class="account">Username: third Password: c Stats: 50% success rate 5 votes 3 months old</div>
    </div>"#;

    fn session_over(transport: Arc<MockTransport>) -> QuerySession {
        QuerySession::new(QueryOrchestrator::new(transport, BASE)).with_cache_capacity(8)
    }

    fn usernames(records: &[CredentialRecord]) -> Vec<&str> {
        records.iter().filter_map(CredentialRecord::username).collect()
    }

    #[tokio::test]
    async fn test_search_stores_and_sorts() {
        let session = session_over(Arc::new(MockTransport::ok(PAGE)))
            .with_sort_mode(SortMode::Votes);

        let outcome = session.search("example.com").await.expect("search");
        let SearchOutcome::Ready(records) = outcome else {
            panic!("expected records");
        };
        assert_eq!(usernames(&records), vec!["second", "first", "third"]);

        // Stored result keeps discovery order
        let stored = session.result().await.expect("stored");
        assert_eq!(usernames(stored.records()), vec!["first", "second", "third"]);
        assert_eq!(session.current_term().await.as_deref(), Some("example.com"));
    }

    #[tokio::test]
    async fn test_set_sort_mode_reorders_view() {
        let session = session_over(Arc::new(MockTransport::ok(PAGE)));
        session.search("example.com").await.expect("search");

        let by_rate = session.set_sort_mode(SortMode::SuccessRate).await;
        assert_eq!(usernames(&by_rate), vec!["second", "third", "first"]);

        let by_age = session.set_sort_mode(SortMode::Age).await;
        assert_eq!(usernames(&by_age), vec!["first", "third", "second"]);

        let restored = session.set_sort_mode(SortMode::None).await;
        assert_eq!(usernames(&restored), vec!["first", "second", "third"]);
        assert_eq!(session.sort_mode().await, SortMode::None);
    }

    #[tokio::test]
    async fn test_blank_term_clears_without_fetching() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone());
        session.search("example.com").await.expect("search");

        let outcome = session.search("   ").await.expect("search");
        assert_eq!(outcome, SearchOutcome::Cleared);
        assert!(session.result().await.is_none());
        assert!(session.sorted_records().await.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_repeat_search_is_served_from_cache() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone());

        session.search("example.com").await.expect("search");
        let outcome = session.search(" Example.com ").await.expect("search");

        assert!(matches!(outcome, SearchOutcome::Ready(ref r) if r.len() == 3));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_cache() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone());

        session.search("example.com").await.expect("search");
        session.refresh().await.expect("refresh");

        assert_eq!(transport.requests().len(), 2);
        assert!(session.result().await.is_some());
    }

    #[tokio::test]
    async fn test_refresh_without_term() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone());

        assert_eq!(session.refresh().await.expect("refresh"), SearchOutcome::Cleared);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_clear_drops_cache() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone());

        session.search("example.com").await.expect("search");
        session.clear().await;
        assert!(session.result().await.is_none());
        assert!(session.current_term().await.is_none());

        session.search("example.com").await.expect("search");
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_error_leaves_session_empty() {
        let transport = Arc::new(MockTransport::responding(Err(TransportError::Timeout(
            "30s".to_string(),
        ))));
        let session = session_over(transport);

        let err = session.search("example.com").await.expect_err("timeout");
        assert!(matches!(err, FetchError::Transport(TransportError::Timeout(_))));
        assert!(session.result().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let transport = Arc::new(
            MockTransport::ok(PAGE)
                .with_route(
                    "http://bugmenot.com/view/fast.com",
                    r#"<div id="content"><div class="account">Username: quick</div></div>"#,
                )
                .with_delay("http://bugmenot.com/view/slow.com", Duration::from_millis(500)),
        );
        let session = session_over(transport);

        let (slow, fast) = tokio::join!(session.search("slow.com"), async {
            tokio::task::yield_now().await;
            session.search("fast.com").await
        });

        assert_eq!(slow.expect("slow search"), SearchOutcome::Superseded);
        assert!(matches!(fast.expect("fast search"), SearchOutcome::Ready(_)));

        let stored = session.result().await.expect("stored");
        assert_eq!(stored.term(), "fast.com");
        assert_eq!(usernames(stored.records()), vec!["quick"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_failure_is_superseded() {
        let transport = Arc::new(
            MockTransport::ok(PAGE)
                .with_failure(
                    "http://bugmenot.com/view/slow.com",
                    TransportError::Timeout("30s elapsed".to_string()),
                )
                .with_delay("http://bugmenot.com/view/slow.com", Duration::from_millis(500)),
        );
        let session = session_over(transport);

        let (slow, fast) = tokio::join!(session.search("slow.com"), async {
            tokio::task::yield_now().await;
            session.search("fast.com").await
        });

        assert_eq!(slow.expect("error swallowed"), SearchOutcome::Superseded);
        assert!(matches!(fast.expect("fast search"), SearchOutcome::Ready(ref r) if r.len() == 3));
        assert_eq!(session.result().await.expect("stored").term(), "fast.com");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_collapses_bursts() {
        let transport = Arc::new(MockTransport::ok(PAGE));
        let session = session_over(transport.clone()).with_debounce(Duration::from_millis(250));

        let (first, second) = tokio::join!(session.search("exa"), async {
            tokio::task::yield_now().await;
            session.search("example.com").await
        });

        assert_eq!(first.expect("first search"), SearchOutcome::Superseded);
        assert!(matches!(second.expect("second search"), SearchOutcome::Ready(_)));
        assert_eq!(
            transport.requests(),
            vec!["http://bugmenot.com/view/example.com".to_string()]
        );
    }

    #[test]
    fn test_from_config_with_unknown_sort() {
        let mut config = AppConfig::default();
        config.session.default_sort = "popularity".to_string();

        let session = QuerySession::from_config(&config).expect("build session");
        assert_eq!(session.debounce, Duration::from_millis(250));
        assert_eq!(session.state.try_read().expect("unlocked").sort_mode, SortMode::None);
    }
}
