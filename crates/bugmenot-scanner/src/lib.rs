//! BugMeNot Scanner - credential listing search and extraction.
//!
//! This crate fetches the listing page for a domain, pulls one record per
//! account entry out of the page text, and ranks the results. Extraction is
//! best effort: a malformed entry yields a partially filled record rather than
//! an error, while a page with no entries at all is reported as a structural
//! failure.
//!
//! # Features
//!
//! - Label-driven record extraction that tolerates missing fields
//! - Derived success rate, vote and age values with defined fallbacks
//! - Stable multi-criteria sorting on discovery order
//! - A search session that discards stale responses and caches results
//!
//! # Example
//!
//! ```rust,ignore
//! use bugmenot_core::AppConfig;
//! use bugmenot_scanner::{QuerySession, SearchOutcome, SortMode};
//!
//! let session = QuerySession::from_config(&AppConfig::load_with_env()?)?;
//!
//! if let SearchOutcome::Ready(records) = session.search("theathletic.com").await? {
//!     for record in records {
//!         println!("{:?} / {:?}", record.username(), record.password());
//!     }
//! }
//!
//! let by_votes = session.set_sort_mode(SortMode::Votes).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod cache;
#[allow(missing_docs)]
pub mod document;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod extractor;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod record;
pub mod resolver;
#[allow(missing_docs)]
pub mod session;
pub mod sort;
pub mod tokenizer;
pub mod transport;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use cache::ResultCache;
pub use document::ListingParser;
pub use error::{FetchError, Result, TransportError};
pub use extractor::{extract_block, extract_record};
pub use orchestrator::QueryOrchestrator;
pub use record::{CredentialRecord, QueryResult};
pub use session::{QuerySession, SearchOutcome};
pub use sort::{sort_records, SortMode};
pub use tokenizer::tokenize;
pub use transport::{HttpTransport, Transport};
pub use url_builder::build_query_url;
