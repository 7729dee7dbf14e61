//! Ranking of extracted records.

use crate::record::CredentialRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Discovery order.
    #[default]
    None,
    /// Highest success rate first.
    SuccessRate,
    /// Most votes first.
    Votes,
    /// Most recent first.
    Age,
}

impl SortMode {
    /// Every mode, in selector order.
    pub const ALL: [Self; 4] = [Self::None, Self::SuccessRate, Self::Votes, Self::Age];

    /// Human-readable name, e.g. for a scope selector.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::SuccessRate => "Success Rate",
            Self::Votes => "Votes",
            Self::Age => "Age",
        }
    }

    fn as_key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::SuccessRate => "success-rate",
            Self::Votes => "votes",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

impl FromStr for SortMode {
    type Err = String;

    /// Accepts the kebab-case key or the title, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| {
                mode.as_key().eq_ignore_ascii_case(wanted)
                    || mode.title().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown sort mode '{s}'"))
    }
}

/// Sort key: primary value descending, then discovery order ascending.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum RankKey {
    Count(Reverse<i64>, usize),
    Instant(Reverse<DateTime<Utc>>, usize),
}

fn rank_key(record: &CredentialRecord, mode: SortMode, now: DateTime<Utc>) -> RankKey {
    let sequence = record.original_sequence();
    match mode {
        SortMode::None => RankKey::Count(Reverse(0), sequence),
        SortMode::SuccessRate => RankKey::Count(Reverse(record.success_rate_value()), sequence),
        SortMode::Votes => RankKey::Count(Reverse(record.votes_value()), sequence),
        SortMode::Age => RankKey::Instant(Reverse(record.age_instant(now)), sequence),
    }
}

/// Reorder `records` in place by `mode`.
///
/// Ties fall back to ascending original sequence, so the result is total and
/// deterministic. Every age in one call is resolved against the same instant.
pub fn sort_records(records: &mut [CredentialRecord], mode: SortMode) {
    sort_records_at(records, mode, Utc::now());
}

/// Like [`sort_records`], resolving ages against `now`.
pub fn sort_records_at(records: &mut [CredentialRecord], mode: SortMode, now: DateTime<Utc>) {
    records.sort_by_cached_key(|record| rank_key(record, mode, now));
}
