//! Derived values for ranking.
//!
//! Raw phrases are turned into comparable numbers and instants on demand.
//! Resolution never fails: absent or malformed text maps to a fixed fallback
//! (`0` for counts, "now" for ages).

use chrono::{DateTime, Days, Months, TimeDelta, Utc};

/// Leading integer of `"87% success rate"`, or 0.
#[must_use]
pub fn success_rate(raw: Option<&str>) -> i64 {
    leading_token(raw)
        .map(|token| token.strip_suffix('%').unwrap_or(token))
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Leading integer of `"12 votes"`, or 0.
#[must_use]
pub fn votes(raw: Option<&str>) -> i64 {
    leading_token(raw)
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// When an entry with the given age phrase was posted, relative to now.
#[must_use]
pub fn age_instant(raw: Option<&str>) -> DateTime<Utc> {
    age_instant_at(raw, Utc::now())
}

/// Like [`age_instant`], against a fixed reference instant.
///
/// The second token's first letter picks the unit: `y` years, `m` months,
/// `d` days, anything else minutes. Unparseable phrases resolve to `now`.
#[must_use]
pub fn age_instant_at(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|phrase| subtract_age(phrase, now))
        .unwrap_or(now)
}

fn subtract_age(phrase: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let mut tokens = phrase.split_whitespace();
    let magnitude: u32 = tokens.next()?.parse().ok()?;
    let unit = tokens.next()?.chars().next()?;

    match unit {
        'y' => now.checked_sub_months(Months::new(magnitude.checked_mul(12)?)),
        'm' => now.checked_sub_months(Months::new(magnitude)),
        'd' => now.checked_sub_days(Days::new(u64::from(magnitude))),
        _ => now.checked_sub_signed(TimeDelta::try_minutes(i64::from(magnitude))?),
    }
}

fn leading_token(raw: Option<&str>) -> Option<&str> {
    raw.and_then(|phrase| phrase.split_whitespace().next())
}
