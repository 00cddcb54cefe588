use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use crate::error::{Result, Violation, Violations};
use crate::ledger::validator::{ACCOUNT_FORMAT_MESSAGE, TYPE_MESSAGE};
use crate::types::account::AccountId;
use crate::types::transaction::{Transaction, TransactionType};

/// Raw history query parameters, exactly as supplied. Blank values for
/// `type`, `from` and `to` are treated as absent; a blank `accountId` is a
/// format violation like any other malformed identifier.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub account_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// A validated, typed filter over the transaction log.
#[derive(Clone, Debug, Default)]
pub struct HistoryFilter {
    account: Option<AccountId>,
    kind: Option<TransactionType>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl HistoryQuery {
    /// Validates every parameter, accumulating violations, and produces the
    /// typed filter. Any violation aborts the whole query.
    pub fn into_filter(self) -> Result<HistoryFilter> {
        let mut violations = Violations::new();

        let account = match self.account_id.as_deref() {
            None => None,
            Some(raw) => match AccountId::parse(raw) {
                Some(id) => Some(id),
                None => {
                    violations.add("accountId", ACCOUNT_FORMAT_MESSAGE);
                    None
                }
            },
        };

        let kind = match self.kind.as_deref() {
            Some(raw) if !raw.trim().is_empty() => match TransactionType::parse(raw) {
                Some(kind) => Some(kind),
                None => {
                    violations.add("type", TYPE_MESSAGE);
                    None
                }
            },
            _ => None,
        };

        // A malformed `from` suppresses `to` parsing and the range check, so
        // at most one date violation is reported per query.
        let mut from = None;
        let mut to = None;
        match parse_range(self.from.as_deref(), self.to.as_deref()) {
            Ok((range_from, range_to)) => {
                if let (Some(start), Some(end)) = (range_from, range_to) {
                    if start > end {
                        violations.add("dateRange", "'from' must be before or equal to 'to'");
                    }
                }
                from = range_from;
                to = range_to;
            }
            Err(violation) => violations.push(violation),
        }

        violations.into_result()?;

        Ok(HistoryFilter { account, kind, from, to })
    }
}

impl HistoryFilter {
    /// True when the record survives every active criterion. Bounds are
    /// inclusive on both ends.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if !tx.status.is_completed() {
            return false;
        }
        if let Some(account) = &self.account {
            if tx.from_account != *account && tx.to_account != *account {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.timestamp > to {
                return false;
            }
        }
        true
    }
}

type RangeBounds = (Option<DateTime<Utc>>, Option<DateTime<Utc>>);

fn parse_range(from: Option<&str>, to: Option<&str>) -> std::result::Result<RangeBounds, Violation> {
    let from = match from {
        Some(raw) if !raw.trim().is_empty() => Some(parse_start(raw)?),
        _ => None,
    };
    let to = match to {
        Some(raw) if !raw.trim().is_empty() => Some(parse_end(raw)?),
        _ => None,
    };
    Ok((from, to))
}

/// Full timestamp, or a bare date interpreted as that day's start (UTC).
fn parse_start(raw: &str) -> std::result::Result<DateTime<Utc>, Violation> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| Violation::new("date", "Invalid 'from' date; use ISO-8601 or YYYY-MM-DD"))
}

/// Full timestamp, or a bare date interpreted as that day's end (UTC): one
/// millisecond before the next day's start.
fn parse_end(raw: &str) -> std::result::Result<DateTime<Utc>, Violation> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .map(|date| {
            date.and_time(NaiveTime::MIN).and_utc() + Duration::days(1) - Duration::milliseconds(1)
        })
        .map_err(|_| Violation::new("date", "Invalid 'to' date; use ISO-8601 or YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::account::AccountId;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn query(
        account_id: Option<&str>,
        kind: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> HistoryQuery {
        HistoryQuery {
            account_id: account_id.map(str::to_string),
            kind: kind.map(str::to_string),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    fn violation_fields(result: Result<HistoryFilter>) -> Vec<String> {
        match result {
            Err(Error::ValidationFailed(details)) => {
                details.into_iter().map(|v| v.field).collect()
            }
            Ok(_) => panic!("expected ValidationFailed"),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    fn tx_at(timestamp: DateTime<Utc>) -> Transaction {
        let mut tx = Transaction::create(
            AccountId::parse("ACC-AAAAA").unwrap(),
            AccountId::parse("ACC-BBBBB").unwrap(),
            dec!(1.00),
            "USD".to_string(),
            TransactionType::Transfer,
        );
        tx.timestamp = timestamp;
        tx
    }

    #[test]
    fn empty_query_matches_everything() {
        let filter = HistoryQuery::default().into_filter().unwrap();
        assert!(filter.matches(&tx_at(Utc::now())));
    }

    #[test]
    fn account_filter_matches_either_side() {
        let filter = query(Some("ACC-BBBBB"), None, None, None)
            .into_filter()
            .unwrap();
        assert!(filter.matches(&tx_at(Utc::now())));

        let filter = query(Some("ACC-CCCCC"), None, None, None)
            .into_filter()
            .unwrap();
        assert!(!filter.matches(&tx_at(Utc::now())));
    }

    #[test]
    fn type_filter_is_case_insensitive_and_blank_is_ignored() {
        let filter = query(None, Some("TRANSFER"), None, None)
            .into_filter()
            .unwrap();
        assert!(filter.matches(&tx_at(Utc::now())));

        let filter = query(None, Some("deposit"), None, None)
            .into_filter()
            .unwrap();
        assert!(!filter.matches(&tx_at(Utc::now())));

        let filter = query(None, Some("  "), None, None).into_filter().unwrap();
        assert!(filter.matches(&tx_at(Utc::now())));
    }

    #[test]
    fn rejects_malformed_account_and_type_together() {
        let fields = violation_fields(
            query(Some("bogus"), Some("refund"), None, None).into_filter(),
        );
        assert_eq!(fields, vec!["accountId", "type"]);
    }

    #[test]
    fn bare_dates_cover_the_whole_day_inclusive() {
        let filter = query(None, None, Some("2024-03-10"), Some("2024-03-10"))
            .into_filter()
            .unwrap();

        let start = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap()
            + Duration::milliseconds(999);
        let next_day = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();

        assert!(filter.matches(&tx_at(start)));
        assert!(filter.matches(&tx_at(end)));
        assert!(!filter.matches(&tx_at(next_day)));
        assert!(!filter.matches(&tx_at(start - Duration::milliseconds(1))));
    }

    #[test]
    fn accepts_full_timestamps() {
        let filter = query(
            None,
            None,
            Some("2024-03-10T12:00:00Z"),
            Some("2024-03-10T13:00:00Z"),
        )
        .into_filter()
        .unwrap();

        let inside = Utc.with_ymd_and_hms(2024, 3, 10, 12, 30, 0).unwrap();
        let outside = Utc.with_ymd_and_hms(2024, 3, 10, 13, 0, 1).unwrap();
        assert!(filter.matches(&tx_at(inside)));
        assert!(!filter.matches(&tx_at(outside)));
    }

    #[test]
    fn malformed_from_reports_a_single_date_violation() {
        let result = query(None, None, Some("garbage"), Some("also-garbage")).into_filter();
        match result {
            Err(Error::ValidationFailed(details)) => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "date");
                assert_eq!(
                    details[0].message,
                    "Invalid 'from' date; use ISO-8601 or YYYY-MM-DD"
                );
            }
            other => panic!("unexpected result: {:?}", other.is_ok()),
        }
    }

    #[test]
    fn malformed_to_is_reported_when_from_parses() {
        let result = query(None, None, Some("2024-03-10"), Some("bogus")).into_filter();
        let fields = violation_fields(result);
        assert_eq!(fields, vec!["date"]);
    }

    #[test]
    fn inverted_range_is_a_violation() {
        let fields = violation_fields(
            query(None, None, Some("2024-03-11"), Some("2024-03-10")).into_filter(),
        );
        assert_eq!(fields, vec!["dateRange"]);
    }

    #[test]
    fn equal_bounds_are_allowed() {
        assert!(query(
            None,
            None,
            Some("2024-03-10T12:00:00Z"),
            Some("2024-03-10T12:00:00Z")
        )
        .into_filter()
        .is_ok());
    }
}
