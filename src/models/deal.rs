use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::types::DealId;

/// Timestamp layouts accepted in addition to chrono's default ISO-8601 parser.
const TIMESTAMP_FALLBACK_FORMATS: [&str; 1] = ["%Y-%m-%dT%H:%M"];

/// Represents a single row from the uploaded CSV file.
///
/// Cell text has already been trimmed and the amount coerced by the parser.
/// Nothing else is checked at this stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDeal {
    /// 1-based line number in the source file.
    pub line: u64,
    pub deal_id: DealId,
    pub from_currency: String,
    pub to_currency: String,
    pub timestamp: String,
    /// `None` when the cell was blank.
    pub amount: Option<Decimal>
}

/// A currency-exchange deal as seen by the validator and storage.
///
/// Construction performs no business checks; a deal is only considered valid
/// once the validator has accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct Deal {
    pub deal_id: DealId,
    pub from_currency: String,
    pub to_currency: String,
    /// `None` when the source text was missing or not an ISO-8601 local date-time.
    pub timestamp: Option<NaiveDateTime>,
    pub amount: Option<Decimal>
}

impl From<RawDeal> for Deal {
    fn from(raw: RawDeal) -> Self {
        Self {
            timestamp: parse_timestamp(&raw.timestamp),
            deal_id: raw.deal_id,
            from_currency: raw.from_currency,
            to_currency: raw.to_currency,
            amount: raw.amount
        }
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }

    value.parse::<NaiveDateTime>().ok().or_else(|| {
        TIMESTAMP_FALLBACK_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    })
}
