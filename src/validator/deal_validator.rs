use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::Deal;
use crate::types::is_known_currency;

/// The first business rule a deal failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    DealIdRequired,
    FromCurrencyInvalid,
    ToCurrencyInvalid,
    TimestampInvalid,
    AmountInvalid
}

impl ValidationFailure {
    /// Stable reason code reported for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DealIdRequired => "dealid.required",
            Self::FromCurrencyInvalid => "fromcurrency.invalid",
            Self::ToCurrencyInvalid => "tocurrency.invalid",
            Self::TimestampInvalid => "timestamp.invalid",
            Self::AmountInvalid => "amount.invalid"
        }
    }

    /// Localization key of the failure's display text.
    pub fn message_key(&self) -> String {
        format!("error.{}", self.code())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DealValidator;

impl DealValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks a deal against the business rules in a fixed order.
    ///
    /// Returns the first failing rule, or `None` when the deal is valid.
    /// `now` is the processing time that timestamps must not exceed.
    pub fn validate(&self, deal: &Deal, now: NaiveDateTime) -> Option<ValidationFailure> {
        if deal.deal_id.trim().is_empty() {
            warn!("Deal id is missing");
            return Some(ValidationFailure::DealIdRequired);
        }

        if !is_known_currency(&deal.from_currency) {
            warn!("Invalid fromCurrency: [{}] for deal [{}]", deal.from_currency, deal.deal_id);
            return Some(ValidationFailure::FromCurrencyInvalid);
        }

        if !is_known_currency(&deal.to_currency) {
            warn!("Invalid toCurrency: [{}] for deal [{}]", deal.to_currency, deal.deal_id);
            return Some(ValidationFailure::ToCurrencyInvalid);
        }

        match deal.timestamp {
            Some(timestamp) if timestamp <= now => {}
            timestamp => {
                warn!("Invalid or future timestamp: [{timestamp:?}] for deal [{}]", deal.deal_id);
                return Some(ValidationFailure::TimestampInvalid);
            }
        }

        match deal.amount {
            Some(amount) if amount > Decimal::ZERO => {}
            amount => {
                warn!("Amount must be a positive number: [{amount:?}] for deal [{}]", deal.deal_id);
                return Some(ValidationFailure::AmountInvalid);
            }
        }

        None
    }
}
