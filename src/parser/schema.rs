use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::RawDeal;

/// Converts one trimmed cell into its typed form and stores it on the row.
pub type Coerce = fn(&mut RawDeal, &str) -> Result<(), String>;

/// Binding between a CSV header column and a field of [`RawDeal`].
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub required: bool,
    pub coerce: Coerce
}

/// Column bindings for deal uploads, in canonical header order.
pub const DEAL_SCHEMA: [ColumnSpec; 5] = [
    ColumnSpec { name: "dealId", required: true, coerce: coerce_deal_id },
    ColumnSpec { name: "fromCurrency", required: true, coerce: coerce_from_currency },
    ColumnSpec { name: "toCurrency", required: true, coerce: coerce_to_currency },
    ColumnSpec { name: "timestamp", required: true, coerce: coerce_timestamp },
    ColumnSpec { name: "amount", required: true, coerce: coerce_amount }
];

fn coerce_deal_id(deal: &mut RawDeal, value: &str) -> Result<(), String> {
    deal.deal_id = value.to_string();
    Ok(())
}

fn coerce_from_currency(deal: &mut RawDeal, value: &str) -> Result<(), String> {
    deal.from_currency = value.to_string();
    Ok(())
}

fn coerce_to_currency(deal: &mut RawDeal, value: &str) -> Result<(), String> {
    deal.to_currency = value.to_string();
    Ok(())
}

fn coerce_timestamp(deal: &mut RawDeal, value: &str) -> Result<(), String> {
    deal.timestamp = value.to_string();
    Ok(())
}

fn coerce_amount(deal: &mut RawDeal, value: &str) -> Result<(), String> {
    if value.is_empty() {
        deal.amount = None;
        return Ok(());
    }

    if !is_decimal_literal(value) {
        return Err(format!("[{value}] is not a decimal number"));
    }

    let amount = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|error| format!("[{value}] is not a decimal number ({error})"))?;

    deal.amount = Some(amount);
    Ok(())
}

/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`, where either side of the
/// point may be empty but not both.
fn is_decimal_literal(value: &str) -> bool {
    let digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (significand, exponent) = match unsigned.find(['e', 'E']) {
        Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
        None => (unsigned, None)
    };
    let (integral, fraction) = significand.split_once('.').unwrap_or((significand, ""));

    let valid_exponent = exponent.is_none_or(|exponent| {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        !exponent.is_empty() && digits(exponent)
    });

    !(integral.is_empty() && fraction.is_empty()) && digits(integral) && digits(fraction) && valid_exponent
}
