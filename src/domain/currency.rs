//! ISO 4217 currency codes and minor-unit conversions.
//!
//! The gateway identifies currencies by their numeric ISO 4217 code and
//! expects amounts as integers in the currency's smallest unit.

use super::amount::Amount;
use crate::error::{GatewayError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// Numeric code used for any alphabetic code missing from [`CURRENCIES`] (Euro).
pub const DEFAULT_CURRENCY_CODE: &str = "978";

/// Alphabetic to numeric ISO 4217 codes accepted by the gateway.
pub const CURRENCIES: &[(&str, &str)] = &[
    ("EUR", "978"), // Euro
    ("USD", "840"), // US Dollar
    ("CHF", "756"), // Swiss Franc
    ("GBP", "826"), // Pound Sterling
    ("CAD", "124"), // Canadian Dollar
    ("JPY", "392"), // Yen
    ("MXN", "484"), // Mexican Peso
    ("TRY", "949"), // Turkish Lira
    ("AUD", "036"), // Australian Dollar
    ("NZD", "554"), // New Zealand Dollar
    ("NOK", "578"), // Norwegian Krone
    ("BRL", "986"), // Brazilian Real
    ("ARS", "032"), // Argentine Peso
    ("KHR", "116"), // Riel
    ("TWD", "901"), // New Taiwan Dollar
    ("SEK", "752"), // Swedish Krona
    ("DKK", "208"), // Danish Krone
    ("KRW", "410"), // Won
    ("SGD", "702"), // Singapore Dollar
    ("XPF", "953"), // CFP Franc
    ("XOF", "952"), // CFA Franc BCEAO
];

/// Currencies without a minor unit, as (alphabetic, numeric) pairs.
const ZERO_DECIMAL_CURRENCIES: &[(&str, &str)] = &[
    ("JPY", "392"),
    ("KRW", "410"),
    ("XPF", "953"),
    ("XOF", "952"),
];

const MINOR_UNITS_PER_MAJOR: Decimal = Decimal::ONE_HUNDRED;

/// Looks up the numeric code of an alphabetic currency code.
///
/// Unknown codes fall back to [`DEFAULT_CURRENCY_CODE`].
pub fn currency_code(currency: &str) -> &'static str {
    CURRENCIES
        .iter()
        .find(|(alpha, _)| *alpha == currency)
        .map(|(_, numeric)| *numeric)
        .unwrap_or(DEFAULT_CURRENCY_CODE)
}

fn has_minor_unit_alpha(currency: &str) -> bool {
    !ZERO_DECIMAL_CURRENCIES
        .iter()
        .any(|(alpha, _)| *alpha == currency)
}

fn has_minor_unit_numeric(code: &str) -> bool {
    !ZERO_DECIMAL_CURRENCIES
        .iter()
        .any(|(_, numeric)| *numeric == code)
}

/// Converts a major-unit amount into the integer string the gateway expects.
///
/// Rounds half away from zero: `10.005 EUR` becomes `"1001"`. Fails when the
/// amount in minor units does not fit in a `Decimal`.
pub fn convert_amount_to_gateway_format(amount: Amount, currency: &str) -> Result<String> {
    let value = amount.value();
    let scaled = if has_minor_unit_alpha(currency) {
        value
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .ok_or_else(|| GatewayError::ValidationError("Amount too large".to_string()))?
    } else {
        value
    };

    Ok(scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_string())
}

/// Converts an amount reported by the gateway back into major units.
///
/// `currency` is the numeric ISO 4217 code, as found in gateway responses.
pub fn convert_amount_from_gateway_format(amount: Decimal, currency: &str) -> Decimal {
    if has_minor_unit_numeric(currency) {
        amount / MINOR_UNITS_PER_MAJOR
    } else {
        amount
    }
}
