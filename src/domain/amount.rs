use crate::error::GatewayError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative monetary amount in major units (e.g. euros, not cents).
///
/// Wraps `rust_decimal::Decimal` so that a negative value never reaches the
/// gateway binary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GatewayError::ValidationError(
                "Amount must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}
