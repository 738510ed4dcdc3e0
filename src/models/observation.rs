use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// A single recorded price point. Immutable once created; the ledger only
/// ever appends these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceObservation {
    #[serde(with = "super::timestamp_format")]
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
}

impl PriceObservation {
    /// Creates an observation stamped with the current time. The price must
    /// be strictly positive.
    pub fn new(price: Decimal) -> Result<Self, AppError> {
        Self::at(price, Utc::now())
    }

    pub fn at(price: Decimal, timestamp: DateTime<Utc>) -> Result<Self, AppError> {
        if price <= Decimal::ZERO {
            return Err(AppError::InvalidInput(format!(
                "observed price must be positive, got {}",
                price
            )));
        }
        Ok(Self { timestamp, price })
    }
}

/// Change between the two most recent observations. Derived on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceDelta {
    pub absolute_change: Decimal,
    pub percentage_change: Decimal,
    pub is_increase: bool,
}

impl PriceDelta {
    /// Prior price is guaranteed non-zero by the `PriceObservation`
    /// constructor, so the percentage division is always defined.
    pub fn between(prior: &PriceObservation, current: &PriceObservation) -> Self {
        let absolute_change = current.price - prior.price;
        let percentage_change = (absolute_change / prior.price * Decimal::from(100)).round_dp(1);
        Self {
            absolute_change,
            percentage_change,
            is_increase: absolute_change > Decimal::ZERO,
        }
    }
}
