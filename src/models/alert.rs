use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A registered price-threshold alert. Immutable once created; evaluation
/// against live prices happens outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceAlert {
    pub target_price: Decimal,
    pub email: String,
    #[serde(with = "super::timestamp_format")]
    pub created_at: DateTime<Utc>,
}
