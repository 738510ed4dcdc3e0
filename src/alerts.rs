use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::PriceAlert;
use crate::storage::RecordStore;
use crate::{AppError, Result};

/// Append-only registry of price-threshold alerts. Registration validates
/// and persists; polling history and firing alerts belongs to a separate
/// collaborator.
pub struct AlertRegistry {
    store: Box<dyn RecordStore<PriceAlert>>,
}

impl AlertRegistry {
    pub fn new(store: Box<dyn RecordStore<PriceAlert>>) -> Self {
        Self { store }
    }

    pub fn register(&self, target_price: Decimal, email: &str) -> Result<PriceAlert> {
        if target_price <= Decimal::ZERO {
            return Err(AppError::InvalidInput(format!(
                "alert target price must be positive, got {}",
                target_price
            )));
        }
        if email.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "alert contact must not be empty".to_string(),
            ));
        }

        let alert = PriceAlert {
            target_price,
            email: email.trim().to_string(),
            created_at: Utc::now(),
        };
        self.store.append(&alert)?;
        info!(target = %alert.target_price, email = %alert.email, "alert registered");
        Ok(alert)
    }

    pub fn alerts(&self) -> Result<Vec<PriceAlert>> {
        self.store.read_all()
    }
}
