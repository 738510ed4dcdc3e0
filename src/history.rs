use tracing::info;

use crate::models::{PriceDelta, PriceObservation};
use crate::storage::RecordStore;
use crate::Result;

/// Append-only view over the persisted price series. Insertion order is
/// chronological order; nothing here reorders or truncates.
pub struct PriceLedger {
    store: Box<dyn RecordStore<PriceObservation>>,
}

impl PriceLedger {
    pub fn new(store: Box<dyn RecordStore<PriceObservation>>) -> Self {
        Self { store }
    }

    pub fn record(&self, observation: &PriceObservation) -> Result<()> {
        self.store.append(observation)?;
        info!(price = %observation.price, timestamp = %observation.timestamp, "price recorded");
        Ok(())
    }

    pub fn observations(&self) -> Result<Vec<PriceObservation>> {
        self.store.read_all()
    }

    /// The two most recent observations as (prior, current), or `None`
    /// below two entries.
    pub fn latest_two(&self) -> Result<Option<(PriceObservation, PriceObservation)>> {
        let mut observations = self.store.read_all()?;
        let current = observations.pop();
        let prior = observations.pop();
        match (prior, current) {
            (Some(prior), Some(current)) => Ok(Some((prior, current))),
            _ => Ok(None),
        }
    }

    pub fn delta(&self) -> Result<Option<PriceDelta>> {
        Ok(self
            .latest_two()?
            .map(|(prior, current)| PriceDelta::between(&prior, &current)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn ledger() -> PriceLedger {
        PriceLedger::new(Box::new(MemoryStore::new()))
    }

    fn record(ledger: &PriceLedger, price: &str) {
        let observation = PriceObservation::new(Decimal::from_str(price).unwrap()).unwrap();
        ledger.record(&observation).unwrap();
    }

    #[test]
    fn test_delta_absent_below_two_observations() {
        let ledger = ledger();
        assert_eq!(ledger.delta().unwrap(), None);

        record(&ledger, "100");
        assert_eq!(ledger.delta().unwrap(), None);
    }

    #[test]
    fn test_delta_uses_last_two_entries() {
        let ledger = ledger();
        record(&ledger, "200");
        record(&ledger, "100");
        record(&ledger, "150");

        let delta = ledger.delta().unwrap().unwrap();
        assert_eq!(delta.absolute_change, Decimal::from(50));
        assert_eq!(
            delta.percentage_change,
            Decimal::from_str("50.0").unwrap()
        );
        assert!(delta.is_increase);
    }

    #[test]
    fn test_latest_two_ordering() {
        let ledger = ledger();
        record(&ledger, "10");
        record(&ledger, "20");

        let (prior, current) = ledger.latest_two().unwrap().unwrap();
        assert_eq!(prior.price, Decimal::from(10));
        assert_eq!(current.price, Decimal::from(20));
    }
}
