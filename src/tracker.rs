use tracing::info;

use crate::extractor::{PriceExtractor, ProductPage};
use crate::history::PriceLedger;
use crate::models::{PriceDelta, PriceObservation};
use crate::scraper::BrowserSession;
use crate::Result;

/// Wires the extraction pipeline to the ledger: one page in, at most one
/// observation out. Periodic scheduling lives outside this crate and simply
/// calls `track_once` repeatedly.
pub struct ProductTracker {
    extractor: PriceExtractor,
    ledger: PriceLedger,
}

impl ProductTracker {
    pub fn new(extractor: PriceExtractor, ledger: PriceLedger) -> Self {
        Self { extractor, ledger }
    }

    /// Extracts from an already-open page and records on success. A page
    /// with no discoverable price is a normal outcome, not an error.
    pub fn check_page(&self, page: &dyn ProductPage) -> Result<Option<PriceObservation>> {
        let price = match self.extractor.extract(page)? {
            Some(price) => price,
            None => {
                info!("no price available on page");
                return Ok(None);
            }
        };

        let observation = PriceObservation::new(price)?;
        self.ledger.record(&observation)?;
        Ok(Some(observation))
    }

    /// Opens the URL in a fresh tab scoped to this call; the tab is
    /// released on every exit path.
    pub fn track_once(&self, session: &BrowserSession, url: &str) -> Result<Option<PriceObservation>> {
        let page = session.open(url)?;
        self.check_page(&page)
    }

    pub fn delta(&self) -> Result<Option<PriceDelta>> {
        self.ledger.delta()
    }

    pub fn history(&self) -> Result<Vec<PriceObservation>> {
        self.ledger.observations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::time::Duration;

    struct SinglePricePage(&'static str);

    impl ProductPage for SinglePricePage {
        fn locate_text(&self, selector: &str, _timeout: Duration) -> Result<Option<String>> {
            if selector == "span.a-price-whole" {
                Ok(Some(self.0.to_string()))
            } else {
                Ok(None)
            }
        }

        fn full_text(&self) -> Result<String> {
            Ok(String::new())
        }
    }

    struct EmptyPage;

    impl ProductPage for EmptyPage {
        fn locate_text(&self, _selector: &str, _timeout: Duration) -> Result<Option<String>> {
            Ok(None)
        }

        fn full_text(&self) -> Result<String> {
            Ok("nothing for sale here".to_string())
        }
    }

    fn tracker() -> ProductTracker {
        ProductTracker::new(
            PriceExtractor::new(),
            PriceLedger::new(Box::new(MemoryStore::new())),
        )
    }

    #[test]
    fn test_check_page_records_extracted_price() {
        let tracker = tracker();
        let observation = tracker.check_page(&SinglePricePage("₹1,234.50")).unwrap().unwrap();

        assert_eq!(observation.price, Decimal::from_str("1234.50").unwrap());
        assert_eq!(tracker.history().unwrap(), vec![observation]);
    }

    #[test]
    fn test_priceless_page_records_nothing() {
        let tracker = tracker();
        assert_eq!(tracker.check_page(&EmptyPage).unwrap(), None);
        assert!(tracker.history().unwrap().is_empty());
    }

    #[test]
    fn test_delta_after_two_checks() {
        let tracker = tracker();
        tracker.check_page(&SinglePricePage("$100")).unwrap();
        tracker.check_page(&SinglePricePage("$150")).unwrap();

        let delta = tracker.delta().unwrap().unwrap();
        assert_eq!(delta.absolute_change, Decimal::from(50));
        assert!(delta.is_increase);
    }
}
