use regex::Regex;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info};

use crate::normalizer::{self, CURRENCY_MARKERS};
use crate::Result;

/// Ordered price selectors, most specific and most reliable first. The
/// extractor honors this order strictly: an earlier selector that yields a
/// normalizable price always wins over a later one.
pub const DEFAULT_PRICE_SELECTORS: &[&str] = &[
    "span.a-price-whole",
    "span.a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    "span.a-color-price",
    "span[data-a-color='price'] span.a-offscreen",
    "#corePrice_desktop span.a-offscreen",
    "span.a-price span[aria-hidden='true']",
    "#price span.a-text-price",
    "#price_inside_buybox",
    "#newBuyBoxPrice",
    "#priceblock_saleprice",
];

/// A scraped product page as the extractor sees it: locator-queryable
/// regions plus raw full text. Implemented by the live Chrome tab in
/// `scraper` and by in-memory fixtures in tests.
pub trait ProductPage {
    /// Resolves a selector to a single region's text, waiting up to
    /// `timeout`. `Ok(None)` means the region did not resolve in time or
    /// was empty; that is a normal miss. `Err` is reserved for a broken
    /// browser session.
    fn locate_text(&self, selector: &str, timeout: Duration) -> Result<Option<String>>;

    /// Raw text content of the whole page.
    fn full_text(&self) -> Result<String>;
}

pub struct PriceExtractor {
    selectors: Vec<String>,
    locator_timeout: Duration,
    marker_pattern: Regex,
}

impl PriceExtractor {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    /// Default selector list with a custom per-candidate wait.
    pub fn with_timeout(locator_timeout: Duration) -> Self {
        Self::with_selectors(
            DEFAULT_PRICE_SELECTORS.iter().map(|s| s.to_string()).collect(),
            locator_timeout,
        )
    }

    pub fn with_selectors(selectors: Vec<String>, locator_timeout: Duration) -> Self {
        let markers = CURRENCY_MARKERS
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let marker_pattern =
            Regex::new(&format!("(?:{})", markers)).expect("currency marker pattern is static");

        Self {
            selectors,
            locator_timeout,
            marker_pattern,
        }
    }

    /// Extracts a price from the page, or `Ok(None)` when both the selector
    /// scan and the fallback text scan come up empty. Only a session fault
    /// is an error.
    pub fn extract(&self, page: &dyn ProductPage) -> Result<Option<Decimal>> {
        if let Some(price) = self.scan_selectors(page)? {
            return Ok(Some(price));
        }

        debug!("no selector yielded a price, falling back to full-text scan");
        self.scan_full_text(page)
    }

    fn scan_selectors(&self, page: &dyn ProductPage) -> Result<Option<Decimal>> {
        for selector in &self.selectors {
            let text = match page.locate_text(selector, self.locator_timeout)? {
                Some(text) => text,
                None => {
                    debug!(selector, "selector did not resolve, skipping");
                    continue;
                }
            };

            match normalizer::normalize(&text) {
                Some(price) => {
                    info!(selector, %price, "price found via selector");
                    return Ok(Some(price));
                }
                None => debug!(selector, text, "selector text failed normalization"),
            }
        }
        Ok(None)
    }

    /// Scans the raw page text for currency-marked lines and normalizes
    /// them in order of appearance. The whole line is the candidate, so a
    /// price works with the marker on either side of the digits.
    fn scan_full_text(&self, page: &dyn ProductPage) -> Result<Option<Decimal>> {
        let text = page.full_text()?;

        for candidate in text.lines().filter(|line| self.marker_pattern.is_match(line)) {
            if let Some(price) = normalizer::normalize(candidate) {
                info!(candidate, %price, "price found via fallback scan");
                return Ok(Some(price));
            }
        }

        info!("no valid price found on page");
        Ok(None)
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use std::collections::HashMap;
    use std::str::FromStr;

    /// Fixture page: selector -> text, plus raw page text for the fallback.
    struct FixturePage {
        regions: HashMap<&'static str, &'static str>,
        body: &'static str,
    }

    impl FixturePage {
        fn new(regions: &[(&'static str, &'static str)], body: &'static str) -> Self {
            Self {
                regions: regions.iter().copied().collect(),
                body,
            }
        }
    }

    impl ProductPage for FixturePage {
        fn locate_text(&self, selector: &str, _timeout: Duration) -> Result<Option<String>> {
            Ok(self.regions.get(selector).map(|s| s.to_string()))
        }

        fn full_text(&self) -> Result<String> {
            Ok(self.body.to_string())
        }
    }

    /// Page whose every locator lookup times out.
    struct TimeoutPage {
        body: &'static str,
    }

    impl ProductPage for TimeoutPage {
        fn locate_text(&self, _selector: &str, _timeout: Duration) -> Result<Option<String>> {
            Ok(None)
        }

        fn full_text(&self) -> Result<String> {
            Ok(self.body.to_string())
        }
    }

    struct CrashedPage;

    impl ProductPage for CrashedPage {
        fn locate_text(&self, _selector: &str, _timeout: Duration) -> Result<Option<String>> {
            Err(AppError::Session("tab crashed".to_string()))
        }

        fn full_text(&self) -> Result<String> {
            Err(AppError::Session("tab crashed".to_string()))
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_earlier_selector_wins() {
        let extractor = PriceExtractor::with_selectors(
            vec!["a".to_string(), "b".to_string()],
            Duration::from_millis(10),
        );
        let page = FixturePage::new(&[("a", "₹1,234.50"), ("b", "₹999")], "");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("1234.50")));
    }

    #[test]
    fn test_unresolvable_selector_is_skipped() {
        let extractor = PriceExtractor::with_selectors(
            vec!["missing".to_string(), "present".to_string()],
            Duration::from_millis(10),
        );
        let page = FixturePage::new(&[("present", "$49.99")], "");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("49.99")));
    }

    #[test]
    fn test_unnormalizable_selector_text_is_skipped() {
        let extractor = PriceExtractor::with_selectors(
            vec!["junk".to_string(), "good".to_string()],
            Duration::from_millis(10),
        );
        let page = FixturePage::new(&[("junk", "Currently unavailable"), ("good", "₹750")], "");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("750")));
    }

    #[test]
    fn test_fallback_scan_finds_first_marked_line() {
        let extractor =
            PriceExtractor::with_selectors(vec!["nope".to_string()], Duration::from_millis(10));
        let page = FixturePage::new(
            &[],
            "Limited offer!\nWas Rs. 2,999\nsimilar items from ₹1,800",
        );

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("2999")));
    }

    #[test]
    fn test_fallback_scan_accepts_trailing_marker() {
        let extractor =
            PriceExtractor::with_selectors(vec!["nope".to_string()], Duration::from_millis(10));
        let page = FixturePage::new(&[], "Now only 1,499 INR while stocks last");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("1499")));
    }

    #[test]
    fn test_fallback_skips_unmarked_digit_lines() {
        // Digits without a currency marker are not price candidates.
        let extractor =
            PriceExtractor::with_selectors(vec!["nope".to_string()], Duration::from_millis(10));
        let page = FixturePage::new(&[], "4.2 stars from 1,205 ratings\n₹349");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("349")));
    }

    #[test]
    fn test_all_timeouts_and_empty_fallback_is_no_value() {
        let extractor = PriceExtractor::new();
        let page = TimeoutPage {
            body: "Out of stock. Check back soon.",
        };

        assert_eq!(extractor.extract(&page).unwrap(), None);
    }

    #[test]
    fn test_session_fault_propagates() {
        let extractor = PriceExtractor::new();
        let result = extractor.extract(&CrashedPage);

        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[test]
    fn test_with_timeout_keeps_default_selectors() {
        let extractor = PriceExtractor::with_timeout(Duration::from_millis(10));
        let page = FixturePage::new(&[("span.a-price-whole", "$19.99")], "");

        assert_eq!(extractor.extract(&page).unwrap(), Some(dec("19.99")));
    }

    #[test]
    fn test_default_selector_order_matches_source_priority() {
        assert_eq!(DEFAULT_PRICE_SELECTORS[0], "span.a-price-whole");
        assert_eq!(DEFAULT_PRICE_SELECTORS[1], "span.a-offscreen");
    }
}
