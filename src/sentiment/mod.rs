pub mod compound;
pub mod lexicon;

pub use compound::CompoundClassifier;
pub use lexicon::LexiconClassifier;

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{SentimentDistribution, SentimentLabel, SentimentTally};

/// Identity of a classification strategy, used as the key of aggregation
/// results so the two strategies' numbers sit side by side.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Lexicon,
    Compound,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Lexicon => write!(f, "lexicon"),
            StrategyKind::Compound => write!(f, "compound"),
        }
    }
}

/// The fixed set of classification strategies. Each scores a text to a
/// polarity in [-1, 1] and applies its own thresholds.
pub enum SentimentStrategy {
    Lexicon(LexiconClassifier),
    Compound(CompoundClassifier),
}

impl SentimentStrategy {
    /// Both strategies with their built-in lexicons.
    pub fn all() -> Vec<SentimentStrategy> {
        vec![
            SentimentStrategy::Lexicon(LexiconClassifier::new()),
            SentimentStrategy::Compound(CompoundClassifier::new()),
        ]
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            SentimentStrategy::Lexicon(_) => StrategyKind::Lexicon,
            SentimentStrategy::Compound(_) => StrategyKind::Compound,
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        match self {
            SentimentStrategy::Lexicon(classifier) => classifier.score(text),
            SentimentStrategy::Compound(classifier) => classifier.score(text),
        }
    }

    /// Strategy-specific thresholds over the polarity score.
    pub fn classify(&self, text: &str) -> SentimentLabel {
        let score = self.score(text);
        match self {
            SentimentStrategy::Lexicon(_) => {
                if score > 0.1 {
                    SentimentLabel::Positive
                } else if score < -0.1 {
                    SentimentLabel::Negative
                } else {
                    SentimentLabel::Neutral
                }
            }
            SentimentStrategy::Compound(_) => {
                if score >= 0.05 {
                    SentimentLabel::Positive
                } else if score <= -0.05 {
                    SentimentLabel::Negative
                } else {
                    SentimentLabel::Neutral
                }
            }
        }
    }
}

/// Per-strategy outcome for one batch: raw counts plus the derived
/// percentage distribution.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StrategyReport {
    pub tally: SentimentTally,
    pub distribution: SentimentDistribution,
}

/// Classifies every text under every strategy independently. Blank texts
/// are skipped and counted in the tally, never fatal; a text's bucket under
/// one strategy has no effect on the other.
pub fn aggregate(
    texts: &[String],
    strategies: &[SentimentStrategy],
) -> BTreeMap<StrategyKind, StrategyReport> {
    let mut reports = BTreeMap::new();

    for strategy in strategies {
        let mut tally = SentimentTally::default();

        for text in texts {
            if text.trim().is_empty() {
                debug!(strategy = %strategy.kind(), "skipping blank review text");
                tally.skip();
                continue;
            }
            tally.count(strategy.classify(text));
        }

        reports.insert(
            strategy.kind(),
            StrategyReport {
                tally,
                distribution: SentimentDistribution::from_tally(&tally),
            },
        );
    }

    reports
}
