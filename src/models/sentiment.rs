use serde::{Deserialize, Serialize};

/// Bucket a single review text lands in under one classification strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Per-bucket counts for one strategy over one batch. `skipped` records
/// texts excluded from classification (blank input); they are not part of
/// the classified total.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub skipped: usize,
}

impl SentimentTally {
    pub fn count(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Classified texts only; skipped texts never count toward the total.
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// A tally reduced to percentages of the classified total, each rounded to
/// one decimal place. All-zero when the tally is empty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SentimentDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl SentimentDistribution {
    pub fn from_tally(tally: &SentimentTally) -> Self {
        let total = tally.total();
        if total == 0 {
            return Self {
                positive: 0.0,
                negative: 0.0,
                neutral: 0.0,
            };
        }

        let pct = |count: usize| (count as f64 / total as f64 * 1000.0).round() / 10.0;
        Self {
            positive: pct(tally.positive),
            negative: pct(tally.negative),
            neutral: pct(tally.neutral),
        }
    }
}
