use std::collections::HashMap;

/// Word polarities in [-1, 1] for the lexicon-average strategy. Mild words
/// like "okay" sit inside the neutral band on purpose.
const WORD_POLARITIES: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("comfortable", 0.5),
    ("durable", 0.5),
    ("excellent", 1.0),
    ("fantastic", 0.9),
    ("fast", 0.2),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("impressed", 0.7),
    ("love", 0.5),
    ("loved", 0.7),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleased", 0.6),
    ("quality", 0.3),
    ("recommend", 0.4),
    ("reliable", 0.5),
    ("satisfied", 0.5),
    ("smooth", 0.4),
    ("solid", 0.4),
    ("sturdy", 0.5),
    ("superb", 0.9),
    ("value", 0.3),
    ("wonderful", 1.0),
    ("worth", 0.3),
    // mild, inside the neutral band
    ("average", 0.0),
    ("fine", 0.1),
    ("ok", 0.1),
    ("okay", 0.1),
    // negative
    ("awful", -1.0),
    ("bad", -0.7),
    ("broke", -0.4),
    ("broken", -0.4),
    ("cheap", -0.3),
    ("crack", -0.4),
    ("cracked", -0.4),
    ("defective", -0.7),
    ("disappointed", -0.6),
    ("disappointing", -0.6),
    ("expensive", -0.3),
    ("fake", -0.5),
    ("faulty", -0.6),
    ("flimsy", -0.5),
    ("garbage", -0.8),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("junk", -0.7),
    ("misleading", -0.5),
    ("poor", -0.4),
    ("refund", -0.3),
    ("return", -0.2),
    ("returned", -0.3),
    ("scam", -0.9),
    ("slow", -0.3),
    ("stopped", -0.3),
    ("terrible", -1.0),
    ("useless", -0.5),
    ("waste", -0.4),
    ("worst", -1.0),
    ("worthless", -0.8),
];

/// Scores a text as the average polarity of its lexicon-known words.
/// A text with no known words scores 0.0.
pub struct LexiconClassifier {
    polarities: HashMap<&'static str, f64>,
}

impl LexiconClassifier {
    pub fn new() -> Self {
        Self {
            polarities: WORD_POLARITIES.iter().copied().collect(),
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        let mut sum = 0.0;
        let mut hits = 0usize;

        for token in tokenize(text) {
            if let Some(polarity) = self.polarities.get(token.as_str()) {
                sum += polarity;
                hits += 1;
            }
        }

        if hits == 0 {
            0.0
        } else {
            (sum / hits as f64).clamp(-1.0, 1.0)
        }
    }
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased word tokens; apostrophes stay inside a token so contractions
/// survive as single words.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.trim_matches('\'').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
