use std::collections::{HashMap, HashSet};

use super::lexicon::tokenize;

/// Token valences on the conventional -4..4 intensity scale used by
/// compound-score sentiment models.
const TOKEN_VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("comfortable", 1.5),
    ("decent", 1.1),
    ("durable", 1.6),
    ("excellent", 2.7),
    ("fantastic", 2.6),
    ("fine", 0.8),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("impressed", 2.2),
    ("love", 3.2),
    ("loved", 2.9),
    ("nice", 1.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("reliable", 1.7),
    ("satisfied", 1.6),
    ("smooth", 1.3),
    ("solid", 1.2),
    ("sturdy", 1.4),
    ("superb", 3.0),
    ("wonderful", 2.7),
    ("works", 1.4),
    ("worth", 0.9),
    // negative
    ("awful", -3.4),
    ("bad", -2.5),
    ("broke", -1.4),
    ("broken", -1.6),
    ("cheap", -0.8),
    ("cracked", -1.3),
    ("defective", -2.1),
    ("disappointed", -2.1),
    ("disappointing", -2.2),
    ("fake", -1.9),
    ("faulty", -1.9),
    ("flimsy", -1.5),
    ("garbage", -2.5),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("junk", -2.0),
    ("misleading", -1.6),
    ("poor", -1.9),
    ("refund", -0.8),
    ("returned", -0.9),
    ("scam", -2.3),
    ("slow", -1.1),
    ("stopped", -0.9),
    ("terrible", -3.1),
    ("useless", -1.8),
    ("waste", -1.8),
    ("worst", -3.1),
    ("worthless", -2.3),
];

/// Degree modifiers applied to a following sentiment word, in the
/// direction of that word's valence.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("extremely", 0.293),
    ("really", 0.293),
    ("so", 0.293),
    ("totally", 0.293),
    ("very", 0.293),
    ("barely", -0.293),
    ("kinda", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "without", "cannot", "can't", "don't", "doesn't",
    "didn't", "won't", "wouldn't", "isn't", "wasn't", "aren't", "couldn't",
];

/// How much a negation in the preceding window flips and damps a valence.
const NEGATION_FACTOR: f64 = -0.74;

/// Each exclamation mark (up to four) amplifies the raw sum.
const EXCLAMATION_BOOST: f64 = 0.292;

/// Normalization constant for `sum / sqrt(sum^2 + alpha)`.
const NORMALIZATION_ALPHA: f64 = 15.0;

/// Model-style compound scorer: summed token valences with negation and
/// booster handling, squashed into [-1, 1].
pub struct CompoundClassifier {
    valences: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negators: HashSet<&'static str>,
}

impl CompoundClassifier {
    pub fn new() -> Self {
        Self {
            valences: TOKEN_VALENCES.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negators: NEGATORS.iter().copied().collect(),
        }
    }

    pub fn score(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        let mut sum = 0.0;

        for (i, token) in tokens.iter().enumerate() {
            let valence = match self.valences.get(token.as_str()) {
                Some(&valence) => valence,
                None => continue,
            };

            let mut adjusted = valence;

            // Boosters act within a two-token window before the word
            for prior in &tokens[i.saturating_sub(2)..i] {
                if let Some(&boost) = self.boosters.get(prior.as_str()) {
                    adjusted += if valence > 0.0 { boost } else { -boost };
                }
            }

            // Negation within a three-token window flips and damps
            if tokens[i.saturating_sub(3)..i]
                .iter()
                .any(|prior| self.negators.contains(prior.as_str()))
            {
                adjusted *= NEGATION_FACTOR;
            }

            sum += adjusted;
        }

        let emphasis = text.matches('!').count().min(4) as f64 * EXCLAMATION_BOOST;
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }

        (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
    }
}

impl Default for CompoundClassifier {
    fn default() -> Self {
        Self::new()
    }
}
