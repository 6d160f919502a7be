//! Explainability for best-match results
//!
//! Shows which reference phrase won and how the input words were aligned
//! against it.

use serde::Serialize;

/// One aligned word pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordAlignment {
    pub input_word: String,
    pub reference_word: String,
    /// Word similarity after thresholding; 0.0 marks a forced pairing
    pub similarity: f64,
}

/// The winning catalog entry with its word alignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExplanation {
    /// Input phrase as given
    pub input: String,
    /// Resolved label
    pub label: String,
    /// Reference phrase that scored best
    pub reference: String,
    /// Position of that phrase in the catalog
    pub entry_index: usize,
    /// Hybrid Jaccard score
    pub score: f64,
    pub alignment: Vec<WordAlignment>,
}

impl MatchExplanation {
    /// Aligned pairs that cleared the threshold
    pub fn genuine_pairs(&self) -> impl Iterator<Item = &WordAlignment> {
        self.alignment.iter().filter(|pair| pair.similarity > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchExplanation {
        MatchExplanation {
            input: "platinum hair".to_string(),
            label: "blond".to_string(),
            reference: "blond hair".to_string(),
            entry_index: 3,
            score: 1.0 / 3.0,
            alignment: vec![
                WordAlignment {
                    input_word: "platinum".to_string(),
                    reference_word: "blond".to_string(),
                    similarity: 0.0,
                },
                WordAlignment {
                    input_word: "hair".to_string(),
                    reference_word: "hair".to_string(),
                    similarity: 1.0,
                },
            ],
        }
    }

    #[test]
    fn test_genuine_pairs() {
        let explanation = sample();
        let genuine: Vec<_> = explanation.genuine_pairs().map(|p| p.input_word.as_str()).collect();
        assert_eq!(genuine, vec!["hair"]);
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["label"], "blond");
        assert_eq!(value["entry_index"], 3);
        assert_eq!(value["alignment"][1]["reference_word"], "hair");
    }
}
