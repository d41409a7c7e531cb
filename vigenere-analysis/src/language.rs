//! Reference language model

use crate::alphabet::LETTER_COUNT;

/// Letter statistics of a natural language
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LanguageModel {
    pub name: &'static str,
    /// Probability of each letter `A..Z` in ordinary prose
    pub frequencies: [f64; LETTER_COUNT],
    /// Index of coincidence of plaintext, scaled by 26 (random text scores 1.0)
    pub coincidence: f64,
    /// Expected `Σ p_i²`, i.e. the dot product of a correctly aligned sample with
    /// the reference frequencies
    pub expected_match: f64,
}

/// Average letter occurrence in English text
pub const ENGLISH: LanguageModel = LanguageModel {
    name: "English",
    frequencies: [
        0.082, 0.015, 0.028, 0.043, 0.127, 0.022, 0.020, 0.061,
        0.070, 0.002, 0.008, 0.040, 0.024, 0.067, 0.075, 0.019,
        0.001, 0.060, 0.063, 0.091, 0.028, 0.010, 0.023, 0.001,
        0.020, 0.001,
    ],
    coincidence: 1.73,
    expected_match: 0.065,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_frequencies_sum_to_one() {
        let total: f64 = ENGLISH.frequencies.iter().sum();
        assert!((total - 1.0).abs() < 0.01, "sum was {total}");
    }

    #[test]
    fn test_expected_match_is_self_dot_product() {
        let dot: f64 = ENGLISH.frequencies.iter().map(|p| p * p).sum();
        assert!((dot - ENGLISH.expected_match).abs() < 0.002, "dot was {dot}");
        assert!((dot * LETTER_COUNT as f64 - ENGLISH.coincidence).abs() < 0.05);
    }
}
