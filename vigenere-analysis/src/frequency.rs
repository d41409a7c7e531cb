//! Letter counts, sample profiles and the index of coincidence

use crate::alphabet::{Letter, LETTER_COUNT};

/// Count the occurrences of each letter
pub fn count_letters(letters: &[Letter]) -> [usize; LETTER_COUNT] {
    let mut counts = [0usize; LETTER_COUNT];

    for letter in letters {
        counts[letter.index() as usize] += 1;
    }

    counts
}

/// Relative letter frequencies of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyProfile([f64; LETTER_COUNT]);

impl FrequencyProfile {
    /// Sample profile of a column: count ÷ column length
    ///
    /// Returns `None` for an empty sample, which has no distribution.
    pub fn from_letters(letters: &[Letter]) -> Option<Self> {
        if letters.is_empty() {
            return None;
        }

        let total = letters.len() as f64;
        let counts = count_letters(letters);
        let mut profile = [0.0; LETTER_COUNT];
        for (p, &n) in profile.iter_mut().zip(counts.iter()) {
            *p = n as f64 / total;
        }

        Some(Self(profile))
    }

    pub fn frequencies(&self) -> &[f64; LETTER_COUNT] {
        &self.0
    }

    /// The profile read back `shift` positions, i.e. `result[i] = self[(i + shift) % 26]`
    ///
    /// If the sample was encrypted with key letter `shift`, the result is the
    /// profile of the underlying plaintext.
    pub fn unshifted(&self, shift: usize) -> [f64; LETTER_COUNT] {
        let mut result = [0.0; LETTER_COUNT];
        for (i, value) in result.iter_mut().enumerate() {
            *value = self.0[(i + shift) % LETTER_COUNT];
        }
        result
    }
}

/// Index of coincidence: `Σ nᵢ(nᵢ−1) / (N(N−1))`
///
/// The probability that two symbols drawn without replacement are equal. Returns
/// `None` when fewer than two symbols are present.
pub fn index_of_coincidence(counts: &[usize; LETTER_COUNT]) -> Option<f64> {
    let total: usize = counts.iter().sum();
    if total < 2 {
        return None;
    }

    let numerator: usize = counts.iter().map(|&n| n * n.saturating_sub(1)).sum();
    Some(numerator as f64 / (total * (total - 1)) as f64)
}

/// Index of coincidence scaled by the alphabet size: `Σ nᵢ(nᵢ−1) / (N(N−1)/26)`
///
/// Uniformly random text approaches 1.0; English plaintext sits near 1.73.
pub fn normalized_ic(counts: &[usize; LETTER_COUNT]) -> Option<f64> {
    index_of_coincidence(counts).map(|ic| ic * LETTER_COUNT as f64)
}
