//! Kasiski examination
//!
//! Repeated n-grams in Vigenère ciphertext are usually the same plaintext fragment
//! enciphered under the same keyword offset, so the distance between them is a
//! multiple of the keyword length. The most common factor of the most common
//! distances is taken as the candidate length.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace};

use crate::alphabet::{Letter, Text};
use crate::confidence::{self, Caution, Confidence};
use crate::error::{Result, VigenereError};

use super::{Indeterminate, LengthEstimate, LengthEstimator};

/// Parameters of the Kasiski examination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KasiskiParams {
    /// Length of the repeated substrings to look for
    pub ngram_size: usize,
    /// How many of the most frequent distances are factored
    pub top_distances: usize,
    /// Smallest factor considered a plausible keyword length
    pub min_factor: usize,
    /// Winner tally minus runner-up tally below this flags low confidence
    pub margin: usize,
}

impl Default for KasiskiParams {
    fn default() -> Self {
        Self {
            ngram_size: 3,
            top_distances: 5,
            min_factor: 4,
            margin: 2,
        }
    }
}

impl KasiskiParams {
    pub fn validate(&self) -> Result<()> {
        if self.ngram_size == 0 {
            return Err(VigenereError::InvalidParameter(
                "n-gram size must be at least 1".to_string(),
            ));
        }
        if self.top_distances == 0 {
            return Err(VigenereError::InvalidParameter(
                "number of top distances must be at least 1".to_string(),
            ));
        }
        if self.min_factor == 0 {
            return Err(VigenereError::InvalidParameter(
                "minimum factor must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything the examination found, for display and for the estimate itself
#[derive(Debug, Clone, PartialEq)]
pub struct KasiskiReport {
    /// Number of distinct n-grams that occur more than once
    pub repeated_ngrams: usize,
    /// `(distance, occurrences)`, most frequent first, ties by smaller distance
    pub distances: Vec<(usize, usize)>,
    /// `(factor, tally)` over the top distances, highest tally first, ties by smaller factor
    pub factors: Vec<(usize, usize)>,
    pub estimate: LengthEstimate,
}

impl LengthEstimator for KasiskiParams {
    fn estimate(&self, text: &Text) -> Result<LengthEstimate> {
        examine(text, self).map(|report| report.estimate)
    }
}

/// Run the Kasiski examination
///
/// # Arguments
///
/// * `text` - Normalized ciphertext (must not be empty).
/// * `params` - N-gram size, number of distances to factor and factor threshold.
///
/// # Returns
///
/// A report whose estimate is `Indeterminate` when the text is shorter than two
/// n-grams, nothing repeats, or no top distance has a factor above the threshold.
pub fn examine(text: &Text, params: &KasiskiParams) -> Result<KasiskiReport> {
    params.validate()?;
    if text.is_empty() {
        return Err(VigenereError::EmptyText);
    }

    let indeterminate = |reason, repeated_ngrams, distances| KasiskiReport {
        repeated_ngrams,
        distances,
        factors: Vec::new(),
        estimate: LengthEstimate::Indeterminate(reason),
    };

    let needed = 2 * params.ngram_size;
    if text.len() < needed {
        debug!(len = text.len(), needed, "Text too short for Kasiski examination");
        return Ok(indeterminate(
            Indeterminate::TooShort { len: text.len(), needed },
            0,
            Vec::new(),
        ));
    }

    let positions = ngram_positions(text.letters(), params.ngram_size);
    let repeated: Vec<&Vec<usize>> = positions.values().filter(|p| p.len() > 1).collect();

    let distances = rank_distances(&repeated);
    debug!(
        repeated_ngrams = repeated.len(),
        distinct_distances = distances.len(),
        "Collected repeat distances"
    );
    if distances.is_empty() {
        return Ok(indeterminate(Indeterminate::NoRepeats, 0, Vec::new()));
    }

    let factors = rank_factors(&distances, params, text.len());
    trace!(?factors, "Factor tallies");

    let Some(&(length, best)) = factors.first() else {
        return Ok(indeterminate(Indeterminate::NoFactors, repeated.len(), distances));
    };
    let runner_up = factors.get(1).map_or(0, |&(_, tally)| tally);

    let mut cautions = Vec::new();
    if best - runner_up < params.margin {
        cautions.push(Caution::NarrowFactorMargin { best, runner_up });
    }
    cautions.extend(confidence::short_columns(text.len(), length));

    debug!(length, best, runner_up, "Kasiski candidate length");

    Ok(KasiskiReport {
        repeated_ngrams: repeated.len(),
        distances,
        factors,
        estimate: LengthEstimate::Determined {
            length,
            confidence: Confidence::from_cautions(cautions),
        },
    })
}

/// Start position of every occurrence of every n-gram
fn ngram_positions(letters: &[Letter], size: usize) -> HashMap<&[Letter], Vec<usize>> {
    let mut positions: HashMap<&[Letter], Vec<usize>> = HashMap::new();

    for (i, ngram) in letters.windows(size).enumerate() {
        positions.entry(ngram).or_default().push(i);
    }

    positions
}

/// Pool distances from each first occurrence to every later one and rank them
fn rank_distances(repeated: &[&Vec<usize>]) -> Vec<(usize, usize)> {
    let mut tally: BTreeMap<usize, usize> = BTreeMap::new();

    for positions in repeated {
        let first = positions[0];
        for &later in &positions[1..] {
            *tally.entry(later - first).or_default() += 1;
        }
    }

    let mut ranked: Vec<(usize, usize)> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

/// Tally factors of the top distances; a factor may not exceed the text length
fn rank_factors(
    distances: &[(usize, usize)],
    params: &KasiskiParams,
    text_len: usize,
) -> Vec<(usize, usize)> {
    let mut tally: BTreeMap<usize, usize> = BTreeMap::new();

    for &(distance, _) in distances.iter().take(params.top_distances) {
        for factor in params.min_factor..=distance.min(text_len) {
            if distance % factor == 0 {
                *tally.entry(factor).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(usize, usize)> = tally.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}
