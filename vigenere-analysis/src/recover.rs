//! Keyword recovery by per-column frequency analysis
//!
//! Once the keyword length is fixed every column is a plain Caesar cipher. Each of
//! the 26 shifts is tried, the column is read back under it and compared with the
//! reference language; the best shift is that column's key letter.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::alphabet::{Letter, Text, LETTER_COUNT};
use crate::cipher::Keyword;
use crate::confidence::{self, Caution, Confidence, SCORE_TIE_EPSILON};
use crate::error::{Result, VigenereError};
use crate::frequency::FrequencyProfile;
use crate::language::{LanguageModel, ENGLISH};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How a shifted column is compared with the reference profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Dot product of sample and reference frequencies. Best shift has the smallest
    /// `|score − target|`; correctly aligned English scores about 0.065.
    IcTarget { target: f64 },
    /// Pearson correlation of the two 26-letter frequency vectors. Best shift has the
    /// largest score.
    Pearson,
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring::IcTarget {
            target: ENGLISH.expected_match,
        }
    }
}

impl Scoring {
    /// Score of one un-shifted sample against the reference; see the variant docs for polarity
    pub fn score(&self, sample: &[f64; LETTER_COUNT], reference: &[f64; LETTER_COUNT]) -> f64 {
        match self {
            Scoring::IcTarget { .. } => dot(sample, reference),
            Scoring::Pearson => pearson(sample, reference),
        }
    }

    /// Whether `candidate` beats `best` under this scoring's polarity
    ///
    /// Strict comparison: an equal score never replaces an earlier (smaller) shift.
    fn improves(&self, candidate: f64, best: f64) -> bool {
        match self {
            Scoring::IcTarget { target } => (candidate - target).abs() < (best - target).abs(),
            Scoring::Pearson => candidate > best,
        }
    }

    /// Distance between two scores in "goodness" units, for tie detection
    fn gap(&self, a: f64, b: f64) -> f64 {
        match self {
            Scoring::IcTarget { target } => ((a - target).abs() - (b - target).abs()).abs(),
            Scoring::Pearson => (a - b).abs(),
        }
    }
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scoring::IcTarget { target } => write!(f, "ic-target ({:.3})", target),
            Scoring::Pearson => write!(f, "pearson"),
        }
    }
}

fn dot(a: &[f64; LETTER_COUNT], b: &[f64; LETTER_COUNT]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Pearson correlation; 0 when either vector has no variance
fn pearson(a: &[f64; LETTER_COUNT], b: &[f64; LETTER_COUNT]) -> f64 {
    let n = LETTER_COUNT as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let (dx, dy) = (x - mean_a, y - mean_b);
        covariance += dx * dy;
        variance_a += dx * dx;
        variance_b += dy * dy;
    }

    // A flat profile leaves rounding residue well below this instead of exact zero
    let flat = f64::EPSILON * f64::EPSILON;
    if variance_a <= flat || variance_b <= flat {
        return 0.0;
    }
    covariance / (variance_a * variance_b).sqrt()
}

/// Result of analysing one column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport {
    pub column: usize,
    /// Number of ciphertext symbols in the column
    pub len: usize,
    /// Score of every shift `0..26`
    pub scores: [f64; LETTER_COUNT],
    pub key: Letter,
    pub runner_up: Letter,
}

impl ColumnReport {
    pub fn best_score(&self) -> f64 {
        self.scores[self.key.index() as usize]
    }

    pub fn runner_up_score(&self) -> f64 {
        self.scores[self.runner_up.index() as usize]
    }
}

/// A recovered keyword together with the evidence for it
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    pub keyword: Keyword,
    /// Name of the language model the columns were scored against
    pub language: &'static str,
    pub columns: Vec<ColumnReport>,
    pub confidence: Confidence,
}

/// Find the best shift for one column
///
/// Scores are computed for shifts in ascending order and only a strictly better
/// score replaces the current best, so ties resolve to the smallest shift.
pub fn analyze_column(
    column: usize,
    letters: &[Letter],
    scoring: Scoring,
    model: &LanguageModel,
) -> Result<ColumnReport> {
    let profile = FrequencyProfile::from_letters(letters).ok_or(VigenereError::EmptyText)?;

    let mut scores = [0.0; LETTER_COUNT];
    for (shift, score) in scores.iter_mut().enumerate() {
        *score = scoring.score(&profile.unshifted(shift), &model.frequencies);
    }
    trace!(column, ?scores, "Shift scores");

    let rank = |skip: Option<usize>| {
        (0..LETTER_COUNT)
            .filter(|&shift| Some(shift) != skip)
            .fold(None, |best: Option<usize>, shift| match best {
                Some(b) if !scoring.improves(scores[shift], scores[b]) => Some(b),
                _ => Some(shift),
            })
            .unwrap_or(0)
    };
    let key = rank(None);
    let runner_up = rank(Some(key));

    Ok(ColumnReport {
        column,
        len: letters.len(),
        scores,
        key: Letter::from_index(key as u8)?,
        runner_up: Letter::from_index(runner_up as u8)?,
    })
}

/// Recover a keyword of `length` letters from normalized ciphertext
///
/// # Arguments
///
/// * `text` - Normalized ciphertext.
/// * `length` - Committed keyword length, `1 ≤ length ≤ text.len()`.
/// * `scoring` - Column scoring function.
///
/// # Returns
///
/// The keyword (one letter per column, in column order), per-column reports and a
/// confidence flag for short columns or tied shifts.
pub fn recover_keyword(text: &Text, length: usize, scoring: Scoring) -> Result<Recovery> {
    recover_keyword_with(text, length, scoring, &ENGLISH)
}

/// [`recover_keyword`] against an explicit language model
pub fn recover_keyword_with(
    text: &Text,
    length: usize,
    scoring: Scoring,
    model: &LanguageModel,
) -> Result<Recovery> {
    if text.is_empty() {
        return Err(VigenereError::EmptyText);
    }
    if length == 0 || length > text.len() {
        return Err(VigenereError::InvalidKeywordLength {
            length,
            max: text.len(),
        });
    }

    let columns = text.columns(length)?;

    #[cfg(feature = "parallel")]
    let reports = columns
        .par_iter()
        .enumerate()
        .map(|(i, letters)| analyze_column(i, letters, scoring, model))
        .collect::<Result<Vec<ColumnReport>>>()?;
    #[cfg(not(feature = "parallel"))]
    let reports = columns
        .iter()
        .enumerate()
        .map(|(i, letters)| analyze_column(i, letters, scoring, model))
        .collect::<Result<Vec<ColumnReport>>>()?;

    let mut cautions: Vec<Caution> = confidence::short_columns(text.len(), length)
        .into_iter()
        .collect();
    cautions.extend(
        reports
            .iter()
            .filter(|r| scoring.gap(r.best_score(), r.runner_up_score()) <= SCORE_TIE_EPSILON)
            .map(|r| Caution::AmbiguousShift { column: r.column }),
    );

    let keyword = Keyword::from_letters(reports.iter().map(|r| r.key).collect())?;
    let confidence = Confidence::from_cautions(cautions);
    if confidence.is_high() {
        debug!(%keyword, %scoring, "Recovered keyword");
    } else {
        warn!(%keyword, %confidence, "Recovered keyword with low confidence");
    }

    Ok(Recovery {
        keyword,
        language: model.name,
        columns: reports,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{transform, Direction};
    use crate::fixtures::{MOBY_DICK, QPWKA, STINSON};

    const BOTH: [Scoring; 2] = [
        Scoring::IcTarget { target: 0.065 },
        Scoring::Pearson,
    ];

    #[test]
    fn test_stinson_keyword() {
        let text = Text::normalize(STINSON);
        for scoring in BOTH {
            let recovery = recover_keyword(&text, 6, scoring).unwrap();
            assert_eq!(recovery.keyword.to_string(), "CRYPTO", "{scoring}");
            assert_eq!(recovery.confidence, Confidence::High);
            assert_eq!(recovery.language, "English");
        }
    }

    #[test]
    fn test_pearson_on_short_sample() {
        let recovery = recover_keyword(&Text::normalize(QPWKA), 5, Scoring::Pearson).unwrap();
        assert_eq!(recovery.keyword.to_string(), "EVERY");
    }

    #[test]
    fn test_every_caesar_shift_is_recovered() {
        let plain = Text::normalize(MOBY_DICK);
        for shift in 0..26u8 {
            let key = Keyword::from_letters(vec![Letter::from_index(shift).unwrap()]).unwrap();
            let cipher = transform(&plain, &key, Direction::Encrypt);
            for scoring in BOTH {
                let recovery = recover_keyword(&cipher, 1, scoring).unwrap();
                assert_eq!(recovery.keyword, key, "shift {shift}, {scoring}");
            }
        }
    }

    #[test]
    fn test_prose_keywords() {
        let plain = Text::normalize(MOBY_DICK);
        for key in ["LEMON", "CIPHER", "MATH", "KEY", "SECRETS"] {
            let key = Keyword::new(key).unwrap();
            let cipher = transform(&plain, &key, Direction::Encrypt);
            for scoring in BOTH {
                let recovery = recover_keyword(&cipher, key.len(), scoring).unwrap();
                assert_eq!(recovery.keyword, key, "{scoring}");
                assert_eq!(recovery.columns.len(), key.len());
            }
        }
    }

    #[test]
    fn test_ties_resolve_to_smallest_shift() {
        // Every letter once: all shifts score identically
        let text = Text::normalize("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        for scoring in BOTH {
            let recovery = recover_keyword(&text, 1, scoring).unwrap();
            assert_eq!(recovery.keyword.to_string(), "A");
            assert_eq!(recovery.columns[0].runner_up.to_char(), 'B');
            assert!(recovery
                .confidence
                .cautions()
                .contains(&Caution::AmbiguousShift { column: 0 }));
        }
    }

    #[test]
    fn test_short_columns_flagged() {
        let text = Text::normalize("YADLUTAHBPXU");
        let recovery = recover_keyword(&text, 4, Scoring::Pearson).unwrap();
        assert!(recovery
            .confidence
            .cautions()
            .contains(&Caution::ShortColumns { average: 3.0 }));
    }

    #[test]
    fn test_invalid_lengths() {
        let text = Text::normalize("YADLUTAHBPXU");
        assert_eq!(
            recover_keyword(&text, 0, Scoring::Pearson),
            Err(VigenereError::InvalidKeywordLength { length: 0, max: 12 })
        );
        assert_eq!(
            recover_keyword(&text, 13, Scoring::Pearson),
            Err(VigenereError::InvalidKeywordLength { length: 13, max: 12 })
        );
        assert_eq!(
            recover_keyword(&Text::default(), 1, Scoring::Pearson),
            Err(VigenereError::EmptyText)
        );
    }

    #[test]
    fn test_pearson_bounds() {
        let reference = ENGLISH.frequencies;
        assert!((pearson(&reference, &reference) - 1.0).abs() < 1e-12);
        assert_eq!(pearson(&[1.0 / 26.0; LETTER_COUNT], &reference), 0.0);
        assert_eq!(pearson(&reference, &[0.0; LETTER_COUNT]), 0.0);
    }

    #[test]
    fn test_shifting_sample_equals_shifting_reference() {
        // Un-shifting the sample by s and shifting the reference by s give the same dot product
        let profile = FrequencyProfile::from_letters(Text::normalize(STINSON).letters()).unwrap();
        let reference = ENGLISH.frequencies;
        for shift in 0..LETTER_COUNT {
            let shifted_reference: [f64; LETTER_COUNT] =
                std::array::from_fn(|i| reference[(i + LETTER_COUNT - shift) % LETTER_COUNT]);
            let a = dot(&profile.unshifted(shift), &reference);
            let b = dot(profile.frequencies(), &shifted_reference);
            assert!((a - b).abs() < 1e-12);
        }
    }
}
