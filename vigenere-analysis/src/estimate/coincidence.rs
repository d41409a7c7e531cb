//! Index-of-coincidence scan and the Friedman estimate

use tracing::{debug, trace};

use crate::alphabet::Text;
use crate::confidence::{self, Confidence};
use crate::error::{Result, VigenereError};
use crate::frequency::{count_letters, index_of_coincidence, normalized_ic};
use crate::language::ENGLISH;

use super::{LengthEstimate, LengthEstimator};

/// Parameters of the index-of-coincidence scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcScanParams {
    /// Largest keyword length tried
    pub max_length: usize,
    /// Scaled IC expected from plaintext of the target language
    pub reference_ic: f64,
}

impl Default for IcScanParams {
    fn default() -> Self {
        Self {
            max_length: 10,
            reference_ic: ENGLISH.coincidence,
        }
    }
}

impl IcScanParams {
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(VigenereError::InvalidParameter(
                "maximum keyword length must be at least 1".to_string(),
            ));
        }
        if !self.reference_ic.is_finite() {
            return Err(VigenereError::InvalidParameter(
                "reference IC must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Average column IC for one candidate length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcScanRow {
    pub length: usize,
    pub average_ic: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IcScanReport {
    pub rows: Vec<IcScanRow>,
    pub estimate: LengthEstimate,
}

impl LengthEstimator for IcScanParams {
    fn estimate(&self, text: &Text) -> Result<LengthEstimate> {
        scan(text, self).map(|report| report.estimate)
    }
}

/// Average scaled IC over the columns of `text` split into `length` columns
///
/// Columns with fewer than two symbols carry no coincidence information and are
/// left out; `None` if no column qualifies or `length` is zero.
pub fn average_column_ic(text: &Text, length: usize) -> Option<f64> {
    let ics: Vec<f64> = text
        .columns(length)
        .ok()?
        .iter()
        .filter_map(|column| normalized_ic(&count_letters(column)))
        .collect();

    if ics.is_empty() {
        None
    } else {
        Some(ics.iter().sum::<f64>() / ics.len() as f64)
    }
}

/// Try every length in `1..=max` and keep the one whose average IC is closest to
/// the reference
///
/// Score polarity: smaller `|average − reference|` is better, ties go to the smaller
/// length. The search stops at half the text length so every column has at least
/// two symbols. This never gives up, but with fewer than about ten symbols per
/// column the choice is unreliable and the estimate is flagged as low confidence.
pub fn scan(text: &Text, params: &IcScanParams) -> Result<IcScanReport> {
    params.validate()?;
    if text.is_empty() {
        return Err(VigenereError::EmptyText);
    }

    let max_length = params.max_length.min((text.len() / 2).max(1));
    let mut rows = Vec::with_capacity(max_length);
    let mut best: Option<(usize, f64)> = None;

    for length in 1..=max_length {
        let Some(average_ic) = average_column_ic(text, length) else {
            continue;
        };
        trace!(length, average_ic, "Average column IC");
        rows.push(IcScanRow { length, average_ic });

        let distance = (average_ic - params.reference_ic).abs();
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((length, distance));
        }
    }

    let length = best.map_or(1, |(length, _)| length);
    debug!(length, max_length, "IC scan candidate length");

    let confidence = Confidence::from_cautions(
        confidence::short_columns(text.len(), length).into_iter().collect(),
    );

    Ok(IcScanReport {
        rows,
        estimate: LengthEstimate::Determined { length, confidence },
    })
}

/// Friedman's closed-form estimate from the IC of the whole text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FriedmanEstimate {
    /// Unscaled IC of the whole ciphertext
    pub ic: f64,
    /// Approximate keyword length; `None` when the formula has no positive solution
    pub length: Option<f64>,
}

/// `L ≈ 0.027·N / ((N−1)·κ − 0.038·N + 0.065)`
///
/// A cheap sanity check next to the column-based estimators. `None` for texts with
/// fewer than two symbols.
pub fn friedman(text: &Text) -> Option<FriedmanEstimate> {
    let ic = index_of_coincidence(&count_letters(text.letters()))?;
    let n = text.len() as f64;

    let denominator = (n - 1.0) * ic - 0.038 * n + 0.065;
    let length = (denominator > 0.0).then(|| 0.027 * n / denominator);

    Some(FriedmanEstimate { ic, length })
}
