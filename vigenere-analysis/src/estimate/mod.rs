//! Keyword length estimation

pub mod coincidence;
pub mod kasiski;

pub use coincidence::{FriedmanEstimate, IcScanParams, IcScanReport, IcScanRow};
pub use kasiski::{KasiskiParams, KasiskiReport};

use std::fmt;

use tracing::warn;

use crate::alphabet::Text;
use crate::confidence::Confidence;
use crate::config::AnalysisConfig;
use crate::error::Result;

/// Trait for a keyword length estimation strategy
pub trait LengthEstimator {
    /// Estimate the keyword length of normalized ciphertext
    fn estimate(&self, text: &Text) -> Result<LengthEstimate>;
}

/// Why an estimator could not commit to a length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indeterminate {
    /// Fewer symbols than two n-grams need
    TooShort { len: usize, needed: usize },
    /// No n-gram occurs twice
    NoRepeats,
    /// No repeat distance has a factor at or above the minimum
    NoFactors,
}

impl fmt::Display for Indeterminate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indeterminate::TooShort { len, needed } => {
                write!(f, "text has {} symbols, at least {} needed", len, needed)
            }
            Indeterminate::NoRepeats => write!(f, "no repeated n-grams"),
            Indeterminate::NoFactors => write!(f, "no repeat distance has a usable factor"),
        }
    }
}

/// Outcome of a length estimator
///
/// `Indeterminate` is a statistically inconclusive result, not an error; callers
/// fall back to another estimator or ask for more ciphertext.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthEstimate {
    Determined { length: usize, confidence: Confidence },
    Indeterminate(Indeterminate),
}

impl LengthEstimate {
    pub fn length(&self) -> Option<usize> {
        match self {
            LengthEstimate::Determined { length, .. } => Some(*length),
            LengthEstimate::Indeterminate(_) => None,
        }
    }
}

impl fmt::Display for LengthEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthEstimate::Determined { length, confidence } => {
                write!(f, "{} (confidence: {})", length, confidence)
            }
            LengthEstimate::Indeterminate(reason) => write!(f, "indeterminate ({})", reason),
        }
    }
}

/// Available length estimation strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthMethod {
    Kasiski(KasiskiParams),
    IcScan(IcScanParams),
}

impl LengthEstimator for LengthMethod {
    fn estimate(&self, text: &Text) -> Result<LengthEstimate> {
        match self {
            LengthMethod::Kasiski(params) => params.estimate(text),
            LengthMethod::IcScan(params) => params.estimate(text),
        }
    }
}

/// How the two primary estimators relate on one ciphertext
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    Agree(usize),
    Disagree { kasiski: usize, ic_scan: usize },
    /// Kasiski could not commit; only the IC scan produced a length
    IcScanOnly(usize),
}

/// Every length signal for one ciphertext, side by side
#[derive(Debug, Clone, PartialEq)]
pub struct LengthSurvey {
    pub kasiski: KasiskiReport,
    pub ic_scan: IcScanReport,
    pub friedman: Option<FriedmanEstimate>,
}

impl LengthSurvey {
    pub fn agreement(&self) -> Agreement {
        // The IC scan always commits to a length
        let ic_scan = self.ic_scan.estimate.length().unwrap_or(1);

        match self.kasiski.estimate.length() {
            Some(kasiski) if kasiski == ic_scan => Agreement::Agree(kasiski),
            Some(kasiski) => Agreement::Disagree { kasiski, ic_scan },
            None => Agreement::IcScanOnly(ic_scan),
        }
    }

    /// The length to commit to when both estimators ran
    ///
    /// On disagreement Kasiski wins only when the IC scan landed on a multiple of its
    /// length. Kasiski never reports lengths below its minimum factor, so for short
    /// keywords its factor can be unrelated to the period while the IC scan still
    /// finds a multiple of it.
    pub fn preferred_length(&self) -> usize {
        match self.agreement() {
            Agreement::Agree(length) | Agreement::IcScanOnly(length) => length,
            Agreement::Disagree { kasiski, ic_scan } if ic_scan % kasiski == 0 => kasiski,
            Agreement::Disagree { ic_scan, .. } => ic_scan,
        }
    }
}

/// Run Kasiski, the IC scan and Friedman on the same ciphertext
///
/// The estimators can disagree; the survey reports all of them instead of picking
/// one silently, and logs a warning when Kasiski and the IC scan differ.
pub fn survey(text: &Text, config: &AnalysisConfig) -> Result<LengthSurvey> {
    let survey = LengthSurvey {
        kasiski: kasiski::examine(text, &config.kasiski)?,
        ic_scan: coincidence::scan(text, &config.ic_scan)?,
        friedman: coincidence::friedman(text),
    };

    if let Agreement::Disagree { kasiski, ic_scan } = survey.agreement() {
        warn!(kasiski, ic_scan, "Length estimators disagree");
    }

    Ok(survey)
}
