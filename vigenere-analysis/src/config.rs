//! Analysis configuration

use crate::estimate::{IcScanParams, KasiskiParams};
use crate::error::Result;
use crate::recover::Scoring;

/// All tunable parameters of a ciphertext-only attack
///
/// The defaults reproduce the classic settings: trigrams, five top distances,
/// factors from 4, lengths up to 10, English reference statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisConfig {
    pub kasiski: KasiskiParams,
    pub ic_scan: IcScanParams,
    pub scoring: Scoring,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.kasiski.validate()?;
        self.ic_scan.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VigenereError;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.kasiski.ngram_size, 3);
        assert_eq!(config.kasiski.top_distances, 5);
        assert_eq!(config.kasiski.min_factor, 4);
        assert_eq!(config.ic_scan.max_length, 10);
        assert_eq!(config.ic_scan.reference_ic, 1.73);
        assert_eq!(config.scoring, Scoring::IcTarget { target: 0.065 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let mut config = AnalysisConfig::default();
        config.ic_scan.reference_ic = f64::NAN;
        assert!(matches!(config.validate(), Err(VigenereError::InvalidParameter(_))));
    }
}
