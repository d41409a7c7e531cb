//! # Vigenère Analysis Library
//!
//! The Vigenère cipher and a ciphertext-only attack on it.
//!
//! ## Pipeline
//!
//! - **Normalize**: [`Text::normalize`] keeps ASCII letters only, upper-cased
//! - **Estimate the keyword length**: Kasiski examination or an index-of-coincidence
//!   scan ([`estimate_keyword_length`]), or all signals at once including the
//!   Friedman estimate ([`survey`])
//! - **Recover the keyword**: per-column frequency analysis against English, scored by
//!   dot product or Pearson correlation ([`recover_keyword`])
//! - **Decrypt**: [`transform`] on normalized text, [`apply_to_text`] on raw text
//!
//! ## Usage
//!
//! ```rust
//! use vigenere_analysis::{
//!     estimate_keyword_length, recover_keyword, transform, Direction, KasiskiParams,
//!     LengthMethod, Scoring, Text,
//! };
//!
//! let cipher = Text::normalize(
//!     "KCCPKBGUFDPHQTYAVINRRTMVGRKDNBVFDETDGILTXRGUDDKOTFMBPVGEGLTGCKQRACQCWDNAWCRXIZAKFTLEWRPTY\
//!      CQKYVXCHKFTPONCQQRHJVAJUWETMCMSPKQDYHJVDAHCTRLSVSKCGCZQQDZXGSFRLSWCWSJTBHAFSIASPRJAHKJRJU\
//!      MVGKMITZHFPDISPZLVLGWTFPLKKEBDPGCEBSHCTJRWXBAFSPEZQNRWXCVYCGAONWDDKACKAWBBIKFTIOVKCGGHJVLN\
//!      HIFFSQESVYCLACNVRWBBIREPBBVFEXOSCDYGZWPFDTKFQIYCWHJVLNHIQIBTKHJVNPIST",
//! );
//!
//! let method = LengthMethod::Kasiski(KasiskiParams::default());
//! let estimate = estimate_keyword_length(&cipher, &method)?;
//! assert_eq!(estimate.length(), Some(6));
//!
//! let recovery = recover_keyword(&cipher, 6, Scoring::Pearson)?;
//! assert_eq!(recovery.keyword.to_string(), "CRYPTO");
//!
//! let plain = transform(&cipher, &recovery.keyword, Direction::Decrypt);
//! assert!(plain.to_string().starts_with("ILEARNEDHOWTOCALCULATE"));
//! # Ok::<(), vigenere_analysis::VigenereError>(())
//! ```
//!
//! ## Features
//!
//! - `parallel` (default): columns are analysed on the rayon thread pool

// Public modules
pub mod alphabet;
pub mod cipher;
pub mod confidence;
pub mod config;
pub mod error;
pub mod estimate;
pub mod frequency;
pub mod language;
pub mod recover;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports for easy access
pub use alphabet::{Letter, Text, LETTER_COUNT};
pub use cipher::{apply_to_text, decrypt_symbol, encrypt_symbol, transform, Direction, Keyword};
pub use confidence::{Caution, Confidence};
pub use config::AnalysisConfig;
pub use error::{Result, VigenereError};
pub use estimate::{
    survey, Agreement, FriedmanEstimate, IcScanParams, Indeterminate, KasiskiParams,
    LengthEstimate, LengthEstimator, LengthMethod, LengthSurvey,
};
pub use language::{LanguageModel, ENGLISH};
pub use recover::{recover_keyword, ColumnReport, Recovery, Scoring};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Estimate the keyword length of normalized ciphertext with the chosen method
///
/// Empty ciphertext is rejected; a Kasiski examination that finds nothing to work
/// with returns [`LengthEstimate::Indeterminate`] rather than an error.
pub fn estimate_keyword_length(text: &Text, method: &LengthMethod) -> Result<LengthEstimate> {
    if text.is_empty() {
        return Err(VigenereError::EmptyText);
    }
    method.estimate(text)
}
