//! Error types for cipher and analysis operations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VigenereError {
    #[error("Ciphertext is empty after normalization")]
    EmptyText,

    #[error("Keyword cannot be empty")]
    EmptyKeyword,

    #[error("Keyword contains non-alphabetic character {0:?}")]
    InvalidKeyword(char),

    #[error("Invalid keyword length {length} (must be between 1 and {max})")]
    InvalidKeywordLength { length: usize, max: usize },

    #[error("Letter index {0} is outside the alphabet (must be < 26)")]
    InvalidLetter(u8),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, VigenereError>;
