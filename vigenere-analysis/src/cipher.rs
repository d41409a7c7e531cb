//! Vigenère shift primitive and keyword handling

use std::fmt;
use std::str::FromStr;

use crate::alphabet::{Letter, Text, LETTER_COUNT};
use crate::error::{Result, VigenereError};

/// Direction of a Vigenère transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// A validated, non-empty Vigenère keyword
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Keyword(Vec<Letter>);

impl Keyword {
    /// Parse a keyword; every character must be an ASCII letter
    ///
    /// Case is folded. Spaces and punctuation are rejected rather than skipped so a
    /// mistyped key never silently turns into a different one.
    pub fn new(key: &str) -> Result<Self> {
        let letters = key
            .chars()
            .map(|c| Letter::from_char(c).ok_or(VigenereError::InvalidKeyword(c)))
            .collect::<Result<Vec<Letter>>>()?;

        Self::from_letters(letters)
    }

    pub fn from_letters(letters: Vec<Letter>) -> Result<Self> {
        if letters.is_empty() {
            return Err(VigenereError::EmptyKeyword);
        }
        Ok(Self(letters))
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Keyword length, always at least 1
    pub fn len(&self) -> usize {
        self.0.len()
    }

    // Required by clippy next to `len`; a keyword is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Key symbol applied at text position `position`
    pub fn key_at(&self, position: usize) -> Letter {
        self.0[position % self.0.len()]
    }
}

impl FromStr for Keyword {
    type Err = VigenereError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

/// Encrypt one symbol: `(plain + key) mod 26`
pub fn encrypt_symbol(plain: Letter, key: Letter) -> Letter {
    Letter::wrapping(plain.index() + key.index())
}

/// Decrypt one symbol: `(cipher - key) mod 26`
pub fn decrypt_symbol(cipher: Letter, key: Letter) -> Letter {
    Letter::wrapping(cipher.index() + LETTER_COUNT as u8 - key.index())
}

/// Apply the keyword cyclically to normalized text
///
/// The key symbol for position `i` is `keyword[i % keyword.len()]`.
///
/// # Example
///
/// ```rust
/// use vigenere_analysis::{transform, Direction, Keyword, Text};
///
/// let key = Keyword::new("MATH")?;
/// let cipher = transform(&Text::normalize("make it happen"), &key, Direction::Encrypt);
/// assert_eq!(cipher.to_string(), "YADLUTAHBPXU");
/// # Ok::<(), vigenere_analysis::VigenereError>(())
/// ```
pub fn transform(text: &Text, keyword: &Keyword, direction: Direction) -> Text {
    let shift = match direction {
        Direction::Encrypt => encrypt_symbol,
        Direction::Decrypt => decrypt_symbol,
    };

    let letters = text
        .letters()
        .iter()
        .enumerate()
        .map(|(i, &letter)| shift(letter, keyword.key_at(i)))
        .collect();

    Text::from_letters(letters)
}

/// Apply the keyword to raw text, keeping its layout
///
/// Only ASCII letters are shifted and they keep their case; everything else is
/// copied through unchanged. The key index advances on letters only, so the letters
/// of the result equal `transform` of the normalized input.
pub fn apply_to_text(content: &str, keyword: &Keyword, direction: Direction) -> String {
    let mut result = String::with_capacity(content.len());
    let mut key_index: usize = 0;

    for c in content.chars() {
        match Letter::from_char(c) {
            Some(letter) => {
                let key = keyword.key_at(key_index);
                let shifted = match direction {
                    Direction::Encrypt => encrypt_symbol(letter, key),
                    Direction::Decrypt => decrypt_symbol(letter, key),
                };

                if c.is_ascii_lowercase() {
                    result.push(shifted.to_char().to_ascii_lowercase());
                } else {
                    result.push(shifted.to_char());
                }

                key_index += 1;
            }
            None => result.push(c),
        }
    }

    result
}
