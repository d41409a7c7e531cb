//! Alphabet symbols and the text normalizer

use std::fmt;

use crate::error::{Result, VigenereError};

/// Number of symbols in the Latin alphabet
pub const LETTER_COUNT: usize = 26;

/// A single alphabet symbol, stored as its position (`A` = 0 … `Z` = 25)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Create a letter from its alphabet index
    ///
    /// # Example
    ///
    /// ```rust
    /// use vigenere_analysis::Letter;
    ///
    /// assert_eq!(Letter::from_index(2)?.to_char(), 'C');
    /// assert!(Letter::from_index(26).is_err());
    /// # Ok::<(), vigenere_analysis::VigenereError>(())
    /// ```
    pub fn from_index(index: u8) -> Result<Self> {
        if (index as usize) < LETTER_COUNT {
            Ok(Self(index))
        } else {
            Err(VigenereError::InvalidLetter(index))
        }
    }

    /// Map an ASCII letter of either case to its symbol; anything else yields `None`
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Self(c.to_ascii_uppercase() as u8 - b'A'))
        } else {
            None
        }
    }

    /// Position in the alphabet, always in `0..26`
    pub fn index(self) -> u8 {
        self.0
    }

    /// Canonical upper-case character for this symbol
    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    // Only used by the shift primitive, which reduces mod 26 itself.
    pub(crate) fn wrapping(value: u8) -> Self {
        Self(value % LETTER_COUNT as u8)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Normalized, alphabetic-only text
///
/// Produced once by [`Text::normalize`] (or from letters) and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text(Vec<Letter>);

impl Text {
    /// Strip every non-ASCII-letter character and fold case
    ///
    /// Relative order of the letters is preserved. Empty input gives empty text.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vigenere_analysis::Text;
    ///
    /// let text = Text::normalize("Hello, World!");
    /// assert_eq!(text.to_string(), "HELLOWORLD");
    /// ```
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter_map(Letter::from_char).collect())
    }

    pub fn from_letters(letters: Vec<Letter>) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Split the text into `count` columns
    ///
    /// Column `c` holds the symbols at positions `i` with `i % count == c`, so column
    /// lengths differ by at most one. A `count` of zero is rejected.
    pub fn columns(&self, count: usize) -> Result<Vec<Vec<Letter>>> {
        if count == 0 {
            return Err(VigenereError::InvalidParameter(
                "column count must be positive".to_string(),
            ));
        }
        let mut columns = vec![Vec::with_capacity(self.0.len() / count + 1); count];

        for (i, &letter) in self.0.iter().enumerate() {
            columns[i % count].push(letter);
        }

        Ok(columns)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}
