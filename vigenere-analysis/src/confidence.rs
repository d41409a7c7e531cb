//! Advisory confidence flags attached to estimates and recoveries

use std::fmt;

/// Columns shorter than this (on average) give unreliable statistics
pub const MIN_RELIABLE_COLUMN_LENGTH: f64 = 15.0;

/// Scores closer than this are treated as a tie when flagging ambiguity
pub const SCORE_TIE_EPSILON: f64 = 1e-12;

/// Why a result should be taken with caution
#[derive(Debug, Clone, PartialEq)]
pub enum Caution {
    /// Kasiski winner and runner-up factor tallies are too close
    NarrowFactorMargin { best: usize, runner_up: usize },
    /// Average column length is below [`MIN_RELIABLE_COLUMN_LENGTH`]
    ShortColumns { average: f64 },
    /// Two shifts scored the same for this column
    AmbiguousShift { column: usize },
}

impl fmt::Display for Caution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caution::NarrowFactorMargin { best, runner_up } => {
                write!(f, "factor tallies are close ({} vs {})", best, runner_up)
            }
            Caution::ShortColumns { average } => {
                write!(f, "columns average only {:.1} symbols", average)
            }
            Caution::AmbiguousShift { column } => {
                write!(f, "column {} has tied shift scores", column + 1)
            }
        }
    }
}

/// Confidence of a best-effort answer; never blocks producing it
#[derive(Debug, Clone, PartialEq)]
pub enum Confidence {
    High,
    Low(Vec<Caution>),
}

impl Confidence {
    /// `High` when no caution was raised
    pub fn from_cautions(cautions: Vec<Caution>) -> Self {
        if cautions.is_empty() {
            Confidence::High
        } else {
            Confidence::Low(cautions)
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Confidence::High)
    }

    pub fn cautions(&self) -> &[Caution] {
        match self {
            Confidence::High => &[],
            Confidence::Low(cautions) => cautions,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Low(cautions) => {
                write!(f, "low (")?;
                for (i, caution) in cautions.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", caution)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Flag short columns for a text of `text_len` symbols split into `columns` columns
pub(crate) fn short_columns(text_len: usize, columns: usize) -> Option<Caution> {
    let average = text_len as f64 / columns as f64;
    (average < MIN_RELIABLE_COLUMN_LENGTH).then_some(Caution::ShortColumns { average })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cautions() {
        assert_eq!(Confidence::from_cautions(Vec::new()), Confidence::High);
        let low = Confidence::from_cautions(vec![Caution::AmbiguousShift { column: 0 }]);
        assert!(!low.is_high());
        assert_eq!(low.cautions().len(), 1);
    }

    #[test]
    fn test_short_columns() {
        assert_eq!(short_columns(100, 5), None);
        assert_eq!(short_columns(28, 2), Some(Caution::ShortColumns { average: 14.0 }));
    }

    #[test]
    fn test_display() {
        let low = Confidence::Low(vec![
            Caution::NarrowFactorMargin { best: 5, runner_up: 5 },
            Caution::AmbiguousShift { column: 2 },
        ]);
        assert_eq!(
            low.to_string(),
            "low (factor tallies are close (5 vs 5); column 3 has tied shift scores)"
        );
    }
}
