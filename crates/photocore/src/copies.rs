//! Copy count parsing
//!
//! Users type the number of copies as free text. The text goes through
//! [`CopyCount::parse`] once and everything downstream works with the typed value.

use std::fmt;

use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Accepted number of copies on one collage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CopyCount {
    Two,
    Four,
    Six,
    Eight,
}

/// Why a text could not be turned into a [`CopyCount`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyCountError {
    #[error("not a number: {0:?}")]
    InvalidFormat(String),

    #[error("{0} copies is not supported")]
    OutOfRange(u32),
}

impl CopyCount {
    /// Parses user input such as `" 4 "`.
    ///
    /// Only plain ASCII digits are numbers here, so `+4`, `4.0` and `-2` are
    /// reported as [`CopyCountError::InvalidFormat`].
    pub fn parse(text: &str) -> Result<Self, CopyCountError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CopyCountError::InvalidFormat(trimmed.to_string()));
        }

        match trimmed.parse::<u32>() {
            Ok(n) => Self::try_from(n),
            // digits only, so the only failure left is overflow
            Err(_) => Err(CopyCountError::OutOfRange(u32::MAX)),
        }
    }

    pub fn get(self) -> u32 {
        match self {
            CopyCount::Two => 2,
            CopyCount::Four => 4,
            CopyCount::Six => 6,
            CopyCount::Eight => 8,
        }
    }

    /// "2, 4, 6, or 8"
    pub fn accepted_list() -> String {
        let values: Vec<String> = Self::iter().map(|c| c.get().to_string()).collect();
        match values.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => String::new(),
        }
    }
}

impl TryFrom<u32> for CopyCount {
    type Error = CopyCountError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::iter().find(|c| c.get() == n).ok_or(CopyCountError::OutOfRange(n))
    }
}

impl fmt::Display for CopyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}
