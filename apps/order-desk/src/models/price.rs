//! Sale price value object.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A sale price in won.
///
/// Always a non-negative integer; the constructors are the only way in, so
/// a negative price can never reach the store. May differ from the book's
/// list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalePrice(i64);

impl SalePrice {
    /// Zero price (free of charge is valid; the floor is zero, not one).
    pub const ZERO: Self = Self(0);

    /// Create a price from an already-numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] if the amount is negative.
    pub fn new(won: i64) -> Result<Self, ValidationError> {
        if won < 0 {
            return Err(ValidationError::InvalidPrice {
                input: won.to_string(),
            });
        }
        Ok(Self(won))
    }

    /// Parse a price from free-text input.
    ///
    /// Surrounding whitespace is ignored; anything that is not a
    /// non-negative integer is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPrice`] with the raw input echoed
    /// back so the user can see what to correct.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let won: i64 = trimmed.parse().map_err(|_| ValidationError::InvalidPrice {
            input: input.to_string(),
        })?;
        Self::new(won)
    }

    /// The amount in won.
    #[must_use]
    pub const fn won(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SalePrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for SalePrice {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.0.into())
    }
}

impl FromSql for SalePrice {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}
