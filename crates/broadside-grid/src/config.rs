//! Game configuration: board size and fleet ruleset.

use std::num::NonZeroU8;

use crate::{ConfigError, Ruleset};

/// Board dimensions plus the ruleset every fleet is checked against.
///
/// The fields are private so a `GameConfig` can only exist in a valid
/// state: non-zero dimensions and a ruleset whose ships fit the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    rows: NonZeroU8,
    cols: NonZeroU8,
    ruleset: Ruleset,
}

impl GameConfig {
    /// Validates and builds a configuration.
    ///
    /// # Errors
    /// - [`ConfigError::ZeroDimension`] if `rows` or `cols` is zero
    /// - [`ConfigError::ShipTooLong`] if a required ship is longer than
    ///   both board dimensions
    pub fn new(rows: u8, cols: u8, ruleset: Ruleset) -> Result<Self, ConfigError> {
        let (Some(nz_rows), Some(nz_cols)) = (NonZeroU8::new(rows), NonZeroU8::new(cols)) else {
            return Err(ConfigError::ZeroDimension { rows, cols });
        };

        let longest = ruleset.longest_required();
        if longest > usize::from(rows.max(cols)) {
            return Err(ConfigError::ShipTooLong {
                length: longest,
                rows,
                cols,
            });
        }

        Ok(Self {
            rows: nz_rows,
            cols: nz_cols,
            ruleset,
        })
    }

    pub fn rows(&self) -> NonZeroU8 {
        self.rows
    }

    pub fn cols(&self) -> NonZeroU8 {
        self.cols
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }
}

/// A 10×10 board with the classic ruleset.
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: NonZeroU8::new(10).unwrap_or(NonZeroU8::MIN),
            cols: NonZeroU8::new(10).unwrap_or(NonZeroU8::MIN),
            ruleset: Ruleset::classic(),
        }
    }
}
