//! The playing surface: two bit layers over a `rows × cols` grid.
//!
//! A [`Board`] knows nothing about ships as objects, only which cells are
//! occupied and which have been fired upon. Reads and writes outside the
//! grid never fail loudly; they degrade to `false` or a no-op.

use std::fmt;
use std::num::NonZeroU8;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::{Position, Rectangle};

const WORD_BITS: usize = u64::BITS as usize;

// ---------------------------------------------------------------------------
// BitLayer
// ---------------------------------------------------------------------------

/// A fixed-length bit vector, one bit per cell in row-major order.
///
/// On the wire a layer is a string of `'0'` and `'1'` characters, first
/// cell first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitLayer {
    words: Vec<u64>,
    len: usize,
}

impl BitLayer {
    /// Creates a layer of `len` cleared bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Number of bits in the layer.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads bit `index`; out-of-range indices read as `false`.
    pub fn get(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }

    /// Sets bit `index`. Returns `false` (and does nothing) if out of range.
    pub fn set(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
        true
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if every bit set here is also set in `other`.
    pub fn is_subset_of(&self, other: &BitLayer) -> bool {
        self.words
            .iter()
            .zip(other.words.iter().chain(std::iter::repeat(&0)))
            .all(|(mine, theirs)| mine & !theirs == 0)
    }

    /// Iterates over all bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.get(i))
    }
}

impl Serialize for BitLayer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bits: String = self.iter().map(|b| if b { '1' } else { '0' }).collect();
        serializer.serialize_str(&bits)
    }
}

impl<'de> Deserialize<'de> for BitLayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BitsVisitor;

        impl Visitor<'_> for BitsVisitor {
            type Value = BitLayer;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string of '0' and '1' characters")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BitLayer, E> {
                let mut layer = BitLayer::new(v.len());
                for (i, c) in v.chars().enumerate() {
                    match c {
                        '0' => {}
                        '1' => {
                            layer.set(i);
                        }
                        other => {
                            return Err(E::invalid_value(
                                de::Unexpected::Char(other),
                                &self,
                            ));
                        }
                    }
                }
                Ok(layer)
            }
        }

        deserializer.deserialize_str(BitsVisitor)
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// One player's grid with a ship layer and a shot layer.
///
/// A ship bit is set once during placement and never cleared. A shot bit
/// is set when the cell is fired upon; setting it again changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: NonZeroU8,
    cols: NonZeroU8,
    ships: BitLayer,
    shots: BitLayer,
}

impl Board {
    /// Creates an empty board.
    pub fn new(rows: NonZeroU8, cols: NonZeroU8) -> Self {
        let cells = usize::from(rows.get()) * usize::from(cols.get());
        Self {
            rows,
            cols,
            ships: BitLayer::new(cells),
            shots: BitLayer::new(cells),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows.get()
    }

    pub fn cols(&self) -> u8 {
        self.cols.get()
    }

    /// The rectangle covering the whole board.
    pub fn extent(&self) -> Rectangle {
        Rectangle::new(
            Position::new(0, 0),
            Position::new(self.rows.get() - 1, self.cols.get() - 1),
        )
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.extent().contains(pos)
    }

    pub fn contains_rect(&self, rect: &Rectangle) -> bool {
        self.extent().contains_rect(rect)
    }

    /// Marks `pos` as occupied. Returns whether `pos` was on the board.
    ///
    /// Existing occupancy is not checked; placement validation happens in
    /// [`PlayerField`](crate::PlayerField) before this is called.
    pub fn place_ship(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(i) => self.ships.set(i),
            None => false,
        }
    }

    pub fn has_ship(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.ships.get(i))
    }

    /// Records a shot at `pos`. Returns whether the shot landed on the
    /// board, not whether it hit anything; ask [`has_ship`](Self::has_ship)
    /// before firing to learn that.
    pub fn place_shot(&mut self, pos: Position) -> bool {
        match self.index(pos) {
            Some(i) => self.shots.set(i),
            None => false,
        }
    }

    pub fn has_shot(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|i| self.shots.get(i))
    }

    /// Returns `true` once every occupied cell has been shot.
    pub fn all_ships_shot(&self) -> bool {
        self.ships.is_subset_of(&self.shots)
    }

    /// The ship layer, row-major.
    pub fn ship_layer(&self) -> &BitLayer {
        &self.ships
    }

    /// The shot layer, row-major.
    pub fn shot_layer(&self) -> &BitLayer {
        &self.shots
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row < self.rows.get() && pos.col < self.cols.get() {
            Some(usize::from(self.cols.get()) * usize::from(pos.row) + usize::from(pos.col))
        } else {
            None
        }
    }
}

/// Renders the board one row per line: `#` ship, `X` hit, `o` miss, `.` water.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows.get() {
            for col in 0..self.cols.get() {
                let pos = Position::new(row, col);
                let c = match (self.has_ship(pos), self.has_shot(pos)) {
                    (true, true) => 'X',
                    (true, false) => '#',
                    (false, true) => 'o',
                    (false, false) => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
