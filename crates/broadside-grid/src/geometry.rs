//! Discrete 2-D geometry: positions, offsets and axis-aligned rectangles.
//!
//! Everything here is plain value arithmetic on small integers. Nothing
//! clamps or bounds-checks against a board: `Position + Offset` wraps at
//! the `u8` edge, and it is the caller's job (usually
//! [`Board`](crate::Board)) to reject positions that fall off the grid.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell address on a grid.
///
/// Field order matters: the derived `Ord` compares `row` first, then
/// `col`, which gives the row-major order used everywhere else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Creates a position from a row and a column.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Steps by `offset`, returning `None` instead of wrapping when the
    /// result would leave the `u8` range.
    pub fn checked_add(self, offset: Offset) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(offset.rows)?,
            col: self.col.checked_add_signed(offset.cols)?,
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u8, u8)> for Position {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl Add<Offset> for Position {
    type Output = Position;

    fn add(self, offset: Offset) -> Position {
        Position {
            row: self.row.wrapping_add_signed(offset.rows),
            col: self.col.wrapping_add_signed(offset.cols),
        }
    }
}

impl AddAssign<Offset> for Position {
    fn add_assign(&mut self, offset: Offset) {
        *self = *self + offset;
    }
}

/// Steps against `offset`: `p - o` equals `p + (-o)`.
///
/// This is real subtraction, not a second spelling of `+` that expects the
/// caller to negate the offset first. Nothing in placement depends on it;
/// [`Rectangle::inflate`] works on corners directly.
impl Sub<Offset> for Position {
    type Output = Position;

    fn sub(self, offset: Offset) -> Position {
        Position {
            row: self.row.wrapping_sub(offset.rows as u8),
            col: self.col.wrapping_sub(offset.cols as u8),
        }
    }
}

impl SubAssign<Offset> for Position {
    fn sub_assign(&mut self, offset: Offset) {
        *self = *self - offset;
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A signed step between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    pub rows: i8,
    pub cols: i8,
}

impl Offset {
    pub const UP: Offset = Offset::new(-1, 0);
    pub const DOWN: Offset = Offset::new(1, 0);
    pub const LEFT: Offset = Offset::new(0, -1);
    pub const RIGHT: Offset = Offset::new(0, 1);

    pub const fn new(rows: i8, cols: i8) -> Self {
        Self { rows, cols }
    }
}

impl Mul<i8> for Offset {
    type Output = Offset;

    fn mul(self, factor: i8) -> Offset {
        Offset {
            rows: self.rows.wrapping_mul(factor),
            cols: self.cols.wrapping_mul(factor),
        }
    }
}

impl Mul<Offset> for i8 {
    type Output = Offset;

    fn mul(self, offset: Offset) -> Offset {
        offset * self
    }
}

impl Neg for Offset {
    type Output = Offset;

    fn neg(self) -> Offset {
        self * -1
    }
}

// ---------------------------------------------------------------------------
// Rectangle
// ---------------------------------------------------------------------------

/// An inclusive, axis-aligned box between two corner positions.
///
/// The constructor normalizes the corners so that `first` holds the
/// smaller row and column and `last` the larger ones. Deserialization
/// goes through the same constructor, so a rectangle received from the
/// wire with swapped corners is normalized too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Corners")]
pub struct Rectangle {
    first: Position,
    last: Position,
}

/// Unnormalized wire shape of a [`Rectangle`].
#[derive(Deserialize)]
struct Corners {
    first: Position,
    last: Position,
}

impl From<Corners> for Rectangle {
    fn from(corners: Corners) -> Self {
        Rectangle::new(corners.first, corners.last)
    }
}

impl Rectangle {
    /// Creates a rectangle spanning both corners, in any order.
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            first: Position::new(a.row.min(b.row), a.col.min(b.col)),
            last: Position::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// A 1×1 rectangle covering a single cell.
    pub fn cell(pos: Position) -> Self {
        Self { first: pos, last: pos }
    }

    /// The top-left corner.
    pub fn first(&self) -> Position {
        self.first
    }

    /// The bottom-right corner.
    pub fn last(&self) -> Position {
        self.last
    }

    /// Number of columns covered.
    pub fn width(&self) -> usize {
        usize::from(self.last.col - self.first.col) + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> usize {
        usize::from(self.last.row - self.first.row) + 1
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.first.row..=self.last.row).contains(&pos.row)
            && (self.first.col..=self.last.col).contains(&pos.col)
    }

    /// Returns `true` if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        self.contains(other.first) && self.contains(other.last)
    }

    /// Returns `true` if the two rectangles share at least one cell.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.first.row <= other.last.row
            && other.first.row <= self.last.row
            && self.first.col <= other.last.col
            && other.first.col <= self.last.col
    }

    /// Grows the rectangle by `by` cells in every direction, stopping at
    /// the edges of the `u8` coordinate space.
    pub fn inflate(&self, by: u8) -> Rectangle {
        Rectangle {
            first: Position::new(
                self.first.row.saturating_sub(by),
                self.first.col.saturating_sub(by),
            ),
            last: Position::new(
                self.last.row.saturating_add(by),
                self.last.col.saturating_add(by),
            ),
        }
    }

    /// Returns `true` if `other` overlaps this rectangle or touches it
    /// along an edge or at a corner.
    pub fn touches_or_intersects(&self, other: &Rectangle) -> bool {
        self.inflate(1).intersects(other)
    }

    /// Every cell of the rectangle in row-major order, starting at `first`.
    ///
    /// The iterator is `Clone`, and calling `cells()` again always starts
    /// over, so the sequence can be walked any number of times.
    pub fn cells(&self) -> Cells {
        Cells {
            rect: *self,
            next: Some(self.first),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.first, self.last)
    }
}

impl IntoIterator for Rectangle {
    type Item = Position;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.cells()
    }
}

impl IntoIterator for &Rectangle {
    type Item = Position;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.cells()
    }
}

/// Row-major iterator over the cells of a [`Rectangle`].
#[derive(Debug, Clone)]
pub struct Cells {
    rect: Rectangle,
    next: Option<Position>,
}

impl Iterator for Cells {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next?;
        let Rectangle { first, last } = self.rect;
        self.next = if current.col < last.col {
            Some(Position::new(current.row, current.col + 1))
        } else if current.row < last.row {
            Some(Position::new(current.row + 1, first.col))
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.next {
            None => 0,
            Some(pos) => {
                let rows_after = usize::from(self.rect.last.row - pos.row);
                let cols_left = usize::from(self.rect.last.col - pos.col) + 1;
                rows_after * self.rect.width() + cols_left
            }
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cells {}

impl FusedIterator for Cells {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    fn rect(a: (u8, u8), b: (u8, u8)) -> Rectangle {
        Rectangle::new(a.into(), b.into())
    }

    // =====================================================================
    // Position / Offset
    // =====================================================================

    #[test]
    fn test_position_ordering_is_row_major() {
        assert!(pos(0, 9) < pos(1, 0));
        assert!(pos(3, 2) < pos(3, 4));
        assert_eq!(pos(2, 2).cmp(&pos(2, 2)), std::cmp::Ordering::Equal);
    }

    #[test]
    fn test_position_add_unit_offsets() {
        let p = pos(5, 5);
        assert_eq!(p + Offset::UP, pos(4, 5));
        assert_eq!(p + Offset::DOWN, pos(6, 5));
        assert_eq!(p + Offset::LEFT, pos(5, 4));
        assert_eq!(p + Offset::RIGHT, pos(5, 6));
    }

    #[test]
    fn test_position_sub_reverses_add() {
        let step = Offset::new(2, -3);
        assert_eq!(pos(4, 4) + step - step, pos(4, 4));
        assert_eq!(pos(4, 4) - Offset::DOWN, pos(3, 4));
    }

    #[test]
    fn test_position_sub_equals_add_of_negated_offset() {
        for step in [Offset::UP, Offset::LEFT, Offset::new(3, -2), Offset::new(-1, 5)] {
            assert_eq!(pos(5, 5) - step, pos(5, 5) + (-step));
        }
        assert_ne!(pos(5, 5) - Offset::RIGHT, pos(5, 5) + Offset::RIGHT);
    }

    #[test]
    fn test_position_add_wraps_without_clamping() {
        // Geometry does no bounds checking; callers reject the result.
        assert_eq!(pos(0, 0) + Offset::UP, pos(255, 0));
        assert_eq!(pos(0, 0).checked_add(Offset::UP), None);
        assert_eq!(pos(0, 0).checked_add(Offset::DOWN), Some(pos(1, 0)));
    }

    #[test]
    fn test_position_assign_operators() {
        let mut p = pos(1, 1);
        p += Offset::RIGHT * 3;
        assert_eq!(p, pos(1, 4));
        p -= Offset::RIGHT;
        assert_eq!(p, pos(1, 3));
    }

    #[test]
    fn test_offset_scalar_multiplication() {
        assert_eq!(Offset::DOWN * 4, Offset::new(4, 0));
        assert_eq!(3 * Offset::LEFT, Offset::new(0, -3));
        assert_eq!(-Offset::UP, Offset::DOWN);
    }

    // =====================================================================
    // Rectangle
    // =====================================================================

    #[test]
    fn test_rectangle_new_normalizes_corners() {
        let r = rect((3, 0), (1, 4));
        assert_eq!(r.first(), pos(1, 0));
        assert_eq!(r.last(), pos(3, 4));
        assert_eq!(r, rect((1, 4), (3, 0)));
    }

    #[test]
    fn test_rectangle_dimensions() {
        let r = rect((2, 3), (2, 6));
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 1);
        assert_eq!(r.area(), 4);
        assert_eq!(Rectangle::cell(pos(7, 7)).area(), 1);
    }

    #[test]
    fn test_rectangle_contains_point_is_inclusive() {
        let r = rect((1, 1), (3, 3));
        assert!(r.contains(pos(1, 1)));
        assert!(r.contains(pos(3, 3)));
        assert!(r.contains(pos(2, 3)));
        assert!(!r.contains(pos(0, 2)));
        assert!(!r.contains(pos(2, 4)));
    }

    #[test]
    fn test_rectangle_contains_rect() {
        let outer = rect((0, 0), (9, 9));
        assert!(outer.contains_rect(&rect((9, 6), (9, 9))));
        assert!(!outer.contains_rect(&rect((9, 8), (9, 10))));
        // Lexicographically "inside" but outside on the column axis.
        assert!(!rect((0, 2), (5, 5)).contains_rect(&rect((1, 0), (1, 1))));
    }

    #[test]
    fn test_rectangle_intersects() {
        let a = rect((0, 0), (2, 2));
        assert!(a.intersects(&rect((2, 2), (4, 4))));
        assert!(!a.intersects(&rect((3, 0), (3, 2))));
        assert!(!a.intersects(&rect((0, 3), (0, 5))));
    }

    #[test]
    fn test_rectangle_touches_or_intersects_includes_diagonal() {
        let a = rect((0, 0), (1, 0));
        assert!(a.touches_or_intersects(&Rectangle::cell(pos(0, 1))));
        assert!(a.touches_or_intersects(&Rectangle::cell(pos(2, 1))));
        assert!(!a.touches_or_intersects(&Rectangle::cell(pos(3, 0))));
        assert!(!a.touches_or_intersects(&Rectangle::cell(pos(0, 2))));
    }

    #[test]
    fn test_rectangle_inflate_saturates_at_origin() {
        let r = Rectangle::cell(pos(0, 0)).inflate(1);
        assert_eq!(r.first(), pos(0, 0));
        assert_eq!(r.last(), pos(1, 1));

        let r = Rectangle::cell(pos(255, 255)).inflate(1);
        assert_eq!(r.last(), pos(255, 255));
    }

    #[test]
    fn test_rectangle_cells_row_major() {
        let cells: Vec<_> = rect((1, 1), (2, 3)).cells().collect();
        assert_eq!(
            cells,
            vec![pos(1, 1), pos(1, 2), pos(1, 3), pos(2, 1), pos(2, 2), pos(2, 3)]
        );
    }

    #[test]
    fn test_rectangle_cells_is_restartable() {
        let r = rect((4, 4), (5, 5));
        let once: Vec<_> = r.cells().collect();
        let twice: Vec<_> = r.into_iter().collect();
        assert_eq!(once, twice);
        assert_eq!(r.cells().len(), 4);
    }

    #[test]
    fn test_rectangle_cells_at_coordinate_limit_terminates() {
        let r = rect((254, 254), (255, 255));
        assert_eq!(r.cells().count(), 4);
    }

    #[test]
    fn test_rectangle_cells_size_hint_tracks_progress() {
        let mut cells = rect((0, 0), (2, 2)).cells();
        assert_eq!(cells.len(), 9);
        cells.next();
        cells.next();
        cells.next();
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_rectangle_deserialize_normalizes() {
        let json = r#"{"first":{"row":4,"col":2},"last":{"row":1,"col":2}}"#;
        let r: Rectangle = serde_json::from_str(json).unwrap();
        assert_eq!(r, rect((1, 2), (4, 2)));
    }
}
