//! Ships, rulesets and the fleet that collects them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PlacementError, Position, Rectangle};

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

/// A ship is just the rectangle it occupies.
///
/// Nothing here forces the rectangle to be a straight line; a
/// [`Fleet`] refuses ships that are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ship {
    zone: Rectangle,
}

impl Ship {
    pub fn new(zone: Rectangle) -> Self {
        Self { zone }
    }

    /// A ship spanning the two given end cells, in either order.
    pub fn between(a: Position, b: Position) -> Self {
        Self::new(Rectangle::new(a, b))
    }

    pub fn zone(&self) -> Rectangle {
        self.zone
    }

    /// The longer side of the ship's rectangle.
    pub fn length(&self) -> usize {
        self.zone.width().max(self.zone.height())
    }

    /// Returns `true` if the ship is one cell wide or one cell tall.
    pub fn is_straight(&self) -> bool {
        self.zone.area() == self.length()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.zone.contains(pos)
    }

    /// Returns `true` if the two ships overlap or share an edge or corner.
    pub fn touches(&self, other: &Ship) -> bool {
        self.zone.touches_or_intersects(&other.zone)
    }
}

impl From<Rectangle> for Ship {
    fn from(zone: Rectangle) -> Self {
        Self::new(zone)
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.zone.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Ruleset
// ---------------------------------------------------------------------------

/// How many ships of each length a complete fleet holds.
///
/// `counts[i]` is the number of ships of length `i + 1`. A zero entry
/// means that length is not used at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Ruleset {
    counts: Vec<u8>,
}

impl Ruleset {
    /// Builds a ruleset from per-length counts.
    ///
    /// # Errors
    /// [`ConfigError::EmptyRuleset`] if no ship is required at all.
    pub fn new(counts: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let counts = counts.into();
        if counts.iter().all(|&c| c == 0) {
            return Err(ConfigError::EmptyRuleset);
        }
        Ok(Self { counts })
    }

    /// Four single-cell boats, three of two cells, two of three, one of four.
    pub fn classic() -> Self {
        Self {
            counts: vec![4, 3, 2, 1],
        }
    }

    /// One destroyer, two three-cell ships, one battleship, one carrier.
    pub fn american() -> Self {
        Self {
            counts: vec![0, 1, 2, 1, 1],
        }
    }

    /// The longest length the ruleset mentions, used or not.
    pub fn max_length(&self) -> usize {
        self.counts.len()
    }

    /// The longest length with a non-zero count.
    pub fn longest_required(&self) -> usize {
        self.counts
            .iter()
            .rposition(|&c| c > 0)
            .map_or(0, |i| i + 1)
    }

    /// Number of ships of `length` a complete fleet holds.
    pub fn required(&self, length: usize) -> u8 {
        length
            .checked_sub(1)
            .and_then(|i| self.counts.get(i))
            .copied()
            .unwrap_or(0)
    }

    /// Total number of ships in a complete fleet.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| usize::from(c)).sum()
    }

    pub fn counts(&self) -> &[u8] {
        &self.counts
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<u8>> for Ruleset {
    type Error = ConfigError;

    fn try_from(counts: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(counts)
    }
}

impl From<Ruleset> for Vec<u8> {
    fn from(ruleset: Ruleset) -> Self {
        ruleset.counts
    }
}

// ---------------------------------------------------------------------------
// Fleet
// ---------------------------------------------------------------------------

/// The ships placed so far, checked against a [`Ruleset`].
///
/// A fleet only knows about lengths and quotas. Whether a ship fits on
/// the board or touches a neighbour is the business of
/// [`PlayerField`](crate::PlayerField).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ruleset: Ruleset,
    ships: Vec<Ship>,
    placed: Vec<u8>,
}

impl Fleet {
    pub fn new(ruleset: Ruleset) -> Self {
        let placed = vec![0; ruleset.max_length()];
        Self {
            ruleset,
            ships: Vec::new(),
            placed,
        }
    }

    /// Checks that the ship is straight and its length is one the ruleset
    /// asks for.
    pub fn check_length(&self, ship: &Ship) -> Result<(), PlacementError> {
        if ship.is_straight() && self.ruleset.required(ship.length()) > 0 {
            Ok(())
        } else {
            Err(PlacementError::WrongLength)
        }
    }

    /// Returns `true` if another ship of `length` would still fit the quota.
    pub fn has_room_for(&self, length: usize) -> bool {
        self.placed_of(length) < self.ruleset.required(length)
    }

    /// Adds a ship.
    ///
    /// # Errors
    /// - [`PlacementError::WrongLength`] if the ship is bent or its length
    ///   is not in the ruleset
    /// - [`PlacementError::TooManyShips`] if that length's quota is used up
    pub fn push(&mut self, ship: Ship) -> Result<(), PlacementError> {
        self.check_length(&ship)?;
        let length = ship.length();
        if !self.has_room_for(length) {
            return Err(PlacementError::TooManyShips);
        }
        self.placed[length - 1] += 1;
        self.ships.push(ship);
        Ok(())
    }

    /// Returns `true` once every quota is met exactly.
    pub fn is_full(&self) -> bool {
        self.placed.as_slice() == self.ruleset.counts()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// The ship covering `pos`, if any.
    pub fn ship_at(&self, pos: Position) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.contains(pos))
    }

    fn placed_of(&self, length: usize) -> u8 {
        length
            .checked_sub(1)
            .and_then(|i| self.placed.get(i))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(r1: u8, c1: u8, r2: u8, c2: u8) -> Ship {
        Ship::between(Position::new(r1, c1), Position::new(r2, c2))
    }

    #[test]
    fn test_ship_length_and_straightness() {
        assert_eq!(ship(0, 0, 0, 3).length(), 4);
        assert_eq!(ship(5, 2, 2, 2).length(), 4);
        assert_eq!(ship(1, 1, 1, 1).length(), 1);
        assert!(ship(0, 0, 0, 3).is_straight());
        assert!(!ship(0, 0, 1, 1).is_straight());
        assert!(ship(1, 1, 1, 1).is_straight());
        assert!(ship(5, 2, 2, 2).is_straight());
        assert!(!ship(0, 0, 2, 1).is_straight());
    }

    #[test]
    fn test_ship_touches_diagonally() {
        let a = ship(0, 0, 0, 1);
        assert!(a.touches(&ship(1, 2, 1, 2)));
        assert!(!a.touches(&ship(2, 0, 2, 0)));
        assert!(!a.touches(&ship(0, 3, 0, 3)));
    }

    #[test]
    fn test_ruleset_presets() {
        let classic = Ruleset::classic();
        assert_eq!(classic.total(), 10);
        assert_eq!(classic.counts(), &[4, 3, 2, 1]);
        assert_eq!(classic.max_length(), 4);

        let american = Ruleset::american();
        assert_eq!(american.total(), 5);
        assert_eq!(american.counts(), &[0, 1, 2, 1, 1]);
        assert_eq!(american.required(1), 0);
        assert_eq!(american.required(3), 2);
        assert_eq!(american.longest_required(), 5);
    }

    #[test]
    fn test_ruleset_required_outside_range_is_zero() {
        let classic = Ruleset::classic();
        assert_eq!(classic.required(0), 0);
        assert_eq!(classic.required(5), 0);
    }

    #[test]
    fn test_ruleset_new_rejects_all_zero() {
        assert_eq!(Ruleset::new([0, 0, 0]), Err(ConfigError::EmptyRuleset));
        assert_eq!(Ruleset::new(Vec::new()), Err(ConfigError::EmptyRuleset));
        assert!(Ruleset::new([0, 1]).is_ok());
    }

    #[test]
    fn test_ruleset_serde_as_count_list() {
        let json = serde_json::to_string(&Ruleset::american()).unwrap();
        assert_eq!(json, "[0,1,2,1,1]");
        let back: Ruleset = serde_json::from_str("[4,3,2,1]").unwrap();
        assert_eq!(back, Ruleset::classic());
        assert!(serde_json::from_str::<Ruleset>("[0,0]").is_err());
    }

    #[test]
    fn test_fleet_push_rejects_wrong_length() {
        let mut fleet = Fleet::new(Ruleset::classic());
        assert_eq!(fleet.push(ship(0, 0, 0, 4)), Err(PlacementError::WrongLength));
        assert_eq!(fleet.push(ship(0, 0, 1, 1)), Err(PlacementError::WrongLength));
        assert!(fleet.is_empty());
    }

    #[test]
    fn test_fleet_push_rejects_unused_length() {
        let mut fleet = Fleet::new(Ruleset::american());
        assert_eq!(fleet.push(ship(0, 0, 0, 0)), Err(PlacementError::WrongLength));
    }

    #[test]
    fn test_fleet_push_enforces_quota() {
        let mut fleet = Fleet::new(Ruleset::classic());
        assert_eq!(fleet.push(ship(0, 0, 0, 3)), Ok(()));
        assert!(!fleet.has_room_for(4));
        assert_eq!(fleet.push(ship(2, 0, 2, 3)), Err(PlacementError::TooManyShips));
        assert_eq!(fleet.len(), 1);
    }

    #[test]
    fn test_fleet_is_full_only_when_every_quota_met() {
        let ruleset = Ruleset::new([1, 1]).unwrap();
        let mut fleet = Fleet::new(ruleset);
        fleet.push(ship(0, 0, 0, 0)).unwrap();
        assert!(!fleet.is_full());
        fleet.push(ship(2, 0, 2, 1)).unwrap();
        assert!(fleet.is_full());
    }

    #[test]
    fn test_fleet_ship_at() {
        let mut fleet = Fleet::new(Ruleset::classic());
        fleet.push(ship(3, 3, 3, 5)).unwrap();
        assert_eq!(fleet.ship_at(Position::new(3, 4)), Some(&ship(3, 3, 3, 5)));
        assert_eq!(fleet.ship_at(Position::new(4, 4)), None);
    }
}
