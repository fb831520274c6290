//! A player's own field: the board plus the fleet placed on it.

use serde::{Deserialize, Serialize};

use crate::{Board, Fleet, GameConfig, PlacementError, Position, Ship};

/// What a shot did to the field it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Miss,
    Hit,
    /// The shot hit the last intact cell of a ship.
    Sunk,
}

impl Impact {
    pub fn is_hit(self) -> bool {
        !matches!(self, Impact::Miss)
    }
}

/// One player's board and fleet, kept consistent with each other.
///
/// Every cell the board marks as occupied belongs to exactly one ship in
/// the fleet, and no two ships touch, not even at a corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerField {
    board: Board,
    fleet: Fleet,
}

impl PlayerField {
    /// An empty field sized and ruled by `config`.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            board: Board::new(config.rows(), config.cols()),
            fleet: Fleet::new(config.ruleset().clone()),
        }
    }

    /// Builds a field by placing `ships` in order.
    ///
    /// The result may still be building; check [`is_ready`](Self::is_ready)
    /// before queueing it.
    ///
    /// # Errors
    /// The first [`PlacementError`] any ship raises.
    pub fn try_from_ships(
        config: &GameConfig,
        ships: impl IntoIterator<Item = Ship>,
    ) -> Result<Self, PlacementError> {
        let mut field = Self::new(config);
        for ship in ships {
            field.try_place_ship(ship)?;
        }
        Ok(field)
    }

    /// Validates and places a ship.
    ///
    /// Checks run in a fixed order and the first failure wins: length,
    /// bounds, contact with other ships, then the quota. Nothing changes
    /// unless every check passes.
    pub fn try_place_ship(&mut self, ship: Ship) -> Result<(), PlacementError> {
        self.fleet.check_length(&ship)?;

        if !self.board.contains_rect(&ship.zone()) {
            return Err(PlacementError::OutOfBounds);
        }

        if self.fleet.ships().iter().any(|placed| placed.touches(&ship)) {
            return Err(PlacementError::Overlap);
        }

        self.fleet.push(ship)?;
        for cell in ship.zone() {
            self.board.place_ship(cell);
        }
        Ok(())
    }

    /// Returns `true` once the fleet is complete.
    pub fn is_ready(&self) -> bool {
        self.fleet.is_full()
    }

    /// Records a shot at `pos` and reports what it did.
    ///
    /// Returns `None` if `pos` is off the board. Firing at a cell that was
    /// already shot reports the same impact again without changing
    /// anything.
    pub fn receive_shot(&mut self, pos: Position) -> Option<Impact> {
        if !self.board.contains(pos) {
            return None;
        }
        let hit = self.board.has_ship(pos);
        self.board.place_shot(pos);

        let impact = if !hit {
            Impact::Miss
        } else if self.ship_at(pos).is_some_and(|ship| self.is_sunk(ship)) {
            Impact::Sunk
        } else {
            Impact::Hit
        };
        Some(impact)
    }

    /// The ship covering `pos`, if any.
    pub fn ship_at(&self, pos: Position) -> Option<&Ship> {
        self.fleet.ship_at(pos)
    }

    /// Returns `true` if every cell of `ship` has been shot.
    pub fn is_sunk(&self, ship: &Ship) -> bool {
        ship.zone().cells().all(|cell| self.board.has_shot(cell))
    }

    /// Returns `true` once every ship cell has been shot.
    pub fn is_defeated(&self) -> bool {
        self.board.all_ships_shot()
    }

    /// Returns `true` if `pos` has already been fired upon.
    pub fn was_targeted(&self, pos: Position) -> bool {
        self.board.has_shot(pos)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}
