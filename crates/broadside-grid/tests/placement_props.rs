use broadside_grid::{GameConfig, PlacementError, PlayerField, Position, Rectangle, Ruleset, Ship};
use proptest::prelude::*;

fn straight_ship(row: u8, col: u8, len: u8, horizontal: bool) -> Ship {
    let start = Position::new(row, col);
    let end = if horizontal {
        Position::new(row, col + len - 1)
    } else {
        Position::new(row + len - 1, col)
    };
    Ship::between(start, end)
}

fn ship_strategy(max_len: u8) -> impl Strategy<Value = Ship> {
    (0..10u8, 0..10u8, 1..=max_len, any::<bool>())
        .prop_map(|(row, col, len, horizontal)| straight_ship(row, col, len, horizontal))
}

fn ruleset_strategy() -> impl Strategy<Value = Ruleset> {
    prop_oneof![Just(Ruleset::classic()), Just(Ruleset::american())]
}

fn ship(r1: u8, c1: u8, r2: u8, c2: u8) -> Ship {
    Ship::between(Position::new(r1, c1), Position::new(r2, c2))
}

/// A complete classic fleet with a clear cell between every pair of ships.
fn classic_layout() -> Vec<Ship> {
    vec![
        ship(0, 0, 0, 3),
        ship(0, 5, 0, 7),
        ship(0, 9, 0, 9),
        ship(2, 0, 2, 2),
        ship(2, 4, 2, 5),
        ship(2, 7, 2, 8),
        ship(4, 0, 4, 1),
        ship(4, 3, 4, 3),
        ship(4, 5, 4, 5),
        ship(4, 7, 4, 7),
    ]
}

fn per_length_counts(ships: &[Ship], max_len: usize) -> Vec<u8> {
    let mut counts = vec![0u8; max_len];
    for ship in ships {
        counts[ship.length() - 1] += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn fleet_is_full_iff_counts_match_ruleset(
        ruleset in ruleset_strategy(),
        candidates in prop::collection::vec(ship_strategy(5), 0..60),
    ) {
        let config = GameConfig::new(10, 10, ruleset.clone()).unwrap();
        let mut field = PlayerField::new(&config);
        let mut accepted = Vec::new();
        for ship in candidates {
            if field.try_place_ship(ship).is_ok() {
                accepted.push(ship);
            }
            let counts = per_length_counts(field.fleet().ships(), ruleset.max_length());
            for (placed, required) in counts.iter().zip(ruleset.counts()) {
                prop_assert!(placed <= required);
            }
        }

        let counts = per_length_counts(&accepted, ruleset.max_length());
        let expected_full = accepted.len() == ruleset.total() && counts == ruleset.counts();
        prop_assert_eq!(field.is_ready(), expected_full);

        let rebuilt = PlayerField::try_from_ships(&config, accepted);
        prop_assert_eq!(rebuilt.as_ref().map(PlayerField::is_ready), Ok(expected_full));
        prop_assert_eq!(rebuilt, Ok(field));
    }

    #[test]
    fn touching_ships_fail_with_overlap(
        first in ship_strategy(4),
        dr in 0..3u8,
        dc in 0..3u8,
        len in 1..=3u8,
        horizontal in any::<bool>(),
    ) {
        let config = GameConfig::default();
        let mut field = PlayerField::new(&config);
        prop_assume!(field.try_place_ship(first).is_ok());

        // Anchor the second ship somewhere in the first ship's halo.
        let halo = first.zone().inflate(1);
        let anchor = Position::new(halo.first().row + dr, halo.first().col + dc);
        prop_assume!(halo.contains(anchor));
        let second = straight_ship(anchor.row, anchor.col, len, horizontal);
        prop_assume!(field.board().contains_rect(&second.zone()));
        prop_assert!(first.zone().touches_or_intersects(&second.zone()));

        let before = field.clone();
        prop_assert_eq!(field.try_place_ship(second), Err(PlacementError::Overlap));
        prop_assert_eq!(field, before);
    }

    #[test]
    fn ship_past_edge_fails_with_out_of_bounds(
        fixed in 0..10u8,
        overhang in 1..4u8,
        len in 2..=4u8,
        horizontal in any::<bool>(),
        full in any::<bool>(),
    ) {
        prop_assume!(overhang < len);
        let config = GameConfig::default();
        let mut field = if full {
            PlayerField::try_from_ships(&config, classic_layout()).unwrap()
        } else {
            PlayerField::new(&config)
        };
        let start = 10 - (len - overhang);
        let ship = if horizontal {
            straight_ship(fixed, start, len, true)
        } else {
            straight_ship(start, fixed, len, false)
        };
        prop_assert_eq!(field.try_place_ship(ship), Err(PlacementError::OutOfBounds));
    }

    #[test]
    fn queries_do_not_mutate(row in 0..12u8, col in 0..12u8, shots in prop::collection::vec((0..10u8, 0..10u8), 0..20)) {
        let config = GameConfig::default();
        let mut field = PlayerField::try_from_ships(&config, classic_layout()).unwrap();
        for (r, c) in shots {
            field.receive_shot(Position::new(r, c));
        }
        let before = field.clone();
        let pos = Position::new(row, col);
        let first = (field.board().has_ship(pos), field.board().has_shot(pos));
        for _ in 0..3 {
            prop_assert_eq!((field.board().has_ship(pos), field.board().has_shot(pos)), first);
        }
        prop_assert_eq!(field, before);
    }
}

#[test]
fn test_try_from_ships_classic_layout_is_full() {
    let config = GameConfig::default();
    let mut field = PlayerField::try_from_ships(&config, classic_layout()).unwrap();
    assert!(field.is_ready());
    assert_eq!(field.fleet().len(), 10);
    assert_eq!(field.board().ship_layer().count_ones(), 20);

    assert_eq!(
        field.try_place_ship(ship(8, 8, 8, 8)),
        Err(PlacementError::TooManyShips)
    );
}

#[test]
fn test_try_place_ship_edge_adjacent_single_fails_with_overlap() {
    let mut field = PlayerField::new(&GameConfig::default());
    field.try_place_ship(ship(0, 0, 1, 0)).unwrap();
    assert_eq!(
        field.try_place_ship(ship(0, 1, 0, 1)),
        Err(PlacementError::Overlap)
    );
}

#[test]
fn test_try_from_ships_american_rejects_single_cell() {
    let config = GameConfig::new(10, 10, Ruleset::american()).unwrap();
    let result = PlayerField::try_from_ships(&config, [ship(5, 5, 5, 5)]);
    assert_eq!(result, Err(PlacementError::WrongLength));
}

#[test]
fn test_try_place_ship_fills_last_row_and_column() {
    let mut field = PlayerField::new(&GameConfig::default());
    assert_eq!(field.try_place_ship(ship(9, 6, 9, 9)), Ok(()));
    assert_eq!(field.try_place_ship(ship(5, 9, 7, 9)), Ok(()));
    let corner = Rectangle::new(Position::new(9, 9), Position::new(9, 9));
    assert!(field.board().contains_rect(&corner));
}
