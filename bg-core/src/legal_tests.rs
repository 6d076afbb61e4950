use crate::board::{Board, Color};
use crate::legal::{destinations_from, entry_index, movable_sources, Destination};
use crate::moves::{Source, To};

fn dest_for(dests: &[Destination], to: To) -> Option<&Destination> {
    dests.iter().find(|d| d.to == to)
}

#[test]
fn entry_index_per_color() {
    assert_eq!(entry_index(Color::White, 1), 0);
    assert_eq!(entry_index(Color::White, 3), 2);
    assert_eq!(entry_index(Color::White, 6), 5);
    assert_eq!(entry_index(Color::Black, 1), 23);
    assert_eq!(entry_index(Color::Black, 3), 21);
    assert_eq!(entry_index(Color::Black, 6), 18);
}

#[test]
fn single_and_compound_destinations() {
    let mut b = Board::empty();
    b.points[12] = 5;
    let dests = destinations_from(&b, Color::White, &[3, 4], Source::Point(12));

    let d15 = dest_for(&dests, To::Point(15)).expect("die 3 destination");
    assert_eq!(d15.dice, vec![3]);
    let d16 = dest_for(&dests, To::Point(16)).expect("die 4 destination");
    assert_eq!(d16.dice, vec![4]);
    let d19 = dest_for(&dests, To::Point(19)).expect("compound destination");
    assert_eq!(d19.dice.len(), 2);
    assert_eq!(dests.len(), 3);
}

#[test]
fn compound_path_prunes_blocked_intermediates() {
    let mut b = Board::empty();
    b.points[12] = 5;
    b.points[15] = -2;
    let dests = destinations_from(&b, Color::White, &[3, 4], Source::Point(12));

    // 15 is blocked, so 19 is reachable only through 16 (4 then 3).
    assert!(dest_for(&dests, To::Point(15)).is_none());
    let d19 = dest_for(&dests, To::Point(19)).expect("path through 16");
    assert_eq!(d19.dice, vec![4, 3]);

    // Block both intermediates and the compound target disappears.
    b.points[16] = -3;
    let dests = destinations_from(&b, Color::White, &[3, 4], Source::Point(12));
    assert!(dests.is_empty());
}

#[test]
fn lone_blot_does_not_block_a_path() {
    let mut b = Board::empty();
    b.points[12] = 2;
    b.points[15] = -1;
    let dests = destinations_from(&b, Color::White, &[3, 4], Source::Point(12));
    assert!(dest_for(&dests, To::Point(15)).is_some());
    assert!(dest_for(&dests, To::Point(19)).is_some());
}

#[test]
fn doubles_chain_up_to_four_steps() {
    let mut b = Board::empty();
    b.points[0] = 1;
    let dests = destinations_from(&b, Color::White, &[6, 6, 6, 6], Source::Point(0));
    assert_eq!(dest_for(&dests, To::Point(6)).unwrap().dice, vec![6]);
    assert_eq!(dest_for(&dests, To::Point(12)).unwrap().dice, vec![6, 6]);
    assert_eq!(dest_for(&dests, To::Point(18)).unwrap().dice, vec![6, 6, 6]);
    // A fourth step would leave the board.
    assert_eq!(dests.len(), 3);
}

#[test]
fn black_moves_toward_lower_indices() {
    let mut b = Board::empty();
    b.points[23] = -2;
    let dests = destinations_from(&b, Color::Black, &[3, 4], Source::Point(23));
    assert!(dest_for(&dests, To::Point(20)).is_some());
    assert!(dest_for(&dests, To::Point(19)).is_some());
    assert!(dest_for(&dests, To::Point(16)).is_some());
}

#[test]
fn opponent_points_yield_no_destinations() {
    let b = Board::start();
    // Index 4 belongs to Black; White may not move from it.
    assert!(destinations_from(&b, Color::White, &[3, 4], Source::Point(4)).is_empty());
}

#[test]
fn bar_checkers_restrict_play_to_entry() {
    let mut b = Board::start();
    b.bar[Color::White.index()] = 1;

    // Point sources produce nothing while the bar is occupied.
    assert!(destinations_from(&b, Color::White, &[3, 4], Source::Point(0)).is_empty());
    assert!(movable_sources(&b, Color::White, &[3, 4]).is_empty());

    let dests = destinations_from(&b, Color::White, &[3, 4], Source::Bar(Color::White));
    assert_eq!(dest_for(&dests, To::Point(2)).unwrap().dice, vec![3]);
    assert_eq!(dest_for(&dests, To::Point(3)).unwrap().dice, vec![4]);
}

#[test]
fn blocked_entry_points_are_excluded() {
    let mut b = Board::empty();
    b.bar[Color::Black.index()] = 2;
    b.points[21] = 2; // White anchor on Black's die-3 entry
    b.points[20] = 1; // lone White blot on the die-4 entry stays open

    let dests = destinations_from(&b, Color::Black, &[3, 4], Source::Bar(Color::Black));
    assert!(dest_for(&dests, To::Point(21)).is_none());
    assert!(dest_for(&dests, To::Point(20)).is_some());
}

#[test]
fn entry_for_wrong_color_sentinel_is_empty() {
    let mut b = Board::empty();
    b.bar[Color::White.index()] = 1;
    assert!(destinations_from(&b, Color::White, &[3, 4], Source::Bar(Color::Black)).is_empty());
    // No bar checkers means no entry either.
    let b = Board::empty();
    assert!(destinations_from(&b, Color::White, &[3, 4], Source::Bar(Color::White)).is_empty());
}

#[test]
fn movable_sources_on_the_start_board() {
    let b = Board::start();
    let white: Vec<usize> = movable_sources(&b, Color::White, &[3, 4]).into_iter().collect();
    assert_eq!(white, vec![0, 11, 16, 18]);
    let black: Vec<usize> = movable_sources(&b, Color::Black, &[3, 4]).into_iter().collect();
    assert_eq!(black, vec![4, 6, 12, 23]);
}

#[test]
fn exact_die_bears_off_any_home_point() {
    let mut b = Board::empty();
    b.points[18] = 1;
    b.points[21] = 1;
    // Distance 3 from index 21 matches exactly even though 18 is farther.
    let dests = destinations_from(&b, Color::White, &[3], Source::Point(21));
    assert_eq!(dest_for(&dests, To::Off).unwrap().dice, vec![3]);
}

#[test]
fn high_die_bears_off_only_the_farthest_checker() {
    let mut b = Board::empty();
    b.points[19] = 1;
    b.points[20] = 1;
    // Index 20 is not the farthest White checker, so a 6 cannot lift it.
    let dests = destinations_from(&b, Color::White, &[6], Source::Point(20));
    assert!(dest_for(&dests, To::Off).is_none());
    // From the farthest point (distance 5) the overshooting 6 works.
    let dests = destinations_from(&b, Color::White, &[6], Source::Point(19));
    assert_eq!(dest_for(&dests, To::Off).unwrap().dice, vec![6]);
}

#[test]
fn no_bear_off_with_a_checker_outside_home() {
    let mut b = Board::empty();
    b.points[20] = 1;
    b.points[10] = 1;
    let dests = destinations_from(&b, Color::White, &[4], Source::Point(20));
    assert!(dest_for(&dests, To::Off).is_none());
}

#[test]
fn bear_off_counts_as_a_movable_source() {
    let mut b = Board::empty();
    b.points[5] = -1;
    // Black's lone checker at index 5, die 6: no on-board step exists,
    // only the bear-off.
    let sources = movable_sources(&b, Color::Black, &[6]);
    assert!(sources.contains(&5));
    let dests = destinations_from(&b, Color::Black, &[6], Source::Point(5));
    assert_eq!(dest_for(&dests, To::Off).unwrap().dice, vec![6]);
}

#[test]
fn destinations_stay_on_the_board() {
    let b = Board::start();
    for idx in movable_sources(&b, Color::White, &[6, 5]) {
        for d in destinations_from(&b, Color::White, &[6, 5], Source::Point(idx)) {
            match d.to {
                To::Point(i) => assert!(i < 24),
                To::Off => {}
            }
        }
    }
}
