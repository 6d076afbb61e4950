//! Legal source and destination enumeration: bar re-entry, the
//! multi-die path search, and bear-off eligibility.
//!
//! Enumeration is phase-agnostic. It answers for whatever board, color,
//! and unused dice it is given; gating on turn ownership and `Status`
//! belongs to the caller.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::board::{is_occupied_by, is_open, pip_distance, Board, Color, POINTS};
use crate::moves::{Source, To};

/// A reachable destination and the cheapest die path that reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub to: To,
    /// Die values consumed along the path, in play order.
    pub dice: Vec<u8>,
}

/// Board index where `color` re-enters from the bar with `die`.
pub fn entry_index(color: Color, die: u8) -> usize {
    debug_assert!((1..=6).contains(&die));
    match color {
        Color::White => die as usize - 1,
        Color::Black => POINTS - die as usize,
    }
}

/// One step of travel. `None` when the step leaves the board.
fn step(color: Color, from: usize, die: u8) -> Option<usize> {
    match color {
        Color::White => {
            let to = from + die as usize;
            (to < POINTS).then_some(to)
        }
        Color::Black => (from >= die as usize).then(|| from - die as usize),
    }
}

/// Re-entry targets for each distinct unused die value. A point held by
/// two or more opposing checkers blocks entry; a lone blot does not.
fn entry_destinations(board: &Board, color: Color, dice: &[u8]) -> Vec<Destination> {
    let mut seen = [false; 6];
    let mut out = Vec::new();
    for &die in dice {
        if !(1..=6).contains(&die) || seen[die as usize - 1] {
            continue;
        }
        seen[die as usize - 1] = true;
        let idx = entry_index(color, die);
        if is_open(color, board.points[idx]) {
            out.push(Destination {
                to: To::Point(idx),
                dice: vec![die],
            });
        }
    }
    out
}

/// The die that bears off from `from`, if any: an exact pip match always
/// works; a larger die works only when `from` is the farthest occupied
/// home point. Callers must already have verified all checkers are home.
pub(crate) fn bear_off_die(board: &Board, color: Color, dice: &[u8], from: usize) -> Option<u8> {
    if !color.home_range().contains(&from) || !is_occupied_by(color, board.points[from]) {
        return None;
    }
    let dist = pip_distance(color, from);
    if dice.contains(&dist) {
        return Some(dist);
    }
    if board.farthest_home_point(color) == Some(from) {
        return dice.iter().copied().filter(|&d| d > dist).min();
    }
    None
}

/// All destinations reachable from `from` with the unused dice.
///
/// While the bar holds checkers for `color`, only `Source::Bar` re-entry
/// destinations exist; every point source yields nothing. Otherwise a
/// breadth-first search over orderings of the unused dice runs from the
/// source point: paths prune at any blocked intermediate point, each
/// reachable index is reported once with the fewest-dice path, and a
/// bear-off destination is added when every checker is home.
pub fn destinations_from(
    board: &Board,
    color: Color,
    dice: &[u8],
    from: Source,
) -> Vec<Destination> {
    if board.bar_count(color) > 0 {
        return match from {
            Source::Bar(c) if c == color => entry_destinations(board, color, dice),
            _ => Vec::new(),
        };
    }
    let start = match from {
        Source::Bar(_) => return Vec::new(),
        Source::Point(idx) => idx,
    };
    if start >= POINTS || !is_occupied_by(color, board.points[start]) {
        return Vec::new();
    }

    let dice: Vec<u8> = dice
        .iter()
        .copied()
        .filter(|d| (1..=6).contains(d))
        .collect();

    // Levels of the search consume one die each, so the first visit to an
    // index is the fewest-dice path to it.
    let mut best: FxHashMap<usize, Vec<u8>> = FxHashMap::default();
    let mut frontier: Vec<(usize, Vec<u8>, Vec<u8>)> = vec![(start, Vec::new(), dice.clone())];
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for (pos, path, remaining) in frontier {
            let mut tried = [false; 6];
            for (i, &die) in remaining.iter().enumerate() {
                if tried[die as usize - 1] {
                    continue;
                }
                tried[die as usize - 1] = true;
                let Some(target) = step(color, pos, die) else {
                    continue;
                };
                if !is_open(color, board.points[target]) || best.contains_key(&target) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(die);
                let mut rest = remaining.clone();
                rest.remove(i);
                best.insert(target, next_path.clone());
                next_frontier.push((target, next_path, rest));
            }
        }
        frontier = next_frontier;
    }

    let mut reached: Vec<(usize, Vec<u8>)> = best.into_iter().collect();
    reached.sort_by_key(|&(idx, _)| idx);
    let mut out: Vec<Destination> = reached
        .into_iter()
        .map(|(idx, path)| Destination {
            to: To::Point(idx),
            dice: path,
        })
        .collect();

    if board.all_checkers_home(color) {
        if let Some(die) = bear_off_die(board, color, &dice, start) {
            out.push(Destination {
                to: To::Off,
                dice: vec![die],
            });
        }
    }
    out
}

/// The "which pieces can move" query: every index occupied by `color`
/// from which at least one destination exists, bear-off included. Empty
/// while the bar is nonempty, since re-entry is the only legal play.
pub fn movable_sources(board: &Board, color: Color, dice: &[u8]) -> BTreeSet<usize> {
    let mut out = BTreeSet::new();
    if board.bar_count(color) > 0 {
        return out;
    }
    for idx in 0..POINTS {
        if !is_occupied_by(color, board.points[idx]) {
            continue;
        }
        if !destinations_from(board, color, dice, Source::Point(idx)).is_empty() {
            out.insert(idx);
        }
    }
    out
}
