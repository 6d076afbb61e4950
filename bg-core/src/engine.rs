//! Move application: re-entry, standard moves, hits, bear-off, and
//! terminal detection. This module is the single place that produces new
//! `Board` values from move requests.
//!
//! Rule-illegal requests are not errors. They come back as
//! `MoveOutcome::Rejected` with no new board and no label, and the caller
//! must not consume a die. Errors are reserved for structurally invalid
//! input that no board could make legal.

use thiserror::Error;

use crate::board::{
    is_occupied_by, point_owner, Board, Color, Status, CHECKERS_PER_SIDE, POINTS,
};
use crate::legal::bear_off_die;
use crate::moves::{Source, To};
use crate::notation;

/// A successfully applied single-die move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub board: Board,
    /// Notation for the move, e.g. `"12/9*"`, `"6/off"`, `"bar/3"`.
    pub label: String,
    /// The die value this move consumed.
    pub die: u8,
}

/// Outcome of a move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied(Applied),
    /// The request was rule-illegal or a same-point no-op. State is
    /// unchanged; the input board stays authoritative.
    Rejected,
}

/// Structurally invalid input, as opposed to a merely illegal move.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("point index out of range: {0}")]
    PointOutOfRange(usize),
    #[error("die value out of range: {0}")]
    DieOutOfRange(u8),
}

/// Apply one single-die move for `color` and return the new board with
/// its notation label and the die consumed. Compound destinations from
/// the enumeration step are applied as successive calls, one die each.
///
/// The die implied by the request is re-validated against `unused`;
/// a request whose die is not available is rejected even if the
/// geometry is otherwise fine.
pub fn apply_move(
    board: &Board,
    color: Color,
    from: Source,
    to: To,
    unused: &[u8],
) -> Result<MoveOutcome, MoveError> {
    validate_input(from, to, unused)?;

    match (from, to) {
        (Source::Point(f), To::Point(t)) if f == t => Ok(MoveOutcome::Rejected),
        (Source::Bar(c), to) => Ok(apply_entry(board, color, c, to, unused)),
        (Source::Point(f), To::Off) => Ok(apply_bear_off(board, color, f, unused)),
        (Source::Point(f), To::Point(t)) => Ok(apply_standard(board, color, f, t, unused)),
    }
}

/// The color that has borne off all fifteen checkers, if any.
pub fn winner(board: &Board) -> Option<Color> {
    if board.off_count(Color::White) == CHECKERS_PER_SIDE {
        return Some(Color::White);
    }
    if board.off_count(Color::Black) == CHECKERS_PER_SIDE {
        return Some(Color::Black);
    }
    None
}

fn validate_input(from: Source, to: To, unused: &[u8]) -> Result<(), MoveError> {
    if let Source::Point(i) = from {
        if i >= POINTS {
            return Err(MoveError::PointOutOfRange(i));
        }
    }
    if let To::Point(i) = to {
        if i >= POINTS {
            return Err(MoveError::PointOutOfRange(i));
        }
    }
    for &d in unused {
        if !(1..=6).contains(&d) {
            return Err(MoveError::DieOutOfRange(d));
        }
    }
    Ok(())
}

/// Land one checker of `color` on `target`, hitting a lone opposing blot
/// if present. `None` when the point is held by two or more opponents.
fn land(board: &Board, color: Color, target: usize) -> Option<(Board, bool)> {
    let defense = board.points[target];
    let mut next = *board;
    let hit = match point_owner(defense) {
        Some(owner) if owner != color => {
            if defense.unsigned_abs() >= 2 {
                return None;
            }
            next.points[target] = color.sign();
            next.bar[owner.index()] += 1;
            true
        }
        _ => {
            next.points[target] += color.sign();
            false
        }
    };
    Some((next, hit))
}

fn apply_entry(board: &Board, color: Color, bar_color: Color, to: To, unused: &[u8]) -> MoveOutcome {
    if bar_color != color || board.bar_count(color) == 0 {
        return MoveOutcome::Rejected;
    }
    let To::Point(target) = to else {
        return MoveOutcome::Rejected;
    };
    // The die is implied by the entry point.
    let die = match color {
        Color::White => target as u8 + 1,
        Color::Black => (POINTS - target) as u8,
    };
    if !(1..=6).contains(&die) || !unused.contains(&die) {
        return MoveOutcome::Rejected;
    }
    let Some((mut next, hit)) = land(board, color, target) else {
        return MoveOutcome::Rejected;
    };
    next.bar[color.index()] -= 1;
    MoveOutcome::Applied(Applied {
        board: next,
        label: notation::entry_label(die, hit),
        die,
    })
}

fn apply_bear_off(board: &Board, color: Color, from: usize, unused: &[u8]) -> MoveOutcome {
    if board.bar_count(color) > 0 || !board.all_checkers_home(color) {
        return MoveOutcome::Rejected;
    }
    let Some(die) = bear_off_die(board, color, unused, from) else {
        return MoveOutcome::Rejected;
    };
    let mut next = *board;
    next.points[from] -= color.sign();
    next.off[color.index()] += 1;
    if next.off[color.index()] == CHECKERS_PER_SIDE {
        next.status = Status::GameOver;
    }
    MoveOutcome::Applied(Applied {
        board: next,
        label: notation::bear_off_label(color, from),
        die,
    })
}

fn apply_standard(board: &Board, color: Color, from: usize, to: usize, unused: &[u8]) -> MoveOutcome {
    if board.bar_count(color) > 0 {
        return MoveOutcome::Rejected;
    }
    if !is_occupied_by(color, board.points[from]) {
        return MoveOutcome::Rejected;
    }
    let forward = match color {
        Color::White => to > from,
        Color::Black => to < from,
    };
    if !forward {
        return MoveOutcome::Rejected;
    }
    let die = from.abs_diff(to) as u8;
    if die > 6 || !unused.contains(&die) {
        return MoveOutcome::Rejected;
    }
    let Some((mut next, hit)) = land(board, color, to) else {
        return MoveOutcome::Rejected;
    };
    next.points[from] -= color.sign();
    MoveOutcome::Applied(Applied {
        board: next,
        label: notation::move_label(color, from, to, hit),
        die,
    })
}
