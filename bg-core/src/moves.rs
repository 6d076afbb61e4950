//! Move addressing and per-turn die bookkeeping.

use serde::{Deserialize, Serialize};

use crate::board::{Color, Dice};

/// Where a checker moves from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A board point, 0..=23.
    Point(usize),
    /// Re-entry from the bar for this color.
    Bar(Color),
}

/// Where a checker moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum To {
    /// A board point, 0..=23.
    Point(usize),
    /// Off the board.
    Off,
}

/// A die consumed this turn, tagged with the notation it produced.
/// Kept by the caller alongside the turn's roll to compute the dice
/// still available and to support undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedDie {
    pub value: u8,
    pub label: String,
}

/// Dice from `roll` not yet consumed by `used`, multiset-wise.
pub fn remaining_dice(roll: &Dice, used: &[UsedDie]) -> Vec<u8> {
    let mut rem: Vec<u8> = roll.as_slice().to_vec();
    for u in used {
        if let Some(pos) = rem.iter().position(|&d| d == u.value) {
            rem.remove(pos);
        }
    }
    rem
}
