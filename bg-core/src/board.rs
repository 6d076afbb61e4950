//! Canonical board state: point occupancy, bar and borne-off counts,
//! active dice, turn owner, and phase.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Number of points on the board.
pub const POINTS: usize = 24;

/// Checkers per side.
pub const CHECKERS_PER_SIDE: u8 = 15;

/// Player color. White occupies positive point values and moves toward
/// higher indices; Black occupies negative values and moves toward lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Sign convention for point values: White +1, Black -1.
    pub fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-color pair arrays (bar and off counts).
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// The 6-point home range this color bears off from.
    pub fn home_range(self) -> RangeInclusive<usize> {
        match self {
            Color::White => 18..=23,
            Color::Black => 0..=5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

/// Turn phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting for dice.
    Rolling,
    /// Dice rolled, moves pending.
    Moving,
    /// A side has borne off all fifteen checkers.
    GameOver,
}

/// Dice available for the current turn: two values, or four after doubles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dice {
    values: [u8; 4],
    len: u8,
}

impl Dice {
    pub const EMPTY: Dice = Dice {
        values: [0; 4],
        len: 0,
    };

    /// Build a turn's dice from a raw two-die roll; doubles expand to
    /// four moves of that value.
    pub fn from_roll(a: u8, b: u8) -> Dice {
        debug_assert!((1..=6).contains(&a) && (1..=6).contains(&b));
        if a == b {
            Dice {
                values: [a; 4],
                len: 4,
            }
        } else {
            Dice {
                values: [a, b, 0, 0],
                len: 2,
            }
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Owner of a point value: White if positive, Black if negative.
pub fn point_owner(value: i8) -> Option<Color> {
    match value {
        v if v > 0 => Some(Color::White),
        v if v < 0 => Some(Color::Black),
        _ => None,
    }
}

/// True iff the point value carries checkers of `color`.
pub fn is_occupied_by(color: Color, value: i8) -> bool {
    point_owner(value) == Some(color)
}

/// True iff `color` may land on a point with this value: empty, its own,
/// or a lone opposing blot. Two or more opposing checkers block.
pub fn is_open(color: Color, value: i8) -> bool {
    match point_owner(value) {
        None => true,
        Some(owner) if owner == color => true,
        Some(_) => value.unsigned_abs() == 1,
    }
}

/// Distance from `index` to bear-off for `color`, 1..=24. This is also
/// the player-frame point number used in move notation.
pub fn pip_distance(color: Color, index: usize) -> u8 {
    debug_assert!(index < POINTS);
    match color {
        Color::White => (POINTS - index) as u8,
        Color::Black => index as u8 + 1,
    }
}

/// Full game state. Every move application produces a new `Board` value;
/// existing values are never mutated through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Signed occupancy per point: +n is n White checkers, -n is n Black.
    pub points: [i8; POINTS],
    /// Checkers on the bar, indexed by `Color::index`.
    pub bar: [u8; 2],
    /// Checkers borne off, indexed by `Color::index`.
    pub off: [u8; 2],
    /// Active color; `None` before the opening roll.
    pub turn: Option<Color>,
    /// Dice for the current turn.
    pub dice: Dice,
    pub status: Status,
}

impl Board {
    /// An empty board with no checkers anywhere.
    pub fn empty() -> Board {
        Board {
            points: [0; POINTS],
            bar: [0; 2],
            off: [0; 2],
            turn: None,
            dice: Dice::EMPTY,
            status: Status::Rolling,
        }
    }

    /// The standard starting layout.
    pub fn start() -> Board {
        let mut board = Board::empty();
        board.points[0] = 5;
        board.points[4] = -3;
        board.points[6] = -5;
        board.points[11] = 2;
        board.points[12] = -5;
        board.points[16] = 3;
        board.points[18] = 5;
        board.points[23] = -2;
        board
    }

    pub fn bar_count(&self, color: Color) -> u8 {
        self.bar[color.index()]
    }

    pub fn off_count(&self, color: Color) -> u8 {
        self.off[color.index()]
    }

    /// True iff every checker of `color` still in play sits inside its
    /// home range and none wait on the bar.
    pub fn all_checkers_home(&self, color: Color) -> bool {
        if self.bar_count(color) > 0 {
            return false;
        }
        let home = color.home_range();
        (0..POINTS).all(|i| home.contains(&i) || !is_occupied_by(color, self.points[i]))
    }

    /// The occupied home point farthest from bear-off, if any: the lowest
    /// White index in 18..=23, the highest Black index in 0..=5.
    pub fn farthest_home_point(&self, color: Color) -> Option<usize> {
        match color {
            Color::White => color
                .home_range()
                .find(|&i| is_occupied_by(color, self.points[i])),
            Color::Black => color
                .home_range()
                .rev()
                .find(|&i| is_occupied_by(color, self.points[i])),
        }
    }

    /// On-board + bar + off for one color. Fifteen on every reachable
    /// board; the test suite asserts this after every transition.
    pub fn total_checkers(&self, color: Color) -> u8 {
        let on_board: u8 = self
            .points
            .iter()
            .filter(|&&v| is_occupied_by(color, v))
            .map(|v| v.unsigned_abs())
            .sum();
        on_board + self.bar_count(color) + self.off_count(color)
    }
}
