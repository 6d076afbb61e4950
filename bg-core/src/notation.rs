//! Move notation in the mover's frame of reference.
//!
//! Point numbers are pip distances to bear-off, so "1" is always the
//! last point a checker crosses before bearing off. Labels never carry
//! raw board indices.

use crate::board::{pip_distance, Color};

/// Player-frame point number for a board index, 1..=24.
pub fn point_number(color: Color, index: usize) -> u8 {
    pip_distance(color, index)
}

/// `"N/M"` for a point-to-point move, `"N/M*"` when it hits a blot.
pub fn move_label(color: Color, from: usize, to: usize, hit: bool) -> String {
    format!(
        "{}/{}{}",
        point_number(color, from),
        point_number(color, to),
        hit_marker(hit)
    )
}

/// `"N/off"` for a bear-off.
pub fn bear_off_label(color: Color, from: usize) -> String {
    format!("{}/off", point_number(color, from))
}

/// `"bar/D"` for re-entry with die D, `"bar/D*"` on a hit. The entry die
/// reads the same in both players' frames.
pub fn entry_label(die: u8, hit: bool) -> String {
    format!("bar/{}{}", die, hit_marker(hit))
}

fn hit_marker(hit: bool) -> &'static str {
    if hit {
        "*"
    } else {
        ""
    }
}
