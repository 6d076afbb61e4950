use crate::board::Color;
use crate::notation::{bear_off_label, entry_label, move_label, point_number};

#[test]
fn point_numbers_invert_per_color() {
    assert_eq!(point_number(Color::White, 12), 12);
    assert_eq!(point_number(Color::White, 23), 1);
    assert_eq!(point_number(Color::White, 0), 24);
    assert_eq!(point_number(Color::Black, 12), 13);
    assert_eq!(point_number(Color::Black, 0), 1);
    assert_eq!(point_number(Color::Black, 23), 24);
}

#[test]
fn standard_move_labels() {
    assert_eq!(move_label(Color::White, 12, 15, false), "12/9");
    assert_eq!(move_label(Color::White, 12, 15, true), "12/9*");
    assert_eq!(move_label(Color::Black, 23, 20, false), "24/21");
    assert_eq!(move_label(Color::Black, 5, 1, true), "6/2*");
}

#[test]
fn bear_off_labels() {
    assert_eq!(bear_off_label(Color::White, 18), "6/off");
    assert_eq!(bear_off_label(Color::White, 23), "1/off");
    assert_eq!(bear_off_label(Color::Black, 3), "4/off");
}

#[test]
fn entry_labels_use_the_die() {
    assert_eq!(entry_label(3, false), "bar/3");
    assert_eq!(entry_label(3, true), "bar/3*");
    assert_eq!(entry_label(6, false), "bar/6");
}
