//! Notation encoder tests: decision table and sandwich carry.

use bumps_core::{encoder, movement::MoveMatrix};

fn matrix(days: &[&[&[i32]]]) -> MoveMatrix {
    let sizes: Vec<usize> = days[0].iter().map(|d| d.len()).collect();
    let mut moves = MoveMatrix::new(days.len(), &sizes);
    for (day, divisions) in days.iter().enumerate() {
        for (division, values) in divisions.iter().enumerate() {
            moves.division_mut(day, division).copy_from_slice(values);
        }
    }
    moves
}

#[test]
fn row_overs_only() {
    let moves = matrix(&[&[&[0, 0, 0], &[0, 0, 0]]]);
    assert_eq!(encoder::encode(&moves), "rrr rrrr\n");
}

#[test]
fn ordinary_bump_consumes_two_slots() {
    let moves = matrix(&[&[&[0, -1, 1]]]);
    assert_eq!(encoder::encode(&moves), "ur\n");
}

/// Head crew going up is written as `r` in its own division and `u` above.
#[test]
fn sandwich_carry_from_head_crew() {
    let moves = matrix(&[&[&[-1, 1, -1], &[1, -1, 1]]]);
    assert_eq!(encoder::encode(&moves), "ur uu\n");
}

#[test]
fn sandwich_carry_after_bumping_the_head() {
    let moves = matrix(&[&[&[0, 0, -1], &[-1, 2, 0]]]);
    assert_eq!(encoder::encode(&moves), "ru urr\n");
}

#[test]
fn overbump_by_three() {
    let moves = matrix(&[&[&[0, -3, -1, 1, 3]]]);
    assert_eq!(encoder::encode(&moves), "o3ur\n");
}

#[test]
fn one_line_per_day() {
    let moves = matrix(&[
        &[&[0, -1, 1]],
        &[&[0, 0, 0]],
        &[&[-1, 1, 0]],
    ]);
    assert_eq!(encoder::encode(&moves), "ur\nrrr\nru\n");
}

/// Values with no notation are skipped rather than guessed at.
#[test]
fn unencodable_movement_is_skipped() {
    let moves = matrix(&[&[&[0, 0, 2]]]);
    assert_eq!(encoder::encode(&moves), "rr\n");
}
