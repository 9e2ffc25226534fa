//! Notation encoder: movement matrix to results text.
//!
//! One line per day. Divisions are written bottom division first and
//! separated by a space; within a division the crews are described from
//! the bottom slot upwards. Every division above the bottom one opens
//! with the sandwich crew's result: `u` if the head crew of the division
//! below went up, `r` otherwise.
//!
//! Overbumps are written as `oN` only when the crew N places ahead sat
//! in the same division; a deeper chain across a boundary is logged and
//! skipped.

use crate::{movement::MoveMatrix, types::Movement};
use std::fmt::Write;

/// Encode every day of `moves`.
pub fn encode(moves: &MoveMatrix) -> String {
    let mut results = String::new();
    for day in 0..moves.days() {
        encode_day(moves, day, &mut results);
        results.push('\n');
    }
    results
}

/// Append one day's results, without the trailing newline.
pub fn encode_day(moves: &MoveMatrix, day: usize, out: &mut String) {
    let num_divisions = moves.num_divisions();
    let mut sandwich_success = false;

    for division in (0..num_divisions).rev() {
        let results = moves.division(day, division);

        if sandwich_success {
            out.push('u');
            sandwich_success = false;
        } else if division + 1 < num_divisions {
            out.push('r');
        }

        encode_division(results, day, division, out);

        if head_crew_went_up(results) {
            sandwich_success = true;
        }
        if division > 0 {
            out.push(' ');
        }
    }
}

fn encode_division(results: &[Movement], day: usize, division: usize, out: &mut String) {
    let mut slot = results.len();

    while slot > 0 {
        let crew = slot - 1;
        match results[crew] {
            0 => {
                out.push('r');
                slot -= 1;
            }
            // Head crew: its bump is written as the sandwich crew above.
            1 if crew == 0 => {
                out.push('r');
                slot -= 1;
            }
            1 => {
                out.push('u');
                slot -= 2;
            }
            // Bumped the head, then went up again as sandwich crew.
            2 if crew == 1 => {
                out.push('u');
                slot -= 2;
            }
            up if up >= 3 && crew >= up as usize => {
                let _ = write!(out, "o{up}");
                slot -= 1;
            }
            // Bumped crews are written by whoever caught them.
            down if down < 0 => {
                slot -= 1;
            }
            other => {
                log::warn!(
                    "day {} division {} slot {}: movement {other} has no notation, skipped",
                    day + 1, division + 1, crew + 1
                );
                slot -= 1;
            }
        }
    }
}

/// The division's head crew after racing moved up into the division above.
fn head_crew_went_up(results: &[Movement]) -> bool {
    results.first() == Some(&1) || results.get(1) == Some(&2)
}
