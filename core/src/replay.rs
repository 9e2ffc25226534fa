//! Replay: walk a crew through the movement matrix.
//!
//! Produces per-crew position trails for charting and the blades/spoons
//! flags. The same single-day step (advance) is used by the decoder to
//! derive the finishing order.

use crate::{
    division_index::DivisionIndex,
    error::{BumpsError, BumpsResult},
    event::Event,
    movement::MoveMatrix,
    types::{CrewName, Year},
};
use serde::{Deserialize, Serialize};

/// One point of a crew's trail: 1-based absolute position after `day` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub day: usize,
    pub pos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewTrail {
    pub name:   CrewName,
    pub values: Vec<TrailPoint>,
    pub blades: bool,
    pub spoons: bool,
}

/// 1-based absolute start and crew count of a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionSpan {
    pub start:  usize,
    pub length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceChart {
    pub year:      Year,
    pub crews:     Vec<CrewTrail>,
    pub divisions: Vec<DivisionSpan>,
}

/// Apply one day's movement to the crew sitting at `(division, slot)`.
pub fn advance(
    index: &DivisionIndex,
    moves: &MoveMatrix,
    day: usize,
    division: usize,
    slot: usize,
) -> BumpsResult<(usize, usize)> {
    let movement = moves.get(day, division, slot);
    index
        .normalize(division, slot as isize - movement as isize)
        .ok_or(BumpsError::CrewLeftField { day, division, slot, movement })
}

/// Trail of the crew that starts at `(division, slot)`.
///
/// Starts with the day-0 point and stops at the first day on which the
/// crew's current division has not raced, so partial results chart up
/// to the last known day.
pub fn position_trail(event: &Event, division: usize, slot: usize) -> BumpsResult<Vec<TrailPoint>> {
    let index = event.index();
    let (mut d, mut c) = (division, slot);
    let mut values = vec![TrailPoint { day: 0, pos: index.absolute(d, c) + 1 }];

    for day in 0..event.days {
        if !event.completed[day][d] {
            break;
        }
        (d, c) = advance(&index, &event.moves, day, d, c)?;
        values.push(TrailPoint { day: day + 1, pos: index.absolute(d, c) + 1 });
    }

    Ok(values)
}

/// Trails for every crew plus the division layout.
pub fn chart(event: &Event) -> BumpsResult<RaceChart> {
    if event.days != event.completed.len() {
        return Err(BumpsError::StructuralMismatch {
            expected: event.days,
            found:    event.completed.len(),
        });
    }

    let index = event.index();
    let bottom = index.total_crews();
    let mut crews = Vec::with_capacity(bottom);
    let mut divisions = Vec::with_capacity(index.num_divisions());

    for (division, names) in event.divisions.iter().enumerate() {
        divisions.push(DivisionSpan {
            start:  index.start(division) + 1,
            length: names.len(),
        });

        for (slot, name) in names.iter().enumerate() {
            let values = position_trail(event, division, slot)?;
            let positions: Vec<usize> = values.iter().map(|v| v.pos).collect();
            crews.push(CrewTrail {
                name:   name.clone(),
                blades: is_blades(&positions),
                spoons: is_spoons(&positions, bottom),
                values,
            });
        }
    }

    Ok(RaceChart { year: event.year, crews, divisions })
}

/// Gained a place every day, or held the headship.
pub fn is_blades(positions: &[usize]) -> bool {
    positions
        .windows(2)
        .all(|w| w[1] < w[0] || w[1] == 1)
}

/// Lost a place every day, or stayed at the bottom of the field.
pub fn is_spoons(positions: &[usize], bottom_position: usize) -> bool {
    positions
        .windows(2)
        .all(|w| w[1] > w[0] || w[1] == bottom_position)
}
