//! Movement matrix builder: tabular records to events.
//!
//! Records are grouped by (Year, Sex) in order of first appearance. For
//! each group the Day 1 rows fix the starting order and division sizes;
//! each crew's run of daily positions then becomes one movement per day:
//!   day 1:  start position − position after day 1
//!   day k:  position after day k−1 − position after day k
//! written at the (division, slot) the crew raced from that day.

use crate::{
    config::ConvertConfig,
    division_index::DivisionIndex,
    encoder,
    error::{BumpsError, BumpsResult},
    event::Event,
    flat::FlatRecord,
    types::{CrewName, Movement, Year},
};
use std::collections::BTreeMap;

/// Build one event per (Year, Sex) group found in `records`.
pub fn build_events(records: &[FlatRecord], config: &ConvertConfig) -> BumpsResult<Vec<Event>> {
    let mut years: Vec<Year> = Vec::new();
    let mut sexes: Vec<&str> = Vec::new();
    for record in records {
        if !years.contains(&record.year) {
            years.push(record.year);
        }
        if !sexes.contains(&record.sex.as_str()) {
            sexes.push(&record.sex);
        }
    }

    let mut events = Vec::new();
    for &year in &years {
        for &sex in &sexes {
            let group: Vec<&FlatRecord> = records
                .iter()
                .filter(|r| r.year == year && r.sex == sex)
                .collect();
            if group.is_empty() {
                log::warn!("no rows for {sex} {year}, skipping");
                continue;
            }
            events.push(build_event(year, sex, &group, config)?);
        }
    }

    Ok(events)
}

/// Build a single event from all rows of one (Year, Sex) group.
pub fn build_event(
    year: Year,
    sex: &str,
    records: &[&FlatRecord],
    config: &ConvertConfig,
) -> BumpsResult<Event> {
    for record in records {
        if record.day == 0 {
            return Err(invalid("Day", record.day));
        }
        if record.start_position == 0 {
            return Err(invalid("Start position", record.start_position));
        }
        if record.position == 0 {
            return Err(invalid("Position", record.position));
        }
    }

    let mut first_day: Vec<&FlatRecord> = records.iter().copied().filter(|r| r.day == 1).collect();
    first_day.sort_by_key(|r| r.start_position);

    let mut day_numbers: Vec<usize> = records.iter().map(|r| r.day).collect();
    day_numbers.sort_unstable();
    day_numbers.dedup();
    let days = day_numbers.len();

    // Each crew's rows keyed by name, ordered by day. Only the Day 1 start
    // position is trusted; later rows may restate it as the day's start.
    let mut by_crew: BTreeMap<CrewName, Vec<&FlatRecord>> = BTreeMap::new();
    for &record in records {
        by_crew.entry(record.crew_name()).or_default().push(record);
    }
    for rows in by_crew.values_mut() {
        rows.sort_by_key(|r| r.day);
    }

    let index = DivisionIndex::new(division_sizes(&first_day)?);
    let total = index.total_crews();

    let mut divisions: Vec<Vec<CrewName>> = index
        .sizes()
        .iter()
        .map(|&n| vec![CrewName::new(); n])
        .collect();
    for record in &first_day {
        let division = record.division - 1;
        let slot = (record.start_position - 1)
            .checked_sub(index.start(division))
            .filter(|&slot| slot < index.size(division))
            .ok_or(BumpsError::PositionOutOfRange { position: record.start_position, total })?;
        divisions[division][slot] = record.crew_name();
    }

    let mut event = Event::new(config.set_name.clone(), config.short_name.clone(), sex, year, days, divisions);
    let mut finish = event.finish.clone();

    for record in &first_day {
        let name = record.crew_name();
        let rows = by_crew.get(&name).map(Vec::as_slice).unwrap_or_default();
        let expected_days: Vec<usize> = (1..=days).collect();
        let found_days: Vec<usize> = rows.iter().map(|r| r.day).collect();
        if found_days != expected_days {
            return Err(BumpsError::StructuralMismatch { expected: days, found: rows.len() });
        }

        let mut previous = record.start_position;
        for (day, row) in rows.iter().enumerate() {
            let (division, slot) = locate(&index, previous)?;
            event.moves.set(day, division, slot, previous as Movement - row.position as Movement);
            previous = row.position;
        }

        let (division, slot) = locate(&index, previous)?;
        finish[division][slot] = name;
    }

    event.finish = finish;
    event.results = encoder::encode(&event.moves);
    event.mark_all_completed();

    log::debug!("built {sex} {year}: {total} crews, {days} days");
    Ok(event)
}

/// Division sizes from the starting order.
///
/// A division spans at least as many slots as it has crews and reaches
/// down to its deepest start position, so start positions always land
/// inside their own division.
fn division_sizes(first_day: &[&FlatRecord]) -> BumpsResult<Vec<usize>> {
    let mut numbers: Vec<usize> = first_day.iter().map(|r| r.division).collect();
    numbers.sort_unstable();
    numbers.dedup();

    let num_divisions = numbers.len();
    if let Some(bad) = numbers.iter().find(|&&n| n == 0 || n > num_divisions) {
        return Err(invalid("Division", *bad));
    }

    let mut sizes = Vec::with_capacity(num_divisions);
    let mut covered = 0;
    for division in 1..=num_divisions {
        let members = first_day.iter().filter(|r| r.division == division);
        let count = members.clone().count();
        let deepest = members.map(|r| r.start_position).max().unwrap_or(covered);
        let size = count.max(deepest.saturating_sub(covered));
        sizes.push(size);
        covered += size;
    }

    Ok(sizes)
}

/// 1-based position to (division, slot).
fn locate(index: &DivisionIndex, position: usize) -> BumpsResult<(usize, usize)> {
    index
        .locate(position - 1)
        .ok_or(BumpsError::PositionOutOfRange { position, total: index.total_crews() })
}

fn invalid(field: &'static str, value: usize) -> BumpsError {
    BumpsError::InvalidField { field, value: value.to_string() }
}
