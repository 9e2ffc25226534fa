//! Tabular results: one row per crew per day.
//!
//! Header: `Year,Club,Sex,Day,Crew,Start position,Position,Division`.
//! Day, positions and division are 1-based. `Position` is where the crew
//! stood after that day's racing.

use crate::{
    builder,
    config::ConvertConfig,
    error::BumpsResult,
    event::Event,
    replay,
    types::Year,
};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

pub const FLAT_HEADER: [&str; 8] = [
    "Year", "Club", "Sex", "Day", "Crew", "Start position", "Position", "Division",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    #[serde(rename = "Year")]
    pub year:           Year,
    #[serde(rename = "Club")]
    pub club:           String,
    #[serde(rename = "Sex")]
    pub sex:            String,
    #[serde(rename = "Day")]
    pub day:            usize,
    #[serde(rename = "Crew")]
    pub crew:           String,
    #[serde(rename = "Start position")]
    pub start_position: usize,
    #[serde(rename = "Position")]
    pub position:       usize,
    #[serde(rename = "Division")]
    pub division:       usize,
}

impl FlatRecord {
    /// Crew name as used in notation Division lines.
    pub fn crew_name(&self) -> String {
        format!("{} {}", self.club, self.crew)
    }
}

/// Parse every row. A missing column or unparsable value is an error.
pub fn read_records<R: Read>(reader: R) -> BumpsResult<Vec<FlatRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Write the header followed by `records`.
pub fn write_records<W: Write>(writer: W, records: &[FlatRecord]) -> BumpsResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(FLAT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read tabular results into one event per (Year, Sex).
pub fn read_flat<R: Read>(reader: R, config: &ConvertConfig) -> BumpsResult<Vec<Event>> {
    let records = read_records(reader)?;
    builder::build_events(&records, config)
}

/// Write every event back out as tabular rows.
pub fn write_flat<W: Write>(writer: W, events: &[Event]) -> BumpsResult<()> {
    let mut records = Vec::new();
    for event in events {
        records.extend(flat_records(event)?);
    }
    write_records(writer, &records)
}

/// Rows for one event: each crew's trail, one row per raced day.
/// Vacant starting slots produce no rows.
pub fn flat_records(event: &Event) -> BumpsResult<Vec<FlatRecord>> {
    let mut records = Vec::new();

    for (division, names) in event.divisions.iter().enumerate() {
        for (slot, name) in names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }

            let (club, crew) = split_crew_name(name);
            let trail = replay::position_trail(event, division, slot)?;
            let start_position = trail[0].pos;

            records.extend(trail[1..].iter().map(|point| FlatRecord {
                year: event.year,
                club: club.to_string(),
                sex: event.gender.clone(),
                day: point.day,
                crew: crew.to_string(),
                start_position,
                position: point.pos,
                division: division + 1,
            }));
        }
    }

    Ok(records)
}

/// `"St Catharine's 2"` → `("St Catharine's", "2")`.
fn split_crew_name(name: &str) -> (&str, &str) {
    name.rsplit_once(' ').unwrap_or(("", name))
}
