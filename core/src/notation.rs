//! Notation documents: header, starting order and results text.
//!
//! ```text
//! Set,Town Bumps
//! Short,Town
//! Gender,M
//! Year,2020
//! Days,3                  (only when not DEFAULT_DAYS)
//!
//! Division,Crew A,Crew B,Crew C
//! Division,Crew D,Crew E
//!
//! Results
//! rur ur
//! ...
//! ```
//!
//! Lines starting with `#` inside a Division or Results block are
//! comments. Commas inside the Results block separate fragments, and a
//! fragment starting with `#` is a comment too.

use crate::{
    decoder::{self, DecodeOptions},
    error::{BumpsError, BumpsResult},
    event::Event,
    types::{CrewName, Year},
};
use std::fmt::Write;

pub const DEFAULT_DAYS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Header,
    Division,
    Results,
}

/// Parse a notation document and decode its results.
pub fn read_notation(input: &str, options: DecodeOptions) -> BumpsResult<Event> {
    let mut set = "Set".to_string();
    let mut short = "Short".to_string();
    let mut gender = "Gender".to_string();
    let mut year: Year = 1970;
    let mut days = DEFAULT_DAYS;

    let mut divisions: Vec<Vec<CrewName>> = Vec::new();
    let mut current: Vec<CrewName> = Vec::new();
    let mut fragments: Vec<String> = Vec::new();
    let mut block = Block::Header;

    for line in input.lines() {
        let fields: Vec<&str> = line.split(',').collect();
        let value = fields.get(1).copied().unwrap_or_default();

        match fields[0] {
            "Set" => set = value.to_string(),
            "Short" => short = value.to_string(),
            "Gender" => gender = value.to_string(),
            "Year" => year = parse_field("Year", value)?,
            "Days" => days = parse_field("Days", value)?,
            "Division" => {
                block = Block::Division;
                flush_division(&mut divisions, &mut current);
                add_crews(&mut current, &fields[1..]);
            }
            "Results" => {
                block = Block::Results;
                flush_division(&mut divisions, &mut current);
                add_fragments(&mut fragments, &fields[1..]);
            }
            _ if line.trim_start().starts_with('#') => {}
            _ => match block {
                Block::Header => {}
                Block::Division => add_crews(&mut current, &fields),
                Block::Results => add_fragments(&mut fragments, &fields),
            },
        }
    }
    flush_division(&mut divisions, &mut current);

    let mut event = Event::new(set, short, gender, year, days, divisions);
    event.results = fragments.join("\n");
    decoder::apply_results(&mut event, options)?;
    Ok(event)
}

/// Serialize the header, starting order and results text verbatim.
///
/// Fails with VacantSlot when the starting order has gaps, as built from
/// tabular rows whose start positions skip places.
pub fn write_notation(event: &Event) -> BumpsResult<String> {
    if let Some((division, slot)) = first_vacancy(&event.divisions) {
        return Err(BumpsError::VacantSlot { division, slot });
    }

    let mut out = String::new();

    let _ = writeln!(out, "Set,{}", event.set);
    let _ = writeln!(out, "Short,{}", event.short);
    let _ = writeln!(out, "Gender,{}", event.gender);
    let _ = writeln!(out, "Year,{}", event.year);
    if event.days != DEFAULT_DAYS {
        let _ = writeln!(out, "Days,{}", event.days);
    }
    out.push('\n');

    for division in &event.divisions {
        out.push_str("Division");
        for crew in division {
            out.push(',');
            out.push_str(crew);
        }
        out.push('\n');
    }

    out.push_str("\nResults\n");
    out.push_str(&event.results);
    Ok(out)
}

fn first_vacancy(divisions: &[Vec<CrewName>]) -> Option<(usize, usize)> {
    divisions.iter().enumerate().find_map(|(division, names)| {
        names.iter().position(String::is_empty).map(|slot| (division, slot))
    })
}

fn flush_division(divisions: &mut Vec<Vec<CrewName>>, current: &mut Vec<CrewName>) {
    if !current.is_empty() {
        divisions.push(std::mem::take(current));
    }
}

fn add_crews(current: &mut Vec<CrewName>, fields: &[&str]) {
    current.extend(fields.iter().filter(|f| !f.is_empty()).map(|f| f.to_string()));
}

fn add_fragments(fragments: &mut Vec<String>, fields: &[&str]) {
    fragments.extend(
        fields
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty() && !f.starts_with('#'))
            .map(str::to_string),
    );
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> BumpsResult<T> {
    value.trim().parse().map_err(|_| BumpsError::InvalidField {
        field,
        value: value.to_string(),
    })
}
