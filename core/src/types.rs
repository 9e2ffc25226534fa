//! Shared primitive types used across the whole converter.

/// A crew name as written in a Division line, e.g. `"Jesus 1"`.
pub type CrewName = String;

/// A signed movement for one crew on one day.
/// Positive = places gained, negative = places lost, zero = row-over.
pub type Movement = i32;

/// Racing year of an event.
pub type Year = i32;
