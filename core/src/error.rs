use thiserror::Error;

/// Every failure a conversion can produce.
///
/// Day, division and slot fields are zero-based; the messages print them
/// one-based to match the way results are written down.
#[derive(Error, Debug)]
pub enum BumpsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tabular format error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Structural mismatch: expected {expected} days but found {found}")]
    StructuralMismatch { expected: usize, found: usize },

    #[error(
        "Duplicate assignment: day {}, division {}, slot {} already has a result",
        .day + 1, .division + 1, .slot + 1
    )]
    DuplicateAssignment { day: usize, division: usize, slot: usize },

    #[error(
        "Bump out of range: day {}, division {}, slot {} cannot move up {up}",
        .day + 1, .division + 1, .slot + 1
    )]
    OutOfRangeBump { day: usize, division: usize, slot: usize, up: usize },

    #[error("Results exhausted before racing finished: day {}, division {}", .day + 1, .division + 1)]
    ExhaustedInput { day: usize, division: usize },

    #[error("Ran out of days of racing with {remaining} results still to go")]
    ScheduleOverrun { remaining: usize },

    #[error("Malformed token '{text}' at line {line}, column {column}")]
    MalformedToken { line: usize, column: usize, text: String },

    #[error("No crew at the head of division {} on day {} to take a sandwich bump", .division + 1, .day + 1)]
    MissingSandwichCrew { day: usize, division: usize },

    #[error(
        "Crew at day {}, division {}, slot {} moves {movement} places and leaves the field",
        .day + 1, .division + 1, .slot + 1
    )]
    CrewLeftField { day: usize, division: usize, slot: usize, movement: i32 },

    #[error("Position {position} is outside a field of {total} crews")]
    PositionOutOfRange { position: usize, total: usize },

    #[error(
        "Division {}, slot {} has no crew; a sparse starting order has no notation",
        .division + 1, .slot + 1
    )]
    VacantSlot { division: usize, slot: usize },

    #[error("Invalid value '{value}' for {field}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type BumpsResult<T> = Result<T, BumpsError>;
