//! One bumps event: a (set, gender, year) of racing.
//!
//! RULE: dimensions are fixed at construction. Day count and division
//! sizes never change afterwards; only the movement matrix, completion
//! flags, finishing order and results text get filled in, and only by
//! the builder (tabular path) or the decoder (notation path).

use crate::{
    division_index::DivisionIndex,
    movement::MoveMatrix,
    types::{CrewName, Year},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub set:       String,
    pub short:     String,
    pub gender:    String,
    pub year:      Year,
    pub days:      usize,
    /// Starting order, top division first, head crew first.
    pub divisions: Vec<Vec<CrewName>>,
    /// `completed[day][division]`: racing for that day/division is known.
    pub completed: Vec<Vec<bool>>,
    pub moves:     MoveMatrix,
    /// Finishing order after the last day, same shape as `divisions`.
    pub finish:    Vec<Vec<CrewName>>,
    /// Results in run-length notation, one line per day.
    pub results:   String,
}

impl Event {
    pub fn new(
        set: impl Into<String>,
        short: impl Into<String>,
        gender: impl Into<String>,
        year: Year,
        days: usize,
        divisions: Vec<Vec<CrewName>>,
    ) -> Self {
        let sizes: Vec<usize> = divisions.iter().map(Vec::len).collect();
        Self {
            set:       set.into(),
            short:     short.into(),
            gender:    gender.into(),
            year,
            days,
            completed: vec![vec![false; sizes.len()]; days],
            moves:     MoveMatrix::new(days, &sizes),
            finish:    sizes.iter().map(|&n| vec![CrewName::new(); n]).collect(),
            results:   String::new(),
            divisions,
        }
    }

    pub fn index(&self) -> DivisionIndex {
        DivisionIndex::from_divisions(&self.divisions)
    }

    pub fn total_crews(&self) -> usize {
        self.divisions.iter().map(Vec::len).sum()
    }

    pub fn mark_all_completed(&mut self) {
        for day in &mut self.completed {
            day.iter_mut().for_each(|flag| *flag = true);
        }
    }

    /// True once every division has raced on every day.
    pub fn is_complete(&self) -> bool {
        self.completed.iter().flatten().all(|&flag| flag)
    }
}
