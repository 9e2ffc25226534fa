//! Movement matrix: one signed value per (day, division, slot).
//!
//! RULE: a matrix belongs to exactly one Event. It is filled by one
//! producer (the tabular builder or the notation decoder) and treated
//! as read-only by everything downstream.
//!
//! Storage is a single flat arena; each day holds the divisions back to
//! back. Writes that span a division boundary borrow both divisions at
//! once through division_pair_mut() instead of aliasing the arena.

use crate::types::Movement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveMatrix {
    days:    usize,
    sizes:   Vec<usize>,
    offsets: Vec<usize>,
    per_day: usize,
    cells:   Vec<Movement>,
}

impl MoveMatrix {
    /// All-zero matrix for `days` days of divisions with the given sizes.
    pub fn new(days: usize, sizes: &[usize]) -> Self {
        let mut offsets = Vec::with_capacity(sizes.len());
        let mut per_day = 0;
        for &size in sizes {
            offsets.push(per_day);
            per_day += size;
        }
        Self {
            days,
            sizes: sizes.to_vec(),
            offsets,
            per_day,
            cells: vec![0; days * per_day],
        }
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn num_divisions(&self) -> usize {
        self.sizes.len()
    }

    pub fn get(&self, day: usize, division: usize, slot: usize) -> Movement {
        self.division(day, division)[slot]
    }

    pub fn set(&mut self, day: usize, division: usize, slot: usize, value: Movement) {
        self.division_mut(day, division)[slot] = value;
    }

    pub fn division(&self, day: usize, division: usize) -> &[Movement] {
        let start = self.cell_start(day, division);
        &self.cells[start..start + self.sizes[division]]
    }

    pub fn division_mut(&mut self, day: usize, division: usize) -> &mut [Movement] {
        let start = self.cell_start(day, division);
        let end = start + self.sizes[division];
        &mut self.cells[start..end]
    }

    /// Mutable views of `upper` and the division directly below it on `day`.
    pub fn division_pair_mut(
        &mut self,
        day: usize,
        upper: usize,
    ) -> (&mut [Movement], &mut [Movement]) {
        let lower = upper + 1;
        let upper_start = self.cell_start(day, upper);
        let lower_start = self.cell_start(day, lower);
        let lower_end = lower_start + self.sizes[lower];

        let (head, tail) = self.cells[upper_start..lower_end].split_at_mut(lower_start - upper_start);
        (head, tail)
    }

    /// Net movement across the whole field on `day`; zero for any consistent day.
    pub fn day_total(&self, day: usize) -> i64 {
        let start = day * self.per_day;
        self.cells[start..start + self.per_day]
            .iter()
            .map(|&m| m as i64)
            .sum()
    }

    /// Nested `[day][division][slot]` copy, mostly for assertions and dumps.
    pub fn to_nested(&self) -> Vec<Vec<Vec<Movement>>> {
        (0..self.days)
            .map(|day| {
                (0..self.sizes.len())
                    .map(|division| self.division(day, division).to_vec())
                    .collect()
            })
            .collect()
    }

    fn cell_start(&self, day: usize, division: usize) -> usize {
        assert!(day < self.days, "day {day} out of range ({} days)", self.days);
        day * self.per_day + self.offsets[division]
    }
}
