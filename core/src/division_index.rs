//! Division index: absolute race positions to (division, slot) and back.
//!
//! RULE: every division-boundary crossing goes through normalize().
//! The builder, the decoder and replay all renormalize with it, so a crew
//! that bumps out of (or is bumped out of) a division lands in the same
//! place whichever path computed the move.

/// Prefix-summed view of the division sizes of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionIndex {
    sizes:  Vec<usize>,
    /// `breaks[d]` = total crews in divisions `0..=d`.
    breaks: Vec<usize>,
}

impl DivisionIndex {
    pub fn new(sizes: Vec<usize>) -> Self {
        let breaks = sizes
            .iter()
            .scan(0usize, |acc, &size| {
                *acc += size;
                Some(*acc)
            })
            .collect();
        Self { sizes, breaks }
    }

    /// Index over the sizes of already-populated divisions.
    pub fn from_divisions<T>(divisions: &[Vec<T>]) -> Self {
        Self::new(divisions.iter().map(Vec::len).collect())
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn breaks(&self) -> &[usize] {
        &self.breaks
    }

    pub fn num_divisions(&self) -> usize {
        self.sizes.len()
    }

    pub fn size(&self, division: usize) -> usize {
        self.sizes[division]
    }

    pub fn total_crews(&self) -> usize {
        self.breaks.last().copied().unwrap_or(0)
    }

    /// Zero-based absolute position of the head of `division`.
    pub fn start(&self, division: usize) -> usize {
        self.breaks[division] - self.sizes[division]
    }

    /// Smallest division whose break lies beyond `position`.
    pub fn division_of(&self, position: usize) -> Option<usize> {
        self.breaks.iter().position(|&b| position < b)
    }

    /// Subtracts preceding division sizes until `position` falls in range.
    /// Positions past the last division keep whatever remains.
    pub fn slot_in_division(&self, position: usize) -> usize {
        let mut position = position;
        for &size in &self.sizes {
            if position < size {
                break;
            }
            position -= size;
        }
        position
    }

    /// Both halves of the mapping at once; `None` past the bottom of the field.
    pub fn locate(&self, position: usize) -> Option<(usize, usize)> {
        let division = self.division_of(position)?;
        Some((division, position - self.start(division)))
    }

    /// Zero-based absolute position of `(division, slot)`.
    pub fn absolute(&self, division: usize, slot: usize) -> usize {
        self.start(division) + slot
    }

    /// Bring a slot that has run off either end of its division back into
    /// range by borrowing from the division above or lending to the one below.
    ///
    /// Returns `None` when the crew would leave the field entirely.
    pub fn normalize(&self, division: usize, slot: isize) -> Option<(usize, usize)> {
        let mut division = division;
        let mut slot = slot;

        while slot < 0 {
            division = division.checked_sub(1)?;
            slot += *self.sizes.get(division)? as isize;
        }

        loop {
            let size = *self.sizes.get(division)? as isize;
            if slot < size {
                break;
            }
            slot -= size;
            division += 1;
        }

        Some((division, slot as usize))
    }
}
