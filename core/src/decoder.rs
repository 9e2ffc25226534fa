//! Notation decoder: token stream to movement matrix and finishing order.
//!
//! Traversal mirrors the encoder: each day starts with the bottom
//! division and works up; within a division tokens describe the crews
//! from the bottom slot upwards. Every division except the bottom one
//! has an extra slot below its last crew: the sandwich crew, i.e. the
//! head crew of the division below after that division has raced.
//!
//! RULE: nothing is committed to the Event until the whole stream has
//! decoded cleanly. Decoding works on a scratch matrix.

use crate::{
    division_index::DivisionIndex,
    error::{BumpsError, BumpsResult},
    event::Event,
    movement::MoveMatrix,
    replay,
    token::{self, Token},
    types::{CrewName, Movement},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Accept a stream that stops before the last scheduled race.
    pub allow_partial: bool,
}

/// Everything the decoder produces for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub moves:     MoveMatrix,
    pub completed: Vec<Vec<bool>>,
    pub finish:    Vec<Vec<CrewName>>,
}

/// Lex and decode `event.results`, then commit the outcome to the event.
pub fn apply_results(event: &mut Event, options: DecodeOptions) -> BumpsResult<()> {
    let tokens = token::tokenize(&event.results)?;
    let decoded = decode(&tokens, event.days, &event.divisions, options)?;

    event.moves = decoded.moves;
    event.completed = decoded.completed;
    event.finish = decoded.finish;

    log::debug!(
        "decoded {} {} {}: {} tokens over {} days",
        event.short, event.gender, event.year, tokens.len(), event.days
    );
    Ok(())
}

/// Decode `tokens` for an event with the given schedule and starting order.
pub fn decode(
    tokens: &[Token],
    days: usize,
    divisions: &[Vec<CrewName>],
    options: DecodeOptions,
) -> BumpsResult<Decoded> {
    let index = DivisionIndex::from_divisions(divisions);
    let mut decoder = Decoder::new(days, &index);

    for (i, token) in tokens.iter().enumerate() {
        decoder.step(*token, tokens.len() - i)?;
    }
    decoder.finish_stream(options)?;

    let finish = finishing_order(&index, &decoder.moves, divisions)?;
    Ok(Decoded {
        moves:     decoder.moves,
        completed: decoder.completed,
        finish,
    })
}

/// Replay every crew across all days to find where it finished.
pub fn finishing_order(
    index: &DivisionIndex,
    moves: &MoveMatrix,
    divisions: &[Vec<CrewName>],
) -> BumpsResult<Vec<Vec<CrewName>>> {
    let mut finish: Vec<Vec<CrewName>> = index
        .sizes()
        .iter()
        .map(|&n| vec![CrewName::new(); n])
        .collect();

    for (division, names) in divisions.iter().enumerate() {
        for (slot, name) in names.iter().enumerate() {
            let (mut d, mut c) = (division, slot);
            for day in 0..moves.days() {
                (d, c) = replay::advance(index, moves, day, d, c)?;
            }
            if !finish[d][c].is_empty() {
                log::warn!("finishing slot {}/{} claimed by both {} and {name}", d + 1, c + 1, finish[d][c]);
            }
            finish[d][c] = name.clone();
        }
    }

    Ok(finish)
}

struct Decoder<'a> {
    index:        &'a DivisionIndex,
    days:         usize,
    moves:        MoveMatrix,
    completed:    Vec<Vec<bool>>,
    /// Days entered so far; the current day is `days_started - 1`.
    days_started: usize,
    division:     usize,
    /// Slots still to race in the current division, counted from the top.
    /// The slot being raced is `remaining - 1`; a value of `size + 1`
    /// means the sandwich crew is up.
    remaining:    usize,
}

impl<'a> Decoder<'a> {
    fn new(days: usize, index: &'a DivisionIndex) -> Self {
        Self {
            index,
            days,
            moves:        MoveMatrix::new(days, index.sizes()),
            completed:    vec![vec![false; index.num_divisions()]; days],
            days_started: 0,
            division:     0,
            remaining:    0,
        }
    }

    fn day(&self) -> usize {
        self.days_started - 1
    }

    fn is_bottom(&self, division: usize) -> bool {
        division + 1 == self.index.num_divisions()
    }

    fn step(&mut self, token: Token, tokens_left: usize) -> BumpsResult<()> {
        self.skip_resolved();

        if self.remaining == 0 {
            if token == Token::Technical {
                return Ok(());
            }
            self.enter_next_division(tokens_left)?;
        }

        let day = self.day();
        self.completed[day][self.division] = true;

        match token {
            Token::RowOver => {
                self.remaining -= 1;
            }
            Token::BumpUp => {
                self.bump(1)?;
                self.remaining -= 2;
            }
            Token::Overbump(up) => {
                self.bump(up)?;
                self.remaining -= 1;
            }
            Token::ExactMove(value) => {
                self.exact_move(value)?;
                self.remaining -= 1;
            }
            Token::Technical => {
                self.remaining = 0;
            }
        }

        Ok(())
    }

    /// Crews already given a result (by a bump from below) race no further.
    fn skip_resolved(&mut self) {
        if self.days_started == 0 {
            return;
        }
        let size = self.index.size(self.division);
        let results = self.moves.division(self.day(), self.division);
        while self.remaining > 0 && self.remaining <= size && results[self.remaining - 1] != 0 {
            self.remaining -= 1;
        }
    }

    fn enter_next_division(&mut self, tokens_left: usize) -> BumpsResult<()> {
        if self.index.num_divisions() == 0 {
            return Err(BumpsError::ScheduleOverrun { remaining: tokens_left });
        }

        if self.days_started == 0 || self.division == 0 {
            if self.days_started == self.days {
                return Err(BumpsError::ScheduleOverrun { remaining: tokens_left });
            }
            self.days_started += 1;
            self.division = self.index.num_divisions();
        }

        self.division -= 1;
        self.remaining = self.index.size(self.division);
        if !self.is_bottom(self.division) {
            self.remaining += 1;
        }
        Ok(())
    }

    /// The crew in the current slot catches the crew `up` places ahead.
    /// All checks run before anything is written.
    fn bump(&mut self, up: usize) -> BumpsResult<()> {
        let day = self.day();
        let division = self.division;
        let slot = self.remaining - 1;

        if up > slot {
            return Err(BumpsError::OutOfRangeBump { day, division, slot, up });
        }
        let target = slot - up;
        let delta = up as Movement;

        if slot < self.index.size(division) {
            let results = self.moves.division_mut(day, division);
            if results[target] != 0 {
                return Err(BumpsError::DuplicateAssignment { day, division, slot: target });
            }
            results[target] = -delta;
            results[slot] = delta;
            return Ok(());
        }

        // Sandwich crew: the credit goes to whichever crew finished the
        // lower division's race at its head.
        let (upper, lower) = self.moves.division_pair_mut(day, division);
        if upper[target] != 0 {
            return Err(BumpsError::DuplicateAssignment { day, division, slot: target });
        }
        let head = lower
            .iter()
            .enumerate()
            .position(|(p, &m)| p as isize == m as isize)
            .ok_or(BumpsError::MissingSandwichCrew { day, division: division + 1 })?;

        upper[target] = -delta;
        lower[head] += delta;
        Ok(())
    }

    fn exact_move(&mut self, value: Movement) -> BumpsResult<()> {
        let day = self.day();
        let slot = self.remaining - 1;

        if slot < self.index.size(self.division) {
            self.moves.set(day, self.division, slot, value);
            return Ok(());
        }

        let lower = self.moves.division_mut(day, self.division + 1);
        lower[0] = lower[0].checked_add(value).ok_or_else(|| BumpsError::InvalidField {
            field: "Results",
            value: format!("e{value}"),
        })?;
        Ok(())
    }

    /// Called after the last token: check nothing scheduled is left unraced.
    fn finish_stream(&mut self, options: DecodeOptions) -> BumpsResult<()> {
        self.skip_resolved();

        let done = self.index.num_divisions() == 0
            || self.days == 0
            || (self.days_started == self.days && self.division == 0 && self.remaining == 0);

        if done || options.allow_partial {
            return Ok(());
        }

        Err(BumpsError::ExhaustedInput {
            day:      self.days_started.saturating_sub(1),
            division: if self.days_started == 0 {
                self.index.num_divisions() - 1
            } else {
                self.division
            },
        })
    }
}
