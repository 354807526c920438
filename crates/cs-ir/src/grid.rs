//! Toroidal cell grid: one row per track, one column per step.

use core::fmt;
use rand::Rng;

use crate::error::{Axis, SeqError};

/// Number of tracks (grid rows).
pub const TRACKS: usize = 8;
/// Number of steps (grid columns).
pub const STEPS: usize = 32;
/// A randomized cell is alive when its uniform draw exceeds this value.
pub const RANDOM_DENSITY_THRESHOLD: f64 = 0.7;

/// Fail with `InvalidIndex` unless `track < TRACKS`.
pub fn check_track(track: usize) -> Result<(), SeqError> {
    if track < TRACKS {
        Ok(())
    } else {
        Err(SeqError::InvalidIndex { axis: Axis::Track, index: track, bound: TRACKS })
    }
}

/// Fail with `InvalidIndex` unless `step < STEPS`.
pub fn check_step(step: usize) -> Result<(), SeqError> {
    if step < STEPS {
        Ok(())
    } else {
        Err(SeqError::InvalidIndex { axis: Axis::Step, index: step, bound: STEPS })
    }
}

/// The sequencer pattern.
///
/// A grid is a plain `Copy` value. Every mutation returns a new grid that
/// the owner swaps in wholesale, so a reader never sees a half-applied edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [[bool; STEPS]; TRACKS],
}

impl Grid {
    /// A grid with every cell dead.
    pub const fn empty() -> Self {
        Self { cells: [[false; STEPS]; TRACKS] }
    }

    /// Wrap a fixed-size cell array.
    pub const fn from_cells(cells: [[bool; STEPS]; TRACKS]) -> Self {
        Self { cells }
    }

    /// Build a grid from dynamically sized rows, rejecting anything but 8x32.
    pub fn try_from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, SeqError> {
        let bad_row = rows.iter().find(|r| r.as_ref().len() != STEPS);
        if rows.len() != TRACKS || bad_row.is_some() {
            let cols = bad_row
                .or(rows.first())
                .map_or(0, |r| r.as_ref().len());
            return Err(SeqError::InvalidGridShape { rows: rows.len(), cols });
        }

        let mut cells = [[false; STEPS]; TRACKS];
        for (dst, src) in cells.iter_mut().zip(rows) {
            dst.copy_from_slice(src.as_ref());
        }
        Ok(Self { cells })
    }

    /// Parse text rows of `#` (alive) and `.` (dead).
    pub fn from_rows(rows: &[&str]) -> Result<Self, SeqError> {
        let bad_row = rows.iter().find(|r| r.chars().count() != STEPS);
        if rows.len() != TRACKS || bad_row.is_some() {
            let cols = bad_row
                .or(rows.first())
                .map_or(0, |r| r.chars().count());
            return Err(SeqError::InvalidGridShape { rows: rows.len(), cols });
        }

        let mut cells = [[false; STEPS]; TRACKS];
        for (dst, text) in cells.iter_mut().zip(rows) {
            for (cell, ch) in dst.iter_mut().zip(text.chars()) {
                *cell = match ch {
                    '#' => true,
                    '.' => false,
                    other => return Err(SeqError::InvalidPattern(other)),
                };
            }
        }
        Ok(Self { cells })
    }

    /// A fresh grid where each cell is independently alive with probability 0.3.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cells = [[false; STEPS]; TRACKS];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = rng.random::<f64>() > RANDOM_DENSITY_THRESHOLD;
            }
        }
        Self { cells }
    }

    /// A copy of this grid with one cell flipped.
    pub fn toggle(&self, track: usize, step: usize) -> Result<Self, SeqError> {
        check_track(track)?;
        check_step(step)?;
        let mut next = *self;
        next.cells[track][step] = !next.cells[track][step];
        Ok(next)
    }

    /// Get a cell. Panics if out of range.
    pub fn cell(&self, track: usize, step: usize) -> bool {
        debug_assert!(track < TRACKS);
        debug_assert!(step < STEPS);
        self.cells[track][step]
    }

    /// Get a cell, or `None` if out of range.
    pub fn get(&self, track: usize, step: usize) -> Option<bool> {
        self.cells.get(track)?.get(step).copied()
    }

    /// One track's row of steps.
    pub fn row(&self, track: usize) -> &[bool; STEPS] {
        &self.cells[track]
    }

    pub fn cells(&self) -> &[[bool; STEPS]; TRACKS] {
        &self.cells
    }

    /// Number of alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &cell in row {
                f.write_str(if cell { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
