//! Cellular-automaton generations over the toroidal grid.
//!
//! Reads always come from the input grid and writes go to a separate
//! output grid, so a cell never sees a neighbor that was already updated
//! in the same generation. Frozen rows are copied through unchanged but
//! still count as neighbors for the rows around them.

use cs_ir::{Algorithm, Axis, Grid, SeqError, STEPS, TRACKS};

/// Birth and survival conditions as neighbor-count bitmasks (bit n = n neighbors).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    birth: u16,
    survive: u16,
}

impl Rule {
    pub const fn new(birth: &[u8], survive: &[u8]) -> Self {
        Self { birth: mask(birth), survive: mask(survive) }
    }

    /// Next value of a cell given its current value and live neighbor count.
    pub const fn next_state(self, alive: bool, neighbors: u8) -> bool {
        let bit = 1u16 << neighbors;
        if alive {
            self.survive & bit != 0
        } else {
            self.birth & bit != 0
        }
    }
}

const fn mask(counts: &[u8]) -> u16 {
    let mut m = 0u16;
    let mut i = 0;
    while i < counts.len() {
        m |= 1 << counts[i];
        i += 1;
    }
    m
}

impl From<Algorithm> for Rule {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::GameOfLife => Rule::new(&[3], &[2, 3]),
            Algorithm::HighLife => Rule::new(&[3, 6], &[2, 3]),
        }
    }
}

/// Count live cells among the 8 wrapped neighbors of (track, step).
pub fn live_neighbors(grid: &Grid, track: usize, step: usize) -> u8 {
    let mut count = 0;
    for dr in [TRACKS - 1, 0, 1] {
        for dc in [STEPS - 1, 0, 1] {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = (track + dr) % TRACKS;
            let c = (step + dc) % STEPS;
            if grid.cell(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// Compute the next generation. Rows with `frozen[track]` set are copied unchanged.
pub fn evolve(grid: &Grid, algorithm: Algorithm, frozen: &[bool; TRACKS]) -> Grid {
    let rule = Rule::from(algorithm);
    let mut next = [[false; STEPS]; TRACKS];

    for (track, row) in next.iter_mut().enumerate() {
        if frozen[track] {
            *row = *grid.row(track);
            continue;
        }
        for (step, cell) in row.iter_mut().enumerate() {
            let n = live_neighbors(grid, track, step);
            *cell = rule.next_state(grid.cell(track, step), n);
        }
    }

    Grid::from_cells(next)
}

/// Evolve dynamically shaped input, validating everything before computing.
///
/// The rule name is parsed first, then the grid shape is checked. Freeze
/// entries missing from a short mask count as unfrozen.
pub fn evolve_rows<R: AsRef<[bool]>>(
    rows: &[R],
    algorithm: &str,
    frozen: &[bool],
) -> Result<Grid, SeqError> {
    let algorithm: Algorithm = algorithm.parse()?;
    let grid = Grid::try_from_rows(rows)?;
    if frozen.len() > TRACKS {
        return Err(SeqError::InvalidIndex {
            axis: Axis::Track,
            index: frozen.len() - 1,
            bound: TRACKS,
        });
    }

    let mut mask = [false; TRACKS];
    mask[..frozen.len()].copy_from_slice(frozen);
    Ok(evolve(&grid, algorithm, &mask))
}
