//! Playback column state machine.

use cs_ir::{check_step, Direction, Heading, SeqError, STEPS};

/// Compute the column after `step` under `direction`.
///
/// Returns the new column and the ping-pong heading to carry forward. The
/// heading only changes while ping-ponging; other directions pass it through.
pub const fn next_step(step: usize, direction: Direction, heading: Heading) -> (usize, Heading) {
    match direction {
        Direction::Forward => ((step + 1) % STEPS, heading),
        Direction::Reverse => ((step + STEPS - 1) % STEPS, heading),
        Direction::PingPong => match heading {
            Heading::Forward if step >= STEPS - 1 => (STEPS - 2, Heading::Reverse),
            Heading::Forward => (step + 1, Heading::Forward),
            Heading::Reverse if step == 0 => (1, Heading::Forward),
            Heading::Reverse => (step - 1, Heading::Reverse),
        },
    }
}

/// Current playback column plus direction policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepClock {
    step: usize,
    direction: Direction,
    heading: Heading,
}

impl StepClock {
    pub const fn new(direction: Direction) -> Self {
        Self { step: 0, direction, heading: Heading::Forward }
    }

    pub const fn step(&self) -> usize {
        self.step
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Ping-pong heading, retained while another direction is selected.
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    /// Change direction; takes effect on the next advance.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Jump to a column without changing direction or heading.
    pub fn seek(&mut self, step: usize) -> Result<(), SeqError> {
        check_step(step)?;
        self.step = step;
        Ok(())
    }

    /// Move to the next column and return it.
    pub fn advance(&mut self) -> usize {
        let (step, heading) = next_step(self.step, self.direction, self.heading);
        self.step = step;
        self.heading = heading;
        step
    }
}
