//! Property-based tests for the sequencing core.
//!
//! Generations, step movement and trigger resolution must hold their
//! invariants for every grid and flag combination, not just the hand-picked
//! patterns in the unit tests.

use cs_engine::{eligible_tracks, evolve, next_step, Session, SessionConfig};
use cs_ir::{Algorithm, Direction, Grid, Heading, Timestamp, TriggerEvent, STEPS, TRACKS};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::array::uniform8(prop::array::uniform32(any::<bool>())).prop_map(Grid::from_cells)
}

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::GameOfLife), Just(Algorithm::HighLife)]
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Forward), Just(Direction::Reverse), Just(Direction::PingPong)]
}

fn arb_mask() -> impl Strategy<Value = [bool; TRACKS]> {
    prop::array::uniform8(any::<bool>())
}

// =============================================================================
// Evolution
// =============================================================================

proptest! {
    /// Same input, same output.
    #[test]
    fn prop_evolve_deterministic(
        grid in arb_grid(),
        algorithm in arb_algorithm(),
        frozen in arb_mask(),
    ) {
        prop_assert_eq!(evolve(&grid, algorithm, &frozen), evolve(&grid, algorithm, &frozen));
    }

    /// Frozen rows come through a generation bit-for-bit.
    #[test]
    fn prop_frozen_rows_unchanged(
        grid in arb_grid(),
        algorithm in arb_algorithm(),
        frozen in arb_mask(),
    ) {
        let next = evolve(&grid, algorithm, &frozen);
        for t in (0..TRACKS).filter(|&t| frozen[t]) {
            prop_assert_eq!(next.row(t), grid.row(t), "frozen track {} changed", t);
        }
    }

    /// Rolling the grid around the torus commutes with evolution.
    #[test]
    fn prop_evolve_translation_invariant(
        grid in arb_grid(),
        algorithm in arb_algorithm(),
        dt in 0..TRACKS,
        ds in 0..STEPS,
    ) {
        let shift = |g: &Grid| {
            Grid::from_cells(core::array::from_fn(|t| {
                core::array::from_fn(|s| {
                    g.cell((t + TRACKS - dt) % TRACKS, (s + STEPS - ds) % STEPS)
                })
            }))
        };
        let none = [false; TRACKS];
        prop_assert_eq!(
            evolve(&shift(&grid), algorithm, &none),
            shift(&evolve(&grid, algorithm, &none))
        );
    }

    /// A fully frozen grid never changes.
    #[test]
    fn prop_all_frozen_is_identity(grid in arb_grid(), algorithm in arb_algorithm()) {
        prop_assert_eq!(evolve(&grid, algorithm, &[true; TRACKS]), grid);
    }
}

// =============================================================================
// Step clock and triggers
// =============================================================================

proptest! {
    /// The next column is always in range.
    #[test]
    fn prop_next_step_in_range(
        step in 0..STEPS,
        direction in arb_direction(),
        reverse in any::<bool>(),
    ) {
        let heading = if reverse { Heading::Reverse } else { Heading::Forward };
        let (next, _) = next_step(step, direction, heading);
        prop_assert!(next < STEPS);
    }

    /// Forward then reverse returns to the starting column.
    #[test]
    fn prop_forward_reverse_inverse(step in 0..STEPS) {
        let (fwd, h) = next_step(step, Direction::Forward, Heading::Forward);
        let (back, _) = next_step(fwd, Direction::Reverse, h);
        prop_assert_eq!(back, step);
    }

    /// With no solos, eligibility is exactly "not muted"; with any solo,
    /// exactly the soloed set.
    #[test]
    fn prop_solo_overrides_mute(mutes in arb_mask(), solos in arb_mask()) {
        let eligible = eligible_tracks(&mutes, &solos);
        let expected: [bool; TRACKS] =
            if solos.iter().any(|&s| s) { solos } else { mutes.map(|m| !m) };
        prop_assert_eq!(eligible, expected);
    }
}

// =============================================================================
// Session
// =============================================================================

proptest! {
    /// Two sessions fed the same config and tick count agree exactly.
    #[test]
    fn prop_session_replay_deterministic(
        grid in arb_grid(),
        algorithm in arb_algorithm(),
        direction in arb_direction(),
        speed_index in 1u32..=16,
        ticks in 0usize..200,
    ) {
        let config = SessionConfig::default()
            .with_grid(grid)
            .with_algorithm(algorithm)
            .with_direction(direction)
            .with_evolution_speed(speed_index * 4)
            .unwrap();

        let run = || {
            let mut session = Session::new(&config);
            session.start();
            let mut events: Vec<TriggerEvent> = Vec::new();
            for i in 0..ticks {
                session.tick(Timestamp::from_micros(i as u64), &mut events);
            }
            (session.snapshot(), events)
        };

        prop_assert_eq!(run(), run());
    }

    /// Every emitted event names a live cell at the current column.
    #[test]
    fn prop_triggers_match_column(grid in arb_grid(), mutes in arb_mask(), ticks in 1usize..40) {
        let mut config = SessionConfig::default().with_grid(grid);
        config.flags.mute = mutes;
        let mut session = Session::new(&config);
        session.start();

        for i in 0..ticks {
            let mut events: Vec<TriggerEvent> = Vec::new();
            let outcome = session.tick(Timestamp::from_micros(i as u64), &mut events).unwrap();
            prop_assert_eq!(outcome.triggered, events.len());
            for event in &events {
                let t = event.track_index();
                prop_assert!(!mutes[t]);
                prop_assert!(session.grid().cell(t, outcome.step));
            }
        }
    }
}
