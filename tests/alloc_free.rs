//! Allocation-free tick path tests.
//!
//! These tests verify that a tick (step advance, generation, trigger
//! resolution and delivery) does not touch the heap once the session is
//! built. They run long enough to cover many generations under both rules.

use arrayvec::ArrayVec;
use assert_no_alloc::{assert_no_alloc, AllocDisabler};

#[cfg(debug_assertions)]
#[global_allocator]
static A: AllocDisabler = AllocDisabler;

use cs_clock::ManualClock;
use cs_engine::{Session, SessionConfig};
use cs_ir::{Algorithm, Direction, Timestamp, TriggerEvent, TRACKS};
use cs_master::Controller;

fn random_session(algorithm: Algorithm, direction: Direction) -> Session {
    let config = SessionConfig::default()
        .with_evolution_speed(4)
        .unwrap()
        .with_algorithm(algorithm)
        .with_direction(direction)
        .with_seed(11);
    let config = SessionConfig { randomize: true, ..config };
    let mut session = Session::new(&config);
    session.start();
    session
}

/// Tick a session `ticks` times, aborting on any heap allocation.
fn assert_ticks_alloc_free(mut session: Session, ticks: u64) {
    let mut sink = ArrayVec::<TriggerEvent, TRACKS>::new();
    assert_no_alloc(|| {
        for i in 0..ticks {
            sink.clear();
            session.tick(Timestamp::from_micros(i * 125_000), &mut sink);
        }
    });
}

#[test]
fn game_of_life_tick_alloc_free() {
    assert_ticks_alloc_free(random_session(Algorithm::GameOfLife, Direction::Forward), 4096);
}

#[test]
fn high_life_ping_pong_tick_alloc_free() {
    assert_ticks_alloc_free(random_session(Algorithm::HighLife, Direction::PingPong), 4096);
}

#[test]
fn frozen_and_soloed_tick_alloc_free() {
    let mut session = random_session(Algorithm::GameOfLife, Direction::Reverse);
    session.toggle_freeze(0).unwrap();
    session.toggle_solo(2).unwrap();
    assert_ticks_alloc_free(session, 4096);
}

#[test]
fn controller_tick_alloc_free() {
    let config = SessionConfig { randomize: true, ..SessionConfig::default().with_seed(5) };
    let mut ctrl = Controller::new(ManualClock::default(), config);
    ctrl.start().unwrap();

    // Stay under the trigger queue capacity so nothing is dropped
    assert_no_alloc(|| {
        for _ in 0..64 {
            ctrl.clock_mut().fire();
        }
    });
    assert!(ctrl.snapshot().ticks == 64);
}
