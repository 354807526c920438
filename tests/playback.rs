//! End-to-end playback scenarios through the controller.

use cs_clock::ManualClock;
use cs_master::{Algorithm, Controller, Direction, Grid, SessionConfig, TriggerEvent};

const GLIDER: [&str; 8] = [
    ".#..............................",
    "..#.............................",
    "###.............................",
    "................................",
    "................................",
    "................................",
    "................................",
    "................................",
];

fn offline(config: SessionConfig) -> Controller<ManualClock> {
    let mut ctrl = Controller::new(ManualClock::new(config.tempo), config);
    ctrl.start().unwrap();
    ctrl
}

fn run(ctrl: &mut Controller<ManualClock>, ticks: u64) -> Vec<TriggerEvent> {
    ctrl.clock_mut().advance(ticks);
    ctrl.poll_triggers()
}

#[test]
fn glider_returns_shifted_after_four_generations() {
    let glider = Grid::from_rows(&GLIDER).unwrap();
    let config = SessionConfig::default().with_grid(glider).with_evolution_speed(4).unwrap();
    let mut ctrl = offline(config);

    run(&mut ctrl, 16);
    let snap = ctrl.snapshot();
    assert_eq!(snap.generation, 4);

    let shifted = Grid::from_cells(core::array::from_fn(|t| {
        core::array::from_fn(|s| glider.cell((t + 7) % 8, (s + 31) % 32))
    }));
    assert_eq!(snap.grid, shifted);
}

#[test]
fn glider_wraps_the_torus() {
    // 32 generations move a glider 8 tracks down and 8 steps across; the
    // track axis has wrapped exactly once.
    let glider = Grid::from_rows(&GLIDER).unwrap();
    let config = SessionConfig::default().with_grid(glider).with_evolution_speed(4).unwrap();
    let mut ctrl = offline(config);

    run(&mut ctrl, 32 * 4);
    let grid = ctrl.snapshot().grid;
    let expected = Grid::from_cells(core::array::from_fn(|t| {
        core::array::from_fn(|s| glider.cell(t, (s + 24) % 32))
    }));
    assert_eq!(grid, expected);
}

#[test]
fn frozen_row_holds_its_rhythm() {
    let rows = [
        "#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.",
        "................................",
        "....#.......#.......#.......#...",
        "................................",
        "##..##..##..##..##..##..##..##..",
        "................................",
        "................................",
        "................................",
    ];
    let grid = Grid::from_rows(&rows).unwrap();
    let mut config = SessionConfig::default().with_grid(grid).with_evolution_speed(4).unwrap();
    config.flags.freeze[0] = true;
    let mut ctrl = offline(config);

    run(&mut ctrl, 64);
    let snap = ctrl.snapshot();
    assert_eq!(snap.generation, 16);
    assert_eq!(snap.grid.row(0), grid.row(0));
}

#[test]
fn solo_limits_output_to_one_voice() {
    let grid = Grid::from_rows(&["################################"; 8]).unwrap();
    let mut config = SessionConfig::default().with_grid(grid);
    config.flags.solo[5] = true;
    config.flags.mute[5] = true;
    // Pause so the full grid does not die out
    let mut ctrl = offline(config);
    ctrl.toggle_evolution_pause();

    let events = run(&mut ctrl, 32);
    assert_eq!(events.len(), 32);
    assert!(events.iter().all(|e| e.track == 5));
    assert!(events.iter().all(|e| e.info().name == "Mid Tom"));
}

#[test]
fn reverse_playback_visits_descending_columns() {
    let mut rows = ["................................"; 8];
    rows[0] = "#...............................";
    rows[1] = "...............................#";
    let grid = Grid::from_rows(&rows).unwrap();
    let config = SessionConfig::default().with_grid(grid).with_direction(Direction::Reverse);
    let mut ctrl = offline(config);
    ctrl.toggle_evolution_pause();

    // 0 -> 31 -> 30 ... -> 0
    let events = run(&mut ctrl, 32);
    let tracks: Vec<u8> = events.iter().map(|e| e.track).collect();
    assert_eq!(tracks, [1, 0]);
    assert_eq!(events[0].time.micros, 0);
    assert_eq!(events[1].time.micros, 31 * 125_000);
}

#[test]
fn highlife_births_between_two_bars() {
    // The cell between two horizontal triples has six neighbors
    let rows = [
        "................................",
        ".###............................",
        "................................",
        ".###............................",
        "................................",
        "................................",
        "................................",
        "................................",
    ];
    let grid = Grid::from_rows(&rows).unwrap();
    let run_rule = |algorithm| {
        let config = SessionConfig::default()
            .with_grid(grid)
            .with_algorithm(algorithm)
            .with_evolution_speed(4)
            .unwrap();
        let mut ctrl = offline(config);
        ctrl.clock_mut().advance(4);
        ctrl.snapshot().grid
    };
    assert!(!run_rule(Algorithm::GameOfLife).cell(2, 2));
    assert!(run_rule(Algorithm::HighLife).cell(2, 2));
}
