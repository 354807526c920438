//! Command-line flags and their mapping onto a session config.

use anyhow::{Context, Result};
use clap::Parser;
use cs_ir::{
    check_track, Algorithm, Direction, Grid, OutputRoute, DEFAULT_EVOLUTION_SPEED,
    DEFAULT_TEMPO_BPM, TRACKS,
};
use cs_master::SessionConfig;

/// Generative cellular-automaton rhythm sequencer.
#[derive(Parser, Debug)]
#[command(name = "cellseq", version, about)]
pub struct Args {
    /// Tempo in BPM (60-200).
    #[arg(long, env = "CELLSEQ_BPM", default_value_t = DEFAULT_TEMPO_BPM)]
    pub bpm: f32,

    /// Ticks between generations (4-64, multiple of 4).
    #[arg(long, env = "CELLSEQ_SPEED", default_value_t = DEFAULT_EVOLUTION_SPEED)]
    pub speed: u32,

    /// Rule: game-of-life (B3/S23) or high-life (B36/S23).
    #[arg(long, env = "CELLSEQ_ALGORITHM", default_value = "game-of-life")]
    pub algorithm: Algorithm,

    /// Playback direction: forward, reverse or ping-pong.
    #[arg(long, env = "CELLSEQ_DIRECTION", default_value = "forward")]
    pub direction: Direction,

    /// Seed for grid randomization.
    #[arg(long, env = "CELLSEQ_SEED")]
    pub seed: Option<u64>,

    /// Start from a random grid.
    #[arg(long, conflicts_with = "pattern")]
    pub randomize: bool,

    /// Starting grid: 8 comma-separated rows of 32 `#`/`.` cells.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Tracks to freeze (comma-separated, 0-7).
    #[arg(long, value_delimiter = ',')]
    pub freeze: Vec<usize>,

    /// Tracks to mute (comma-separated, 0-7).
    #[arg(long, value_delimiter = ',')]
    pub mute: Vec<usize>,

    /// Tracks to solo (comma-separated, 0-7).
    #[arg(long, value_delimiter = ',')]
    pub solo: Vec<usize>,

    /// Bars of sixteenth notes to play.
    #[arg(long, env = "CELLSEQ_BARS", default_value_t = 2)]
    pub bars: u32,

    /// Run as fast as possible instead of in real time.
    #[arg(long)]
    pub offline: bool,

    /// Send triggers to MIDI instead of the built-in voices.
    #[arg(long, env = "CELLSEQ_MIDI")]
    pub midi: bool,

    /// Print the final state as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = SessionConfig::default()
            .with_bpm(self.bpm)
            .context("invalid --bpm")?
            .with_evolution_speed(self.speed)
            .context("invalid --speed")?
            .with_algorithm(self.algorithm)
            .with_direction(self.direction);
        config.seed = self.seed;
        config.randomize = self.randomize;
        if self.midi {
            config.route = OutputRoute::Midi;
        }

        if let Some(pattern) = &self.pattern {
            let rows: Vec<&str> = pattern.split(',').map(str::trim).collect();
            config.grid = Some(Grid::from_rows(&rows).context("invalid --pattern")?);
        }

        set_tracks(&mut config.flags.freeze, &self.freeze).context("invalid --freeze")?;
        set_tracks(&mut config.flags.mute, &self.mute).context("invalid --mute")?;
        set_tracks(&mut config.flags.solo, &self.solo).context("invalid --solo")?;
        Ok(config)
    }
}

fn set_tracks(mask: &mut [bool; TRACKS], tracks: &[usize]) -> Result<()> {
    for &track in tracks {
        check_track(track)?;
        mask[track] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cellseq").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).session_config().unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = parse(&[
            "--bpm",
            "90",
            "--speed",
            "8",
            "--algorithm",
            "highlife",
            "--direction",
            "ping-pong",
            "--seed",
            "5",
            "--freeze",
            "1,3",
            "--solo",
            "7",
            "--midi",
        ]);
        let config = args.session_config().unwrap();
        assert_eq!(config.tempo.bpm(), 90.0);
        assert_eq!(config.evolution_speed.steps(), 8);
        assert_eq!(config.algorithm, Algorithm::HighLife);
        assert_eq!(config.direction, Direction::PingPong);
        assert_eq!(config.seed, Some(5));
        assert!(config.flags.freeze[1] && config.flags.freeze[3]);
        assert!(config.flags.solo[7]);
        assert_eq!(config.route, OutputRoute::Midi);
    }

    #[test]
    fn out_of_range_values_are_errors() {
        assert!(parse(&["--speed", "6"]).session_config().is_err());
        assert!(parse(&["--bpm", "20"]).session_config().is_err());
        assert!(parse(&["--mute", "8"]).session_config().is_err());
        assert!(Args::try_parse_from(["cellseq", "--algorithm", "seeds"]).is_err());
    }

    #[test]
    fn pattern_needs_eight_rows() {
        let row = "#...............................";
        let short = [row; 7].join(",");
        assert!(parse(&["--pattern", short.as_str()]).session_config().is_err());

        let full = [row; 8].join(",");
        let config = parse(&["--pattern", full.as_str()]).session_config().unwrap();
        assert_eq!(config.grid.map(|g| g.population()), Some(8));
    }
}
