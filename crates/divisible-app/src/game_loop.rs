//! Game loop thread. Runs the simulation engine at 60Hz and emits snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots go to a `SnapshotSink` and
//! are stored in shared state for synchronous polling.

use std::io::Write;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, trace, warn};

use divisible_core::constants::{INVADER_PITCHES, TICK_RATE};
use divisible_core::enums::GamePhase;
use divisible_core::events::AudioEvent;
use divisible_core::state::GameStateSnapshot;
use divisible_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Destination for per-tick snapshots.
pub trait SnapshotSink {
    fn emit(&mut self, snapshot: &GameStateSnapshot) -> Result<()>;
}

/// Discards every snapshot.
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&mut self, _snapshot: &GameStateSnapshot) -> Result<()> {
        Ok(())
    }
}

/// Writes snapshots as JSON lines.
pub struct JsonLinesSink<W: Write> {
    out: W,
    /// Skip snapshots without events or audio cues.
    events_only: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W, events_only: bool) -> Self {
        Self { out, events_only }
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn emit(&mut self, snapshot: &GameStateSnapshot) -> Result<()> {
        if self.events_only && snapshot.events.is_empty() && snapshot.audio_events.is_empty() {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, snapshot).context("serialize snapshot")?;
        self.out.write_all(b"\n").context("write snapshot")?;
        self.out.flush().context("flush snapshot")?;
        Ok(())
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the input driver and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    sink: Box<dyn SnapshotSink + Send>,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("divisible-game-loop".into())
        .spawn(move || {
            run_game_loop(config, sink, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut sink: Box<dyn SnapshotSink + Send>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    let mut last_phase = engine.phase();
    info!("game loop started at {TICK_RATE}Hz (x{})", engine.time_scale());

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!("game loop stopped at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick
        let snapshot = engine.tick();

        if snapshot.phase != last_phase {
            if snapshot.phase == GamePhase::GameOver {
                info!("{}", summary(&snapshot));
            }
            last_phase = snapshot.phase;
        }

        for cue in &snapshot.audio_events {
            match cue {
                AudioEvent::InvaderTick { pitch_index } => {
                    trace!("cue InvaderTick {} Hz", invader_pitch_hz(*pitch_index));
                }
                other => trace!("cue {other:?}"),
            }
        }

        // 3. Hand the snapshot to the host; a failing sink never stops the loop
        if let Err(e) = sink.emit(&snapshot) {
            warn!("snapshot emit failed: {e:#}");
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Frequency of the formation tick cue.
pub fn invader_pitch_hz(pitch_index: u32) -> f64 {
    INVADER_PITCHES[pitch_index as usize % INVADER_PITCHES.len()]
}

/// One-line end-of-game summary.
pub fn summary(snapshot: &GameStateSnapshot) -> String {
    let score = &snapshot.score;
    let reason = match score.game_over_reason {
        Some(reason) => format!("{reason:?}"),
        None => "in progress".to_string(),
    };
    format!(
        "wave {} | score {} | defeated {} | throws {} | misses {} | {}",
        snapshot.wave.index, score.score, score.defeated, score.throws, score.misses, reason
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use divisible_core::commands::PlayerCommand;
    use divisible_core::enums::GameOverReason;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::ThrowBall {
            value: 3,
        }))
        .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartGame)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::ThrowBall { value: 3 })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_json_lines_sink_writes_one_line_per_snapshot() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartGame);

        let mut buf = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buf, false);
            for _ in 0..3 {
                sink.emit(&engine.tick()).unwrap();
            }
        }
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: GameStateSnapshot = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.phase, GamePhase::Playing);
    }

    #[test]
    fn test_events_only_sink_skips_quiet_ticks() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let mut buf = Vec::new();
        {
            let mut sink = JsonLinesSink::new(&mut buf, true);
            // Menu ticks carry no events.
            for _ in 0..5 {
                sink.emit(&engine.tick()).unwrap();
            }
            engine.queue_command(PlayerCommand::StartGame);
            sink.emit(&engine.tick()).unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_summary_mentions_reason() {
        let mut snapshot = GameStateSnapshot::default();
        snapshot.wave.index = 4;
        snapshot.score.score = 120;
        snapshot.score.game_over_reason = Some(GameOverReason::Breach);
        let line = summary(&snapshot);
        assert!(line.contains("wave 4"));
        assert!(line.contains("score 120"));
        assert!(line.contains("Breach"));
    }

    #[test]
    fn test_invader_pitch_ladder_descends() {
        assert_eq!(invader_pitch_hz(0), 520.0);
        assert_eq!(invader_pitch_hz(8), 280.0);
        assert_eq!(invader_pitch_hz(9), 520.0);
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
