//! Host state shared between the input driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};

use divisible_core::commands::PlayerCommand;
use divisible_core::state::GameStateSnapshot;
use divisible_sim::SimConfig;

use crate::game_loop::{self, SnapshotSink};

/// Commands sent from the input driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the state can be shared by
/// reference across threads; the latest snapshot is shared with the loop.
pub struct AppState {
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.loop_handle
            .lock()
            .map(|handle| handle.is_some())
            .unwrap_or(false)
    }

    /// Spawn the game loop thread. Fails if it is already running.
    pub fn start_simulation(
        &self,
        config: SimConfig,
        sink: Box<dyn SnapshotSink + Send>,
    ) -> Result<()> {
        let mut handle_lock = self
            .loop_handle
            .lock()
            .map_err(|e| anyhow!("loop handle lock poisoned: {e}"))?;
        if handle_lock.is_some() {
            bail!("simulation already running");
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(config, sink, self.latest_snapshot.clone())?;

        let mut tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        *tx_lock = Some(cmd_tx);
        *handle_lock = Some(handle);
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<()> {
        let tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel lock poisoned: {e}"))?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::PlayerCommand(command))
                .context("game loop is gone"),
            None => bail!("simulation not started"),
        }
    }

    /// Latest snapshot, for polling and the exit summary.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>> {
        let lock = self
            .latest_snapshot
            .lock()
            .map_err(|e| anyhow!("snapshot lock poisoned: {e}"))?;
        Ok(lock.clone())
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(&self) -> Result<()> {
        if let Ok(mut tx_lock) = self.command_tx.lock() {
            if let Some(tx) = tx_lock.take() {
                // A closed channel stops the loop as well.
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        let handle = self
            .loop_handle
            .lock()
            .map_err(|e| anyhow!("loop handle lock poisoned: {e}"))?
            .take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        Ok(())
    }
}
