//! Simulation engine: the game lifecycle.
//!
//! `SimulationEngine` owns the monster registry, the deferred-task scheduler,
//! the formation tracker and the single projectile slot. It processes player
//! commands, runs all systems, and produces `GameStateSnapshot`s. Completely
//! headless and single-threaded, enabling deterministic testing.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use divisible_core::commands::PlayerCommand;
use divisible_core::constants::*;
use divisible_core::enums::{GameOverReason, GamePhase, ThrowRejection};
use divisible_core::events::{AudioEvent, GameEvent};
use divisible_core::state::{GameStateSnapshot, WaveView};
use divisible_core::types::SimTime;
use divisible_rules::waves::{wave_kind, WaveKind};

use crate::feedback::Feedback;
use crate::inventory::Inventory;
use crate::projectile::Projectile;
use crate::registry::MonsterRegistry;
use crate::scheduler::{Scheduler, Task};
use crate::session::ScoreState;
use crate::systems;
use crate::systems::flight::FlightEvent;
use crate::systems::formation::{FormationTick, FormationTracker};
use crate::systems::hit_resolution::HitContext;
use crate::systems::snapshot::SnapshotInputs;
use crate::world_setup;

/// Configuration for a simulation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Host loop speed (1.0 = normal), clamped to 0.0..=4.0.
    pub time_scale: f64,
    /// Balls owned at the start of every game.
    pub starting_inventory: BTreeMap<u32, u32>,
    /// Limit each wave to `8 + wave / 2` throws.
    pub turn_limit: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            starting_inventory: STARTING_INVENTORY.into_iter().collect(),
            turn_limit: false,
        }
    }
}

/// The simulation engine. Owns all game state.
pub struct SimulationEngine {
    config: SimConfig,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    registry: MonsterRegistry,
    scheduler: Scheduler,
    formation: FormationTracker,
    projectile: Option<Projectile>,
    next_throw: u32,
    inventory: Inventory,
    score: ScoreState,
    wave: u32,
    turns_left: Option<u32>,
    feedback: Feedback,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, 4.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            registry: MonsterRegistry::new(),
            scheduler: Scheduler::new(),
            formation: FormationTracker::default(),
            projectile: None,
            next_throw: 0,
            inventory: Inventory::default(),
            score: ScoreState::default(),
            wave: 0,
            turns_left: None,
            feedback: Feedback::default(),
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if matches!(self.phase, GamePhase::Playing | GamePhase::WaveClearPending) {
            self.time.advance();
            self.run_systems();
        }

        let (events, audio_events) = self.feedback.take();
        let mut wave = WaveView {
            index: self.wave,
            turns_left: self.turns_left,
            ..Default::default()
        };
        self.formation.fill_view(&mut wave);

        systems::snapshot::build_snapshot(
            SnapshotInputs {
                registry: &self.registry,
                time: self.time,
                phase: self.phase,
                wave,
                projectile: self.projectile.as_ref(),
                inventory: &self.inventory,
                score: &self.score,
            },
            events,
            audio_events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Current wave index (0 before the first game).
    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn registry(&self) -> &MonsterRegistry {
        &self.registry
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn formation(&self) -> &FormationTracker {
        &self.formation
    }

    /// Number of outstanding deferred tasks.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Replace the registry contents with specific monsters (for tests).
    #[cfg(test)]
    pub fn stage_monsters(
        &mut self,
        monsters: &[(u32, divisible_core::types::Position)],
    ) -> Vec<divisible_core::components::MonsterId> {
        self.registry.clear();
        self.formation = FormationTracker::for_wave(self.formation.context.suppress_descent);
        monsters
            .iter()
            .map(|&(value, position)| self.registry.spawn(value, position))
            .collect()
    }

    /// Replace the inventory (for tests).
    #[cfg(test)]
    pub fn set_inventory(&mut self, counts: &[(u32, u32)]) {
        self.inventory = Inventory::from_counts(counts.iter().copied());
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_game();
                }
            }
            PlayerCommand::ThrowBall { value } => self.throw_ball(value),
            PlayerCommand::RequestMenu => {
                if self.phase != GamePhase::Menu {
                    self.reset_session();
                    self.set_phase(GamePhase::Menu);
                    info!("returned to menu");
                }
            }
        }
    }

    /// Drop every trace of the previous run: outstanding tasks first, so
    /// nothing can fire into the fresh state.
    fn reset_session(&mut self) {
        let dropped = self.scheduler.cancel_all();
        if dropped > 0 {
            debug!("cancelled {dropped} pending tasks");
        }
        self.destroy_projectile();
        self.registry.reset();
        self.formation = FormationTracker::default();
        self.inventory = Inventory::from_counts(
            self.config
                .starting_inventory
                .iter()
                .map(|(&value, &count)| (value, count)),
        );
        self.score = ScoreState::default();
        self.wave = 0;
        self.turns_left = None;
        self.next_throw = 0;
        self.time = SimTime::default();
    }

    fn start_game(&mut self) {
        self.reset_session();
        self.set_phase(GamePhase::Playing);
        for (value, count) in self.inventory.view() {
            self.feedback
                .emit(GameEvent::InventoryChanged { value, count });
        }
        self.feedback.emit(GameEvent::ScoreChanged { score: 0 });
        info!("new game (seed {})", self.config.seed);
        self.start_wave(1);
    }

    fn start_wave(&mut self, wave: u32) {
        self.wave = wave;
        let is_boss = wave_kind(wave) == WaveKind::Boss;
        self.formation = FormationTracker::for_wave(is_boss);
        let monster_count =
            world_setup::spawn_wave(&mut self.registry, &mut self.rng, wave, &mut self.feedback);
        self.turns_left = self
            .config
            .turn_limit
            .then(|| TURN_BUDGET_BASE + wave / 2);
        self.feedback.emit(GameEvent::WaveStarted {
            wave,
            monster_count,
        });
        info!("wave {wave} started with {monster_count} monsters (boss: {is_boss})");
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            self.phase = phase;
            self.feedback.emit(GameEvent::PhaseChanged { phase });
        }
    }

    fn reject_throw(&mut self, value: u32, reason: ThrowRejection) {
        debug!("throw of {value} rejected: {reason:?}");
        self.feedback
            .emit(GameEvent::ThrowRejected { value, reason });
    }

    /// Throw a ball. Rejected (no state change) unless playing, no
    /// projectile is active, and a ball of `value` is available.
    fn throw_ball(&mut self, value: u32) {
        if self.phase != GamePhase::Playing {
            return self.reject_throw(value, ThrowRejection::NotPlaying);
        }
        if self.projectile.is_some() {
            return self.reject_throw(value, ThrowRejection::ProjectileActive);
        }
        let Some(remaining) = self.inventory.take(value) else {
            return self.reject_throw(value, ThrowRejection::NoBalls);
        };

        self.feedback.emit(GameEvent::InventoryChanged {
            value,
            count: remaining,
        });
        self.feedback.cue(AudioEvent::Throw);
        self.score.throws += 1;
        if let Some(turns) = self.turns_left.as_mut() {
            *turns = turns.saturating_sub(1);
        }

        let targets = self.registry.divisible_targets(value);
        if targets.is_empty() {
            self.score.misses += 1;
        }
        debug!("throw {value}: {} targets", targets.len());

        self.next_throw += 1;
        let projectile = Projectile::launch(self.next_throw, value, targets);
        self.feedback.emit(GameEvent::ProjectileSpawned {
            value,
            position: projectile.position,
        });
        self.projectile = Some(projectile);
    }

    fn destroy_projectile(&mut self) {
        if self.projectile.take().is_some() {
            self.feedback.emit(GameEvent::ProjectileDestroyed);
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Deferred tasks due this tick
        for task in self.scheduler.drain_due(self.time.tick) {
            self.run_task(task);
        }
        // 2. Projectile flight and hits
        self.advance_projectile();
        // 3. Formation movement and the loss check
        if self.phase == GamePhase::Playing {
            let tick = systems::formation::run(
                &mut self.formation,
                &mut self.registry,
                &mut self.feedback,
            );
            if tick == FormationTick::Breached {
                self.game_over(GameOverReason::Breach);
            }
        }
        // 4. Lifecycle transitions
        self.check_wave_clear();
        self.check_turns();
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::NextLeg { throw } => {
                let Some(projectile) = self.projectile.as_mut() else {
                    return;
                };
                if projectile.throw != throw {
                    return;
                }
                if !projectile.begin_next_leg() {
                    self.scheduler.schedule(
                        self.time.tick,
                        ms_to_ticks(PROJECTILE_LINGER_MS),
                        Task::DiscardProjectile { throw },
                    );
                }
            }
            Task::DiscardProjectile { throw } => {
                if self.projectile.as_ref().is_some_and(|p| p.throw == throw) {
                    self.destroy_projectile();
                }
            }
            Task::PocketArrival {
                value,
                count,
                score,
            } => {
                let count = self.inventory.credit(value, count);
                self.feedback
                    .emit(GameEvent::InventoryChanged { value, count });
                self.feedback.cue(AudioEvent::Catch);
                self.score.award(score, &mut self.feedback);
                self.score.defeated += 1;
            }
            Task::AdvanceWave => {
                if self.phase == GamePhase::WaveClearPending {
                    self.set_phase(GamePhase::Playing);
                    self.start_wave(self.wave + 1);
                }
            }
        }
    }

    fn advance_projectile(&mut self) {
        let Some(projectile) = self.projectile.as_mut() else {
            return;
        };
        let throw = projectile.throw;
        match systems::flight::run(projectile, &self.registry, &mut self.feedback) {
            FlightEvent::InFlight => {}
            FlightEvent::Exited => self.destroy_projectile(),
            FlightEvent::Arrived(target) => {
                let ball = projectile.value;
                let first_visit = projectile.resolved.insert(target);
                projectile.finish_leg();
                if first_visit {
                    let mut ctx = HitContext {
                        registry: &mut self.registry,
                        scheduler: &mut self.scheduler,
                        rng: &mut self.rng,
                        score: &mut self.score,
                        feedback: &mut self.feedback,
                        now: self.time.tick,
                    };
                    systems::hit_resolution::run(&mut ctx, target, ball);
                }
                self.scheduler.schedule(
                    self.time.tick,
                    ms_to_ticks(LEG_SETTLE_MS),
                    Task::NextLeg { throw },
                );
            }
            FlightEvent::TargetLost(target) => {
                debug!("target {} vanished mid-flight", target.0);
                projectile.finish_leg();
                self.scheduler
                    .schedule(self.time.tick, 0, Task::NextLeg { throw });
            }
        }
    }

    fn check_wave_clear(&mut self) {
        if self.phase != GamePhase::Playing
            || !self.registry.is_empty()
            || self.projectile.is_some()
        {
            return;
        }
        self.set_phase(GamePhase::WaveClearPending);
        self.feedback.emit(GameEvent::WaveCleared { wave: self.wave });
        self.scheduler.schedule(
            self.time.tick,
            ms_to_ticks(WAVE_ADVANCE_MS),
            Task::AdvanceWave,
        );
        info!("wave {} cleared", self.wave);
    }

    fn check_turns(&mut self) {
        if self.phase == GamePhase::Playing
            && self.turns_left == Some(0)
            && !self.registry.is_empty()
            && self.projectile.is_none()
        {
            self.game_over(GameOverReason::OutOfTurns);
        }
    }

    /// Terminal transition: stop the formation, cancel every pending task,
    /// discard the projectile, and freeze the registry.
    fn game_over(&mut self, reason: GameOverReason) {
        self.formation.stop();
        let dropped = self.scheduler.cancel_all();
        self.destroy_projectile();
        self.score.game_over_reason = Some(reason);
        self.set_phase(GamePhase::GameOver);
        self.feedback.emit(GameEvent::GameOver { reason });
        self.feedback.cue(AudioEvent::GameOver);
        info!(
            "game over ({reason:?}) on wave {} with score {} ({dropped} tasks cancelled)",
            self.wave, self.score.score
        );
    }
}
