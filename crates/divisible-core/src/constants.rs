//! Simulation constants and tuning parameters.
//!
//! Play-field coordinates are percentages: x in 0..100 across the width,
//! y in 0..100 down the depth.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Convert a millisecond delay into whole ticks (rounded up).
pub const fn ms_to_ticks(ms: u64) -> u64 {
    (ms * TICK_RATE as u64).div_ceil(1000)
}

// --- Wave generation ---

/// Pre-selected composites with small prime factors (2, 3, 5, 7).
pub const MONSTER_POOL: [u32; 41] = [
    4, 6, 8, 9, 10, 12, 14, 15, 16, 18, 20, 21, 24, 25, 27, 28, 30, 32, 35, 36, 40, 42, 45, 48,
    49, 50, 54, 56, 60, 63, 64, 70, 72, 75, 80, 81, 84, 90, 96, 98, 100,
];

/// Monster count of wave 1.
pub const WAVE_BASE_COUNT: usize = 6;

/// Additional monsters per wave before the boss.
pub const WAVE_COUNT_INCREMENT: usize = 3;

/// Wave index that spawns the boss.
pub const BOSS_WAVE: u32 = 10;

/// The boss carries 9! so every ball value divides it.
pub const BOSS_VALUE: u32 = 362_880;

/// Inclusive bounds of the endless-phase wave size.
pub const ENDLESS_MIN_COUNT: usize = 16;
pub const ENDLESS_MAX_COUNT: usize = 24;

// --- Formation layout ---

/// Monsters per formation row.
pub const FORMATION_COLUMNS: usize = 8;

/// Left edge of the formation's starting block.
pub const FIELD_LEFT: f64 = 8.0;

/// Rightmost x any monster may reach during its sweep.
pub const FIELD_RIGHT: f64 = 92.0;

/// y of the top formation row.
pub const FORMATION_TOP: f64 = 10.0;

/// Vertical distance between formation rows.
pub const ROW_SPACING: f64 = 8.0;

// --- Formation movement ---

/// Wall-clock period of one formation tick.
pub const FORMATION_PERIOD_MS: u64 = 500;

/// Horizontal displacement per formation tick.
pub const FORMATION_STEP: f64 = 2.0;

/// Formation ticks between direction reversals.
pub const TICKS_PER_REVERSAL: u32 = 9;

/// Downward shift applied at each reversal.
pub const DESCENT_STEP: f64 = 5.0;

/// A monster below this depth ends the game.
pub const DEPTH_THRESHOLD: f64 = 80.0;

/// Horizontal excursion of one sweep.
pub const SWEEP_RANGE: f64 = FORMATION_STEP * TICKS_PER_REVERSAL as f64;

// --- Projectile ---

/// Where every throw enters the field.
pub const PROJECTILE_ENTRY_X: f64 = -10.0;
pub const PROJECTILE_ENTRY_Y: f64 = 50.0;

/// Miss flight: per-tick advance and the x at which the projectile is discarded.
pub const MISS_STEP: f64 = 4.0;
pub const MISS_EXIT_X: f64 = 110.0;

/// Ticks spent travelling one leg toward a target.
pub const LEG_TICKS: u32 = 30;

/// Peak perpendicular offset of the leg arc.
pub const ARC_AMPLITUDE: f64 = 12.0;

/// Pause after a hit before the next leg starts.
pub const LEG_SETTLE_MS: u64 = 200;

/// Delay after the final leg before the projectile is discarded.
pub const PROJECTILE_LINGER_MS: u64 = 300;

// --- Hit resolution ---

/// Fragment travel time from a pocketed monster to the inventory slot.
pub const FRAGMENT_TRAVEL_MS: u64 = 1400;

/// Cosmetic stagger between consecutive fragments.
pub const FRAGMENT_STAGGER_MS: u64 = 80;

/// Scatter radius of fragments around the struck monster.
pub const FRAGMENT_SCATTER_MIN: f64 = 8.0;
pub const FRAGMENT_SCATTER_JITTER: f64 = 6.0;
pub const FRAGMENT_ANGLE_JITTER: f64 = 0.3;

/// Pocket slot positions along the bottom of the field.
pub const POCKET_SLOT_ORIGIN_X: f64 = 12.5;
pub const POCKET_SLOT_SPACING: f64 = 12.5;
pub const POCKET_SLOT_Y: f64 = 95.0;

/// Split scatter parameters.
pub const SPLIT_RADIUS_MIN: f64 = 10.0;
pub const SPLIT_RADIUS_JITTER: f64 = 6.0;
pub const SPLIT_ANGLE_JITTER: f64 = 0.5;
pub const SPLIT_MIN_X: f64 = 10.0;
pub const SPLIT_MAX_X: f64 = 90.0;

/// Minimum spacing between split siblings before placement is retried.
pub const SPLIT_MIN_SEPARATION: f64 = 1.0;

/// Placement attempts per split monster before a crowded spot is accepted.
pub const SPLIT_PLACEMENT_ATTEMPTS: u32 = 8;

/// Quotient ranges of the outcome table.
pub const POCKET_QUOTIENT_MIN: u32 = 2;
pub const POCKET_QUOTIENT_MAX: u32 = 9;
pub const SPLIT_QUOTIENT_MAX: u32 = 100;

// --- Lifecycle ---

/// Delay between the registry emptying and the next wave.
pub const WAVE_ADVANCE_MS: u64 = 1500;

/// Ball values the player can own.
pub const BALL_VALUES: [u32; 8] = [2, 3, 4, 5, 6, 7, 8, 9];

/// Inventory at the start of every game.
pub const STARTING_INVENTORY: [(u32, u32); 3] = [(2, 2), (3, 2), (4, 2)];

/// Throws granted per wave when the turn budget is enabled.
pub const TURN_BUDGET_BASE: u32 = 8;

/// Pitch ladder of the invader tick cue (Hz), indexed by pitch index.
pub const INVADER_PITCHES: [f64; 9] = [520.0, 490.0, 460.0, 430.0, 400.0, 370.0, 340.0, 310.0, 280.0];
