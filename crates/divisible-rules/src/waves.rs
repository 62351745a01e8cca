//! Wave generator: wave index -> monster values.

use rand::seq::SliceRandom;
use rand::Rng;

use divisible_core::constants::*;

/// Which generation rule a wave index falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    /// Growing prefix of the pool.
    Standard,
    /// A single huge monster.
    Boss,
    /// Random pool subsets, independent each wave.
    Endless,
}

pub fn wave_kind(wave: u32) -> WaveKind {
    match wave.cmp(&BOSS_WAVE) {
        std::cmp::Ordering::Less => WaveKind::Standard,
        std::cmp::Ordering::Equal => WaveKind::Boss,
        std::cmp::Ordering::Greater => WaveKind::Endless,
    }
}

/// Monster count of a standard wave, clamped to the pool size.
/// Wave 0 is treated as wave 1.
pub fn standard_wave_size(wave: u32) -> usize {
    let steps = wave.max(1) as usize - 1;
    WAVE_BASE_COUNT
        .saturating_add(WAVE_COUNT_INCREMENT.saturating_mul(steps))
        .min(MONSTER_POOL.len())
}

/// Generate the monster values of a wave.
///
/// Cardinality is deterministic for standard and boss waves; the order
/// (and for endless waves the content) comes from `rng`.
pub fn generate<R: Rng + ?Sized>(wave: u32, rng: &mut R) -> Vec<u32> {
    match wave_kind(wave) {
        WaveKind::Standard => {
            let count = standard_wave_size(wave);
            let mut values = MONSTER_POOL[..count].to_vec();
            values.shuffle(rng);
            values
        }
        WaveKind::Boss => vec![BOSS_VALUE],
        WaveKind::Endless => {
            let count = rng
                .gen_range(ENDLESS_MIN_COUNT..=ENDLESS_MAX_COUNT)
                .min(MONSTER_POOL.len());
            let mut values: Vec<u32> = MONSTER_POOL.choose_multiple(rng, count).copied().collect();
            values.shuffle(rng);
            values
        }
    }
}
