#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use divisible_core::constants::*;
    use divisible_core::enums::{HitOutcome, SweepDirection};
    use divisible_core::types::Position;

    use crate::arc::{entry_point, leg_position, miss_exited, miss_position};
    use crate::formation::{breached, step, FormationContext};
    use crate::layout::{layout, LayoutParams};
    use crate::outcome::{classify, resolve};
    use crate::scatter::{fragment_waypoints, pocket_slot, split_positions};
    use crate::waves::{generate, standard_wave_size, wave_kind, WaveKind};

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    // ---- Wave generator ----

    #[test]
    fn test_standard_wave_cardinality() {
        let mut rng = rng();
        for wave in 1..BOSS_WAVE {
            let expected =
                (WAVE_BASE_COUNT + WAVE_COUNT_INCREMENT * (wave as usize - 1)).min(MONSTER_POOL.len());
            let values = generate(wave, &mut rng);
            assert_eq!(values.len(), expected, "wave {wave}");
            assert_eq!(standard_wave_size(wave), expected);
        }
    }

    #[test]
    fn test_standard_wave_draws_pool_prefix() {
        let mut rng = rng();
        let values = generate(3, &mut rng);
        let drawn: HashSet<u32> = values.iter().copied().collect();
        let prefix: HashSet<u32> = MONSTER_POOL[..standard_wave_size(3)].iter().copied().collect();
        assert_eq!(drawn, prefix);
    }

    #[test]
    fn test_wave_zero_behaves_like_wave_one() {
        assert_eq!(standard_wave_size(0), WAVE_BASE_COUNT);
    }

    #[test]
    fn test_boss_wave_is_singleton() {
        let mut rng = rng();
        assert_eq!(wave_kind(BOSS_WAVE), WaveKind::Boss);
        assert_eq!(generate(BOSS_WAVE, &mut rng), vec![BOSS_VALUE]);
    }

    #[test]
    fn test_endless_waves_are_distinct_pool_subsets() {
        let mut rng = rng();
        let pool: HashSet<u32> = MONSTER_POOL.iter().copied().collect();
        for wave in BOSS_WAVE + 1..BOSS_WAVE + 30 {
            assert_eq!(wave_kind(wave), WaveKind::Endless);
            let values = generate(wave, &mut rng);
            assert!(
                (ENDLESS_MIN_COUNT..=ENDLESS_MAX_COUNT).contains(&values.len()),
                "wave {wave} had {} monsters",
                values.len()
            );
            let unique: HashSet<u32> = values.iter().copied().collect();
            assert_eq!(unique.len(), values.len(), "duplicates within one draw");
            assert!(unique.is_subset(&pool));
        }
    }

    #[test]
    fn test_huge_wave_index_does_not_panic() {
        let mut rng = rng();
        assert!(!generate(u32::MAX, &mut rng).is_empty());
        assert!(standard_wave_size(BOSS_WAVE - 1) <= MONSTER_POOL.len());
    }

    // ---- Formation layout ----

    #[test]
    fn test_layout_sorts_descending_rows() {
        let placed = layout(&[4, 100, 9, 50]);
        let values: Vec<u32> = placed.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, vec![100, 50, 9, 4]);
        assert!(placed.iter().all(|(_, p)| p.y == FORMATION_TOP));
    }

    #[test]
    fn test_layout_wraps_at_column_count() {
        let values: Vec<u32> = MONSTER_POOL[..FORMATION_COLUMNS + 1].to_vec();
        let placed = layout(&values);
        assert_eq!(placed[FORMATION_COLUMNS - 1].1.y, FORMATION_TOP);
        assert_eq!(placed[FORMATION_COLUMNS].1.y, FORMATION_TOP + ROW_SPACING);
        // smallest value ends up alone on the last row
        assert_eq!(placed[FORMATION_COLUMNS].0, 4);
    }

    #[test]
    fn test_partial_row_is_centered() {
        let params = LayoutParams::default();
        let values: Vec<u32> = MONSTER_POOL[..FORMATION_COLUMNS + 2].to_vec();
        let placed = layout(&values);
        let full_center = (params.left + params.left + params.usable_width()) / 2.0;
        let last_row: Vec<Position> = placed[FORMATION_COLUMNS..].iter().map(|(_, p)| *p).collect();
        let row_center = (last_row[0].x + last_row[1].x) / 2.0;
        assert!((row_center - full_center).abs() < 1e-9);
    }

    #[test]
    fn test_boss_layout_is_centered_single() {
        let placed = layout(&[BOSS_VALUE]);
        assert_eq!(placed.len(), 1);
        let params = LayoutParams::default();
        let center = params.left + params.usable_width() / 2.0;
        assert!((placed[0].1.x - center).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_layout_sweep_stays_in_bounds(count in 1usize..=MONSTER_POOL.len()) {
            let placed = layout(&MONSTER_POOL[..count]);
            prop_assert_eq!(placed.len(), count);
            for (_, pos) in &placed {
                prop_assert!(pos.x >= FIELD_LEFT - 1e-9);
                prop_assert!(pos.x + SWEEP_RANGE <= FIELD_RIGHT + 1e-9);
            }
            prop_assert!(placed.windows(2).all(|w| w[0].0 >= w[1].0));
        }
    }

    // ---- Formation movement ----

    fn run_ticks(ticks: u32, suppress_descent: bool) -> (FormationContext, f64, f64, u32) {
        let mut ctx = FormationContext {
            suppress_descent,
            ..Default::default()
        };
        let (mut x, mut y, mut flips) = (0.0, 0.0, 0);
        for _ in 0..ticks {
            let update = step(&ctx);
            x += update.dx;
            y += update.dy;
            if update.direction != ctx.direction {
                flips += 1;
            }
            ctx.direction = update.direction;
            ctx.tick_count = update.tick_count;
        }
        (ctx, x, y, flips)
    }

    #[test]
    fn test_reversal_cadence_and_descent() {
        for ticks in [0, 1, 8, 9, 10, 18, 27, 40] {
            let (ctx, _, y, flips) = run_ticks(ticks, false);
            let expected = ticks / TICKS_PER_REVERSAL;
            assert_eq!(flips, expected, "ticks {ticks}");
            assert_eq!(ctx.tick_count, ticks);
            assert!((y - f64::from(expected) * DESCENT_STEP).abs() < 1e-9);
        }
    }

    #[test]
    fn test_boss_wave_never_descends() {
        let (_, _, y, flips) = run_ticks(90, true);
        assert_eq!(flips, 10);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_sweep_returns_to_origin() {
        let (ctx, x, _, _) = run_ticks(2 * TICKS_PER_REVERSAL, false);
        assert!(x.abs() < 1e-9);
        assert_eq!(ctx.direction, SweepDirection::Right);

        let (_, x, _, _) = run_ticks(TICKS_PER_REVERSAL, false);
        assert!((x - SWEEP_RANGE).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_index_cycles() {
        let mut ctx = FormationContext::default();
        let mut pitches = Vec::new();
        for _ in 0..11 {
            let update = step(&ctx);
            pitches.push(update.pitch_index);
            ctx.direction = update.direction;
            ctx.tick_count = update.tick_count;
        }
        assert_eq!(pitches, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 0, 1]);
    }

    #[test]
    fn test_breach_threshold_is_strict() {
        assert!(!breached([10.0, DEPTH_THRESHOLD]));
        assert!(breached([10.0, DEPTH_THRESHOLD + 0.01]));
        assert!(!breached(std::iter::empty()));
    }

    // ---- Hit outcomes ----

    #[test]
    fn test_quotient_boundaries() {
        assert_eq!(classify(1), HitOutcome::Vanish);
        assert_eq!(classify(2), HitOutcome::Pocketed);
        assert_eq!(classify(9), HitOutcome::Pocketed);
        assert_eq!(classify(10), HitOutcome::Split);
        assert_eq!(classify(100), HitOutcome::Split);
        assert_eq!(classify(101), HitOutcome::Escape);
        assert_eq!(classify(u32::MAX), HitOutcome::Escape);
    }

    #[test]
    fn test_vanish_resolution() {
        let r = resolve(2, 2).unwrap();
        assert_eq!(r.quotient, 1);
        assert_eq!(r.outcome, HitOutcome::Vanish);
        assert_eq!(r.score, 2);
        assert_eq!((r.pocketed, r.spawned, r.escaped), (0, 0, 0));
        assert!(r.defeats);
    }

    #[test]
    fn test_pocket_resolution_edges() {
        let low = resolve(6, 3).unwrap();
        assert_eq!((low.quotient, low.outcome, low.pocketed), (2, HitOutcome::Pocketed, 3));
        let high = resolve(72, 8).unwrap();
        assert_eq!((high.quotient, high.outcome, high.pocketed), (9, HitOutcome::Pocketed, 8));
        assert!(high.defeats);
        assert_eq!(high.score, 72);
    }

    #[test]
    fn test_split_resolution_edges() {
        let low = resolve(50, 5).unwrap();
        assert_eq!((low.quotient, low.outcome, low.spawned), (10, HitOutcome::Split, 5));
        let high = resolve(900, 9).unwrap();
        assert_eq!((high.quotient, high.outcome, high.spawned), (100, HitOutcome::Split, 9));
        assert!(!high.defeats);
        assert_eq!(high.score, 900);
    }

    #[test]
    fn test_escape_resolution() {
        let r = resolve(980, 7).unwrap();
        assert_eq!(r.quotient, 140);
        assert_eq!(r.outcome, HitOutcome::Escape);
        assert_eq!((r.spawned, r.escaped, r.pocketed), (1, 6, 0));
        assert_eq!(r.score, 980);

        let boss = resolve(BOSS_VALUE, 2).unwrap();
        assert_eq!(boss.quotient, BOSS_VALUE / 2);
        assert_eq!(boss.spawned, 1);
    }

    #[test]
    fn test_resolve_rejects_non_divisor() {
        assert!(resolve(9, 2).is_none());
        assert!(resolve(9, 0).is_none());
    }

    proptest! {
        #[test]
        fn prop_resolution_is_total(ball in 2u32..=9, quotient in 1u32..=200_000) {
            let value = ball * quotient;
            let r = resolve(value, ball).expect("divisible hit must resolve");
            prop_assert_eq!(r.quotient, quotient);
            prop_assert_eq!(r.score, u64::from(value));
            match r.outcome {
                HitOutcome::Vanish => prop_assert_eq!(quotient, 1),
                HitOutcome::Pocketed => {
                    prop_assert!((2..=9).contains(&quotient));
                    prop_assert_eq!(r.pocketed, ball);
                }
                HitOutcome::Split => {
                    prop_assert!((10..=100).contains(&quotient));
                    prop_assert_eq!(r.spawned, ball);
                }
                HitOutcome::Escape => {
                    prop_assert!(quotient > 100);
                    prop_assert_eq!(r.spawned, 1);
                    prop_assert_eq!(r.escaped, ball - 1);
                }
            }
        }
    }

    // ---- Geometry ----

    #[test]
    fn test_leg_hits_endpoints() {
        let from = entry_point();
        let to = Position::new(40.0, 20.0);
        let start = leg_position(from, to, 0.0, 0);
        let end = leg_position(from, to, 1.0, 0);
        assert!(start.distance_to(&from) < 1e-9);
        assert!(end.distance_to(&to) < 1e-9);
    }

    #[test]
    fn test_leg_arcs_alternate_sides() {
        let from = Position::new(0.0, 50.0);
        let to = Position::new(100.0, 50.0);
        let even = leg_position(from, to, 0.5, 0);
        let odd = leg_position(from, to, 0.5, 1);
        assert!((even.y - (50.0 + ARC_AMPLITUDE)).abs() < 1e-9);
        assert!((odd.y - (50.0 - ARC_AMPLITUDE)).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_leg_does_not_produce_nan() {
        let p = Position::new(30.0, 30.0);
        let mid = leg_position(p, p, 0.5, 0);
        assert!(mid.x.is_finite() && mid.y.is_finite());
    }

    #[test]
    fn test_miss_path_crosses_field() {
        assert_eq!(miss_position(0), entry_point());
        assert!(!miss_exited(miss_position(29)));
        assert!(miss_exited(miss_position(30)));
    }

    #[test]
    fn test_pocket_slots() {
        assert_eq!(pocket_slot(2), Position::new(12.5, 95.0));
        assert_eq!(pocket_slot(9), Position::new(100.0, 95.0));
    }

    #[test]
    fn test_fragment_waypoints_surround_origin() {
        let mut rng = rng();
        let origin = Position::new(50.0, 40.0);
        let points = fragment_waypoints(origin, 5, &mut rng);
        assert_eq!(points.len(), 5);
        for p in points {
            let d = p.distance_to(&origin);
            assert!((FRAGMENT_SCATTER_MIN..=FRAGMENT_SCATTER_MIN + FRAGMENT_SCATTER_JITTER).contains(&d));
        }
    }

    #[test]
    fn test_split_positions_are_distinct_and_clamped() {
        let mut rng = rng();
        let origin = Position::new(88.0, 30.0);
        let points = split_positions(origin, 9, &mut rng);
        assert_eq!(points.len(), 9);
        for (i, a) in points.iter().enumerate() {
            assert!((SPLIT_MIN_X..=SPLIT_MAX_X).contains(&a.x));
            for b in &points[i + 1..] {
                assert!(a.distance_to(b) > 0.0);
            }
        }
    }
}
