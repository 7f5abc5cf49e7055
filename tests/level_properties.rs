//! Property-based tests for the level generator using proptest
//!
//! Invariants that must hold for every level index:
//! - Generation: same index → identical descriptor
//! - Rewards: exactly one heart block per level
//! - Layout: decorations and ammo never sit over a pit
//! - Placement: blocks never share or sit directly above a platform row
//! - World build: the live world matches the descriptor

use proptest::prelude::*;

use super_pio::level::chunks::block_violates_platforms;
use super_pio::level::{Cell, Theme};
use super_pio::sim::{PickupKind, Progress, WorldState};
use super_pio::{Settings, generate_level};

// ============================================================
// Generation Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_generation_is_deterministic(n in 1u32..=100) {
        let a = generate_level(n);
        let b = generate_level(n);
        prop_assert_eq!(a, b, "Level {} differs between runs", n);
    }

    #[test]
    fn prop_exactly_one_heart(n in 1u32..=100) {
        let level = generate_level(n);
        let hearts = level.breakables.iter().filter(|b| b.has_heart).count();
        prop_assert_eq!(hearts, 1, "Level {} has {} hearts", n, hearts);
        prop_assert!(level.breakables.iter().all(|b| !(b.has_heart && b.has_coin)));
    }

    #[test]
    fn prop_theme_follows_world(n in 1u32..=100) {
        let level = generate_level(n);
        let world = (n - 1) / 25 + 1;
        prop_assert_eq!(level.world, world);
        prop_assert_eq!(level.theme, Theme::ALL[(world - 1) as usize]);
        prop_assert_eq!(level.difficulty, (n - 1) % 25 + 1);
    }
}

// ============================================================
// Layout Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_decorations_avoid_gaps(n in 1u32..=100) {
        let level = generate_level(n);
        for d in &level.decorations {
            prop_assert!(!level.in_gap(d.col), "Level {}: {} over a pit at col {}", n, d.name, d.col);
        }
    }

    #[test]
    fn prop_ammo_avoids_gaps_and_spikes(n in 1u32..=100) {
        let level = generate_level(n);
        for a in &level.ammo {
            prop_assert!(!level.spikes.contains(a), "Level {}: ammo on a spike at col {}", n, a.col);
            prop_assert!(!level.in_gap(a.col), "Level {}: ammo over a pit at col {}", n, a.col);
        }
    }

    #[test]
    fn prop_blocks_clear_of_platforms(n in 1u32..=100) {
        let level = generate_level(n);
        for b in &level.breakables {
            prop_assert!(
                !block_violates_platforms(&level.platforms, b.col, b.row),
                "Level {}: block at ({}, {}) touches a platform", n, b.col, b.row
            );
            prop_assert!(b.row >= 0 && b.row < level.ground_row);
        }
    }

    #[test]
    fn prop_entities_inside_grid(n in 1u32..=100) {
        let level = generate_level(n);
        let cols = level.cols() as i32;
        prop_assert_eq!(level.rows(), 14);
        prop_assert!(level.enemies.iter().all(|e| e.col >= 0 && e.col < cols));
        prop_assert!(level.coins.iter().all(|c| c.col >= 0 && c.col < cols));
        prop_assert!(level.goal.col < cols);
        prop_assert_eq!(level.grid.get(level.goal.col, level.goal.row), Cell::Goal);
        prop_assert!(!level.in_gap(level.start.col));
    }

    #[test]
    fn prop_pickup_cells_match_lists(n in 1u32..=100) {
        let level = generate_level(n);
        let count = |cell: Cell| level.grid.iter().filter(|(_, _, c)| *c == cell).count();
        prop_assert_eq!(count(Cell::Ammo), level.ammo.len());
        prop_assert!(count(Cell::Heart) <= 1);
        prop_assert!(count(Cell::Coin) <= level.coins.len());
    }
}

// ============================================================
// World Build Properties
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(25))]

    #[test]
    fn prop_world_builds_from_any_level(n in 1u32..=100, cull in 0.0f32..=1.0) {
        let level = generate_level(n);
        let settings = Settings { enemy_cull_chance: cull, ..Settings::default() };
        let world = WorldState::new(&level, Progress::default(), &settings);

        let goals = world.pickups.iter().filter(|p| p.kind == PickupKind::Goal).count();
        prop_assert_eq!(goals, 1);
        prop_assert!(!world.enemies.is_empty());
        prop_assert!(world.enemies.len() <= level.enemies.len());
        prop_assert_eq!(world.enemies[0].kind, level.enemies[0].kind);

        let blocks = world.solids.iter().filter(|t| t.breakable.is_some()).count();
        prop_assert_eq!(blocks, level.breakables.len());
    }
}
