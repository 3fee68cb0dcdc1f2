use deep_delve::GameRng;
use deep_delve::combat::{Terrain, VisionSystem};
use deep_delve::dungeon::{Level, LevelDirector};
use proptest::prelude::*;

const WIDTH: i32 = 80;
const HEIGHT: i32 = 50;

fn generate(seed: u64, depth: u32) -> Level {
    let mut rng = GameRng::new(seed);
    LevelDirector::generate_level(WIDTH, HEIGHT, depth, &mut rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_level_has_a_way_down(seed in any::<u64>(), depth in 1u32..60) {
        let level = generate(seed, depth);
        prop_assert!(level.has_exit());
        let (x, y) = level.stairs_down.unwrap();
        prop_assert!(level.grid.is_walkable(x, y));
        prop_assert_eq!(level.depth, depth);
    }

    #[test]
    fn exits_follow_depth_rules(seed in any::<u64>(), depth in 1u32..60) {
        let level = generate(seed, depth);
        prop_assert_eq!(level.stairs_up.is_some(), depth > 1);

        let portal_depth = depth >= 5 && depth % 5 == 0;
        prop_assert_eq!(level.portal.is_some(), portal_depth && level.rooms.len() >= 3);
        for exit in [level.stairs_up, level.portal].into_iter().flatten() {
            prop_assert!(level.grid.is_walkable(exit.0, exit.1));
        }
    }

    #[test]
    fn entities_stand_on_floor(seed in any::<u64>(), depth in 1u32..60) {
        let level = generate(seed, depth);
        for enemy in &level.enemies {
            let (x, y) = enemy.position();
            prop_assert!(level.grid.is_walkable(x, y), "{} at ({x}, {y})", enemy.name);
            prop_assert!(enemy.body.hp > 0);
        }
        for item in &level.items {
            prop_assert!(level.grid.is_walkable(item.x, item.y), "{} at {:?}", item.name, item.position());
        }
    }

    #[test]
    fn visible_tiles_have_clear_sight_lines(seed in any::<u64>(), depth in 1u32..30) {
        let mut level = generate(seed, depth);
        let origin = level.spawn_point();
        let seen = level.grid.compute_field_of_view(origin, 8);
        prop_assert!(seen >= 1);
        prop_assert!(level.grid.is_visible(origin.0, origin.1));

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if !level.grid.is_visible(x, y) {
                    continue;
                }
                prop_assert!(level.grid.is_explored(x, y));
                prop_assert!(VisionSystem::within_radius(origin, (x, y), 8));
                let line = VisionSystem::line(origin, (x, y));
                let interior = line.len().saturating_sub(1);
                for &(lx, ly) in line.iter().take(interior).skip(1) {
                    prop_assert!(level.grid.is_transparent(lx, ly));
                }
            }
        }
    }
}

#[test]
fn generation_is_reproducible_from_a_seed() {
    for depth in [1, 5, 10, 14, 30] {
        assert_eq!(generate(404, depth), generate(404, depth));
    }
}

#[test]
fn boss_depths_get_promoted_guards() {
    let guarded = (0..20u64)
        .map(|seed| generate(seed, 10))
        .filter(|level| level.enemies.iter().any(|e| e.name.starts_with("Boss ")))
        .count();
    assert!(guarded > 0);
    // 非首领层不会出现首领
    assert!(
        (0..20u64).all(|seed| generate(seed, 9).enemies.iter().all(|e| !e.name.starts_with("Boss ")))
    );
}
