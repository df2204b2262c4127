use glam::IVec2;
use proptest::prelude::*;

use side_scroller::consts::BULLET_SENTINEL;
use side_scroller::sim::{BulletPool, EnemyKind, EnemyWave, Hitbox, Player, Rect, detect};

fn bullet_hitbox() -> Hitbox {
    Hitbox::new(IVec2::new(0, 0), IVec2::new(24, 8))
}

fn enemy_hitbox() -> Hitbox {
    EnemyKind::Circle.default_hitbox()
}

fn arena() -> Rect {
    Rect::from_size(IVec2::new(1080, 600))
}

/// Rectangles overlap with a positive area (touching edges do not count)
fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Left,
    Right,
    Up,
    Down,
}

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Left),
        Just(Move::Right),
        Just(Move::Up),
        Just(Move::Down),
    ]
}

proptest! {
    #[test]
    fn ring_overwrites_only_the_oldest(capacity in 1usize..32) {
        let mut pool = BulletPool::new(capacity, IVec2::new(12, 0), bullet_hitbox());
        for i in 0..=capacity as i32 {
            pool.add(IVec2::new(i, 0));
        }

        // Slot 0 held the first bullet and now holds the (N+1)th
        prop_assert_eq!(pool.positions()[0], IVec2::new(capacity as i32, 0));
        for slot in 1..capacity {
            prop_assert_eq!(pool.positions()[slot], IVec2::new(slot as i32, 0));
        }
        prop_assert!(pool.positions().iter().all(|&p| p != BULLET_SENTINEL));
    }

    #[test]
    fn player_stays_inside_arena(
        x in 0i32..=1016,
        y in 0i32..=568,
        speed in 1i32..40,
        moves in prop::collection::vec(any_move(), 1..200),
    ) {
        let shape = IVec2::new(64, 32);
        let mut player = Player::new(IVec2::new(x, y), shape, arena(), speed, 150);
        let bounds = player.movement_bounds();

        for m in moves {
            match m {
                Move::Left => player.move_left(),
                Move::Right => player.move_right(),
                Move::Up => player.move_up(),
                Move::Down => player.move_down(),
            }
            prop_assert!(bounds.contains(player.position), "{:?} left {:?}", player.position, bounds);
        }
    }

    #[test]
    fn shot_cooldown(first in 0u64..100_000, gap in 0u64..400, delay in 1u64..300) {
        let mut player = Player::new(IVec2::new(100, 100), IVec2::new(64, 32), arena(), 3, delay);
        let mut pool = BulletPool::new(8, IVec2::new(12, 0), bullet_hitbox());

        prop_assert!(player.shoot(&mut pool, first));
        let second = player.shoot(&mut pool, first + gap);
        prop_assert_eq!(second, gap > delay);

        let fired = pool.positions().iter().filter(|&&p| p != BULLET_SENTINEL).count();
        prop_assert_eq!(fired, if gap > delay { 2 } else { 1 });
    }

    #[test]
    fn detect_agrees_with_rect_overlap(
        enemy in (-300i32..1300, -300i32..900),
        offset in (-80i32..80, -80i32..80),
    ) {
        let enemy_pos = IVec2::new(enemy.0, enemy.1);
        let bullet_pos = enemy_pos + IVec2::new(offset.0, offset.1);

        let mut pool = BulletPool::new(2, IVec2::new(12, 0), bullet_hitbox());
        pool.add(bullet_pos);
        let wave = EnemyWave::from_instances(
            0,
            EnemyKind::Circle,
            enemy_hitbox(),
            1,
            [(enemy_pos, IVec2::ZERO)],
        );

        let expected = rects_overlap(bullet_hitbox().at(bullet_pos), enemy_hitbox().at(enemy_pos));
        let hits = detect(&pool, &wave);

        // Enemy and bullet flags always agree for a single pair
        prop_assert_eq!(hits.enemies[0], expected);
        prop_assert_eq!(hits.bullets[0], expected);
        prop_assert!(!hits.bullets[1]);
    }

    #[test]
    fn separated_pairs_never_collide(
        enemy in (0i32..1080, 0i32..600),
        gap in 0i32..500,
        horizontal in any::<bool>(),
    ) {
        let enemy_pos = IVec2::new(enemy.0, enemy.1);
        let (low, high) = enemy_hitbox().overlap_window(&bullet_hitbox());
        // Step past the window on one axis, keep the other axis centred
        let offset = if horizontal {
            IVec2::new(high.x + gap, (low.y + high.y) / 2)
        } else {
            IVec2::new((low.x + high.x) / 2, low.y - gap)
        };

        let mut pool = BulletPool::new(1, IVec2::ZERO, bullet_hitbox());
        pool.add(enemy_pos + offset);
        let wave = EnemyWave::from_instances(
            0,
            EnemyKind::Circle,
            enemy_hitbox(),
            1,
            [(enemy_pos, IVec2::ZERO)],
        );

        let hits = detect(&pool, &wave);
        prop_assert!(!hits.enemies[0]);
        prop_assert!(!hits.bullets[0]);
    }
}
