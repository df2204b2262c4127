use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use side_scroller::consts::ENEMY_SENTINEL;
use side_scroller::platform::{Clock, HeadlessPlatform, InputState};
use side_scroller::sim::{
    EnemyKind, EnemyWave, GameEvent, GameState, Rect, TickInput, WaveSpec, tick,
};
use side_scroller::{App, GameError, Settings, TimeSource, sim_time_ms};

const SHIP: IVec2 = IVec2::new(64, 32);

fn seeded(seed: u64) -> Settings {
    Settings {
        seed: Some(seed),
        ..Settings::default()
    }
}

fn run_ticks(state: &mut GameState, input: TickInput, ticks: u64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        let now_ms = sim_time_ms(state.time_ticks + 1, 60);
        tick(state, &input, now_ms);
        events.extend(state.drain_events());
    }
    events
}

#[test]
fn wave_leaves_the_screen() {
    let spec = WaveSpec::for_kind(EnemyKind::Circle);
    let mut rng = Pcg32::seed_from_u64(3);
    let mut wave = EnemyWave::spawn(1, &spec, &mut rng);
    let bounds = Rect::from_size(IVec2::new(1080, 600)).expanded(200);

    assert_eq!(wave.len(), 10);
    for &p in wave.positions() {
        assert!((1080..1200).contains(&p.x), "{p}");
        assert!((200..400).contains(&p.y), "{p}");
    }
    assert!(wave.on_screen(&bounds));

    for _ in 0..700 {
        wave.update();
    }
    assert!(!wave.on_screen(&bounds));
}

#[test]
fn off_screen_waves_are_flushed_on_cadence() {
    let mut state = GameState::new(&seeded(11), SHIP);
    let events = run_ticks(&mut state, TickInput::default(), 600);

    let spawned = events
        .iter()
        .filter(|e| matches!(e, GameEvent::WaveSpawned { .. }))
        .count();
    assert_eq!(spawned, 10);
    // The first flush is at 10 s; nothing has been removed yet
    assert!(!events.iter().any(|e| matches!(e, GameEvent::WavesFlushed { .. })));

    let events = run_ticks(&mut state, TickInput::default(), 600);
    let removed: usize = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WavesFlushed { removed, .. } => Some(*removed),
            _ => None,
        })
        .sum();
    assert!(removed > 0);

    let bounds = state.flush_bounds();
    for wave in &state.waves {
        // Survivors are either on screen or spawned after the last flush
        assert!(wave.on_screen(&bounds) || wave.id > 10);
    }
}

#[test]
fn dead_enemy_is_killed_once() {
    let mut state = GameState::new(&seeded(5), SHIP);
    let kind = EnemyKind::Circle;
    state.waves.push(EnemyWave::from_instances(
        99,
        kind,
        kind.default_hitbox(),
        1,
        [(IVec2::new(100, 0), IVec2::ZERO)],
    ));

    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    // Keep firing well past the first hit
    let events = run_ticks(&mut state, fire, 30);

    let kills: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { wave_id: 99, .. }))
        .collect();
    assert_eq!(kills.len(), 1);
    assert_eq!(
        kills[0],
        &GameEvent::EnemyKilled {
            wave_id: 99,
            index: 0,
            position: IVec2::new(100, 0),
        }
    );

    let wave = state.waves.iter().find(|w| w.id == 99).unwrap();
    assert!(wave.is_dead(0));
    assert_eq!(wave.positions()[0], ENEMY_SENTINEL);
    assert_eq!(wave.death_position(0), Some(IVec2::new(100, 0)));
    assert!(wave.death_frame(0) > 0);
}

#[test]
fn same_seed_same_run() {
    let inputs = [
        TickInput {
            fire: true,
            down: true,
            ..Default::default()
        },
        TickInput {
            fire: true,
            right: true,
            ..Default::default()
        },
        TickInput::default(),
    ];

    let mut a = GameState::new(&seeded(1234), SHIP);
    let mut b = GameState::new(&seeded(1234), SHIP);
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();

    for i in 0..900u64 {
        let input = inputs[(i / 40) as usize % inputs.len()];
        events_a.extend(run_ticks(&mut a, input, 1));
        events_b.extend(run_ticks(&mut b, input, 1));
    }

    assert_eq!(events_a, events_b);
    assert_eq!(a.player.position, b.player.position);
    assert_eq!(a.bullets.positions(), b.bullets.positions());
    assert_eq!(a.waves.len(), b.waves.len());
    for (wa, wb) in a.waves.iter().zip(&b.waves) {
        assert_eq!(wa.positions(), wb.positions());
        assert_eq!(wa.health(), wb.health());
    }
}

#[test]
fn headless_run_until_quit() {
    let settings = seeded(77);
    let script = (0..120).map(|i| InputState {
        fire: true,
        down: i < 60,
        right: i >= 60,
        ..Default::default()
    });
    let platform = HeadlessPlatform::new()
        .with_assets(&settings.assets)
        .with_inputs(script);

    let mut app = App::new(platform, settings);
    let stats = app.execute().unwrap();

    // The quitting poll still completes its tick
    assert_eq!(stats.ticks, 121);
    assert_eq!(stats.waves_spawned, 2);
    assert!(stats.shots > 1);

    let platform = app.platform();
    assert!(platform.torn_down);
    assert_eq!(platform.polls, 121);
    assert_eq!(platform.frames_presented, 121);
    assert_eq!(platform.arena, Some(IVec2::new(1080, 600)));

    let state = app.state().unwrap();
    assert_eq!(state.time_ticks, 121);
    assert!(state.player.position.x > 0);
    assert!(state.player.position.y > 0);
}

#[test]
fn wall_clock_cadence_follows_platform_clock() {
    // The headless clock advances 16 ms per frame, slower than 1000/60
    let run = |time_source| {
        let settings = Settings {
            time_source,
            ..seeded(9)
        };
        let platform = HeadlessPlatform::new()
            .with_assets(&settings.assets)
            .with_inputs(vec![InputState::default(); 125]);
        let mut app = App::new(platform, settings);
        let stats = app.execute().unwrap();
        (stats, app.platform().now_millis())
    };

    let (simulated, _) = run(TimeSource::Simulated);
    assert_eq!(simulated.ticks, 126);
    // Ticks 60 and 120
    assert_eq!(simulated.waves_spawned, 2);

    let (wall, clock_ms) = run(TimeSource::WallClock);
    assert_eq!(wall.ticks, 126);
    assert_eq!(clock_ms, 126 * 16);
    // Frame 63 reads 1008 ms; the second wave would need frame 126
    assert_eq!(wall.waves_spawned, 1);
}

#[test]
fn missing_asset_still_tears_down() {
    let settings = seeded(1);
    let platform = HeadlessPlatform::new().with_image(settings.assets.ship.clone(), SHIP);

    let mut app = App::new(platform, settings);
    let err = app.execute().unwrap_err();

    match err {
        GameError::Load(load) => {
            assert_eq!(load.path(), std::path::Path::new("graphics/bullet.png"));
        }
        other => panic!("expected a load error, got {other:?}"),
    }
    assert!(app.platform().torn_down);
    assert_eq!(app.platform().frames_presented, 0);
    assert!(app.state().is_none());
}

#[test]
fn invalid_settings_are_rejected_before_init() {
    let mut settings = seeded(1);
    settings.bullets.capacity = 0;
    let platform = HeadlessPlatform::new().with_assets(&settings.assets);

    let mut app = App::new(platform, settings);
    assert!(matches!(app.execute(), Err(GameError::Config(_))));
    assert_eq!(app.platform().arena, None);
    assert!(app.platform().torn_down);
}
