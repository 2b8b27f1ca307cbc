use damsel_rescue::config::GameConfig;
use damsel_rescue::entities::*;
use damsel_rescue::game::*;
use damsel_rescue::input::Command;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn new_game() -> Game<StdRng> {
    Game::new(GameConfig::default(), StdRng::seed_from_u64(42))
}

fn running_game() -> Game<StdRng> {
    let mut game = new_game();
    game.handle(Command::Confirm);
    game
}

/// Park the player right in front of an enemy so the next tick fails the round.
fn doom_player(game: &mut Game<StdRng>) {
    let world = game.world_mut().unwrap();
    world.enemies[0].x = world.player.x - 40.0;
    world.enemies[0].y = world.player.y;
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn game_keeps_its_config() {
    let config = GameConfig { enemy_count: 2, frame_ms: 20, ..GameConfig::default() };
    let mut game = Game::new(config.clone(), StdRng::seed_from_u64(1));
    assert_eq!(game.config(), &config);
    assert_eq!(game.config().frame_duration().as_millis(), 20);

    game.handle(Command::Confirm);
    assert_eq!(game.world().unwrap().enemies.len(), 2);
}

#[test]
fn oversized_rock_count_still_starts_a_round() {
    let config = GameConfig { rock_count: 40, ..GameConfig::default() };
    let mut game = Game::new(config, StdRng::seed_from_u64(5));
    game.handle(Command::Confirm);
    assert_eq!(game.status(), GameStatus::Running);
    assert!(game.world().unwrap().key.is_some());
}

#[test]
fn starts_in_menu_with_start_prompt() {
    let game = new_game();
    assert_eq!(game.status(), GameStatus::Menu);
    assert_eq!(game.prompt(), Some(Prompt::Start));
    assert!(game.world().is_none());
    assert!(matches!(game.screen(), Screen::Menu));
}

#[test]
fn menu_ignores_moves_and_frames() {
    let mut game = new_game();
    game.handle(Command::Move(Direction::Up));
    game.frame(0.5);
    assert_eq!(game.status(), GameStatus::Menu);
    assert!(game.world().is_none());
}

#[test]
fn confirm_builds_level_and_runs() {
    let game = running_game();
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.prompt(), None);
    assert_eq!(game.stats().rounds, 1);
    let world = game.world().unwrap();
    assert_eq!(world.enemies.len(), 5);
    assert!(matches!(game.screen(), Screen::World(_)));
}

#[test]
fn start_prompt_is_one_shot() {
    let mut game = running_game();
    game.handle(Command::Confirm);
    game.handle(Command::Confirm);
    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.stats().rounds, 1);
}

// ── Running ───────────────────────────────────────────────────────────────────

#[test]
fn moves_apply_immediately_while_running() {
    let mut game = running_game();
    game.handle(Command::Move(Direction::Left));
    let player = &game.world().unwrap().player;
    assert_eq!((player.x, player.y), (202.0, 456.0));
}

#[test]
fn frames_advance_enemies() {
    let mut game = running_game();
    game.frame(0.1);
    let world = game.world().unwrap();
    assert!(world.enemies.iter().all(|e| e.x > -101.0));
}

// ── Failure & reset ───────────────────────────────────────────────────────────

#[test]
fn enemy_contact_ends_round_in_failure() {
    let mut game = running_game();
    doom_player(&mut game);
    game.frame(0.0);
    assert_eq!(game.status(), GameStatus::Failure);
    assert_eq!(game.stats().failures, 1);
}

#[test]
fn end_screen_is_deferred_by_one_frame() {
    let mut game = running_game();
    doom_player(&mut game);
    game.frame(0.0);

    // Final frame still shows the world and nothing listens for Enter yet
    assert!(matches!(game.screen(), Screen::World(_)));
    assert_eq!(game.prompt(), None);
    game.handle(Command::Confirm);
    assert_eq!(game.status(), GameStatus::Failure);

    game.frame(0.016);
    assert_eq!(game.prompt(), Some(Prompt::Restart));
    match game.screen() {
        Screen::Ended { outcome, stats } => {
            assert_eq!(outcome, Outcome::Failure);
            assert_eq!(stats.failures, 1);
        }
        other => panic!("expected end screen, got {other:?}"),
    }
}

#[test]
fn world_is_frozen_after_failure() {
    let mut game = running_game();
    doom_player(&mut game);
    game.frame(0.0);
    game.frame(0.0);

    let before: Vec<f32> = game.world().unwrap().enemies.iter().map(|e| e.x).collect();
    let player_before = game.world().unwrap().player.x;

    game.frame(1.0);
    game.frame(1.0);
    game.handle(Command::Move(Direction::Right));

    let world = game.world().unwrap();
    let after: Vec<f32> = world.enemies.iter().map(|e| e.x).collect();
    assert_eq!(before, after);
    assert_eq!(world.player.x, player_before);
}

#[test]
fn restart_rebuilds_full_level() {
    let mut game = running_game();
    {
        let world = game.world_mut().unwrap();
        world.key = None;
        world.enemies.truncate(1);
    }
    doom_player(&mut game);
    game.frame(0.0);
    game.frame(0.0);
    game.handle(Command::Confirm);

    assert_eq!(game.status(), GameStatus::Running);
    assert_eq!(game.stats().rounds, 2);
    let world = game.world().unwrap();
    assert_eq!(world.enemies.len(), 5);
    assert!(world.enemies.iter().all(|e| e.x == -101.0));
    assert_eq!(world.obstacles.len(), 15);
    assert_eq!(world.collision_boxes.len(), 16);
    assert!(world.key.is_some());
    assert_eq!(world.gate.as_ref().map(|g| g.state), Some(GateState::Closed));
    assert_eq!((world.player.x, world.player.y), (303.0, 456.0));
    assert!(!world.player.has_key);
}

#[test]
fn restart_prompt_is_one_shot() {
    let mut game = running_game();
    doom_player(&mut game);
    game.frame(0.0);
    game.frame(0.0);
    game.handle(Command::Confirm);
    game.handle(Command::Confirm);
    assert_eq!(game.stats().rounds, 2);
    assert_eq!(game.prompt(), None);
}

// ── Full rescue ───────────────────────────────────────────────────────────────

#[test]
fn key_gate_damsel_rescue() {
    let mut game = running_game();

    // The closed gate blocks the way north
    {
        let world = game.world_mut().unwrap();
        world.player.y = 132.0;
    }
    game.handle(Command::Move(Direction::Up));
    assert_eq!(game.world().unwrap().player.y, 132.0);

    // Fetch the key (enemies are still parked off-screen at dt = 0)
    {
        let world = game.world_mut().unwrap();
        let key = world.key.clone().unwrap();
        world.player.x = key.x;
        world.player.y = key.y;
    }
    game.frame(0.0);
    {
        let world = game.world().unwrap();
        assert!(world.key.is_none());
        assert!(world.player.has_key);
        assert_eq!(world.indicator.status, IndicatorStatus::On);
    }

    // Bring it to the gate
    {
        let world = game.world_mut().unwrap();
        world.player.x = 303.0;
        world.player.y = 132.0;
    }
    game.frame(0.0);
    {
        let world = game.world().unwrap();
        assert_eq!(world.gate.as_ref().map(|g| g.state), Some(GateState::Open));
        assert!(!world.player.has_key);
        assert_eq!(world.indicator.status, IndicatorStatus::Off);
    }

    // Walk through and reach the damsel
    game.handle(Command::Move(Direction::Up));
    game.handle(Command::Move(Direction::Up));
    assert_eq!(game.world().unwrap().player.y, -30.0);
    game.frame(0.0);

    assert_eq!(game.status(), GameStatus::Success);
    assert_eq!(game.stats().successes, 1);
    game.frame(0.0);
    assert!(matches!(
        game.screen(),
        Screen::Ended { outcome: Outcome::Success, .. }
    ));
}
