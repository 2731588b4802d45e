use rand::rngs::StdRng;
use rand::SeedableRng;

use term_arcade::games::runner::{
    spawn_interval, speed_for, Obstacle, RunnerGame, GROUND_Y, PLAYER_SIZE, VIEW_W,
};
use term_arcade::session::{Control, Game, Terminal};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A grounded game with no obstacles in play.
fn grounded_game() -> RunnerGame {
    let mut game = RunnerGame::new();
    let mut rng = seeded_rng();
    // First step settles the player onto the ground line.
    game.step(0, &mut rng);
    assert!(game.player.grounded);
    game
}

fn obstacle_at(x: f32) -> Obstacle {
    Obstacle { x, y: GROUND_Y - 30.0, w: 20.0, h: 30.0, passed: false }
}

// ── Speed & spawn curves ──────────────────────────────────────────────────────

#[test]
fn speed_starts_at_base() {
    assert_eq!(speed_for(0), 5.0);
}

#[test]
fn speed_is_non_decreasing_and_capped() {
    let mut previous = speed_for(0);
    for score in 1..2000 {
        let speed = speed_for(score);
        assert!(speed >= previous);
        assert!(speed <= 25.0);
        previous = speed;
    }
    assert_eq!(speed_for(1000), 25.0);
}

#[test]
fn spawn_interval_is_non_increasing_and_floored() {
    assert_eq!(spawn_interval(5.0), 92);
    let mut previous = spawn_interval(0.0);
    for tenths in 1..1000 {
        let interval = spawn_interval(tenths as f32 / 10.0);
        assert!(interval <= previous);
        assert!(interval >= 40);
        previous = interval;
    }
    assert_eq!(spawn_interval(100.0), 40);
}

// ── Jump physics ──────────────────────────────────────────────────────────────

#[test]
fn jump_is_accepted_only_when_grounded() {
    let mut game = grounded_game();
    let mut rng = seeded_rng();

    game.buffer_input(Control::Action);
    game.step(0, &mut rng);
    assert!(!game.player.grounded);
    assert!(game.player.dy < 0.0);

    // A second jump buffered mid-air does nothing: velocity keeps
    // accumulating gravity only.
    let dy_before = game.player.dy;
    game.buffer_input(Control::Action);
    game.step(0, &mut rng);
    assert!((game.player.dy - (dy_before + 0.3)).abs() < 1e-4);
}

#[test]
fn gravity_returns_the_player_to_the_ground() {
    let mut game = grounded_game();
    let mut rng = seeded_rng();

    game.buffer_input(Control::Action);
    game.step(0, &mut rng);
    let mut steps = 0;
    while !game.player.grounded {
        game.step(0, &mut rng);
        steps += 1;
        assert!(steps < 200, "player never landed");
    }
    assert_eq!(game.player.y, GROUND_Y - PLAYER_SIZE);
    assert_eq!(game.player.dy, 0.0);
}

#[test]
fn directional_input_is_ignored() {
    let mut game = grounded_game();
    assert!(!game.jump_queued);
    game.buffer_input(Control::Dir(term_arcade::session::Dir::Left));
    assert!(!game.jump_queued);
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[test]
fn obstacles_spawn_on_the_interval() {
    let mut game = RunnerGame::new();
    let mut rng = seeded_rng();

    // score 0 → speed 5 → interval 92
    for _ in 0..91 {
        game.step(0, &mut rng);
    }
    assert!(game.obstacles.is_empty());
    game.step(0, &mut rng);
    assert_eq!(game.obstacles.len(), 1);

    let obs = &game.obstacles[0];
    assert!(obs.h >= 20.0 && obs.h < 50.0);
    assert_eq!(obs.y, GROUND_Y - obs.h);
    // Spawned at the right edge, then drifted one tick's worth left.
    assert_eq!(obs.x, VIEW_W - 5.0);
    assert!(!obs.passed);
}

#[test]
fn passing_obstacle_scores_exactly_once_and_is_removed() {
    // Spec scenario: score 0 → speed 5; once the right edge crosses x=0
    // the obstacle scores one point and leaves the active set.
    let mut game = grounded_game();
    let mut rng = seeded_rng();
    game.obstacles.push(obstacle_at(3.0));

    let mut total = 0;
    for _ in 0..5 {
        let report = game.step(0, &mut rng);
        assert!(report.terminal.is_none());
        total += report.scored;
    }
    // x: 3 → -2 → -7 → -12 → -17 → -22; right edge < 0 on the last step.
    assert_eq!(total, 1);
    assert!(game.obstacles.is_empty());
}

#[test]
fn obstacle_overlap_ends_the_run() {
    let mut game = grounded_game();
    let mut rng = seeded_rng();
    // One tick of drift at speed 5 puts this square on the player.
    game.obstacles.push(obstacle_at(95.0));

    let report = game.step(0, &mut rng);
    assert_eq!(report.terminal, Some(Terminal::Loss));
    assert_eq!(report.scored, 0);
}

#[test]
fn airborne_player_clears_a_low_obstacle() {
    let mut game = grounded_game();
    let mut rng = seeded_rng();

    // Jump, rise for a while, then slide an obstacle underneath.
    game.buffer_input(Control::Action);
    for _ in 0..15 {
        game.step(0, &mut rng);
    }
    assert!(game.player.y + game.player.h < GROUND_Y - 50.0);

    game.obstacles.push(obstacle_at(game.player.x));
    let report = game.step(0, &mut rng);
    assert!(report.terminal.is_none());
}

#[test]
fn reset_discards_all_mutable_state() {
    let mut game = RunnerGame::new();
    let mut rng = seeded_rng();
    game.obstacles.push(obstacle_at(200.0));
    for _ in 0..10 {
        game.step(0, &mut rng);
    }

    game.reset(&mut rng);
    assert!(game.obstacles.is_empty());
    assert_eq!(game.frame, 0);
    assert_eq!(game.player.y, GROUND_Y - PLAYER_SIZE);
    assert_eq!(game.player.dy, 0.0);
    assert!(!game.jump_queued);
}
