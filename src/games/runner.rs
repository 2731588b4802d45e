/// Side-scrolling obstacle runner.
///
/// Continuous 450×450 logical space. The player sits at a fixed x and only
/// moves vertically under gravity; obstacles drift left at the
/// score-scaled speed and score one point each when they leave the field.

use rand::Rng;

use crate::session::{Control, Game, StepReport, Terminal};

pub const VIEW_W: f32 = 450.0;
pub const VIEW_H: f32 = 450.0;
pub const GROUND_Y: f32 = 300.0;
pub const PLAYER_X: f32 = 80.0;
pub const PLAYER_SIZE: f32 = 30.0;

const GRAVITY: f32 = 0.3;
const JUMP_IMPULSE: f32 = -9.0;
const OBSTACLE_W: f32 = 20.0;
const OBSTACLE_MIN_H: f32 = 20.0;
const OBSTACLE_MAX_H: f32 = 50.0;
const BASE_SPEED: f32 = 5.0;
const SPEED_PER_POINT: f32 = 0.05;
const MAX_SPEED: f32 = 25.0;
const BASE_SPAWN_INTERVAL: f32 = 100.0;
const SPAWN_INTERVAL_PER_SPEED: f32 = 1.5;
const MIN_SPAWN_INTERVAL: u64 = 40;

/// Horizontal drift per tick. Non-decreasing in `score`, capped.
pub fn speed_for(score: u32) -> f32 {
    (BASE_SPEED + SPEED_PER_POINT * score as f32).min(MAX_SPEED)
}

/// Ticks between obstacle spawns. Non-increasing in `speed`, floored so
/// gaps never shrink below one jump arc.
pub fn spawn_interval(speed: f32) -> u64 {
    let interval = (BASE_SPAWN_INTERVAL - SPAWN_INTERVAL_PER_SPEED * speed).floor() as i64;
    (interval.max(0) as u64).max(MIN_SPAWN_INTERVAL)
}

#[derive(Clone, Copy, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub dy: f32,
    pub grounded: bool,
}

impl Player {
    fn spawn() -> Self {
        Player {
            x: PLAYER_X,
            y: GROUND_Y - PLAYER_SIZE,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            dy: 0.0,
            grounded: false,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Scored once, never rescored.
    pub passed: bool,
}

pub struct RunnerGame {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub jump_queued: bool,
    pub frame: u64,
}

impl RunnerGame {
    pub fn new() -> Self {
        RunnerGame {
            player: Player::spawn(),
            obstacles: Vec::new(),
            jump_queued: false,
            frame: 0,
        }
    }

    fn spawn_obstacle<R: Rng>(&mut self, rng: &mut R) {
        let h = rng.gen_range(OBSTACLE_MIN_H..OBSTACLE_MAX_H);
        self.obstacles.push(Obstacle {
            x: VIEW_W,
            y: GROUND_Y - h,
            w: OBSTACLE_W,
            h,
            passed: false,
        });
    }
}

impl Default for RunnerGame {
    fn default() -> Self {
        RunnerGame::new()
    }
}

fn overlaps(player: &Player, obs: &Obstacle) -> bool {
    player.x < obs.x + obs.w
        && player.x + player.w > obs.x
        && player.y < obs.y + obs.h
        && player.y + player.h > obs.y
}

impl Game for RunnerGame {
    fn reset<R: Rng>(&mut self, _rng: &mut R) {
        *self = RunnerGame::new();
    }

    fn buffer_input(&mut self, control: Control) {
        if control == Control::Action {
            self.jump_queued = true;
        }
    }

    fn step_rate(&self, _score: u32) -> Option<f32> {
        None
    }

    fn step<R: Rng>(&mut self, score: u32, rng: &mut R) -> StepReport {
        self.frame += 1;
        let speed = speed_for(score);

        // A jump buffered while airborne is dropped, not held.
        if self.jump_queued {
            if self.player.grounded {
                self.player.dy = JUMP_IMPULSE;
                self.player.grounded = false;
            }
            self.jump_queued = false;
        }

        self.player.dy += GRAVITY;
        self.player.y += self.player.dy;
        if self.player.y + self.player.h > GROUND_Y {
            self.player.y = GROUND_Y - self.player.h;
            self.player.dy = 0.0;
            self.player.grounded = true;
        } else {
            self.player.grounded = false;
        }

        if self.frame % spawn_interval(speed) == 0 {
            self.spawn_obstacle(rng);
        }

        // Move, collide, then retire off-screen obstacles. The collision
        // test runs before pass-out removal so a same-tick overlap at the
        // left edge still ends the run.
        let player = self.player;
        let mut scored = 0;
        let mut collided = false;
        self.obstacles.retain_mut(|obs| {
            obs.x -= speed;
            if overlaps(&player, obs) {
                collided = true;
            }
            if obs.x + obs.w < 0.0 {
                if !obs.passed {
                    obs.passed = true;
                    scored += 1;
                }
                return false;
            }
            true
        });

        if collided {
            return StepReport::ended(Terminal::Loss);
        }
        StepReport::running(scored)
    }
}
