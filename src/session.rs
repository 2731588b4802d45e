/// Session engine shared by all three games.
///
/// A [`Session`] owns one game instance plus everything that outlives the
/// entities between restarts: the lifecycle phase, the score pair and the
/// tick clock. The game itself is a strategy object behind the [`Game`]
/// trait; each variant supplies motion and collision rules, the session
/// supplies the control flow.

use rand::Rng;

use crate::store::ScoreStore;

// ── Input vocabulary ─────────────────────────────────────────────────────────

/// A grid/axis direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// One discrete input event, already decoded from the key map.
///
/// `Action` is the runner's jump; the grid games ignore it. Directions are
/// buffered by the game and consumed at its next step, never mid-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Dir(Dir),
    Action,
}

// ── Game strategy ────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Loss,
    Win,
}

/// What a single simulation step produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub scored: u32,
    pub terminal: Option<Terminal>,
}

impl StepReport {
    pub fn running(scored: u32) -> Self {
        StepReport { scored, terminal: None }
    }

    pub fn ended(terminal: Terminal) -> Self {
        StepReport { scored: 0, terminal: Some(terminal) }
    }
}

/// One game variant's movement, collision and spawn rules.
///
/// Implementations keep their entities internal and expose them as plain
/// fields for rendering and tests. Movement speed must be a pure,
/// non-decreasing function of `score`; the session passes in the
/// authoritative value each step.
pub trait Game {
    /// Discard all mutable entities and return to the start-of-run state.
    fn reset<R: Rng>(&mut self, rng: &mut R);

    /// Record a desired direction/action for the next step.
    fn buffer_input(&mut self, control: Control);

    /// Moves per second for throttled games; `None` steps on every frame.
    fn step_rate(&self, score: u32) -> Option<f32>;

    /// Advance one tick: input, motion, wrap, collisions, scoring/spawn.
    fn step<R: Rng>(&mut self, score: u32, rng: &mut R) -> StepReport;
}

// ── Session ──────────────────────────────────────────────────────────────────

/// Lifecycle phase. Created `Idle`; `start` enters `Running`; a terminal
/// collision enters `Over`; `start` from `Over` restarts. There is no other
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

pub struct Session<G: Game, S: ScoreStore> {
    game: G,
    store: S,
    key: &'static str,
    phase: Phase,
    score: u32,
    high_score: u32,
    outcome: Option<Terminal>,
    ticks: u64,
    // Elapsed time banked toward the next throttled step.
    carry: f32,
}

impl<G: Game, S: ScoreStore> Session<G, S> {
    /// The high score is loaded once here; a missing entry reads as 0.
    pub fn new(game: G, store: S, key: &'static str) -> Self {
        let high_score = store.get(key).unwrap_or(0);
        Session {
            game,
            store,
            key,
            phase: Phase::Idle,
            score: 0,
            high_score,
            outcome: None,
            ticks: 0,
            carry: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Set only while `Over`.
    pub fn outcome(&self) -> Option<Terminal> {
        self.outcome
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start from `Idle`, or restart from `Over` with a full entity reset.
    /// Ignored while `Running`.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        if self.phase == Phase::Running {
            return;
        }
        self.game.reset(rng);
        self.score = 0;
        self.outcome = None;
        self.ticks = 0;
        self.carry = 0.0;
        self.phase = Phase::Running;
    }

    /// Forward an input to the game. Only meaningful while `Running`; the
    /// driver turns inputs in other phases into `start` calls instead.
    pub fn buffer_input(&mut self, control: Control) {
        if self.phase == Phase::Running {
            self.game.buffer_input(control);
        }
    }

    /// One clock callback. Returns `true` when the simulation stepped and a
    /// render is due.
    ///
    /// Throttled games bank `dt` until a full step period has elapsed;
    /// short frames are no-ops that keep any buffered input. The remainder
    /// is discarded on each step, so the effective rate never overshoots.
    pub fn advance<R: Rng>(&mut self, dt: f32, rng: &mut R) -> bool {
        if self.phase != Phase::Running {
            return false;
        }

        if let Some(rate) = self.game.step_rate(self.score) {
            self.carry += dt;
            if self.carry < 1.0 / rate {
                return false;
            }
            self.carry = 0.0;
        }

        self.ticks += 1;
        let report = self.game.step(self.score, rng);
        self.score += report.scored;

        if let Some(terminal) = report.terminal {
            self.phase = Phase::Over;
            self.outcome = Some(terminal);
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store.set(self.key, self.high_score);
            }
        }
        true
    }
}
