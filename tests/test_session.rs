use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use term_arcade::session::{Control, Game, Phase, Session, StepReport, Terminal};
use term_arcade::store::{MemStore, ScoreStore};

/// Scores one point per step and loses on a preset step count. Counts
/// resets and buffered inputs so tests can observe the session's wiring.
struct ScriptedGame {
    steps: u32,
    end_at: u32,
    rate: Option<f32>,
    resets: u32,
    inputs: u32,
}

impl ScriptedGame {
    fn ending_at(end_at: u32) -> Self {
        ScriptedGame { steps: 0, end_at, rate: None, resets: 0, inputs: 0 }
    }

    fn throttled(end_at: u32, rate: f32) -> Self {
        ScriptedGame { rate: Some(rate), ..ScriptedGame::ending_at(end_at) }
    }
}

impl Game for ScriptedGame {
    fn reset<R: Rng>(&mut self, _rng: &mut R) {
        self.steps = 0;
        self.resets += 1;
    }

    fn buffer_input(&mut self, _control: Control) {
        self.inputs += 1;
    }

    fn step_rate(&self, _score: u32) -> Option<f32> {
        self.rate
    }

    fn step<R: Rng>(&mut self, _score: u32, _rng: &mut R) -> StepReport {
        self.steps += 1;
        if self.steps >= self.end_at {
            StepReport { scored: 1, terminal: Some(Terminal::Loss) }
        } else {
            StepReport::running(1)
        }
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn store_with(key: &str, value: u32) -> MemStore {
    let mut store = MemStore::new();
    store.set(key, value);
    store
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[test]
fn new_session_is_idle_with_stored_high_score() {
    let session = Session::new(ScriptedGame::ending_at(10), store_with("k", 7), "k");
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.score(), 0);
    assert_eq!(session.high_score(), 7);
    assert_eq!(session.outcome(), None);
}

#[test]
fn missing_high_score_defaults_to_zero() {
    let session = Session::new(ScriptedGame::ending_at(10), MemStore::new(), "k");
    assert_eq!(session.high_score(), 0);
}

#[test]
fn advance_is_a_noop_while_idle() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(1), MemStore::new(), "k");
    assert!(!session.advance(1.0, &mut rng));
    // No Idle → Over shortcut exists, even for a game that would end
    // on its first step.
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.ticks(), 0);
}

#[test]
fn start_resets_the_game_and_enters_running() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(10), MemStore::new(), "k");
    session.start(&mut rng);
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.game().resets, 1);
}

#[test]
fn start_while_running_is_ignored() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(10), MemStore::new(), "k");
    session.start(&mut rng);
    session.advance(0.0, &mut rng);
    session.start(&mut rng);
    assert_eq!(session.game().resets, 1);
    assert_eq!(session.score(), 1);
}

#[test]
fn terminal_step_enters_over_and_halts_the_clock() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(3), MemStore::new(), "k");
    session.start(&mut rng);
    for _ in 0..3 {
        assert!(session.advance(0.0, &mut rng));
    }
    assert_eq!(session.phase(), Phase::Over);
    assert_eq!(session.outcome(), Some(Terminal::Loss));
    // Over accepts only restart: further advances are no-ops.
    assert!(!session.advance(0.0, &mut rng));
    assert_eq!(session.ticks(), 3);
}

#[test]
fn restart_resets_score_and_ticks() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(2), MemStore::new(), "k");
    session.start(&mut rng);
    while session.phase() == Phase::Running {
        session.advance(0.0, &mut rng);
    }
    assert_eq!(session.score(), 2);

    session.start(&mut rng);
    assert_eq!(session.phase(), Phase::Running);
    assert_eq!(session.score(), 0);
    assert_eq!(session.ticks(), 0);
    assert_eq!(session.outcome(), None);
    assert_eq!(session.game().resets, 2);
}

#[test]
fn input_is_forwarded_only_while_running() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(1), MemStore::new(), "k");
    session.buffer_input(Control::Action);
    assert_eq!(session.game().inputs, 0);

    session.start(&mut rng);
    session.buffer_input(Control::Action);
    assert_eq!(session.game().inputs, 1);

    session.advance(0.0, &mut rng); // ends the run
    session.buffer_input(Control::Action);
    assert_eq!(session.game().inputs, 1);
}

// ── Scoring & persistence ─────────────────────────────────────────────────────

#[test]
fn score_is_monotonic_within_a_run() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(20), MemStore::new(), "k");
    session.start(&mut rng);
    let mut previous = session.score();
    while session.phase() == Phase::Running {
        session.advance(0.0, &mut rng);
        assert!(session.score() >= previous);
        previous = session.score();
    }
}

#[test]
fn high_score_written_when_beaten() {
    let mut rng = seeded_rng();
    let mut session =
        Session::new(ScriptedGame::ending_at(5), store_with("k", 3), "k");
    session.start(&mut rng);
    while session.phase() == Phase::Running {
        session.advance(0.0, &mut rng);
    }
    assert_eq!(session.score(), 5);
    assert_eq!(session.high_score(), 5);
    assert_eq!(session.store().get("k"), Some(5));
}

#[test]
fn high_score_untouched_when_not_beaten() {
    let mut rng = seeded_rng();
    let mut session =
        Session::new(ScriptedGame::ending_at(2), store_with("k", 9), "k");
    session.start(&mut rng);
    while session.phase() == Phase::Running {
        session.advance(0.0, &mut rng);
    }
    assert_eq!(session.score(), 2);
    // Never decreased, not even rewritten with the same value.
    assert_eq!(session.high_score(), 9);
    assert_eq!(session.store().get("k"), Some(9));
}

#[test]
fn equal_score_does_not_rewrite_the_store() {
    let mut rng = seeded_rng();
    let mut session =
        Session::new(ScriptedGame::ending_at(4), store_with("k", 4), "k");
    session.start(&mut rng);
    while session.phase() == Phase::Running {
        session.advance(0.0, &mut rng);
    }
    assert_eq!(session.high_score(), 4);
    assert_eq!(session.store().get("k"), Some(4));
}

// ── Throttling ────────────────────────────────────────────────────────────────

#[test]
fn throttled_game_waits_for_a_full_period() {
    let mut rng = seeded_rng();
    // 2 moves per second → one step per 0.5 s of accumulated time.
    let mut session =
        Session::new(ScriptedGame::throttled(100, 2.0), MemStore::new(), "k");
    session.start(&mut rng);

    assert!(!session.advance(0.3, &mut rng));
    assert_eq!(session.ticks(), 0);
    assert!(session.advance(0.3, &mut rng)); // 0.6 banked ≥ 0.5
    assert_eq!(session.ticks(), 1);

    // The remainder is discarded, not banked.
    assert!(!session.advance(0.4, &mut rng));
    assert!(session.advance(0.2, &mut rng));
    assert_eq!(session.ticks(), 2);
}

#[test]
fn unthrottled_game_steps_every_advance() {
    let mut rng = seeded_rng();
    let mut session = Session::new(ScriptedGame::ending_at(100), MemStore::new(), "k");
    session.start(&mut rng);
    for expected in 1..=10 {
        assert!(session.advance(0.0, &mut rng));
        assert_eq!(session.ticks(), expected);
    }
}
