/// Maze chase.
///
/// Player and ghosts hold fractional tile coordinates and glide between
/// cells at a fixed per-tick speed. Turns, wall checks and ghost AI run
/// only when an actor is centered on a tile; mid-cell turns would clip
/// through walls. Edge rows with open ends wrap horizontally.

use rand::Rng;

use crate::session::{Control, Dir, Game, StepReport, Terminal};

pub const PLAYER_SPEED: f32 = 0.09;
pub const GHOST_SPEED: f32 = 0.05;
pub const PELLET_SCORE: u32 = 10;

/// Within this distance of an integer tile an actor counts as centered.
/// Must stay above half the largest per-tick speed or centers get skipped.
const CENTER_EPS: f32 = 0.05;

/// Player–ghost distance (in tiles) below which the run is lost.
const CATCH_DIST: f32 = 0.8;

const PLAYER_SPAWN: (i32, i32) = (9, 15);

// '#' wall, '.' pellet, ' ' empty. Rows 7/9/11 are open at both edges and
// act as wrap-around tunnels.
const LAYOUT: [&str; 19] = [
    "###################",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.### # ###.####",
    "   #.#       #.#   ",
    "####.# ## ## #.####",
    " ....  #   #  .... ",
    "####.# ##### #.####",
    "   #.#       #.#   ",
    "####.# ##### #.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#..#..... .....#..#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "###################",
];

// ── Maze ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Wall,
    Pellet,
}

#[derive(Clone)]
pub struct Maze {
    cells: Vec<TileKind>,
    cols: i32,
    rows: i32,
    pellets: usize,
}

impl Maze {
    /// Parse an ascii layout: `#` wall, `.` pellet, anything else empty.
    /// All rows must be the same width.
    pub fn from_ascii(rows: &[&str]) -> Maze {
        let cols = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(rows.len() * cols);
        let mut pellets = 0;
        for row in rows {
            assert_eq!(row.chars().count(), cols, "ragged maze layout");
            for ch in row.chars() {
                cells.push(match ch {
                    '#' => TileKind::Wall,
                    '.' => {
                        pellets += 1;
                        TileKind::Pellet
                    }
                    _ => TileKind::Empty,
                });
            }
        }
        Maze {
            cells,
            cols: cols as i32,
            rows: rows.len() as i32,
            pellets,
        }
    }

    pub fn standard() -> Maze {
        Maze::from_ascii(&LAYOUT)
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets
    }

    /// Tile lookup with tunnel semantics: x wraps around the horizontal
    /// edges, anything past the top or bottom reads as wall.
    pub fn at(&self, x: i32, y: i32) -> TileKind {
        if y < 0 || y >= self.rows {
            return TileKind::Wall;
        }
        let x = x.rem_euclid(self.cols);
        self.cells[(y * self.cols + x) as usize]
    }

    /// Consume the pellet at a tile, if one is there. Walls never change.
    pub fn eat_pellet(&mut self, x: i32, y: i32) -> bool {
        if y < 0 || y >= self.rows {
            return false;
        }
        let x = x.rem_euclid(self.cols);
        let idx = (y * self.cols + x) as usize;
        if self.cells[idx] == TileKind::Pellet {
            self.cells[idx] = TileKind::Empty;
            self.pellets -= 1;
            return true;
        }
        false
    }
}

// ── Actors ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub dir: Option<Dir>,
    /// Queued turn, applied at the next tile center where it is legal.
    pub next: Option<Dir>,
}

impl Actor {
    pub fn at(tile: (i32, i32), speed: f32) -> Actor {
        Actor {
            x: tile.0 as f32,
            y: tile.1 as f32,
            speed,
            dir: None,
            next: None,
        }
    }

    pub fn tile(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }

    pub fn centered(&self) -> bool {
        (self.x - self.x.round()).abs() < CENTER_EPS
            && (self.y - self.y.round()).abs() < CENTER_EPS
    }

    /// Kill the float drift accumulated while gliding between centers.
    fn snap(&mut self) {
        self.x = self.x.round();
        self.y = self.y.round();
    }

    /// Would a step in `dir` land on a walkable tile? Horizontal wrap is
    /// legal movement, so edge tiles on tunnel rows pass this test.
    pub fn can_move(&self, maze: &Maze, dir: Dir) -> bool {
        let (tx, ty) = self.tile();
        let (dx, dy) = dir.delta();
        maze.at(tx + dx, ty + dy) != TileKind::Wall
    }

    fn advance(&mut self) {
        if let Some(dir) = self.dir {
            let (dx, dy) = dir.delta();
            self.x += dx as f32 * self.speed;
            self.y += dy as f32 * self.speed;
        }
    }

    fn wrap(&mut self, cols: i32) {
        if self.x < 0.0 {
            self.x = (cols - 1) as f32;
        } else if self.x >= cols as f32 {
            self.x = 0.0;
        }
    }
}

/// Identity tag, also the render tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GhostId {
    Red,
    Pink,
    Cyan,
}

#[derive(Clone, Copy, Debug)]
pub struct Ghost {
    pub id: GhostId,
    pub actor: Actor,
}

impl Ghost {
    fn spawn(id: GhostId, tile: (i32, i32)) -> Ghost {
        let mut actor = Actor::at(tile, GHOST_SPEED);
        actor.dir = Some(Dir::Right);
        Ghost { id, actor }
    }
}

// ── Game ─────────────────────────────────────────────────────────────────────

pub struct ChaseGame {
    pub maze: Maze,
    pub player: Actor,
    pub ghosts: Vec<Ghost>,
}

impl ChaseGame {
    pub fn new() -> Self {
        ChaseGame {
            maze: Maze::standard(),
            player: Actor::at(PLAYER_SPAWN, PLAYER_SPEED),
            ghosts: vec![
                Ghost::spawn(GhostId::Red, (9, 8)),
                Ghost::spawn(GhostId::Pink, (8, 9)),
                Ghost::spawn(GhostId::Cyan, (10, 9)),
            ],
        }
    }

    fn move_player(&mut self) {
        let player = &mut self.player;
        player.wrap(self.maze.cols());

        if player.centered() {
            player.snap();
            if let Some(next) = player.next {
                if player.can_move(&self.maze, next) {
                    player.dir = Some(next);
                    player.next = None;
                }
            }
            // Halted at a wall: keep the heading and keep retrying the
            // buffered turn on later ticks.
            if let Some(dir) = player.dir {
                if !player.can_move(&self.maze, dir) {
                    return;
                }
            }
        }

        player.advance();
    }
}

impl Default for ChaseGame {
    fn default() -> Self {
        ChaseGame::new()
    }
}

/// Pursuit step: when centered, pick the legal direction whose resulting
/// tile is nearest the target (Euclidean), never reversing the current
/// heading unless every other option is a wall. The jitter keeps ghosts
/// from locking onto identical paths.
pub fn drive_ghost<R: Rng>(ghost: &mut Ghost, target: (f32, f32), maze: &Maze, rng: &mut R) {
    let actor = &mut ghost.actor;

    if actor.centered() {
        actor.snap();
        let mut best: Option<(Dir, f32)> = None;
        for dir in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
            if actor.dir == Some(dir.opposite()) {
                continue;
            }
            if !actor.can_move(maze, dir) {
                continue;
            }
            let (dx, dy) = dir.delta();
            let dist = (actor.x + dx as f32 - target.0).hypot(actor.y + dy as f32 - target.1);
            let key = dist + rng.gen_range(-0.5..0.5);
            if best.map_or(true, |(_, best_key)| key < best_key) {
                best = Some((dir, key));
            }
        }
        match best {
            Some((dir, _)) => actor.dir = Some(dir),
            // Dead end: reversal is the only legal option left.
            None => actor.dir = actor.dir.map(Dir::opposite),
        }
    }

    actor.advance();
    actor.wrap(maze.cols());
}

impl Game for ChaseGame {
    fn reset<R: Rng>(&mut self, _rng: &mut R) {
        *self = ChaseGame::new();
    }

    fn buffer_input(&mut self, control: Control) {
        if let Control::Dir(dir) = control {
            self.player.next = Some(dir);
        }
    }

    fn step_rate(&self, _score: u32) -> Option<f32> {
        None
    }

    fn step<R: Rng>(&mut self, _score: u32, rng: &mut R) -> StepReport {
        self.move_player();

        let target = (self.player.x, self.player.y);
        for ghost in self.ghosts.iter_mut() {
            drive_ghost(ghost, target, &self.maze, rng);
        }

        let (tx, ty) = self.player.tile();
        let mut scored = 0;
        if self.maze.eat_pellet(tx, ty) {
            scored = PELLET_SCORE;
            // Win takes precedence over a same-tick catch.
            if self.maze.pellets_left() == 0 {
                return StepReport { scored, terminal: Some(Terminal::Win) };
            }
        }

        for ghost in &self.ghosts {
            let dist = (self.player.x - ghost.actor.x).hypot(self.player.y - ghost.actor.y);
            if dist < CATCH_DIST {
                return StepReport { scored, terminal: Some(Terminal::Loss) };
            }
        }

        StepReport { scored, terminal: None }
    }
}
