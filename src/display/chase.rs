/// Chase renderer: the maze itself frames the field. Walls are solid,
/// pellets are dots, the player and each ghost get their own tint.
/// Fractional actor positions round to the nearest cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use term_arcade::games::chase::{ChaseGame, GhostId, TileKind};
use term_arcade::session::{Phase, Session, Terminal};
use term_arcade::store::ScoreStore;

use super::{draw_hint, draw_hud, draw_overlay, field_origin, finish_frame, C_OVER, C_WIN};

const CELL_W: u16 = 2;

const C_WALL: Color = Color::DarkBlue;
const C_PELLET: Color = Color::White;
const C_PLAYER: Color = Color::Yellow;

fn ghost_color(id: GhostId) -> Color {
    match id {
        GhostId::Red => Color::Red,
        GhostId::Pink => Color::Magenta,
        GhostId::Cyan => Color::Cyan,
    }
}

pub fn render<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<ChaseGame, S>,
) -> std::io::Result<()> {
    let game = session.game();
    let cols = game.maze.cols() as u16 * CELL_W;
    let rows = game.maze.rows() as u16;

    out.queue(Clear(ClearType::All))?;
    let Some(origin) = field_origin(out, cols, rows)? else {
        return finish_frame(out);
    };

    draw_hud(out, origin, cols, "CHASE", session.score(), session.high_score())?;

    for y in 0..game.maze.rows() {
        for x in 0..game.maze.cols() {
            let (glyph, color) = match game.maze.at(x, y) {
                TileKind::Wall => ("██", C_WALL),
                TileKind::Pellet => ("· ", C_PELLET),
                TileKind::Empty => ("  ", Color::Reset),
            };
            out.queue(cursor::MoveTo(
                origin.0 + x as u16 * CELL_W,
                origin.1 + y as u16,
            ))?;
            out.queue(style::SetForegroundColor(color))?;
            out.queue(Print(glyph))?;
        }
    }

    let bounds = (game.maze.cols(), game.maze.rows());
    for ghost in &game.ghosts {
        out.queue(style::SetForegroundColor(ghost_color(ghost.id)))?;
        draw_actor(out, origin, ghost.actor.tile(), bounds, "∩ ")?;
    }
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    draw_actor(out, origin, game.player.tile(), bounds, "◉ ")?;

    match session.phase() {
        Phase::Idle => draw_overlay(
            out,
            origin,
            cols,
            rows,
            "CHASE",
            Color::White,
            &["Press an arrow to start".to_string()],
        )?,
        Phase::Over => {
            let (title, color) = match session.outcome() {
                Some(Terminal::Win) => ("YOU WIN!", C_WIN),
                _ => ("GAME OVER", C_OVER),
            };
            draw_overlay(
                out,
                origin,
                cols,
                rows,
                title,
                color,
                &[
                    format!("Final Score: {:>5}", session.score()),
                    format!("Best Score:  {:>5}", session.high_score()),
                    "Arrows - Retry   Q - Menu".to_string(),
                ],
            )?;
        }
        Phase::Running => {}
    }

    draw_hint(out, origin, rows, "Arrows / WASD : Steer   Q : Menu")?;
    finish_frame(out)
}

fn draw_actor<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    tile: (i32, i32),
    bounds: (i32, i32),
    glyph: &str,
) -> std::io::Result<()> {
    let (x, y) = tile;
    // Mid-tunnel positions can round one cell past the edge.
    if x < 0 || y < 0 || x >= bounds.0 || y >= bounds.1 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(
        origin.0 + x as u16 * CELL_W,
        origin.1 + y as u16,
    ))?;
    out.queue(Print(glyph))?;
    Ok(())
}
