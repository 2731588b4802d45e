/// Snake renderer: 20×20 grid, two terminal columns per cell, boxed.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use term_arcade::games::snake::{SnakeGame, GRID};
use term_arcade::session::{Phase, Session};
use term_arcade::store::ScoreStore;

use super::{draw_border, draw_hint, draw_hud, draw_overlay, field_origin, finish_frame, C_OVER};

const CELL_W: u16 = 2;
const COLS: u16 = GRID as u16 * CELL_W;
const ROWS: u16 = GRID as u16;
const TOTAL_W: u16 = COLS + 2;
const TOTAL_H: u16 = ROWS + 2;

const C_HEAD: Color = Color::White;
const C_BODY: Color = Color::Grey;
const C_FOOD: Color = Color::Green;

pub fn render<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<SnakeGame, S>,
) -> std::io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    let Some(outer) = field_origin(out, TOTAL_W, TOTAL_H)? else {
        return finish_frame(out);
    };
    let inner = (outer.0 + 1, outer.1 + 1);

    draw_hud(out, outer, TOTAL_W, "SNAKE", session.score(), session.high_score())?;
    draw_border(out, outer, TOTAL_W, TOTAL_H, Color::DarkBlue)?;

    let game = session.game();

    out.queue(style::SetForegroundColor(C_FOOD))?;
    draw_cell(out, inner, game.food.x, game.food.y)?;

    for (i, segment) in game.body.iter().enumerate() {
        let color = if i == 0 { C_HEAD } else { C_BODY };
        out.queue(style::SetForegroundColor(color))?;
        draw_cell(out, inner, segment.x, segment.y)?;
    }

    match session.phase() {
        Phase::Idle => draw_overlay(
            out,
            inner,
            COLS,
            ROWS,
            "SNAKE",
            Color::White,
            &["Press an arrow to start".to_string()],
        )?,
        Phase::Over => draw_overlay(
            out,
            inner,
            COLS,
            ROWS,
            "GAME OVER",
            C_OVER,
            &[
                format!("Final Score: {:>5}", session.score()),
                format!("Best Score:  {:>5}", session.high_score()),
                "Arrows - Retry   Q - Menu".to_string(),
            ],
        )?,
        Phase::Running => {}
    }

    draw_hint(out, outer, TOTAL_H, "Arrows / WASD : Steer   Q : Menu")?;
    finish_frame(out)
}

fn draw_cell<W: Write>(out: &mut W, inner: (u16, u16), x: i32, y: i32) -> std::io::Result<()> {
    if x < 0 || x >= GRID || y < 0 || y >= GRID {
        return Ok(());
    }
    out.queue(cursor::MoveTo(inner.0 + x as u16 * CELL_W, inner.1 + y as u16))?;
    out.queue(Print("██"))?;
    Ok(())
}
