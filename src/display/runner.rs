/// Runner renderer: the 450×450 logical space maps onto a 75×20 cell
/// viewport (6 px per column, 22.5 px per row) inside a box border, small
/// enough for an 80×24 terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use term_arcade::games::runner::{RunnerGame, GROUND_Y};
use term_arcade::session::{Phase, Session};
use term_arcade::store::ScoreStore;

use super::{draw_border, draw_hint, draw_hud, draw_overlay, field_origin, finish_frame, C_OVER};

const PX_PER_COL: f32 = 6.0;
const PX_PER_ROW: f32 = 22.5;
const COLS: u16 = 75;
const ROWS: u16 = 20;
const TOTAL_W: u16 = COLS + 2;
const TOTAL_H: u16 = ROWS + 2;

pub fn render<W: Write, S: ScoreStore>(
    out: &mut W,
    session: &Session<RunnerGame, S>,
) -> std::io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    let Some(outer) = field_origin(out, TOTAL_W, TOTAL_H)? else {
        return finish_frame(out);
    };
    let inner = (outer.0 + 1, outer.1 + 1);

    draw_hud(out, outer, TOTAL_W, "RUNNER", session.score(), session.high_score())?;
    draw_border(out, outer, TOTAL_W, TOTAL_H, Color::DarkBlue)?;

    // Ground line.
    let ground_row = (GROUND_Y / PX_PER_ROW) as u16;
    out.queue(cursor::MoveTo(inner.0, inner.1 + ground_row))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("─".repeat(COLS as usize)))?;

    let game = session.game();
    out.queue(style::SetForegroundColor(Color::Grey))?;
    for obs in &game.obstacles {
        draw_block(out, inner, obs.x, obs.y, obs.w, obs.h)?;
    }
    out.queue(style::SetForegroundColor(Color::White))?;
    let p = &game.player;
    draw_block(out, inner, p.x, p.y, p.w, p.h)?;

    match session.phase() {
        Phase::Idle => draw_overlay(
            out,
            inner,
            COLS,
            ROWS,
            "RUNNER",
            Color::White,
            &["Press SPACE to start".to_string()],
        )?,
        Phase::Over => {
            draw_overlay(
                out,
                inner,
                COLS,
                ROWS,
                "GAME OVER",
                C_OVER,
                &[
                    format!("Final Score: {:>5}", session.score()),
                    format!("Best Score:  {:>5}", session.high_score()),
                    "SPACE - Retry   Q - Menu".to_string(),
                ],
            )?;
        }
        Phase::Running => {}
    }

    draw_hint(out, outer, TOTAL_H, "SPACE : Jump   Q : Menu")?;
    finish_frame(out)
}

/// Fill the cells covered by a logical-pixel rectangle, clipped to the
/// viewport.
fn draw_block<W: Write>(
    out: &mut W,
    inner: (u16, u16),
    x: f32,
    y: f32,
    w: f32,
    h: f32,
) -> std::io::Result<()> {
    let col0 = ((x / PX_PER_COL).floor() as i32).max(0);
    let col1 = (((x + w - 1.0) / PX_PER_COL).floor() as i32).min(COLS as i32 - 1);
    let row0 = ((y / PX_PER_ROW).floor() as i32).max(0);
    let row1 = (((y + h - 1.0) / PX_PER_ROW).floor() as i32).min(ROWS as i32 - 1);
    if col1 < col0 || row1 < row0 {
        return Ok(());
    }
    let span = "█".repeat((col1 - col0 + 1) as usize);
    for row in row0..=row1 {
        out.queue(cursor::MoveTo(inner.0 + col0 as u16, inner.1 + row as u16))?;
        out.queue(Print(&span))?;
    }
    Ok(())
}
