/// Rendering layer. All terminal drawing lives here.
///
/// Each renderer receives a mutable writer and an immutable view of a
/// session. No game logic is performed; these modules only translate state
/// into queued terminal commands, flushed once per frame.

pub mod chase;
pub mod runner;
pub mod snake;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

// ── Shared palette ───────────────────────────────────────────────────────────

pub const C_HUD: Color = Color::Yellow;
pub const C_HINT: Color = Color::DarkGrey;
pub const C_OVER: Color = Color::Red;
pub const C_WIN: Color = Color::Green;

/// Top-left corner of a centered field, or `None` when the terminal is too
/// small (in which case a notice has already been queued).
pub fn field_origin<W: Write>(
    out: &mut W,
    field_w: u16,
    field_h: u16,
) -> std::io::Result<Option<(u16, u16)>> {
    let (term_w, term_h) = terminal::size()?;
    // One row of HUD above the field, one hint row below.
    let needed_h = field_h + 2;
    if term_w < field_w || term_h < needed_h {
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!(
            "Terminal too small: need {}x{}, have {}x{}",
            field_w, needed_h, term_w, term_h
        )))?;
        return Ok(None);
    }
    let ox = (term_w - field_w) / 2;
    let oy = ((term_h - needed_h) / 2).max(1);
    Ok(Some((ox, oy)))
}

/// HUD line just above the field: title left, score pair right.
pub fn draw_hud<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    field_w: u16,
    title: &str,
    score: u32,
    high_score: u32,
) -> std::io::Result<()> {
    let (ox, oy) = origin;
    out.queue(cursor::MoveTo(ox, oy - 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(title))?;

    let score_str = format!("Score:{:>5}  Best:{:>5}", score, high_score);
    let sx = ox + field_w.saturating_sub(score_str.chars().count() as u16);
    out.queue(cursor::MoveTo(sx, oy - 1))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(score_str))?;
    Ok(())
}

/// Hint line just below the field.
pub fn draw_hint<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    field_h: u16,
    hint: &str,
) -> std::io::Result<()> {
    let (ox, oy) = origin;
    out.queue(cursor::MoveTo(ox, oy + field_h))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

/// Centered overlay: a boxed title with detail lines underneath. Used for
/// the idle prompt and the game-over / win screens.
pub fn draw_overlay<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    field_w: u16,
    field_h: u16,
    title: &str,
    title_color: Color,
    info: &[String],
) -> std::io::Result<()> {
    let (ox, oy) = origin;
    let cx = ox + field_w / 2;
    let inner = title.chars().count().max(18) + 4;
    let top = format!("╔{}╗", "═".repeat(inner));
    let mid = format!("║{:^width$}║", title, width = inner);
    let bot = format!("╚{}╝", "═".repeat(inner));

    let total_rows = 3 + info.len() as u16;
    let start_row = oy + (field_h / 2).saturating_sub(total_rows / 2 + 1);

    out.queue(style::SetForegroundColor(title_color))?;
    for (i, line) in [&top, &mid, &bot].into_iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }

    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in info.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + 3 + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

/// Box border around a field whose outer top-left corner is `origin` and
/// whose outer size is `total_w` × `total_h` (the playable interior is two
/// smaller in each dimension).
pub fn draw_border<W: Write>(
    out: &mut W,
    origin: (u16, u16),
    total_w: u16,
    total_h: u16,
    color: Color,
) -> std::io::Result<()> {
    let (ox, oy) = origin;
    let inner = total_w.saturating_sub(2) as usize;

    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(ox, oy))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    for row in 1..total_h.saturating_sub(1) {
        out.queue(cursor::MoveTo(ox, oy + row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(ox + total_w - 1, oy + row))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(ox, oy + total_h - 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;
    Ok(())
}

/// Park the cursor and flush the queued frame.
pub fn finish_frame<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()
}
