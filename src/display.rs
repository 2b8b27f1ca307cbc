/// Rendering layer.  All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of what the
/// game wants shown.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use damsel_rescue::entities::{Drawable, Outcome, Position, Sprite, World};
use damsel_rescue::game::{Screen, SessionStats};
use damsel_rescue::grid::{CELL_WIDTH, COLUMNS, MIN_Y, ROWS, ROW_STEP};
use tracing::{info, warn};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal columns per grid cell.
const TILE_COLS: u16 = 6;
/// Terminal rows per grid cell.
const TILE_ROWS: u16 = 3;
const BOARD_LEFT: u16 = 1;
const BOARD_TOP: u16 = 2;
const BOARD_COLS: u16 = TILE_COLS * COLUMNS as u16;
const BOARD_ROWS: u16 = TILE_ROWS * ROWS as u16;
/// The grid column holding the gate and the damsel's landing spot.
const GATE_COLUMN: usize = 3;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Grey;
const C_CALL_TO_ACTION: Color = Color::White;
const C_WATER: Color = Color::DarkBlue;
const C_GRASS: Color = Color::DarkGreen;
const C_STONE: Color = Color::DarkGrey;

// ── Sprite sheet ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Glyph {
    pub text: &'static str,
    pub color: Color,
}

fn glyph_for(sprite: Sprite) -> Glyph {
    let (text, color) = match sprite {
        Sprite::Player => ("☺", Color::White),
        Sprite::Enemy => ("═●>", Color::Red),
        Sprite::Wall => ("▓▓▓▓▓▓", Color::Grey),
        Sprite::Rock => ("▲▲", Color::Grey),
        Sprite::DoorClosed => ("▐██▌", Color::DarkYellow),
        Sprite::DoorOpen => ("▐  ▌", Color::DarkYellow),
        Sprite::Key => ("o=┐", Color::Yellow),
        Sprite::Damsel => ("♀", Color::Magenta),
    };
    Glyph { text, color }
}

/// The terminal stand-in for image assets: one glyph per sprite.
pub struct SpriteSheet {
    glyphs: HashMap<Sprite, Glyph>,
}

impl SpriteSheet {
    pub fn load(sprites: &[Sprite]) -> Self {
        let glyphs = sprites.iter().map(|&s| (s, glyph_for(s))).collect();
        SpriteSheet { glyphs }
    }

    pub fn get(&self, sprite: Sprite) -> Option<&Glyph> {
        self.glyphs.get(&sprite)
    }

    pub fn is_ready(&self) -> bool {
        Sprite::ALL.iter().all(|s| self.glyphs.contains_key(s))
    }

    /// Run `callback` once if every sprite is loaded.
    pub fn on_ready<T>(&self, callback: impl FnOnce() -> T) -> Option<T> {
        if self.is_ready() {
            info!(sprites = self.glyphs.len(), "sprites_ready");
            Some(callback())
        } else {
            let missing: Vec<&str> = Sprite::ALL
                .iter()
                .filter(|s| !self.glyphs.contains_key(s))
                .map(|s| s.name())
                .collect();
            warn!(?missing, "sprites_missing");
            None
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `size` is the terminal size in cells.
pub fn render<W: Write>(
    out: &mut W,
    screen: &Screen<'_>,
    sheet: &SpriteSheet,
    size: (u16, u16),
) -> std::io::Result<()> {
    out.queue(style::ResetColor)?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match screen {
        Screen::Menu => draw_menu(out, size)?,
        Screen::World(world) => {
            draw_border(out)?;
            draw_background(out)?;
            draw_world(out, world, sheet)?;
            draw_hud(out, world, sheet)?;
            draw_controls_hint(out)?;
        }
        Screen::Ended { outcome, stats } => draw_end_screen(out, *outcome, stats, size)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, size.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Board geometry ────────────────────────────────────────────────────────────

/// Board-relative terminal column of a pixel x (may fall outside the board).
fn screen_col(x: f32) -> i32 {
    (x / CELL_WIDTH * TILE_COLS as f32).round() as i32
}

/// Grid row of a pixel y.  Sprites with a drawing offset round to the row
/// they visually occupy.
fn grid_row(y: f32) -> i32 {
    ((y - MIN_Y) / ROW_STEP).round() as i32
}

fn background_at(row: i32, col: i32) -> Color {
    match row {
        0 if col == GATE_COLUMN as i32 => C_GRASS,
        0 => C_WATER,
        3..=5 => C_STONE,
        _ => C_GRASS,
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let w = BOARD_COLS as usize;
    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(BOARD_LEFT - 1, BOARD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(BOARD_LEFT - 1, BOARD_TOP + BOARD_ROWS))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in BOARD_TOP..BOARD_TOP + BOARD_ROWS {
        out.queue(cursor::MoveTo(BOARD_LEFT - 1, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(BOARD_LEFT + BOARD_COLS, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Background tiles ──────────────────────────────────────────────────────────

fn draw_background<W: Write>(out: &mut W) -> std::io::Result<()> {
    let blank = " ".repeat(TILE_COLS as usize);
    for row in 0..ROWS as u16 {
        for col in 0..COLUMNS as u16 {
            out.queue(style::SetBackgroundColor(background_at(row as i32, col as i32)))?;
            for line in 0..TILE_ROWS {
                out.queue(cursor::MoveTo(
                    BOARD_LEFT + col * TILE_COLS,
                    BOARD_TOP + row * TILE_ROWS + line,
                ))?;
                out.queue(Print(&blank))?;
            }
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, world: &World, sheet: &SpriteSheet) -> std::io::Result<()> {
    for (position, sprite) in world.render_list() {
        if let Some(glyph) = sheet.get(sprite) {
            draw_glyph(out, position, glyph)?;
        }
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

/// Draw `glyph` centred on the tile under `position`, clipped to the board.
fn draw_glyph<W: Write>(out: &mut W, position: Position, glyph: &Glyph) -> std::io::Result<()> {
    let row = grid_row(position.y);
    if !(0..ROWS as i32).contains(&row) {
        return Ok(());
    }
    let width = glyph.text.chars().count() as i32;
    let start = screen_col(position.x) + (TILE_COLS as i32 - width) / 2;
    let line = BOARD_TOP + row as u16 * TILE_ROWS + TILE_ROWS / 2;

    out.queue(style::SetForegroundColor(glyph.color))?;
    for (i, ch) in glyph.text.chars().enumerate() {
        let col = start + i as i32;
        if !(0..BOARD_COLS as i32).contains(&col) {
            continue;
        }
        out.queue(style::SetBackgroundColor(background_at(row, col / TILE_COLS as i32)))?;
        out.queue(cursor::MoveTo(BOARD_LEFT + col as u16, line))?;
        out.queue(Print(ch))?;
    }
    Ok(())
}

// ── HUD (row 0): the key indicator ───────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, sheet: &SpriteSheet) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("Key: "))?;

    match world.indicator.sprite().and_then(|sprite| sheet.get(sprite)) {
        Some(glyph) => {
            out.queue(style::SetForegroundColor(glyph.color))?;
            out.queue(Print(glyph.text))?;
        }
        None => {
            out.queue(style::SetForegroundColor(C_HINT))?;
            out.queue(Print("-"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, BOARD_TOP + BOARD_ROWS + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("↑←↓→ / WASD : Move   Q : Quit"))?;
    Ok(())
}

// ── Menu & end screens ────────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    size: (u16, u16),
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (size.0 / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, size: (u16, u16)) -> std::io::Result<()> {
    let top = (size.1 / 3).saturating_sub(2);
    let lines: &[(u16, &str)] = &[
        (0, "☺ Welcome! ☺"),
        (2, "You'll be able to play the game using"),
        (3, "your arrow (↑←↓→) or WASD keys."),
        (5, "Your goal is to get the key"),
        (6, "and rescue the damsel in distress."),
        (8, "Have fun and watch out for the bugs!"),
    ];
    for (offset, text) in lines {
        draw_centered(out, size, top + offset, text, C_TITLE)?;
    }
    draw_centered(out, size, top + 11, "Press ENTER to Start", C_CALL_TO_ACTION)?;
    draw_centered(out, size, top + 13, "Q : Quit", C_HINT)?;
    Ok(())
}

fn draw_end_screen<W: Write>(
    out: &mut W,
    outcome: Outcome,
    stats: &SessionStats,
    size: (u16, u16),
) -> std::io::Result<()> {
    let (title, message) = match outcome {
        Outcome::Success => ("Success!", "♡ You have freed your damsel in distress! ♡"),
        Outcome::Failure => ("Game Over!", "☹ Be more careful next time! ☹"),
    };
    let tally = format!(
        "Rounds: {}   Rescued: {}   Lost: {}",
        stats.rounds, stats.successes, stats.failures
    );

    let cy = size.1 / 2;
    draw_centered(out, size, cy.saturating_sub(3), title, C_TITLE)?;
    draw_centered(out, size, cy.saturating_sub(1), message, C_TITLE)?;
    draw_centered(out, size, cy + 1, &tally, C_HINT)?;
    draw_centered(out, size, cy + 3, "Press ENTER to Try Again", C_CALL_TO_ACTION)?;
    Ok(())
}
