/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Field coordinates are scaled onto
/// whatever terminal size is current.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use log::debug;

use juicy_time::catalog::{GlyphSet, Rgb};
use juicy_time::config::{BOX_HEIGHT, BOX_WIDTH};
use juicy_time::entities::{
    Container, Cue, FallingFruit, FruitPhase, GameState, RoundStatus,
};
use juicy_time::screens::{Screen, UiAction};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::White;
const C_HUD_MISSES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_LETTER: Color = Color::White;
const C_BOX: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;
const C_BUTTON: Color = Color::Blue;

/// Distance of the box row from the bottom of the field.
const BOX_BOTTOM_MARGIN: f32 = 20.0;

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Maps field coordinates to terminal cells.  Rows 0 and 1 hold the HUD and
/// top border; the last two rows hold the bottom border and hint line.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    width: u16,
    height: u16,
    field_w: f32,
    field_h: f32,
}

impl Viewport {
    fn new(state: &GameState, width: u16, height: u16) -> Viewport {
        Viewport {
            width,
            height,
            field_w: state.config.field_width,
            field_h: state.config.field_height,
        }
    }

    fn play_cols(&self) -> f32 {
        self.width.saturating_sub(2) as f32
    }

    fn play_rows(&self) -> f32 {
        self.height.saturating_sub(4) as f32
    }

    fn col(&self, x: f32) -> u16 {
        let c = 1.0 + (x / self.field_w) * self.play_cols();
        (c.max(1.0) as u16).min(self.width.saturating_sub(2))
    }

    /// `None` above the top edge.
    fn row(&self, y: f32) -> Option<u16> {
        if y < 0.0 {
            return None;
        }
        let r = 2.0 + (y / self.field_h) * self.play_rows();
        Some((r as u16).min(self.height.saturating_sub(3)))
    }

    fn cols_for(&self, w: f32) -> u16 {
        ((w / self.field_w) * self.play_cols()).max(3.0) as u16
    }

    fn rows_for(&self, h: f32) -> u16 {
        ((h / self.field_h) * self.play_rows()).max(2.0) as u16
    }
}

/// A clickable button in terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub action: UiAction,
    pub col: u16,
    pub row: u16,
    pub width: u16,
}

impl Button {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col + self.width
    }
}

/// Buttons offered by `screen`, stacked under the screen's title.
pub fn buttons(screen: Screen, width: u16, height: u16) -> Vec<Button> {
    if screen == Screen::Playing {
        return Vec::new();
    }
    let actions = screen.actions();
    let button_w: u16 = 20;
    let col = (width / 2).saturating_sub(button_w / 2);
    let first_row = (height / 2).saturating_sub(actions.len() as u16 - 1);
    actions
        .iter()
        .enumerate()
        .map(|(i, &action)| Button {
            action,
            col,
            row: first_row + 2 * i as u16,
            width: button_w,
        })
        .collect()
}

/// The button under a mouse click, if any.
pub fn button_at(screen: Screen, width: u16, height: u16, col: u16, row: u16) -> Option<UiAction> {
    buttons(screen, width, height)
        .into_iter()
        .find(|b| b.contains(col, row))
        .map(|b| b.action)
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame of `screen`.  `state` is `None` only before the
/// first game has started.
pub fn render<W: Write>(
    out: &mut W,
    screen: Screen,
    state: Option<&GameState>,
    glyphs: GlyphSet,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match (screen, state) {
        (Screen::Menu, _) | (_, None) => draw_menu(out, width, height)?,
        (screen, Some(state)) => {
            let view = Viewport::new(state, width, height);
            draw_border(out, &view)?;
            draw_hud(out, state, &view)?;
            for container in &state.containers {
                draw_container(out, container, &view)?;
            }
            for fruit in &state.fruits {
                draw_fruit(out, fruit, glyphs, &view)?;
            }
            draw_controls_hint(out, &view)?;
            if screen != Screen::Playing {
                draw_modal(out, screen, state, &view)?;
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Play the cues raised by the latest update.  The terminal bell is the only
/// sound available; everything else, background music included, is logged.
pub fn play_cues<W: Write>(out: &mut W, cues: &[Cue]) -> std::io::Result<()> {
    for cue in cues {
        match cue {
            Cue::GameOver | Cue::LevelComplete => {
                out.queue(Print('\x07'))?;
            }
            Cue::Cut | Cue::Fill | Cue::Miss => {}
            // No audio device, logged below
            Cue::MusicStart | Cue::MusicStop => {}
        }
        debug!("cue {:?}", cue);
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let round = &state.round;

    // Score: left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>4}", round.score)))?;

    // Level: centre
    let level_str = format!("[ LEVEL {}/{} ]", round.level, state.config.max_level);
    let lx = (view.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    // Time and misses: right
    let time_str = format!("Time: {:>2}  ", round.time_left());
    let miss_str = format!("Missed: {}/{}", round.misses, state.config.max_misses);
    let right_len = (time_str.len() + miss_str.len()) as u16;
    out.queue(cursor::MoveTo(view.width.saturating_sub(right_len + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TIME))?;
    out.queue(Print(&time_str))?;
    out.queue(style::SetForegroundColor(C_HUD_MISSES))?;
    out.queue(Print(&miss_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_fruit<W: Write>(
    out: &mut W,
    fruit: &FallingFruit,
    glyphs: GlyphSet,
    view: &Viewport,
) -> std::io::Result<()> {
    let Some(row) = view.row(fruit.y) else {
        return Ok(());
    };
    let col = view.col(fruit.x);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(rgb(fruit.kind.color())))?;
    match fruit.phase {
        FruitPhase::Falling => {
            // The placeholder takes the kind's colour set above
            out.queue(Print(glyphs.sprite(fruit.kind)))?;
            out.queue(style::SetForegroundColor(C_LETTER))?;
            out.queue(style::SetAttribute(Attribute::Bold))?;
            out.queue(Print(fruit.letter))?;
            out.queue(style::SetAttribute(Attribute::Reset))?;
        }
        // Sliced halves drifting apart
        FruitPhase::Cut { .. } => {
            out.queue(Print("◐ ◑"))?;
        }
    }
    Ok(())
}

fn draw_container<W: Write>(
    out: &mut W,
    container: &Container,
    view: &Viewport,
) -> std::io::Result<()> {
    let top_y = view.field_h - BOX_HEIGHT - BOX_BOTTOM_MARGIN;
    let Some(top) = view.row(top_y) else {
        return Ok(());
    };
    let left = view.col(container.x);
    let w = view.cols_for(BOX_WIDTH);
    let h = view.rows_for(BOX_HEIGHT);
    let inner = w.saturating_sub(2) as usize;

    // Label above the box
    out.queue(cursor::MoveTo(left, top.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_BOX))?;
    let label: String = container.kind.name().chars().take(w as usize).collect();
    out.queue(Print(label))?;

    let filled_rows = (container.fill() * h.saturating_sub(2) as f32).round() as u16;
    for i in 0..h {
        let row = top + i;
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(style::SetForegroundColor(C_BOX))?;
        if i == 0 {
            out.queue(Print(format!("╭{}╮", "─".repeat(inner))))?;
        } else if i == h - 1 {
            out.queue(Print(format!("╰{}╯", "─".repeat(inner))))?;
        } else {
            out.queue(Print("│"))?;
            // Fill rises from the bottom of the box
            let from_bottom = h - 1 - i;
            if from_bottom <= filled_rows {
                out.queue(style::SetForegroundColor(rgb(container.kind.color())))?;
                out.queue(Print("█".repeat(inner)))?;
            } else {
                out.queue(Print(" ".repeat(inner)))?;
            }
            out.queue(style::SetForegroundColor(C_BOX))?;
            out.queue(Print("│"))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Type the letter on a fruit to cut it   ESC : Quit"))?;
    Ok(())
}

// ── Menu & modal overlays ─────────────────────────────────────────────────────

fn draw_centered<W: Write>(
    out: &mut W,
    text: &str,
    row: u16,
    width: u16,
    color: Color,
) -> std::io::Result<()> {
    let col = (width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_buttons<W: Write>(
    out: &mut W,
    screen: Screen,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    for button in buttons(screen, width, height) {
        let text = format!(
            "[{}] {}",
            button.action.shortcut().to_ascii_uppercase(),
            button.action.label()
        );
        out.queue(cursor::MoveTo(button.col, button.row))?;
        out.queue(style::SetBackgroundColor(C_BUTTON))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(format!("{:^w$}", text, w = button.width as usize)))?;
        out.queue(style::SetBackgroundColor(Color::Reset))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let cy = height / 2;
    draw_centered(out, "✦  JUICY  TIME  ✦", cy.saturating_sub(7), width, Color::Magenta)?;
    draw_centered(
        out,
        "Type each fruit's letter before it hits the floor.",
        cy.saturating_sub(5),
        width,
        Color::White,
    )?;
    draw_centered(
        out,
        "Fill every box to clear the level.",
        cy.saturating_sub(4),
        width,
        C_HINT,
    )?;
    draw_buttons(out, Screen::Menu, width, height)
}

fn draw_modal<W: Write>(
    out: &mut W,
    screen: Screen,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let (title, color) = match screen {
        Screen::LevelComplete => (format!("LEVEL {} COMPLETE", state.round.level), Color::Green),
        Screen::Victory => ("YOU COMPLETED ALL LEVELS!".to_string(), Color::Cyan),
        _ => ("GAME OVER!".to_string(), Color::Red),
    };
    let subtitle = match state.round.status {
        RoundStatus::Lost(reason) => format!("{}  |  Score: {}", reason, state.round.score),
        _ => format!("Score: {}", state.round.score),
    };

    let n = screen.actions().len() as u16;
    let title_row = (view.height / 2).saturating_sub(n + 3);
    draw_centered(out, &title, title_row, view.width, color)?;
    draw_centered(out, &subtitle, title_row + 1, view.width, C_HUD_SCORE)?;
    draw_buttons(out, screen, view.width, view.height)
}
