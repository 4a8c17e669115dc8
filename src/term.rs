use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, read, poll};
use crossterm::style::{Color as TermColor, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::debug;

use crate::config::{Board, ConfigError};
use crate::input::is_press;
use crate::render::{Color, Surface};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

// Terminal glyphs are about twice as tall as they are wide
const COLS_PER_CELL: u32 = 2;
const PAPER: TermColor = TermColor::White;

/// A [`Surface`] drawn with terminal glyphs. Pixel coordinates are mapped to
/// grid cells, each cell two columns wide, inside a one glyph frame.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    cell_size: u32,
    fill: Color,
    stroke: Color,
    active: bool,
}

impl TermManager {
    pub fn new(cell_size: u32) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            cell_size,
            fill: Color::Black,
            stroke: Color::Black,
            active: false,
        })
    }

    /// Checks that the board plus its frame fits on screen.
    pub fn fit(&self, board: &Board) -> Result<(), ConfigError> {
        let need_w = board.columns() * COLS_PER_CELL + 2;
        let need_h = board.rows() + 2;

        if need_w > self.width as u32 || need_h > self.height as u32 {
            return Err(ConfigError::TerminalTooSmall {
                have_w: self.width,
                have_h: self.height,
                need_w: need_w.min(TermInt::MAX as u32) as TermInt,
                need_h: need_h.min(TermInt::MAX as u32) as TermInt,
            });
        }

        Ok(())
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        debug!(width = self.width, height = self.height, "Terminal ready");
        Ok(())
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Waits for the next key press. Releases and repeats are skipped.
    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if is_press(&ev) {
                    return Ok(ev);
                }
            }
        }
    }

    /// Waits up to `timeout` for a key event.
    pub fn poll_key(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            self.print_at((top_left.0, *y), &blank, TermColor::White, TermColor::Black)?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            self.print_at((top_left.0, y), &padded_line, TermColor::White, TermColor::Black)?;
        }

        self.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn column(&self, px: u32) -> TermInt {
        clamp(1 + px / self.cell_size * COLS_PER_CELL)
    }

    fn row(&self, px: u32) -> TermInt {
        clamp(1 + px / self.cell_size)
    }

    fn print_at(&mut self, pos: Coords, text: &str, fg: TermColor, bg: TermColor) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::PrintStyledContent(text.with(fg).on(bg)))
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Surface for TermManager {
    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> io::Result<()> {
        let (left, right) = (self.column(x), self.column(x + width));
        let (top, bottom) = (self.row(y), self.row(y + height));
        let line = " ".repeat(right.saturating_sub(left) as usize);
        let bg = term_color(self.fill);

        for y in top..bottom {
            self.print_at((left, y), &line, bg, bg)?;
        }
        Ok(())
    }

    /// Draws a frame just outside the area. Single cells have no room for
    /// an outline and are skipped.
    fn stroke_rect(&mut self, x: u32, y: u32, width: u32, height: u32) -> io::Result<()> {
        if width <= self.cell_size && height <= self.cell_size {
            return Ok(());
        }

        let (left, right) = (self.column(x).saturating_sub(1), self.column(x + width));
        let (top, bottom) = (self.row(y).saturating_sub(1), self.row(y + height));
        let fg = term_color(self.stroke);

        for x in left..=right {
            let ch = if x == left || x == right {"+"} else {"-"};
            self.print_at((x, top), ch, fg, TermColor::Reset)?;
            self.print_at((x, bottom), ch, fg, TermColor::Reset)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), "|", fg, TermColor::Reset)?;
            self.print_at((right, y), "|", fg, TermColor::Reset)?;
        }
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: u32, y: u32) -> io::Result<()> {
        // Canvas text sits on its baseline, which falls inside the row above
        let pos = (self.column(x), self.row(y.saturating_sub(1)));
        let fg = term_color(self.fill);
        self.print_at(pos, text, fg, PAPER)
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Black => TermColor::Black,
        Color::Blue => TermColor::Blue,
        Color::Green => TermColor::Green,
    }
}

fn clamp(v: u32) -> TermInt {
    v.min(TermInt::MAX as u32) as TermInt
}
