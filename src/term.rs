use crate::config::{GameConfig, Palette};
use crate::session::WorldState;
use crate::{Coords, TermInt};
use std::{io::{self, Stdout, Write, stdout}, time::Instant};

use anyhow::{bail, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Upper half block: foreground paints the upper grid row, background the lower one.
const HALF_BLOCK: char = '▀';

type ScreenPos = (TermInt, TermInt);

/// Rows above the board: the score line.
const HEADER_ROWS: TermInt = 1;

pub struct TermManager {
    stdout: Stdout,
    board: Board,
}

/// Where the grid sits on screen and how it is colored.
struct Board {
    columns: usize,
    rows: usize,
    step: i32,
    palette: Palette,
}

impl TermManager {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let board = Board::new(config);

        let (need_w, need_h) = board.screen_size();
        if width < need_w || height < need_h {
            bail!("terminal is {}x{}, the board needs at least {}x{}", width, height, need_w, need_h);
        }

        Ok(TermManager { stdout: stdout(), board })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn read_key_blocking(&self) -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    /// Collects every key event that arrives before `deadline`.
    pub fn read_key_events_until(&self, deadline: Instant) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !poll(timeout)? {
                break;
            }
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            if Instant::now() >= deadline {
                break;
            }
        }

        Ok(events)
    }

    pub fn draw_borders(&mut self) -> io::Result<()> {
        let (width, height) = self.board.screen_size();
        let end_x = width - 1;
        let end_y = height - 1;

        for x in 0..width {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, HEADER_ROWS), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in HEADER_ROWS + 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    pub fn draw_world(&mut self, world: &WorldState) -> io::Result<()> {
        let cells = self.board.paint(world);
        let columns = self.board.columns;

        for (row, pair) in cells.chunks(2 * columns).enumerate() {
            let y = HEADER_ROWS + 1 + row as TermInt;
            queue!(self.stdout, cursor::MoveTo(1, y))?;

            let (upper, lower) = pair.split_at(columns.min(pair.len()));
            for (x, top) in upper.iter().enumerate() {
                let bottom = lower.get(x).copied().unwrap_or(self.board.palette.background);
                queue!(
                    self.stdout,
                    style::SetForegroundColor(*top),
                    style::SetBackgroundColor(bottom),
                    style::Print(HALF_BLOCK)
                )?;
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.draw_score(world.score)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 4) as TermInt;
        let (board_w, board_h) = self.board.screen_size();
        let center = (board_w / 2, (board_h + HEADER_ROWS) / 2);
        let top_left = (center.0.saturating_sub(msg_width / 2), center.1.saturating_sub(msg_height / 2));

        queue!(
            self.stdout,
            style::SetForegroundColor(self.board.palette.text),
            style::SetBackgroundColor(self.board.palette.background)
        )?;

        for y_diff in 0..msg_height {
            let line = match y_diff {
                0 => "",
                d if d == msg_height - 1 => "",
                d => lines[d as usize - 1],
            };
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(
                self.stdout,
                cursor::MoveTo(top_left.0, top_left.1 + y_diff),
                style::Print(padded_line)
            )?;
        }

        queue!(self.stdout, style::ResetColor)?;
        self.flush()
    }

    pub fn print_at(&mut self, pos: ScreenPos, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_score(&mut self, score: u32) -> io::Result<()> {
        let (board_w, _) = self.board.screen_size();
        let text = format!("{text: ^width$}", text = format!("Score : {}", score), width = board_w as usize);

        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            style::SetForegroundColor(self.board.palette.snake),
            style::Print(text),
            style::ResetColor
        )
    }
}

impl Board {
    fn new(config: &GameConfig) -> Self {
        Board {
            columns: config.columns() as usize,
            rows: config.rows() as usize,
            step: config.step,
            palette: config.palette,
        }
    }

    /// Terminal cells taken by the board, borders and score line included.
    fn screen_size(&self) -> ScreenPos {
        let width = self.columns + 2;
        let height = (self.rows + 1) / 2 + 2 + HEADER_ROWS as usize;
        (width as TermInt, height as TermInt)
    }

    /// One color per grid cell, row by row. Cells outside the grid are skipped.
    fn paint(&self, world: &WorldState) -> Vec<Color> {
        let mut cells = vec![self.palette.background; self.columns * self.rows];

        let cells_at = world.body.iter().map(|&pos| (pos, self.palette.snake));
        for (pos, color) in world.food.map(|pos| (pos, self.palette.food)).into_iter().chain(cells_at) {
            if let Some(i) = self.index(pos) {
                cells[i] = color;
            }
        }

        cells
    }

    fn index(&self, (x, y): Coords) -> Option<usize> {
        let (col, row) = (x / self.step, y / self.step);
        if x < 0 || y < 0 || col as usize >= self.columns || row as usize >= self.rows {
            return None;
        }
        Some(row as usize * self.columns + col as usize)
    }
}
