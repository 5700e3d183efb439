// Copyright (c) 2026 matrixdeck contributors

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::frame::Frame;

/// Raw-mode alternate-screen session. Restores the terminal on drop; the
/// panic hook and signal handlers call `restore_terminal_best_effort` for
/// the paths drop cannot reach.
pub struct Terminal {
    stdout: Stdout,
    last_size: Option<(u16, u16)>,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last_size: None,
        })
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll_event(timeout: std::time::Duration) -> Result<bool> {
        event::poll(timeout)
    }

    pub fn read_event() -> Result<event::Event> {
        event::read()
    }

    /// Flushes the frame. Repaints everything after a resize or a
    /// full-frame invalidation, otherwise only the dirty cells.
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let size_changed = self.last_size != Some((frame.width, frame.height));
        if size_changed {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
            self.last_size = Some((frame.width, frame.height));
        }

        let mut painter = Painter::new(&mut self.stdout);

        if size_changed || frame.is_dirty_all() {
            for y in 0..frame.height {
                painter.out.queue(cursor::MoveTo(0, y))?;
                painter.pos = Some((0, y));
                for x in 0..frame.width {
                    let idx = y as usize * frame.width as usize + x as usize;
                    painter.put(frame, idx)?;
                }
                painter.pos = None;
            }
        } else {
            let mut dirty: Vec<usize> = frame.dirty_indices().to_vec();
            dirty.sort_unstable();
            for idx in dirty {
                painter.moveto(idx, frame.width)?;
                painter.put(frame, idx)?;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

/// Tracks the color/attribute/cursor state already sent, so consecutive
/// cells in the same style cost one Print each.
struct Painter<'a> {
    out: &'a mut Stdout,
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    pos: Option<(u16, u16)>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Stdout) -> Self {
        Self {
            out,
            fg: None,
            bg: None,
            bold: false,
            pos: None,
        }
    }

    fn moveto(&mut self, idx: usize, width: u16) -> Result<()> {
        let x = (idx % width as usize) as u16;
        let y = (idx / width as usize) as u16;
        if self.pos != Some((x, y)) {
            self.out.queue(cursor::MoveTo(x, y))?;
        }
        self.pos = Some((x, y));
        Ok(())
    }

    fn put(&mut self, frame: &Frame, idx: usize) -> Result<()> {
        let cell = frame.cell_at_index(idx);

        if cell.fg != self.fg {
            self.out
                .queue(SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
            self.fg = cell.fg;
        }
        if cell.bg != self.bg {
            self.out
                .queue(SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
            self.bg = cell.bg;
        }
        if cell.bold != self.bold {
            self.out.queue(SetAttribute(if cell.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
            self.bold = cell.bold;
        }

        self.out.queue(Print(cell.ch))?;
        if let Some((x, y)) = self.pos {
            self.pos = if x + 1 < frame.width {
                Some((x + 1, y))
            } else {
                None
            };
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}
