//! Raw-mode crossterm backend: paints a [`Document`] and reads input.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent};
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue, terminal};

use crate::buffer::{Buffer, Cell};
use crate::document::Document;
use crate::layout::{layout, LayoutResult};
use crate::render::render_to_buffer;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};

/// Owns the screen for its lifetime. Frames are double buffered and only
/// changed cells are written.
pub struct Terminal {
    stdout: io::Stdout,
    front: Buffer,
    back: Buffer,
    last_layout: LayoutResult,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )?;
        stdout.flush()?;

        let (width, height) = terminal::size()?;
        log::debug!("terminal opened at {width}x{height}");
        Ok(Self {
            stdout,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
            last_layout: LayoutResult::new(),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    /// Wait for input. `None` blocks until at least one event arrives; pending
    /// events are drained either way.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        if let Some(timeout) = timeout {
            if !event::poll(timeout)? {
                return Ok(Vec::new());
            }
        }

        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        Ok(events)
    }

    /// Lay out and paint the document, writing only the cells that changed.
    pub fn render(&mut self, doc: &Document) -> io::Result<&LayoutResult> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            log::debug!("terminal resized to {width}x{height}");
            self.front = Buffer::new(width, height);
            self.back = Buffer::new(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.back.clear();
        self.last_layout = layout(doc, self.back.area());
        render_to_buffer(&self.last_layout, &mut self.back);

        self.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(&self.last_layout)
    }

    /// The layout of the last rendered frame, for hit testing.
    pub fn layout(&self) -> &LayoutResult {
        &self.last_layout
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.back.diff(&self.front) {
            if cell.continuation {
                continue;
            }
            if pen.cursor != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.stdout, cell)?;
            queue!(self.stdout, Print(cell.symbol))?;

            let advance = char_width(cell.symbol).max(1) as u16;
            pen.cursor = Some((x.saturating_add(advance), y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

/// What the terminal currently draws with, so unchanged state isn't resent.
struct Pen {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: TextStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            style: TextStyle::PLAIN,
        }
    }
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, cell: &Cell) -> io::Result<()> {
        if cell.style != self.style {
            // Attributes can only be cleared all at once, which also drops colours.
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            if cell.style.bold {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if cell.style.dim {
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
            if cell.style.underline {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            self.style = cell.style;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = queue!(
            self.stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}
