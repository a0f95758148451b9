use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show, position};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
    KeyEventKind, KeyModifiers as CrosstermKeyModifiers,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, ScrollUp,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Char(char),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Home,
    End,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub col: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(TerminalSize),
    Tick,
}

/// Inline terminal host: renders a block of lines anchored at the row the
/// cursor occupied on `enter`, scrolling the viewport when the block would
/// run past the bottom.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    anchor_row: u16,
    drawn_lines: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            anchor_row: 0,
            drawn_lines: 0,
        })
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn enter(&mut self) -> io::Result<()> {
        let (_, row) = position()?;
        self.anchor_row = row.min(self.size.height.saturating_sub(1));
        terminal::enable_raw_mode()?;
        execute!(self.stdout, DisableLineWrap, Hide)?;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        let last_row = self
            .anchor_row
            .saturating_add(self.drawn_lines.saturating_sub(1))
            .min(self.size.height.saturating_sub(1));
        queue!(self.stdout, MoveTo(0, last_row))?;
        execute!(self.stdout, EnableLineWrap, Show)?;
        terminal::disable_raw_mode()?;
        self.stdout.write_all(b"\r\n")?;
        self.stdout.flush()
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if event::poll(timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        return Ok(TerminalEvent::Tick);
                    }
                    Ok(TerminalEvent::Key(map_key_event(key)))
                }
                CrosstermEvent::Resize(width, height) => {
                    self.size = TerminalSize { width, height };
                    self.anchor_row = self.anchor_row.min(height.saturating_sub(1));
                    Ok(TerminalEvent::Resize(self.size))
                }
                _ => Ok(TerminalEvent::Tick),
            }
        } else {
            Ok(TerminalEvent::Tick)
        }
    }

    pub fn render(&mut self, lines: &[SpanLine], cursor: Option<CursorPos>) -> io::Result<()> {
        let height = self.size.height;
        let width = self.size.width;
        if height == 0 || width == 0 {
            return Ok(());
        }

        let draw_count = (lines.len().min(height as usize)) as u16;
        let overflow = self
            .anchor_row
            .saturating_add(draw_count)
            .saturating_sub(height);
        if overflow > 0 {
            queue!(
                self.stdout,
                MoveTo(0, height.saturating_sub(1)),
                ScrollUp(overflow)
            )?;
            self.anchor_row = self.anchor_row.saturating_sub(overflow);
        }

        queue!(
            self.stdout,
            Hide,
            MoveTo(0, self.anchor_row),
            Clear(ClearType::FromCursorDown)
        )?;

        for (index, line) in lines.iter().take(draw_count as usize).enumerate() {
            queue!(self.stdout, MoveTo(0, self.anchor_row + index as u16))?;
            self.write_span_line(line, width)?;
        }
        self.drawn_lines = draw_count;

        if let Some(cursor) = cursor {
            if cursor.row < draw_count {
                let col = cursor.col.min(width.saturating_sub(1));
                queue!(self.stdout, MoveTo(col, self.anchor_row + cursor.row), Show)?;
            }
        }

        self.stdout.flush()
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let mut used = 0usize;
        for span in line {
            if used >= width as usize {
                break;
            }
            let available = (width as usize).saturating_sub(used);
            let clipped = clip_to_width(&span.text, available);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            used = used.saturating_add(display_width(&clipped));
            queue!(self.stdout, Print(clipped))?;
            if !span.style.is_plain() {
                queue!(self.stdout, ResetColor)?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
        }
        Ok(())
    }
}

pub fn display_width(text: &str) -> usize {
    text.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::White => CrosstermColor::White,
        Color::Rgb(r, g, b) => CrosstermColor::Rgb { r, g, b },
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out.0 |= KeyModifiers::SHIFT.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out.0 |= KeyModifiers::CONTROL.0;
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out.0 |= KeyModifiers::ALT.0;
    }
    out
}
