//! Crossterm terminal driver for pathviz.
//!
//! Provides a [`CrosstermDriver`] that implements [`pathviz_core::Driver`]:
//! terminal input becomes [`Msg`]s and render frames are drawn cell by cell
//! in true colour.

use std::io::{self, Stdout, Write};
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use pathviz_core::{
    AttrMask, Color, Context, Driver, Key, MouseAction, Msg, Pos, Style, grid::Frame,
};

/// How long one poll waits for input before letting the loop tick.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        _ => None,
    }
}

fn to_mouse_action(kind: MouseEventKind) -> Option<MouseAction> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(MouseAction::Main),
        MouseEventKind::Down(MouseButton::Right) => Some(MouseAction::Secondary),
        MouseEventKind::Up(_) => Some(MouseAction::Release),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(MouseAction::Move),
        _ => None,
    }
}

/// Translate one terminal event. Key releases and repeats are dropped, and
/// Ctrl-C (swallowed by raw mode) becomes [`Msg::Quit`].
fn to_msg(ev: Event, now: Instant) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            to_key(code).map(|key| Msg::KeyDown { key, time: now })
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => to_mouse_action(kind).map(|action| Msg::Mouse {
            action,
            pos: Pos::new(row as i32, column as i32),
            time: now,
        }),
        Event::Resize(cols, rows) => Some(Msg::Screen {
            rows: rows as i32,
            cols: cols as i32,
            time: now,
        }),
        _ => None,
    }
}

fn queue_style(out: &mut Stdout, style: Style) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_ct_color(style.fg)),
        SetBackgroundColor(to_ct_color(style.bg))
    )?;
    if style.attrs.contains(AttrMask::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.attrs.contains(AttrMask::REVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if style.attrs.contains(AttrMask::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

/// A terminal back-end using crossterm. Mouse capture is always on.
#[derive(Debug, Default)]
pub struct CrosstermDriver;

impl CrosstermDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !event::poll(POLL_TIMEOUT)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                break;
            }
            if let Some(msg) = to_msg(event::read()?, Instant::now()) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        let mut current: Option<Style> = None;

        for fc in &frame.cells {
            let p = fc.pos;
            queue!(stdout, cursor::MoveTo(p.col as u16, p.row as u16))?;
            if current != Some(fc.cell.style) {
                queue_style(&mut stdout, fc.cell.style)?;
                current = Some(fc.cell.style);
            }
            queue!(stdout, Print(fc.cell.ch))?;
        }

        queue!(stdout, SetAttribute(Attribute::Reset))?;
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys() {
        let now = Instant::now();
        assert!(matches!(
            to_msg(key(KeyCode::Char('a'), KeyModifiers::NONE), now),
            Some(Msg::KeyDown {
                key: Key::Char('a'),
                ..
            })
        ));
        assert!(matches!(
            to_msg(key(KeyCode::Char(' '), KeyModifiers::NONE), now),
            Some(Msg::KeyDown {
                key: Key::Space,
                ..
            })
        ));
        assert!(matches!(
            to_msg(key(KeyCode::Char('c'), KeyModifiers::CONTROL), now),
            Some(Msg::Quit)
        ));
        assert!(to_msg(key(KeyCode::Up, KeyModifiers::NONE), now).is_none());
    }

    #[test]
    fn key_release_is_ignored() {
        let mut ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert!(to_msg(Event::Key(ev), Instant::now()).is_none());
    }

    #[test]
    fn mouse_positions_are_row_col() {
        let now = Instant::now();
        match to_msg(mouse(MouseEventKind::Down(MouseButton::Left), 7, 3), now) {
            Some(Msg::Mouse { action, pos, .. }) => {
                assert_eq!(action, MouseAction::Main);
                assert_eq!(pos, Pos::new(3, 7));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            to_msg(mouse(MouseEventKind::Drag(MouseButton::Left), 0, 0), now),
            Some(Msg::Mouse {
                action: MouseAction::Move,
                ..
            })
        ));
        assert!(to_msg(mouse(MouseEventKind::ScrollUp, 0, 0), now).is_none());
    }

    #[test]
    fn resize() {
        assert!(matches!(
            to_msg(Event::Resize(80, 24), Instant::now()),
            Some(Msg::Screen {
                rows: 24,
                cols: 80,
                ..
            })
        ));
    }

    #[test]
    fn colors() {
        assert_eq!(to_ct_color(Color::DEFAULT), CtColor::Reset);
        assert_eq!(
            to_ct_color(Color::from_rgb(242, 153, 48)),
            CtColor::Rgb {
                r: 242,
                g: 153,
                b: 48
            }
        );
    }
}
