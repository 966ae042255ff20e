//! Terminal event loop for an [AnnotationSession].

use std::io;

use console::{measure_text_width, Key, Term};

use super::{AnnotationSession, InputKey, TagCreator};
use crate::error::Result;
use crate::ui::formatter::render_session;

/// Source of key presses
pub trait KeySource {
    fn next_key(&mut self) -> io::Result<InputKey>;
}

/// Reads keys from a terminal
pub struct TerminalKeys<'t> {
    term: &'t Term,
}

impl<'t> TerminalKeys<'t> {
    pub fn new(term: &'t Term) -> Self {
        TerminalKeys { term }
    }
}

impl KeySource for TerminalKeys<'_> {
    fn next_key(&mut self) -> io::Result<InputKey> {
        match self.term.read_key() {
            Ok(key) => Ok(map_key(key)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(InputKey::Interrupt),
            Err(e) => Err(e),
        }
    }
}

impl<I: Iterator<Item = InputKey>> KeySource for I {
    fn next_key(&mut self) -> io::Result<InputKey> {
        self.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no more key events")
        })
    }
}

/// Translate a console key into an [InputKey]
pub fn map_key(key: Key) -> InputKey {
    match key {
        Key::Char('\u{3}') => InputKey::Interrupt,
        Key::Char(c) => InputKey::Char(c),
        Key::Backspace => InputKey::Backspace,
        Key::Del => InputKey::Delete,
        Key::ArrowLeft => InputKey::Left,
        Key::ArrowRight => InputKey::Right,
        Key::Home => InputKey::Home,
        Key::End => InputKey::End,
        Key::Enter => InputKey::Enter,
        Key::Escape => InputKey::Escape,
        _ => InputKey::Other,
    }
}

/// Run the session loop until it leaves `Editing`
///
/// `on_frame` receives the rendered session before the first key and after
/// every key, including the final frame.
pub fn drive<K, C, F>(
    session: &mut AnnotationSession,
    keys: &mut K,
    creator: &C,
    mut on_frame: F,
) -> Result<()>
where
    K: KeySource,
    C: TagCreator,
    F: FnMut(&str) -> io::Result<()>,
{
    on_frame(&render_session(session))?;

    while !session.is_finished() {
        let key = keys.next_key()?;
        session.handle_key(key, creator);
        on_frame(&render_session(session))?;
    }

    Ok(())
}

/// Run the session on a terminal, redrawing in place after every key
pub fn run_interactive<C: TagCreator>(
    term: &Term,
    session: &mut AnnotationSession,
    creator: &C,
) -> Result<()> {
    let mut keys = TerminalKeys::new(term);
    let mut drawn_rows = 0;

    term.hide_cursor()?;
    let result = drive(session, &mut keys, creator, |frame| {
        if drawn_rows > 0 {
            term.clear_last_lines(drawn_rows)?;
        }
        for line in frame.lines() {
            term.write_line(line)?;
        }
        drawn_rows = rows_for(frame, term.size().1 as usize);
        Ok(())
    });
    term.show_cursor()?;

    result
}

/// Terminal rows a frame occupies once long lines wrap
fn rows_for(frame: &str, columns: usize) -> usize {
    frame
        .lines()
        .map(|line| {
            let width = measure_text_width(line);
            if columns == 0 || width == 0 {
                1
            } else {
                width.div_ceil(columns)
            }
        })
        .sum()
}
