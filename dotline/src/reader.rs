//! Key decoder: turns raw terminal bytes into [`Key`] events.

use embedded_io::{Read, ReadReady};

use crate::error::EditorError;
use crate::input::{Action, Parser, CSI};
use crate::key::Key;

/// Decoded unit of terminal input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Key(Key),
    CursorPosition(usize, usize),
}

/// Reads one key at a time from a device implementing
/// [`embedded_io::Read`]. A lone ESC byte is told apart from the start
/// of an escape sequence by asking the device whether more input is
/// ready; devices that wait a little before answering give the
/// disambiguation its timeout.
#[derive(Debug, Default)]
pub struct KeyReader {
    parser: Parser,
}

fn read_error<E: embedded_io::Error>(err: E) -> EditorError {
    EditorError::ReadError(err.kind())
}

impl KeyReader {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    fn read_byte<IO: Read>(io: &mut IO) -> Result<u8, EditorError> {
        let mut buf = [0u8; 1];

        match io.read(&mut buf).map_err(read_error)? {
            0 => Err(EditorError::Aborted),
            _ => Ok(buf[0]),
        }
    }

    fn event(action: Action) -> Option<Result<Event, EditorError>> {
        match action {
            Action::Ignore => None,
            Action::Print(c) => Some(Ok(Event::Key(Key::char(c)))),
            Action::InvalidUtf8 => Some(Err(EditorError::InvalidUtf8)),
            Action::ControlCharacter(c) => Some(Ok(Event::Key(c.key()))),
            Action::EscapeSequence(_) => Some(Err(EditorError::UnsupportedSequence)),
            Action::ControlSequenceIntroducer(CSI::CPR(row, column)) => {
                Some(Ok(Event::CursorPosition(row, column)))
            }
            Action::ControlSequenceIntroducer(csi) => {
                Some(csi.key().map(Event::Key).ok_or(EditorError::UnsupportedSequence))
            }
        }
    }

    fn read_event<IO: Read + ReadReady>(&mut self, io: &mut IO) -> Result<Event, EditorError> {
        loop {
            if self.parser.is_escape_pending() && !io.read_ready().map_err(read_error)? {
                let action = self.parser.cancel_escape();

                if let Some(event) = Self::event(action) {
                    return event;
                }
            }

            let byte = Self::read_byte(io)?;

            if let Some(event) = Self::event(self.parser.advance(byte)) {
                return event;
            }
        }
    }

    /// Block until a key is decoded.
    pub fn read_key<IO: Read + ReadReady>(&mut self, io: &mut IO) -> Result<Key, EditorError> {
        match self.read_event(io)? {
            Event::Key(key) => Ok(key),
            Event::CursorPosition(_, _) => Err(EditorError::UnexpectedCursorReport),
        }
    }

    /// Block until a cursor position report arrives and return it as
    /// 1-based `(row, column)`. Keys typed before the report are
    /// dropped.
    pub fn read_cursor_position<IO: Read + ReadReady>(
        &mut self,
        io: &mut IO,
    ) -> Result<(usize, usize), EditorError> {
        loop {
            match self.read_event(io) {
                Ok(Event::CursorPosition(row, column)) => return Ok((row, column)),
                Ok(Event::Key(key)) => log::debug!("dropping {key} while waiting for cursor report"),
                Err(err) if err.is_transient() => (),
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyCode;
    use crate::testlib::MockDevice;

    #[test]
    fn keys() {
        let mut device = MockDevice::with_input("aø\r\x1b[D\x1b[C\x04\x7f\t");
        let mut reader = KeyReader::new();

        let expected = [
            Key::char('a'),
            Key::char('ø'),
            Key::plain(KeyCode::Enter),
            Key::plain(KeyCode::Left),
            Key::plain(KeyCode::Right),
            Key::ctrl('D'),
            Key::plain(KeyCode::Backspace),
            Key::plain(KeyCode::Tab),
        ];

        for key in expected {
            assert_eq!(reader.read_key(&mut device), Ok(key));
        }

        assert_eq!(reader.read_key(&mut device), Err(EditorError::Aborted));
    }

    #[test]
    fn lone_escape_is_ctrl_bracket() {
        let mut device = MockDevice::with_input("\x1b");
        let mut reader = KeyReader::new();

        assert_eq!(reader.read_key(&mut device), Ok(Key::ctrl('[')));
    }

    #[test]
    fn escape_then_key_in_separate_reads() {
        let mut device = MockDevice::with_input("\x1b");
        let mut reader = KeyReader::new();

        assert_eq!(reader.read_key(&mut device), Ok(Key::ctrl('[')));

        device.push_input("h");
        assert_eq!(reader.read_key(&mut device), Ok(Key::char('h')));
    }

    #[test]
    fn decode_errors() {
        let mut device = MockDevice::with_input(b"\x1bx\x1b[5;5R\xffa");
        let mut reader = KeyReader::new();

        assert_eq!(
            reader.read_key(&mut device),
            Err(EditorError::UnsupportedSequence)
        );
        assert_eq!(
            reader.read_key(&mut device),
            Err(EditorError::UnexpectedCursorReport)
        );
        assert_eq!(reader.read_key(&mut device), Err(EditorError::InvalidUtf8));
        assert_eq!(reader.read_key(&mut device), Ok(Key::char('a')));
    }

    #[test]
    fn cursor_position() {
        let mut device = MockDevice::with_input("ab\x1b[12;40R");
        let mut reader = KeyReader::new();

        assert_eq!(reader.read_cursor_position(&mut device), Ok((12, 40)));
        assert_eq!(reader.read_key(&mut device), Err(EditorError::Aborted));
    }
}
