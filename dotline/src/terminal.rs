//! Terminal attribute access and the escape sequences the session uses.

use embedded_io::ErrorKind;

/// Turn off autowrap so rendering never spills onto the next row
pub const DISABLE_AUTOWRAP: &[u8] = b"\x1b[?7l";
pub const ENABLE_AUTOWRAP: &[u8] = b"\x1b[?7h";
/// Cursor position report request
pub const QUERY_CURSOR_POSITION: &[u8] = b"\x1b[6n";
/// Printed when the previous output did not end with a newline:
/// reverse video return symbol, then a newline.
pub const MISSING_EOL: &[u8] = "\x1b[7m\u{23ce}\x1b[m\n".as_bytes();

/// Saved terminal attributes, e.g. a `termios`.
pub trait TermAttrs: Clone {
    fn disable_canonical_and_echo(&mut self);

    /// `min_bytes` is the least a read returns, `timeout` the wait
    /// between bytes in tenths of a second.
    fn set_read_timing(&mut self, min_bytes: u8, timeout: u8);
}

/// Terminal whose attributes can be read and changed.
pub trait TerminalDevice {
    type Attrs: TermAttrs;

    fn get_attrs(&mut self) -> Result<Self::Attrs, ErrorKind>;

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), ErrorKind>;

    /// Discard input that has been received but not read.
    fn flush_input(&mut self) -> Result<(), ErrorKind>;
}

impl<T: TerminalDevice> TerminalDevice for &mut T {
    type Attrs = T::Attrs;

    fn get_attrs(&mut self) -> Result<Self::Attrs, ErrorKind> {
        T::get_attrs(self)
    }

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), ErrorKind> {
        T::set_attrs(self, attrs)
    }

    fn flush_input(&mut self) -> Result<(), ErrorKind> {
        T::flush_input(self)
    }
}

/// Attributes for editing: byte-at-a-time reads that return as soon as
/// one byte is there, no echo.
pub fn editing_attrs<A: TermAttrs>(saved: &A) -> A {
    let mut attrs = saved.clone();

    attrs.disable_canonical_and_echo();
    attrs.set_read_timing(1, 0);

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::MockAttrs;

    #[test]
    fn editing_attrs_leave_saved_alone() {
        let saved = MockAttrs::default();

        let attrs = editing_attrs(&saved);

        assert!(!attrs.canonical);
        assert!(!attrs.echo);
        assert_eq!((attrs.min_bytes, attrs.timeout), (1, 0));

        assert!(saved.canonical);
        assert!(saved.echo);
    }

    #[test]
    fn missing_eol_banner() {
        assert_eq!(MISSING_EOL, "\x1b[7m⏎\x1b[m\n".as_bytes());
    }
}
