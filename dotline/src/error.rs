//! Error types

use core::fmt;

use embedded_io::ErrorKind;

/// Enum to hold various error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// Input bytes did not form valid UTF-8
    InvalidUtf8,
    /// Escape sequence the key decoder has no key for
    UnsupportedSequence,
    /// Cursor position report arrived while waiting for a key
    UnexpectedCursorReport,
    /// Input was closed
    Aborted,
    ReadError(ErrorKind),
    WriteError(ErrorKind),
    /// Terminal could not be put under editor control
    Setup(ErrorKind),
    /// Terminal attributes could not be restored
    Teardown(ErrorKind),
}

impl EditorError {
    /// Key read failures that only cost the current key. These are
    /// shown to the user as tips and the read loop carries on.
    pub fn is_transient(&self) -> bool {
        match *self {
            EditorError::InvalidUtf8
            | EditorError::UnsupportedSequence
            | EditorError::UnexpectedCursorReport => true,
            EditorError::ReadError(kind) => {
                matches!(kind, ErrorKind::Interrupted | ErrorKind::TimedOut)
            }
            EditorError::Aborted
            | EditorError::WriteError(_)
            | EditorError::Setup(_)
            | EditorError::Teardown(_) => false,
        }
    }
}

impl embedded_io::Error for EditorError {
    fn kind(&self) -> ErrorKind {
        match *self {
            EditorError::InvalidUtf8
            | EditorError::UnsupportedSequence
            | EditorError::UnexpectedCursorReport => ErrorKind::InvalidData,
            EditorError::Aborted => ErrorKind::ConnectionAborted,
            EditorError::ReadError(e)
            | EditorError::WriteError(e)
            | EditorError::Setup(e)
            | EditorError::Teardown(e) => e.kind(),
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::InvalidUtf8 => f.write_str("invalid UTF-8 in input"),
            EditorError::UnsupportedSequence => f.write_str("unsupported escape sequence"),
            EditorError::UnexpectedCursorReport => f.write_str("unexpected cursor position report"),
            EditorError::Aborted => f.write_str("input closed"),
            EditorError::ReadError(kind) => write!(f, "can't read from terminal: {kind:?}"),
            EditorError::WriteError(kind) => write!(f, "can't write to terminal: {kind:?}"),
            EditorError::Setup(kind) => write!(f, "can't set up terminal attribute: {kind:?}"),
            EditorError::Teardown(kind) => {
                write!(f, "can't restore terminal attribute: {kind:?}")
            }
        }
    }
}

impl core::error::Error for EditorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::Error;
    use std::string::ToString;

    #[test]
    fn transient() {
        assert!(EditorError::InvalidUtf8.is_transient());
        assert!(EditorError::UnsupportedSequence.is_transient());
        assert!(EditorError::ReadError(ErrorKind::Interrupted).is_transient());

        assert!(!EditorError::Aborted.is_transient());
        assert!(!EditorError::ReadError(ErrorKind::BrokenPipe).is_transient());
        assert!(!EditorError::WriteError(ErrorKind::Interrupted).is_transient());
    }

    #[test]
    fn kind_and_message() {
        assert_eq!(EditorError::InvalidUtf8.kind(), ErrorKind::InvalidData);
        assert_eq!(EditorError::Aborted.kind(), ErrorKind::ConnectionAborted);
        assert!(!EditorError::ReadError(EditorError::Aborted.kind()).is_transient());
        assert_eq!(
            EditorError::Setup(ErrorKind::PermissionDenied).kind(),
            ErrorKind::PermissionDenied
        );
        assert_eq!(
            EditorError::UnsupportedSequence.to_string(),
            "unsupported escape sequence"
        );
    }
}
