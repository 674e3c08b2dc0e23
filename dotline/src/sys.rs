//! Controlling terminal of the process, backed by `termios`.

use std::fs::File;
use std::io::{self, Read as _, Write as _};
use std::os::fd::AsFd;
use std::path::Path;

use embedded_io::ErrorKind;
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use nix::sys::termios::{
    tcflush, tcgetattr, tcsetattr, FlushArg, LocalFlags, SetArg, SpecialCharacterIndices, Termios,
};

use crate::terminal::{TermAttrs, TerminalDevice};

/// How long to wait for the rest of an escape sequence after ESC.
pub const ESCAPE_TIMEOUT_MS: u16 = 50;

fn kind(err: io::ErrorKind) -> ErrorKind {
    match err {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
        io::ErrorKind::BrokenPipe => ErrorKind::BrokenPipe,
        io::ErrorKind::InvalidInput => ErrorKind::InvalidInput,
        io::ErrorKind::InvalidData => ErrorKind::InvalidData,
        io::ErrorKind::TimedOut => ErrorKind::TimedOut,
        io::ErrorKind::WriteZero => ErrorKind::WriteZero,
        io::ErrorKind::Interrupted => ErrorKind::Interrupted,
        io::ErrorKind::Unsupported => ErrorKind::Unsupported,
        io::ErrorKind::OutOfMemory => ErrorKind::OutOfMemory,
        _ => ErrorKind::Other,
    }
}

fn errno_kind(errno: Errno) -> ErrorKind {
    kind(io::Error::from(errno).kind())
}

impl TermAttrs for Termios {
    fn disable_canonical_and_echo(&mut self) {
        self.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
    }

    fn set_read_timing(&mut self, min_bytes: u8, timeout: u8) {
        self.control_chars[SpecialCharacterIndices::VMIN as usize] = min_bytes;
        self.control_chars[SpecialCharacterIndices::VTIME as usize] = timeout;
    }
}

/// A terminal device file, usually `/dev/tty`.
#[derive(Debug)]
pub struct Tty {
    file: File,
}

impl Tty {
    /// Open the controlling terminal.
    pub fn open() -> io::Result<Self> {
        Self::open_path("/dev/tty")
    }

    pub fn open_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::options().read(true).write(true).open(path)?;

        Ok(Self::from_file(file))
    }

    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

impl TerminalDevice for Tty {
    type Attrs = Termios;

    fn get_attrs(&mut self) -> Result<Termios, ErrorKind> {
        tcgetattr(self.file.as_fd()).map_err(errno_kind)
    }

    fn set_attrs(&mut self, attrs: &Termios) -> Result<(), ErrorKind> {
        tcsetattr(self.file.as_fd(), SetArg::TCSANOW, attrs).map_err(errno_kind)
    }

    fn flush_input(&mut self) -> Result<(), ErrorKind> {
        tcflush(self.file.as_fd(), FlushArg::TCIFLUSH).map_err(errno_kind)
    }
}

impl embedded_io::ErrorType for Tty {
    type Error = ErrorKind;
}

impl embedded_io::Read for Tty {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.file.read(buf).map_err(|e| kind(e.kind()))
    }
}

impl embedded_io::ReadReady for Tty {
    /// Waits up to [`ESCAPE_TIMEOUT_MS`] for input.
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        let mut fds = [PollFd::new(self.file.as_fd(), PollFlags::POLLIN)];

        match poll(&mut fds, PollTimeout::from(ESCAPE_TIMEOUT_MS)) {
            Ok(ready) => Ok(ready > 0),
            Err(Errno::EINTR) => Ok(false),
            Err(errno) => Err(errno_kind(errno)),
        }
    }
}

impl embedded_io::Write for Tty {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.file.write(buf).map_err(|e| kind(e.kind()))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.file.flush().map_err(|e| kind(e.kind()))
    }
}
