use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use crossbeam::channel::Receiver;
use embedded_io::ErrorKind;

use crate::core::EditorState;
use crate::error::EditorError;
use crate::output::{AnsiRenderer, Renderer};
use crate::terminal::{TermAttrs, TerminalDevice, QUERY_CURSOR_POSITION};

pub mod csi {
    pub const UP: &str = "\x1b[A";
    pub const DOWN: &str = "\x1b[B";
    pub const LEFT: &str = "\x1b[D";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockAttrs {
    pub canonical: bool,
    pub echo: bool,
    pub min_bytes: u8,
    pub timeout: u8,
}

impl Default for MockAttrs {
    fn default() -> Self {
        Self {
            canonical: true,
            echo: true,
            min_bytes: 0,
            timeout: 10,
        }
    }
}

impl TermAttrs for MockAttrs {
    fn disable_canonical_and_echo(&mut self) {
        self.canonical = false;
        self.echo = false;
    }

    fn set_read_timing(&mut self, min_bytes: u8, timeout: u8) {
        self.min_bytes = min_bytes;
        self.timeout = timeout;
    }
}

/// Terminal stand-in. Answers cursor position queries with
/// `cursor_column`, and keeps input typed before the editor took over
/// apart so that flushing it can be observed.
#[derive(Debug)]
pub struct MockDevice {
    typeahead: VecDeque<u8>,
    input: VecDeque<u8>,
    keyboard: Option<Receiver<Vec<u8>>>,
    pub output: Vec<u8>,
    pub attrs: MockAttrs,
    pub attrs_set: Vec<MockAttrs>,
    pub cursor_column: Option<usize>,
    pub fail_get_attrs: bool,
    pub fail_set_attrs: bool,
    pub fail_restore: bool,
    pub fail_write: bool,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            typeahead: VecDeque::new(),
            input: VecDeque::new(),
            keyboard: None,
            output: Vec::new(),
            attrs: MockAttrs::default(),
            attrs_set: Vec::new(),
            cursor_column: Some(1),
            fail_get_attrs: false,
            fail_set_attrs: false,
            fail_restore: false,
            fail_write: false,
        }
    }

    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        let mut device = Self::new();
        device.push_input(input);
        device
    }

    /// Input arrives in chunks over a channel. Reads block until a chunk
    /// is there and report end of input once the sender is gone.
    pub fn with_keyboard(keyboard: Receiver<Vec<u8>>) -> Self {
        let mut device = Self::new();
        device.keyboard = Some(keyboard);
        device
    }

    pub fn push_input(&mut self, input: impl AsRef<[u8]>) {
        self.input.extend(input.as_ref());
    }

    /// Input pending before the editor starts
    pub fn push_typeahead(&mut self, input: impl AsRef<[u8]>) {
        self.typeahead.extend(input.as_ref());
    }

    pub fn output_as_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    fn next_byte(&mut self) -> Option<u8> {
        if let Some(byte) = self.typeahead.pop_front() {
            return Some(byte);
        }

        if self.input.is_empty() {
            if let Some(keyboard) = &self.keyboard {
                if let Ok(chunk) = keyboard.recv() {
                    self.input.extend(chunk);
                }
            }
        }

        self.input.pop_front()
    }
}

impl embedded_io::ErrorType for MockDevice {
    type Error = ErrorKind;
}

impl embedded_io::Read for MockDevice {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        match self.next_byte() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl embedded_io::ReadReady for MockDevice {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.typeahead.is_empty() || !self.input.is_empty())
    }
}

impl embedded_io::Write for MockDevice {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_write {
            return Err(ErrorKind::BrokenPipe);
        }

        self.output.extend_from_slice(buf);

        if buf == QUERY_CURSOR_POSITION {
            if let Some(column) = self.cursor_column {
                let report = format!("\x1b[1;{column}R");

                for &byte in report.as_bytes().iter().rev() {
                    self.input.push_front(byte);
                }
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl TerminalDevice for MockDevice {
    type Attrs = MockAttrs;

    fn get_attrs(&mut self) -> Result<Self::Attrs, ErrorKind> {
        if self.fail_get_attrs {
            return Err(ErrorKind::Unsupported);
        }

        Ok(self.attrs.clone())
    }

    fn set_attrs(&mut self, attrs: &Self::Attrs) -> Result<(), ErrorKind> {
        if self.fail_set_attrs || (self.fail_restore && attrs.canonical) {
            return Err(ErrorKind::PermissionDenied);
        }

        self.attrs = attrs.clone();
        self.attrs_set.push(attrs.clone());

        Ok(())
    }

    fn flush_input(&mut self) -> Result<(), ErrorKind> {
        dbg!(self.typeahead.len());
        self.typeahead.clear();

        Ok(())
    }
}

/// Renderer that fails on the listed calls, counted from 1, and
/// otherwise draws like [`AnsiRenderer`].
#[derive(Debug, Default)]
pub struct FailingRenderer {
    inner: AnsiRenderer,
    pub calls: usize,
    pub fail_on: Vec<usize>,
}

impl FailingRenderer {
    pub fn new(fail_on: &[usize]) -> Self {
        Self {
            inner: AnsiRenderer::new(),
            calls: 0,
            fail_on: fail_on.to_vec(),
        }
    }
}

impl Renderer for FailingRenderer {
    fn render<W: embedded_io::Write>(
        &mut self,
        out: &mut W,
        state: &EditorState,
    ) -> Result<(), EditorError> {
        self.calls += 1;

        if self.fail_on.contains(&self.calls) {
            return Err(EditorError::WriteError(ErrorKind::BrokenPipe));
        }

        self.inner.render(out, state)
    }
}
