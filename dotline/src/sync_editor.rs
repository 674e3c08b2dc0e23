//! Line editor for synchronous IO.
//!
//! The editor owns a device implementing [`TerminalDevice`] and the
//! [`Read`], [`ReadReady`] and [`Write`] traits. [`crate::sys::Tty`] is
//! a ready made implementation for the process terminal.
//!
//! Use the [`crate::builder::EditorBuilder`] to build an editor.
use alloc::format;
use alloc::string::String;
use core::fmt;

use embedded_io::{Read, ReadReady, Write};

use crate::builder::EditorBuilder;
use crate::complete::Completer;
use crate::core::{dispatch, EditorState, LineRead};
use crate::error::EditorError;
use crate::highlight::{Highlighter, Lexer};
use crate::keymap::Keymap;
use crate::output::{AnsiRenderer, Renderer};
use crate::reader::KeyReader;
use crate::terminal::{
    editing_attrs, TerminalDevice, DISABLE_AUTOWRAP, ENABLE_AUTOWRAP, MISSING_EOL,
    QUERY_CURSOR_POSITION,
};

fn setup_error<E: embedded_io::Error>(err: E) -> EditorError {
    EditorError::Setup(err.kind())
}

fn teardown_error<E: embedded_io::Error>(err: E) -> EditorError {
    EditorError::Teardown(err.kind())
}

/// Line editor for synchronous IO
///
/// Holds the terminal in editing mode from construction until
/// [`Editor::release`]. It is recommended to use
/// [`crate::builder::EditorBuilder`] to build an Editor.
pub struct Editor<D, C = (), H = Lexer, R = AnsiRenderer>
where
    D: TerminalDevice,
{
    device: D,
    saved: D::Attrs,
    reader: KeyReader,
    keymap: Keymap,
    completer: C,
    highlighter: H,
    renderer: R,
    source_label: String,
    state: EditorState,
}

impl<D> Editor<D>
where
    D: TerminalDevice + Read + ReadReady + Write,
{
    /// Take over the terminal with the default configuration.
    pub fn new(device: D) -> Result<Self, EditorError> {
        EditorBuilder::new().build(device)
    }
}

impl<D, C, H, R> Editor<D, C, H, R>
where
    D: TerminalDevice + Read + ReadReady + Write,
    C: Completer,
    H: Highlighter,
    R: Renderer,
{
    pub(crate) fn acquire(
        mut device: D,
        keymap: Keymap,
        completer: C,
        highlighter: H,
        renderer: R,
        source_label: String,
    ) -> Result<Self, EditorError> {
        let saved = device.get_attrs().map_err(EditorError::Setup)?;

        device
            .set_attrs(&editing_attrs(&saved))
            .map_err(EditorError::Setup)?;

        let mut reader = KeyReader::new();

        if let Err(err) = Self::handshake(&mut device, &mut reader) {
            if let Err(e) = device
                .write_all(ENABLE_AUTOWRAP)
                .and_then(|()| device.flush())
            {
                log::warn!(
                    "can't enable autowrap after failed setup: {:?}",
                    embedded_io::Error::kind(&e)
                );
            }

            if let Err(kind) = device.set_attrs(&saved) {
                log::warn!("can't restore terminal after failed setup: {kind:?}");
            }

            return Err(err);
        }

        log::debug!("terminal acquired");

        Ok(Self {
            device,
            saved,
            reader,
            keymap,
            completer,
            highlighter,
            renderer,
            source_label,
            state: EditorState::new(),
        })
    }

    /// Find out if the cursor sits at the start of a row, and mark the
    /// missing end of line if it doesn't. Typing during the query can
    /// end up ahead of the report and is dropped.
    fn handshake(device: &mut D, reader: &mut KeyReader) -> Result<(), EditorError> {
        device.write_all(DISABLE_AUTOWRAP).map_err(setup_error)?;
        device.flush_input().map_err(EditorError::Setup)?;

        device.write_all(QUERY_CURSOR_POSITION).map_err(setup_error)?;
        device.flush().map_err(setup_error)?;

        let (row, column) = reader.read_cursor_position(device).map_err(setup_error)?;

        log::debug!("cursor at row {row}, column {column}");

        if column != 1 {
            device.write_all(MISSING_EOL).map_err(setup_error)?;
            device.flush().map_err(setup_error)?;
        }

        Ok(())
    }

    /// Hand the terminal back in the state it was found. The device is
    /// returned on success.
    pub fn release(mut self) -> Result<D, EditorError> {
        let autowrap = self
            .device
            .write_all(ENABLE_AUTOWRAP)
            .and_then(|()| self.device.flush())
            .map_err(teardown_error);
        let restore = self
            .device
            .set_attrs(&self.saved)
            .map_err(EditorError::Teardown);

        log::debug!("terminal released");

        autowrap.and(restore).map(|()| self.device)
    }

    /// Current state, e.g. for inspecting the last line read
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    fn refresh(&mut self) -> Result<(), EditorError> {
        self.state
            .refresh_tokens(&self.highlighter, &self.source_label);
        self.renderer.render(&mut self.device, &self.state)
    }

    fn exit(&mut self, result: LineRead) -> LineRead {
        log::debug!("line read done: {result:?}");

        self.state.finish();

        if let Err(err) = self.refresh() {
            log::debug!("final refresh failed: {err}");
        }

        // The line is already read; a lost newline is only cosmetic.
        if let Err(err) = self.device.write_all(b"\n").and_then(|()| self.device.flush()) {
            log::debug!("can't write newline: {:?}", embedded_io::Error::kind(&err));
        }

        result
    }

    /// Read a line from the terminal.
    ///
    /// `rprompt` is shown right of the line while editing and dropped
    /// from the final rendering. [`LineRead::Error`] comes from a failed
    /// render or from the input: closed input gives
    /// [`EditorError::Aborted`], other non-transient read errors give
    /// [`EditorError::ReadError`].
    pub fn readline(&mut self, prompt: &str, rprompt: &str) -> LineRead {
        self.state.reset(prompt, rprompt);

        loop {
            if let Err(err) = self.refresh() {
                return LineRead::Error(err);
            }

            self.state.tips.clear();

            let key = match self.reader.read_key(&mut self.device) {
                Ok(key) => key,
                Err(err) if err.is_transient() => {
                    log::debug!("dropped input: {err}");
                    self.state.push_tip(format!("{err}"));
                    continue;
                }
                Err(err) => return self.exit(LineRead::Error(err)),
            };

            if let Some(result) = dispatch(&mut self.state, &self.keymap, &self.completer, key) {
                return self.exit(result);
            }
        }
    }
}

impl<D, C, H, R> fmt::Debug for Editor<D, C, H, R>
where
    D: TerminalDevice,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("source_label", &self.source_label)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
