//! Rendering of the editor state to the terminal.

use alloc::string::String;
use core::fmt::Write as _;

use embedded_io::Write;
use unicode_width::UnicodeWidthStr;

use crate::core::EditorState;
use crate::error::EditorError;
use crate::highlight::TokenKind;

/// Paints the prompt, line, tips and completion candidates.
pub trait Renderer {
    fn render<W: Write>(&mut self, out: &mut W, state: &EditorState) -> Result<(), EditorError>;
}

impl<T: Renderer> Renderer for &mut T {
    fn render<W: Write>(&mut self, out: &mut W, state: &EditorState) -> Result<(), EditorError> {
        T::render(self, out, state)
    }
}

const RESET: &str = "\x1b[m";
const REVERSE: &str = "\x1b[7m";
const DIM: &str = "\x1b[2m";

fn style(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::Command => Some("\x1b[1;32m"),
        TokenKind::Flag => Some("\x1b[36m"),
        TokenKind::Quoted => Some("\x1b[33m"),
        TokenKind::Plain | TokenKind::Space | TokenKind::Argument => None,
    }
}

/// Renders with plain ANSI escapes. Everything is redrawn from the start
/// of the prompt row on each call, and the cursor is left on that row.
#[derive(Debug, Default, Clone)]
pub struct AnsiRenderer {
    columns: Option<usize>,
    frame: String,
}

impl AnsiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// With a known terminal width the right prompt is drawn flush
    /// against the right edge.
    pub fn with_columns(columns: usize) -> Self {
        Self {
            columns: Some(columns),
            frame: String::new(),
        }
    }

    fn push_line(&mut self, state: &EditorState) {
        let line = state.line();
        let highlighted = state
            .tokens()
            .iter()
            .flat_map(|token| token.text.chars())
            .eq(line.chars());

        if !highlighted {
            self.frame.push_str(line);
            return;
        }

        for token in state.tokens() {
            match style(token.kind) {
                Some(sgr) => {
                    self.frame.push_str(sgr);
                    self.frame.push_str(&token.text);
                    self.frame.push_str(RESET);
                }
                None => self.frame.push_str(&token.text),
            }
        }
    }

    fn push_rprompt(&mut self, state: &EditorState) {
        let rprompt = state.rprompt();

        if rprompt.is_empty() {
            return;
        }

        let used = state.prompt().width() + state.line().width();
        let padding = match self.columns {
            Some(columns) if used + rprompt.width() < columns => columns - used - rprompt.width(),
            Some(_) => return,
            None => 2,
        };

        for _ in 0..padding {
            self.frame.push(' ');
        }

        self.frame.push_str(DIM);
        self.frame.push_str(rprompt);
        self.frame.push_str(RESET);
    }

    /// Rows written below the prompt row
    fn push_below(&mut self, state: &EditorState) -> usize {
        let mut rows = 0;

        for tip in state.tips() {
            self.frame.push_str("\r\n");
            self.frame.push_str(tip);
            rows += 1;
        }

        if let Some(completion) = state.completion() {
            self.frame.push_str("\r\n");

            for (i, candidate) in completion.candidates.iter().enumerate() {
                if i > 0 {
                    self.frame.push_str("  ");
                }

                if i == completion.current {
                    self.frame.push_str(REVERSE);
                    self.frame.push_str(&candidate.text);
                    self.frame.push_str(RESET);
                } else {
                    self.frame.push_str(&candidate.text);
                }
            }

            rows += 1;
        }

        rows
    }

    fn build_frame(&mut self, state: &EditorState) -> Result<(), core::fmt::Error> {
        self.frame.clear();
        self.frame.push_str("\r\x1b[J");
        self.frame.push_str(state.prompt());

        self.push_line(state);
        self.push_rprompt(state);

        let rows = self.push_below(state);

        if rows > 0 {
            write!(self.frame, "\x1b[{rows}A")?;
        }

        let before_dot: String = state.line().chars().take(state.dot()).collect();
        let column = state.prompt().width() + before_dot.width();

        self.frame.push('\r');

        if column > 0 {
            write!(self.frame, "\x1b[{column}C")?;
        }

        Ok(())
    }
}

impl Renderer for AnsiRenderer {
    fn render<W: Write>(&mut self, out: &mut W, state: &EditorState) -> Result<(), EditorError> {
        self.build_frame(state)
            .map_err(|_| EditorError::WriteError(embedded_io::ErrorKind::OutOfMemory))?;

        out.write_all(self.frame.as_bytes())
            .map_err(|e| EditorError::WriteError(embedded_io::Error::kind(&e)))?;
        out.flush()
            .map_err(|e| EditorError::WriteError(embedded_io::Error::kind(&e)))
    }
}
