//! Core library containing the IO-free parts of the editor.
//!
//! [`EditorState`] is the record of one line read. [`dispatch`] runs a
//! key through the [`Keymap`] and applies the resulting
//! [`DispatchResult`], including re-dispatching the same key after a
//! mode change.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::builtins::Builtin;
use crate::complete::{Completer, CompletionState};
use crate::error::EditorError;
use crate::highlight::{Highlighter, Token};
use crate::key::Key;
use crate::keymap::{Keymap, Mode};
use crate::line_buffer::LineBuffer;

/// Outcome of a line read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(String),
    Eof,
    Error(EditorError),
}

impl LineRead {
    /// `Ok(Some(line))`, `Ok(None)` on end of input, or the error.
    pub fn into_result(self) -> Result<Option<String>, EditorError> {
        match self {
            LineRead::Line(line) => Ok(Some(line)),
            LineRead::Eof => Ok(None),
            LineRead::Error(err) => Err(err),
        }
    }
}

/// What the read loop should do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    NoAction,
    ChangeMode(Mode),
    /// Switch mode and run the same key again under the new mode
    ChangeModeAndReprocess(Mode),
    Exit(LineRead),
}

/// State of one line read.
#[derive(Debug, Default, Clone)]
pub struct EditorState {
    pub(crate) prompt: String,
    pub(crate) rprompt: String,
    pub(crate) line: LineBuffer,
    pub(crate) dot: usize,
    pub(crate) tips: Vec<String>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) mode: Mode,
    pub(crate) completion: Option<CompletionState>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn rprompt(&self) -> &str {
        &self.rprompt
    }

    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Cursor offset in code points
    pub fn dot(&self) -> usize {
        self.dot
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn completion(&self) -> Option<&CompletionState> {
        self.completion.as_ref()
    }

    /// Start a fresh line read.
    pub(crate) fn reset(&mut self, prompt: &str, rprompt: &str) {
        self.prompt.clear();
        self.prompt.push_str(prompt);
        self.rprompt.clear();
        self.rprompt.push_str(rprompt);
        self.line.truncate();
        self.mode = Mode::Insert;
        self.tips.clear();
        self.completion = None;
        self.dot = 0;
    }

    /// Clean up before the line read returns.
    pub(crate) fn finish(&mut self) {
        self.tips.clear();
        self.mode = Mode::Insert;
        self.completion = None;
        self.dot = self.line.len();
        self.rprompt.clear();
    }

    pub(crate) fn push_tip(&mut self, tip: impl Into<String>) {
        self.tips.push(tip.into());
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        log::trace!("mode {:?} -> {:?}", self.mode, mode);

        self.mode = mode;

        if mode != Mode::Completing {
            self.completion = None;
        }
    }

    /// Re-lex the line, except while completing: the candidate range
    /// refers to the line as it was when completion started.
    pub(crate) fn refresh_tokens<H: Highlighter>(&mut self, highlighter: &H, source: &str) {
        if self.mode == Mode::Completing {
            return;
        }

        let tokens: Vec<Token> = highlighter.highlight(source, self.line.as_str()).collect();
        self.tokens = tokens;
    }

    /// Put the selected candidate into the line, keeping the cursor at
    /// the same place relative to the replaced text, and go back to
    /// insert mode.
    pub fn accept_completion(&mut self) {
        if let Some(completion) = self.completion.take() {
            if let Some(candidate) = completion.selected() {
                let accepted = candidate.text.as_str();
                let replaced = completion.end - completion.start;

                self.line
                    .replace_range(completion.start..completion.end, accepted);
                self.dot = (self.dot + accepted.chars().count())
                    .saturating_sub(replaced)
                    .min(self.line.len());
            }
        }

        self.mode = Mode::Insert;
    }
}

/// Dispatch `key` under the current mode, re-dispatching as long as
/// actions ask for it. Returns the read result once an action exits.
///
/// A reprocess chain may visit every mode once; coming back to a mode
/// would repeat the same lookup forever, so the key is dropped with a
/// tip instead.
pub(crate) fn dispatch<C: Completer>(
    state: &mut EditorState,
    keymap: &Keymap,
    completer: &C,
    key: Key,
) -> Option<LineRead> {
    let mut visited = [false; Mode::COUNT];

    loop {
        let builtin: Builtin = match keymap.lookup(state.mode, key) {
            Ok(builtin) => builtin,
            Err(err) => {
                state.push_tip(format!("{err}"));
                return None;
            }
        };

        visited[state.mode.index()] = true;

        let result = builtin.call(state, completer, key);

        debug_assert!(state.dot <= state.line.len(), "{builtin} left dot out of range");

        match result {
            DispatchResult::NoAction => return None,
            DispatchResult::ChangeMode(mode) => {
                state.set_mode(mode);
                return None;
            }
            DispatchResult::ChangeModeAndReprocess(mode) => {
                state.set_mode(mode);

                if visited[mode.index()] {
                    state.push_tip(format!("{key} keeps switching modes, dropped"));
                    return None;
                }

                log::trace!("reprocessing {key} in {mode:?} mode");
            }
            DispatchResult::Exit(result) => return Some(result),
        }
    }
}
