//! Editing actions that keys are bound to.

use alloc::format;

use crate::complete::{Completer, CompletionState};
use crate::core::{DispatchResult, EditorState, LineRead};
use crate::key::Key;
use crate::keymap::Mode;

use DispatchResult::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Builtin {
    AcceptLine,
    Complete,
    CommandMode,
    InsertMode,
    KillLineB,
    KillLineF,
    KillRuneB,
    MoveDotB,
    MoveDotF,
    ReturnEof,
    DefaultInsert,
    DefaultCommand,
    CancelCompletion,
    SelectCandB,
    SelectCandF,
    CycleCandF,
    DefaultCompleting,
}

impl Builtin {
    pub fn name(self) -> &'static str {
        match self {
            Builtin::AcceptLine => "accept-line",
            Builtin::Complete => "complete",
            Builtin::CommandMode => "command-mode",
            Builtin::InsertMode => "insert-mode",
            Builtin::KillLineB => "kill-line-b",
            Builtin::KillLineF => "kill-line-f",
            Builtin::KillRuneB => "kill-rune-b",
            Builtin::MoveDotB => "move-dot-b",
            Builtin::MoveDotF => "move-dot-f",
            Builtin::ReturnEof => "return-eof",
            Builtin::DefaultInsert => "default-insert",
            Builtin::DefaultCommand => "default-command",
            Builtin::CancelCompletion => "cancel-completion",
            Builtin::SelectCandB => "select-cand-b",
            Builtin::SelectCandF => "select-cand-f",
            Builtin::CycleCandF => "cycle-cand-f",
            Builtin::DefaultCompleting => "default-completing",
        }
    }

    /// Run the action on `state`. `key` is the key that triggered it.
    pub fn call<C: Completer>(
        self,
        state: &mut EditorState,
        completer: &C,
        key: Key,
    ) -> DispatchResult {
        match self {
            Builtin::AcceptLine => Exit(LineRead::Line(state.line.as_str().into())),
            Builtin::Complete => start_completion(state, completer),
            Builtin::CommandMode => ChangeMode(Mode::Command),
            Builtin::InsertMode => ChangeMode(Mode::Insert),
            Builtin::KillLineB => {
                state.line.delete_before_char(state.dot);
                state.dot = 0;
                NoAction
            }
            Builtin::KillLineF => {
                state.line.delete_after_char(state.dot);
                NoAction
            }
            Builtin::KillRuneB => {
                if state.dot > 0 {
                    state.dot -= 1;
                    state.line.delete(state.dot);
                }
                NoAction
            }
            Builtin::MoveDotB => {
                state.dot = state.dot.saturating_sub(1);
                NoAction
            }
            Builtin::MoveDotF => {
                if state.dot < state.line.len() {
                    state.dot += 1;
                }
                NoAction
            }
            Builtin::ReturnEof => {
                if state.line.is_empty() {
                    Exit(LineRead::Eof)
                } else {
                    NoAction
                }
            }
            Builtin::DefaultInsert => {
                if let Some(c) = key.printable() {
                    state.line.insert_char(state.dot, c);
                    state.dot += 1;
                } else {
                    state.push_tip(format!("Unbound: {key}"));
                }
                NoAction
            }
            Builtin::DefaultCommand => {
                state.push_tip(format!("Unbound: {key}"));
                NoAction
            }
            Builtin::CancelCompletion => {
                state.completion = None;
                ChangeMode(Mode::Insert)
            }
            Builtin::SelectCandB => {
                if let Some(completion) = state.completion.as_mut() {
                    completion.select_prev();
                }
                NoAction
            }
            Builtin::SelectCandF => {
                if let Some(completion) = state.completion.as_mut() {
                    completion.select_next();
                }
                NoAction
            }
            Builtin::CycleCandF => {
                if let Some(completion) = state.completion.as_mut() {
                    completion.cycle_next();
                }
                NoAction
            }
            Builtin::DefaultCompleting => {
                state.accept_completion();
                ChangeModeAndReprocess(Mode::Insert)
            }
        }
    }
}

impl core::fmt::Display for Builtin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

fn start_completion<C: Completer>(state: &mut EditorState, completer: &C) -> DispatchResult {
    let len = state.line.len();

    match completer.complete(state.line.as_str(), state.dot) {
        Some(completion) if completion.candidates.is_empty() => {
            state.push_tip("No completion");
            NoAction
        }
        Some(completion) if completion.start <= completion.end && completion.end <= len => {
            state.completion = Some(CompletionState::new(completion));
            ChangeMode(Mode::Completing)
        }
        Some(completion) => {
            state.push_tip(format!(
                "Completion range {}..{} is outside the line",
                completion.start, completion.end
            ));
            NoAction
        }
        None => {
            state.push_tip("No completion");
            NoAction
        }
    }
}
