use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::key::{Key, KeyCode};
use crate::utf8::{Utf8Decoder, Utf8DecoderStatus};

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ControlCharacter {
    NUL = 0x0,
    CtrlA = 0x1,
    CtrlB = 0x2,
    CtrlC = 0x3,
    CtrlD = 0x4,
    CtrlE = 0x5,
    CtrlF = 0x6,
    CtrlG = 0x7,
    CtrlH = 0x8,
    Tab = 0x9,
    LineFeed = 0xA,
    CtrlK = 0xB,
    CtrlL = 0xC,
    CarriageReturn = 0xD,
    CtrlN = 0xE,
    CtrlO = 0xF,
    CtrlP = 0x10,
    CtrlQ = 0x11,
    CtrlR = 0x12,
    CtrlS = 0x13,
    CtrlT = 0x14,
    CtrlU = 0x15,
    CtrlV = 0x16,
    CtrlW = 0x17,
    CtrlX = 0x18,
    CtrlY = 0x19,
    CtrlZ = 0x1A,
    Escape = 0x1B,
    FS = 0x1C,
    GS = 0x1D,
    RS = 0x1E,
    US = 0x1F,
    Backspace = 0x7F,
}

impl ControlCharacter {
    /// Logical key for a control byte. Bytes without a dedicated key
    /// become Ctrl chords of their caret notation, so 0x04 is Ctrl-D
    /// and 0x1B (Escape) is Ctrl-[.
    pub fn key(self) -> Key {
        match self {
            ControlCharacter::Tab => Key::plain(KeyCode::Tab),
            ControlCharacter::LineFeed | ControlCharacter::CarriageReturn => {
                Key::plain(KeyCode::Enter)
            }
            ControlCharacter::CtrlH | ControlCharacter::Backspace => {
                Key::plain(KeyCode::Backspace)
            }
            other => {
                let byte: u8 = other.into();
                Key::ctrl(char::from(byte + 0x40))
            }
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CSI {
    CUU(usize),
    CUD(usize),
    CUF(usize),
    CUB(usize),
    CPR(usize, usize),
    Home,
    Delete,
    End,
    Unknown(u8),
}

impl CSI {
    fn new(byte: u8, arg1: Option<usize>, arg2: Option<usize>) -> Self {
        match byte as char {
            'A' => Self::CUU(arg1.unwrap_or(1)),
            'B' => Self::CUD(arg1.unwrap_or(1)),
            'C' => Self::CUF(arg1.unwrap_or(1)),
            'D' => Self::CUB(arg1.unwrap_or(1)),
            'H' => Self::Home,
            'F' => Self::End,
            'R' => match (arg1, arg2) {
                (Some(row), Some(column)) => Self::CPR(row, column),
                _ => Self::Unknown(byte),
            },
            '~' => match arg1 {
                Some(1 | 7) => Self::Home,
                Some(3) => Self::Delete,
                Some(4 | 8) => Self::End,
                _ => Self::Unknown(byte),
            },
            _ => Self::Unknown(byte),
        }
    }

    /// Key for sequences that terminals send for key presses.
    pub fn key(self) -> Option<Key> {
        let code = match self {
            CSI::CUU(_) => KeyCode::Up,
            CSI::CUD(_) => KeyCode::Down,
            CSI::CUF(_) => KeyCode::Right,
            CSI::CUB(_) => KeyCode::Left,
            CSI::Home => KeyCode::Home,
            CSI::End => KeyCode::End,
            CSI::Delete => KeyCode::Delete,
            CSI::CPR(_, _) | CSI::Unknown(_) => return None,
        };

        Some(Key::plain(code))
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum Action {
    Ignore,
    Print(char),
    InvalidUtf8,
    ControlCharacter(ControlCharacter),
    EscapeSequence(u8),
    ControlSequenceIntroducer(CSI),
}

impl Action {
    fn control_character(byte: u8) -> Self {
        ControlCharacter::try_from(byte).map_or(Action::Ignore, Action::ControlCharacter)
    }
}

#[derive(Debug, Eq, PartialEq)]
enum State {
    Ground,
    Utf8Sequence(Utf8Decoder),
    EscapeSequence,
    SingleShift,
    CSIStart,
    CSIArg1(Option<usize>),
    CSIArg2(Option<usize>, Option<usize>),
}

fn push_digit(value: Option<usize>, byte: u8) -> Option<usize> {
    Some(
        value
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add((byte - 0x30) as usize),
    )
}

/// Byte-at-a-time terminal input parser.
#[derive(Debug)]
pub struct Parser {
    state: State,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            state: State::Ground,
        }
    }

    /// True right after a lone ESC byte, before we know whether it
    /// starts a sequence.
    pub fn is_escape_pending(&self) -> bool {
        self.state == State::EscapeSequence
    }

    /// Resolve a pending ESC as a key press of its own.
    pub fn cancel_escape(&mut self) -> Action {
        if self.is_escape_pending() {
            self.state = State::Ground;
            Action::ControlCharacter(ControlCharacter::Escape)
        } else {
            Action::Ignore
        }
    }

    pub fn advance(&mut self, byte: u8) -> Action {
        match self.state {
            State::Ground => match byte {
                0x1b => {
                    self.state = State::EscapeSequence;
                    Action::Ignore
                }
                0x0..=0x1a | 0x1c..=0x1f | 0x7f => Action::control_character(byte),
                0x20..=0x7e | 0x80..=0xff => {
                    let mut decoder = Utf8Decoder::new();

                    match decoder.advance(byte) {
                        Utf8DecoderStatus::Continuation => {
                            self.state = State::Utf8Sequence(decoder);
                            Action::Ignore
                        }
                        Utf8DecoderStatus::Done(c) => Action::Print(c),
                        Utf8DecoderStatus::Error => Action::InvalidUtf8,
                    }
                }
            },
            State::Utf8Sequence(ref mut decoder) => match decoder.advance(byte) {
                Utf8DecoderStatus::Continuation => Action::Ignore,
                Utf8DecoderStatus::Done(c) => {
                    self.state = State::Ground;
                    Action::Print(c)
                }
                Utf8DecoderStatus::Error => {
                    self.state = State::Ground;
                    Action::InvalidUtf8
                }
            },
            State::EscapeSequence => match byte {
                b'[' => {
                    self.state = State::CSIStart;
                    Action::Ignore
                }
                b'O' => {
                    self.state = State::SingleShift;
                    Action::Ignore
                }
                _ => {
                    self.state = State::Ground;
                    Action::EscapeSequence(byte)
                }
            },
            // Application cursor mode sends ESC O instead of ESC [
            State::SingleShift => {
                self.state = State::Ground;
                Action::ControlSequenceIntroducer(CSI::new(byte, None, None))
            }
            State::CSIStart => match byte {
                0x30..=0x39 => {
                    self.state = State::CSIArg1(push_digit(None, byte));
                    Action::Ignore
                }
                0x3b => {
                    self.state = State::CSIArg2(None, None);
                    Action::Ignore
                }
                0x40..=0x7e => {
                    self.state = State::Ground;
                    Action::ControlSequenceIntroducer(CSI::new(byte, None, None))
                }
                _ => Action::Ignore,
            },
            State::CSIArg1(value) => match byte {
                0x30..=0x39 => {
                    self.state = State::CSIArg1(push_digit(value, byte));
                    Action::Ignore
                }
                0x3b => {
                    self.state = State::CSIArg2(value, None);
                    Action::Ignore
                }
                0x40..=0x7e => {
                    self.state = State::Ground;
                    Action::ControlSequenceIntroducer(CSI::new(byte, value, None))
                }
                _ => Action::Ignore,
            },
            State::CSIArg2(arg1, arg2) => match byte {
                0x30..=0x39 => {
                    self.state = State::CSIArg2(arg1, push_digit(arg2, byte));
                    Action::Ignore
                }
                0x40..=0x7e => {
                    self.state = State::Ground;
                    Action::ControlSequenceIntroducer(CSI::new(byte, arg1, arg2))
                }
                _ => Action::Ignore,
            },
        }
    }
}
