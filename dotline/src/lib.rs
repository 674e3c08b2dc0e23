//! Dotline is a modal `#[no_std]` line editor with completion and
//! syntax highlighting. Terminal IO goes through the
//! [`embedded_io`] traits plus a small [`terminal::TerminalDevice`]
//! trait for terminal attributes, so it can run on anything that can
//! carry a byte stream.
//!
//! Features:
//! - Insert, command and completion modes driven by an immutable
//!   [`keymap::Keymap`]
//! - Completion through the [`complete::Completer`] trait
//! - Highlighting through the [`highlight::Highlighter`] trait
//! - Pluggable rendering, with [`output::AnsiRenderer`] as default
//! - UTF-8 support, cursor placement by display width
//!
//! The IO-free part lives in [`crate::core`]: an [`crate::core::EditorState`] and a
//! dispatcher that runs keys through the keymap. [`sync_editor::Editor`]
//! adds the terminal session and the read loop on top.
//!
//! With the `std` feature, [`sys::Tty`] provides the controlling
//! terminal of the process.
//!
//! # Example
//! ```no_run
//! # #[cfg(feature = "std")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dotline::core::LineRead;
//! use dotline::sync_editor::Editor;
//! use dotline::sys::Tty;
//!
//! let mut editor = Editor::new(Tty::open()?)?;
//!
//! loop {
//!     match editor.readline("> ", "") {
//!         LineRead::Line(line) => println!("Read: '{line}'"),
//!         LineRead::Eof => break,
//!         LineRead::Error(err) => {
//!             editor.release()?;
//!             return Err(err.into());
//!         }
//!     }
//! }
//!
//! editor.release()?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "std"))]
//! # fn main() {}
//! ```

#![no_std]

extern crate alloc;

#[cfg(any(test, doc, feature = "std"))]
#[macro_use]
extern crate std;

pub mod builder;
pub mod builtins;
pub mod complete;
pub mod core;
pub mod error;
pub mod highlight;
mod input;
pub mod key;
pub mod keymap;
pub mod line_buffer;
pub mod output;
pub mod reader;
pub mod sync_editor;
#[cfg(feature = "std")]
pub mod sys;
pub mod terminal;
mod utf8;

#[cfg(test)]
pub(crate) mod testlib;

pub use crate::builder::EditorBuilder;
pub use crate::core::LineRead;
pub use crate::error::EditorError;
pub use crate::sync_editor::Editor;
