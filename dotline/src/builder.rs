//! Builder for editors

use alloc::string::String;

use embedded_io::{Read, ReadReady, Write};

use crate::complete::Completer;
use crate::error::EditorError;
use crate::highlight::{Highlighter, Lexer};
use crate::keymap::Keymap;
use crate::output::{AnsiRenderer, Renderer};
use crate::sync_editor::Editor;
use crate::terminal::TerminalDevice;

/// Label handed to the highlighter when none is set
pub const DEFAULT_SOURCE_LABEL: &str = "<stdin>";

/// Builder for [`Editor`].
///
/// # Example
/// ```no_run
/// # #[cfg(feature = "std")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dotline::builder::EditorBuilder;
/// use dotline::complete::WordCompleter;
/// use dotline::sys::Tty;
///
/// let words = ["status", "start", "stop"];
/// let mut editor = EditorBuilder::new()
///     .with_completer(WordCompleter::new(&words))
///     .with_source_label("<service>")
///     .build(Tty::open()?)?;
///
/// let line = editor.readline("> ", "").into_result()?;
/// editor.release()?;
/// # let _ = line;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "std"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone)]
pub struct EditorBuilder<C, H, R> {
    keymap: Keymap,
    completer: C,
    highlighter: H,
    renderer: R,
    source_label: String,
}

impl EditorBuilder<(), Lexer, AnsiRenderer> {
    /// Default keymap, no completion, shell-style highlighting and ANSI
    /// rendering.
    pub fn new() -> Self {
        Self {
            keymap: Keymap::default(),
            completer: (),
            highlighter: Lexer,
            renderer: AnsiRenderer::new(),
            source_label: String::from(DEFAULT_SOURCE_LABEL),
        }
    }
}

impl Default for EditorBuilder<(), Lexer, AnsiRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, H, R> EditorBuilder<C, H, R>
where
    C: Completer,
    H: Highlighter,
    R: Renderer,
{
    pub fn with_keymap(self, keymap: Keymap) -> Self {
        Self { keymap, ..self }
    }

    pub fn with_completer<C2: Completer>(self, completer: C2) -> EditorBuilder<C2, H, R> {
        EditorBuilder {
            keymap: self.keymap,
            completer,
            highlighter: self.highlighter,
            renderer: self.renderer,
            source_label: self.source_label,
        }
    }

    pub fn with_highlighter<H2: Highlighter>(self, highlighter: H2) -> EditorBuilder<C, H2, R> {
        EditorBuilder {
            keymap: self.keymap,
            completer: self.completer,
            highlighter,
            renderer: self.renderer,
            source_label: self.source_label,
        }
    }

    pub fn with_renderer<R2: Renderer>(self, renderer: R2) -> EditorBuilder<C, H, R2> {
        EditorBuilder {
            keymap: self.keymap,
            completer: self.completer,
            highlighter: self.highlighter,
            renderer,
            source_label: self.source_label,
        }
    }

    /// Name of the input source, passed on to the highlighter.
    pub fn with_source_label(self, source_label: impl Into<String>) -> Self {
        Self {
            source_label: source_label.into(),
            ..self
        }
    }

    /// Take over `device` and build the editor. Same as
    /// [`Editor::new()`] with the builder's parts.
    pub fn build<D>(self, device: D) -> Result<Editor<D, C, H, R>, EditorError>
    where
        D: TerminalDevice + Read + ReadReady + Write,
    {
        Editor::acquire(
            device,
            self.keymap,
            self.completer,
            self.highlighter,
            self.renderer,
            self.source_label,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::Builtin;
    use crate::complete::WordCompleter;
    use crate::core::LineRead;
    use crate::key::Key;
    use crate::keymap::Mode;
    use crate::testlib::MockDevice;

    #[test]
    fn custom_keymap_and_completer() {
        let words = ["alpha", "beta"];
        let keymap = Keymap::default().bind(Mode::Insert, Key::ctrl('T'), Builtin::AcceptLine);
        let device = MockDevice::with_input("b\t\x14");

        let mut editor = EditorBuilder::new()
            .with_keymap(keymap)
            .with_completer(WordCompleter::new(&words))
            .with_highlighter(())
            .build(device)
            .unwrap();

        // Ctrl-T accepts the candidate, then the line
        assert_eq!(editor.readline("> ", ""), LineRead::Line("beta".into()));
    }

    #[test]
    fn source_label() {
        let builder = EditorBuilder::new().with_source_label("<config>");

        assert_eq!(builder.source_label, "<config>");
        assert_eq!(EditorBuilder::default().source_label, DEFAULT_SOURCE_LABEL);
    }
}
