//! Lexical highlighting of the line.
//!
//! A [`Highlighter`] hands back a lazy iterator of [`Token`]s whose texts
//! concatenate to the input line. The editor drains it once per refresh.

use alloc::string::String;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Space,
    Command,
    Argument,
    Flag,
    Quoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

pub trait Highlighter {
    /// Split `line` into tokens. `source` names where the text comes
    /// from and may be used in diagnostics.
    fn highlight<'a>(&'a self, source: &'a str, line: &'a str)
        -> impl Iterator<Item = Token> + 'a;
}

/// No highlighting: the whole line is one plain token.
impl Highlighter for () {
    fn highlight<'a>(
        &'a self,
        _source: &'a str,
        line: &'a str,
    ) -> impl Iterator<Item = Token> + 'a {
        (!line.is_empty())
            .then(|| Token::new(TokenKind::Plain, line))
            .into_iter()
    }
}

/// Shell-flavoured lexer: first word is the command, words starting with
/// `-` are flags, quoted strings run to their closing quote.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lexer;

impl Highlighter for Lexer {
    fn highlight<'a>(
        &'a self,
        _source: &'a str,
        line: &'a str,
    ) -> impl Iterator<Item = Token> + 'a {
        Tokens::new(line)
    }
}

/// Lazy token stream over a line. Finite and not restartable.
#[derive(Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
    seen_word: bool,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            rest: line,
            seen_word: false,
        }
    }

    fn split(&mut self, len: usize) -> &'a str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }
}

fn quoted_len(s: &str, quote: char) -> usize {
    s.char_indices()
        .skip(1)
        .find(|&(_, c)| c == quote)
        .map_or(s.len(), |(pos, c)| pos + c.len_utf8())
}

fn run_len(s: &str, pred: impl Fn(char) -> bool) -> usize {
    s.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(pos, _)| pos)
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let first = self.rest.chars().next()?;

        let (kind, len) = if first.is_whitespace() {
            (TokenKind::Space, run_len(self.rest, char::is_whitespace))
        } else if first == '"' || first == '\'' {
            (TokenKind::Quoted, quoted_len(self.rest, first))
        } else {
            let len = run_len(self.rest, |c| !c.is_whitespace());
            let kind = if !self.seen_word {
                TokenKind::Command
            } else if first == '-' {
                TokenKind::Flag
            } else {
                TokenKind::Argument
            };
            (kind, len)
        };

        if kind != TokenKind::Space {
            self.seen_word = true;
        }

        Some(Token::new(kind, self.split(len)))
    }
}
