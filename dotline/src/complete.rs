use alloc::string::String;
use alloc::vec::Vec;

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Candidates for the code points `start..end` of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub candidates: Vec<Candidate>,
    pub start: usize,
    pub end: usize,
}

/// Completion in progress while the editor is in
/// [`crate::keymap::Mode::Completing`]. `current` indexes into
/// `candidates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionState {
    pub candidates: Vec<Candidate>,
    pub start: usize,
    pub end: usize,
    pub current: usize,
}

impl CompletionState {
    pub fn new(completion: Completion) -> Self {
        Self {
            candidates: completion.candidates,
            start: completion.start,
            end: completion.end,
            current: 0,
        }
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.candidates.get(self.current)
    }

    pub fn select_prev(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.current + 1 < self.candidates.len() {
            self.current += 1;
        }
    }

    pub fn cycle_next(&mut self) {
        if !self.candidates.is_empty() {
            self.current = (self.current + 1) % self.candidates.len();
        }
    }
}

/// A type that provides possible line completions
///
/// ```
/// use dotline::complete::{Completer, WordCompleter};
///
/// static FRUIT_LIST: [&str; 14] = [
///     "Apple",
///     "Banana",
///     "Grape",
///     "Kiwi",
///     "Lemon",
///     "Lime",
///     "Mango",
///     "Melon",
///     "Nectarine",
///     "Orange",
///     "Peach",
///     "Pear",
///     "Pineapple",
///     "Plum",
/// ];
///
/// let completion = WordCompleter::new(&FRUIT_LIST).complete("eat Pe", 6).unwrap();
///
/// assert_eq!((completion.start, completion.end), (4, 6));
/// assert_eq!(completion.candidates.len(), 2);
/// assert_eq!(completion.candidates[1].text, "Pear");
/// ```
pub trait Completer {
    /// Given `line` and the cursor offset `dot` (in code points), return
    /// the candidates and the range they replace, or `None` when there is
    /// nothing to complete.
    fn complete(&self, line: &str, dot: usize) -> Option<Completion>;
}

impl Completer for () {
    fn complete(&self, _: &str, _: usize) -> Option<Completion> {
        None
    }
}

impl<T: Completer> Completer for &T {
    fn complete(&self, line: &str, dot: usize) -> Option<Completion> {
        T::complete(self, line, dot)
    }
}

impl<T: Completer> Completer for &mut T {
    fn complete(&self, line: &str, dot: usize) -> Option<Completion> {
        T::complete(self, line, dot)
    }
}

/// Completes the word ending at the cursor against a fixed word list.
#[derive(Debug, Clone, Copy)]
pub struct WordCompleter<'a> {
    words: &'a [&'a str],
}

impl<'a> WordCompleter<'a> {
    pub fn new(words: &'a [&'a str]) -> Self {
        Self { words }
    }
}

impl Completer for WordCompleter<'_> {
    fn complete(&self, line: &str, dot: usize) -> Option<Completion> {
        let before: Vec<char> = line.chars().take(dot).collect();
        let end = before.len();
        let start = before
            .iter()
            .rposition(|c| c.is_whitespace())
            .map_or(0, |pos| pos + 1);

        let prefix: String = before[start..].iter().collect();

        let candidates: Vec<Candidate> = self
            .words
            .iter()
            .filter(|word| word.starts_with(prefix.as_str()))
            .map(|&word| Candidate::new(word))
            .collect();

        if candidates.is_empty() {
            None
        } else {
            Some(Completion {
                candidates,
                start,
                end,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn state(n: usize) -> CompletionState {
        CompletionState::new(Completion {
            candidates: (0..n).map(|i| Candidate::new(format!("c{i}"))).collect(),
            start: 0,
            end: 0,
        })
    }

    #[test]
    fn select_is_clamped() {
        let mut state = state(2);

        state.select_prev();
        assert_eq!(state.current, 0);

        state.select_next();
        state.select_next();
        assert_eq!(state.current, 1);
        assert_eq!(state.selected(), Some(&Candidate::new("c1")));
    }

    #[test]
    fn cycle_wraps() {
        let mut state = state(3);

        for expected in [1, 2, 0, 1] {
            state.cycle_next();
            assert_eq!(state.current, expected);
        }

        let mut empty = self::state(0);
        empty.cycle_next();
        assert_eq!(empty.current, 0);
        assert_eq!(empty.selected(), None);
    }

    #[test]
    fn word_completer() {
        let words = ["ls", "less", "make"];
        let completer = WordCompleter::new(&words);

        let completion = completer.complete("sudo l", 6).unwrap();
        assert_eq!((completion.start, completion.end), (5, 6));
        assert_eq!(
            completion.candidates,
            vec![Candidate::new("ls"), Candidate::new("less")]
        );

        // Only text before the cursor is the prefix
        let completion = completer.complete("mls", 1).unwrap();
        assert_eq!((completion.start, completion.end), (0, 1));
        assert_eq!(completion.candidates, vec![Candidate::new("make")]);

        assert_eq!(completer.complete("cat", 3), None);
        assert_eq!(().complete("ls", 2), None);
    }
}
