//! Path text parsing.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use thiserror::Error;

use crate::access::{AccessStep, OffsetStep, Selector};

// -----------------------------------------------------------------------------
// Error

/// A path text that could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed path `{path}` at offset {offset}: {error}")]
pub struct ParseError {
    /// Byte position in `path`.
    pub offset: usize,
    /// The complete path text.
    pub path: String,
    /// What went wrong.
    pub error: Cow<'static, str>,
}

// -----------------------------------------------------------------------------
// AccessPath

/// A value that can be parsed into property path steps.
///
/// Implemented for `&str` and `&String`.
///
/// # Syntax
///
/// - Simple: `name`
/// - Indexed: `name[3]`, the index is a non-negative integer.
/// - Mapped: `name(key)`, the key is any text with balanced brackets.
/// - Nested: `a.b.c`, `.` only separates steps outside of brackets.
///
/// A segment may carry several suffixes (`grid[1][2]`, `a(k)[0]`); every
/// suffix after the first becomes a nameless step. A path may also begin
/// with a suffix (`[0].name`) to address its target directly.
///
/// # Examples
///
/// ```
/// use vc_bean::access::{AccessPath, AccessStep, Selector};
///
/// let steps: Vec<_> = "a(b.c)[2].d"
///     .parse_steps()
///     .map(|res| res.unwrap().step)
///     .collect();
///
/// assert_eq!(steps, [
///     AccessStep::mapped("a", "b.c"),
///     AccessStep::nameless(Selector::Index(2)),
///     AccessStep::simple("d"),
/// ]);
/// ```
pub trait AccessPath<'a> {
    /// Parses the path lazily.
    ///
    /// The iterator stops after the first error.
    fn parse_steps(&self) -> impl Iterator<Item = Result<OffsetStep<'a>, ParseError>>;
}

impl<'a> AccessPath<'a> for &'a str {
    #[inline]
    fn parse_steps(&self) -> impl Iterator<Item = Result<OffsetStep<'a>, ParseError>> {
        PathParser::new(self)
    }
}

impl<'a> AccessPath<'a> for &'a String {
    #[inline]
    fn parse_steps(&self) -> impl Iterator<Item = Result<OffsetStep<'a>, ParseError>> {
        PathParser::new(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// Parser

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the beginning of a dot separated segment.
    Segment,
    /// Directly after a suffix, more suffixes may follow.
    Suffix,
    Done,
}

/// Left-to-right scanner over a path text.
struct PathParser<'a> {
    path: &'a str,
    cursor: usize,
    state: State,
}

impl<'a> PathParser<'a> {
    #[inline]
    const fn new(path: &'a str) -> Self {
        Self {
            path,
            cursor: 0,
            state: State::Segment,
        }
    }

    fn error(&mut self, offset: usize, error: impl Into<Cow<'static, str>>) -> ParseError {
        self.state = State::Done;
        ParseError {
            offset,
            path: self.path.into(),
            error: error.into(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.path.as_bytes().get(self.cursor).copied()
    }

    /// Returns the position of the bracket closing the one at `open`.
    fn closing(&mut self, open: usize) -> Result<usize, ParseError> {
        let path = self.path;
        let bytes = path.as_bytes();
        let mut stack: Vec<u8> = Vec::new();

        for (at, byte) in bytes.iter().enumerate().skip(open) {
            match byte {
                b'[' => stack.push(b']'),
                b'(' => stack.push(b')'),
                b']' | b')' => match stack.pop() {
                    Some(expected) if expected == *byte => {
                        if stack.is_empty() {
                            return Ok(at);
                        }
                    }
                    _ => return Err(self.error(at, "mismatched closing bracket")),
                },
                _ => {}
            }
        }

        let open_char = if bytes[open] == b'[' { "`[`" } else { "`(`" };
        Err(self.error(open, alloc::format!("unclosed {open_char}")))
    }

    /// Parses the suffix starting at the cursor, which is `[` or `(`.
    fn suffix(&mut self) -> Result<Selector<'a>, ParseError> {
        let path = self.path;
        let open = self.cursor;
        let close = self.closing(open)?;
        let content = &path[open + 1..close];
        self.cursor = close + 1;

        if path.as_bytes()[open] == b'(' {
            return Ok(Selector::Key(Cow::Borrowed(content)));
        }

        let digits = content.trim();
        if digits.starts_with('-') {
            return Err(self.error(open + 1, "negative index"));
        }
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(self.error(open + 1, alloc::format!("invalid index `{content}`")));
        }
        match digits.parse::<usize>() {
            Ok(index) => Ok(Selector::Index(index)),
            Err(_) => Err(self.error(open + 1, alloc::format!("index `{content}` is too large"))),
        }
    }

    /// Decides what follows a complete step.
    fn after_step(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            None => self.state = State::Done,
            Some(b'.') => {
                self.cursor += 1;
                self.state = State::Segment;
                if self.cursor == self.path.len() {
                    return Err(self.error(self.cursor, "empty segment"));
                }
            }
            Some(b'[' | b'(') => self.state = State::Suffix,
            Some(b']' | b')') => return Err(self.error(self.cursor, "unmatched closing bracket")),
            Some(_) => {
                return Err(self.error(self.cursor, "unexpected characters after a suffix"));
            }
        }
        Ok(())
    }

    fn segment(&mut self) -> Result<OffsetStep<'a>, ParseError> {
        let path = self.path;
        let offset = self.cursor;
        if path.is_empty() {
            return Err(self.error(0, "empty path"));
        }

        let rest = &path[offset..];
        let name_len = rest
            .find(['.', '[', '(', ']', ')'])
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        self.cursor += name_len;

        let selector = match self.peek() {
            Some(b'[' | b'(') => self.suffix()?,
            Some(b']' | b')') => {
                return Err(self.error(self.cursor, "unmatched closing bracket"));
            }
            _ if name.is_empty() => return Err(self.error(offset, "empty segment")),
            _ => Selector::None,
        };
        self.after_step()?;

        let name = (!name.is_empty()).then_some(Cow::Borrowed(name));
        Ok(OffsetStep {
            step: AccessStep { name, selector },
            offset,
        })
    }

    fn nameless(&mut self) -> Result<OffsetStep<'a>, ParseError> {
        let offset = self.cursor;
        let selector = self.suffix()?;
        self.after_step()?;
        Ok(OffsetStep {
            step: AccessStep::nameless(selector),
            offset,
        })
    }
}

impl<'a> Iterator for PathParser<'a> {
    type Item = Result<OffsetStep<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Segment => Some(self.segment()),
            State::Suffix => Some(self.nameless()),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::AccessPath;
    use crate::access::{AccessStep, Selector};
    use alloc::vec::Vec;

    fn steps(path: &str) -> Vec<AccessStep<'_>> {
        path.parse_steps().map(|res| res.unwrap().step).collect()
    }

    fn error(path: &str) -> (usize, alloc::string::String) {
        let err = path
            .parse_steps()
            .find_map(Result::err)
            .expect("path should be rejected");
        (err.offset, err.error.into_owned())
    }

    #[test]
    fn simple_and_nested() {
        assert_eq!(steps("name"), [AccessStep::simple("name")]);
        assert_eq!(
            steps("address.city"),
            [AccessStep::simple("address"), AccessStep::simple("city")]
        );
    }

    #[test]
    fn suffixes() {
        assert_eq!(steps("phones[2]"), [AccessStep::indexed("phones", 2)]);
        assert_eq!(steps("addr(home)"), [AccessStep::mapped("addr", "home")]);
        assert_eq!(steps("m()"), [AccessStep::mapped("m", "")]);
        assert_eq!(
            steps("grid[1][2]"),
            [
                AccessStep::indexed("grid", 1),
                AccessStep::nameless(Selector::Index(2)),
            ]
        );
        assert_eq!(
            steps("[0].name"),
            [
                AccessStep::nameless(Selector::Index(0)),
                AccessStep::simple("name"),
            ]
        );
    }

    #[test]
    fn brackets_suppress_dots() {
        assert_eq!(
            steps("a(b.c)[2].d"),
            [
                AccessStep::mapped("a", "b.c"),
                AccessStep::nameless(Selector::Index(2)),
                AccessStep::simple("d"),
            ]
        );
        assert_eq!(steps("a(x[1].y)"), [AccessStep::mapped("a", "x[1].y")]);
    }

    #[test]
    fn offsets() {
        let offsets: Vec<usize> = "ab.cd[1][2]"
            .parse_steps()
            .map(|res| res.unwrap().offset)
            .collect();
        assert_eq!(offsets, [0, 3, 8]);
    }

    #[test]
    fn malformed() {
        assert_eq!(error(""), (0, "empty path".into()));
        assert_eq!(error("a..b"), (2, "empty segment".into()));
        assert_eq!(error("a."), (2, "empty segment".into()));
        assert_eq!(error(".a"), (0, "empty segment".into()));
        assert_eq!(error("a[1"), (1, "unclosed `[`".into()));
        assert_eq!(error("a(k"), (1, "unclosed `(`".into()));
        assert_eq!(error("a(b]"), (3, "mismatched closing bracket".into()));
        assert_eq!(error("a]"), (1, "unmatched closing bracket".into()));
        assert_eq!(error("a[-1]"), (2, "negative index".into()));
        assert_eq!(error("a[x]"), (2, "invalid index `x`".into()));
        assert_eq!(error("a[]"), (2, "invalid index ``".into()));
        assert_eq!(error("a[1]b"), (4, "unexpected characters after a suffix".into()));
    }

    #[test]
    fn stops_after_error() {
        let results: Vec<_> = "a.b[x].c".parse_steps().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
