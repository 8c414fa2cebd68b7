//! Property paths: a delimited string or a pre-split segment sequence,
//! normalized to a flat list of segments before traversal.
//!
//! Indices are stringified numbers; symbols can only appear in pre-split
//! paths (a string path has no way to spell one).

use crate::value::Symbol;

/// One step of a path: a string key or a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Key(String),
    Symbol(Symbol),
}

impl Segment {
    /// Interpret the segment as an array index.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(k) if !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()) => {
                k.parse().ok()
            }
            _ => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<Symbol> for Segment {
    fn from(s: Symbol) -> Self {
        Segment::Symbol(s)
    }
}

/// A normalized path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a delimited path string.
    ///
    /// `.` separates object keys, `[n]` addresses array indices, and
    /// bracketed keys may be quoted (`a["b c"]`). The empty string is the
    /// path of a single empty-string key.
    ///
    /// ```
    /// use lax_core::path::{Path, Segment};
    /// let path = Path::parse("a[0].b.c");
    /// assert_eq!(
    ///     path.segments(),
    ///     &["a".into(), "0".into(), "b".into(), "c".into()] as &[Segment],
    /// );
    /// ```
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Path {
                segments: vec![Segment::Key(String::new())],
            };
        }
        let mut segments = Vec::new();
        let mut buf = String::new();
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    segments.push(Segment::Key(std::mem::take(&mut buf)));
                }
                '[' => {
                    if !buf.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut buf)));
                    }
                    let mut inner = String::new();
                    for c in chars.by_ref() {
                        if c == ']' {
                            break;
                        }
                        inner.push(c);
                    }
                    segments.push(Segment::Key(unquote(&inner)));
                    // a dot straight after "]" is a separator, not an
                    // empty key
                    if chars.peek() == Some(&'.') {
                        chars.next();
                    }
                }
                _ => buf.push(c),
            }
        }
        if !buf.is_empty() || text.ends_with('.') {
            segments.push(Segment::Key(buf));
        }
        Path { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

fn unquote(inner: &str) -> String {
    let stripped = inner
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| inner.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')));
    stripped.unwrap_or(inner).to_string()
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Path::parse(text)
    }
}

impl From<String> for Path {
    fn from(text: String) -> Self {
        Path::parse(&text)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

impl From<&[&str]> for Path {
    fn from(keys: &[&str]) -> Self {
        Path {
            segments: keys.iter().map(|k| Segment::from(*k)).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(keys: [&str; N]) -> Self {
        Path {
            segments: keys.iter().map(|k| Segment::from(*k)).collect(),
        }
    }
}

impl<const N: usize> From<[Segment; N]> for Path {
    fn from(segments: [Segment; N]) -> Self {
        Path {
            segments: segments.into(),
        }
    }
}
