#![forbid(unsafe_code)]

//! Scanner for printf-style translation templates.
//!
//! Locale templates use a small subset of printf: `%s` and `%d` take the next
//! argument, `%n$s` and `%n$d` take the `n`-th argument (1-based), and `%%` is
//! a literal percent sign. [`parse`] splits a template into [`Segment`]s
//! lazily, left to right, in a single pass.
//!
//! # Invariants
//!
//! 1. **Lossless**: concatenating [`Segment::source`] over all segments
//!    reproduces the template byte for byte.
//! 2. **No empty literals**: adjacent directives are never separated by an
//!    empty [`Segment::Literal`]; an empty template yields nothing.
//! 3. **Permissive**: a `%` that does not start a directive (followed by
//!    punctuation, digits without `$`, or nothing at all) stays literal text.
//!
//! # Example
//!
//! ```
//! use chat_i18n::format::{parse, FormatKind, Segment};
//!
//! let segments: Vec<_> = parse("%2$s before %1$s").collect();
//! assert_eq!(
//!     segments[0],
//!     Segment::Placeholder { index: Some(2), kind: FormatKind::String, source: "%2$s" }
//! );
//! assert_eq!(segments[1], Segment::Literal(" before "));
//! ```

/// What a recognized directive stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// `%s`: the argument's rendered text.
    String,
    /// `%d`: also the argument's rendered text; no numeric formatting.
    Decimal,
    /// `%%`: a single `%`, consuming no argument.
    PercentLiteral,
}

impl FormatKind {
    /// Whether this directive consumes an argument.
    #[must_use]
    pub const fn takes_argument(self) -> bool {
        matches!(self, Self::String | Self::Decimal)
    }
}

/// One piece of a scanned template, borrowing from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text copied to the output as-is.
    Literal(&'a str),
    /// A recognized directive.
    Placeholder {
        /// Explicit 1-based argument index from `%n$`, as written.
        index: Option<usize>,
        kind: FormatKind,
        source: &'a str,
    },
    /// A directive with an unknown conversion letter (`%x`, `%2$q`).
    /// Produces no output and consumes no argument.
    Unrecognized(&'a str),
}

impl<'a> Segment<'a> {
    /// The exact template text this segment was scanned from.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        match *self {
            Self::Literal(text) | Self::Unrecognized(text) => text,
            Self::Placeholder { source, .. } => source,
        }
    }
}

/// Scan `template` into segments.
///
/// The returned iterator is single-use; scanning again means calling `parse`
/// again, which is cheap and has no side effects.
#[must_use]
pub fn parse(template: &str) -> Segments<'_> {
    Segments {
        template,
        position: 0,
        pending: None,
    }
}

/// Lazy iterator over the segments of a template. See [`parse`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    template: &'a str,
    position: usize,
    pending: Option<Segment<'a>>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        let len = self.template.len();
        if self.position >= len {
            return None;
        }

        let from = self.position;
        let Some(directive) = find_directive(self.template.as_bytes(), from) else {
            self.position = len;
            return Some(Segment::Literal(&self.template[from..]));
        };

        self.position = directive.end;
        let segment = directive.segment(&self.template[directive.start..directive.end]);
        if directive.start > from {
            self.pending = Some(segment);
            Some(Segment::Literal(&self.template[from..directive.start]))
        } else {
            Some(segment)
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

#[derive(Debug, Clone, Copy)]
struct Directive {
    start: usize,
    end: usize,
    index: Option<usize>,
    conversion: u8,
}

impl Directive {
    fn segment(self, source: &str) -> Segment<'_> {
        let kind = match self.conversion {
            b's' => FormatKind::String,
            b'd' => FormatKind::Decimal,
            b'%' => FormatKind::PercentLiteral,
            _ => return Segment::Unrecognized(source),
        };
        Segment::Placeholder {
            index: self.index,
            kind,
            source,
        }
    }
}

/// Find the first directive starting at or after `from`.
fn find_directive(bytes: &[u8], from: usize) -> Option<Directive> {
    let mut search = from;
    while let Some(offset) = bytes[search..].iter().position(|&b| b == b'%') {
        let start = search + offset;
        if let Some(directive) = directive_at(bytes, start) {
            return Some(directive);
        }
        search = start + 1;
    }
    None
}

/// Match `%(?:(\d+)\$)?([A-Za-z%])` at `start`.
///
/// Unlike `%(...)?([A-Za-z%]|$)`, the end-of-input alternative is not
/// matched: a trailing `%` stays literal text.
fn directive_at(bytes: &[u8], start: usize) -> Option<Directive> {
    let digits_start = start + 1;
    let digits_len = bytes[digits_start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let digits_end = digits_start + digits_len;

    let (index, cursor) = if digits_len > 0 && bytes.get(digits_end) == Some(&b'$') {
        (
            Some(parse_index(&bytes[digits_start..digits_end])),
            digits_end + 1,
        )
    } else {
        (None, digits_start)
    };

    match bytes.get(cursor) {
        Some(&conversion) if conversion.is_ascii_alphabetic() || conversion == b'%' => {
            Some(Directive {
                start,
                end: cursor + 1,
                index,
                conversion,
            })
        }
        _ => None,
    }
}

/// Parse ASCII digits, saturating instead of overflowing.
fn parse_index(digits: &[u8]) -> usize {
    digits.iter().fold(0usize, |acc, &d| {
        acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
    })
}
