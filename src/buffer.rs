use std::ops::Range;

/// A zero-based line/character coordinate inside a [`Buffer`].
///
/// Character offsets count characters, not bytes, matching how editors report
/// cursor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based line index
    pub line: usize,
    /// Zero-based character offset within the line
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A span between two positions, start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span selects nothing and is treated as a bare cursor.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// What the user pointed at when invoking documentation.
#[derive(Debug, Clone, Copy)]
pub enum Target {
    /// A bare cursor position
    Cursor(Position),
    /// An explicit selection span
    Selection(Span),
}

/// An in-memory line buffer mirroring the editor's document surface.
///
/// The buffer exposes the line primitives the detector and formatter need
/// (per-line text, indentation width, blank predicate) and a single mutation,
/// [`Buffer::insert_lines`], which splices new lines in without touching
/// existing content. A trailing newline in the source text is preserved across
/// a [`Buffer::text`] round trip.
///
/// # Examples
///
/// ```
/// use docweave::Buffer;
///
/// let buffer = Buffer::new("def f(x):\n    return x\n");
/// assert_eq!(buffer.line_count(), 2);
/// assert_eq!(buffer.line(1), Some("    return x"));
/// assert_eq!(buffer.indent_width(1), 4);
/// assert_eq!(buffer.text(), "def f(x):\n    return x\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl Buffer {
    /// Create a buffer from source text, splitting on `\n`.
    pub fn new(content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        let trailing_newline = content.ends_with('\n');
        if trailing_newline {
            lines.pop();
        }
        Self {
            lines,
            trailing_newline,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Whether the line is empty or whitespace-only.
    pub fn is_blank(&self, index: usize) -> bool {
        self.line(index).is_some_and(|l| l.trim().is_empty())
    }

    /// Number of leading whitespace characters on the line.
    pub fn indent_width(&self, index: usize) -> usize {
        self.line(index)
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).count())
            .unwrap_or(0)
    }

    /// The leading whitespace of the line, verbatim (tabs and spaces are not
    /// normalized).
    pub fn leading_whitespace(&self, index: usize) -> String {
        self.line(index)
            .map(|l| l.chars().take_while(|c| c.is_whitespace()).collect())
            .unwrap_or_default()
    }

    /// The full buffer text, with the original trailing newline restored.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }

    /// Exact text covered by the half-open line `range`, joined with `\n`.
    /// Out-of-bounds indices are clamped to the buffer.
    pub fn text_of_lines(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines[start..end].join("\n")
    }

    /// Exact text covered by `span`, clamped to the buffer. The result is a
    /// byte-identical round trip of the selected substring.
    pub fn text_in_span(&self, span: Span) -> String {
        let (start, end) = if span.end < span.start {
            (span.end, span.start)
        } else {
            (span.start, span.end)
        };
        let last = self.lines.len().saturating_sub(1);
        let start_line = start.line.min(last);
        let end_line = end.line.min(last);

        if start_line == end_line {
            let line = &self.lines[start_line];
            let from = byte_offset(line, start.character);
            let to = byte_offset(line, end.character).max(from);
            return line[from..to].to_string();
        }

        let mut parts = Vec::with_capacity(end_line - start_line + 1);
        let first = &self.lines[start_line];
        parts.push(first[byte_offset(first, start.character)..].to_string());
        for line in &self.lines[start_line + 1..end_line] {
            parts.push(line.clone());
        }
        let final_line = &self.lines[end_line];
        parts.push(final_line[..byte_offset(final_line, end.character)].to_string());
        parts.join("\n")
    }

    /// Splice `new_lines` in before line `at`. `at == line_count()` appends.
    /// Existing lines are never modified or removed.
    pub fn insert_lines(&mut self, at: usize, new_lines: &[String]) {
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, new_lines.iter().cloned());
    }
}

/// Byte offset of the `character`-th character, clamped to the line length.
fn byte_offset(line: &str, character: usize) -> usize {
    line.char_indices()
        .nth(character)
        .map(|(offset, _)| offset)
        .unwrap_or(line.len())
}
