use crate::buffer::{Buffer, Position, Span, Target};
use crate::error::{Error, Result};
use crate::profile::LanguageProfile;

/// The region of source text selected for documentation, plus everything the
/// formatter needs to place the comment afterwards.
///
/// A context is created fresh per invocation and discarded after insertion;
/// insertion always happens immediately after detection, so the line indices
/// are never stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeContext {
    /// Exact extracted text of the region
    pub code: String,
    /// True only when the whole file is the subject
    pub is_module_level: bool,
    /// The selected span, for selection mode; provenance only elsewhere
    pub span: Option<Span>,
    /// Leading whitespace of the region's first line, verbatim
    pub indentation: String,
    /// Zero-based line index of the definition line (0 for module level,
    /// selection start for selection mode)
    pub definition_line: usize,
}

/// Determine the minimal region to document.
///
/// Three mutually exclusive modes, in priority order: an active non-empty
/// selection is taken byte-for-byte; a cursor at (0,0) selects the whole
/// module; any other cursor searches upward for the enclosing definition.
/// Returns `Ok(None)` when no definition is found above the cursor, and
/// `Err(Error::MalformedContext)` when a strict-scan profile meets a line
/// that cannot be part of a signature.
///
/// # Examples
///
/// ```
/// use docweave::{detect, profile_for, Buffer, Position, Target};
///
/// let buffer = Buffer::new("def f(x):\n    return x\n");
/// let profile = profile_for("python").unwrap();
/// let context = detect(&buffer, Target::Cursor(Position::new(1, 4)), profile)
///     .unwrap()
///     .unwrap();
/// assert_eq!(context.definition_line, 0);
/// assert!(!context.is_module_level);
/// ```
pub fn detect(
    buffer: &Buffer,
    target: Target,
    profile: &LanguageProfile,
) -> Result<Option<CodeContext>> {
    let cursor = match target {
        Target::Selection(span) if !span.is_empty() => {
            return Ok(Some(selection_context(buffer, span)));
        }
        Target::Selection(span) => span.start,
        Target::Cursor(position) => position,
    };

    if cursor.line == 0 && cursor.character == 0 {
        return Ok(Some(module_context(buffer)));
    }

    enclosing_context(buffer, cursor, profile)
}

fn module_context(buffer: &Buffer) -> CodeContext {
    CodeContext {
        code: buffer.text(),
        is_module_level: true,
        span: None,
        indentation: String::new(),
        definition_line: 0,
    }
}

fn selection_context(buffer: &Buffer, span: Span) -> CodeContext {
    // Indentation comes from the line holding the selection start, not from
    // the selected text itself.
    CodeContext {
        code: buffer.text_in_span(span),
        is_module_level: false,
        span: Some(span),
        indentation: buffer.leading_whitespace(span.start.line),
        definition_line: span.start.line,
    }
}

fn enclosing_context(
    buffer: &Buffer,
    cursor: Position,
    profile: &LanguageProfile,
) -> Result<Option<CodeContext>> {
    let mut line = cursor.line.min(buffer.line_count().saturating_sub(1));

    let definition_line = loop {
        let text = buffer.line(line).unwrap_or_default();
        if profile.definition.is_match(text) {
            break line;
        }
        if profile.strict_scan && !buffer.is_blank(line) {
            let trimmed = text.trim_end();
            let continues = profile
                .continuations
                .iter()
                .any(|token| trimmed.ends_with(token));
            if !continues {
                return Err(Error::MalformedContext(line + 1));
            }
        }
        if line == 0 {
            return Ok(None);
        }
        line -= 1;
    };

    let definition_indent = buffer.indent_width(definition_line);
    let mut end = definition_line + 1;
    while end < buffer.line_count() {
        if !buffer.is_blank(end) && buffer.indent_width(end) <= definition_indent {
            break;
        }
        end += 1;
    }

    Ok(Some(CodeContext {
        code: buffer.text_of_lines(definition_line..end),
        is_module_level: false,
        span: None,
        indentation: buffer.leading_whitespace(definition_line),
        definition_line,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LanguageProfile;

    fn python() -> LanguageProfile {
        LanguageProfile::python()
    }

    fn powershell() -> LanguageProfile {
        LanguageProfile::powershell()
    }

    fn cursor(line: usize, character: usize) -> Target {
        Target::Cursor(Position::new(line, character))
    }

    #[test]
    fn test_module_mode_returns_full_buffer() {
        let source = "import os\n\ndef f():\n    pass\n";
        let buffer = Buffer::new(source);
        let context = detect(&buffer, cursor(0, 0), &python()).unwrap().unwrap();
        assert!(context.is_module_level);
        assert_eq!(context.code, source);
        assert_eq!(context.indentation, "");
        assert_eq!(context.definition_line, 0);
    }

    #[test]
    fn test_module_mode_on_empty_buffer() {
        let buffer = Buffer::new("");
        let context = detect(&buffer, cursor(0, 0), &python()).unwrap().unwrap();
        assert!(context.is_module_level);
        assert_eq!(context.code, "");
    }

    #[test]
    fn test_cursor_off_origin_is_not_module_mode() {
        let buffer = Buffer::new("x = 1\n");
        let context = detect(&buffer, cursor(0, 3), &python()).unwrap();
        assert!(context.is_none());
    }

    #[test]
    fn test_selection_mode_is_byte_identical() {
        let buffer = Buffer::new("    if x:\n        y = compute(x)\n");
        let span = Span::new(Position::new(1, 8), Position::new(1, 24));
        let context = detect(&buffer, Target::Selection(span), &python())
            .unwrap()
            .unwrap();
        assert_eq!(context.code, "y = compute(x)");
        assert!(!context.is_module_level);
        // Indentation comes from the selection's start line.
        assert_eq!(context.indentation, "        ");
        assert_eq!(context.definition_line, 1);
        assert_eq!(context.span, Some(span));
    }

    #[test]
    fn test_empty_selection_falls_back_to_cursor_modes() {
        let buffer = Buffer::new("a = 1\n");
        let origin = Span::new(Position::new(0, 0), Position::new(0, 0));
        let context = detect(&buffer, Target::Selection(origin), &python())
            .unwrap()
            .unwrap();
        assert!(context.is_module_level);
    }

    #[test]
    fn test_enclosing_definition_from_body() {
        let buffer = Buffer::new("def f(x):\n    return x\n");
        let context = detect(&buffer, cursor(1, 4), &python()).unwrap().unwrap();
        assert_eq!(context.definition_line, 0);
        assert_eq!(context.code, "def f(x):\n    return x");
        assert_eq!(context.indentation, "");
    }

    #[test]
    fn test_block_ends_at_dedent() {
        let source = "def f():\n    a = 1\n    return a\n\ndef g():\n    pass\n";
        let buffer = Buffer::new(source);
        let context = detect(&buffer, cursor(2, 0), &python()).unwrap().unwrap();
        assert_eq!(context.definition_line, 0);
        assert_eq!(context.code, "def f():\n    a = 1\n    return a\n");
    }

    #[test]
    fn test_nested_definition_wins() {
        let source = "class C:\n    def m(self):\n        return 1\n";
        let buffer = Buffer::new(source);
        let context = detect(&buffer, cursor(2, 8), &python()).unwrap().unwrap();
        assert_eq!(context.definition_line, 1);
        assert_eq!(context.indentation, "    ");
        assert_eq!(context.code, "    def m(self):\n        return 1");
    }

    #[test]
    fn test_empty_body_definition_does_not_error() {
        let source = "def f():\nx = 1\n";
        let buffer = Buffer::new(source);
        let context = detect(&buffer, cursor(0, 5), &python()).unwrap().unwrap();
        // Region is exactly the definition line, zero body lines.
        assert_eq!(context.code, "def f():");
        assert_eq!(context.definition_line, 0);
    }

    #[test]
    fn test_definition_at_end_of_file() {
        let buffer = Buffer::new("x = 1\ndef f():");
        let context = detect(&buffer, cursor(1, 3), &python()).unwrap().unwrap();
        assert_eq!(context.code, "def f():");
    }

    #[test]
    fn test_no_definition_found_returns_none() {
        let buffer = Buffer::new("x = 1\ny = 2\nz = 3\n");
        let context = detect(&buffer, cursor(2, 1), &python()).unwrap();
        assert!(context.is_none());
    }

    #[test]
    fn test_tabs_preserved_in_indentation() {
        let buffer = Buffer::new("class C:\n\tdef m(self):\n\t\treturn 1\n");
        let context = detect(&buffer, cursor(2, 2), &python()).unwrap().unwrap();
        assert_eq!(context.indentation, "\t");
        assert_eq!(context.definition_line, 1);
    }

    #[test]
    fn test_strict_scan_aborts_on_unrecognizable_line() {
        let source = "function Get-Widget {\n    $x = 1\n    Write-Output $x\n}\n";
        let buffer = Buffer::new(source);
        let result = detect(&buffer, cursor(2, 4), &powershell());
        assert!(matches!(result, Err(Error::MalformedContext(3))));
    }

    #[test]
    fn test_strict_scan_accepts_signature_continuations() {
        let source = "function Get-Widget(\n    [string]$Name,\n    [int]$Count) {\n    $Name\n}\n";
        let buffer = Buffer::new(source);
        // Cursor on a parameter line ending with a comma walks up cleanly.
        let context = detect(&buffer, cursor(1, 4), &powershell())
            .unwrap()
            .unwrap();
        assert_eq!(context.definition_line, 0);
    }

    #[test]
    fn test_strict_scan_skips_blank_lines() {
        let source = "function Get-Widget {\n\n    $x\n}\n";
        let buffer = Buffer::new(source);
        // Cursor on the blank line: blanks are skipped, the definition is found.
        let context = detect(&buffer, cursor(1, 0), &powershell())
            .unwrap()
            .unwrap();
        assert_eq!(context.definition_line, 0);
    }

    #[test]
    fn test_powershell_block_region() {
        let source = "function Get-Widget {\n    param([string]$Name)\n    $Name\n}\n";
        let buffer = Buffer::new(source);
        let context = detect(&buffer, cursor(0, 9), &powershell())
            .unwrap()
            .unwrap();
        assert_eq!(context.definition_line, 0);
        // The closing brace sits at the definition's indent and bounds the block.
        assert_eq!(
            context.code,
            "function Get-Widget {\n    param([string]$Name)\n    $Name"
        );
    }

    #[test]
    fn test_cursor_beyond_buffer_is_clamped() {
        let buffer = Buffer::new("def f():\n    pass\n");
        let context = detect(&buffer, cursor(99, 0), &python()).unwrap().unwrap();
        assert_eq!(context.definition_line, 0);
    }
}
