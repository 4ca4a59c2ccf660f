use crate::buffer::Buffer;
use crate::detect::CodeContext;
use crate::profile::LanguageProfile;

/// One standard indent unit past the definition's own indentation.
const INDENT_UNIT: &str = "    ";

/// Interpreter directive marker that must stay on the file's first line.
const DIRECTIVE_MARKER: &str = "#!";

/// Insert the cleaned comment body into `buffer` at the point implied by
/// `context`, wrapped in the dialect's delimiters. Returns the line index the
/// block was inserted at.
///
/// This is a pure insertion: existing lines are spliced around, never replaced
/// or deleted, so a misdetected region can only misplace the comment.
pub fn insert_comment(
    buffer: &mut Buffer,
    body: &str,
    context: &CodeContext,
    profile: &LanguageProfile,
) -> usize {
    let (at, block) = if context.is_module_level {
        (module_insertion_line(buffer), module_block(body, profile))
    } else {
        (
            definition_insertion_line(buffer, context, profile),
            definition_block(body, context, profile),
        )
    };
    buffer.insert_lines(at, &block);
    at
}

/// Line 0, unless line 0 carries an interpreter directive.
fn module_insertion_line(buffer: &Buffer) -> usize {
    if buffer
        .line(0)
        .is_some_and(|line| line.starts_with(DIRECTIVE_MARKER))
    {
        1
    } else {
        0
    }
}

fn module_block(body: &str, profile: &LanguageProfile) -> Vec<String> {
    let mut lines = vec![profile.delimiters.start.to_string()];
    push_body_lines(&mut lines, body, "", profile);
    lines.push(profile.delimiters.end.to_string());
    lines.push(String::new());
    lines
}

/// Walk down from the definition line until the block-open marker appears,
/// handling multi-line signatures; the block goes on the next line. A
/// signature with no marker in the rest of the buffer falls back to the line
/// right after the definition.
fn definition_insertion_line(
    buffer: &Buffer,
    context: &CodeContext,
    profile: &LanguageProfile,
) -> usize {
    let mut line = context.definition_line;
    while line < buffer.line_count() {
        if buffer
            .line(line)
            .is_some_and(|text| text.contains(profile.block_open))
        {
            return line + 1;
        }
        line += 1;
    }
    context.definition_line + 1
}

fn definition_block(body: &str, context: &CodeContext, profile: &LanguageProfile) -> Vec<String> {
    let indent = format!("{}{}", context.indentation, INDENT_UNIT);
    let mut lines = vec![format!("{indent}{}", profile.delimiters.start)];
    push_body_lines(&mut lines, body, &indent, profile);
    lines.push(format!("{indent}{}", profile.delimiters.end));
    lines.push(String::new());
    lines
}

/// Blank body lines are emitted truly empty so no trailing whitespace lands
/// in the buffer.
fn push_body_lines(lines: &mut Vec<String>, body: &str, indent: &str, profile: &LanguageProfile) {
    let prefix = profile.delimiters.line_prefix.unwrap_or("");
    for line in body.lines() {
        if line.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.push(format!("{indent}{prefix}{line}"));
        }
    }
}
