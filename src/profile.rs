use regex::Regex;
use std::sync::LazyLock;

/// The language dialects with a registered profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    PowerShell,
}

/// Comment delimiters for a dialect. Python reuses one symmetric triple-quote
/// token for both ends; PowerShell has distinct open/close tokens.
#[derive(Debug, Clone, Copy)]
pub struct CommentDelimiters {
    pub start: &'static str,
    pub end: &'static str,
    /// Prefix prepended to each body line, for dialects that decorate
    /// continuation lines inside a comment block
    pub line_prefix: Option<&'static str>,
}

/// Phrasing used by the prompt builder for a dialect.
#[derive(Debug, Clone, Copy)]
pub struct PromptSettings {
    /// What a non-module region is called, e.g. "function or class"
    pub subject: &'static str,
    /// The documentation style the backend is asked for
    pub style: &'static str,
    /// Ordered formatting rules rendered as a bulleted list
    pub rules: &'static [&'static str],
    /// Literal the backend must return verbatim when no code was supplied
    pub empty_response: &'static str,
}

/// Detection and formatting rules for one language dialect.
///
/// Profiles are immutable values registered once at startup; adding a language
/// is a pure data addition. Look one up with [`profile_for`].
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub language: Language,
    /// Buffer-language tags this profile applies to
    pub identifiers: &'static [&'static str],
    /// Recognizes a line that opens a function/class definition
    pub definition: Regex,
    /// Token that ends a definition's signature and begins its body
    pub block_open: &'static str,
    /// Tokens a signature continuation line may end with, consulted by the
    /// strict upward scan
    pub continuations: &'static [&'static str],
    /// Whether the upward scan aborts on unrecognizable non-continuation lines
    pub strict_scan: bool,
    pub delimiters: CommentDelimiters,
    pub prompt: PromptSettings,
}

impl LanguageProfile {
    pub fn python() -> Self {
        Self {
            language: Language::Python,
            identifiers: &["python"],
            definition: Regex::new(r"^\s*(async\s+def|def|class)\s+\w").unwrap(),
            block_open: ":",
            continuations: &[",", ":", "(", "\\"],
            strict_scan: false,
            delimiters: CommentDelimiters {
                start: "\"\"\"",
                end: "\"\"\"",
                line_prefix: None,
            },
            prompt: PromptSettings {
                subject: "function or class",
                style: "Google-style docstring",
                rules: &[
                    "Start with a one-line summary in the imperative mood.",
                    "Document each parameter under an Args: section, with its type.",
                    "Document the return value under a Returns: section.",
                    "Document raised exceptions under a Raises: section, if any.",
                    "Keep every line under 79 characters.",
                ],
                empty_response: "No code was provided to document.",
            },
        }
    }

    pub fn powershell() -> Self {
        Self {
            language: Language::PowerShell,
            identifiers: &["powershell"],
            definition: Regex::new(r"(?i)^\s*(function|filter|workflow|configuration)\s+[\w-]+")
                .unwrap(),
            block_open: "{",
            continuations: &[",", "{", "(", "`"],
            strict_scan: true,
            delimiters: CommentDelimiters {
                start: "<#",
                end: "#>",
                line_prefix: None,
            },
            prompt: PromptSettings {
                subject: "function",
                style: "comment-based help block",
                rules: &[
                    "Begin with a .SYNOPSIS section holding a one-line summary.",
                    "Add a .DESCRIPTION section explaining what the function does.",
                    "Add a .PARAMETER section for each parameter, named exactly.",
                    "Add an .EXAMPLE section showing a typical invocation.",
                ],
                empty_response: "No code was provided to document.",
            },
        }
    }

    /// Human-readable dialect name, used in prompts and messages.
    pub fn display_name(&self) -> &'static str {
        match self.language {
            Language::Python => "Python",
            Language::PowerShell => "PowerShell",
        }
    }
}

static REGISTRY: LazyLock<Vec<LanguageProfile>> =
    LazyLock::new(|| vec![LanguageProfile::python(), LanguageProfile::powershell()]);

/// Look up the profile registered for a buffer language tag.
///
/// # Examples
///
/// ```
/// use docweave::profile_for;
///
/// assert!(profile_for("python").is_some());
/// assert!(profile_for("powershell").is_some());
/// assert!(profile_for("cobol").is_none());
/// ```
pub fn profile_for(language_id: &str) -> Option<&'static LanguageProfile> {
    REGISTRY
        .iter()
        .find(|profile| profile.identifiers.contains(&language_id))
}

/// Map a file extension to a registered language tag.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "py" | "pyw" => Some("python"),
        "ps1" | "psm1" | "psd1" => Some("powershell"),
        _ => None,
    }
}
