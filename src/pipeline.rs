use crate::buffer::{Buffer, Target};
use crate::config::Settings;
use crate::detect::detect;
use crate::error::{Error, Result};
use crate::generate::{Generate, GeminiClient, clean_response};
use crate::insert::insert_comment;
use crate::profile::profile_for;
use crate::prompt::build_prompt;
use tracing::{debug, info};

/// Drives the full documentation pipeline against one buffer.
///
/// The pipeline is strictly sequential: detect the region, build the prompt,
/// call the backend, clean the response, insert the comment. The buffer is
/// not touched until the response has returned, so a failed or cancelled
/// generation leaves it unmodified.
///
/// # Examples
///
/// ```
/// use docweave::{Buffer, Documenter, Generate, Position, Result, Target};
///
/// struct Canned;
///
/// impl Generate for Canned {
///     fn generate(&self, _prompt: &str) -> Result<String> {
///         Ok("Return the input unchanged.".to_string())
///     }
/// }
///
/// let documenter = Documenter::new(Box::new(Canned));
/// let mut buffer = Buffer::new("def f(x):\n    return x\n");
/// let line = documenter
///     .document(&mut buffer, Target::Cursor(Position::new(1, 4)), "python")
///     .unwrap();
/// assert_eq!(line, 1);
/// assert!(buffer.text().contains("Return the input unchanged."));
/// ```
pub struct Documenter {
    generator: Box<dyn Generate>,
}

impl Documenter {
    pub fn new(generator: Box<dyn Generate>) -> Self {
        Self { generator }
    }

    /// Build a documenter over the configured Gemini backend. Settings are
    /// validated up front; a missing credential or model aborts before any
    /// detection runs.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(Box::new(GeminiClient::new(
            settings.api_key.clone(),
            settings.model.clone(),
            settings.endpoint.clone(),
        ))))
    }

    /// Run detection, generation and insertion for `target`, returning the
    /// line the comment block was inserted at.
    pub fn document(&self, buffer: &mut Buffer, target: Target, language_id: &str) -> Result<usize> {
        let profile = profile_for(language_id)
            .ok_or_else(|| Error::UnsupportedLanguage(language_id.to_string()))?;

        let context = detect(buffer, target, profile)?.ok_or(Error::DetectionFailed)?;
        debug!(
            definition_line = context.definition_line,
            module_level = context.is_module_level,
            "detected documentable region"
        );

        let body = if context.is_module_level && context.code.trim().is_empty() {
            // Empty module: use the profile's literal directly, never call
            // the backend.
            debug!("empty module, skipping backend call");
            profile.prompt.empty_response.to_string()
        } else {
            let prompt = build_prompt(&context.code, context.is_module_level, profile);
            let raw = self.generator.generate(&prompt)?;
            clean_response(&raw, &profile.delimiters)
        };

        let line = insert_comment(buffer, &body, &context, profile);
        info!(line, language = language_id, "inserted documentation comment");
        Ok(line)
    }
}
