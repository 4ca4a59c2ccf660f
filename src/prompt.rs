use crate::profile::LanguageProfile;

/// Compose the instruction sent to the generation backend.
///
/// Pure function. The section order is fixed: subject instruction, style,
/// bulleted rule list, labeled code block, empty-code fallback clause, and
/// the output-shape directive. The fallback clause is the only guard against
/// the backend inventing content for an empty region, so its wording names
/// the profile's `empty_response` literal exactly.
pub fn build_prompt(code: &str, is_module_level: bool, profile: &LanguageProfile) -> String {
    let subject = if is_module_level {
        "module"
    } else {
        profile.prompt.subject
    };

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Write a {} for the following {} {}.\n",
        profile.prompt.style,
        profile.display_name(),
        subject
    ));
    prompt.push_str("Follow these rules:\n");
    for rule in profile.prompt.rules {
        prompt.push_str(&format!("- {rule}\n"));
    }
    prompt.push_str(&format!("\nCode:\n{code}\n"));
    prompt.push_str(&format!(
        "\nIf no code was provided above, respond with exactly: {}\n",
        profile.prompt.empty_response
    ));
    prompt.push_str(
        "Respond with only the body of the comment. \
         Do not include comment delimiters and do not repeat the source code.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::LanguageProfile;

    #[test]
    fn test_prompt_contains_code_verbatim() {
        let profile = LanguageProfile::python();
        let code = "def f(x):\n    return x";
        let prompt = build_prompt(code, false, &profile);
        assert!(prompt.contains(code));
    }

    #[test]
    fn test_subject_switches_on_module_level() {
        let profile = LanguageProfile::python();
        let module = build_prompt("", true, &profile);
        assert!(module.contains("Python module"));
        let unit = build_prompt("def f(): pass", false, &profile);
        assert!(unit.contains("function or class"));
    }

    #[test]
    fn test_rules_render_as_bullets_in_order() {
        let profile = LanguageProfile::powershell();
        let prompt = build_prompt("function F {}", false, &profile);
        let mut last = 0;
        for rule in profile.prompt.rules {
            let position = prompt
                .find(&format!("- {rule}"))
                .expect("rule missing from prompt");
            assert!(position >= last, "rules out of order");
            last = position;
        }
    }

    #[test]
    fn test_fallback_names_empty_response_literal() {
        let profile = LanguageProfile::python();
        let prompt = build_prompt("", false, &profile);
        assert!(prompt.contains(profile.prompt.empty_response));
        assert!(prompt.contains("If no code was provided"));
    }

    #[test]
    fn test_sections_keep_fixed_order() {
        let profile = LanguageProfile::python();
        let prompt = build_prompt("def f(): pass", false, &profile);
        let rules = prompt.find("Follow these rules:").unwrap();
        let code = prompt.find("Code:").unwrap();
        let fallback = prompt.find("If no code was provided").unwrap();
        let shape = prompt.find("only the body of the comment").unwrap();
        assert!(rules < code && code < fallback && fallback < shape);
    }
}
