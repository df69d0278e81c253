//! URI template resolution.
//!
//! Templates carry `{name}` placeholders where `name` is a run of word
//! characters. Resolution prompts once per distinct placeholder and performs
//! literal text substitution — values are injected as-is, without
//! percent-encoding.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;
use crate::prompt::Prompt;

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap())
}

/// Distinct placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for capture in placeholder_re().captures_iter(template) {
        let name = &capture[1];
        if !seen.iter().any(|s| s == name) {
            seen.push(name.to_string());
        }
    }
    seen
}

/// Replace every `{name}` occurrence with its resolved value. Placeholders
/// without a value are left untouched.
pub fn substitute(template: &str, values: &HashMap<String, String>) -> String {
    let mut uri = template.to_string();
    for (name, value) in values {
        uri = uri.replace(&format!("{{{}}}", name), value);
    }
    uri
}

/// Prompt for each distinct placeholder and produce the concrete address.
///
/// An empty value (or input EOF) aborts resolution: the missing parameter is
/// reported and `Ok(None)` is returned so the caller skips the read instead
/// of substituting an empty string.
pub fn resolve(template: &str, prompt: &mut dyn Prompt) -> Result<Option<String>> {
    let names = placeholders(template);
    let mut values = HashMap::new();

    if !names.is_empty() {
        println!("\nPlease provide the following parameters:");
        println!("{}", "-".repeat(60));
    }

    for name in &names {
        let value = prompt
            .read_line(&format!("  {}: ", name))?
            .filter(|v| !v.is_empty());
        match value {
            Some(value) => {
                values.insert(name.clone(), value);
            }
            None => {
                println!("  Parameter '{}' is required.", name);
                break;
            }
        }
    }

    if values.len() != names.len() {
        println!("\nMissing required parameters. Skipping.");
        return Ok(None);
    }

    Ok(Some(substitute(template, &values)))
}
