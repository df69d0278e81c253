//! Argument builder: prompts for tool parameters against a JSON Schema.
//!
//! Walks the schema's `properties` in declaration order, prompting once per
//! parameter. Empty input skips optional parameters and re-prompts required
//! ones; a coercion failure re-prompts the same parameter rather than
//! aborting the whole build.

use serde_json::{Map, Value as JsonValue};

use crate::error::{ExplorerError, Result};
use crate::prompt::Prompt;

/// Build a tool's argument map interactively from its input schema.
///
/// A schema without a `properties` key means "no parameters" and yields an
/// empty map. Skipped optional parameters are omitted entirely, never stored
/// as empty or null.
pub fn build_arguments(
    schema: &JsonValue,
    prompt: &mut dyn Prompt,
) -> Result<Map<String, JsonValue>> {
    let mut arguments = Map::new();

    let Some(properties) = schema.get("properties").and_then(JsonValue::as_object) else {
        return Ok(arguments);
    };
    if properties.is_empty() {
        return Ok(arguments);
    }

    let required: Vec<&str> = schema
        .get("required")
        .and_then(JsonValue::as_array)
        .map(|names| names.iter().filter_map(JsonValue::as_str).collect())
        .unwrap_or_default();

    println!("\nPlease provide the following parameters:");
    println!("{}", "-".repeat(60));

    for (name, info) in properties {
        let param_type = info
            .get("type")
            .and_then(JsonValue::as_str)
            .unwrap_or("string");
        let is_required = required.contains(&name.as_str());

        let marker = if is_required { "required" } else { "optional" };
        println!("\n{} ({})", name, marker);
        if let Some(description) = info.get("description").and_then(JsonValue::as_str) {
            if !description.is_empty() {
                println!("  Description: {}", description);
            }
        }
        println!("  Type: {}", param_type);

        loop {
            let Some(input) = prompt.read_line("  Enter value: ")? else {
                if is_required {
                    return Err(ExplorerError::InputClosed);
                }
                break;
            };

            if input.is_empty() {
                if is_required {
                    println!("  This parameter is required. Please provide a value.");
                    continue;
                }
                break;
            }

            match coerce(param_type, &input) {
                Ok(value) => {
                    arguments.insert(name.clone(), value);
                    break;
                }
                Err(err) => {
                    println!("  {}", err);
                    println!("  Please try again.");
                }
            }
        }
    }

    Ok(arguments)
}

/// Coerce one line of raw input to the declared JSON Schema type.
///
/// Booleans are true iff the lowercased input is one of `true`, `yes`, `1`,
/// `y`; every other non-empty value is false. Unknown types are kept as
/// verbatim strings.
pub fn coerce(param_type: &str, input: &str) -> Result<JsonValue> {
    match param_type {
        "integer" => input
            .parse::<i64>()
            .map(JsonValue::from)
            .map_err(|e| ExplorerError::Coerce {
                param_type: param_type.to_string(),
                reason: e.to_string(),
            }),
        "number" => {
            let parsed = input.parse::<f64>().map_err(|e| ExplorerError::Coerce {
                param_type: param_type.to_string(),
                reason: e.to_string(),
            })?;
            serde_json::Number::from_f64(parsed)
                .map(JsonValue::Number)
                .ok_or_else(|| ExplorerError::Coerce {
                    param_type: param_type.to_string(),
                    reason: "not a finite number".to_string(),
                })
        }
        "boolean" => {
            let lowered = input.to_lowercase();
            Ok(JsonValue::Bool(matches!(
                lowered.as_str(),
                "true" | "yes" | "1" | "y"
            )))
        }
        "object" | "array" => {
            serde_json::from_str(input).map_err(|e| ExplorerError::Coerce {
                param_type: param_type.to_string(),
                reason: e.to_string(),
            })
        }
        _ => Ok(JsonValue::String(input.to_string())),
    }
}
