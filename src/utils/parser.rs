use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RecipeError;
use crate::models::{Dish, ModelResponse};

/// A normalized response together with every schema violation found on the way.
#[derive(Debug)]
pub struct ParseReport {
    pub response: ModelResponse,
    pub issues: Vec<RecipeError>,
}

fn malformed(path: impl Into<String>, message: impl Into<String>) -> RecipeError {
    RecipeError::MalformedResponse {
        path: path.into(),
        message: message.into(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decodes model text into a `ModelResponse`, recording why anything was dropped.
///
/// Undecodable text or a non-object value gives the empty response. A missing
/// or non-array `dishes` becomes an empty list and the other top-level keys are
/// kept. Dishes that fail the typed decode are dropped one by one.
pub fn parse_report(text: &str) -> ParseReport {
    let mut issues = Vec::new();

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            issues.push(malformed("$", e.to_string()));
            return ParseReport {
                response: ModelResponse {
                    raw: text.to_string(),
                    ..ModelResponse::empty()
                },
                issues,
            };
        }
    };

    let mut map = match value {
        Value::Object(map) => map,
        other => {
            issues.push(malformed(
                "$",
                format!("expected an object, found {}", kind_of(&other)),
            ));
            return ParseReport {
                response: ModelResponse {
                    raw: text.to_string(),
                    ..ModelResponse::empty()
                },
                issues,
            };
        }
    };

    let mut dishes = Vec::new();
    match map.remove("dishes") {
        Some(Value::Array(items)) => {
            for (index, item) in items.into_iter().enumerate() {
                match serde_json::from_value::<Dish>(item) {
                    Ok(dish) => dishes.push(dish),
                    Err(e) => issues.push(malformed(format!("dishes[{}]", index), e.to_string())),
                }
            }
        }
        Some(other) => issues.push(malformed(
            "dishes",
            format!("expected an array, found {}", kind_of(&other)),
        )),
        None => issues.push(malformed("dishes", "missing field")),
    }

    let notes = match map.remove("notes") {
        Some(Value::String(notes)) => Some(notes),
        Some(other) => {
            map.insert("notes".to_string(), other);
            None
        }
        None => None,
    };

    ParseReport {
        response: ModelResponse {
            dishes,
            notes,
            extra: map,
            raw: text.to_string(),
        },
        issues,
    }
}

/// Lenient parse used by the orchestrator. Never fails; issues are logged.
pub fn parse(text: &str) -> ModelResponse {
    let report = parse_report(text);
    for issue in &report.issues {
        warn!("{}", issue);
    }
    debug!(
        "Parsed {} dishes ({} issues)",
        report.response.dishes.len(),
        report.issues.len()
    );
    report.response
}
