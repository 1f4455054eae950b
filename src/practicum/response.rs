use serde_json::Value;

use crate::error::CycleError;

const REQUIRED_KEYS: [&str; 2] = ["homeworks", "current_date"];

/// JSON type name for error messages. The value itself is never echoed; it
/// can be arbitrarily large and the error text ends up in a chat message.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Validate the top-level shape of a statuses response and return the
/// `homeworks` items unchanged.
///
/// Items themselves are not inspected here; that happens when each one is
/// turned into a message.
pub fn check_response(response: &Value) -> Result<Vec<Value>, CycleError> {
    let Some(object) = response.as_object() else {
        return Err(CycleError::Shape(format!(
            "response is {} instead of a JSON object",
            json_kind(response)
        )));
    };

    if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
        return Err(CycleError::Shape(format!("response has no `{missing}` key")));
    }

    match &object["homeworks"] {
        Value::Array(items) => Ok(items.clone()),
        other => Err(CycleError::Shape(format!(
            "`homeworks` is {} instead of a list",
            json_kind(other)
        ))),
    }
}
