//! Projection and printing of the selected record

use crate::AppError;
use serde_json::Value;

/// Apply an optional JMESPath expression to the selected record
///
/// # Errors
///
/// Returns `AppError::Query` if the expression does not compile or fails to
/// evaluate, and `AppError::Json` if the result cannot be converted back.
pub fn apply_query(value: Value, expression: Option<&str>) -> Result<Value, AppError> {
    let Some(expression) = expression else {
        return Ok(value);
    };

    let compiled = jmespath::compile(expression)?;
    let result = compiled.search(&value)?;
    tracing::debug!(expression, "applied query to selection");
    Ok(serde_json::to_value(&*result)?)
}

/// Text printed for a result
///
/// Strings print raw, other scalars print their JSON text, objects and arrays
/// print as pretty JSON.
///
/// # Errors
///
/// Returns `AppError::Json` if pretty printing fails.
pub fn format_result(value: &Value) -> Result<String, AppError> {
    Ok(match value {
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(value)?,
        scalar => scalar.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instance() -> Value {
        json!({
            "InstanceId": "i-0abc",
            "PrivateIpAddress": "10.0.0.4",
            "State": { "Name": "running", "Code": 16 },
            "Tags": [{ "Key": "Name", "Value": "web" }],
        })
    }

    #[test]
    fn test_no_expression_returns_record() {
        assert_eq!(apply_query(instance(), None).unwrap(), instance());
    }

    #[test]
    fn test_expression_projects_record() {
        assert_eq!(apply_query(instance(), Some("InstanceId")).unwrap(), json!("i-0abc"));
        assert_eq!(apply_query(instance(), Some("State.Code")).unwrap(), json!(16));
        assert_eq!(
            apply_query(instance(), Some("Tags[?Key=='Name'].Value | [0]")).unwrap(),
            json!("web")
        );
        assert_eq!(apply_query(instance(), Some("PublicIpAddress")).unwrap(), Value::Null);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(matches!(apply_query(instance(), Some("State.[")), Err(AppError::Query(_))));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(&json!("i-0abc")).unwrap(), "i-0abc");
        assert_eq!(format_result(&json!(16)).unwrap(), "16");
        assert_eq!(format_result(&json!(true)).unwrap(), "true");
        assert_eq!(format_result(&Value::Null).unwrap(), "null");
        assert_eq!(
            format_result(&json!({ "Name": "running" })).unwrap(),
            "{\n  \"Name\": \"running\"\n}"
        );
        assert_eq!(format_result(&json!(["a"])).unwrap(), "[\n  \"a\"\n]");
    }
}
