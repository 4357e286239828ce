use crate::error::{ErrorKind, Result, SieveError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged result returned to callers at the serving boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResponse {
    Success { result: Value },
    Error { error: String, kind: ErrorKind },
}

impl ToolResponse {
    pub fn success<T: Serialize>(result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(result) => ToolResponse::Success { result },
            Err(e) => ToolResponse::failure(&SieveError::from(e)),
        }
    }

    pub fn failure(err: &SieveError) -> Self {
        ToolResponse::Error {
            error: err.to_string(),
            kind: err.kind(),
        }
    }

    pub fn from_result<T: Serialize>(result: Result<T>) -> Self {
        match result {
            Ok(value) => ToolResponse::success(&value),
            Err(e) => ToolResponse::failure(&e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResponse::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summary::analyze;
    use serde_json::json;

    #[test]
    fn test_success_shape() {
        let response = ToolResponse::from_result(analyze(&json!([1, 2])));
        assert!(response.is_success());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["result"]["max"], json!(2.0));
    }

    #[test]
    fn test_error_shape() {
        let response = ToolResponse::from_result(analyze(&json!(["a"])));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, json!({
            "status": "error",
            "error": "No valid numeric data in the list",
            "kind": "empty_input"
        }));
    }

    #[test]
    fn test_cleaning_failure_shape() {
        let deep = format!("{}{}", "[".repeat(10_000), "]".repeat(10_000));
        let err = crate::clean::clean_json(deep.as_bytes(), &crate::CleanConfig::default()).unwrap_err();
        let value = serde_json::to_value(ToolResponse::failure(&err)).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["kind"], "malformed_input");
        assert!(value["error"].as_str().unwrap().contains("64"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let response = ToolResponse::failure(&SieveError::malformed("bad"));
        let text = serde_json::to_string(&response).unwrap();
        let back: ToolResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(back, response);
    }
}
