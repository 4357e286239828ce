//! Scalar value classification
//!
//! Decides whether a single JSON value is "clean" under one of the
//! built-in policies. Classification never fails: anything that does not
//! fit a policy is simply not clean.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Two or more uppercase letters followed by two or more digits, nothing else
static CODED_STRING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2,}[0-9]{2,}$").unwrap()
});

/// A single-value cleanliness policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// JSON number (integer or floating point). Numeric-looking strings do not count.
    Numeric,
    /// String matching the coded pattern, e.g. `"AB12"`, after trimming
    CodedString,
    /// Null, boolean, number or string
    Flat,
}

/// Classify `value` under `policy`
pub fn classify(value: &Value, policy: Policy) -> bool {
    match policy {
        Policy::Numeric => is_numeric(value),
        Policy::CodedString => is_coded_string(value),
        Policy::Flat => is_flat(value),
    }
}

pub fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

pub fn is_coded_string(value: &Value) -> bool {
    match value {
        Value::String(s) => CODED_STRING_REGEX.is_match(s.trim()),
        _ => false,
    }
}

pub fn is_flat(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Numeric or coded string, judged per value
pub fn is_clean(value: &Value) -> bool {
    is_numeric(value) || is_coded_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric() {
        assert!(classify(&json!(3), Policy::Numeric));
        assert!(classify(&json!(-2.75), Policy::Numeric));
        assert!(!classify(&json!("3"), Policy::Numeric));
        assert!(!classify(&json!(true), Policy::Numeric));
        assert!(!classify(&json!(null), Policy::Numeric));
    }

    #[test]
    fn test_coded_string_boundaries() {
        assert!(is_coded_string(&json!("AB12")));
        assert!(is_coded_string(&json!("ABCD1234")));
        assert!(!is_coded_string(&json!("A1")));
        assert!(!is_coded_string(&json!("AB1")));
        assert!(!is_coded_string(&json!("A12")));
        assert!(!is_coded_string(&json!("ABC1")));
        assert!(!is_coded_string(&json!("ab12")));
        assert!(!is_coded_string(&json!("AB12C")));
        assert!(!is_coded_string(&json!("12AB")));
        assert!(!is_coded_string(&json!(12)));
    }

    #[test]
    fn test_coded_string_trims_whitespace() {
        assert!(is_coded_string(&json!("  XY99 ")));
        assert!(!is_coded_string(&json!("XY 99")));
    }

    #[test]
    fn test_flat() {
        assert!(classify(&json!(null), Policy::Flat));
        assert!(classify(&json!(false), Policy::Flat));
        assert!(classify(&json!("text"), Policy::Flat));
        assert!(!classify(&json!([1]), Policy::Flat));
        assert!(!classify(&json!({"a": 1}), Policy::Flat));
    }

    #[test]
    fn test_is_clean() {
        assert!(is_clean(&json!(1.5)));
        assert!(is_clean(&json!("QQ01")));
        assert!(!is_clean(&json!("hello")));
    }
}
