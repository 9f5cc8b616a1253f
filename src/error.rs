use thiserror::Error;

/// Errors raised while flattening a feature collection.
///
/// Every variant is raised before the document is touched, so a caller that
/// sees one of these still holds its input exactly as it passed it in.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlattenError {
    /// A required key is absent. `feature` is the index of the offending
    /// feature, or `None` when the key is missing from the document root.
    #[error("missing key `{key}`{}", feature_suffix(.feature))]
    MissingKey {
        key: &'static str,
        feature: Option<usize>,
    },

    /// A value has the wrong shape, e.g. `features` is not an array.
    #[error("expected {expected} at `{path}`, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The configured id key would overwrite a key the flattener reads.
    #[error("id field `{0}` collides with a GeoJSON structural key")]
    ReservedIdField(String),

    /// Identifiers from `start_id` for `count` features do not all fit in
    /// an `i64`.
    #[error("ids starting at {start_id} for {count} features exceed i64::MAX")]
    IdOutOfRange { start_id: u64, count: usize },
}

impl FlattenError {
    pub(crate) fn missing(key: &'static str, feature: Option<usize>) -> Self {
        FlattenError::MissingKey { key, feature }
    }

    pub(crate) fn mismatch(
        path: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        FlattenError::TypeMismatch {
            path: path.into(),
            expected,
            found: json_kind(found),
        }
    }
}

fn feature_suffix(feature: &Option<usize>) -> String {
    match feature {
        Some(idx) => format!(" in feature {}", idx),
        None => String::new(),
    }
}

/// Human readable name of a JSON value's kind, used in error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, FlattenError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_messages() {
        let root = FlattenError::missing("features", None);
        assert_eq!(root.to_string(), "missing key `features`");

        let nested = FlattenError::missing("properties", Some(3));
        assert_eq!(nested.to_string(), "missing key `properties` in feature 3");
    }

    #[test]
    fn test_config_error_messages() {
        let reserved = FlattenError::ReservedIdField(String::from("properties"));
        assert_eq!(
            reserved.to_string(),
            "id field `properties` collides with a GeoJSON structural key"
        );

        let range = FlattenError::IdOutOfRange { start_id: u64::MAX, count: 2 };
        assert_eq!(
            range.to_string(),
            format!("ids starting at {} for 2 features exceed i64::MAX", u64::MAX)
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = FlattenError::mismatch("features", "array", &json!({"a": 1}));
        assert_eq!(err.to_string(), "expected array at `features`, found object");
    }
}
