use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// A single cell of a flattened table.
///
/// Property values are scalars in well-formed input. Anything else (nested
/// arrays or objects, integers beyond `i64`) is kept verbatim in `Json` so
/// that nothing is lost on the way through.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Json(Value),
}

/// Kind tag for a `CellValue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Json,
}

impl CellType {
    pub fn as_str(self) -> &'static str {
        match self {
            CellType::Null => "null",
            CellType::Boolean => "boolean",
            CellType::Integer => "integer",
            CellType::Number => "number",
            CellType::String => "string",
            CellType::Json => "json",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CellValue {
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Null => CellType::Null,
            CellValue::Bool(_) => CellType::Boolean,
            CellValue::Integer(_) => CellType::Integer,
            CellValue::Float(_) => CellType::Number,
            CellValue::String(_) => CellType::String,
            CellValue::Json(_) => CellType::Json,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if n.is_u64() {
                    // Out of i64 range; an f64 would silently round it
                    CellValue::Json(Value::Number(n))
                } else {
                    match n.as_f64() {
                        Some(f) => CellValue::Float(f),
                        None => CellValue::Json(Value::Number(n)),
                    }
                }
            }
            Value::String(s) => CellValue::String(s),
            other => CellValue::Json(other),
        }
    }
}

impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        CellValue::from(value.clone())
    }
}

impl From<CellValue> for Value {
    fn from(cell: CellValue) -> Self {
        match cell {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(b),
            CellValue::Integer(i) => Value::from(i),
            // Non-finite floats have no JSON form and become null
            CellValue::Float(f) => Value::from(f),
            CellValue::String(s) => Value::String(s),
            CellValue::Json(v) => v,
        }
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("null"),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::String(s) => f.write_str(s),
            CellValue::Json(v) => write!(f, "{}", v),
        }
    }
}

impl PartialEq<str> for CellValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for CellValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

macro_rules! partial_eq_scalar {
    ($($ty:ty => $method:ident),*) => {
        $(
            impl PartialEq<$ty> for CellValue {
                fn eq(&self, other: &$ty) -> bool {
                    self.$method() == Some(*other)
                }
            }

            impl PartialEq<$ty> for &CellValue {
                fn eq(&self, other: &$ty) -> bool {
                    self.$method() == Some(*other)
                }
            }
        )*
    };
}

partial_eq_scalar!(i64 => as_i64, f64 => as_f64, bool => as_bool);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_scalars() {
        assert_eq!(CellValue::from(json!(null)), CellValue::Null);
        assert_eq!(CellValue::from(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(json!(-7)), CellValue::Integer(-7));
        assert_eq!(CellValue::from(json!(2.5)), CellValue::Float(2.5));
        assert_eq!(CellValue::from(json!("Leeds")), "Leeds");
    }

    #[test]
    fn test_nested_values_pass_through() {
        let cell = CellValue::from(json!({"nested": [1, 2]}));
        assert_eq!(cell.cell_type(), CellType::Json);
        assert_eq!(Value::from(cell), json!({"nested": [1, 2]}));
    }

    #[test]
    fn test_large_unsigned_is_not_rounded() {
        let cell = CellValue::from(json!(u64::MAX));
        assert_eq!(cell, CellValue::Json(json!(u64::MAX)));
    }

    #[test]
    fn test_serializes_untagged() {
        let cells = vec![
            CellValue::Null,
            CellValue::Integer(3),
            CellValue::from("x"),
        ];
        assert_eq!(serde_json::to_string(&cells).unwrap(), r#"[null,3,"x"]"#);
    }

    #[test]
    fn test_scalar_comparisons() {
        let cell = CellValue::Integer(100);
        assert_eq!(cell, 100i64);
        assert_eq!(&cell, 100i64);
        assert!(cell == 100.0f64);
        assert!(CellValue::Bool(false) == false);
    }
}
