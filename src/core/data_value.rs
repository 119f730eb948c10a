use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::ser::{Serialize, Serializer};

/// Format used for datetime cells in serialized output
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single nullable table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int64(i64),
    Float64(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    String(String),
}

impl Value {
    /// Returns the type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Int64(_) => "Int64",
            Value::Float64(_) => "Float64",
            Value::Boolean(_) => "Boolean",
            Value::DateTime(_) => "DateTime",
            Value::String(_) => "String",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Exact key used to rank cells of orderable columns.
    ///
    /// Nulls, NaN and strings have no key.
    pub fn as_order_key(&self) -> Option<OrderKey> {
        match self {
            Value::Int64(v) => Some(OrderKey::Int(*v)),
            Value::Float64(v) if !v.is_nan() => Some(OrderKey::Float(*v)),
            Value::Boolean(v) => Some(OrderKey::Bool(*v)),
            Value::DateTime(v) => Some(OrderKey::Time(*v)),
            _ => None,
        }
    }

    /// Total order between two cells of the same column, nulls last
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Greater,
            (_, Value::Null) => Ordering::Less,
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Float64(a), Value::Float64(b)) => a.total_cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            // Cross-type comparisons only occur between columns, fall back to rank keys
            (a, b) => match (a.as_order_key(), b.as_order_key()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.to_string().cmp(&b.to_string()),
            },
        }
    }
}

/// Ranking key of an orderable cell.
///
/// Keys of one column share a variant and compare without loss: integers
/// as `i64`, floats by `total_cmp`, datetimes at full precision.
#[derive(Debug, Clone, Copy)]
pub enum OrderKey {
    Bool(bool),
    Int(i64),
    Float(f64),
    Time(NaiveDateTime),
}

impl OrderKey {
    fn rank(&self) -> u8 {
        match self {
            OrderKey::Bool(_) => 0,
            OrderKey::Int(_) | OrderKey::Float(_) => 1,
            OrderKey::Time(_) => 2,
        }
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (OrderKey::Bool(a), OrderKey::Bool(b)) => a.cmp(b),
            (OrderKey::Int(a), OrderKey::Int(b)) => a.cmp(b),
            (OrderKey::Float(a), OrderKey::Float(b)) => a.total_cmp(b),
            (OrderKey::Time(a), OrderKey::Time(b)) => a.cmp(b),
            // Mixed numeric keys only meet across columns
            (OrderKey::Int(a), OrderKey::Float(b)) => (*a as f64).total_cmp(b),
            (OrderKey::Float(a), OrderKey::Int(b)) => a.total_cmp(&(*b as f64)),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NaN"),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATETIME_FORMAT)),
            Value::String(v) => f.write_str(v),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            // serde_json writes non-finite floats as null
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Boolean(v) => serializer.serialize_bool(*v),
            Value::DateTime(v) => serializer.collect_str(&v.format(DATETIME_FORMAT)),
            Value::String(v) => serializer.serialize_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_order_keys() {
        assert_eq!(Value::Int64(3).as_order_key(), Some(OrderKey::Int(3)));
        assert_eq!(Value::Boolean(true).as_order_key(), Some(OrderKey::Bool(true)));
        assert_eq!(Value::Float64(f64::NAN).as_order_key(), None);
        assert_eq!(Value::String("a".into()).as_order_key(), None);
        assert_eq!(Value::Null.as_order_key(), None);

        let early = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let late = NaiveDate::from_ymd_opt(2021, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(Value::DateTime(early).as_order_key() < Value::DateTime(late).as_order_key());
    }

    #[test]
    fn test_order_keys_are_exact() {
        let big = 1i64 << 53;
        assert!(OrderKey::Int(big) < OrderKey::Int(big + 1));
        assert!(OrderKey::Int(-big - 1) < OrderKey::Int(-big));
        assert!(OrderKey::Int(i64::MAX - 1) < OrderKey::Int(i64::MAX));

        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let a = day.and_hms_micro_opt(12, 0, 0, 100).unwrap();
        let b = day.and_hms_micro_opt(12, 0, 0, 900).unwrap();
        assert!(OrderKey::Time(a) < OrderKey::Time(b));

        assert!(OrderKey::Bool(false) < OrderKey::Bool(true));
        assert!(OrderKey::Float(-0.5) < OrderKey::Float(0.25));
        assert_eq!(OrderKey::Int(2).cmp(&OrderKey::Float(2.5)), Ordering::Less);
    }

    #[test]
    fn test_compare_nulls_last() {
        assert_eq!(Value::Null.compare(&Value::Int64(1)), Ordering::Greater);
        assert_eq!(Value::Int64(1).compare(&Value::Null), Ordering::Less);
        assert_eq!(Value::Int64(1).compare(&Value::Int64(2)), Ordering::Less);
        assert_eq!(
            Value::String("b".into()).compare(&Value::String("a".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn test_serialize() {
        let ts = NaiveDate::from_ymd_opt(2019, 5, 1)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap();
        let cells = vec![
            Value::Null,
            Value::Int64(1),
            Value::Float64(1.0),
            Value::Boolean(false),
            Value::DateTime(ts),
            Value::from("x"),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[null,1,1.0,false,"2019-05-01T12:30:00","x"]"#);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(2.5)), Value::Float64(2.5));
    }
}
