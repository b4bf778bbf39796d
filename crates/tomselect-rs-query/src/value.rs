//! Record value types for representing option data in a source-agnostic way.
//!
//! The [`Value`] enum is the core type used throughout the query layer to
//! represent record fields, constraint values, and formatted results. It
//! supports the common scalar types an option row carries and provides
//! conversions from standard Rust types.
//!
//! Constraint values arrive from the wire as strings, so [`Value`] also
//! implements *loose* equality and ordering: `"7"` compares equal to
//! `Int(7)`, and `"2024-01-15"` to the matching `Date`. Strict
//! [`PartialEq`] stays type-exact.

use std::cmp::Ordering;
use std::fmt;

/// A source-agnostic representation of a record field value.
///
/// # Examples
///
/// ```
/// use tomselect_rs_query::value::Value;
///
/// let v = Value::from(42_i64);
/// assert_eq!(v, Value::Int(42));
/// assert!(v.loosely_equals(&Value::from("42")));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// An absent value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A date without time.
    Date(chrono::NaiveDate),
    /// A date and time with UTC timezone.
    DateTime(chrono::DateTime<chrono::Utc>),
    /// A UUID value.
    Uuid(uuid::Uuid),
    /// A list of values (for `in` lookups and multi-valued fields).
    List(Vec<Value>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::List(vals) => {
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

// ── From implementations ───────────────────────────────────────────────

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Int(i) => Self::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s.clone()),
            Value::Date(d) => Self::String(d.to_string()),
            Value::DateTime(dt) => Self::String(dt.to_rfc3339()),
            Value::Uuid(u) => Self::String(u.to_string()),
            Value::List(vals) => Self::Array(vals.iter().map(Self::from).collect()),
        }
    }
}

impl Value {
    /// Returns `true` if this value is `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this value is `Null` or an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(vals) => vals.is_empty(),
            _ => false,
        }
    }

    /// Attempts to extract an integer value.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Renders this value as the text the substring lookups operate on.
    ///
    /// `Null` renders as the empty string; everything else uses `Display`.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Compares two values with type coercion.
    ///
    /// Numbers compare numerically across `Int`/`Float`/numeric strings;
    /// dates and datetimes compare chronologically, accepting ISO-formatted
    /// strings on either side; strings compare lexicographically. Returns
    /// `None` when the two values are not comparable.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, _) | (_, Self::Null) => None,
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Date(a), Self::Date(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::Date(d), Self::String(s)) => {
                s.parse::<chrono::NaiveDate>().ok().map(|parsed| d.cmp(&parsed))
            }
            (Self::String(s), Self::Date(d)) => s
                .parse::<chrono::NaiveDate>()
                .ok()
                .map(|parsed| parsed.cmp(d)),
            (Self::DateTime(dt), Self::String(s)) => chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|parsed| dt.cmp(&parsed.to_utc())),
            (Self::String(s), Self::DateTime(dt)) => chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|parsed| parsed.to_utc().cmp(dt)),
            (Self::String(a), Self::String(b)) => {
                // Numeric strings compare numerically, everything else
                // lexicographically.
                match (self.as_number(), other.as_number()) {
                    (Some(x), Some(y)) => x.partial_cmp(&y),
                    _ => Some(a.cmp(b)),
                }
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }

    /// Tests equality with type coercion.
    ///
    /// Wire constraint values are strings; a record's `Int(7)` must match
    /// the request's `"7"`. Booleans accept `"true"`/`"false"`/`"1"`/`"0"`,
    /// UUIDs accept their hyphenated form, dates accept ISO strings.
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Null, _) | (_, Self::Null) => false,
            (Self::Bool(b), Self::String(s)) | (Self::String(s), Self::Bool(b)) => {
                matches!(
                    (b, s.as_str()),
                    (true, "true" | "1") | (false, "false" | "0")
                )
            }
            (Self::Uuid(u), Self::String(s)) | (Self::String(s), Self::Uuid(u)) => {
                s.parse::<uuid::Uuid>().is_ok_and(|parsed| parsed == *u)
            }
            (Self::List(vals), other) | (other, Self::List(vals)) => {
                vals.iter().any(|v| v.loosely_equals(other))
            }
            (a, b) => a == b || a.compare(b) == Some(Ordering::Equal),
        }
    }
}
