use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Value – a single cell of a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as keys in `BTreeMap` / `HashMap` downstream, so `Value` must be
/// `Ord` and `Hash` despite containing floats.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Distinguished missing-value marker, distinct from any typed value.
    Null,
}

/// The inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    Integer,
    Float,
    Bool,
    Text,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Integer => write!(f, "integer"),
            DType::Float => write!(f, "float"),
            DType::Bool => write!(f, "bool"),
            DType::Text => write!(f, "text"),
        }
    }
}

// -- Manual Eq/Ord so we can put Value in BTreeMap keys and sort it --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Text(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

impl Value {
    /// Try to interpret the value as an `f64` for numeric computation.
    /// Bools count as 0/1 so masks can be summed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            Value::Bool(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }

    /// The value as an `i64` when it is exactly one: integers as-is, bools
    /// as 0/1. Floats are not truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Bool(b) => Some(*b as i64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Tri-valued scalar comparison: `Null` compared to anything (including
    /// `Null`) has no defined order. Numeric variants compare by magnitude;
    /// text compares lexicographically; mixing text with anything else is
    /// undefined.
    pub fn try_cmp(&self, other: &Value) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return None;
        }
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return Some(a.total_cmp(&b));
        }
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Tri-valued equality: `Null` yields `None`; values of incomparable
    /// types are simply not equal.
    pub fn try_eq(&self, other: &Value) -> Option<bool> {
        if self.is_null() || other.is_null() {
            return None;
        }
        match self.try_cmp(other) {
            Some(ord) => Some(ord == Ordering::Equal),
            None => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cross_type_equality() {
        assert_eq!(Value::Integer(5).try_eq(&Value::Float(5.0)), Some(true));
        assert_eq!(Value::Bool(true).try_eq(&Value::Integer(1)), Some(true));
        assert_eq!(Value::Integer(5).try_eq(&Value::Float(5.5)), Some(false));
    }

    #[test]
    fn null_comparisons_are_undefined() {
        assert_eq!(Value::Null.try_eq(&Value::Integer(1)), None);
        assert_eq!(Value::Integer(1).try_cmp(&Value::Null), None);
        assert_eq!(Value::Null.try_eq(&Value::Null), None);
    }

    #[test]
    fn incomparable_types_are_unequal_but_unordered() {
        let t = Value::Text("5".into());
        assert_eq!(t.try_eq(&Value::Integer(5)), Some(false));
        assert_eq!(t.try_cmp(&Value::Integer(5)), None);
    }

    #[test]
    fn ordering_is_total_for_sorting() {
        let mut vals = vec![
            Value::Text("b".into()),
            Value::Integer(2),
            Value::Null,
            Value::Float(1.5),
        ];
        vals.sort();
        assert_eq!(vals[0], Value::Null);
        assert_eq!(vals.last(), Some(&Value::Text("b".into())));
    }
}
