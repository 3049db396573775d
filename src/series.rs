use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{FrameError, Result};
use crate::value::{DType, Value};

// ---------------------------------------------------------------------------
// Series – one named, typed column
// ---------------------------------------------------------------------------

/// A named, typed, ordered sequence of nullable values (one per row).
///
/// Immutable once built; every operation returns a new `Series` or a plain
/// value. Boolean masks are ordinary series with [`DType::Bool`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    dtype: DType,
    values: Vec<Value>,
}

/// Element-wise comparison operators against a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Aggregation operators for [`Series::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggOp {
    Sum,
    Mean,
    Min,
    Max,
}

impl Series {
    pub fn new(name: impl Into<String>, dtype: DType, values: Vec<Value>) -> Self {
        Series {
            name: name.into(),
            dtype,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.values.get(i)
    }

    /// Iterator over the non-null values only.
    fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    // -----------------------------------------------------------------------
    // Element-wise comparison → boolean mask
    // -----------------------------------------------------------------------

    /// Compare every element against `scalar`, producing a bool mask of the
    /// same length. Tri-valued: a null element yields a null mask entry.
    pub fn compare(&self, op: CmpOp, scalar: &Value) -> Series {
        let values = self
            .values
            .iter()
            .map(|v| {
                let outcome = match op {
                    CmpOp::Eq => v.try_eq(scalar),
                    CmpOp::Ne => v.try_eq(scalar).map(|b| !b),
                    CmpOp::Lt => v.try_cmp(scalar).map(|o| o.is_lt()),
                    CmpOp::Le => v.try_cmp(scalar).map(|o| o.is_le()),
                    CmpOp::Gt => v.try_cmp(scalar).map(|o| o.is_gt()),
                    CmpOp::Ge => v.try_cmp(scalar).map(|o| o.is_ge()),
                };
                match outcome {
                    Some(b) => Value::Bool(b),
                    None => Value::Null,
                }
            })
            .collect();
        Series::new(self.name.clone(), DType::Bool, values)
    }

    pub fn eq(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Eq, scalar)
    }

    pub fn ne(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Ne, scalar)
    }

    pub fn lt(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Lt, scalar)
    }

    pub fn le(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Le, scalar)
    }

    pub fn gt(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Gt, scalar)
    }

    pub fn ge(&self, scalar: &Value) -> Series {
        self.compare(CmpOp::Ge, scalar)
    }

    // -----------------------------------------------------------------------
    // Aggregation
    // -----------------------------------------------------------------------

    /// Aggregate the non-null values. `Sum` and `Mean` need a numeric-capable
    /// column (integer, float, or bool with true = 1); `Min`/`Max` work on
    /// every dtype, ordering text lexicographically.
    pub fn aggregate(&self, op: AggOp) -> Result<Value> {
        match op {
            AggOp::Sum | AggOp::Mean if self.dtype == DType::Text => {
                Err(FrameError::TypeMismatch {
                    op: if op == AggOp::Sum { "sum" } else { "mean" },
                    dtype: self.dtype,
                })
            }
            AggOp::Sum => match self.dtype {
                DType::Float => {
                    Ok(Value::Float(self.non_null().filter_map(Value::as_f64).sum()))
                }
                _ => {
                    // Integer and bool sums stay exact: accumulate wide, fall
                    // back to float only when the total leaves i64 range.
                    let sum: i128 = self
                        .non_null()
                        .filter_map(Value::as_i64)
                        .map(i128::from)
                        .sum();
                    Ok(i64::try_from(sum)
                        .map(Value::Integer)
                        .unwrap_or(Value::Float(sum as f64)))
                }
            },
            AggOp::Mean => {
                let mut sum = 0.0;
                let mut count = 0usize;
                for v in self.non_null().filter_map(|v| v.as_f64()) {
                    sum += v;
                    count += 1;
                }
                Ok(if count == 0 {
                    Value::Null
                } else {
                    Value::Float(sum / count as f64)
                })
            }
            AggOp::Min => Ok(self.non_null().min().cloned().unwrap_or(Value::Null)),
            AggOp::Max => Ok(self.non_null().max().cloned().unwrap_or(Value::Null)),
        }
    }

    /// Number of distinct non-null values.
    pub fn nunique(&self) -> usize {
        self.non_null().collect::<HashSet<_>>().len()
    }

    /// Frequency table over the non-null values, descending by count.
    /// Ties keep the order in which values first appear in the column.
    pub fn value_counts(&self) -> Vec<(Value, usize)> {
        let mut counts: Vec<(Value, usize)> = Vec::new();
        let mut slot: HashMap<&Value, usize> = HashMap::new();
        for v in self.non_null() {
            match slot.get(v) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    slot.insert(v, counts.len());
                    counts.push((v.clone(), 1));
                }
            }
        }
        // Stable sort preserves first-encounter order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    // -----------------------------------------------------------------------
    // Summary statistics
    // -----------------------------------------------------------------------

    /// Statistical summary of the column. Numeric columns get count, mean,
    /// sample standard deviation, min, quartiles, and max; bool and text
    /// columns get count, unique count, and the most frequent value with its
    /// frequency. Ill-defined statistics come back as [`Value::Null`] rather
    /// than failing.
    pub fn describe(&self) -> BTreeMap<&'static str, Value> {
        match self.dtype {
            DType::Integer | DType::Float => self.describe_numeric(),
            DType::Bool | DType::Text => self.describe_categorical(),
        }
    }

    fn describe_numeric(&self) -> BTreeMap<&'static str, Value> {
        let mut sorted: Vec<f64> = self.non_null().filter_map(Value::as_f64).collect();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();

        let mean = if n == 0 {
            None
        } else {
            Some(sorted.iter().sum::<f64>() / n as f64)
        };
        let std = mean.filter(|_| n >= 2).map(|m| {
            let ss: f64 = sorted.iter().map(|v| (v - m).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        });

        let mut out = BTreeMap::new();
        out.insert("count", Value::Integer(n as i64));
        out.insert("mean", mean.map(Value::Float).unwrap_or(Value::Null));
        out.insert("std", std.map(Value::Float).unwrap_or(Value::Null));
        out.insert(
            "min",
            self.non_null().min().cloned().unwrap_or(Value::Null),
        );
        for (key, p) in [("25%", 0.25), ("50%", 0.50), ("75%", 0.75)] {
            out.insert(
                key,
                percentile(&sorted, p).map(Value::Float).unwrap_or(Value::Null),
            );
        }
        out.insert(
            "max",
            self.non_null().max().cloned().unwrap_or(Value::Null),
        );
        out
    }

    fn describe_categorical(&self) -> BTreeMap<&'static str, Value> {
        let counts = self.value_counts();
        let n: usize = counts.iter().map(|(_, c)| c).sum();

        let mut out = BTreeMap::new();
        out.insert("count", Value::Integer(n as i64));
        out.insert("unique", Value::Integer(counts.len() as i64));
        match counts.first() {
            Some((top, freq)) => {
                out.insert("top", top.clone());
                out.insert("freq", Value::Integer(*freq as i64));
            }
            None => {
                out.insert("top", Value::Null);
                out.insert("freq", Value::Null);
            }
        }
        out
    }
}

/// Quantile with linear interpolation over an already sorted slice.
fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(name: &str, vals: &[Option<i64>]) -> Series {
        let values = vals
            .iter()
            .map(|v| v.map(Value::Integer).unwrap_or(Value::Null))
            .collect();
        Series::new(name, DType::Integer, values)
    }

    fn texts(name: &str, vals: &[&str]) -> Series {
        let values = vals.iter().map(|s| Value::Text(s.to_string())).collect();
        Series::new(name, DType::Text, values)
    }

    #[test]
    fn compare_produces_tri_valued_mask() {
        let s = ints("revenue", &[Some(500), Some(0), None]);
        let mask = s.gt(&Value::Integer(100));
        assert_eq!(mask.dtype(), DType::Bool);
        assert_eq!(
            mask.values(),
            &[Value::Bool(true), Value::Bool(false), Value::Null]
        );
    }

    #[test]
    fn sum_excludes_nulls_and_keeps_integer_dtype() {
        let s = ints("revenue", &[Some(500), None, Some(0)]);
        assert_eq!(s.aggregate(AggOp::Sum).unwrap(), Value::Integer(500));
    }

    #[test]
    fn mean_excludes_nulls_from_both_sides() {
        let s = ints("revenue", &[Some(10), None, Some(20)]);
        assert_eq!(s.aggregate(AggOp::Mean).unwrap(), Value::Float(15.0));
    }

    #[test]
    fn mean_of_all_null_is_null() {
        let s = ints("empty", &[None, None]);
        assert_eq!(s.aggregate(AggOp::Mean).unwrap(), Value::Null);
        assert_eq!(s.aggregate(AggOp::Min).unwrap(), Value::Null);
    }

    #[test]
    fn sum_of_bool_mask_counts_trues() {
        let mask = Series::new(
            "cancelled",
            DType::Bool,
            vec![Value::Bool(true), Value::Bool(false), Value::Null, Value::Bool(true)],
        );
        assert_eq!(mask.aggregate(AggOp::Sum).unwrap(), Value::Integer(2));
    }

    #[test]
    fn integer_sum_stays_exact_beyond_f64_precision() {
        // 2^53 + 1 is not representable as f64; an f64 accumulator would
        // round the total away.
        let s = ints("big", &[Some((1i64 << 53) + 1), Some(1)]);
        assert_eq!(
            s.aggregate(AggOp::Sum).unwrap(),
            Value::Integer((1i64 << 53) + 2)
        );
    }

    #[test]
    fn integer_sum_overflow_falls_back_to_float() {
        let s = ints("big", &[Some(i64::MAX), Some(i64::MAX)]);
        assert_eq!(
            s.aggregate(AggOp::Sum).unwrap(),
            Value::Float(i64::MAX as f64 * 2.0)
        );
    }

    #[test]
    fn sum_of_text_is_a_type_error() {
        let s = texts("industry", &["SaaS", "Fintech"]);
        assert!(matches!(
            s.aggregate(AggOp::Sum),
            Err(FrameError::TypeMismatch { op: "sum", .. })
        ));
    }

    #[test]
    fn min_max_work_on_text() {
        let s = texts("company", &["Globex", "Acme", "Initech"]);
        assert_eq!(s.aggregate(AggOp::Min).unwrap(), Value::Text("Acme".into()));
        assert_eq!(s.aggregate(AggOp::Max).unwrap(), Value::Text("Initech".into()));
    }

    #[test]
    fn value_counts_descending_stable_ties() {
        let s = texts("industry", &["SaaS", "Fintech", "SaaS", "Retail", "Fintech", "SaaS"]);
        let counts = s.value_counts();
        assert_eq!(counts[0], (Value::Text("SaaS".into()), 3));
        assert_eq!(counts[1], (Value::Text("Fintech".into()), 2));
        assert_eq!(counts[2], (Value::Text("Retail".into()), 1));
    }

    #[test]
    fn value_counts_ties_keep_first_encounter_order() {
        let s = texts("c", &["b", "a", "b", "a"]);
        let counts = s.value_counts();
        assert_eq!(counts[0].0, Value::Text("b".into()));
        assert_eq!(counts[1].0, Value::Text("a".into()));
    }

    #[test]
    fn nunique_matches_value_counts_len() {
        let s = ints("n", &[Some(1), Some(2), Some(1), None, Some(3)]);
        assert_eq!(s.nunique(), 3);
        assert_eq!(s.nunique(), s.value_counts().len());
    }

    #[test]
    fn describe_numeric_matches_worked_example() {
        let s = ints("revenue", &[Some(500), Some(0)]);
        let d = s.describe();
        assert_eq!(d["count"], Value::Integer(2));
        assert_eq!(d["mean"], Value::Float(250.0));
        assert_eq!(d["min"], Value::Integer(0));
        assert_eq!(d["max"], Value::Integer(500));
        assert_eq!(d["50%"], Value::Float(250.0));
    }

    #[test]
    fn describe_numeric_all_null_uses_null_markers() {
        let s = ints("empty", &[None]);
        let d = s.describe();
        assert_eq!(d["count"], Value::Integer(0));
        assert_eq!(d["mean"], Value::Null);
        assert_eq!(d["std"], Value::Null);
        assert_eq!(d["25%"], Value::Null);
    }

    #[test]
    fn describe_categorical_reports_top_and_freq() {
        let s = texts("industry", &["SaaS", "Fintech", "SaaS"]);
        let d = s.describe();
        assert_eq!(d["count"], Value::Integer(3));
        assert_eq!(d["unique"], Value::Integer(2));
        assert_eq!(d["top"], Value::Text("SaaS".into()));
        assert_eq!(d["freq"], Value::Integer(2));
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        let s = ints("n", &[Some(2), Some(4)]);
        let d = s.describe();
        // variance = ((2-3)^2 + (4-3)^2) / 1 = 2
        assert_eq!(d["std"], Value::Float(2.0_f64.sqrt()));
    }
}
