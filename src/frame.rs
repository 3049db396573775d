use std::collections::BTreeMap;

use crate::error::{FrameError, Result};
use crate::series::Series;
use crate::value::{DType, Value};

// ---------------------------------------------------------------------------
// Filter policy
// ---------------------------------------------------------------------------

/// Null mask entries exclude the row rather than raising an error.
///
/// This mirrors how comparison masks behave in the dataframe ecosystems this
/// crate imitates: `eq`/`lt`/... produce null for null cells, and filtering
/// treats those entries as false. Kept as a named constant so the policy is
/// explicit and testable.
pub const NULL_MASK_EXCLUDES: bool = true;

// ---------------------------------------------------------------------------
// Frame – a two-dimensional labeled table
// ---------------------------------------------------------------------------

/// An immutable table: ordered, uniquely named columns of equal length plus
/// a row-label index (defaults to `0..N` in load order).
///
/// Derived frames (selections, slices, filtered subsets) are new frames and
/// share no mutable state with their source.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<Series>,
    labels: Vec<i64>,
}

/// One row, as a column-name → value mapping.
pub type Row = BTreeMap<String, Value>;

impl Frame {
    /// Build a frame from equally long columns with unique names. Row labels
    /// default to position.
    pub fn new(columns: Vec<Series>) -> Result<Self> {
        let rows = columns.first().map(Series::len).unwrap_or(0);
        let labels = (0..rows as i64).collect();
        Frame::with_labels(columns, labels)
    }

    /// Build a frame with explicit row labels (one per row).
    pub fn with_labels(columns: Vec<Series>, labels: Vec<i64>) -> Result<Self> {
        let rows = labels.len();
        for col in &columns {
            if col.len() != rows {
                return Err(FrameError::Format(format!(
                    "column {:?} has {} values, expected {rows}",
                    col.name(),
                    col.len()
                )));
            }
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name() == col.name()) {
                return Err(FrameError::Format(format!(
                    "duplicate column name {:?}",
                    col.name()
                )));
            }
        }
        Ok(Frame { columns, labels })
    }

    pub fn row_count(&self) -> usize {
        self.labels.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`, spreadsheet-style.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Series::name).collect()
    }

    pub fn columns(&self) -> &[Series] {
        &self.columns
    }

    /// Row labels, in current row order.
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Per-column dtypes in column order.
    pub fn dtypes(&self) -> Vec<(&str, DType)> {
        self.columns.iter().map(|c| (c.name(), c.dtype())).collect()
    }

    // -----------------------------------------------------------------------
    // Column access
    // -----------------------------------------------------------------------

    /// Look up a column by name. Returns the stored series, no copy.
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| FrameError::UnknownColumn(name.to_string()))
    }

    /// New frame with only the named columns, in the given order. Fails on
    /// the first unknown name without building a partial result.
    pub fn select_columns(&self, names: &[&str]) -> Result<Frame> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(self.column(name)?.clone());
        }
        Frame::with_labels(columns, self.labels.clone())
    }

    // -----------------------------------------------------------------------
    // Row access
    // -----------------------------------------------------------------------

    /// Resolve a possibly negative position to an absolute row offset.
    fn resolve_position(&self, i: i64) -> Result<usize> {
        let rows = self.row_count();
        let abs = if i < 0 {
            i.checked_add(rows as i64)
        } else {
            Some(i)
        };
        match abs {
            Some(a) if (0..rows as i64).contains(&a) => Ok(a as usize),
            _ => Err(FrameError::OutOfRange { position: i, rows }),
        }
    }

    /// Row by position. Negative `i` counts from the end, slice-style.
    pub fn row_at(&self, i: i64) -> Result<Row> {
        let offset = self.resolve_position(i)?;
        Ok(self.row_values(offset))
    }

    /// Row by label in the row index.
    pub fn row_by_label(&self, label: i64) -> Result<Row> {
        let offset = self
            .labels
            .iter()
            .position(|&l| l == label)
            .ok_or(FrameError::UnknownLabel(label))?;
        Ok(self.row_values(offset))
    }

    fn row_values(&self, offset: usize) -> Row {
        self.columns
            .iter()
            .map(|c| (c.name().to_string(), c.values()[offset].clone()))
            .collect()
    }

    /// Positional half-open slice `[start, end)`, clamped to the frame.
    /// `start >= end` yields an empty frame with the same column set.
    pub fn slice_rows(&self, start: usize, end: usize) -> Frame {
        let end = end.min(self.row_count());
        let start = start.min(end);
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Series::new(c.name(), c.dtype(), c.values()[start..end].to_vec())
            })
            .collect();
        let labels = self.labels[start..end].to_vec();
        Frame { columns, labels }
    }

    /// Single cell by position and column name. The column is checked first,
    /// so an unknown name wins over a bad position.
    pub fn cell(&self, row: i64, col_name: &str) -> Result<Value> {
        let col = self.column(col_name)?;
        let offset = self.resolve_position(row)?;
        Ok(col.values()[offset].clone())
    }

    /// Single cell by row label and column name.
    pub fn cell_by_label(&self, label: i64, col_name: &str) -> Result<Value> {
        let col = self.column(col_name)?;
        let offset = self
            .labels
            .iter()
            .position(|&l| l == label)
            .ok_or(FrameError::UnknownLabel(label))?;
        Ok(col.values()[offset].clone())
    }

    // -----------------------------------------------------------------------
    // Boolean-mask filtering
    // -----------------------------------------------------------------------

    /// Keep exactly the rows where the mask is true, preserving original row
    /// labels and column order. Null mask entries exclude the row
    /// ([`NULL_MASK_EXCLUDES`]).
    pub fn filter(&self, mask: &Series) -> Result<Frame> {
        if mask.len() != self.row_count() {
            return Err(FrameError::ShapeMismatch {
                mask_len: mask.len(),
                rows: self.row_count(),
            });
        }
        if mask.dtype() != DType::Bool {
            return Err(FrameError::TypeMismatch {
                op: "filter",
                dtype: mask.dtype(),
            });
        }
        let keep: Vec<usize> = mask
            .values()
            .iter()
            .enumerate()
            .filter(|(_, v)| matches!(v, Value::Bool(true)))
            .map(|(i, _)| i)
            .collect();

        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = keep.iter().map(|&i| c.values()[i].clone()).collect();
                Series::new(c.name(), c.dtype(), values)
            })
            .collect();
        let labels = keep.iter().map(|&i| self.labels[i]).collect();
        Ok(Frame { columns, labels })
    }
}
