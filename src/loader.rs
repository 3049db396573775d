use std::path::Path;

use log::debug;
use serde_json::Value as JsonValue;

use crate::error::{FrameError, Result};
use crate::frame::Frame;
use crate::series::Series;
use crate::value::{DType, Value};

/// Tokens recognised as booleans during type inference.
const BOOL_TOKENS: [&str; 4] = ["true", "false", "True", "False"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a frame from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row of unique column names, one data row per line
/// * `.json` – records-oriented array: `[{ "col": value, ... }, ...]`
pub fn load_file(path: &Path) -> Result<Frame> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(FrameError::Format(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a comma-separated file: first line is the header, every data row
/// must have the same field count. Column types are inferred over the whole
/// column (see [`infer_dtype`]); an empty field is null.
pub fn load_csv(path: &Path) -> Result<Frame> {
    let file = std::fs::File::open(path).map_err(|source| FrameError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_format_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(FrameError::Format("empty file, no header row".into()));
    }

    // Collect raw tokens first; dtype inference needs the whole column.
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| match format_io(&e) {
            Some(source) => FrameError::Io {
                path: path.display().to_string(),
                source,
            },
            None => FrameError::Format(format!("row {row_no}: {e}")),
        })?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (col_idx, name) in headers.iter().enumerate() {
        let tokens: Vec<&str> = rows.iter().map(|r| r[col_idx].as_str()).collect();
        let dtype = infer_dtype(&tokens);
        let values = tokens.iter().map(|t| parse_token(t, dtype)).collect();
        columns.push(Series::new(name, dtype, values));
    }

    let frame = Frame::new(columns)?;
    debug!(
        "loaded {} rows x {} columns from {}",
        frame.row_count(),
        frame.column_count(),
        path.display()
    );
    Ok(frame)
}

/// Pull the io::Error out of a csv error, if that is what it wraps.
fn format_io(e: &csv::Error) -> Option<std::io::Error> {
    match e.kind() {
        csv::ErrorKind::Io(io) => Some(std::io::Error::new(io.kind(), io.to_string())),
        _ => None,
    }
}

fn csv_format_error(e: csv::Error) -> FrameError {
    FrameError::Format(e.to_string())
}

/// Whole-column type inference:
/// integer if every non-null token parses as `i64`; else float if every
/// non-null token parses as `f64`; else bool if every non-null token is one
/// of [`BOOL_TOKENS`]; else text. An all-null column infers as integer.
fn infer_dtype(tokens: &[&str]) -> DType {
    let filled = || tokens.iter().filter(|t| !t.is_empty());
    if filled().all(|t| t.parse::<i64>().is_ok()) {
        DType::Integer
    } else if filled().all(|t| t.parse::<f64>().is_ok()) {
        DType::Float
    } else if filled().all(|t| BOOL_TOKENS.contains(t)) {
        DType::Bool
    } else {
        DType::Text
    }
}

/// Parse one field under an already inferred column type.
fn parse_token(token: &str, dtype: DType) -> Value {
    if token.is_empty() {
        return Value::Null;
    }
    match dtype {
        // Parses cannot fail here: inference already checked every token.
        DType::Integer => token.parse().map(Value::Integer).unwrap_or(Value::Null),
        DType::Float => token.parse().map(Value::Float).unwrap_or(Value::Null),
        DType::Bool => Value::Bool(token == "true" || token == "True"),
        DType::Text => Value::Text(token.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "CompanyName": "Acme", "MonthlyRevenue": 500, "Cancelled": false },
///   ...
/// ]
/// ```
///
/// Column order follows first encounter across the records; a key missing
/// from a record becomes null.
pub fn load_json(path: &Path) -> Result<Frame> {
    let text = std::fs::read_to_string(path).map_err(|source| FrameError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| FrameError::Format(format!("invalid JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| FrameError::Format("expected top-level JSON array".into()))?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| FrameError::Format(format!("record {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }

    let mut columns = Vec::with_capacity(names.len());
    for name in &names {
        let cells: Vec<Value> = records
            .iter()
            .map(|rec| json_to_value(rec.get(name).unwrap_or(&JsonValue::Null)))
            .collect();
        columns.push(unify_column(name, cells));
    }

    let frame = Frame::new(columns)?;
    debug!(
        "loaded {} rows x {} columns from {}",
        frame.row_count(),
        frame.column_count(),
        path.display()
    );
    Ok(frame)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

/// Settle on one dtype for a column of heterogeneous JSON cells: integers
/// promote to float when mixed with floats; anything else mixed falls back
/// to text.
fn unify_column(name: &str, cells: Vec<Value>) -> Series {
    let filled = || cells.iter().filter(|v| !v.is_null());
    let dtype = if filled().all(|v| matches!(v, Value::Integer(_))) {
        DType::Integer
    } else if filled().all(|v| matches!(v, Value::Integer(_) | Value::Float(_))) {
        DType::Float
    } else if filled().all(|v| matches!(v, Value::Bool(_))) {
        DType::Bool
    } else {
        DType::Text
    };

    let values = cells
        .into_iter()
        .map(|v| match (dtype, v) {
            (_, Value::Null) => Value::Null,
            (DType::Float, Value::Integer(i)) => Value::Float(i as f64),
            (DType::Text, Value::Integer(i)) => Value::Text(i.to_string()),
            (DType::Text, Value::Float(f)) => Value::Text(f.to_string()),
            (DType::Text, Value::Bool(b)) => Value::Text(b.to_string()),
            (_, v) => v,
        })
        .collect();
    Series::new(name, dtype, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn loads_header_and_row_count() {
        let f = csv_file("CompanyName,MonthlyRevenue,Cancelled\nAcme,500,0\nGlobex,0,1\n");
        let t = load_csv(f.path()).unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(
            t.column_names(),
            ["CompanyName", "MonthlyRevenue", "Cancelled"]
        );
        assert_eq!(t.labels(), &[0, 1]);
    }

    #[test]
    fn infers_column_types() {
        let f = csv_file("a,b,c,d\n1,1.5,True,hello\n2,2,False,3\n");
        let t = load_csv(f.path()).unwrap();
        assert_eq!(t.column("a").unwrap().dtype(), DType::Integer);
        assert_eq!(t.column("b").unwrap().dtype(), DType::Float);
        assert_eq!(t.column("c").unwrap().dtype(), DType::Bool);
        // "hello" forces the whole column to text, even though "3" is numeric.
        assert_eq!(t.column("d").unwrap().dtype(), DType::Text);
        assert_eq!(
            t.cell(1, "d").unwrap(),
            Value::Text("3".into())
        );
    }

    #[test]
    fn one_bad_token_demotes_integer_to_float_then_text() {
        let f = csv_file("x,y\n1,1\n2.5,oops\n");
        let t = load_csv(f.path()).unwrap();
        assert_eq!(t.column("x").unwrap().dtype(), DType::Float);
        assert_eq!(t.cell(0, "x").unwrap(), Value::Float(1.0));
        assert_eq!(t.column("y").unwrap().dtype(), DType::Text);
    }

    #[test]
    fn empty_fields_become_null() {
        let f = csv_file("a,b\n1,\n,x\n");
        let t = load_csv(f.path()).unwrap();
        assert_eq!(t.cell(0, "b").unwrap(), Value::Null);
        assert_eq!(t.cell(1, "a").unwrap(), Value::Null);
        assert_eq!(t.column("a").unwrap().dtype(), DType::Integer);
    }

    #[test]
    fn empty_file_is_a_format_error() {
        let f = csv_file("");
        assert!(matches!(load_csv(f.path()), Err(FrameError::Format(_))));
    }

    #[test]
    fn ragged_row_is_a_format_error() {
        let f = csv_file("a,b\n1,2\n3\n");
        assert!(matches!(load_csv(f.path()), Err(FrameError::Format(_))));
    }

    #[test]
    fn duplicate_header_is_a_format_error() {
        let f = csv_file("a,a\n1,2\n");
        assert!(matches!(load_csv(f.path()), Err(FrameError::Format(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_csv(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, FrameError::Io { .. }));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        assert!(matches!(
            load_file(Path::new("data.parquet")),
            Err(FrameError::Format(_))
        ));
    }

    #[test]
    fn json_records_load_with_promotion_and_missing_keys() {
        let mut f = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        f.write_all(
            br#"[
                {"name": "Acme", "score": 1, "active": true},
                {"name": "Globex", "score": 2.5}
            ]"#,
        )
        .unwrap();
        f.flush().unwrap();

        let t = load_file(f.path()).unwrap();
        assert_eq!(t.column_names(), ["name", "score", "active"]);
        let score = t.column("score").unwrap();
        assert_eq!(score.dtype(), DType::Float);
        assert_eq!(score.values()[0], Value::Float(1.0));
        assert_eq!(t.cell(1, "active").unwrap(), Value::Null);
    }
}
