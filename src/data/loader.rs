use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::{DataError, DataResult};
use super::model::{CellValue, Column, Dataset, Row};

/// 64 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// How raw input is turned into a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Field delimiter for delimited text.
    pub delimiter: u8,
    /// Inputs above this size are rejected before parsing.
    pub max_input_bytes: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

fn check_size(size: u64, options: &LoadOptions) -> DataResult<()> {
    if size > options.max_input_bytes {
        return Err(DataError::TooLarge {
            size,
            limit: options.max_input_bytes,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a job-listings table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text with a header row
/// * `.tsv`          – tab-delimited text with a header row
/// * `.json`         – `[{ "Job Title": "...", "Salary": 100, ... }, ...]`
/// * `.parquet`      – flat parquet file, one column per field
pub fn load_file(path: &Path, options: &LoadOptions) -> DataResult<Dataset> {
    let size = std::fs::metadata(path)?.len();
    check_size(size, options)?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" | "txt" => load_csv_bytes(&std::fs::read(path)?, options)?,
        "tsv" => {
            let tsv = LoadOptions {
                delimiter: b'\t',
                ..options.clone()
            };
            load_csv_bytes(&std::fs::read(path)?, &tsv)?
        }
        "json" => load_json_bytes(&std::fs::read(path)?, options)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} rows from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.column_names()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Delimited text
// ---------------------------------------------------------------------------

/// Parse delimited text with a header row.
///
/// Row-width policy: short rows are padded with `Null`, long rows are
/// truncated to the header width. Both are logged, neither is an error.
pub fn load_csv_bytes(raw: &[u8], options: &LoadOptions) -> DataResult<Dataset> {
    check_size(raw.len() as u64, options)?;

    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(DataError::Parse("No columns to parse from file".to_string()));
    }
    if let Some(line) = unterminated_quote_line(raw, options.delimiter) {
        return Err(DataError::Parse(format!(
            "unterminated quoted field starting on line {line}"
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(raw);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(DataError::Parse("No columns to parse from file".to_string()));
    }
    let columns: Vec<Column> = dedup_headers(headers)
        .iter()
        .map(|h| Column::from_name(h))
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() != width {
            log::warn!(
                "Row {row_no}: {} fields for {width} columns; {}",
                record.len(),
                if record.len() < width { "padding with nulls" } else { "truncating" }
            );
        }
        let cells = record.iter().take(width).map(CellValue::parse).collect();
        rows.push(Row::new(cells));
    }

    Ok(Dataset::new(columns, rows))
}

/// Later duplicates of a header name get `.1`, `.2`, ... appended.
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|h| {
            let count = seen.entry(h.clone()).or_insert(0);
            let name = if *count == 0 { h } else { format!("{h}.{count}") };
            *count += 1;
            name
        })
        .collect()
}

/// Line number (1-based) where a quoted field opens without ever closing.
///
/// Quotes only open a field when they are its first byte; a doubled quote
/// inside a quoted field is an escape.
fn unterminated_quote_line(raw: &[u8], delimiter: u8) -> Option<usize> {
    let mut line = 1;
    let mut open_line = None;
    let mut at_field_start = true;
    let mut bytes = raw.iter().peekable();

    while let Some(&b) = bytes.next() {
        if b == b'\n' {
            line += 1;
        }
        match open_line {
            Some(_) => {
                if b == b'"' {
                    if bytes.peek() == Some(&&b'"') {
                        bytes.next();
                    } else {
                        open_line = None;
                        at_field_start = false;
                    }
                }
            }
            None => {
                if b == b'"' && at_field_start {
                    open_line = Some(line);
                }
                at_field_start = b == delimiter || b == b'\n' || b == b'\r';
            }
        }
    }
    open_line
}

// ---------------------------------------------------------------------------
// JSON records
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')` shape).
///
/// Columns appear in first-seen order; keys missing from a record become `Null`.
pub fn load_json_bytes(raw: &[u8], options: &LoadOptions) -> DataResult<Dataset> {
    check_size(raw.len() as u64, options)?;

    let root: JsonValue =
        serde_json::from_slice(raw).map_err(|e| DataError::Parse(format!("parsing JSON: {e}")))?;
    let records = root
        .as_array()
        .ok_or_else(|| DataError::Parse("Expected top-level JSON array".to_string()))?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| DataError::Parse(format!("Row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            Row::new(
                names
                    .iter()
                    .map(|name| obj.get(name).map(json_to_cell).unwrap_or(CellValue::Null))
                    .collect(),
            )
        })
        .collect();

    let columns = names.iter().map(|n| Column::from_name(n)).collect();
    Ok(Dataset::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Load a flat parquet file, as written by `df.to_parquet()` or Polars.
///
/// Every column is first brought to one of four shapes (see
/// [`normalize_column`]) so cells keep their numeric or text meaning
/// whatever physical encoding the writer chose.
pub fn load_parquet(path: &Path) -> DataResult<Dataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::Parse(format!("reading parquet metadata: {e}")))?;
    let columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column::from_name(f.name()))
        .collect();
    let reader = builder
        .build()
        .map_err(|e| DataError::Parse(format!("building parquet reader: {e}")))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| DataError::Parse(format!("reading parquet record batch: {e}")))?;
        let arrays = batch
            .columns()
            .iter()
            .map(normalize_column)
            .collect::<DataResult<Vec<_>>>()?;
        for row in 0..batch.num_rows() {
            rows.push(Row::new(arrays.iter().map(|col| extract_cell(col, row)).collect()));
        }
    }

    Ok(Dataset::new(columns, rows))
}

/// Cast an Arrow column to `Utf8`, `Int64`, `Float64` or `Boolean`.
///
/// Integers of any width or sign become `Int64` (unsigned values above
/// `i64::MAX` become null); floats and decimals become `Float64`;
/// dictionary-encoded columns are decoded first. Anything else (dates,
/// timestamps, nested types) is rendered to text.
fn normalize_column(col: &ArrayRef) -> DataResult<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8 | DataType::Int64 | DataType::Float64 | DataType::Boolean => {
            return Ok(Arc::clone(col))
        }
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => DataType::Int64,
        DataType::Float16
        | DataType::Float32
        | DataType::Decimal128(..)
        | DataType::Decimal256(..) => DataType::Float64,
        DataType::LargeUtf8 | DataType::Utf8View => DataType::Utf8,
        DataType::Dictionary(_, values) => {
            let decoded = cast(col, values.as_ref()).map_err(|e| {
                DataError::Parse(format!("decoding {} column: {e}", col.data_type()))
            })?;
            return normalize_column(&decoded);
        }
        _ => return render_as_text(col),
    };
    cast(col, &target)
        .map_err(|e| DataError::Parse(format!("converting {} column: {e}", col.data_type())))
}

fn render_as_text(col: &ArrayRef) -> DataResult<ArrayRef> {
    let formatter = ArrayFormatter::try_new(col.as_ref(), &FormatOptions::default())
        .map_err(|e| DataError::Parse(format!("formatting {} column: {e}", col.data_type())))?;
    let text: StringArray = (0..col.len())
        .map(|i| col.is_valid(i).then(|| formatter.value(i).to_string()))
        .collect();
    Ok(Arc::new(text))
}

/// Extract a single cell from a normalized Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::Text(s.value(row).to_string())),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or(CellValue::Null)
}
