use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the closed set of interpreted columns plus passthrough
// ---------------------------------------------------------------------------

/// A column of a job-listings table.
///
/// The five interpreted columns are named variants; anything else the input
/// carries is kept as [`Column::Other`] and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    JobTitle,
    Salary,
    EmployeeResidence,
    ExperienceLevel,
    CompanySize,
    Other(String),
}

impl Column {
    /// Columns every analysable dataset must carry, in display order.
    pub const REQUIRED: [Column; 5] = [
        Column::JobTitle,
        Column::Salary,
        Column::EmployeeResidence,
        Column::ExperienceLevel,
        Column::CompanySize,
    ];

    /// Map a header name to a column. Matching is exact (case and spaces).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Job Title" => Column::JobTitle,
            "Salary" => Column::Salary,
            "Employee Residence" => Column::EmployeeResidence,
            "Experience Level" => Column::ExperienceLevel,
            "Company Size" => Column::CompanySize,
            other => Column::Other(other.to_string()),
        }
    }

    /// Display name, as it appears in the header row.
    pub fn name(&self) -> &str {
        match self {
            Column::JobTitle => "Job Title",
            Column::Salary => "Salary",
            Column::EmployeeResidence => "Employee Residence",
            Column::ExperienceLevel => "Experience Level",
            Column::CompanySize => "Company Size",
            Column::Other(name) => name,
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::from_name(name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CellValue – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, typed per cell at parse time.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord/Hash so CellValue can key groups; floats compare by bits --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Null, CellValue::Null) => true,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl CellValue {
    /// Type a raw text cell: empty → Null, then integer, float, bool, text.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric view of the cell. NaN counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Row / Dataset
// ---------------------------------------------------------------------------

/// One record; holds exactly one cell per dataset column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Row { cells }
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An immutable in-memory table. Every derived view is a new `Dataset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short rows with `Null` and truncating long ones
    /// so that every row matches the column count.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize(width, CellValue::Null);
                row
            })
            .collect();
        Dataset { columns, rows }
    }

    /// Empty dataset with the given columns.
    pub fn empty(columns: Vec<Column>) -> Self {
        Dataset {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, matched by display name.
    pub fn column_index(&self, column: &Column) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == column.name())
    }

    pub fn has_column(&self, column: &Column) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell at (`row`, `column`), `None` when either is out of range.
    pub fn value(&self, row: usize, column: &Column) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Same columns, a caller-chosen subset of rows in the given order.
    pub fn with_rows(&self, indices: &[usize]) -> Dataset {
        let rows = indices
            .iter()
            .filter_map(|&i| self.rows.get(i).cloned())
            .collect();
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Project onto `columns`. Columns the dataset lacks are skipped.
    pub fn select(&self, columns: &[Column]) -> Dataset {
        let picked: Vec<(usize, Column)> = columns
            .iter()
            .filter_map(|c| self.column_index(c).map(|i| (i, self.columns[i].clone())))
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(picked.iter().map(|(i, _)| row.cells[*i].clone()).collect()))
            .collect();
        Dataset {
            columns: picked.into_iter().map(|(_, c)| c).collect(),
            rows,
        }
    }

    /// Non-null distinct values of `column`, in first-seen order.
    pub fn distinct_values(&self, column: &Column) -> Vec<CellValue> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen: HashSet<&CellValue> = HashSet::new();
        let mut out = Vec::new();
        for row in &self.rows {
            let value = &row.cells[idx];
            if !value.is_null() && seen.insert(value) {
                out.push(value.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![Column::JobTitle, Column::Salary, Column::Other("Remote".into())],
            vec![
                Row::new(vec!["Engineer".into(), CellValue::Integer(100), CellValue::Bool(true)]),
                Row::new(vec!["Analyst".into(), CellValue::Integer(50)]),
                Row::new(vec!["Engineer".into(), CellValue::Null, CellValue::Null]),
            ],
        )
    }

    #[test]
    fn column_names_round_trip_through_from_name() {
        for column in Column::REQUIRED {
            assert_eq!(Column::from_name(column.name()), column);
        }
        assert_eq!(
            Column::from_name("job title"),
            Column::Other("job title".to_string())
        );
    }

    #[test]
    fn parse_types_cells() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse("4.5"), CellValue::Float(4.5));
        assert_eq!(CellValue::parse("true"), CellValue::Bool(true));
        assert_eq!(CellValue::parse(" US"), CellValue::Text(" US".into()));
    }

    #[test]
    fn nan_is_not_numeric() {
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Text("100".into()).as_f64(), None);
        assert_eq!(CellValue::Integer(7).as_f64(), Some(7.0));
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = sample();
        assert_eq!(ds.rows()[1].cells().len(), 3);
        assert_eq!(ds.value(1, &Column::Other("Remote".into())), Some(&CellValue::Null));
    }

    #[test]
    fn distinct_values_keep_first_seen_order_and_skip_null() {
        let ds = sample();
        assert_eq!(
            ds.distinct_values(&Column::JobTitle),
            vec![CellValue::from("Engineer"), CellValue::from("Analyst")]
        );
        assert_eq!(ds.distinct_values(&Column::Salary).len(), 2);
        assert!(ds.distinct_values(&Column::CompanySize).is_empty());
    }

    #[test]
    fn select_projects_and_skips_unknown_columns() {
        let ds = sample().select(&[Column::Salary, Column::CompanySize, Column::JobTitle]);
        assert_eq!(ds.column_names(), vec!["Salary", "Job Title"]);
        assert_eq!(ds.value(0, &Column::JobTitle), Some(&CellValue::from("Engineer")));
    }

    #[test]
    fn column_lookup_is_by_name() {
        let ds = Dataset::empty(vec![Column::Other("Salary".into())]);
        assert!(ds.has_column(&Column::Salary));
    }
}
