use super::model::{Column, Dataset};

/// Descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: Column,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` below two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// `describe()` for a whole dataset: one entry per numeric column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub columns: Vec<ColumnSummary>,
}

impl Summary {
    pub fn get(&self, column: &Column) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column.name() == column.name())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Summarise every column whose non-null cells are all numeric.
///
/// Columns with no numeric data (or a single text cell) are left out.
pub fn describe(dataset: &Dataset) -> Summary {
    let columns = dataset
        .columns()
        .iter()
        .enumerate()
        .filter_map(|(idx, column)| {
            let mut values = Vec::with_capacity(dataset.len());
            for row in dataset.rows() {
                let cell = &row.cells()[idx];
                if cell.is_null() {
                    continue;
                }
                values.push(cell.as_f64()?);
            }
            summarize(column.clone(), values)
        })
        .collect();
    Summary { columns }
}

fn summarize(column: Column, mut values: Vec<f64>) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    Some(ColumnSummary {
        column,
        count: n,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[n - 1],
    })
}

/// Linear-interpolation quantile of sorted, non-empty `values`.
fn quantile(values: &[f64], q: f64) -> f64 {
    let pos = q * (values.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    values[lo] + (values[hi] - values[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Row};

    #[test]
    fn describes_numeric_columns_only() {
        let ds = Dataset::new(
            vec![Column::JobTitle, Column::Salary, Column::Other("Mixed".into())],
            vec![
                Row::new(vec!["A".into(), CellValue::Integer(50), CellValue::Integer(1)]),
                Row::new(vec!["B".into(), CellValue::Integer(100), "x".into()]),
                Row::new(vec!["C".into(), CellValue::Integer(150), CellValue::Null]),
                Row::new(vec!["D".into(), CellValue::Integer(200), CellValue::Null]),
            ],
        );
        let summary = describe(&ds);
        assert_eq!(summary.columns.len(), 1);

        let salary = summary.get(&Column::Salary).unwrap();
        assert_eq!(salary.count, 4);
        assert_eq!(salary.mean, 125.0);
        assert_eq!(salary.min, 50.0);
        assert_eq!(salary.q25, 87.5);
        assert_eq!(salary.median, 125.0);
        assert_eq!(salary.q75, 162.5);
        assert_eq!(salary.max, 200.0);
        let std = salary.std.unwrap();
        assert!((std - 64.549_722_436_790_28).abs() < 1e-9);
    }

    #[test]
    fn single_value_has_no_std_and_nulls_are_skipped() {
        let ds = Dataset::new(
            vec![Column::Salary],
            vec![
                Row::new(vec![CellValue::Float(10.0)]),
                Row::new(vec![CellValue::Null]),
            ],
        );
        let salary = describe(&ds).columns.remove(0);
        assert_eq!(salary.count, 1);
        assert_eq!(salary.std, None);
        assert_eq!(salary.q75, 10.0);
    }

    #[test]
    fn empty_dataset_has_empty_summary() {
        assert!(describe(&Dataset::empty(vec![Column::Salary])).is_empty());
    }
}
