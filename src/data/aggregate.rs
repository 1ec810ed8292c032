use std::collections::HashMap;

use super::model::{CellValue, Column, Dataset};

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean of the measure over one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: CellValue,
    /// `None` when no row of the group had a numeric measure.
    pub mean: Option<f64>,
    /// Rows that contributed a numeric measure.
    pub count: usize,
}

/// One [`GroupMean`] per distinct non-null group value, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    pub group_column: Column,
    pub measure_column: Column,
    pub groups: Vec<GroupMean>,
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &CellValue) -> Option<&GroupMean> {
        self.groups.iter().find(|g| &g.key == key)
    }
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Mean of `measure` per distinct value of `group`.
///
/// Rows with a null group value are not grouped. Rows with a missing or
/// non-numeric measure still make their group appear but do not count
/// towards its mean. Unknown columns yield an empty result.
pub fn aggregate_mean(dataset: &Dataset, group: &Column, measure: &Column) -> AggregationResult {
    let mut result = AggregationResult {
        group_column: group.clone(),
        measure_column: measure.clone(),
        groups: Vec::new(),
    };
    let (Some(g_idx), Some(m_idx)) = (dataset.column_index(group), dataset.column_index(measure))
    else {
        return result;
    };

    let mut order: Vec<&CellValue> = Vec::new();
    let mut acc: HashMap<&CellValue, Accumulator> = HashMap::new();
    for row in dataset.rows() {
        let key = &row.cells()[g_idx];
        if key.is_null() {
            continue;
        }
        let slot = acc.entry(key).or_insert_with(|| {
            order.push(key);
            Accumulator::default()
        });
        if let Some(v) = row.cells()[m_idx].as_f64() {
            slot.sum += v;
            slot.count += 1;
        }
    }

    result.groups = order
        .into_iter()
        .map(|key| {
            let a = &acc[key];
            GroupMean {
                key: key.clone(),
                mean: (a.count > 0).then(|| a.sum / a.count as f64),
                count: a.count,
            }
        })
        .collect();
    log::debug!(
        "mean {} by {}: {} groups",
        measure,
        group,
        result.groups.len()
    );
    result
}

/// Mean of `measure` over rows where `column == value`.
///
/// `None` when no row matches or none of the matches carries a numeric
/// measure; callers must render that distinctly from a mean of zero.
pub fn mean_for_exact_value(
    dataset: &Dataset,
    column: &Column,
    value: &CellValue,
    measure: &Column,
) -> Option<f64> {
    let c_idx = dataset.column_index(column)?;
    let m_idx = dataset.column_index(measure)?;
    let (sum, count) = dataset
        .rows()
        .iter()
        .filter(|row| &row.cells()[c_idx] == value)
        .filter_map(|row| row.cells()[m_idx].as_f64())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Largest numeric value of `measure`; the default upper bound of a range filter.
pub fn max_measure(dataset: &Dataset, measure: &Column) -> Option<f64> {
    let idx = dataset.column_index(measure)?;
    dataset
        .rows()
        .iter()
        .filter_map(|row| row.cells()[idx].as_f64())
        .fold(None, |max, v| Some(max.map_or(v, |m: f64| m.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn dataset(rows: &[(&str, CellValue)]) -> Dataset {
        Dataset::new(
            vec![Column::JobTitle, Column::Salary],
            rows.iter()
                .map(|(t, s)| Row::new(vec![CellValue::parse(t), s.clone()]))
                .collect(),
        )
    }

    #[test]
    fn groups_in_first_seen_order() {
        let ds = dataset(&[
            ("Engineer", CellValue::Integer(100)),
            ("Analyst", CellValue::Integer(50)),
            ("Engineer", CellValue::Integer(200)),
            ("Analyst", CellValue::Float(150.0)),
        ]);
        let result = aggregate_mean(&ds, &Column::JobTitle, &Column::Salary);
        let pairs: Vec<(String, Option<f64>)> = result
            .groups
            .iter()
            .map(|g| (g.key.to_string(), g.mean))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Engineer".to_string(), Some(150.0)),
                ("Analyst".to_string(), Some(100.0)),
            ]
        );
        assert_eq!(result, aggregate_mean(&ds, &Column::JobTitle, &Column::Salary));
    }

    #[test]
    fn non_numeric_measures_are_excluded_from_mean_and_count() {
        let ds = dataset(&[
            ("Engineer", CellValue::Integer(100)),
            ("Engineer", CellValue::Text("n/a".into())),
            ("Engineer", CellValue::Null),
            ("Intern", CellValue::Text("unpaid".into())),
        ]);
        let result = aggregate_mean(&ds, &Column::JobTitle, &Column::Salary);
        let engineer = result.get(&"Engineer".into()).unwrap();
        assert_eq!(engineer.mean, Some(100.0));
        assert_eq!(engineer.count, 1);
        let intern = result.get(&"Intern".into()).unwrap();
        assert_eq!(intern.mean, None);
        assert_eq!(intern.count, 0);
    }

    #[test]
    fn null_group_values_are_skipped_and_case_matters() {
        let ds = dataset(&[
            ("", CellValue::Integer(10)),
            ("engineer", CellValue::Integer(20)),
            ("Engineer", CellValue::Integer(30)),
        ]);
        let result = aggregate_mean(&ds, &Column::JobTitle, &Column::Salary);
        assert_eq!(result.len(), 2);
        assert_eq!(result.get(&"engineer".into()).unwrap().mean, Some(20.0));
    }

    #[test]
    fn unknown_columns_give_empty_result() {
        let ds = dataset(&[("Engineer", CellValue::Integer(100))]);
        assert!(aggregate_mean(&ds, &Column::CompanySize, &Column::Salary).is_empty());
        assert!(aggregate_mean(&ds, &Column::JobTitle, &Column::CompanySize).is_empty());
    }

    #[test]
    fn exact_value_mean_is_undefined_without_matches() {
        let ds = dataset(&[
            ("Engineer", CellValue::Integer(0)),
            ("Analyst", CellValue::Integer(50)),
        ]);
        let zero = mean_for_exact_value(&ds, &Column::JobTitle, &"Engineer".into(), &Column::Salary);
        assert_eq!(zero, Some(0.0));
        let none = mean_for_exact_value(&ds, &Column::JobTitle, &"Manager".into(), &Column::Salary);
        assert_eq!(none, None);
    }

    #[test]
    fn max_measure_ignores_non_numeric() {
        let ds = dataset(&[
            ("A", CellValue::Integer(10)),
            ("B", CellValue::Text("999".into())),
            ("C", CellValue::Float(42.5)),
        ]);
        assert_eq!(max_measure(&ds, &Column::Salary), Some(42.5));
        assert_eq!(max_measure(&dataset(&[]), &Column::Salary), None);
    }
}
