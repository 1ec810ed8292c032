use super::model::{Column, Dataset};

// ---------------------------------------------------------------------------
// Range filter: inclusive bounds on a numeric measure
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` interval on a measure column.
///
/// `min > max` is legal and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterRange {
    pub min: f64,
    pub max: f64,
}

impl FilterRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Return indices of rows whose measure lies inside `range`.
///
/// A row passes when its measure cell is numeric and `min <= value <= max`.
/// Missing or non-numeric measures never pass.
pub fn range_indices(dataset: &Dataset, measure: &Column, range: FilterRange) -> Vec<usize> {
    let Some(idx) = dataset.column_index(measure) else {
        return Vec::new();
    };
    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.cells()[idx]
                .as_f64()
                .is_some_and(|v| range.contains(v))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Rows with `min_value <= measure <= max_value`, in original order, as a new
/// dataset with the same columns.
pub fn filter_range(dataset: &Dataset, measure: &Column, min_value: f64, max_value: f64) -> Dataset {
    let range = FilterRange::new(min_value, max_value);
    let indices = range_indices(dataset, measure, range);
    log::debug!(
        "{} in [{min_value}, {max_value}]: {} of {} rows",
        measure,
        indices.len(),
        dataset.len()
    );
    dataset.with_rows(&indices)
}
