use super::model::{CellValue, Column, Dataset};

/// Exact-match constraint `column == value`.
///
/// Equality is on the parsed cell: text compares byte for byte (no trimming,
/// case-sensitive) and a text value never equals a numeric cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: Column,
    pub value: CellValue,
}

impl Predicate {
    pub fn new(column: Column, value: impl Into<CellValue>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Rows satisfying every predicate. No predicates returns the dataset as is.
///
/// A predicate on a column the dataset lacks matches nothing.
pub fn recommend(dataset: &Dataset, predicates: &[Predicate]) -> Dataset {
    if predicates.is_empty() {
        return dataset.clone();
    }

    let resolved: Option<Vec<(usize, &CellValue)>> = predicates
        .iter()
        .map(|p| dataset.column_index(&p.column).map(|i| (i, &p.value)))
        .collect();
    let Some(resolved) = resolved else {
        return Dataset::empty(dataset.columns().to_vec());
    };

    let indices: Vec<usize> = dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| resolved.iter().all(|(i, v)| &row.cells()[*i] == *v))
        .map(|(i, _)| i)
        .collect();
    dataset.with_rows(&indices)
}

/// Columns shown for each recommended job.
pub const RECOMMENDATION_COLUMNS: [Column; 3] = [Column::JobTitle, Column::Salary, Column::CompanySize];

/// Presentation-ready outcome of a recommendation query.
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    NoMatches,
    /// Matching rows projected onto [`RECOMMENDATION_COLUMNS`].
    Matches(Dataset),
}

/// [`recommend`], then project, with the empty case made explicit.
pub fn recommendation_view(dataset: &Dataset, predicates: &[Predicate]) -> Recommendation {
    let matches = recommend(dataset, predicates);
    if matches.is_empty() {
        Recommendation::NoMatches
    } else {
        Recommendation::Matches(matches.select(&RECOMMENDATION_COLUMNS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn listings() -> Dataset {
        Dataset::new(
            vec![
                Column::JobTitle,
                Column::Salary,
                Column::EmployeeResidence,
                Column::ExperienceLevel,
                Column::CompanySize,
            ],
            vec![
                Row::new(vec!["Engineer".into(), CellValue::Integer(100), "US".into(), "Senior".into(), "L".into()]),
                Row::new(vec!["Analyst".into(), CellValue::Integer(50), "UK".into(), "Senior".into(), "S".into()]),
                Row::new(vec!["Analyst".into(), CellValue::Integer(150), "UK ".into(), "Senior".into(), "L".into()]),
            ],
        )
    }

    #[test]
    fn empty_predicates_return_everything() {
        let ds = listings();
        assert_eq!(recommend(&ds, &[]), ds);
    }

    #[test]
    fn matching_is_exact_and_conjunctive() {
        let ds = listings();
        let found = recommend(
            &ds,
            &[
                Predicate::new(Column::ExperienceLevel, "Senior"),
                Predicate::new(Column::EmployeeResidence, "UK"),
            ],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found.value(0, &Column::Salary), Some(&CellValue::Integer(50)));

        let lower = recommend(&ds, &[Predicate::new(Column::ExperienceLevel, "senior")]);
        assert!(lower.is_empty());
    }

    #[test]
    fn text_never_matches_numbers() {
        let ds = listings();
        assert!(recommend(&ds, &[Predicate::new(Column::Salary, "100")]).is_empty());
        assert_eq!(recommend(&ds, &[Predicate::new(Column::Salary, 100_i64)]).len(), 1);
    }

    #[test]
    fn unknown_column_matches_nothing() {
        let ds = listings();
        let found = recommend(&ds, &[Predicate::new(Column::Other("Remote".into()), "yes")]);
        assert!(found.is_empty());
        assert_eq!(found.columns(), ds.columns());
    }

    #[test]
    fn view_projects_or_reports_no_matches() {
        let ds = listings();
        match recommendation_view(&ds, &[Predicate::new(Column::EmployeeResidence, "US")]) {
            Recommendation::Matches(rows) => {
                assert_eq!(rows.column_names(), vec!["Job Title", "Salary", "Company Size"]);
                assert_eq!(rows.len(), 1);
            }
            Recommendation::NoMatches => panic!("expected a match"),
        }
        assert_eq!(
            recommendation_view(&ds, &[Predicate::new(Column::EmployeeResidence, "DE")]),
            Recommendation::NoMatches
        );
    }
}
