use super::error::{DataError, DataResult};
use super::loader::{load_csv_bytes, LoadOptions};
use super::model::{Column, Dataset};

/// Required columns the dataset lacks, in [`Column::REQUIRED`] order.
pub fn missing_columns(dataset: &Dataset) -> Vec<String> {
    Column::REQUIRED
        .iter()
        .filter(|c| !dataset.has_column(c))
        .map(|c| c.name().to_string())
        .collect()
}

/// Accept a dataset for analysis only when every required column is present.
pub fn validate(dataset: Dataset) -> DataResult<Dataset> {
    let missing = missing_columns(&dataset);
    if missing.is_empty() {
        Ok(dataset)
    } else {
        Err(DataError::Validation { missing })
    }
}

/// Parse delimited bytes and report which required columns are missing.
///
/// The dataset is returned even when columns are missing so callers can still
/// show the raw preview; only parse failures are errors here.
pub fn load_and_validate(raw: &[u8], options: &LoadOptions) -> DataResult<(Dataset, Vec<String>)> {
    let dataset = load_csv_bytes(raw, options)?;
    let missing = missing_columns(&dataset);
    if !missing.is_empty() {
        log::warn!("Missing columns in the dataset: {}", missing.join(", "));
    }
    Ok((dataset, missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "Job Title,Salary,Employee Residence,Experience Level,Company Size\n\
                        Engineer,100,US,Senior,L\n";

    #[test]
    fn complete_dataset_passes_unchanged() {
        let (ds, missing) = load_and_validate(FULL.as_bytes(), &LoadOptions::default()).unwrap();
        assert!(missing.is_empty());
        assert_eq!(validate(ds.clone()).unwrap(), ds);
    }

    #[test]
    fn reports_only_the_missing_column() {
        let raw = "Job Title,Salary,Employee Residence,Experience Level\nEngineer,100,US,Senior\n";
        let (ds, missing) = load_and_validate(raw.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(missing, vec!["Company Size".to_string()]);
        assert_eq!(ds.len(), 1);

        let err = validate(ds).unwrap_err();
        assert_eq!(err.missing_columns(), Some(&["Company Size".to_string()][..]));
        assert_eq!(err.to_string(), "Missing columns in the dataset: Company Size");
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let raw = "job title,salary\nEngineer,100\n";
        let (_, missing) = load_and_validate(raw.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(missing.len(), 5);
        assert_eq!(missing[0], "Job Title");
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(matches!(
            load_and_validate(b"", &LoadOptions::default()),
            Err(DataError::Parse(_))
        ));
    }
}
