use std::path::Path;

use anyhow::{Context, Result};

use salary_explorer::config::Config;
use salary_explorer::data::{
    filter_range, load_file, max_measure, mean_for_exact_value, missing_columns,
    recommendation_view, CellValue, Column, Dataset, Predicate, Recommendation,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only the loaded dataset and the user's selections live here; every view
/// is recomputed from the dataset when it is drawn.
pub struct AppState {
    pub config: Config,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Required columns the loaded dataset lacks.
    pub missing_columns: Vec<String>,

    /// Job title whose average salary is shown.
    pub selected_job_title: Option<CellValue>,

    /// Inclusive salary bounds for the filtered view.
    pub min_salary: f64,
    pub max_salary: f64,

    /// Recommendation inputs.
    pub user_experience: Option<CellValue>,
    pub user_location: Option<CellValue>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dataset: None,
            missing_columns: Vec::new(),
            selected_job_title: None,
            min_salary: 0.0,
            max_salary: 0.0,
            user_experience: None,
            user_location: None,
            status_message: None,
        }
    }

    /// Load a file and make it the current dataset, or report why not.
    pub fn load_path(&mut self, path: &Path) {
        match self.read_dataset(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        load_file(path, &self.config.load_options())
            .with_context(|| format!("loading {}", path.display()))
    }

    /// Ingest a newly loaded dataset and reset selections to its own values.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.missing_columns = missing_columns(&dataset);
        self.selected_job_title = dataset.distinct_values(&Column::JobTitle).into_iter().next();
        self.user_experience = dataset
            .distinct_values(&Column::ExperienceLevel)
            .into_iter()
            .next();
        self.user_location = dataset
            .distinct_values(&Column::EmployeeResidence)
            .into_iter()
            .next();
        self.min_salary = 0.0;
        self.max_salary = max_measure(&dataset, &Column::Salary).unwrap_or(0.0);

        self.status_message = if self.missing_columns.is_empty() {
            None
        } else {
            Some(format!(
                "Missing columns in the dataset: {}",
                self.missing_columns.join(", ")
            ))
        };
        self.dataset = Some(dataset);
    }

    /// The dataset, only once it has every required column.
    pub fn analysable(&self) -> Option<&Dataset> {
        self.dataset
            .as_ref()
            .filter(|_| self.missing_columns.is_empty())
    }

    /// Mean salary for the selected job title; `None` means no data.
    pub fn selected_title_mean(&self) -> Option<f64> {
        let dataset = self.analysable()?;
        let title = self.selected_job_title.as_ref()?;
        mean_for_exact_value(dataset, &Column::JobTitle, title, &Column::Salary)
    }

    pub fn filtered(&self) -> Option<Dataset> {
        let dataset = self.analysable()?;
        Some(filter_range(
            dataset,
            &Column::Salary,
            self.min_salary,
            self.max_salary,
        ))
    }

    /// Listings matching both selections. An unset selection matches nothing.
    pub fn recommendation(&self) -> Option<Recommendation> {
        let dataset = self.analysable()?;
        let (Some(experience), Some(location)) = (&self.user_experience, &self.user_location)
        else {
            return Some(Recommendation::NoMatches);
        };
        let predicates = [
            Predicate::new(Column::ExperienceLevel, experience.clone()),
            Predicate::new(Column::EmployeeResidence, location.clone()),
        ];
        Some(recommendation_view(dataset, &predicates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salary_explorer::data::{load_csv_bytes, LoadOptions};

    fn state_with(csv: &str) -> AppState {
        let mut state = AppState::new(Config::default());
        state.set_dataset(load_csv_bytes(csv.as_bytes(), &LoadOptions::default()).unwrap());
        state
    }

    const LISTINGS: &str = "Job Title,Salary,Employee Residence,Experience Level,Company Size\n\
                            Engineer,100,US,Senior,L\n\
                            Engineer,200,US,Mid,M\n\
                            Analyst,50,UK,Senior,S\n\
                            Analyst,150.5,UK,Senior,L\n";

    #[test]
    fn selections_default_to_dataset_values() {
        let state = state_with(LISTINGS);
        assert_eq!(state.selected_job_title, Some("Engineer".into()));
        assert_eq!(state.user_experience, Some("Senior".into()));
        assert_eq!(state.user_location, Some("US".into()));
        assert_eq!(state.min_salary, 0.0);
        assert_eq!(state.max_salary, 200.0);
        assert_eq!(state.selected_title_mean(), Some(150.0));
        assert_eq!(state.filtered().map(|d| d.len()), Some(4));
    }

    #[test]
    fn recommendation_uses_both_selections() {
        let mut state = state_with(LISTINGS);
        state.user_location = Some("UK".into());
        match state.recommendation() {
            Some(Recommendation::Matches(rows)) => assert_eq!(rows.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        state.user_experience = Some("Mid".into());
        assert_eq!(state.recommendation(), Some(Recommendation::NoMatches));
    }

    #[test]
    fn unset_selection_recommends_nothing() {
        let state = state_with(
            "Job Title,Salary,Employee Residence,Experience Level,Company Size\n\
             Engineer,100,US,,L\n\
             Analyst,50,US,,S\n",
        );
        assert_eq!(state.user_experience, None);
        assert_eq!(state.user_location, Some("US".into()));
        assert_eq!(state.recommendation(), Some(Recommendation::NoMatches));
    }

    #[test]
    fn missing_columns_block_analysis() {
        let state = state_with("Job Title,Salary\nEngineer,100\n");
        assert_eq!(state.missing_columns.len(), 3);
        assert!(state.dataset.is_some());
        assert!(state.analysable().is_none());
        assert!(state.filtered().is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.ends_with("Experience Level, Company Size")));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = state_with(LISTINGS);
        state.load_path(Path::new("/nonexistent/listings.csv"));
        assert!(state.dataset.is_some());
        assert!(state.status_message.is_some());
    }
}
