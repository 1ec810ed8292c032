use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{plot, table};
use salary_explorer::data::{aggregate_mean, describe, CellValue, Column, Recommendation};

/// Columns charted against mean salary, top to bottom.
const CHART_COLUMNS: [(Column, &str); 4] = [
    (Column::JobTitle, "Job Title"),
    (Column::EmployeeResidence, "Location"),
    (Column::ExperienceLevel, "Experience Level"),
    (Column::CompanySize, "Company Size"),
];

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left panel: job title, salary range and recommendation inputs.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selections");
    ui.separator();

    let Some(dataset) = state.analysable() else {
        ui.label("Load a dataset with the required columns to start.");
        return;
    };

    // Offer only values the data actually contains.
    let titles = dataset.distinct_values(&Column::JobTitle);
    let levels = dataset.distinct_values(&Column::ExperienceLevel);
    let locations = dataset.distinct_values(&Column::EmployeeResidence);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Average salary");
            value_combo(ui, "job_title", "Select Job Title", &titles, &mut state.selected_job_title);
            ui.separator();

            ui.strong("Filter data");
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Minimum Salary");
                ui.add(
                    egui::DragValue::new(&mut state.min_salary)
                        .speed(1000.0)
                        .range(0.0..=f64::MAX),
                );
            });
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Maximum Salary");
                ui.add(
                    egui::DragValue::new(&mut state.max_salary)
                        .speed(1000.0)
                        .range(0.0..=f64::MAX),
                );
            });
            ui.separator();

            ui.strong("Job recommendations");
            value_combo(
                ui,
                "experience",
                "Select Your Experience Level",
                &levels,
                &mut state.user_experience,
            );
            value_combo(ui, "location", "Select Your Location", &locations, &mut state.user_location);
        });
}

fn value_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    values: &[CellValue],
    selected: &mut Option<CellValue>,
) {
    ui.label(label);
    let current = selected.as_ref().map(|v| v.to_string()).unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for value in values {
                ui.selectable_value(selected, Some(value.clone()), value.to_string());
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel – tables, summaries and charts
// ---------------------------------------------------------------------------

/// Render the loaded dataset and every derived view.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file to get started  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Dataset");
            table::dataset_table(ui, "dataset", dataset);

            ui.heading("Column Names");
            ui.label(dataset.column_names().join(", "));

            ui.heading("Preview of the Data");
            table::dataset_table(ui, "preview", &dataset.head(state.config.preview_rows));

            if !state.missing_columns.is_empty() {
                ui.label(
                    RichText::new(format!(
                        "Missing columns in the dataset: {}",
                        state.missing_columns.join(", ")
                    ))
                    .color(Color32::RED),
                );
                return;
            }

            ui.separator();
            ui.heading("Data Summary");
            table::summary_table(ui, "summary", &describe(dataset));

            ui.heading("Average Salary by Job Title");
            if let Some(title) = &state.selected_job_title {
                match state.selected_title_mean() {
                    Some(mean) => ui.label(format!("The average salary for {title} is: ${mean:.2}")),
                    None => ui.label(format!("No salary data for {title}.")),
                };
            }

            for (column, label) in &CHART_COLUMNS {
                ui.heading(format!("Salary Distribution by {label}"));
                let result = aggregate_mean(dataset, column, &Column::Salary);
                plot::mean_bar_chart(ui, &format!("chart_{}", column.name()), &result);
            }

            ui.separator();
            ui.heading("Filtered Data");
            if let Some(filtered) = state.filtered() {
                ui.label(format!("{} of {} rows", filtered.len(), dataset.len()));
                table::dataset_table(ui, "filtered", &filtered);
                ui.heading("Filtered Data Summary");
                table::summary_table(ui, "filtered_summary", &describe(&filtered));
            }

            ui.separator();
            ui.heading("Job Recommendations");
            match state.recommendation() {
                Some(Recommendation::Matches(rows)) => {
                    ui.label("Recommended Jobs for You:");
                    table::dataset_table(ui, "recommendations", &rows);
                }
                Some(Recommendation::NoMatches) | None => {
                    ui.label("No job recommendations found for your selected criteria.");
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} rows, {} columns", ds.len(), ds.columns().len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job listings")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
