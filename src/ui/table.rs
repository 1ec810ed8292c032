use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use salary_explorer::data::{ColumnSummary, Dataset, Summary};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Dataset table
// ---------------------------------------------------------------------------

/// Render every row of `dataset` in a scrollable, striped table.
pub fn dataset_table(ui: &mut Ui, id: &str, dataset: &Dataset) {
    if dataset.columns().is_empty() {
        ui.label("No columns.");
        return;
    }

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(240.0)
            .columns(TableColumn::auto().at_least(60.0), dataset.columns().len())
            .header(20.0, |mut header| {
                for column in dataset.columns() {
                    header.col(|ui: &mut Ui| {
                        ui.strong(column.name());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                    let record = &dataset.rows()[row.index()];
                    for cell in record.cells() {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// describe() table
// ---------------------------------------------------------------------------

const STATS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

fn stat_cell(stat: &str, s: &ColumnSummary) -> String {
    let value = match stat {
        "count" => return s.count.to_string(),
        "mean" => s.mean,
        "std" => match s.std {
            Some(v) => v,
            None => return "NaN".to_string(),
        },
        "min" => s.min,
        "25%" => s.q25,
        "50%" => s.median,
        "75%" => s.q75,
        _ => s.max,
    };
    format!("{value:.2}")
}

/// Render a summary with one column per numeric dataset column.
pub fn summary_table(ui: &mut Ui, id: &str, summary: &Summary) {
    if summary.is_empty() {
        ui.label("No numeric data.");
        return;
    }

    egui::Grid::new(id).striped(true).show(ui, |ui: &mut Ui| {
        ui.label("");
        for column in &summary.columns {
            ui.strong(column.column.name());
        }
        ui.end_row();

        for stat in STATS {
            ui.strong(stat);
            for column in &summary.columns {
                ui.label(stat_cell(stat, column));
            }
            ui.end_row();
        }
    });
}
