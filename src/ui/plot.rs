use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{bar_color, generate_palette};
use salary_explorer::data::AggregationResult;

// ---------------------------------------------------------------------------
// Horizontal bar chart of grouped means (central panel)
// ---------------------------------------------------------------------------

/// One bar per group with a defined mean; groups are listed top to bottom in
/// result order. Groups without any numeric measure are named below the chart.
pub fn mean_bar_chart(ui: &mut Ui, id: &str, result: &AggregationResult) {
    if result.is_empty() {
        ui.label("No data.");
        return;
    }

    let palette = generate_palette(result.len());
    let labels: Vec<String> = result.groups.iter().map(|g| g.key.to_string()).collect();
    let n = labels.len();

    // Bars are placed from the top so the first group reads first.
    let bars: Vec<Bar> = result
        .groups
        .iter()
        .enumerate()
        .filter_map(|(i, g)| {
            let mean = g.mean?;
            Some(
                Bar::new((n - 1 - i) as f64, mean)
                    .name(&labels[i])
                    .fill(bar_color(&palette, i)),
            )
        })
        .collect();

    let chart = BarChart::new(bars)
        .horizontal()
        .name(format!("Average {}", result.measure_column));

    let height = (n as f32 * 26.0).clamp(120.0, 480.0);
    let axis_labels = labels.clone();

    Plot::new(id)
        .height(height)
        .x_axis_label(result.measure_column.name().to_string())
        .y_axis_label(result.group_column.name().to_string())
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            (n - 1)
                .checked_sub(pos as usize)
                .and_then(|i| axis_labels.get(i))
                .cloned()
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });

    let undefined: Vec<&str> = result
        .groups
        .iter()
        .zip(&labels)
        .filter(|(g, _)| g.mean.is_none())
        .map(|(_, l)| l.as_str())
        .collect();
    if !undefined.is_empty() {
        ui.label(format!("No salary data for: {}", undefined.join(", ")));
    }
}
