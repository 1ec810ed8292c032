mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::Result;
use app::SalaryExplorerApp;
use eframe::egui;
use salary_explorer::config::Config;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    let mut state = AppState::new(config);
    if let Some(path) = std::env::args_os().nth(1) {
        state.load_path(Path::new(&path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
