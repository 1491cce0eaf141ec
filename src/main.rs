// GUI-subsystem binary on Windows: no console window is allocated. All
// diagnostics go to the session log file (see src/logger.rs).
#![windows_subsystem = "windows"]

use clap::Parser;

use gridfe::app::GridFEApp;
use gridfe::cli::CliArgs;
use gridfe::logger;

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init(args.verbose);
    if let Some(path) = logger::log_path() {
        log::debug!("session log at {}", path.display());
    }

    // Define the native window options
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([460.0, 560.0])
            .with_title("GridFE"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "GridFE",
        options,
        Box::new(move |cc| Box::new(GridFEApp::new(cc, &args))),
    )
}
