use stream_terminal::ui::TerminalWindow;
use stream_terminal::{debug, App};

const APP_NAME: &str = "Stream Terminal";

fn main() {
    debug::init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "Stream terminal exited with an error");
        eprintln!("{}: {}", APP_NAME, e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = lib_core::init_config()?;

    // Background tasks are spawned from the UI thread, so the runtime must be entered here.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let app = App::new(config)?;
    tracing::info!("Starting {}", APP_NAME);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([900.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(TerminalWindow::new(cc, app)))),
    )?;

    tracing::info!("Window closed, shutting down");
    Ok(())
}
