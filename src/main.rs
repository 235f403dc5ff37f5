use document_uploader::app::DocumentUploader;
use document_uploader::utils::server_config::ServerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let app = DocumentUploader::new(ServerConfig::from_env())?;
    app.refresh_documents();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([640.0, 640.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Document Uploader",
        options,
        Box::new(move |_cc: &eframe::CreationContext<'_>| -> Box<dyn eframe::App> {
            Box::new(app)
        }),
    )?;
    Ok(())
}
