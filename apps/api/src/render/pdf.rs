//! PDF export: prints the rendered HTML view through a headless browser.
//! The browser round-trip is blocking, so callers run it off the async
//! runtime via `spawn_blocking`.

use std::io::Write as _;
use std::path::PathBuf;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use tracing::info;

use crate::errors::AppError;

/// Renders an HTML document to PDF bytes. Blocking.
///
/// The document is written to a temp file and loaded via `file://`; a data
/// URL would also work but breaks down on large documents.
pub fn html_to_pdf(html: &str, chrome_path: Option<&str>) -> Result<Vec<u8>, AppError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-print-")
        .suffix(".html")
        .tempfile()
        .map_err(|e| AppError::Export(format!("Could not create print file: {e}")))?;
    file.write_all(html.as_bytes())
        .map_err(|e| AppError::Export(format!("Could not write print file: {e}")))?;

    let url = format!("file://{}", file.path().display());

    let mut builder = LaunchOptions::default_builder();
    builder.headless(true);
    if let Some(path) = chrome_path {
        builder.path(Some(PathBuf::from(path)));
    }
    let launch_options = builder
        .build()
        .map_err(|e| AppError::Export(format!("Invalid browser launch options: {e}")))?;

    let browser = Browser::new(launch_options)
        .map_err(|e| AppError::Export(format!("Headless browser launch failed: {e}")))?;

    let tab = browser
        .new_tab()
        .map_err(|e| AppError::Export(format!("Could not open browser tab: {e}")))?;

    tab.navigate_to(&url)
        .and_then(|tab| tab.wait_until_navigated())
        .map_err(|e| AppError::Export(format!("Print view failed to load: {e}")))?;

    let options = PrintToPdfOptions {
        print_background: Some(true),
        prefer_css_page_size: Some(true),
        ..Default::default()
    };

    let pdf = tab
        .print_to_pdf(Some(options))
        .map_err(|e| AppError::Export(format!("PDF print failed: {e}")))?;

    info!("Rendered PDF ({} bytes)", pdf.len());
    Ok(pdf)
}
