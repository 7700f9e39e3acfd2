use dioxus::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::results::{escape_html, report_timestamp, DisplayModel};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Popup blocked. Please allow popups to download the PDF.")]
    PopupBlocked,
    #[error("Printing unavailable: {0}")]
    Unavailable(String),
    #[error("Unable to save report: {0}")]
    Io(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintOutcome {
    /// A print dialog was raised; the host handles "Save as PDF".
    Opened,
    /// Written to disk for the user to open and print.
    Saved(String),
}

/// Hands a finished report document to whatever can print it.
pub trait ReportPrinter {
    fn print(&self, html: &str) -> Result<PrintOutcome, ExportError>;
}

#[component]
pub fn ReportExportButton(model: DisplayModel) -> Element {
    let mut status = use_signal(|| ExportStatus::Idle);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(message) => Some((
            "result-card__meta result-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "result-card__meta result-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let on_export = move |_| {
        let html = build_report_html(&model, &report_timestamp());
        match PlatformPrinter.print(&html) {
            Ok(PrintOutcome::Opened) => {
                status.set(ExportStatus::Done("Print dialog opened".to_string()))
            }
            Ok(PrintOutcome::Saved(path)) => {
                status.set(ExportStatus::Done(format!("Report saved to {path}")))
            }
            Err(err) => {
                warn!("report export failed: {err}");
                status.set(ExportStatus::Error(err.to_string()));
            }
        }
    };

    rsx! {
        div { class: "result-card__actions",
            button {
                r#type: "button",
                class: "button button--ghost",
                onclick: on_export,
                {crate::t!("result-download")}
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

/// Self-contained printable document for one result.
pub fn build_report_html(model: &DisplayModel, generated_at: &str) -> String {
    let image = match model.image.as_deref() {
        Some(src) => format!("<img src=\"{}\" class=\"img\" />", escape_html(src)),
        None => "<div class=\"img\" style=\"display:grid;place-items:center;color:#999\">No Image</div>"
            .to_string(),
    };
    let remedies: String = model
        .remedies
        .iter()
        .map(|r| format!("<li>{}</li>", escape_html(r)))
        .collect();

    format!(
        r#"<html>
  <head>
    <title>Prediction Result</title>
    <style>
      body {{ font-family: Arial, sans-serif; padding:20px; color:#111; }}
      h1 {{ font-size:22px; margin-bottom:6px; }}
      .meta {{ margin-bottom:10px; }}
      .row {{ display:flex; gap:12px; align-items:flex-start; }}
      .img {{ width:180px; height:180px; object-fit:cover; border:1px solid #ddd; }}
      .box {{ padding:10px; border:1px solid #ddd; border-radius:6px; background:#fafafa; margin-bottom:8px; }}
      ul {{ margin-top:6px; }}
      .small {{ color:#666; font-size:12px; margin-top:10px; }}
    </style>
  </head>
  <body>
    <h1>Prediction Result</h1>
    <div class="meta">Date: {date}</div>
    <div class="row">
      <div>{image}</div>
      <div style="flex:1">
        <div class="box"><strong>Crop:</strong> {crop}</div>
        <div class="box"><strong>Disease:</strong> {disease}</div>
        <div class="box"><strong>Confidence:</strong> {confidence}</div>
        <div class="box"><strong>Recommended actions:</strong>
          <ul>{remedies}</ul>
        </div>
      </div>
    </div>
    <div class="small">Generated by AgriPredAI</div>
  </body>
</html>
"#,
        date = escape_html(generated_at),
        crop = escape_html(&model.crop_name),
        disease = escape_html(&model.disease_name),
        confidence = escape_html(&model.confidence),
    )
}

/// Printer for the running platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlatformPrinter;

#[cfg(target_arch = "wasm32")]
impl ReportPrinter for PlatformPrinter {
    fn print(&self, html: &str) -> Result<PrintOutcome, ExportError> {
        use wasm_bindgen::{JsCast, JsValue};
        use web_sys::HtmlDocument;

        let window = web_sys::window()
            .ok_or_else(|| ExportError::Unavailable("window unavailable".into()))?;
        let popup = window
            .open_with_url_and_target("", "_blank")
            .map_err(|_| ExportError::PopupBlocked)?
            .ok_or(ExportError::PopupBlocked)?;
        let document: HtmlDocument = popup
            .document()
            .ok_or_else(|| ExportError::Unavailable("popup has no document".into()))?
            .dyn_into()
            .map_err(|_| ExportError::Unavailable("document cast failed".into()))?;

        document
            .write(&js_sys::Array::of1(&JsValue::from_str(html)))
            .map_err(|_| ExportError::Unavailable("unable to write report".into()))?;
        document.close().ok();

        // Give the popup a moment to lay out before printing.
        gloo_timers::callback::Timeout::new(400, move || {
            popup.focus().ok();
            popup.print().ok();
        })
        .forget();

        info!("report handed to print dialog");
        Ok(PrintOutcome::Opened)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ReportPrinter for PlatformPrinter {
    fn print(&self, html: &str) -> Result<PrintOutcome, ExportError> {
        let dir = export_dir()?;
        let path = save_report(&dir, html)?;
        info!(path = %path, "report saved");
        Ok(PrintOutcome::Saved(path))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<std::path::PathBuf, ExportError> {
    crate::core::storage::data_dir()
        .map(|dir| dir.join("exports"))
        .ok_or_else(|| ExportError::Io("Unable to determine export directory".into()))
}

#[cfg(not(target_arch = "wasm32"))]
fn save_report(dir: &std::path::Path, html: &str) -> Result<String, ExportError> {
    use std::fs;

    fs::create_dir_all(dir).map_err(|err| ExportError::Io(err.to_string()))?;
    let path = dir.join(format!("agripred-result-{}.html", timestamp_slug()));
    fs::write(&path, html).map_err(|err| ExportError::Io(err.to_string()))?;
    Ok(path.to_string_lossy().to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}
