mod display;
pub use display::DisplayModel;

mod summary;
pub use summary::ResultSummary;

mod history;
pub use history::HistoryPanel;

mod export;
pub use export::{
    build_report_html, ExportError, PlatformPrinter, PrintOutcome, ReportExportButton,
    ReportPrinter,
};

mod utils;
pub(crate) use utils::*;
