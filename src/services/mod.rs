//! Export and import pipeline services.

mod export;
mod import;

pub use export::{ExportOutcome, ExportRequest, ExportService};
pub use import::{ImportOutcome, ImportRequest, ImportService};
