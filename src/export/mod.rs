//! Export
//!
//! - CSV: expense rows for spreadsheets
//! - JSON: machine-readable full ledger with computed dashboard
//! - YAML: the same content, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
