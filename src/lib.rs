pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{clipboard::StdoutClipboard, raster::ResvgRasterizer, storage::LocalStorage};
pub use config::toml_config::AppConfig;
pub use core::export::{ExportRenderer, ExportReport, ExportSettings, ExportState};
pub use core::summary::{CalculationSummary, InvitationSummary, Summary, SummaryContext};
pub use utils::error::{Result, SplitError};
