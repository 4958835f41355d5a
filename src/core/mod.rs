pub mod cost;
pub mod export;
pub mod layout;
pub mod locale;
pub mod paginate;
pub mod share;
pub mod summary;

pub use crate::domain::model::{
    Artifact, CalculationInput, CalculationResult, ExportFormat, InvitationInput, SummaryKind,
};
pub use crate::domain::ports::{Clipboard, Rasterizer, ShareSheet, Storage};
pub use crate::utils::error::Result;
