use crate::adapters::pdf_writer::encode_pdf;
use crate::adapters::png_encoder::encode_png;
use crate::core::layout::DocumentStyle;
use crate::core::paginate::{paginate, PageLayout};
use crate::core::summary::Summary;
use crate::domain::model::{artifact_file_name, Artifact, ExportFormat};
use crate::domain::ports::{Rasterizer, Storage};
use crate::utils::error::{Result, SplitError};
use chrono::{DateTime, FixedOffset};
use tokio::sync::Mutex;

/// Export progress for one summary. Each export call consumes the current
/// state and hands back the next one; `Success` and `Failed` are at rest and
/// accept a new export just like `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ExportState {
    #[default]
    Idle,
    Generating { format: ExportFormat },
    Success { file_name: String },
    Failed { notice: String },
}

impl ExportState {
    pub fn is_generating(&self) -> bool {
        matches!(self, ExportState::Generating { .. })
    }

    /// Returns to `Idle` after the outcome has been shown.
    pub fn settle(self) -> ExportState {
        match self {
            ExportState::Generating { .. } => self,
            _ => ExportState::Idle,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Pixel density for PNG exports.
    pub png_scale: f32,
    /// Pixel density for PDF exports; lower keeps files small.
    pub pdf_scale: f32,
    pub page_layout: PageLayout,
    pub document_style: DocumentStyle,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            png_scale: 2.0,
            pdf_scale: 1.5,
            page_layout: PageLayout::default(),
            document_style: DocumentStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes_written: usize,
    pub page_count: usize,
}

fn failure_notice(format: ExportFormat, err: &SplitError) -> String {
    match format {
        ExportFormat::Pdf => "Gagal membuat PDF. Silakan coba lagi.".to_string(),
        ExportFormat::Png => "Gagal membuat gambar. Silakan coba lagi.".to_string(),
        ExportFormat::Txt => err.user_friendly_message(),
    }
}

/// Produces TXT / PNG / PDF artifacts for a summary and hands them to storage.
///
/// At most one export runs at a time; a concurrent call is turned away with
/// [`SplitError::ExportInProgress`].
pub struct ExportRenderer<R: Rasterizer, S: Storage> {
    rasterizer: R,
    storage: S,
    settings: ExportSettings,
    in_flight: Mutex<()>,
}

impl<R: Rasterizer, S: Storage> ExportRenderer<R, S> {
    pub fn new(rasterizer: R, storage: S, settings: ExportSettings) -> Self {
        Self {
            rasterizer,
            storage,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// Builds the artifact in memory without touching storage.
    pub async fn render<T: Summary + ?Sized>(
        &self,
        summary: &T,
        format: ExportFormat,
        generated_at: &DateTime<FixedOffset>,
    ) -> Result<Artifact> {
        let file_name = artifact_file_name(summary.kind(), format, generated_at.date_naive());

        let (bytes, page_count) = match format {
            ExportFormat::Txt => (summary.render_text(generated_at).into_bytes(), 1),
            ExportFormat::Png => {
                let document = summary.render_document(generated_at, &self.settings.document_style);
                let raster = self
                    .rasterizer
                    .rasterize(&document, self.settings.png_scale)
                    .await?;
                (encode_png(&raster)?, 1)
            }
            ExportFormat::Pdf => {
                let document = summary.render_document(generated_at, &self.settings.document_style);
                let raster = self
                    .rasterizer
                    .rasterize(&document, self.settings.pdf_scale)
                    .await?;
                let regions = paginate(raster.width, raster.height, &self.settings.page_layout)?;

                let mut pages = Vec::with_capacity(regions.len());
                for region in regions {
                    let slice = raster
                        .crop_rows(region.source_y, region.source_height)
                        .ok_or_else(|| SplitError::PaginationError {
                            message: format!(
                                "page {} rows {}..{} outside {}px raster",
                                region.index,
                                region.source_y,
                                region.source_y + region.source_height,
                                raster.height
                            ),
                        })?;
                    pages.push((region, slice));
                }
                let page_count = pages.len();
                (encode_pdf(&pages, self.settings.page_layout.page)?, page_count)
            }
        };

        Ok(Artifact {
            file_name,
            format,
            bytes,
            page_count,
        })
    }

    /// Runs one export. A `Generating` state, or a call made while another
    /// export on this renderer is still running, is handed back untouched with
    /// [`SplitError::ExportInProgress`]; otherwise the returned state is
    /// `Success` or `Failed`, never `Generating`.
    pub async fn export<T: Summary + ?Sized>(
        &self,
        state: ExportState,
        summary: &T,
        format: ExportFormat,
        generated_at: &DateTime<FixedOffset>,
    ) -> (ExportState, Result<ExportReport>) {
        if state.is_generating() {
            tracing::warn!("Rejected {} export: another export is still running", format);
            return (state, Err(SplitError::ExportInProgress));
        }

        // held across render and deliver
        let Ok(_guard) = self.in_flight.try_lock() else {
            tracing::warn!("Rejected {} export: renderer is busy", format);
            return (state, Err(SplitError::ExportInProgress));
        };

        let state = ExportState::Generating { format };
        tracing::info!("🖨️ Generating {} {} ({:?})", summary.kind().slug(), format, state);

        let outcome = match self.render(summary, format, generated_at).await {
            Ok(artifact) => self.deliver(artifact).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(report) => {
                tracing::info!(
                    "✅ {} saved as {} ({} bytes, {} page(s))",
                    format,
                    report.file_name,
                    report.bytes_written,
                    report.page_count
                );
                (
                    ExportState::Success {
                        file_name: report.file_name.clone(),
                    },
                    Ok(report),
                )
            }
            Err(e) => {
                let notice = failure_notice(format, &e);
                tracing::error!(
                    "❌ {} export failed: {} (Category: {:?}, Severity: {:?})",
                    format,
                    e,
                    e.category(),
                    e.severity()
                );
                (ExportState::Failed { notice }, Err(e))
            }
        }
    }

    async fn deliver(&self, artifact: Artifact) -> Result<ExportReport> {
        self.storage
            .write_file(&artifact.file_name, &artifact.bytes)
            .await?;
        Ok(ExportReport {
            bytes_written: artifact.bytes.len(),
            file_name: artifact.file_name,
            format: artifact.format,
            page_count: artifact.page_count,
        })
    }
}
