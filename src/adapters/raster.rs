use crate::domain::model::{Raster, VisualDocument};
use crate::domain::ports::Rasterizer;
use crate::utils::error::{Result, SplitError};
use async_trait::async_trait;
use std::sync::Arc;
use tiny_skia::{Color, Pixmap, Transform};
use usvg::fontdb;

fn raster_error(message: impl Into<String>) -> SplitError {
    SplitError::RasterizationError {
        message: message.into(),
    }
}

/// Renders SVG documents with resvg on the blocking pool.
#[derive(Clone)]
pub struct ResvgRasterizer {
    fontdb: Arc<fontdb::Database>,
}

impl ResvgRasterizer {
    /// Uses the fonts installed on this machine.
    pub fn with_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} font faces for rasterization", db.len());
        Self::with_fonts(db)
    }

    pub fn with_fonts(db: fontdb::Database) -> Self {
        Self {
            fontdb: Arc::new(db),
        }
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::with_system_fonts()
    }
}

#[async_trait]
impl Rasterizer for ResvgRasterizer {
    async fn rasterize(&self, document: &VisualDocument, scale: f32) -> Result<Raster> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(raster_error(format!("invalid scale factor {}", scale)));
        }

        let svg = document.svg.clone();
        let fontdb = Arc::clone(&self.fontdb);
        tokio::task::spawn_blocking(move || render_svg(&svg, scale, fontdb))
            .await
            .map_err(|e| raster_error(format!("render task failed: {}", e)))?
    }
}

/// Renders `svg` at `scale` over an opaque white background.
pub fn render_svg(svg: &str, scale: f32, fontdb: Arc<fontdb::Database>) -> Result<Raster> {
    let mut options = usvg::Options::default();
    options.fontdb = fontdb;

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| raster_error(format!("SVG parse failed: {}", e)))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| raster_error(format!("cannot allocate {}x{} pixmap", width, height)))?;
    pixmap.fill(Color::WHITE);
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    tracing::debug!(
        "Rasterized {}x{} document at {}x -> {}x{}px",
        size.width(),
        size.height(),
        scale,
        width,
        height
    );

    Ok(Raster::new(width, height, pixmap.take()))
}
