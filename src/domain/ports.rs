use crate::domain::model::{Raster, VisualDocument};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Destination for finished artifacts.
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Turns a visual summary into pixels. `scale` multiplies the document's
/// pixel size; the result must be fully opaque.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, document: &VisualDocument, scale: f32) -> Result<Raster>;
}

/// A platform share facility (share sheet, messenger hand-off, ...).
#[async_trait]
pub trait ShareSheet: Send + Sync {
    async fn share(&self, title: &str, text: &str) -> Result<()>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}
