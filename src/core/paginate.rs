//! Page fitting for raster exports. Pure geometry, no image data involved.

use crate::utils::error::{Result, SplitError};
use serde::{Deserialize, Serialize};

/// CSS pixel to millimetre (96 dpi).
pub const PX_TO_MM: f64 = 0.264583;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
    pub const LETTER: PageSize = PageSize {
        width_mm: 215.9,
        height_mm: 279.4,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationPolicy {
    /// Fit the width; content taller than one page continues on further pages.
    #[default]
    Split,
    /// Always a single page, scaled down by whichever side is limiting.
    Shrink,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub margin_mm: f64,
    pub px_to_mm: f64,
    pub policy: PaginationPolicy,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margin_mm: 10.0,
            px_to_mm: PX_TO_MM,
            policy: PaginationPolicy::Split,
        }
    }
}

impl PageLayout {
    pub fn available_width(&self) -> f64 {
        self.page.width_mm - self.margin_mm * 2.0
    }

    pub fn available_height(&self) -> f64 {
        self.page.height_mm - self.margin_mm * 2.0
    }
}

/// One output page: the raster rows it shows and where they land on the page.
/// Page coordinates are millimetres from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRegion {
    pub index: usize,
    pub source_y: u32,
    pub source_height: u32,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Splits a `raster_width` × `raster_height` pixel raster across pages.
///
/// Source regions of the returned pages tile `[0, raster_height)` in order
/// with no gaps or overlaps.
pub fn paginate(
    raster_width: u32,
    raster_height: u32,
    layout: &PageLayout,
) -> Result<Vec<PageRegion>> {
    if raster_width == 0 || raster_height == 0 {
        return Err(SplitError::PaginationError {
            message: format!("empty raster {}x{}", raster_width, raster_height),
        });
    }
    if layout.px_to_mm <= 0.0 || !layout.px_to_mm.is_finite() {
        return Err(SplitError::PaginationError {
            message: format!("invalid px to mm factor {}", layout.px_to_mm),
        });
    }

    let available_width = layout.available_width();
    let available_height = layout.available_height();
    let usable = |mm: f64| mm.is_finite() && mm > 0.0;
    if !usable(available_width) || !usable(available_height) {
        return Err(SplitError::PaginationError {
            message: format!(
                "margin {}mm leaves no room on a {}x{}mm page",
                layout.margin_mm, layout.page.width_mm, layout.page.height_mm
            ),
        });
    }

    let content_width = raster_width as f64 * layout.px_to_mm;
    let content_height = raster_height as f64 * layout.px_to_mm;
    let width_ratio = available_width / content_width;
    let height_ratio = available_height / content_height;
    let fitted_height = content_height * width_ratio;

    if layout.policy == PaginationPolicy::Shrink || fitted_height <= available_height + EPSILON {
        let ratio = width_ratio.min(height_ratio);
        let width_mm = content_width * ratio;
        return Ok(vec![PageRegion {
            index: 0,
            source_y: 0,
            source_height: raster_height,
            x_mm: (layout.page.width_mm - width_mm) / 2.0,
            y_mm: layout.margin_mm,
            width_mm,
            height_mm: content_height * ratio,
        }]);
    }

    let pages = ((fitted_height / available_height) - EPSILON).ceil() as u64;
    let pages = pages.clamp(1, raster_height as u64);
    let mm_per_source_px = layout.px_to_mm * width_ratio;
    let x_mm = (layout.page.width_mm - available_width) / 2.0;

    tracing::debug!(
        "Paginating {}x{}px raster onto {} pages ({:.2}mm tall at full width, {:.2}mm per page)",
        raster_width,
        raster_height,
        pages,
        fitted_height,
        available_height
    );

    let boundary = |i: u64| (raster_height as u64 * i / pages) as u32;
    Ok((0..pages)
        .map(|i| {
            let source_y = boundary(i);
            let source_height = boundary(i + 1) - source_y;
            PageRegion {
                index: i as usize,
                source_y,
                source_height,
                x_mm,
                y_mm: layout.margin_mm,
                width_mm: available_width,
                height_mm: source_height as f64 * mm_per_source_px,
            }
        })
        .collect())
}
