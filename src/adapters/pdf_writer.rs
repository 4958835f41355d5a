use crate::core::paginate::{PageRegion, PageSize};
use crate::domain::model::Raster;
use crate::utils::error::{Result, SplitError};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const MM_TO_PT: f64 = 72.0 / 25.4;
const IMAGE_NAME: &[u8] = b"Im0";

fn encoding_error(err: impl std::fmt::Display) -> SplitError {
    SplitError::EncodingError {
        format: "PDF".to_string(),
        message: err.to_string(),
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as _)
}

/// Writes one page per `(region, slice)` pair. Each slice is drawn at the
/// region's position and size; page coordinates are converted from
/// top-left millimetres to PDF points.
pub fn encode_pdf(pages: &[(PageRegion, Raster)], page_size: PageSize) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(encoding_error("no pages to write"));
    }

    let page_width = page_size.width_mm * MM_TO_PT;
    let page_height = page_size.height_mm * MM_TO_PT;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for (region, slice) in pages {
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => slice.width as i64,
                "Height" => slice.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
            },
            slice.to_rgb(),
        );
        let image_id = doc.add_object(image);

        let width = region.width_mm * MM_TO_PT;
        let height = region.height_mm * MM_TO_PT;
        let x = region.x_mm * MM_TO_PT;
        let y = page_height - (region.y_mm + region.height_mm) * MM_TO_PT;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        real(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        real(height),
                        real(x),
                        real(y),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(IMAGE_NAME.to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(encoding_error)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                real(page_width),
                real(page_height),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => image_id,
                },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(encoding_error)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(index: usize, source_y: u32, source_height: u32) -> PageRegion {
        PageRegion {
            index,
            source_y,
            source_height,
            x_mm: 10.0,
            y_mm: 10.0,
            width_mm: 190.0,
            height_mm: 100.0,
        }
    }

    #[test]
    fn test_encode_pdf_page_count() {
        let slice = Raster::new(4, 2, vec![255; 4 * 2 * 4]);
        let pages = vec![
            (region(0, 0, 2), slice.clone()),
            (region(1, 2, 2), slice.clone()),
            (region(2, 4, 2), slice),
        ];

        let bytes = encode_pdf(&pages, PageSize::A4).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_encode_pdf_requires_pages() {
        assert!(encode_pdf(&[], PageSize::A4).is_err());
    }
}
