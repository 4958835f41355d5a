// Adapters layer: concrete implementations for rendering, encoding and I/O.

pub mod clipboard;
pub mod pdf_writer;
pub mod png_encoder;
pub mod raster;
pub mod storage;
