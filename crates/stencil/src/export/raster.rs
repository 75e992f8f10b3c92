//! Rasterization of rendered SVG to PNG and PDF bytes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
    #[error("failed to convert SVG to PDF")]
    PdfConvert,
}

pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, RasterError> {
    let mut opt = usvg::Options::default();
    // Keep output stable-ish across environments while still using system fonts.
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    let size = tree.size();
    let width_px = size.width().ceil().max(1.0) as u32;
    let height_px = size.height().ceil().max(1.0) as u32;
    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

pub fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, RasterError> {
    let mut opt = svg2pdf::usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|_| RasterError::PdfConvert)
}
