//! Export of a positioned scene to an output file.
//!
//! All formats render through SVG first; PNG and PDF are rasterized from
//! it. Writes are atomic: bytes go to a temporary file in the target
//! directory which is renamed into place only once fully written, so a
//! failed render never leaves a partial output file behind.

mod raster;
mod svg;

use std::{fs, io::Write, path::Path};

use log::{error, info};
use tempfile::NamedTempFile;

use crate::{
    config::{OutputFormat, RenderAttributes},
    error::Error,
    layout::Scene,
};

/// Renders `scene` in `format` and atomically writes it to `path`.
pub fn export(
    scene: &Scene,
    attributes: &RenderAttributes,
    path: &Path,
    format: OutputFormat,
) -> Result<(), Error> {
    let rendered = svg::render(scene, attributes)?;
    let bytes = match format {
        OutputFormat::Svg => rendered.into_bytes(),
        OutputFormat::Png => {
            raster::svg_to_png(&rendered).map_err(|err| Error::Export(Box::new(err)))?
        }
        OutputFormat::Pdf => {
            raster::svg_to_pdf(&rendered).map_err(|err| Error::Export(Box::new(err)))?
        }
    };

    write_atomically(path, &bytes)?;
    info!(
        path = path.display().to_string(),
        format:?,
        byte_count = bytes.len();
        "Diagram exported"
    );

    Ok(())
}

/// Directory that will hold `path`, usable with [`NamedTempFile::new_in`].
pub fn output_directory(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let directory = output_directory(path);
    fs::create_dir_all(directory)?;

    let mut temp_file = NamedTempFile::new_in(directory)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|err| {
        error!(path = path.display().to_string(), err:err; "Failed to persist output file");
        Error::Io(err.error)
    })?;

    Ok(())
}
