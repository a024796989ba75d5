use crate::render::{DPI, Dashboard};
use image::{Rgb, RgbImage, imageops};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Blank border left around the inked part of the page when cropping (0.1 in)
const CROP_PADDING: u32 = DPI / 10;

/// [`DPI`] expressed in the unit used by PNG's `pHYs` chunk
const PIXELS_PER_METER: u32 = 11_811;

const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// A dashboard that has been written to disk
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Export {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Export {
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// The PNG file's contents, as written
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("failed to encode {filename} as PNG")]
    Encode {
        filename: String,
        source: png::EncodingError,
    },
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Crops the dashboard's page down to its contents and saves it as a PNG in
/// `dir` under the period's export filename, replacing any file already
/// there.
///
/// The file is written to a temporary name first and renamed into place, so
/// a failed export never leaves a truncated PNG behind.
pub(crate) fn export(dashboard: &Dashboard, dir: &Path) -> Result<Export, ExportError> {
    let filename = dashboard.period().export_filename();
    let path = dir.join(&filename);
    let cropped = crop_to_content(dashboard.image(), CROP_PADDING);
    let bytes = match encode_png(&cropped) {
        Ok(bytes) => bytes,
        Err(source) => {
            tracing::error!(filename = %filename, error = %source, "PNG encoding failed");
            return Err(ExportError::Encode { filename, source });
        }
    };
    if let Err(source) = write_atomic(&path, &bytes) {
        tracing::error!(path = %path.display(), error = %source, "export failed");
        return Err(ExportError::Write { path, source });
    }
    tracing::info!(path = %path.display(), bytes = bytes.len(), "dashboard exported");
    Ok(Export { path, bytes })
}

/// Returns the smallest region of `image` containing every non-background
/// pixel, grown by `padding` on each side (clamped to the image)
pub(crate) fn crop_to_content(image: &RgbImage, padding: u32) -> RgbImage {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in image.enumerate_pixels() {
        if *px != BACKGROUND {
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }
    let Some((x0, y0, x1, y1)) = bounds else {
        return image.clone();
    };
    let left = x0.saturating_sub(padding);
    let top = y0.saturating_sub(padding);
    let right = x1.saturating_add(padding).min(image.width() - 1);
    let bottom = y1.saturating_add(padding).min(image.height() - 1);
    imageops::crop_imm(image, left, top, right - left + 1, bottom - top + 1).to_image()
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, png::EncodingError> {
    let mut bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut bytes, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: PIXELS_PER_METER,
        yppu: PIXELS_PER_METER,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(bytes)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_in(dir)?;
    keep_permissions(tmp.as_file(), path)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

// Same mode as a plain `File::create`: 0666 less the umask
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// A file being replaced passes its permissions on to its replacement
fn keep_permissions(file: &File, target: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => file.set_permissions(meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
