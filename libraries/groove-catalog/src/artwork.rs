//! Cover art as inline data URIs
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lofty::{PictureType, Tag};
use std::path::Path;
use tracing::warn;

/// Maximum artwork size (5MB)
pub const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Image extensions accepted for folder covers
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// File stems recognized as folder covers
const COVER_STEMS: [&str; 2] = ["cover", "folder"];

/// Encode image bytes as `data:<mime>;base64,<data>`
pub fn data_uri(mime_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
}

/// Embedded cover of a tag as a data URI
///
/// Prefers the front cover, otherwise the first picture. Oversized images
/// are skipped.
pub fn embedded_cover(tag: &Tag) -> Option<String> {
    let pictures = tag.pictures();
    let picture = pictures
        .iter()
        .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
        .or_else(|| pictures.first())?;

    let data = picture.data();
    if data.len() > MAX_ARTWORK_SIZE {
        warn!(
            "Embedded artwork too large ({} bytes, max {}), skipping",
            data.len(),
            MAX_ARTWORK_SIZE
        );
        return None;
    }

    let mime_type = picture
        .mime_type()
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());

    Some(data_uri(&mime_type, data))
}

/// MIME type for an image file extension
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// First `cover.*` / `folder.*` image directly inside `dir`, as a data URI
///
/// Candidates are tried in file-name order.
pub fn folder_cover(dir: &Path) -> Option<String> {
    let mut candidates: Vec<_> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_cover_file(path))
        .collect();
    candidates.sort();

    candidates.into_iter().find_map(|path| {
        let extension = path.extension()?.to_str()?;
        let mime_type = mime_for_extension(extension)?;

        match std::fs::read(&path) {
            Ok(data) if data.len() <= MAX_ARTWORK_SIZE => Some(data_uri(mime_type, &data)),
            Ok(data) => {
                warn!(
                    "Cover {} too large ({} bytes), skipping",
                    path.display(),
                    data.len()
                );
                None
            }
            Err(e) => {
                warn!("Failed to read cover {}: {}", path.display(), e);
                None
            }
        }
    })
}

fn is_cover_file(path: &Path) -> bool {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match (stem, extension) {
        (Some(stem), Some(extension)) => {
            COVER_STEMS.contains(&stem.as_str()) && IMAGE_EXTENSIONS.contains(&extension.as_str())
        }
        _ => false,
    }
}
