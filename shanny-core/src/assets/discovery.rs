use std::io;
use std::path::Path;

/// File extensions treated as hero images, compared case-insensitively.
pub const HERO_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Lists hero images in `dir` as locators under `base_path`, sorted.
///
/// A missing directory yields an empty list.
pub fn discover_hero_images(dir: &Path, base_path: &str) -> io::Result<Vec<String>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err),
    };

    let base = base_path.trim_end_matches('/');
    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                HERO_IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if !is_image {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            images.push(format!("{base}/{name}"));
        }
    }
    images.sort();
    Ok(images)
}
