use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, warn};

use crate::error::{Error, Result};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let read_dir_err = |source| Error::ReadDir { path: dir_path.to_path_buf(), source };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(Error::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

/// EXIF orientation tag of a JPEG, 1 (upright) when absent or unreadable.
fn exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            // Non-critical: proceed without rotation
            warn!(path = ?image_path, "could not read EXIF data: {e}");
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .map_err(|source| Error::ReadFile { path: image_path.to_path_buf(), source })?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| Error::Decode { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW. Flipped orientations are ignored.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!(path = ?image_path, orientation, "applied EXIF rotation");
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| Error::Texture { path: image_path.to_path_buf(), reason: e.to_string() })?;

    // Unload the Image data from CPU memory
    drop(image);

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_image_extensions() {
        assert!(is_image(Path::new("a/b/photo.JPG")));
        assert!(is_image(Path::new("cake.png")));
        assert!(!is_image(Path::new("music.mp3")));
        assert!(!is_image(Path::new("README")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let err = load_sorted_image_paths(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, Error::ReadDir { .. }));
    }

    #[test]
    fn non_jpeg_bytes_have_upright_orientation() {
        assert_eq!(exif_orientation(Path::new("x.jpg"), b"not a jpeg"), 1);
    }
}
