//! Screenshot references.
//!
//! Reports carry a screenshot as an opaque reference string. This module
//! turns a local image file into such a reference after checking its type
//! and size; the store never looks inside the string.
//!
//! The reference is the canonical filesystem path, unescaped. It is not a
//! URI and must not be handed to anything that expects one.

use std::fs;
use std::path::Path;

/// Largest accepted screenshot (5 MiB).
pub const DEFAULT_MAX_SCREENSHOT_BYTES: u64 = 5 * 1024 * 1024;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    #[error("{path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("{0}: not a regular file")]
    NotAFile(String),

    #[error("{0}: unsupported image type (expected one of png, jpg, jpeg, gif, webp, bmp)")]
    UnsupportedType(String),

    #[error("{path}: file too large ({size} bytes, limit {limit})")]
    TooLarge { path: String, size: u64, limit: u64 },
}

/// Check `path` and return its canonical absolute path as the reference.
pub fn screenshot_reference(
    path: impl AsRef<Path>,
    max_bytes: u64,
) -> Result<String, ScreenshotError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|e| ScreenshotError::Unreadable {
        path: shown.clone(),
        message: e.to_string(),
    })?;
    if !metadata.is_file() {
        return Err(ScreenshotError::NotAFile(shown));
    }

    let is_image = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    if !is_image {
        return Err(ScreenshotError::UnsupportedType(shown));
    }

    if metadata.len() > max_bytes {
        return Err(ScreenshotError::TooLarge {
            path: shown,
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let absolute = fs::canonicalize(path).map_err(|e| ScreenshotError::Unreadable {
        path: shown,
        message: e.to_string(),
    })?;
    Ok(absolute.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(name: &str, bytes: &[u8]) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let dir =
            std::env::temp_dir().join(format!("bugtrack-shot-{}-{unique}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        let path = dir.join(name);
        fs::write(&path, bytes).expect("fixture should write");
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn accepts_small_image_and_returns_canonical_path() {
        let path = temp_file("shot.PNG", b"\x89PNG fake");
        let reference = screenshot_reference(&path, DEFAULT_MAX_SCREENSHOT_BYTES)
            .expect("small png should be accepted");
        assert!(Path::new(&reference).is_absolute());
        assert!(reference.ends_with("shot.PNG"));
        assert_eq!(
            reference,
            fs::canonicalize(&path).expect("fixture exists").display().to_string()
        );
        cleanup(&path);
    }

    #[test]
    fn reserved_uri_characters_pass_through_unescaped() {
        let path = temp_file("login #2 50%.png", b"\x89PNG fake");
        let reference = screenshot_reference(&path, DEFAULT_MAX_SCREENSHOT_BYTES)
            .expect("png with spaces should be accepted");
        assert!(!reference.contains("%20"));
        assert!(reference.ends_with("login #2 50%.png"));
        assert!(Path::new(&reference).is_file());
        cleanup(&path);
    }

    #[test]
    fn rejects_non_image_extension() {
        let path = temp_file("notes.txt", b"hello");
        let err = screenshot_reference(&path, DEFAULT_MAX_SCREENSHOT_BYTES)
            .expect_err("txt must be rejected");
        assert!(matches!(err, ScreenshotError::UnsupportedType(_)));
        cleanup(&path);
    }

    #[test]
    fn rejects_oversized_file() {
        let path = temp_file("big.jpg", &[0u8; 64]);
        let err = screenshot_reference(&path, 16).expect_err("oversized must be rejected");
        assert!(matches!(err, ScreenshotError::TooLarge { size: 64, limit: 16, .. }));
        cleanup(&path);
    }

    #[test]
    fn rejects_missing_file() {
        let err = screenshot_reference(
            "/nonexistent/bugtrack/shot.png",
            DEFAULT_MAX_SCREENSHOT_BYTES,
        )
        .expect_err("missing file must be rejected");
        assert!(matches!(err, ScreenshotError::Unreadable { .. }));
    }
}
