//! Upload filename policy.
//!
//! Every uploaded image passes through [`validate_image_filename`] before any
//! byte is written. The returned name is safe to join onto a storage directory
//! and then gets a collision prefix via [`record_image_filename`] or
//! [`screenshot_filename`].

use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;
use crate::types::DbId;

/// Image extensions accepted by both upload endpoints (compared lowercase).
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Reduce a client-supplied filename to `[A-Za-z0-9_.-]`.
///
/// - compatibility decomposition (NFKD) first, so accented letters keep their
///   base letter, then remaining non-ASCII characters are dropped
/// - path separators become whitespace, so directory components cannot survive
/// - whitespace runs are joined with `_`
/// - leading and trailing `.` / `_` are stripped (no hidden files, no `..`)
///
/// The result may be empty; callers must treat that as an invalid name.
pub fn sanitize_filename(raw: &str) -> String {
    let separated: String = raw
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Lowercased text after the last `.`, if the name has one.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Whether `filename` ends in one of [`ALLOWED_IMAGE_EXTENSIONS`].
pub fn is_allowed_image(filename: &str) -> bool {
    file_extension(filename)
        .is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Validate the filename of an uploaded image and return its sanitized form.
///
/// The extension is checked on the sanitized name so the stored file always
/// carries an allowed suffix.
pub fn validate_image_filename(raw: Option<&str>) -> Result<String, CoreError> {
    let raw = match raw {
        Some(name) if !name.is_empty() => name,
        _ => return Err(CoreError::Validation("No file selected".into())),
    };

    let sanitized = sanitize_filename(raw);
    if sanitized.is_empty() {
        return Err(CoreError::Validation(format!(
            "Filename '{raw}' has no usable characters"
        )));
    }

    if !is_allowed_image(&sanitized) {
        return Err(CoreError::Validation(format!(
            "File type not allowed. Allowed extensions: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    Ok(sanitized)
}

/// Stored name for an image attached to a record: `{id}_{name}`.
pub fn record_image_filename(id: DbId, sanitized: &str) -> String {
    format!("{id}_{sanitized}")
}

/// Stored name for a screenshot: `{unix_seconds}_{name}`.
///
/// Two uploads of the same name within one second map to the same file.
pub fn screenshot_filename(unix_secs: i64, sanitized: &str) -> String {
    format!("{unix_secs}_{sanitized}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("chair.png"), "chair.png");
        assert_eq!(sanitize_filename("oak-chair_v2.JPG"), "oak-chair_v2.JPG");
    }

    #[test]
    fn sanitize_joins_whitespace() {
        assert_eq!(sanitize_filename("my  cool\tchair.png"), "my_cool_chair.png");
    }

    #[test]
    fn sanitize_strips_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("/abs/path/shot.gif"), "abs_path_shot.gif");
    }

    #[test]
    fn sanitize_drops_unsafe_and_non_ascii() {
        assert_eq!(sanitize_filename("silla<>|:*?.png"), "silla.png");
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
    }

    #[test]
    fn sanitize_folds_accents_to_base_letters() {
        assert_eq!(sanitize_filename("sillón.png"), "sillon.png");
        assert_eq!(sanitize_filename("Café Ñandú.JPG"), "Cafe_Nandu.JPG");
        assert_eq!(sanitize_filename("ﬁle².gif"), "file2.gif");
    }

    #[test]
    fn sanitize_can_produce_empty() {
        assert_eq!(sanitize_filename("../.."), "");
        assert_eq!(sanitize_filename("日本語"), "");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(file_extension("a.PNG").as_deref(), Some("png"));
        assert_eq!(file_extension("archive.tar.GZ").as_deref(), Some("gz"));
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn allow_list() {
        for name in ["a.png", "a.jpg", "a.JPEG", "a.gif"] {
            assert!(is_allowed_image(name), "{name} should be allowed");
        }
        for name in ["a.txt", "a.png.exe", "png", "a.webp"] {
            assert!(!is_allowed_image(name), "{name} should be rejected");
        }
    }

    #[test]
    fn validate_rejects_missing_or_empty() {
        assert_matches!(validate_image_filename(None), Err(CoreError::Validation(_)));
        assert_matches!(validate_image_filename(Some("")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn validate_rejects_disallowed_extension() {
        assert_matches!(
            validate_image_filename(Some("notes.txt")),
            Err(CoreError::Validation(msg)) if msg.contains("not allowed")
        );
    }

    #[test]
    fn validate_checks_sanitized_name() {
        // The raw suffix is "png" but sanitizing leaves no extension behind.
        assert_matches!(validate_image_filename(Some("..png")), Err(_));
        assert_eq!(
            validate_image_filename(Some("../shots/Front View.PNG")).unwrap(),
            "shots_Front_View.PNG"
        );
    }

    #[test]
    fn collision_prefixes() {
        assert_eq!(record_image_filename(7, "chair.png"), "7_chair.png");
        assert_eq!(
            screenshot_filename(1_700_000_000, "shot.gif"),
            "1700000000_shot.gif"
        );
    }
}
